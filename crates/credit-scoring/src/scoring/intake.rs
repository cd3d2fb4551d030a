use std::fmt;

use serde::Serialize;

use super::domain::{ApplicantProfile, EmploymentStatus, ScoreRequest};

/// A single field that failed its domain check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Raised when a request cannot be turned into an [`ApplicantProfile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    let fields = violations
        .iter()
        .map(|violation| violation.field)
        .collect::<Vec<_>>()
        .join(", ");
    format!("invalid applicant fields: {fields}")
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: &'static str, message: String) {
        self.0.push(FieldViolation { field, message });
    }

    fn int_in(&mut self, field: &'static str, value: i64, min: u8, max: u8) -> u8 {
        if value < i64::from(min) || value > i64::from(max) {
            self.push(
                field,
                format!("must be between {min} and {max} inclusive, got {value}"),
            );
            return min;
        }
        value as u8
    }

    fn real(&mut self, field: &'static str, value: f64) -> bool {
        if value.is_finite() {
            true
        } else {
            self.push(field, "must be a finite number".to_string());
            false
        }
    }
}

/// Check every field of the request against its domain and normalize the
/// employment status. All violations are reported together.
pub fn validate(request: ScoreRequest) -> Result<ApplicantProfile, ValidationError> {
    let mut violations = Violations::default();

    let age = violations.int_in("age", request.age, 18, 100);
    let credit_history_years =
        violations.int_in("credit_history_years", request.credit_history_years, 0, 50);
    let existing_loans = violations.int_in("existing_loans", request.existing_loans, 0, 20);
    let employment_years = violations.int_in("employment_years", request.employment_years, 0, 60);

    if violations.real("income", request.income) && request.income <= 0.0 {
        violations.push(
            "income",
            format!("must be greater than 0, got {}", request.income),
        );
    }

    let ratio = request.debt_to_income_ratio;
    if violations.real("debt_to_income_ratio", ratio) && !(0.0..=1.0).contains(&ratio) {
        violations.push(
            "debt_to_income_ratio",
            format!("must be between 0 and 1 inclusive, got {ratio}"),
        );
    }

    if violations.real("savings", request.savings) && request.savings < 0.0 {
        violations.push(
            "savings",
            format!("must be 0 or greater, got {}", request.savings),
        );
    }

    let employment_status = EmploymentStatus::parse(&request.employment_status);
    if employment_status.is_none() {
        let allowed = EmploymentStatus::ALL
            .iter()
            .map(|status| status.label())
            .collect::<Vec<_>>()
            .join(", ");
        violations.push(
            "employment_status",
            format!("employment_status must be one of: {allowed}"),
        );
    }

    match employment_status {
        Some(employment_status) if violations.0.is_empty() => Ok(ApplicantProfile {
            age,
            income: request.income,
            credit_history_years,
            existing_loans,
            debt_to_income_ratio: ratio,
            savings: request.savings,
            employment_status,
            employment_years,
        }),
        _ => Err(ValidationError {
            violations: violations.0,
        }),
    }
}

impl TryFrom<ScoreRequest> for ApplicantProfile {
    type Error = ValidationError;

    fn try_from(request: ScoreRequest) -> Result<Self, Self::Error> {
        validate(request)
    }
}
