use super::domain::{ApplicantProfile, Decision, EmploymentStatus};

const GOOD_INCOME: f64 = 60_000.0;
const HEALTHY_DTI: f64 = 0.35;
const HIGH_DTI: f64 = 0.5;
const SOLID_CREDIT_YEARS: u8 = 5;
const LIMITED_CREDIT_YEARS: u8 = 3;
const INSUFFICIENT_CREDIT_YEARS: u8 = 2;

/// Human readable explanation for a decision. Mentions coarse applicant traits
/// only, never the individual factor contributions.
pub fn build_reason(score: i32, decision: Decision, profile: &ApplicantProfile) -> String {
    let (headline, notes) = match decision {
        Decision::Approved => (
            format!("Strong financial profile with score {score}."),
            vec![
                (profile.income >= GOOD_INCOME, "Good income level."),
                (
                    profile.debt_to_income_ratio <= HEALTHY_DTI,
                    "Healthy debt-to-income ratio.",
                ),
                (
                    profile.credit_history_years >= SOLID_CREDIT_YEARS,
                    "Solid credit history.",
                ),
            ],
        ),
        Decision::Review => (
            format!("Moderate score of {score} requires manual review."),
            vec![
                (
                    profile.debt_to_income_ratio > HEALTHY_DTI,
                    "Consider reducing debt-to-income ratio.",
                ),
                (
                    profile.credit_history_years < LIMITED_CREDIT_YEARS,
                    "Limited credit history.",
                ),
            ],
        ),
        Decision::Rejected => (
            format!("Low score of {score}."),
            vec![
                (
                    profile.debt_to_income_ratio > HIGH_DTI,
                    "High debt-to-income ratio.",
                ),
                (
                    profile.employment_status == EmploymentStatus::Unemployed,
                    "Unemployment concerns.",
                ),
                (
                    profile.credit_history_years < INSUFFICIENT_CREDIT_YEARS,
                    "Insufficient credit history.",
                ),
            ],
        ),
    };

    std::iter::once(headline.as_str())
        .chain(
            notes
                .into_iter()
                .filter_map(|(applies, sentence)| applies.then_some(sentence)),
        )
        .collect::<Vec<_>>()
        .join(" ")
}
