use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Raw applicant payload as it arrives over the wire, before range checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub age: i64,
    pub income: f64,
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub credit_history_years: i64,
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub existing_loans: i64,
    pub debt_to_income_ratio: f64,
    pub savings: f64,
    pub employment_status: String,
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub employment_years: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WholeNumber {
    Int(i64),
    Float(f64),
}

/// Accepts `35` and `35.0` alike; any fractional part is an error.
pub(crate) fn deserialize_whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match WholeNumber::deserialize(deserializer)? {
        WholeNumber::Int(value) => Ok(value),
        WholeNumber::Float(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        WholeNumber::Float(value) => Err(de::Error::custom(format!(
            "expected a whole number, got {value}"
        ))),
    }
}

/// The validated applicant record consumed by the scoring engine.
///
/// Only [`validate`](super::intake::validate) (or `TryFrom<ScoreRequest>`)
/// builds one outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantProfile {
    pub(crate) age: u8,
    pub(crate) income: f64,
    pub(crate) credit_history_years: u8,
    pub(crate) existing_loans: u8,
    pub(crate) debt_to_income_ratio: f64,
    pub(crate) savings: f64,
    pub(crate) employment_status: EmploymentStatus,
    pub(crate) employment_years: u8,
}

impl ApplicantProfile {
    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn credit_history_years(&self) -> u8 {
        self.credit_history_years
    }

    pub fn existing_loans(&self) -> u8 {
        self.existing_loans
    }

    pub fn debt_to_income_ratio(&self) -> f64 {
        self.debt_to_income_ratio
    }

    pub fn savings(&self) -> f64 {
        self.savings
    }

    pub fn employment_status(&self) -> EmploymentStatus {
        self.employment_status
    }

    pub fn employment_years(&self) -> u8 {
        self.employment_years
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 3] = [
        EmploymentStatus::Employed,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Unemployed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Unemployed => "unemployed",
        }
    }

    /// Case-insensitive match against the closed set of labels. Surrounding
    /// whitespace is not stripped.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.label() == normalized)
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal outcome selected from the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Review,
    Rejected,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::Review => "review",
            Decision::Rejected => "rejected",
        }
    }

    pub const fn risk_level(self) -> RiskLevel {
        match self {
            Decision::Approved => RiskLevel::Low,
            Decision::Review => RiskLevel::Medium,
            Decision::Rejected => RiskLevel::High,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Response body returned for every successfully scored applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: i32,
    pub decision: Decision,
    pub reason: String,
    pub risk_level: RiskLevel,
}
