//! Per-attribute contributions to the applicant score.
//!
//! Every tier cascade is checked best tier first, so a value sitting exactly on
//! a boundary resolves to the better tier.

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, EmploymentStatus};

pub const BASE_SCORE: i32 = 600;

const AGE_OPTIMAL_MIN: u8 = 25;
const AGE_OPTIMAL_MAX: u8 = 55;
const AGE_OPTIMAL_BONUS: i32 = 30;
const AGE_YOUNG_PENALTY: i32 = -20;
const AGE_SENIOR_BONUS: i32 = 10;

const INCOME_TIERS: [(f64, i32); 3] = [(100_000.0, 50), (60_000.0, 30), (40_000.0, 10)];
const INCOME_LOW_PENALTY: i32 = -30;

const CREDIT_TIERS: [(u8, i32); 3] = [(10, 50), (5, 30), (2, 10)];
const CREDIT_POOR_PENALTY: i32 = -20;

// Upper bounds, lowest ratio first.
const DTI_TIERS: [(f64, i32); 3] = [(0.2, 40), (0.35, 20), (0.5, -10)];
const DTI_HIGH_PENALTY: i32 = -50;

const SAVINGS_TIERS: [(f64, i32); 3] = [(50_000.0, 30), (20_000.0, 20), (10_000.0, 10)];

const EMPLOYED_MIN_YEARS: u8 = 3;
const EMPLOYED_BONUS: i32 = 30;
const SELF_EMPLOYED_MIN_YEARS: u8 = 5;
const SELF_EMPLOYED_BONUS: i32 = 20;
const UNEMPLOYED_PENALTY: i32 = -40;

const LOAN_PENALTY_PER_LOAN: i32 = 10;

pub fn score_age(age: u8) -> i32 {
    if (AGE_OPTIMAL_MIN..=AGE_OPTIMAL_MAX).contains(&age) {
        AGE_OPTIMAL_BONUS
    } else if age < AGE_OPTIMAL_MIN {
        AGE_YOUNG_PENALTY
    } else {
        AGE_SENIOR_BONUS
    }
}

pub fn score_income(income: f64) -> i32 {
    INCOME_TIERS
        .iter()
        .find(|(threshold, _)| income >= *threshold)
        .map_or(INCOME_LOW_PENALTY, |(_, points)| *points)
}

pub fn score_credit_history(years: u8) -> i32 {
    CREDIT_TIERS
        .iter()
        .find(|(threshold, _)| years >= *threshold)
        .map_or(CREDIT_POOR_PENALTY, |(_, points)| *points)
}

pub fn score_debt_to_income_ratio(ratio: f64) -> i32 {
    DTI_TIERS
        .iter()
        .find(|(ceiling, _)| ratio <= *ceiling)
        .map_or(DTI_HIGH_PENALTY, |(_, points)| *points)
}

pub fn score_savings(savings: f64) -> i32 {
    SAVINGS_TIERS
        .iter()
        .find(|(threshold, _)| savings >= *threshold)
        .map_or(0, |(_, points)| *points)
}

pub fn score_employment(status: EmploymentStatus, years: u8) -> i32 {
    match status {
        EmploymentStatus::Employed if years >= EMPLOYED_MIN_YEARS => EMPLOYED_BONUS,
        EmploymentStatus::SelfEmployed if years >= SELF_EMPLOYED_MIN_YEARS => SELF_EMPLOYED_BONUS,
        EmploymentStatus::Unemployed => UNEMPLOYED_PENALTY,
        EmploymentStatus::Employed | EmploymentStatus::SelfEmployed => 0,
    }
}

/// Flat deduction per open loan. Not floored; only the final score is clamped.
pub fn calculate_loans_penalty(count: u8) -> i32 {
    -i32::from(count) * LOAN_PENALTY_PER_LOAN
}

/// Names the individual contributions for audit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Age,
    Income,
    CreditHistory,
    DebtToIncome,
    Savings,
    Employment,
    LoansPenalty,
}

impl FactorKind {
    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::Age => "age",
            FactorKind::Income => "income",
            FactorKind::CreditHistory => "credit_history",
            FactorKind::DebtToIncome => "debt_to_income",
            FactorKind::Savings => "savings",
            FactorKind::Employment => "employment",
            FactorKind::LoansPenalty => "loans_penalty",
        }
    }
}

/// Signed contribution of each attribute; the loans penalty is already non-positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringFactors {
    pub age: i32,
    pub income: i32,
    pub credit_history: i32,
    pub debt_to_income: i32,
    pub savings: i32,
    pub employment: i32,
    pub loans_penalty: i32,
}

impl ScoringFactors {
    pub fn for_profile(profile: &ApplicantProfile) -> Self {
        Self {
            age: score_age(profile.age),
            income: score_income(profile.income),
            credit_history: score_credit_history(profile.credit_history_years),
            debt_to_income: score_debt_to_income_ratio(profile.debt_to_income_ratio),
            savings: score_savings(profile.savings),
            employment: score_employment(profile.employment_status, profile.employment_years),
            loans_penalty: calculate_loans_penalty(profile.existing_loans),
        }
    }

    pub fn components(&self) -> [(FactorKind, i32); 7] {
        [
            (FactorKind::Age, self.age),
            (FactorKind::Income, self.income),
            (FactorKind::CreditHistory, self.credit_history),
            (FactorKind::DebtToIncome, self.debt_to_income),
            (FactorKind::Savings, self.savings),
            (FactorKind::Employment, self.employment),
            (FactorKind::LoansPenalty, self.loans_penalty),
        ]
    }

    /// Base score plus every contribution, before clamping.
    pub fn total(&self) -> i32 {
        BASE_SCORE
            + self
                .components()
                .iter()
                .map(|(_, points)| points)
                .sum::<i32>()
    }
}
