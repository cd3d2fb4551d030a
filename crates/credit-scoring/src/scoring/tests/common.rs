use axum::response::Response;
use serde_json::{json, Value};

use crate::scoring::domain::{ApplicantProfile, EmploymentStatus, ScoreRequest};
use crate::scoring::{ScoringEngine, ScoringThresholds};

pub(super) fn base_request() -> ScoreRequest {
    ScoreRequest {
        age: 35,
        income: 75_000.0,
        credit_history_years: 8,
        existing_loans: 2,
        debt_to_income_ratio: 0.25,
        savings: 25_000.0,
        employment_status: "employed".to_string(),
        employment_years: 5,
    }
}

pub(super) fn excellent_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 40,
        income: 120_000.0,
        credit_history_years: 12,
        existing_loans: 0,
        debt_to_income_ratio: 0.15,
        savings: 60_000.0,
        employment_status: EmploymentStatus::Employed,
        employment_years: 8,
    }
}

pub(super) fn poor_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 20,
        income: 20_000.0,
        credit_history_years: 0,
        existing_loans: 6,
        debt_to_income_ratio: 0.8,
        savings: 0.0,
        employment_status: EmploymentStatus::Unemployed,
        employment_years: 0,
    }
}

/// Lands on 610 with the default thresholds.
pub(super) fn moderate_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 28,
        income: 45_000.0,
        credit_history_years: 2,
        existing_loans: 3,
        debt_to_income_ratio: 0.4,
        savings: 5_000.0,
        employment_status: EmploymentStatus::Employed,
        employment_years: 2,
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringThresholds::default())
}

pub(super) fn base_payload() -> Value {
    json!({
        "age": 35,
        "income": 75000,
        "credit_history_years": 8,
        "existing_loans": 2,
        "debt_to_income_ratio": 0.25,
        "savings": 25000,
        "employment_status": "employed",
        "employment_years": 5
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
