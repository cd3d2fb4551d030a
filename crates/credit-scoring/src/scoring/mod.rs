//! Deterministic applicant scoring: boundary validation, factor scoring,
//! clamping, decision mapping, and the explanation attached to each result.

pub mod domain;
pub mod factors;
pub mod intake;
pub mod policy;
pub mod reason;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantProfile, Decision, EmploymentStatus, RiskLevel, ScoreRequest, ScoreResult,
};
pub use factors::{FactorKind, ScoringFactors, BASE_SCORE};
pub use intake::{validate, FieldViolation, ValidationError};
pub use policy::{ScoringThresholds, REVIEW_THRESHOLD};
pub use router::scoring_router;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator that applies the configured thresholds to a profile.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    thresholds: ScoringThresholds,
}

impl ScoringEngine {
    pub fn new(thresholds: ScoringThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ScoringThresholds {
        &self.thresholds
    }

    pub fn score(&self, profile: &ApplicantProfile) -> ScoreResult {
        self.evaluate(profile).result
    }

    /// Score a profile and keep the factor breakdown alongside the result.
    pub fn evaluate(&self, profile: &ApplicantProfile) -> ScoreOutcome {
        let factors = ScoringFactors::for_profile(profile);
        let raw_total = factors.total();
        let score = self.thresholds.clamp(raw_total);
        let decision = self.thresholds.decide(score);

        debug!(raw_total, score, ?factors, "applicant factors computed");

        ScoreOutcome {
            factors,
            raw_total,
            result: ScoreResult {
                score,
                decision,
                reason: reason::build_reason(score, decision, profile),
                risk_level: decision.risk_level(),
            },
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringThresholds::default())
    }
}

/// Scoring output with the audit trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub factors: ScoringFactors,
    pub raw_total: i32,
    pub result: ScoreResult,
}
