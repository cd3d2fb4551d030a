use serde::{Deserialize, Serialize};

use super::domain::Decision;

/// Fixed cutoff between `review` and `rejected`. Unlike the approval cutoff it
/// is not configurable.
pub const REVIEW_THRESHOLD: i32 = 550;

/// Externally tunable bounds applied to every score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringThresholds {
    pub min_score: i32,
    pub max_score: i32,
    pub approval_threshold: i32,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            min_score: 300,
            max_score: 850,
            approval_threshold: 650,
        }
    }
}

impl ScoringThresholds {
    /// Saturate `total` into `[min_score, max_score]`.
    pub fn clamp(&self, total: i32) -> i32 {
        total.min(self.max_score).max(self.min_score)
    }

    pub fn decide(&self, score: i32) -> Decision {
        if score >= self.approval_threshold {
            Decision::Approved
        } else if score >= REVIEW_THRESHOLD {
            Decision::Review
        } else {
            Decision::Rejected
        }
    }
}
