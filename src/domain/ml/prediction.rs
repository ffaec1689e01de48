use super::feature_registry::Decision;
use serde::{Deserialize, Serialize};

/// Outcome of scoring one applicant.
///
/// `confidence` is the probability mass of the predicted class, not the
/// acceptance probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: u32,
    pub confidence: f64,
}

impl PredictionResult {
    pub fn decision(&self) -> Option<Decision> {
        Decision::from_class(self.prediction)
    }

    /// Human-readable status as shown on the screening form
    pub fn status(&self) -> &'static str {
        match self.decision() {
            Some(Decision::Accepted) => "ACCEPTED",
            _ => "DECLINED",
        }
    }
}
