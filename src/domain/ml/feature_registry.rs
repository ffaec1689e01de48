use crate::domain::errors::PipelineError;
use serde::{Deserialize, Serialize};

/// Ordered list of feature names.
/// This order MUST match the column order of persisted scalers and models.
/// Any change here is a breaking change for trained artifacts.
pub const FEATURE_NAMES: &[&str] = &[
    "MonthlyIncome",
    "FICOScore",
    "RentToIncomeRatio",
    "HasCriminalRecord",
    "HasEvictionHistory",
    "AssetMonthlyValue",
];

pub const FEATURE_COUNT: usize = 6;

/// Width of a training row: the features followed by the label
pub const LABELED_ROW_WIDTH: usize = FEATURE_COUNT + 1;

/// Binary application outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Declined,
    Accepted,
}

impl Decision {
    pub fn class(self) -> u32 {
        match self {
            Decision::Declined => 0,
            Decision::Accepted => 1,
        }
    }

    pub fn from_class(class: u32) -> Option<Self> {
        match class {
            0 => Some(Decision::Declined),
            1 => Some(Decision::Accepted),
            _ => None,
        }
    }
}

/// Fixed-order applicant features.
///
/// The JSON representation uses the same keys the screening form submits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "MonthlyIncome")]
    pub monthly_income: f64,
    #[serde(rename = "FICOScore")]
    pub fico_score: f64,
    #[serde(rename = "RentToIncomeRatio")]
    pub rent_to_income_ratio: f64,
    #[serde(rename = "HasCriminalRecord")]
    pub has_criminal_record: f64,
    #[serde(rename = "HasEvictionHistory")]
    pub has_eviction_history: f64,
    #[serde(rename = "AssetMonthlyValue")]
    pub asset_monthly_value: f64,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.monthly_income,
            self.fico_score,
            self.rent_to_income_ratio,
            self.has_criminal_record,
            self.has_eviction_history,
            self.asset_monthly_value,
        ]
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }

    /// Builds a vector from positional values, rejecting wrong arity and non-finite values.
    pub fn from_slice(values: &[f64]) -> Result<Self, PipelineError> {
        if values.len() != FEATURE_COUNT {
            return Err(PipelineError::invalid_input(format!(
                "expected {} features, got {}",
                FEATURE_COUNT,
                values.len()
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(PipelineError::invalid_input(format!(
                "feature {} is not a finite number: {}",
                FEATURE_NAMES[pos], values[pos]
            )));
        }

        Ok(Self {
            monthly_income: values[0],
            fico_score: values[1],
            rent_to_income_ratio: values[2],
            has_criminal_record: values[3],
            has_eviction_history: values[4],
            asset_monthly_value: values[5],
        })
    }

    /// Parses the keyed JSON body of a screening request.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PipelineError> {
        let fv: FeatureVector = serde_json::from_value(value.clone())
            .map_err(|e| PipelineError::invalid_input(e.to_string()))?;
        Self::from_slice(&fv.to_array())
    }
}

/// Feature vector paired with its known outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledRow {
    pub features: FeatureVector,
    pub label: Decision,
}

impl LabeledRow {
    /// Flat `[features..., label]` representation
    pub fn to_vec(&self) -> Vec<f64> {
        let mut row = self.features.to_vec();
        row.push(f64::from(self.label.class()));
        row
    }

    /// Parses a flat `[features..., label]` row.
    pub fn from_slice(values: &[f64]) -> Result<Self, PipelineError> {
        if values.len() != LABELED_ROW_WIDTH {
            return Err(PipelineError::training_data(format!(
                "expected rows of {} values, got {}",
                LABELED_ROW_WIDTH,
                values.len()
            )));
        }
        let features = FeatureVector::from_slice(&values[..FEATURE_COUNT])
            .map_err(|e| PipelineError::training_data(e.to_string()))?;

        let raw_label = values[FEATURE_COUNT];
        let label = if raw_label == 0.0 {
            Decision::Declined
        } else if raw_label == 1.0 {
            Decision::Accepted
        } else {
            return Err(PipelineError::training_data(format!(
                "label must be 0 or 1, got {}",
                raw_label
            )));
        };

        Ok(Self { features, label })
    }
}
