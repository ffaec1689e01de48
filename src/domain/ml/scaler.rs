use crate::domain::errors::PipelineError;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};

/// Per-feature standardization: `(value - mean) / scale`.
///
/// `scale` is the sample standard deviation (n - 1 denominator) of the column
/// the scaler was fitted on. Columns with zero variance, or fitted on a single
/// row, get a scale of `1.0` so the centered value passes through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, PipelineError> {
        let n_features = match rows.first() {
            Some(first) => first.len(),
            None => return Err(PipelineError::training_data("cannot fit scaler on zero rows")),
        };
        if rows.iter().any(|r| r.len() != n_features) {
            return Err(PipelineError::training_data(
                "cannot fit scaler on ragged rows",
            ));
        }

        let mut means = Vec::with_capacity(n_features);
        let mut scales = Vec::with_capacity(n_features);

        for col in 0..n_features {
            let column: Vec<f64> = rows.iter().map(|r| r[col]).collect();
            let data = Data::new(column);
            let mean = data.mean().unwrap_or(0.0);
            let scale = data
                .std_dev()
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(1.0);
            means.push(mean);
            scales.push(scale);
        }

        Ok(Self { means, scales })
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if row.len() != self.n_features() {
            return Err(PipelineError::invalid_input(format!(
                "scaler expects {} features, got {}",
                self.n_features(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.means.iter().zip(self.scales.iter()))
            .map(|(v, (mean, scale))| (v - mean) / scale)
            .collect())
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, PipelineError> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }
}
