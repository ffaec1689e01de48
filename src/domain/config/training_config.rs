//! Training Configuration Domain Value Object
//!
//! `TrainingConfig` holds the hyper-parameters of a training run: the held-out
//! split and the shape of the tree ensemble.
//!
//! # Invariants
//!
//! - `n_trees` must be > 0
//! - `test_fraction` must be strictly between 0.0 and 1.0
//! - `min_samples_split` must be >= 2
//! - `max_depth` (if set) must be > 0

use crate::domain::ml::forest::ForestParameters;
use thiserror::Error;

/// Error type for TrainingConfig validation
#[derive(Debug, Error, PartialEq)]
pub enum TrainingConfigError {
    #[error("Invalid fraction: {field} = {value}. Must be strictly between 0.0 and 1.0")]
    InvalidFraction { field: String, value: f64 },

    #[error("Invalid limit: {field} = {value}. Must be at least {min}")]
    InvalidLimit {
        field: String,
        value: usize,
        min: usize,
    },
}

/// Training hyper-parameters
///
/// # Example
///
/// ```rust
/// use tenant_screening::domain::config::TrainingConfig;
///
/// let config = TrainingConfig::new(100, 42, 0.2, None, 2).expect("Valid config");
/// assert_eq!(config.n_trees, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,

    /// Seed for both the train/test shuffle and the bootstrap samples
    pub seed: u64,

    /// Share of rows held out for evaluation (e.g., 0.2 = 20%)
    pub test_fraction: f64,

    /// Maximum tree depth (None = grow until pure)
    pub max_depth: Option<u16>,

    /// Minimum samples required to split an internal node
    pub min_samples_split: usize,
}

impl TrainingConfig {
    pub fn new(
        n_trees: usize,
        seed: u64,
        test_fraction: f64,
        max_depth: Option<u16>,
        min_samples_split: usize,
    ) -> Result<Self, TrainingConfigError> {
        let config = Self {
            n_trees,
            seed,
            test_fraction,
            max_depth,
            min_samples_split,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TrainingConfigError> {
        if self.n_trees == 0 {
            return Err(TrainingConfigError::InvalidLimit {
                field: "n_trees".to_string(),
                value: self.n_trees,
                min: 1,
            });
        }

        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(TrainingConfigError::InvalidFraction {
                field: "test_fraction".to_string(),
                value: self.test_fraction,
            });
        }

        if self.min_samples_split < 2 {
            return Err(TrainingConfigError::InvalidLimit {
                field: "min_samples_split".to_string(),
                value: self.min_samples_split,
                min: 2,
            });
        }

        if let Some(depth) = self.max_depth
            && depth == 0
        {
            return Err(TrainingConfigError::InvalidLimit {
                field: "max_depth".to_string(),
                value: 0,
                min: 1,
            });
        }

        Ok(())
    }

    /// Number of held-out rows for a batch of `n` rows (rounded up).
    pub fn test_size(&self, n: usize) -> usize {
        ((n as f64) * self.test_fraction).ceil() as usize
    }

    pub fn forest_parameters(&self) -> ForestParameters {
        ForestParameters {
            n_trees: self.n_trees,
            seed: self.seed,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            test_fraction: 0.2,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TrainingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_trees, 100);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_invalid_fraction() {
        let result = TrainingConfig::new(100, 42, 1.0, None, 2);
        assert_eq!(
            result.unwrap_err(),
            TrainingConfigError::InvalidFraction {
                field: "test_fraction".to_string(),
                value: 1.0,
            }
        );
        assert!(TrainingConfig::new(100, 42, 0.0, None, 2).is_err());
    }

    #[test]
    fn test_invalid_limits() {
        assert!(TrainingConfig::new(0, 42, 0.2, None, 2).is_err());
        assert!(TrainingConfig::new(10, 42, 0.2, None, 1).is_err());
        assert!(TrainingConfig::new(10, 42, 0.2, Some(0), 2).is_err());
        assert!(TrainingConfig::new(10, 42, 0.2, Some(8), 2).is_ok());
    }

    #[test]
    fn test_test_size_rounds_up() {
        let config = TrainingConfig::default();
        assert_eq!(config.test_size(10), 2);
        assert_eq!(config.test_size(11), 3);
        assert_eq!(config.test_size(2), 1);
        assert_eq!(config.test_size(0), 0);
    }
}
