//! Configuration domain module
//!
//! Domain value objects for pipeline configuration, validated on construction.

pub mod training_config;

pub use training_config::{TrainingConfig, TrainingConfigError};
