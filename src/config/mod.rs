//! Configuration module for the screening pipeline.
//!
//! Loads the model location, training data location and training
//! hyper-parameters from environment variables (optionally via `.env`).
//!
//! # Environment Variables
//! - `MODEL_DIR` - Directory holding the model and scaler artifacts (default: `.`)
//! - `TRAINING_DATA_PATH` - CSV of historical applications (default: `data/Credit_Income_Check.csv`)
//! - `FOREST_TREES` - Number of trees (default: 100)
//! - `RANDOM_SEED` - Seed for the split and the bootstrap samples (default: 42)
//! - `TEST_FRACTION` - Held-out share (default: 0.2)
//! - `MAX_TREE_DEPTH` - Maximum tree depth (default: unlimited)
//! - `MIN_SAMPLES_SPLIT` - Minimum samples to split a node (default: 2)
//! - `RUST_LOG` - Log filter directives (default: `info`)

use crate::domain::config::TrainingConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_TRAINING_DATA_PATH: &str = "data/Credit_Income_Check.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub model_dir: PathBuf,
    pub training_data_path: PathBuf,
    pub training: TrainingConfig,
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid {}: {}", key, raw)),
        None => Ok(default),
    }
}

/// Log filter built from `RUST_LOG`-style directives, `info` when unset or unparsable.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = TrainingConfig::default();

        let max_depth = match lookup("MAX_TREE_DEPTH") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .with_context(|| format!("Invalid MAX_TREE_DEPTH: {}", raw))?,
            ),
            None => defaults.max_depth,
        };

        let training = TrainingConfig::new(
            parse_var(&lookup, "FOREST_TREES", defaults.n_trees)?,
            parse_var(&lookup, "RANDOM_SEED", defaults.seed)?,
            parse_var(&lookup, "TEST_FRACTION", defaults.test_fraction)?,
            max_depth,
            parse_var(&lookup, "MIN_SAMPLES_SPLIT", defaults.min_samples_split)?,
        )
        .context("Failed to load training config")?;

        Ok(Self {
            model_dir: lookup("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            training_data_path: lookup("TRAINING_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRAINING_DATA_PATH)),
            training,
        })
    }
}
