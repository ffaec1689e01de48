//! Trains the screening model from a CSV of historical applications.
//!
//! # Usage
//! ```sh
//! MODEL_DIR=models cargo run --bin train_model -- --input data/Credit_Income_Check.csv
//! ```

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tenant_screening::application::tenant_service;
use tenant_screening::application::ml::pipeline;
use tenant_screening::config::{self, Config};
use tenant_screening::infrastructure::persistence::FileModelStore;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the applications CSV (defaults to TRAINING_DATA_PATH)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for the model and scaler files (defaults to MODEL_DIR)
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Number of trees in the ensemble
    #[arg(long)]
    trees: Option<usize>,

    /// Seed for the train/test split and bootstrap samples
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(config::log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let mut training = config.training;
    if let Some(trees) = args.trees {
        training.n_trees = trees;
    }
    if let Some(seed) = args.seed {
        training.seed = seed;
    }
    training.validate()?;

    let input = args.input.unwrap_or(config.training_data_path);
    let model_dir = args.model_dir.unwrap_or(config.model_dir);

    let rows = tenant_service::parse_data(&input)?;
    if rows.is_empty() {
        bail!("No data could be parsed from file.");
    }

    let store = FileModelStore::new(&model_dir)?;
    let accuracy = pipeline::train(&store, &rows, &training)?;
    info!("Artifacts written to {:?}", model_dir);

    println!(
        "Model trained successfully! Accuracy: {:.2}% using {} samples.",
        accuracy * 100.0,
        rows.len()
    );
    Ok(())
}
