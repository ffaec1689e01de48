//! Scores one applicant with the persisted model.
//!
//! # Usage
//! ```sh
//! cargo run --bin predict_tenant -- --monthly-income 5000 --fico-score 700 \
//!     --rent-to-income-ratio 0.3 --asset-monthly-value 15000
//! cargo run --bin predict_tenant -- --json '{"MonthlyIncome": 5000, ...}'
//! ```

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tenant_screening::application::tenant_service;
use tenant_screening::config::{self, Config};
use tenant_screening::infrastructure::persistence::FileModelStore;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the model and scaler files (defaults to MODEL_DIR)
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Request body keyed by feature name; overrides the individual flags
    #[arg(long)]
    json: Option<String>,

    #[arg(long)]
    monthly_income: Option<f64>,

    #[arg(long)]
    fico_score: Option<f64>,

    /// Rent as a fraction of income (0.3 = 30%)
    #[arg(long)]
    rent_to_income_ratio: Option<f64>,

    #[arg(long)]
    criminal_record: bool,

    #[arg(long)]
    eviction_history: bool,

    #[arg(long)]
    asset_monthly_value: Option<f64>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(config::log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let store = FileModelStore::new(args.model_dir.unwrap_or(config.model_dir))?;

    let result = match &args.json {
        Some(body) => {
            let value: serde_json::Value = serde_json::from_str(body)?;
            tenant_service::predict_tenant_json(&store, &value)?
        }
        None => {
            let (Some(income), Some(fico), Some(ratio), Some(assets)) = (
                args.monthly_income,
                args.fico_score,
                args.rent_to_income_ratio,
                args.asset_monthly_value,
            ) else {
                bail!("Missing required fields");
            };
            let flag = |b: bool| if b { 1.0 } else { 0.0 };
            tenant_service::predict_tenant(
                &store,
                &[
                    income,
                    fico,
                    ratio,
                    flag(args.criminal_record),
                    flag(args.eviction_history),
                    assets,
                ],
            )?
        }
    };

    println!("{}", serde_json::to_string(&result)?);
    println!(
        "Status: {} (confidence {:.2}%)",
        result.status(),
        result.confidence * 100.0
    );
    Ok(())
}
