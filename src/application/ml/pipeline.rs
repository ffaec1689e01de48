//! Train/predict pipeline around the scaler and the tree ensemble.
//!
//! `train` fits a fresh scaler and forest and overwrites whatever the store
//! held before. `predict` only reads from the store.

use crate::domain::config::TrainingConfig;
use crate::domain::errors::PipelineError;
use crate::domain::ml::artifacts::{ModelArtifact, ScalerArtifact, TrainedModel, TrainingRun};
use crate::domain::ml::feature_registry::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, LabeledRow};
use crate::domain::ml::forest::TenantForest;
use crate::domain::ml::prediction::PredictionResult;
use crate::domain::ml::scaler::StandardScaler;
use crate::domain::repositories::ModelStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Rows split into a fitting subset and a held-out subset
struct Split {
    train_x: Vec<Vec<f64>>,
    train_y: Vec<u32>,
    test_x: Vec<Vec<f64>>,
    test_y: Vec<u32>,
}

fn distinct_classes(labels: &[u32]) -> usize {
    labels.iter().collect::<BTreeSet<_>>().len()
}

/// Shuffles row indices with the configured seed and holds out the first
/// `test_size` of them.
fn split_rows(rows: &[LabeledRow], config: &TrainingConfig) -> Split {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);

    let test_size = config.test_size(rows.len());
    let (test_idx, train_idx) = indices.split_at(test_size);

    let collect = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<u32>) {
        idx.iter()
            .map(|&i| (rows[i].features.to_vec(), rows[i].label.class()))
            .unzip()
    };
    let (train_x, train_y) = collect(train_idx);
    let (test_x, test_y) = collect(test_idx);

    Split {
        train_x,
        train_y,
        test_x,
        test_y,
    }
}

fn accuracy(predicted: &[u32], actual: &[u32]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();
    correct as f64 / actual.len() as f64
}

/// Fits a new scaler and forest on `rows`, persists both through `store` and
/// returns the held-out accuracy.
pub fn train(
    store: &dyn ModelStore,
    rows: &[LabeledRow],
    config: &TrainingConfig,
) -> Result<f64, PipelineError> {
    config
        .validate()
        .map_err(|e| PipelineError::training_data(e.to_string()))?;

    if rows.is_empty() {
        return Err(PipelineError::training_data("no training rows"));
    }
    // Non-finite values would poison the scaler and break tree fitting
    for (i, row) in rows.iter().enumerate() {
        let values = row.features.to_array();
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(PipelineError::training_data(format!(
                "row {}: feature {} is not a finite number: {}",
                i, FEATURE_NAMES[pos], values[pos]
            )));
        }
    }
    let labels: Vec<u32> = rows.iter().map(|r| r.label.class()).collect();
    let n_classes = distinct_classes(&labels);
    if n_classes < 2 {
        return Err(PipelineError::training_data(format!(
            "need at least 2 label classes, found {}",
            n_classes
        )));
    }

    let split = split_rows(rows, config);
    if distinct_classes(&split.train_y) < 2 {
        return Err(PipelineError::training_data(format!(
            "training split of {} rows contains a single class",
            split.train_y.len()
        )));
    }
    info!(
        "Split {} rows into {} training / {} held-out (seed {})",
        rows.len(),
        split.train_x.len(),
        split.test_x.len(),
        config.seed
    );

    let scaler = StandardScaler::fit(&split.train_x)?;
    let train_scaled = scaler.transform(&split.train_x)?;
    let test_scaled = scaler.transform(&split.test_x)?;

    info!(
        "Training tree ensemble (Trees: {}, Depth: {:?}, MinSplit: {})...",
        config.n_trees, config.max_depth, config.min_samples_split
    );
    let forest = TenantForest::fit(&train_scaled, &split.train_y, config.forest_parameters())?;

    let predicted = forest.predict(&test_scaled)?;
    let held_out_accuracy = accuracy(&predicted, &split.test_y);

    let run = TrainingRun::start();
    store.save_scaler(&ScalerArtifact { run, scaler })?;
    store.save_model(&ModelArtifact { run, forest })?;

    info!(
        "Training run {} complete: held-out accuracy {:.2}% on {} rows",
        run.id,
        held_out_accuracy * 100.0,
        split.test_y.len()
    );
    Ok(held_out_accuracy)
}

/// Loads the persisted pair, failing with `ModelNotTrained` if either half is missing.
pub fn load(store: &dyn ModelStore) -> Result<TrainedModel, PipelineError> {
    let scaler = store.load_scaler()?;
    let model = store.load_model()?;
    match (scaler, model) {
        (Some(scaler), Some(model)) => TrainedModel::pair(scaler, model, FEATURE_COUNT),
        _ => Err(PipelineError::ModelNotTrained),
    }
}

/// Scores one applicant with the persisted scaler and forest.
pub fn predict(
    store: &dyn ModelStore,
    features: &FeatureVector,
) -> Result<PredictionResult, PipelineError> {
    // Re-validate: callers may build the struct directly
    let features = FeatureVector::from_slice(&features.to_array())?;
    let trained = load(store)?;

    let scaled = trained.scaler.scaler.transform_row(&features.to_array())?;
    let votes = trained
        .model
        .forest
        .predict_votes(&[scaled])?
        .pop()
        .ok_or_else(|| PipelineError::artifact_corruption("model returned no prediction"))?;

    let result = PredictionResult {
        prediction: votes.class,
        confidence: votes.confidence(),
    };
    debug!(
        "Predicted class {} (confidence {:.4}) with model from run {}",
        result.prediction, result.confidence, trained.model.run.id
    );
    Ok(result)
}
