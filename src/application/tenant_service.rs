//! Entry points used by outer layers (CLI binaries, request handlers).
//!
//! These take and return plain numeric rows so a caller never needs the
//! domain types, and they report failures as [`PipelineError`] kinds.

use crate::application::ml::{feature_extractor, pipeline};
use crate::domain::config::TrainingConfig;
use crate::domain::errors::PipelineError;
use crate::domain::ml::feature_registry::{FeatureVector, LabeledRow};
use crate::domain::ml::prediction::PredictionResult;
use crate::domain::repositories::ModelStore;
use crate::infrastructure::data::csv_source;
use std::io::Read;
use std::path::Path;

/// Reads a CSV of historical applications and extracts labeled rows.
pub fn parse_data(path: impl AsRef<Path>) -> Result<Vec<LabeledRow>, PipelineError> {
    let records = csv_source::read_records_from_path(path.as_ref())?;
    Ok(feature_extractor::extract(&records))
}

/// Same as [`parse_data`] for an already-open source.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<LabeledRow>, PipelineError> {
    let records = csv_source::read_records(reader)?;
    Ok(feature_extractor::extract(&records))
}

/// Trains on rows shaped `[features..., label]` and returns held-out accuracy.
pub fn train_model(
    store: &dyn ModelStore,
    config: &TrainingConfig,
    rows: &[Vec<f64>],
) -> Result<f64, PipelineError> {
    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            LabeledRow::from_slice(row)
                .map_err(|e| PipelineError::training_data(format!("row {}: {}", i, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    pipeline::train(store, &rows, config)
}

/// Scores six positional feature values.
pub fn predict_tenant(
    store: &dyn ModelStore,
    features: &[f64],
) -> Result<PredictionResult, PipelineError> {
    let features = FeatureVector::from_slice(features)?;
    pipeline::predict(store, &features)
}

/// Scores a JSON body keyed by feature name, as submitted by the screening form.
pub fn predict_tenant_json(
    store: &dyn ModelStore,
    body: &serde_json::Value,
) -> Result<PredictionResult, PipelineError> {
    let features = FeatureVector::from_json(body)?;
    pipeline::predict(store, &features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ErrorKind;
    use crate::infrastructure::repositories::in_memory::InMemoryModelStore;

    #[test]
    fn test_train_model_rejects_bad_rows() {
        let store = InMemoryModelStore::new();
        let config = TrainingConfig::default();

        let err = train_model(&store, &config, &[vec![1.0, 2.0, 3.0]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TrainingData);
        assert!(err.to_string().contains("row 0"));

        let err = train_model(&store, &config, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TrainingData);
    }

    #[test]
    fn test_predict_tenant_arity() {
        let store = InMemoryModelStore::new();
        let err = predict_tenant(&store, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_parse_reader() {
        let data = "\
MonthlyIncome,FICOScore,RentToIncomeRatio,AssetMonthlyValue,CriminalFelonyCount,ApplicationResult
4000,600,0.30,100,1,Passed screening
,,0.40,,0,
3000,700,,50,0,FAILED
";
        let rows = parse_reader(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0].to_vec(),
            vec![4000.0, 600.0, 0.30, 1.0, 0.0, 100.0, 1.0]
        );
        assert_eq!(rows[1].to_vec(), vec![0.0, 650.0, 0.40, 0.0, 0.0, 0.0, 0.0]);
        assert!((rows[2].features.rent_to_income_ratio - 0.35).abs() < 1e-12);
    }
}
