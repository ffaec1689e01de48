mod common;

use std::fs;
use tenant_screening::application::tenant_service;
use tenant_screening::domain::config::TrainingConfig;
use tenant_screening::domain::errors::ErrorKind;
use tenant_screening::infrastructure::persistence::{FileModelStore, MODEL_FILE, SCALER_FILE};

#[test]
fn test_train_from_file_and_predict() {
    let dir = common::unique_temp_dir("file_flow");
    let data_path = dir.join("applications.csv");
    fs::write(&data_path, common::fico_driven_csv(150)).unwrap();

    let rows = tenant_service::parse_data(&data_path).unwrap();
    assert_eq!(rows.len(), 150);

    let store = FileModelStore::new(dir.join("models")).unwrap();
    let flat: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
    let config = TrainingConfig {
        n_trees: 25,
        ..Default::default()
    };
    let accuracy = tenant_service::train_model(&store, &config, &flat).unwrap();
    assert!(accuracy >= 0.9, "held-out accuracy {}", accuracy);

    assert!(dir.join("models").join(MODEL_FILE).exists());
    assert!(dir.join("models").join(SCALER_FILE).exists());

    // A fresh handle on the same directory sees the persisted pair
    let reopened = FileModelStore::new(dir.join("models")).unwrap();
    let body = serde_json::json!({
        "MonthlyIncome": 5000,
        "FICOScore": 790,
        "RentToIncomeRatio": 0.3,
        "HasCriminalRecord": 0,
        "HasEvictionHistory": 0,
        "AssetMonthlyValue": 15000
    });
    let result = tenant_service::predict_tenant_json(&reopened, &body).unwrap();
    assert_eq!(result.prediction, 1);
    assert!(result.confidence > 0.5);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_missing_artifacts_in_fresh_dir() {
    let dir = common::unique_temp_dir("fresh");
    let store = FileModelStore::new(&dir).unwrap();

    let err = tenant_service::predict_tenant(&store, &[5000.0, 700.0, 0.3, 0.0, 0.0, 15000.0])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ModelNotTrained);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_parse_missing_file() {
    let err = tenant_service::parse_data("/nonexistent/Credit_Income_Check.csv").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}
