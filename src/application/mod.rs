// Feature extraction and the train/predict pipeline
pub mod ml;

// Entry points for outer layers
pub mod tenant_service;
