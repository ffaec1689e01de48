// Artifact pair persisted by training
pub mod artifacts;

// Fixed feature order and labeled rows
pub mod feature_registry;

// Decision-tree ensemble
pub mod forest;

// Prediction result returned to callers
pub mod prediction;

// Feature standardization
pub mod scaler;
