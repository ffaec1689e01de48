pub mod file_model_store;

pub use file_model_store::{FileModelStore, MODEL_FILE, SCALER_FILE};
