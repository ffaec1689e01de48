// Raw applicant records
pub mod applicant;

// Pipeline configuration value objects
pub mod config;

// Domain-specific error types
pub mod errors;

// Features, scaler, ensemble and persisted artifacts
pub mod ml;

// Repository traits
pub mod repositories;
