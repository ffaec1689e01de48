pub mod data;
pub mod persistence;
pub mod repositories;

pub use persistence::FileModelStore;
pub use repositories::InMemoryModelStore;
