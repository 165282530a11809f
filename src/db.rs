pub mod property_repo;
pub use property_repo::{JsonFileRepository, PropertyRepository};
