//! Shared types and error types for ollama-catalog

pub mod errors;
pub mod models;

pub use errors::{AppError, AppResult};
pub use models::{
    CatalogEntry, FamilyKey, FamilySpec, NormalizedModel, Quantization, RawTag,
};
