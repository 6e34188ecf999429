//! Atelier Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! input validation shared across all Atelier components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use storage_types::StorageBackend;
pub use validation::{MediaValidator, ValidationError};
