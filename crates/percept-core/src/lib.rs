//! Percept Core
//!
//! Core types and error handling shared across Percept components.
//!
//! This crate provides:
//! - Common types for model kinds, request ids, and classification results
//! - Error types and result handling
//! - The stable normalized result shape consumed by UI layers

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    CategoryToxicity, ClassPrediction, ModelKind, NormalizedResult, RawOutput, RequestId,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        CategoryToxicity, ClassPrediction, ModelKind, NormalizedResult, RawOutput, RequestId,
    };
}
