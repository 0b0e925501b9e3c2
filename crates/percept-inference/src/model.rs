//! Model traits for external pretrained collaborators
//!
//! Models are opaque: Percept never looks inside weights or architecture,
//! it only loads them asynchronously and submits inputs.

use crate::image::DecodedImage;
use async_trait::async_trait;
use percept_core::{CategoryToxicity, ClassPrediction, Result};
use std::sync::Arc;

/// Pretrained image classifier
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Classify a fully decoded image.
    ///
    /// Returns predictions ordered by descending probability; the caller
    /// conventionally takes the top entry.
    async fn classify(&self, image: &DecodedImage) -> Result<Vec<ClassPrediction>>;

    /// Get the model name
    fn name(&self) -> &str;
}

/// Pretrained text toxicity classifier
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Classify `text`, flagging each category whose probability reaches
    /// `threshold`.
    ///
    /// Returns one entry per category in the model's own reporting order;
    /// that order is part of the model's contract.
    async fn classify(&self, text: &str, threshold: f32) -> Result<Vec<CategoryToxicity>>;

    /// Get the model name
    fn name(&self) -> &str;
}

/// Loader for the image classifier model
#[async_trait]
pub trait ImageModelLoader: Send + Sync {
    /// Fetch and initialize the model. May be slow; called at most once
    /// per process unless it fails.
    async fn load(&self) -> Result<Arc<dyn ImageModel>>;
}

/// Loader for the text toxicity model
#[async_trait]
pub trait TextModelLoader: Send + Sync {
    /// Fetch and initialize the model. May be slow; called at most once
    /// per process unless it fails.
    async fn load(&self) -> Result<Arc<dyn TextModel>>;
}
