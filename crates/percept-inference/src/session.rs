//! Inference sessions: input validation and classification calls
//!
//! A session wraps a single "submit input, await result" interaction
//! against models resolved through the registry. Models are cached for the
//! session lifetime (in the registry); results are request-scoped and
//! returned as owned copies.

use crate::image::ImageHandle;
use crate::registry::ModelRegistry;
use percept_core::{CategoryToxicity, ClassPrediction, Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Default per-category match threshold for the toxicity model
pub const DEFAULT_TOXICITY_THRESHOLD: f32 = 0.7;

/// Session tunables. The toxicity threshold must lie in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceOptions {
    pub toxicity_threshold: f32,
}

impl InferenceOptions {
    /// Build options with an explicit threshold, rejecting values outside
    /// (0, 1].
    pub fn with_threshold(threshold: f32) -> Result<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(Error::config(format!(
                "toxicity threshold must be in (0, 1], got {threshold}"
            )));
        }
        Ok(Self {
            toxicity_threshold: threshold,
        })
    }
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            toxicity_threshold: DEFAULT_TOXICITY_THRESHOLD,
        }
    }
}

/// Funnels validated inputs through registry-resolved models.
pub struct InferenceSession {
    registry: Arc<ModelRegistry>,
    options: InferenceOptions,
}

impl InferenceSession {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self::with_options(registry, InferenceOptions::default())
    }

    pub fn with_options(registry: Arc<ModelRegistry>, options: InferenceOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> InferenceOptions {
        self.options
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Classify a decoded image.
    ///
    /// The handle must be fully decoded (dimensions available); a pending
    /// handle fails fast with `InputNotReady` rather than handing the
    /// model undefined pixels.
    pub async fn classify_image(&self, handle: &ImageHandle) -> Result<Vec<ClassPrediction>> {
        let image = handle
            .as_decoded()
            .ok_or_else(|| Error::input_not_ready("image is not fully decoded"))?;

        let model = self.registry.resolve_image().await?;

        let start = Instant::now();
        let predictions = model.classify(image).await.map_err(Self::inference_error)?;
        debug!(
            model = model.name(),
            predictions = predictions.len(),
            latency_us = start.elapsed().as_micros() as u64,
            "image classified"
        );

        Ok(predictions)
    }

    /// Classify text against the toxicity model.
    ///
    /// Empty or whitespace-only input is defined behavior, not an error:
    /// it yields an empty result set without touching the model.
    pub async fn classify_text(&self, text: &str) -> Result<Vec<CategoryToxicity>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let model = self.registry.resolve_toxicity().await?;

        let start = Instant::now();
        let verdicts = model
            .classify(text, self.options.toxicity_threshold)
            .await
            .map_err(Self::inference_error)?;
        debug!(
            model = model.name(),
            categories = verdicts.len(),
            latency_us = start.elapsed().as_micros() as u64,
            "text classified"
        );

        Ok(verdicts)
    }

    /// A model failing mid-execution is an inference error; registry-level
    /// load failures keep their own variant.
    fn inference_error(source: Error) -> Error {
        match source {
            Error::ModelLoad(msg) => Error::ModelLoad(msg),
            Error::Inference(msg) => Error::Inference(msg),
            other => Error::inference(other.to_string()),
        }
    }
}
