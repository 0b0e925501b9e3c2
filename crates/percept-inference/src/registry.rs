//! Lazy model registry with at-most-one-load-per-kind semantics

use crate::model::{ImageModel, ImageModelLoader, TextModel, TextModelLoader};
use percept_core::{Error, ModelKind, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Registry that loads each model lazily and caches it for the process
/// lifetime.
///
/// Concurrent resolvers for the same kind share a single in-flight load
/// rather than triggering duplicates. A successful load is cached forever;
/// a failed load is never cached, so the next resolve retries. There is no
/// eviction: the model set is small and static.
///
/// The registry is an explicit object with injected loaders, so tests can
/// construct one per test with a fresh cache.
pub struct ModelRegistry {
    image_loader: Arc<dyn ImageModelLoader>,
    text_loader: Arc<dyn TextModelLoader>,
    image_slot: OnceCell<Arc<dyn ImageModel>>,
    text_slot: OnceCell<Arc<dyn TextModel>>,
}

impl ModelRegistry {
    /// Create a registry over the given loaders. Nothing is loaded until
    /// the first resolve.
    pub fn new(
        image_loader: Arc<dyn ImageModelLoader>,
        text_loader: Arc<dyn TextModelLoader>,
    ) -> Self {
        Self {
            image_loader,
            text_loader,
            image_slot: OnceCell::new(),
            text_slot: OnceCell::new(),
        }
    }

    /// Resolve the image classifier, loading it on first use.
    pub async fn resolve_image(&self) -> Result<Arc<dyn ImageModel>> {
        let model = self
            .image_slot
            .get_or_try_init(|| async {
                info!(model = ModelKind::ImageClassifier.as_str(), "loading model");
                let model = self
                    .image_loader
                    .load()
                    .await
                    .map_err(|e| Self::load_error(ModelKind::ImageClassifier, e))?;
                info!(model = ModelKind::ImageClassifier.as_str(), "model ready");
                Ok::<_, Error>(model)
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Resolve the toxicity classifier, loading it on first use.
    pub async fn resolve_toxicity(&self) -> Result<Arc<dyn TextModel>> {
        let model = self
            .text_slot
            .get_or_try_init(|| async {
                info!(model = ModelKind::TextToxicity.as_str(), "loading model");
                let model = self
                    .text_loader
                    .load()
                    .await
                    .map_err(|e| Self::load_error(ModelKind::TextToxicity, e))?;
                info!(model = ModelKind::TextToxicity.as_str(), "model ready");
                Ok::<_, Error>(model)
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Whether the model for `kind` is loaded and cached
    pub fn is_loaded(&self, kind: ModelKind) -> bool {
        match kind {
            ModelKind::ImageClassifier => self.image_slot.initialized(),
            ModelKind::TextToxicity => self.text_slot.initialized(),
        }
    }

    /// Loader failures surface uniformly as `ModelLoad` so callers can
    /// treat them as recoverable.
    fn load_error(kind: ModelKind, source: Error) -> Error {
        warn!(model = kind.as_str(), error = %source, "model load failed");
        match source {
            Error::ModelLoad(msg) => Error::ModelLoad(msg),
            other => Error::model_load(format!("{kind}: {other}")),
        }
    }
}
