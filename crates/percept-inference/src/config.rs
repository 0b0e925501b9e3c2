//! Configuration for the inference layer

use crate::image::{ImageDecoder, DEFAULT_MAX_IMAGE_BYTES};
use crate::session::{InferenceOptions, DEFAULT_TOXICITY_THRESHOLD};
use percept_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inference configuration, loadable from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Per-category match threshold for the toxicity model, in (0, 1].
    /// The historical default is 0.7; treat it as tunable product policy.
    #[serde(default = "default_toxicity_threshold")]
    pub toxicity_threshold: f32,

    /// Upload size cap for the image decode service, in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

fn default_toxicity_threshold() -> f32 {
    DEFAULT_TOXICITY_THRESHOLD
}

fn default_max_image_bytes() -> usize {
    DEFAULT_MAX_IMAGE_BYTES
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            toxicity_threshold: default_toxicity_threshold(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl InferenceConfig {
    /// Load from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("invalid inference config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.toxicity_threshold > 0.0 && self.toxicity_threshold <= 1.0) {
            return Err(Error::config(format!(
                "toxicity_threshold must be in (0, 1], got {}",
                self.toxicity_threshold
            )));
        }
        if self.max_image_bytes == 0 {
            return Err(Error::config("max_image_bytes must be positive"));
        }
        Ok(())
    }

    /// Session options derived from this configuration
    pub fn options(&self) -> Result<InferenceOptions> {
        InferenceOptions::with_threshold(self.toxicity_threshold)
    }

    /// Image decoder honoring the configured size cap
    pub fn decoder(&self) -> ImageDecoder {
        ImageDecoder::with_max_bytes(self.max_image_bytes)
    }
}
