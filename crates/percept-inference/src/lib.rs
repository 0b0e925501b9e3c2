//! Percept Inference
//!
//! Model-backed inference session management: lazy loading and caching of
//! pretrained models, input validation, and normalization of raw model
//! output into a stable shape.
//!
//! The pieces:
//! - [`ModelRegistry`] loads each model at most once per process and
//!   shares in-flight loads between concurrent resolvers
//! - [`InferenceSession`] funnels validated inputs through resolved models
//! - [`presenter`] turns raw model output into UI-agnostic results
//! - [`ImageDecoder`] is the decode collaborator for uploaded images
//!
//! Models themselves stay opaque behind the [`model`] traits.

pub mod builtin;
pub mod config;
pub mod image;
pub mod model;
pub mod presenter;
pub mod registry;
pub mod session;

pub use builtin::{LexiconToxicityLoader, LexiconToxicityModel, TOXICITY_CATEGORIES};
pub use config::InferenceConfig;
pub use image::{DecodedImage, ImageDecoder, ImageHandle, DEFAULT_MAX_IMAGE_BYTES};
pub use model::{ImageModel, ImageModelLoader, TextModel, TextModelLoader};
pub use presenter::{present, present_image, present_toxicity, NO_RESULT_LABEL};
pub use registry::ModelRegistry;
pub use session::{InferenceOptions, InferenceSession, DEFAULT_TOXICITY_THRESHOLD};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::image::{DecodedImage, ImageDecoder, ImageHandle};
    pub use crate::model::{ImageModel, ImageModelLoader, TextModel, TextModelLoader};
    pub use crate::presenter::{present, present_image, present_toxicity};
    pub use crate::registry::ModelRegistry;
    pub use crate::session::{InferenceOptions, InferenceSession};
}
