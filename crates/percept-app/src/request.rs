//! Submission payloads

use crate::channel::Channel;
use percept_core::{ModelKind, RequestId};
use percept_inference::ImageHandle;

/// Input payload for one submission
#[derive(Debug, Clone)]
pub enum RequestInput {
    Image(ImageHandle),
    Text(String),
}

/// An immutable submission: the input plus the model kind it targets.
///
/// Created once per user action and dropped after its result is delivered
/// or the request is superseded.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub id: RequestId,
    pub input: RequestInput,
}

impl ClassificationRequest {
    pub fn image(id: RequestId, handle: ImageHandle) -> Self {
        Self {
            id,
            input: RequestInput::Image(handle),
        }
    }

    pub fn text(id: RequestId, text: impl Into<String>) -> Self {
        Self {
            id,
            input: RequestInput::Text(text.into()),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self.input {
            RequestInput::Image(_) => ModelKind::ImageClassifier,
            RequestInput::Text(_) => ModelKind::TextToxicity,
        }
    }

    pub fn channel(&self) -> Channel {
        match self.input {
            RequestInput::Image(_) => Channel::Image,
            RequestInput::Text(_) => Channel::Text,
        }
    }
}
