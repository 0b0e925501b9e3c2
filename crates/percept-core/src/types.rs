//! Common types shared across Percept components

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of pretrained model a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Ranked class probabilities over an image
    ImageClassifier,
    /// Per-category toxicity verdicts over text
    TextToxicity,
}

impl ModelKind {
    /// Stable string key for logging and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImageClassifier => "image-classifier",
            Self::TextToxicity => "text-toxicity",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonically increasing identifier for submissions on a channel.
///
/// A result is applied to visible state only while its id is still the most
/// recently issued one; anything older is stale and discarded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ranked class from the image classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPrediction {
    /// Human-readable class label
    pub class_name: String,

    /// Class probability (0.0-1.0)
    pub probability: f32,
}

impl ClassPrediction {
    pub fn new(class_name: impl Into<String>, probability: f32) -> Self {
        Self {
            class_name: class_name.into(),
            probability,
        }
    }
}

/// Per-category verdict from the toxicity model.
///
/// Category order is part of the model's external contract and must
/// round-trip unchanged through presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryToxicity {
    /// Toxicity category label (e.g. "insult", "threat")
    pub label: String,

    /// Whether the category probability reached the caller-supplied threshold
    pub matched: bool,

    /// Raw category probability (0.0-1.0)
    pub probability: f32,
}

impl CategoryToxicity {
    pub fn new(label: impl Into<String>, matched: bool, probability: f32) -> Self {
        Self {
            label: label.into(),
            matched,
            probability,
        }
    }
}

/// Raw model output before normalization, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    Image(Vec<ClassPrediction>),
    Toxicity(Vec<CategoryToxicity>),
}

impl RawOutput {
    /// The model kind that produced this output
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Image(_) => ModelKind::ImageClassifier,
            Self::Toxicity(_) => ModelKind::TextToxicity,
        }
    }
}

/// Stable, UI-agnostic result shape produced by the presenter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Display label
    pub label: String,

    /// Confidence score, for ranked-probability models
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Match flag, for threshold-gated category models
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_match: Option<bool>,
}

impl NormalizedResult {
    /// Label-only entry (used for sentinel results)
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confidence: None,
            is_match: None,
        }
    }

    /// Entry carrying a confidence score
    pub fn with_confidence(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence: Some(confidence),
            is_match: None,
        }
    }

    /// Entry carrying a match flag
    pub fn with_match(label: impl Into<String>, is_match: bool) -> Self {
        Self {
            label: label.into(),
            confidence: None,
            is_match: Some(is_match),
        }
    }
}
