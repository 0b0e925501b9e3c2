//! Built-in lexicon-based toxicity model
//!
//! Intentionally dependency-light and deterministic: lets demos and
//! integration tests exercise the full stack without fetching a pretrained
//! model. Real deployments plug in their own `TextModelLoader`.

use crate::model::{TextModel, TextModelLoader};
use aho_corasick::AhoCorasick;
use async_trait::async_trait;
use percept_core::{CategoryToxicity, Error, Result};
use std::sync::Arc;

/// Fixed category set, in reporting order
pub const TOXICITY_CATEGORIES: [&str; 7] = [
    "identity_attack",
    "insult",
    "obscene",
    "severe_toxicity",
    "sexual_explicit",
    "threat",
    "toxicity",
];

struct Category {
    label: &'static str,
    matcher: AhoCorasick,
}

/// Lexicon-backed toxicity classifier over the fixed category set.
pub struct LexiconToxicityModel {
    name: String,
    categories: Vec<Category>,
}

impl LexiconToxicityModel {
    pub fn new() -> Result<Self> {
        let categories = vec![
            Self::category(
                "identity_attack",
                &["your kind", "go back to", "subhuman", "vermin"],
            )?,
            Self::category(
                "insult",
                &["stupid", "idiot", "dumb", "moron", "pathetic", "loser"],
            )?,
            Self::category(
                "obscene",
                &["shit", "fuck", "asshole", "bastard", "bitch"],
            )?,
            Self::category(
                "severe_toxicity",
                &["kill yourself", "deserve to die", "rot in hell"],
            )?,
            Self::category("sexual_explicit", &["nude pics", "send nudes"])?,
            Self::category(
                "threat",
                &["kill you", "hurt you", "watch your back", "destroy you"],
            )?,
            Self::category(
                "toxicity",
                &["hate", "worst", "terrible", "awful", "garbage", "trash", "sucks"],
            )?,
        ];

        Ok(Self {
            name: "toxicity-lexicon".to_string(),
            categories,
        })
    }

    fn category(label: &'static str, terms: &[&str]) -> Result<Category> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(terms)
            .map_err(|e| Error::model_load(format!("failed to build {label} lexicon: {e}")))?;

        Ok(Category { label, matcher })
    }

    fn score(category: &Category, text: &str) -> f32 {
        let matches = category.matcher.find_iter(text).count() as f32;

        // Keep confidence bounded for a lexicon-only approach.
        (matches * 0.35).clamp(0.0, 0.95)
    }
}

#[async_trait]
impl TextModel for LexiconToxicityModel {
    async fn classify(&self, text: &str, threshold: f32) -> Result<Vec<CategoryToxicity>> {
        Ok(self
            .categories
            .iter()
            .map(|category| {
                let probability = Self::score(category, text);
                CategoryToxicity::new(category.label, probability >= threshold, probability)
            })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Loader for the built-in lexicon model
pub struct LexiconToxicityLoader;

#[async_trait]
impl TextModelLoader for LexiconToxicityLoader {
    async fn load(&self) -> Result<Arc<dyn TextModel>> {
        Ok(Arc::new(LexiconToxicityModel::new()?))
    }
}
