//! Normalization of raw model output into a stable result shape
//!
//! Dynamic result shapes from external models are wrapped at this boundary
//! so the rest of the system never sees the model library's own format.
//! All functions are pure: same raw input, same normalized output.

use percept_core::{CategoryToxicity, ClassPrediction, NormalizedResult, RawOutput};

/// Sentinel label used when the image model returns no predictions
pub const NO_RESULT_LABEL: &str = "No result";

/// Normalize raw output, dispatching on its kind.
pub fn present(raw: &RawOutput) -> Vec<NormalizedResult> {
    match raw {
        RawOutput::Image(predictions) => present_image(predictions),
        RawOutput::Toxicity(verdicts) => present_toxicity(verdicts),
    }
}

/// At most one entry: the highest-confidence class. An empty raw result
/// yields the sentinel label instead of an error.
pub fn present_image(raw: &[ClassPrediction]) -> Vec<NormalizedResult> {
    let top = raw.iter().max_by(|a, b| {
        a.probability
            .partial_cmp(&b.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    match top {
        Some(prediction) => vec![NormalizedResult::with_confidence(
            &prediction.class_name,
            prediction.probability,
        )],
        None => vec![NormalizedResult::labeled(NO_RESULT_LABEL)],
    }
}

/// One entry per category, in exactly the order the model reported them.
/// Match flags are carried through unchanged; thresholding already
/// happened at inference time.
pub fn present_toxicity(raw: &[CategoryToxicity]) -> Vec<NormalizedResult> {
    raw.iter()
        .map(|verdict| NormalizedResult::with_match(&verdict.label, verdict.matched))
        .collect()
}
