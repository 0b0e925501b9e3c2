//! Per-channel submission state

use percept_core::{NormalizedResult, RequestId};
use serde::Serialize;

/// Independent input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Image,
    Text,
}

/// Lifecycle of the most recent submission on a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPhase {
    Idle,
    Submitting,
    AwaitingResult,
    Done,
    Failed,
}

/// Snapshot of one channel's visible state.
///
/// Only the request whose id equals `last_issued` may write `results`,
/// `error`, and the terminal phase; anything older is stale.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelState {
    pub phase: ChannelPhase,

    /// Id of the most recently issued request on this channel
    pub last_issued: Option<RequestId>,

    /// Normalized results from the latest completed request
    pub results: Vec<NormalizedResult>,

    /// Error message from the latest failed request
    pub error: Option<String>,
}

impl ChannelState {
    pub fn new() -> Self {
        Self {
            phase: ChannelPhase::Idle,
            last_issued: None,
            results: Vec::new(),
            error: None,
        }
    }

    /// The busy indicator. Must always clear on the latest request's
    /// terminal transition, success or failure.
    pub fn busy(&self) -> bool {
        matches!(
            self.phase,
            ChannelPhase::Submitting | ChannelPhase::AwaitingResult
        )
    }
}

impl Default for ChannelState {
    fn default() -> Self {
        Self::new()
    }
}
