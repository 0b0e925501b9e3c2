//! Orchestration: sequences decode, resolve, classify, present
//!
//! The controller owns per-channel UI state and applies the
//! last-request-wins rule: a new submission on a channel supersedes the
//! prior one, and the superseded request's late result is discarded on
//! arrival. In-flight model calls are never cancelled.

use crate::channel::{Channel, ChannelPhase, ChannelState};
use crate::request::{ClassificationRequest, RequestInput};
use bytes::Bytes;
use parking_lot::RwLock;
use percept_core::{NormalizedResult, RequestId, Result};
use percept_inference::{present_image, present_toxicity, ImageDecoder, ImageHandle, InferenceSession};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared application controller.
///
/// Errors never escape a submission: they land in the channel state as a
/// `Failed` phase with a message, so the busy indicator always clears and
/// the host process never crashes on a model failure.
#[derive(Clone)]
pub struct AppController {
    session: Arc<InferenceSession>,
    decoder: Arc<ImageDecoder>,
    image: Arc<RwLock<ChannelState>>,
    text: Arc<RwLock<ChannelState>>,
    next_request: Arc<AtomicU64>,
}

impl AppController {
    pub fn new(session: Arc<InferenceSession>) -> Self {
        Self::with_decoder(session, ImageDecoder::new())
    }

    pub fn with_decoder(session: Arc<InferenceSession>, decoder: ImageDecoder) -> Self {
        Self {
            session,
            decoder: Arc::new(decoder),
            image: Arc::new(RwLock::new(ChannelState::new())),
            text: Arc::new(RwLock::new(ChannelState::new())),
            next_request: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of a channel's visible state
    pub fn channel_state(&self, channel: Channel) -> ChannelState {
        self.slot(channel).read().clone()
    }

    pub fn is_busy(&self, channel: Channel) -> bool {
        self.slot(channel).read().busy()
    }

    /// Decode an uploaded file and classify it. A decode failure is
    /// terminal for this input: the channel reports `Failed` and the user
    /// must resubmit.
    pub async fn submit_image_bytes(&self, bytes: Bytes) -> RequestId {
        let id = self.issue(Channel::Image);
        match self.decoder.decode(&bytes) {
            Ok(image) => {
                self.run(ClassificationRequest::image(id, ImageHandle::decoded(image)))
                    .await;
            }
            Err(e) => self.finish(Channel::Image, id, Err(e)),
        }
        id
    }

    /// Classify an image handle produced elsewhere (e.g. a decode service
    /// owned by the host).
    pub async fn submit_image(&self, handle: ImageHandle) -> RequestId {
        let id = self.issue(Channel::Image);
        self.run(ClassificationRequest::image(id, handle)).await;
        id
    }

    /// Classify text on the toxicity channel.
    pub async fn submit_text(&self, text: impl Into<String>) -> RequestId {
        let id = self.issue(Channel::Text);
        self.run(ClassificationRequest::text(id, text)).await;
        id
    }

    fn slot(&self, channel: Channel) -> &Arc<RwLock<ChannelState>> {
        match channel {
            Channel::Image => &self.image,
            Channel::Text => &self.text,
        }
    }

    /// Issue the next request id and take ownership of the channel.
    /// Whatever was in flight before is superseded from this point on.
    ///
    /// The id is allocated under the channel lock so that ids and
    /// `last_issued` move in lock-acquisition order: a submit that writes
    /// the channel later always carries the larger id, which is what the
    /// last-issued-wins discard in `finish` relies on.
    fn issue(&self, channel: Channel) -> RequestId {
        let mut state = self.slot(channel).write();
        let id = RequestId(self.next_request.fetch_add(1, Ordering::Relaxed) + 1);
        if state.busy() {
            debug!(?channel, superseded = ?state.last_issued, request = %id, "superseding in-flight request");
        }
        state.phase = ChannelPhase::Submitting;
        state.last_issued = Some(id);
        state.error = None;

        id
    }

    async fn run(&self, request: ClassificationRequest) {
        let channel = request.channel();
        let id = request.id;

        debug!(?channel, model = request.kind().as_str(), request = %id, "dispatching request");
        self.mark_awaiting(channel, id);

        let outcome = match &request.input {
            RequestInput::Image(handle) => self
                .session
                .classify_image(handle)
                .await
                .map(|raw| present_image(&raw)),
            RequestInput::Text(text) => self
                .session
                .classify_text(text)
                .await
                .map(|raw| present_toxicity(&raw)),
        };

        self.finish(channel, id, outcome);
    }

    fn mark_awaiting(&self, channel: Channel, id: RequestId) {
        let mut state = self.slot(channel).write();
        if state.last_issued == Some(id) {
            state.phase = ChannelPhase::AwaitingResult;
        }
    }

    /// Apply a terminal outcome, unless the request has been superseded.
    fn finish(&self, channel: Channel, id: RequestId, outcome: Result<Vec<NormalizedResult>>) {
        let mut state = self.slot(channel).write();

        if state.last_issued != Some(id) {
            debug!(?channel, request = %id, "discarding stale result");
            return;
        }

        match outcome {
            Ok(results) => {
                debug!(?channel, request = %id, results = results.len(), "request done");
                state.results = results;
                state.error = None;
                state.phase = ChannelPhase::Done;
            }
            Err(e) => {
                warn!(?channel, request = %id, error = %e, "request failed");
                state.error = Some(e.to_string());
                state.phase = ChannelPhase::Failed;
            }
        }
    }
}
