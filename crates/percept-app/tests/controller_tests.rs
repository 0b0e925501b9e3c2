//! Controller integration tests
//!
//! Covers the staleness invariant (last-request-wins), busy-flag clearing
//! on success and failure, decode failures, and channel independence.

use async_trait::async_trait;
use bytes::Bytes;
use percept_app::{AppController, Channel, ChannelPhase};
use percept_core::{CategoryToxicity, ClassPrediction, Error, Result};
use percept_inference::{
    DecodedImage, ImageHandle, ImageModel, ImageModelLoader, InferenceSession, ModelRegistry,
    TextModel, TextModelLoader,
};
use std::sync::Arc;
use std::time::Duration;

/// Text model that echoes its input as the single category label, sleeping
/// first when the input asks it to. Lets tests observe which request's
/// result was applied and control completion order.
struct EchoTextModel;

#[async_trait]
impl TextModel for EchoTextModel {
    async fn classify(&self, text: &str, _threshold: f32) -> Result<Vec<CategoryToxicity>> {
        if text.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        Ok(vec![CategoryToxicity::new(text, true, 0.9)])
    }

    fn name(&self) -> &str {
        "echo"
    }
}

struct FailingTextModel;

#[async_trait]
impl TextModel for FailingTextModel {
    async fn classify(&self, _text: &str, _threshold: f32) -> Result<Vec<CategoryToxicity>> {
        Err(Error::inference("model crashed on valid input"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct CannedImageModel;

#[async_trait]
impl ImageModel for CannedImageModel {
    async fn classify(&self, _image: &DecodedImage) -> Result<Vec<ClassPrediction>> {
        Ok(vec![
            ClassPrediction::new("tabby cat", 0.82),
            ClassPrediction::new("tiger cat", 0.11),
        ])
    }

    fn name(&self) -> &str {
        "canned"
    }
}

struct ImageLoaderOf(Arc<dyn ImageModel>);

#[async_trait]
impl ImageModelLoader for ImageLoaderOf {
    async fn load(&self) -> Result<Arc<dyn ImageModel>> {
        Ok(Arc::clone(&self.0))
    }
}

struct TextLoaderOf(Arc<dyn TextModel>);

#[async_trait]
impl TextModelLoader for TextLoaderOf {
    async fn load(&self) -> Result<Arc<dyn TextModel>> {
        Ok(Arc::clone(&self.0))
    }
}

fn controller_with(
    image_model: Arc<dyn ImageModel>,
    text_model: Arc<dyn TextModel>,
) -> AppController {
    let registry = Arc::new(ModelRegistry::new(
        Arc::new(ImageLoaderOf(image_model)),
        Arc::new(TextLoaderOf(text_model)),
    ));
    AppController::new(Arc::new(InferenceSession::new(registry)))
}

fn cat_handle() -> ImageHandle {
    ImageHandle::decoded(DecodedImage::from_rgb8(2, 2, vec![0; 12]).unwrap())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stale_result_discarded() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(EchoTextModel));

    // Request A is slow; it is issued first and completes last.
    let slow = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit_text("slow first").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Request B supersedes A and completes immediately.
    let b_id = controller.submit_text("fast second").await;

    let state = controller.channel_state(Channel::Text);
    assert_eq!(state.phase, ChannelPhase::Done);
    assert_eq!(state.results[0].label, "fast second");

    // A's late arrival changes nothing.
    let a_id = slow.await.unwrap();
    assert!(a_id < b_id);

    let state = controller.channel_state(Channel::Text);
    assert_eq!(state.phase, ChannelPhase::Done);
    assert!(!state.busy());
    assert_eq!(state.last_issued, Some(b_id));
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].label, "fast second");
}

#[tokio::test]
async fn test_busy_clears_on_success() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(EchoTextModel));
    assert!(!controller.is_busy(Channel::Text));

    controller.submit_text("hello").await;

    let state = controller.channel_state(Channel::Text);
    assert_eq!(state.phase, ChannelPhase::Done);
    assert!(!state.busy());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_busy_clears_on_failure() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(FailingTextModel));

    controller.submit_text("hello").await;

    let state = controller.channel_state(Channel::Text);
    assert_eq!(state.phase, ChannelPhase::Failed);
    assert!(!state.busy());
    assert!(state.error.unwrap().contains("inference error"));
}

#[tokio::test]
async fn test_decode_failure_is_terminal_for_input() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(EchoTextModel));

    controller
        .submit_image_bytes(Bytes::from_static(b"not an image"))
        .await;

    let state = controller.channel_state(Channel::Image);
    assert_eq!(state.phase, ChannelPhase::Failed);
    assert!(!state.busy());
    assert!(state.error.unwrap().contains("decode error"));
}

#[tokio::test]
async fn test_image_submission_end_to_end() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(EchoTextModel));

    controller.submit_image(cat_handle()).await;

    let state = controller.channel_state(Channel::Image);
    assert_eq!(state.phase, ChannelPhase::Done);
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].label, "tabby cat");
    assert_eq!(state.results[0].confidence, Some(0.82));
}

#[tokio::test]
async fn test_pending_image_reports_input_not_ready() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(EchoTextModel));

    controller.submit_image(ImageHandle::pending()).await;

    let state = controller.channel_state(Channel::Image);
    assert_eq!(state.phase, ChannelPhase::Failed);
    assert!(state.error.unwrap().contains("input not ready"));
}

#[tokio::test]
async fn test_channels_are_independent() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(FailingTextModel));

    controller.submit_text("boom").await;
    controller.submit_image(cat_handle()).await;

    let text = controller.channel_state(Channel::Text);
    let image = controller.channel_state(Channel::Image);
    assert_eq!(text.phase, ChannelPhase::Failed);
    assert_eq!(image.phase, ChannelPhase::Done);
    assert_eq!(image.results[0].label, "tabby cat");
}

#[tokio::test]
async fn test_empty_text_completes_with_no_matches() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(EchoTextModel));

    controller.submit_text("").await;

    let state = controller.channel_state(Channel::Text);
    assert_eq!(state.phase, ChannelPhase::Done);
    assert!(state.results.iter().all(|r| r.is_match != Some(true)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_submissions_keep_latest_id() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(EchoTextModel));

    // Many racing submits on one channel: whichever writes the channel
    // last must also carry the largest id, so the surviving state always
    // belongs to the newest request.
    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit_text(format!("message {i}")).await })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    let newest = ids.iter().copied().max().unwrap();

    let state = controller.channel_state(Channel::Text);
    assert_eq!(state.last_issued, Some(newest));
    assert_eq!(state.phase, ChannelPhase::Done);
    assert!(!state.busy());
}

#[tokio::test]
async fn test_request_ids_are_monotonic() {
    let controller = controller_with(Arc::new(CannedImageModel), Arc::new(EchoTextModel));

    let first = controller.submit_text("one").await;
    let second = controller.submit_text("two").await;
    let third = controller.submit_image(cat_handle()).await;

    assert!(first < second);
    assert!(second < third);
}
