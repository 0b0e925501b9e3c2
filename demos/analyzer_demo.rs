//! End-to-end demo: wires the controller to the built-in lexicon toxicity
//! model and a canned image classifier, then runs both channels once.
//!
//! Run with: cargo run -p percept-app --example analyzer_demo

use async_trait::async_trait;
use percept_app::{AppController, Channel};
use percept_core::ClassPrediction;
use percept_inference::{
    DecodedImage, ImageHandle, ImageModel, ImageModelLoader, InferenceConfig, InferenceSession,
    LexiconToxicityLoader, ModelRegistry,
};
use std::sync::Arc;

/// Stand-in for a real pretrained image classifier.
struct DemoImageModel;

#[async_trait]
impl ImageModel for DemoImageModel {
    async fn classify(
        &self,
        _image: &DecodedImage,
    ) -> percept_core::Result<Vec<ClassPrediction>> {
        Ok(vec![
            ClassPrediction::new("tabby cat", 0.82),
            ClassPrediction::new("tiger cat", 0.11),
            ClassPrediction::new("lynx", 0.04),
        ])
    }

    fn name(&self) -> &str {
        "demo-image-classifier"
    }
}

struct DemoImageLoader;

#[async_trait]
impl ImageModelLoader for DemoImageLoader {
    async fn load(&self) -> percept_core::Result<Arc<dyn ImageModel>> {
        Ok(Arc::new(DemoImageModel))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = InferenceConfig::default();
    let registry = Arc::new(ModelRegistry::new(
        Arc::new(DemoImageLoader),
        Arc::new(LexiconToxicityLoader),
    ));
    let session = InferenceSession::with_options(registry, config.options()?);
    let controller = AppController::with_decoder(Arc::new(session), config.decoder());

    let handle = ImageHandle::decoded(DecodedImage::from_rgb8(2, 2, vec![128; 12])?);
    controller.submit_image(handle).await;
    let image = controller.channel_state(Channel::Image);
    println!("image channel: {}", serde_json::to_string_pretty(&image)?);

    controller.submit_text("you stupid pathetic idiot").await;
    let text = controller.channel_state(Channel::Text);
    println!("text channel: {}", serde_json::to_string_pretty(&text)?);

    Ok(())
}
