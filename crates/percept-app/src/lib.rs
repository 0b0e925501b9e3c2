//! Percept App
//!
//! Orchestration layer over the inference crates: owns per-channel UI
//! state (current results, busy flag) and sequences decode, model
//! resolution, classification, and presentation in response to user
//! actions. Stale results from superseded requests are discarded rather
//! than cancelled.

pub mod channel;
pub mod controller;
pub mod request;

pub use channel::{Channel, ChannelPhase, ChannelState};
pub use controller::AppController;
pub use request::{ClassificationRequest, RequestInput};
