//! Vitrine Media - Playback Lifecycle
//!
//! The state machine behind every player on the showcase page. Hosts feed
//! lifecycle signals in; the machine answers with the transition taken, if
//! any, and keeps playback position, progress and error state consistent
//! with what the page last heard.

mod element;

pub use element::{MediaElement, MediaSignal, PlaybackState, Transition, VisualState};

use thiserror::Error;

/// A media resource that failed to fetch or decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("media resource failed: {message}")]
pub struct MediaError {
    pub message: String,
}

impl MediaError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
