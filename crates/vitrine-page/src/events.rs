//! Page Events
//!
//! The input vocabulary of the controller. Hosts translate whatever their
//! platform delivers into these values and feed them to
//! [`crate::PageController::handle`].

use vitrine_dom::ElementId;
use vitrine_media::MediaSignal;

/// Key identity for keyboard input. Only keys the page reacts to get a
/// dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other,
}

/// One input delivered to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The host scrolled the page to an absolute vertical offset.
    Scroll { y: f64 },
    /// A key went down anywhere on the page.
    KeyDown { key: Key },
    /// A pointer click landed on the given element.
    Click { target: ElementId },
    /// A playback lifecycle signal for one media element.
    Media {
        target: ElementId,
        signal: MediaSignal,
    },
}

impl PageEvent {
    pub fn scroll(y: f64) -> Self {
        PageEvent::Scroll { y }
    }

    pub fn key_down(key: Key) -> Self {
        PageEvent::KeyDown { key }
    }

    pub fn click(target: ElementId) -> Self {
        PageEvent::Click { target }
    }

    pub fn media(target: ElementId, signal: MediaSignal) -> Self {
        PageEvent::Media { target, signal }
    }
}
