//! UI Notifications
//!
//! The toast queue and the clipboard the citation affordance writes to.
//! Toasts follow a fixed timeline from creation: a short entry delay, a
//! visible window, then a fade before removal. The notifier owns a primary
//! and a legacy clipboard backend and falls back when the primary is not
//! available on the host.

use crate::config::ToastOptions;

/// Destination for copied text.
pub trait ClipboardBackend {
    /// Whether this backend can accept writes on this host.
    fn is_available(&self) -> bool;
    /// Writes the text, returning success.
    fn write_text(&mut self, text: &str) -> bool;
}

/// Backend for hosts without any clipboard access.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl ClipboardBackend for UnavailableClipboard {
    fn is_available(&self) -> bool {
        false
    }

    fn write_text(&mut self, _text: &str) -> bool {
        false
    }
}

/// Where a toast currently is on its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Queued, entry delay not yet elapsed.
    Pending,
    Visible,
    /// Fading out, about to be removed.
    Exiting,
}

/// One queued message.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub created_at: f64,
    pub phase: ToastPhase,
}

/// Owns the toast queue and the clipboard chain.
pub struct UiNotifier {
    options: ToastOptions,
    toasts: Vec<Toast>,
    primary: Box<dyn ClipboardBackend>,
    fallback: Box<dyn ClipboardBackend>,
}

impl UiNotifier {
    pub fn new(
        options: ToastOptions,
        primary: Box<dyn ClipboardBackend>,
        fallback: Box<dyn ClipboardBackend>,
    ) -> Self {
        Self {
            options,
            toasts: Vec::new(),
            primary,
            fallback,
        }
    }

    /// A notifier whose copy affordance always reports failure.
    pub fn without_clipboard(options: ToastOptions) -> Self {
        Self::new(
            options,
            Box::new(UnavailableClipboard),
            Box::new(UnavailableClipboard),
        )
    }

    /// Queues a toast. It becomes visible after the entry delay and removes
    /// itself at the end of its timeline.
    pub fn show_toast(&mut self, message: &str, now: f64) {
        tracing::debug!(message, "toast queued");
        self.toasts.push(Toast {
            message: message.to_string(),
            created_at: now,
            phase: ToastPhase::Pending,
        });
    }

    /// Advances every toast along its timeline and drops the expired ones.
    pub fn tick(&mut self, now: f64) {
        let options = &self.options;
        self.toasts.retain_mut(|toast| {
            match phase_at(options, now - toast.created_at) {
                Some(phase) => {
                    toast.phase = phase;
                    true
                }
                None => false,
            }
        });
    }

    /// Live toasts in creation order.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Writes through the primary backend when available, otherwise through
    /// the legacy fallback.
    pub fn copy_to_clipboard(&mut self, text: &str) -> bool {
        if self.primary.is_available() {
            return self.primary.write_text(text);
        }
        if self.fallback.is_available() {
            tracing::debug!("primary clipboard unavailable, using fallback");
            return self.fallback.write_text(text);
        }
        tracing::debug!("no clipboard available");
        false
    }
}

/// Phase for a toast of the given age, `None` once it has expired.
///
/// `visible_ms` is measured from creation, not from the end of the entry
/// delay, mirroring how the page schedules its timers.
fn phase_at(options: &ToastOptions, age: f64) -> Option<ToastPhase> {
    if age < options.enter_delay_ms {
        Some(ToastPhase::Pending)
    } else if age < options.visible_ms {
        Some(ToastPhase::Visible)
    } else if age < options.visible_ms + options.fade_ms {
        Some(ToastPhase::Exiting)
    } else {
        None
    }
}
