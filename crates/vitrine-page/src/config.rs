//! Controller Options
//!
//! Tunable knobs for the page subsystems, with defaults matching the
//! showcase design. Options deserialize from JSON so hosts can override
//! individual fields without restating the rest.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::viewport::ObserverSupport;

/// Failed to parse host-supplied options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for one viewport observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Visible-area fractions whose crossing triggers a report.
    pub threshold: Vec<f64>,
    /// CSS margin shorthand applied to the viewport before intersection
    /// tests. Negative values shrink the viewport.
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: vec![0.1],
            root_margin: "0px".to_string(),
        }
    }
}

/// Navigation scroll and highlight offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavOptions {
    /// Gap in pixels left between the nav bar and a scrolled-to section.
    pub scroll_pad: f64,
    /// Extra pixels below the nav bar inside which a section counts as
    /// current for highlighting.
    pub highlight_pad: f64,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            scroll_pad: 20.0,
            highlight_pad: 50.0,
        }
    }
}

/// Toast timeline in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastOptions {
    /// Delay before a queued toast becomes visible.
    pub enter_delay_ms: f64,
    /// Time from creation until the fade-out begins.
    pub visible_ms: f64,
    /// Length of the fade-out before removal.
    pub fade_ms: f64,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100.0,
            visible_ms: 3000.0,
            fade_ms: 300.0,
        }
    }
}

/// All controller options. The defaults are the showcase tuning: lazy
/// loading on any visibility, reveals at a tenth visible with the viewport
/// bottom pulled up 50px.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    /// Observer used for deferred media loading.
    pub lazy: ObserverOptions,
    /// Observer used for section reveals.
    pub reveal: ObserverOptions,
    pub nav: NavOptions,
    pub toast: ToastOptions,
    /// Whether the host provides intersection observation at all.
    pub observer_support: ObserverSupport,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            lazy: ObserverOptions {
                threshold: vec![0.0],
                root_margin: "0px".to_string(),
            },
            reveal: ObserverOptions {
                threshold: vec![0.1],
                root_margin: "0px 0px -50px 0px".to_string(),
            },
            nav: NavOptions::default(),
            toast: ToastOptions::default(),
            observer_support: ObserverSupport::default(),
        }
    }
}

impl PageOptions {
    /// Parses options from a JSON document, filling omitted fields with
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
