//! Viewport Observation
//!
//! Poll-and-drain visibility tracking. Subscribed elements are compared
//! against the (margin-adjusted) viewport on every [`ViewportObserver::check`];
//! reports queue up until the consumer drains them with
//! [`ViewportObserver::take_entries`]. Observation is decoupled from scroll
//! input on purpose: scrolling updates the document, checks happen on the
//! controller's own cadence.

use serde::{Deserialize, Serialize};
use vitrine_dom::{ElementId, Margins, PageDocument};

use crate::config::ObserverOptions;

/// Whether the host environment provides intersection observation.
///
/// Unsupported hosts degrade: consumers treat every subscribed element as
/// immediately visible instead of waiting for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObserverSupport {
    #[default]
    Supported,
    Unsupported,
}

/// One visibility report for an observed element.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Fraction of the element's area inside the adjusted viewport.
    pub ratio: f64,
    /// True when any part of the element is inside the adjusted viewport.
    pub is_intersecting: bool,
    /// Time of the check that produced this entry, in host milliseconds.
    pub time: f64,
}

#[derive(Debug)]
struct Subscription {
    target: ElementId,
    last_ratio: Option<f64>,
}

/// Tracks subscribed elements against the viewport.
///
/// The first check after subscribing always reports, so consumers learn
/// the starting visibility without waiting for a crossing. After that a
/// report is queued only when the ratio crosses one of the configured
/// thresholds in either direction.
#[derive(Debug)]
pub struct ViewportObserver {
    thresholds: Vec<f64>,
    margin: Margins,
    subscriptions: Vec<Subscription>,
    pending: Vec<IntersectionEntry>,
}

impl ViewportObserver {
    pub fn new(options: &ObserverOptions) -> Self {
        let margin = Margins::parse(&options.root_margin).unwrap_or_else(|| {
            tracing::warn!(root_margin = %options.root_margin, "unparseable margin, using zero");
            Margins::default()
        });
        let mut thresholds = options.threshold.clone();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        Self {
            thresholds,
            margin,
            subscriptions: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Subscribes an element. Observing an element twice is a no-op.
    pub fn observe(&mut self, target: ElementId) {
        if self.is_observing(target) {
            return;
        }
        self.subscriptions.push(Subscription {
            target,
            last_ratio: None,
        });
    }

    /// Drops the subscription for an element, if any.
    pub fn unobserve(&mut self, target: ElementId) {
        self.subscriptions.retain(|s| s.target != target);
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.subscriptions.iter().any(|s| s.target == target)
    }

    pub fn observed_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Currently subscribed elements, in subscription order.
    pub fn targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.subscriptions.iter().map(|s| s.target)
    }

    /// Compares every subscription against the adjusted viewport and queues
    /// reports for new subscriptions and threshold crossings.
    pub fn check(&mut self, document: &PageDocument, now: f64) {
        let root = document.viewport_rect().expand_by(&self.margin);
        for sub in &mut self.subscriptions {
            let Some(element) = document.element(sub.target) else {
                continue;
            };
            let rect = element.rect;
            let ratio = if rect.area() <= 0.0 {
                // Degenerate rects reduce to point containment.
                if root.contains_point(rect.x, rect.y) {
                    1.0
                } else {
                    0.0
                }
            } else {
                root.intersection(&rect)
                    .map(|overlap| (overlap.area() / rect.area()).clamp(0.0, 1.0))
                    .unwrap_or(0.0)
            };

            let crossed = match sub.last_ratio {
                None => true,
                Some(last) => self
                    .thresholds
                    .iter()
                    .any(|&t| meets(t, ratio) != meets(t, last)),
            };
            if crossed {
                self.pending.push(IntersectionEntry {
                    target: sub.target,
                    ratio,
                    is_intersecting: ratio > 0.0,
                    time: now,
                });
            }
            sub.last_ratio = Some(ratio);
        }
    }

    /// Drains the queued reports in the order they were produced.
    pub fn take_entries(&mut self) -> Vec<IntersectionEntry> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// A zero threshold means "any visibility at all"; positive thresholds are
/// met once the ratio reaches them.
fn meets(threshold: f64, ratio: f64) -> bool {
    if threshold <= 0.0 {
        ratio > 0.0
    } else {
        ratio >= threshold
    }
}
