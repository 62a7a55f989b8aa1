//! Section Reveal
//!
//! Marks sections with an animation class the first time they scroll into
//! view. Sections stay subscribed after revealing; the class add is
//! idempotent, so later crossings change nothing and the class is never
//! taken back.

use vitrine_dom::{ElementId, PageDocument};

use crate::config::ObserverOptions;
use crate::viewport::{ObserverSupport, ViewportObserver};

/// Class that identifies revealable sections.
pub const SECTION_CLASS: &str = "section";
/// Class added once a section has been seen.
pub const REVEAL_CLASS: &str = "animate-in";

/// Reveals sections as they enter the (margin-adjusted) viewport.
#[derive(Debug)]
pub struct RevealAnimator {
    observer: ViewportObserver,
    support: ObserverSupport,
}

impl RevealAnimator {
    /// Subscribes every section present in the document.
    pub fn new(options: &ObserverOptions, support: ObserverSupport, document: &PageDocument) -> Self {
        let mut observer = ViewportObserver::new(options);
        for section in document.elements_with_class(SECTION_CLASS) {
            observer.observe(section);
        }
        Self { observer, support }
    }

    /// Number of sections being watched.
    pub fn watched_count(&self) -> usize {
        self.observer.observed_count()
    }

    /// Checks visibility and reveals newly visible sections, returning how
    /// many got the class this call.
    ///
    /// Without observer support every watched section is revealed at once.
    pub fn poll(&mut self, document: &mut PageDocument, now: f64) -> usize {
        let due: Vec<ElementId> = match self.support {
            ObserverSupport::Unsupported => self.observer.targets().collect(),
            ObserverSupport::Supported => {
                self.observer.check(document, now);
                self.observer
                    .take_entries()
                    .into_iter()
                    .filter(|entry| entry.is_intersecting)
                    .map(|entry| entry.target)
                    .collect()
            }
        };

        let mut revealed = 0;
        for section in due {
            if document.add_class(section, REVEAL_CLASS) {
                revealed += 1;
            }
        }
        if revealed > 0 {
            tracing::debug!(revealed, "sections revealed");
        }
        revealed
    }
}
