//! Lazy Media Loading
//!
//! Deferred players keep a placeholder locator until they first scroll into
//! view. The loader watches them through a [`ViewportObserver`] and emits
//! one [`LoadRequest`] per player, unsubscribing as it goes so a player is
//! requested at most once no matter how often it crosses the viewport.

use url::Url;
use vitrine_dom::{ElementId, PageDocument};

use crate::config::ObserverOptions;
use crate::registry::{MediaRegistry, PlayerId};
use crate::viewport::{ObserverSupport, ViewportObserver};

/// A deferred source that is ready to load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub player: PlayerId,
    pub element: ElementId,
    /// Locator resolved against the document URL where possible.
    pub src: String,
}

/// Emits load requests for deferred players as they become visible.
#[derive(Debug)]
pub struct LazyLoader {
    observer: ViewportObserver,
    support: ObserverSupport,
}

impl LazyLoader {
    /// Subscribes every deferred player in the registry.
    pub fn new(
        options: &ObserverOptions,
        support: ObserverSupport,
        registry: &MediaRegistry,
    ) -> Self {
        let mut observer = ViewportObserver::new(options);
        for id in registry.deferred() {
            if let Some(player) = registry.get(id) {
                observer.observe(player.element);
            }
        }
        if support == ObserverSupport::Unsupported && observer.observed_count() > 0 {
            tracing::debug!(
                deferred = observer.observed_count(),
                "viewport observation unsupported, deferred sources will load eagerly"
            );
        }
        Self { observer, support }
    }

    /// Players still waiting to become visible.
    pub fn pending_count(&self) -> usize {
        self.observer.observed_count()
    }

    /// Checks visibility and returns the load requests that are now due.
    ///
    /// Without observer support every pending player is due immediately.
    pub fn poll(
        &mut self,
        registry: &MediaRegistry,
        document: &PageDocument,
        now: f64,
    ) -> Vec<LoadRequest> {
        let visible: Vec<ElementId> = match self.support {
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

        let mut requests = Vec::new();
        for element in visible {
            // Dropping the subscription is what makes the load one-shot.
            self.observer.unobserve(element);
            let Some(player) = registry.player_for(element) else {
                continue;
            };
            let Some(raw) = registry.get(player).and_then(|p| p.media.deferred_src.clone())
            else {
                continue;
            };
            requests.push(LoadRequest {
                player,
                element,
                src: resolve_src(document.url(), &raw),
            });
        }
        requests
    }
}

/// Absolute locators pass through; relative ones are joined onto the
/// document URL. When the document URL cannot serve as a base the raw
/// value is kept verbatim.
fn resolve_src(base: &str, raw: &str) -> String {
    if let Ok(absolute) = Url::parse(raw) {
        return absolute.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(raw)) {
        Ok(joined) => joined.to_string(),
        Err(_) => raw.to_string(),
    }
}
