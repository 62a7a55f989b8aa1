//! Page Controller
//!
//! Owns the document and wires the subsystems together: events come in
//! through [`PageController::handle`], periodic work runs in
//! [`PageController::tick`]. Every feature degrades independently; a page
//! with no players, no nav bar or no citation box still runs with whatever
//! it does have.

use vitrine_dom::{ElementId, PageDocument};

use crate::config::PageOptions;
use crate::coordinator::{PlaybackCoordinator, PlaybackStats};
use crate::events::{Key, PageEvent};
use crate::lazy::LazyLoader;
use crate::nav::NavigationHighlighter;
use crate::notify::{ClipboardBackend, Toast, UiNotifier};
use crate::registry::MediaRegistry;
use crate::reveal::RevealAnimator;

/// Class of the copyable citation box.
pub const CITATION_CLASS: &str = "citation-box";
/// Toast shown after a successful citation copy.
pub const CITATION_TOAST: &str = "Citation copied to clipboard!";
/// Tooltip installed on the citation box.
pub const CITATION_TOOLTIP: &str = "Click to copy citation";

/// The showcase page behavior over one document.
pub struct PageController {
    document: PageDocument,
    registry: MediaRegistry,
    coordinator: PlaybackCoordinator,
    lazy: LazyLoader,
    reveal: RevealAnimator,
    nav: Option<NavigationHighlighter>,
    notifier: UiNotifier,
    citation: Option<ElementId>,
}

impl PageController {
    /// Builds a controller without clipboard access; the citation copy
    /// affordance reports failure and shows no toast.
    pub fn new(document: PageDocument, options: PageOptions) -> Self {
        let notifier = UiNotifier::without_clipboard(options.toast.clone());
        Self::build(document, options, notifier)
    }

    /// Builds a controller with a primary clipboard and a legacy fallback.
    pub fn with_clipboards(
        document: PageDocument,
        options: PageOptions,
        primary: Box<dyn ClipboardBackend>,
        fallback: Box<dyn ClipboardBackend>,
    ) -> Self {
        let notifier = UiNotifier::new(options.toast.clone(), primary, fallback);
        Self::build(document, options, notifier)
    }

    fn build(mut document: PageDocument, options: PageOptions, notifier: UiNotifier) -> Self {
        let registry = MediaRegistry::collect(&document);
        let lazy = LazyLoader::new(&options.lazy, options.observer_support, &registry);
        let reveal = RevealAnimator::new(&options.reveal, options.observer_support, &document);
        let nav = NavigationHighlighter::new(&document, options.nav.clone());
        if nav.is_none() {
            tracing::debug!("no nav bar, navigation features disabled");
        }

        let citation = document.first_with_class(CITATION_CLASS);
        if let Some(cite) = citation {
            document.set_style(cite, "cursor", "pointer");
            document.set_attr(cite, "title", CITATION_TOOLTIP);
        }

        if let Some(nav) = &nav {
            nav.update(&mut document);
        }

        tracing::info!(
            players = registry.len(),
            sections = reveal.watched_count(),
            nav = nav.is_some(),
            citation = citation.is_some(),
            "page controller ready"
        );
        Self {
            document,
            registry,
            coordinator: PlaybackCoordinator::new(),
            lazy,
            reveal,
            nav,
            notifier,
            citation,
        }
    }

    /// Feeds one input event through the page.
    pub fn handle(&mut self, event: PageEvent, now: f64) {
        match event {
            PageEvent::Scroll { y } => {
                self.document.set_scroll_y(y);
                if let Some(nav) = &self.nav {
                    nav.update(&mut self.document);
                }
            }
            PageEvent::KeyDown { key } => {
                if key == Key::Escape {
                    self.coordinator
                        .pause_all(&mut self.registry, &mut self.document);
                }
            }
            PageEvent::Click { target } => self.handle_click(target, now),
            PageEvent::Media { target, signal } => {
                self.coordinator
                    .apply(&mut self.registry, &mut self.document, target, &signal);
            }
        }
    }

    /// Runs the periodic work: visibility checks, due lazy loads, reveals
    /// and toast aging. Hosts call this on their frame or timer cadence.
    pub fn tick(&mut self, now: f64) {
        let requests = self.lazy.poll(&self.registry, &self.document, now);
        for request in requests {
            self.coordinator.begin_load(
                &mut self.registry,
                &mut self.document,
                request.player,
                &request.src,
            );
        }
        self.reveal.poll(&mut self.document, now);
        self.notifier.tick(now);
    }

    fn handle_click(&mut self, target: ElementId, now: f64) {
        if let Some(nav) = &self.nav {
            if nav.scroll_to_target(&mut self.document, target) {
                return;
            }
        }
        // Clicks anywhere inside the citation box count, matching how the
        // page's click events bubble.
        let on_citation = self
            .document
            .closest_with_any_class(target, &[CITATION_CLASS])
            .is_some_and(|hit| Some(hit) == self.citation);
        if on_citation {
            self.copy_citation(now);
        }
    }

    fn copy_citation(&mut self, now: f64) {
        let Some(citation) = self.citation else {
            return;
        };
        let text = self.document.text_of(citation).trim().to_string();
        if self.notifier.copy_to_clipboard(&text) {
            self.notifier.show_toast(CITATION_TOAST, now);
        } else {
            tracing::debug!("citation copy failed, no toast");
        }
    }

    // ---- Introspection ----

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    /// Mutable document access, for hosts that relayout or edit the page.
    pub fn document_mut(&mut self) -> &mut PageDocument {
        &mut self.document
    }

    pub fn registry(&self) -> &MediaRegistry {
        &self.registry
    }

    /// Mutable registry access, for hosts that drive players directly.
    pub fn registry_mut(&mut self) -> &mut MediaRegistry {
        &mut self.registry
    }

    /// Aggregate playback counts.
    pub fn stats(&self) -> PlaybackStats {
        self.coordinator.stats(&self.registry)
    }

    /// Live toasts in creation order.
    pub fn toasts(&self) -> &[Toast] {
        self.notifier.toasts()
    }

    /// Deferred players still waiting to become visible.
    pub fn pending_lazy_loads(&self) -> usize {
        self.lazy.pending_count()
    }
}
