//! Navigation Highlighting
//!
//! Tracks which identified section sits under the nav bar and mirrors that
//! onto the nav links, and answers anchor clicks with a smooth scroll that
//! stops short of the fixed bar. The bar height is measured from its
//! rectangle at every use, so layout changes are picked up for free.

use vitrine_dom::{ElementId, PageDocument, ScrollBehavior};

use crate::config::NavOptions;

/// Class of the fixed navigation bar.
pub const NAV_CLASS: &str = "navigation";
/// Class of the list whose anchors get highlighted.
pub const NAV_LIST_CLASS: &str = "nav-list";
/// Class marking the link for the current section.
pub const ACTIVE_CLASS: &str = "active";

/// Highlights nav links and handles anchor scrolling.
///
/// Construction fails when the page has no nav bar; the controller then
/// simply runs without navigation features.
#[derive(Debug)]
pub struct NavigationHighlighter {
    nav_bar: ElementId,
    links: Vec<ElementId>,
    sections: Vec<ElementId>,
    options: NavOptions,
}

impl NavigationHighlighter {
    pub fn new(document: &PageDocument, options: NavOptions) -> Option<Self> {
        let nav_bar = document.first_with_class(NAV_CLASS)?;
        let links: Vec<ElementId> = document
            .ids()
            .filter(|&id| {
                document.element(id).is_some_and(|el| el.tag == "a")
                    && document
                        .closest_with_any_class(id, &[NAV_LIST_CLASS])
                        .is_some()
            })
            .collect();
        let sections: Vec<ElementId> = document
            .ids()
            .filter(|&id| {
                document
                    .element(id)
                    .is_some_and(|el| el.tag == "section" && el.id.is_some())
            })
            .collect();
        tracing::debug!(
            links = links.len(),
            sections = sections.len(),
            "navigation highlighter ready"
        );
        Some(Self {
            nav_bar,
            links,
            sections,
            options,
        })
    }

    /// Current height of the nav bar.
    pub fn nav_height(&self, document: &PageDocument) -> Option<f64> {
        document.element(self.nav_bar).map(|el| el.rect.height)
    }

    /// Recomputes the current section for the scroll position and rewrites
    /// the `active` class on the nav links.
    ///
    /// The reference line sits `highlight_pad` below the nav bar; when
    /// sections overlap it, the last one in document order wins.
    pub fn update(&self, document: &mut PageDocument) {
        let Some(nav_height) = self.nav_height(document) else {
            return;
        };
        let scroll_y = document.scroll_y();

        let mut current: Option<String> = None;
        for &section in &self.sections {
            let Some(el) = document.element(section) else {
                continue;
            };
            let top = el.rect.y - nav_height - self.options.highlight_pad;
            if scroll_y >= top && scroll_y < top + el.rect.height {
                current = el.id.clone();
            }
        }

        for &link in &self.links {
            let is_current = current.as_deref().is_some_and(|id| {
                document
                    .attr(link, "href")
                    .and_then(|href| href.strip_prefix('#'))
                    == Some(id)
            });
            document.remove_class(link, ACTIVE_CLASS);
            if is_current {
                document.add_class(link, ACTIVE_CLASS);
            }
        }
    }

    /// Handles a click on an anchor with a fragment href.
    ///
    /// Returns true when the click was consumed, whether or not the target
    /// section exists. A found target is scrolled to smoothly, leaving
    /// `scroll_pad` between it and the nav bar.
    pub fn scroll_to_target(&self, document: &mut PageDocument, element: ElementId) -> bool {
        let Some(el) = document.element(element) else {
            return false;
        };
        if el.tag != "a" {
            return false;
        }
        let Some(fragment) = el.attr("href").and_then(|href| href.strip_prefix('#')) else {
            return false;
        };
        let fragment = fragment.to_string();

        let Some(target) = document.element_by_id(&fragment) else {
            tracing::debug!(fragment = %fragment, "anchor target not found");
            return true;
        };
        let Some(rect) = document.element(target).map(|el| el.rect) else {
            return true;
        };
        let Some(nav_height) = self.nav_height(document) else {
            return true;
        };
        let top = rect.y - nav_height - self.options.scroll_pad;
        document.scroll_to(top, ScrollBehavior::Smooth);
        self.update(document);
        true
    }
}
