//! Decoration Rendering
//!
//! The only module that turns playback state into document mutations.
//! Containers get at most one of the loading and error classes, and at most
//! one progress indicator child, no matter how often state changes.

use vitrine_dom::{ElementId, PageDocument};
use vitrine_media::VisualState;

/// Class shown while a resource is being fetched.
pub const LOADING_CLASS: &str = "loading";
/// Class shown after a resource failure.
pub const ERROR_CLASS: &str = "error";
/// Class of the lazily created progress indicator child.
pub const INDICATOR_CLASS: &str = "progress-indicator";

/// Rewrites the container's decoration classes to match `visual`.
///
/// Always removes both classes first, so stale decoration from an earlier
/// state never survives a transition.
pub fn apply_visual(document: &mut PageDocument, container: ElementId, visual: VisualState) {
    document.remove_class(container, LOADING_CLASS);
    document.remove_class(container, ERROR_CLASS);
    match visual {
        VisualState::Clear => {}
        VisualState::Loading => {
            document.add_class(container, LOADING_CLASS);
        }
        VisualState::Error => {
            document.add_class(container, ERROR_CLASS);
        }
    }
}

/// Sets the container's progress indicator to a fraction of full width,
/// creating the indicator on first use.
pub fn set_progress(document: &mut PageDocument, container: ElementId, fraction: f64) {
    if document.element(container).is_none() {
        return;
    }
    let indicator = match indicator_of(document, container) {
        Some(id) => id,
        None => {
            let id = document.create_child(container, "div");
            document.add_class(id, INDICATOR_CLASS);
            document.set_style(id, "width", "0%");
            id
        }
    };
    let clamped = fraction.clamp(0.0, 1.0);
    document.set_style(indicator, "width", &format!("{}%", clamped * 100.0));
}

/// The container's progress indicator child, if one has been created.
pub fn indicator_of(document: &PageDocument, container: ElementId) -> Option<ElementId> {
    document
        .children_of(container)
        .into_iter()
        .find(|&child| document.has_class(child, INDICATOR_CLASS))
}
