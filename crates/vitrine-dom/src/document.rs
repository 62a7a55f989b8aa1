//! Page Document
//!
//! Flat element arena plus the scroll and viewport state of one page.
//! Elements are appended during construction and addressed by [`ElementId`]
//! afterwards; nothing is ever removed, so ids stay valid for the life of
//! the document.

use crate::element::{Element, ElementId};
use crate::geometry::Rect;

/// How a programmatic scroll should be performed by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// One showcase page: elements, scroll offset and viewport size.
///
/// The viewport starts at zero size; embedders call
/// [`PageDocument::set_viewport_size`] before running intersection checks.
#[derive(Debug, Clone)]
pub struct PageDocument {
    elements: Vec<Element>,
    url: String,
    // Scroll state
    scroll_y: f64,
    viewport_width: f64,
    viewport_height: f64,
    scroll_behavior: ScrollBehavior,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl PageDocument {
    /// Creates an empty document with the given URL.
    pub fn new(url: &str) -> Self {
        Self {
            elements: Vec::new(),
            url: url.to_string(),
            scroll_y: 0.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            scroll_behavior: ScrollBehavior::Auto,
        }
    }

    /// Document URL, used to resolve relative resource locators.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of elements in the document.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // ---- Construction ----

    /// Appends a document-level element and returns its id.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.push(Element::new(tag), None)
    }

    /// Appends an element under `parent` and returns its id.
    pub fn create_child(&mut self, parent: ElementId, tag: &str) -> ElementId {
        if self.element(parent).is_none() {
            tracing::warn!(parent = parent.0, tag, "parent not in document, attaching at top level");
            return self.create_element(tag);
        }
        self.push(Element::new(tag), Some(parent))
    }

    fn push(&mut self, mut element: Element, parent: Option<ElementId>) -> ElementId {
        element.parent = parent;
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    // ---- Access ----

    /// Element record for an id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    /// Mutable element record for an id.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    /// All element ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len() as u32).map(ElementId)
    }

    /// Flattened text content, empty for unknown ids.
    pub fn text_of(&self, id: ElementId) -> &str {
        self.element(id).map(|e| e.text.as_str()).unwrap_or("")
    }

    /// Attribute value on an element.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    /// Sets an attribute on an element. Unknown ids are ignored.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.set_attr(name, value);
        }
    }

    /// Inline style value on an element.
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style.get(property))
    }

    /// Sets an inline style on an element. Unknown ids are ignored.
    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.style.set(property, value);
        }
    }

    /// Adds a class, returning true when it was newly added.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.classes.add(class))
    }

    /// Removes a class, returning true when it was present.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.classes.remove(class))
    }

    /// True when the element carries the class.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.classes.contains(class))
    }

    // ---- Queries ----

    /// First element whose `id` attribute matches, in document order.
    pub fn element_by_id(&self, dom_id: &str) -> Option<ElementId> {
        self.ids()
            .find(|id| self.elements[id.index()].id.as_deref() == Some(dom_id))
    }

    /// All elements carrying the class, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.ids()
            .filter(|id| self.elements[id.index()].classes.contains(class))
            .collect()
    }

    /// First element carrying the class.
    pub fn first_with_class(&self, class: &str) -> Option<ElementId> {
        self.ids()
            .find(|id| self.elements[id.index()].classes.contains(class))
    }

    /// All elements with the tag name, in document order.
    pub fn elements_with_tag(&self, tag: &str) -> Vec<ElementId> {
        self.ids()
            .filter(|id| self.elements[id.index()].tag == tag)
            .collect()
    }

    /// Direct children of an element, in document order.
    pub fn children_of(&self, parent: ElementId) -> Vec<ElementId> {
        self.ids()
            .filter(|id| self.elements[id.index()].parent == Some(parent))
            .collect()
    }

    /// Nearest element, starting from `start` itself and walking parents,
    /// that carries any of the given classes.
    pub fn closest_with_any_class(&self, start: ElementId, classes: &[&str]) -> Option<ElementId> {
        let mut current = Some(start);
        // Parent links are acyclic by construction; the hop bound guards
        // hand-edited records.
        let mut hops = self.elements.len() + 1;
        while let Some(id) = current {
            if hops == 0 {
                break;
            }
            hops -= 1;
            let element = self.element(id)?;
            if classes.iter().any(|c| element.classes.contains(c)) {
                return Some(id);
            }
            current = element.parent;
        }
        None
    }

    // ---- Scroll and viewport ----

    /// Sets the viewport size in pixels.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Current vertical scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Records the scroll offset reported by the host, clamped to the
    /// scrollable range.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Programmatic scroll to an absolute offset.
    pub fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        let target = y.clamp(0.0, self.max_scroll());
        tracing::debug!(from = self.scroll_y, to = target, ?behavior, "scroll");
        self.scroll_y = target;
        self.scroll_behavior = behavior;
    }

    /// Behavior requested by the most recent programmatic scroll.
    pub fn scroll_behavior(&self) -> ScrollBehavior {
        self.scroll_behavior
    }

    /// Viewport rectangle in document coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.viewport_width, self.viewport_height)
    }

    /// Total scrollable height, measured from element rectangles.
    pub fn content_height(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.rect.bottom())
            .fold(0.0, f64::max)
    }

    fn max_scroll(&self) -> f64 {
        (self.content_height() - self.viewport_height).max(0.0)
    }
}
