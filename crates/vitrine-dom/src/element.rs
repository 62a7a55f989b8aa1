//! Elements
//!
//! Element records stored in the document arena. The `id` attribute and
//! class list are kept as dedicated fields so the hot lookup paths never
//! rescan the attribute vector.

use crate::classlist::ClassList;
use crate::geometry::Rect;

/// Handle to an element inside a [`crate::PageDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A name/value attribute pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Inline style declarations in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    /// Sets a property, replacing any previous value.
    pub fn set(&mut self, property: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| p == property) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((property.to_string(), value.to_string()));
        }
    }

    /// Current value of a property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// True when no property is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes to `style` attribute form.
    pub fn css_text(&self) -> String {
        self.entries
            .iter()
            .map(|(p, v)| format!("{p}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One element record.
#[derive(Debug, Clone)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Cached `id` attribute.
    pub id: Option<String>,
    /// Cached `class` attribute.
    pub classes: ClassList,
    /// Inline styles.
    pub style: StyleMap,
    /// Layout rectangle in document coordinates.
    pub rect: Rect,
    /// Flattened text content.
    pub text: String,
    /// Parent element, `None` for document-level elements.
    pub parent: Option<ElementId>,
    attrs: Vec<Attribute>,
}

impl Element {
    /// Creates a detached element with the given tag name.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: ClassList::new(),
            style: StyleMap::default(),
            rect: Rect::default(),
            text: String::new(),
            parent: None,
            attrs: Vec::new(),
        }
    }

    /// Value of an attribute, if present.
    ///
    /// `id` is served from its dedicated field. The `class` attribute is
    /// not stored here at all; read [`Element::classes`] instead.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            "class" => None,
            _ => self
                .attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
        }
    }

    /// True when the attribute is present, even with an empty value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Sets an attribute. `id` and `class` are routed to their fields so
    /// the dedicated storage stays authoritative.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => {
                self.id = Some(value.to_string());
                return;
            }
            "class" => {
                self.classes.set_value(value);
                return;
            }
            _ => {}
        }
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
        } else {
            self.attrs.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    /// Removes an attribute, returning true when it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        match name {
            "id" => self.id.take().is_some(),
            "class" => {
                let had = !self.classes.is_empty();
                self.classes = ClassList::new();
                had
            }
            _ => {
                let before = self.attrs.len();
                self.attrs.retain(|a| a.name != name);
                self.attrs.len() != before
            }
        }
    }
}
