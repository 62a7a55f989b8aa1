//! Vitrine DOM - Showcase Document Model
//!
//! A headless model of the media-showcase page: a flat element arena with
//! parent links, class lists, inline styles and layout rectangles, plus the
//! scroll and viewport state the page controller reads and mutates.
//!
//! The model deliberately stops at what the showcase needs. There is no
//! markup parsing and no live layout; rectangles are document coordinates
//! supplied by the embedder and refreshed whenever layout changes.

mod classlist;
mod document;
mod element;
mod geometry;

pub use classlist::ClassList;
pub use document::{PageDocument, ScrollBehavior};
pub use element::{Attribute, Element, ElementId, StyleMap};
pub use geometry::{Margins, Rect};
