//! Parsed document arena.
//!
//! Elements are stored in a flat `Vec` addressed by [`ElementId`] handles,
//! with child relationships tracked as handle lists. Handles are plain
//! indices: cheap to copy, stable for the document's lifetime, and only
//! meaningful for the document that produced them.

use std::collections::HashMap;

/// Handle to an element inside a [`Document`].
///
/// Only meaningful for the document that produced it; handles from one
/// document must not be used with another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

/// A single parsed element.
#[derive(Debug)]
pub(crate) struct ElementData {
    pub(crate) name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) text: String,
    pub(crate) children: Vec<ElementId>,
}

/// A parsed XML document.
///
/// Owns every element of one parsed file. Produced by
/// [`parse_str`](Self::parse_str) or [`parse_file`](Self::parse_file);
/// read through the accessor methods, which all take an [`ElementId`].
#[derive(Debug)]
pub struct Document {
    pub(crate) elements: Vec<ElementData>,
    pub(crate) root: ElementId,
}

impl Document {
    /// Handle of the document's root element.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Tag name of an element.
    #[must_use]
    pub fn name(&self, id: ElementId) -> &str {
        &self.elements[id.0].name
    }

    /// Attribute value of an element, `None` if the attribute is absent.
    #[must_use]
    pub fn attr(&self, id: ElementId, key: &str) -> Option<&str> {
        self.elements[id.0].attrs.get(key).map(String::as_str)
    }

    /// Accumulated character data of an element.
    ///
    /// Text interleaved with child elements is concatenated in document
    /// order, whitespace included.
    #[must_use]
    pub fn text(&self, id: ElementId) -> &str {
        &self.elements[id.0].text
    }

    /// Child elements in document order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id.0].children
    }

    /// First child element with the given tag name.
    #[must_use]
    pub fn child_named(&self, id: ElementId, name: &str) -> Option<ElementId> {
        self.elements[id.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.elements[child.0].name == name)
    }

    /// Total number of elements in the document.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}
