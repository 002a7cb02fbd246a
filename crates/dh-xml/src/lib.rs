//! Generic element-tree XML parsing.
//!
//! This crate provides:
//! - [`Document`]: an arena of parsed elements with stable [`ElementId`] handles
//! - [`XmlError`]: parse failure taxonomy
//!
//! The tokenizer itself is delegated to `quick-xml`; this layer turns its
//! event stream into a navigable tree of named elements with attributes,
//! character data, and ordered children. Handles stay valid for the lifetime
//! of the [`Document`], which makes them suitable as long-lived references
//! from structures built on top of a parse.
//!
//! # Example
//!
//! ```
//! use dh_xml::Document;
//!
//! let doc = Document::parse_str(r#"<book title="GLib"><chapters/></book>"#)?;
//! let root = doc.root();
//! assert_eq!(doc.name(root), "book");
//! assert_eq!(doc.attr(root, "title"), Some("GLib"));
//! assert!(doc.child_named(root, "chapters").is_some());
//! # Ok::<(), dh_xml::XmlError>(())
//! ```

mod document;
mod parser;

pub use document::{Document, ElementId};
pub use parser::XmlError;
