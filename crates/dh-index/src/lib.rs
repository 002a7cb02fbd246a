//! Devhelp book index support for documentation viewers.
//!
//! This crate provides:
//! - [`Book`]: one loaded documentation set (navigation tree, parsed index
//!   document, and node-to-element association, owned together)
//! - [`DevhelpProvider`]: the host-facing surface for probing directories,
//!   walking trees, and resolving nodes to content URIs
//!
//! # Architecture
//!
//! A documentation set is a directory `D` with an index file at
//! `D/<basename(D)>.devhelp2`. Loading parses the index into a generic
//! element tree (`dh-xml`) and builds a [`DocTree`]: the `book` root,
//! nested `sub` chapters/subjects, and `keyword` entries bucketed by type
//! below a synthetic "More" node. Resolution walks a node back to its root
//! and combines the root's `base` attribute with the node's `link`
//! attribute into a `file://` URI.
//!
//! Probing a directory that is no documentation set is an expected outcome,
//! not an error: loading returns `None` and hosts move on to the next
//! candidate.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use dh_index::DevhelpProvider;
//!
//! let mut provider = DevhelpProvider::new();
//! if let Some(root) = provider.build(Path::new("/usr/share/doc/glib")) {
//!     for child in provider.children(root) {
//!         let title = provider.title(child);
//!         let uri = provider.resolve(child);
//!         tracing::info!(title, ?uri, "node");
//!     }
//! }
//! ```

mod book;
mod loader;
mod provider;
mod tree;

pub use book::Book;
pub use loader::MORE_TITLE;
pub use provider::{Applicability, BookId, DevhelpProvider, DocNode};
pub use tree::{DocTree, NodeId};
