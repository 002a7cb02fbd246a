//! Loaded documentation set.

use std::path::{Path, PathBuf};

use dh_xml::{Document, ElementId};

use crate::tree::{DocTree, NodeId};

/// One loaded documentation set.
///
/// Owns the navigation tree, the parsed index document, and the
/// node-to-element association together, so element handles stay valid for
/// as long as any node referencing them exists. Dropping the book releases
/// the whole tree and the parsed document in one step.
///
/// Produced by [`Book::load`](Self::load); never partially constructed.
pub struct Book {
    pub(crate) tree: DocTree,
    pub(crate) document: Document,
    /// Source element per node; `None` for synthetic grouping nodes.
    pub(crate) elements: Vec<Option<ElementId>>,
    pub(crate) index_path: PathBuf,
}

impl Book {
    /// Navigation tree of this book.
    #[must_use]
    pub fn tree(&self) -> &DocTree {
        &self.tree
    }

    /// Book title (the root node's title).
    #[must_use]
    pub fn title(&self) -> &str {
        self.tree.title(self.tree.root())
    }

    /// Path of the index file this book was loaded from.
    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Resolve a node to the URI of its documentation content.
    ///
    /// Walks parent links from `node` to the tree root, then combines the
    /// root element's `base` attribute with the node element's `link`
    /// attribute into `file://{base}/{link}`. Synthetic grouping nodes
    /// carry no source element and yield `None`. Missing attributes read as
    /// empty strings; the resulting location is not checked for
    /// reachability.
    #[must_use]
    pub fn resolve(&self, node: NodeId) -> Option<String> {
        let root = self.tree.root_of(node);
        let root_element = self.elements[root.0]?;
        let node_element = self.elements[node.0]?;

        let base = self.document.attr(root_element, "base").unwrap_or_default();
        let link = self.document.attr(node_element, "link").unwrap_or_default();
        Some(format!("file://{base}/{link}"))
    }
}
