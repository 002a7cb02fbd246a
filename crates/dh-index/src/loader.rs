//! Book loading from documentation set directories.
//!
//! A documentation set is a directory `D` whose index file lives at
//! `D/<basename(D)>.devhelp2`. [`Book::load`] probes for that layout, parses
//! the index, and builds the navigation tree:
//!
//! - the `book` root element becomes the tree root
//! - nested `sub` elements under `chapters` become chapter/subject nodes
//! - `keyword` elements under `functions` are bucketed by their `type`
//!   attribute below a synthetic "More" node
//!
//! Every failure collapses into `None` so hosts can probe candidate
//! directories cheaply; causes are reported through `tracing` only.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dh_xml::{Document, ElementId};

use crate::book::Book;
use crate::tree::{DocTree, NodeId};

/// Title of the synthetic node that groups keywords below the book root.
pub const MORE_TITLE: &str = "More (keywords, functions...)";

impl Book {
    /// Load the documentation set at `dir`.
    ///
    /// Returns `None` when `dir` is not a documentation set: not a
    /// directory, no `<basename>.devhelp2` regular file inside it, index not
    /// parseable, or index root element not named `book`. The outcome is
    /// deliberately coarse; hosts probe many candidate directories and only
    /// care whether a tree came out.
    #[must_use]
    pub fn load(dir: &Path) -> Option<Self> {
        let index_path = index_file(dir)?;

        let document = match Document::parse_file(&index_path) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(path = %index_path.display(), error = %e, "Failed to parse index file");
                return None;
            }
        };

        let book = build(document, index_path)?;
        tracing::debug!(
            path = %book.index_path().display(),
            title = book.title(),
            node_count = book.tree().node_count(),
            "Documentation set loaded"
        );
        Some(book)
    }
}

/// Locate the index file for `dir`, validating the directory shape.
fn index_file(dir: &Path) -> Option<PathBuf> {
    if !dir.is_dir() {
        return None;
    }

    let mut index_name = dir.file_name()?.to_os_string();
    index_name.push(".devhelp2");
    let path = dir.join(index_name);

    if path.is_file() { Some(path) } else { None }
}

/// Build a book from a parsed index document.
fn build(document: Document, index_path: PathBuf) -> Option<Book> {
    let root_element = document.root();
    if document.name(root_element) != "book" {
        tracing::debug!(
            path = %index_path.display(),
            root = document.name(root_element),
            "Index root element is not a book"
        );
        return None;
    }

    let title = document.attr(root_element, "title").unwrap_or_default();
    let mut tree = DocTree::new(title.to_owned());
    let mut elements = vec![Some(root_element)];
    let root = tree.root();

    if let Some(chapters) = document.child_named(root_element, "chapters") {
        for &subject in document.children(chapters) {
            add_subjects(&mut tree, &mut elements, &document, root, subject);
        }
    }

    if let Some(functions) = document.child_named(root_element, "functions") {
        add_keyword_groups(&mut tree, &mut elements, &document, root, functions);
    }

    Some(Book {
        tree,
        document,
        elements,
        index_path,
    })
}

/// Append a node and its element mapping in lockstep.
fn add_node(
    tree: &mut DocTree,
    elements: &mut Vec<Option<ElementId>>,
    parent: NodeId,
    title: String,
    element: Option<ElementId>,
) -> NodeId {
    let id = tree.add_child(parent, title);
    elements.push(element);
    id
}

/// Recursively add chapter/subject nodes.
///
/// Only elements named `sub` produce nodes; anything else is pruned without
/// descending, nesting always occurs through `sub` wrappers.
fn add_subjects(
    tree: &mut DocTree,
    elements: &mut Vec<Option<ElementId>>,
    document: &Document,
    parent: NodeId,
    element: ElementId,
) {
    if document.name(element) != "sub" {
        return;
    }

    let title = document.attr(element, "name").unwrap_or_default();
    let node = add_node(tree, elements, parent, title.to_owned(), Some(element));

    for &child in document.children(element) {
        add_subjects(tree, elements, document, node, child);
    }
}

/// Bucket `keyword` entries by their `type` attribute under a "More" node.
///
/// The "More" node is created when the first keyword appears, so a
/// `functions` element without keywords leaves the tree untouched. Each
/// distinct type produces exactly one group node; groups and keywords keep
/// first-encounter order. Grouping nodes map to no source element.
fn add_keyword_groups(
    tree: &mut DocTree,
    elements: &mut Vec<Option<ElementId>>,
    document: &Document,
    root: NodeId,
    functions: ElementId,
) {
    let mut more: Option<NodeId> = None;
    let mut groups: HashMap<String, NodeId> = HashMap::new();

    for &keyword in document.children(functions) {
        if document.name(keyword) != "keyword" {
            continue;
        }

        let more_node = *more
            .get_or_insert_with(|| add_node(tree, elements, root, MORE_TITLE.to_owned(), None));

        let kind = document.attr(keyword, "type").unwrap_or_default();
        let group = *groups
            .entry(kind.to_owned())
            .or_insert_with(|| add_node(tree, elements, more_node, kind.to_owned(), None));

        let name = document.attr(keyword, "name").unwrap_or_default();
        add_node(tree, elements, group, name.to_owned(), Some(keyword));
    }
}
