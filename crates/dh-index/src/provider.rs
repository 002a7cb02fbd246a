//! Host-facing provider surface.
//!
//! A documentation viewer drives this component through
//! [`DevhelpProvider`]: probe a directory with [`build`], walk the returned
//! tree through the navigation accessors to render it, and ask [`resolve`]
//! where a node's content lives.
//!
//! [`build`]: DevhelpProvider::build
//! [`resolve`]: DevhelpProvider::resolve

use std::path::Path;

use crate::book::Book;
use crate::tree::NodeId;

/// Coarse priority hint a host uses to rank candidate index providers for
/// the same directory.
///
/// Devhelp books are one specific, well-known layout, so this provider
/// reports [`Applicability::Small`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Applicability {
    /// Handles a rare layout; try almost anything else first.
    Tiny,
    /// Handles one specific, well-known layout.
    Small,
    /// Handles a family of related layouts.
    Medium,
    /// Handles most directories it is pointed at.
    Large,
    /// Catch-all provider.
    Huge,
}

/// Handle to a book loaded by a [`DevhelpProvider`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BookId(usize);

/// Handle to a navigation tree node held by a [`DevhelpProvider`].
///
/// Stays valid for the lifetime of the provider that produced it. Handles
/// from one provider must not be used with another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocNode {
    book: BookId,
    node: NodeId,
}

impl DocNode {
    /// Book this node belongs to.
    #[must_use]
    pub fn book(self) -> BookId {
        self.book
    }
}

/// Devhelp index provider.
///
/// Owns every book it has loaded; dropping the provider releases all trees
/// and parsed documents in one step. A single instance is not designed for
/// concurrent mutation: hosts serialize calls into one instance or give
/// each thread its own.
#[derive(Default)]
pub struct DevhelpProvider {
    books: Vec<Book>,
}

impl DevhelpProvider {
    /// Create a provider with no books loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Priority hint for ranking against other index providers.
    #[must_use]
    pub fn applicability(&self) -> Applicability {
        Applicability::Small
    }

    /// Load the documentation set at `dir` and return its tree root.
    ///
    /// Returns `None` when the directory is not a devhelp documentation
    /// set; see [`Book::load`]. Each successful call registers its own book
    /// with its own parsed document, so books from repeated calls coexist
    /// until the provider is dropped.
    pub fn build(&mut self, dir: &Path) -> Option<DocNode> {
        let book = Book::load(dir)?;
        let id = BookId(self.books.len());
        let root = book.tree().root();
        self.books.push(book);

        Some(DocNode {
            book: id,
            node: root,
        })
    }

    /// Display title of a node.
    #[must_use]
    pub fn title(&self, node: DocNode) -> &str {
        self.book(node.book).tree().title(node.node)
    }

    /// Parent of a node, `None` for a tree root.
    #[must_use]
    pub fn parent(&self, node: DocNode) -> Option<DocNode> {
        let parent = self.book(node.book).tree().parent(node.node)?;
        Some(DocNode {
            book: node.book,
            node: parent,
        })
    }

    /// Children of a node in display order.
    #[must_use]
    pub fn children(&self, node: DocNode) -> Vec<DocNode> {
        self.book(node.book)
            .tree()
            .children(node.node)
            .iter()
            .map(|&child| DocNode {
                book: node.book,
                node: child,
            })
            .collect()
    }

    /// Resolve a node to the URI of its documentation content.
    ///
    /// See [`Book::resolve`]; synthetic grouping nodes yield `None`.
    #[must_use]
    pub fn resolve(&self, node: DocNode) -> Option<String> {
        self.book(node.book).resolve(node.node)
    }

    /// Book behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was produced by a different provider.
    #[must_use]
    pub fn book(&self, id: BookId) -> &Book {
        &self.books[id.0]
    }

    /// All loaded books in load order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }
}

#[cfg(test)]
mod tests {
    // Ensure the provider can be handed between threads by the host
    static_assertions::assert_impl_all!(super::DevhelpProvider: Send, Sync);

    use std::fs;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::loader::MORE_TITLE;

    fn write_book(root: &Path, name: &str, xml: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(format!("{name}.devhelp2")), xml).unwrap();
        dir
    }

    #[test]
    fn test_applicability_is_small() {
        let provider = DevhelpProvider::new();

        assert_eq!(provider.applicability(), Applicability::Small);
    }

    #[test]
    fn test_build_non_documentation_set_returns_none() {
        let temp = tempfile::tempdir().unwrap();
        let mut provider = DevhelpProvider::new();

        assert!(provider.build(&temp.path().join("missing")).is_none());
        assert!(provider.books().is_empty());
    }

    #[test]
    fn test_build_returns_root_handle() {
        let temp = tempfile::tempdir().unwrap();
        let dir = write_book(temp.path(), "glib", r#"<book title="GLib"/>"#);
        let mut provider = DevhelpProvider::new();

        let root = provider.build(&dir).unwrap();

        assert_eq!(provider.title(root), "GLib");
        assert_eq!(provider.parent(root), None);
    }

    #[test]
    fn test_navigation_walks_tree_both_ways() {
        let temp = tempfile::tempdir().unwrap();
        let dir = write_book(
            temp.path(),
            "glib",
            r#"<book title="GLib">
                <chapters>
                    <sub name="Types">
                        <sub name="Strings"/>
                    </sub>
                </chapters>
            </book>"#,
        );
        let mut provider = DevhelpProvider::new();

        let root = provider.build(&dir).unwrap();
        let types = provider.children(root)[0];
        let strings = provider.children(types)[0];

        assert_eq!(provider.title(types), "Types");
        assert_eq!(provider.title(strings), "Strings");
        assert_eq!(provider.parent(strings), Some(types));
        assert_eq!(provider.parent(types), Some(root));
    }

    #[test]
    fn test_resolve_through_provider() {
        let temp = tempfile::tempdir().unwrap();
        let dir = write_book(
            temp.path(),
            "glib",
            r#"<book title="GLib" base="/docs">
                <functions>
                    <keyword type="function" name="g_free" link="x.html"/>
                </functions>
            </book>"#,
        );
        let mut provider = DevhelpProvider::new();

        let root = provider.build(&dir).unwrap();
        let more = provider.children(root)[0];
        let group = provider.children(more)[0];
        let leaf = provider.children(group)[0];

        assert_eq!(provider.title(more), MORE_TITLE);
        assert_eq!(
            provider.resolve(leaf),
            Some("file:///docs/x.html".to_owned())
        );
        assert_eq!(provider.resolve(group), None);
    }

    #[test]
    fn test_multiple_books_coexist() {
        let temp = tempfile::tempdir().unwrap();
        let glib = write_book(
            temp.path(),
            "glib",
            r#"<book title="GLib" base="/glib" link="index.html"/>"#,
        );
        let gtk = write_book(
            temp.path(),
            "gtk",
            r#"<book title="GTK" base="/gtk" link="index.html"/>"#,
        );
        let mut provider = DevhelpProvider::new();

        let glib_root = provider.build(&glib).unwrap();
        let gtk_root = provider.build(&gtk).unwrap();

        // The first book stays fully usable after the second load
        assert_eq!(provider.title(glib_root), "GLib");
        assert_eq!(provider.title(gtk_root), "GTK");
        assert_eq!(
            provider.resolve(glib_root),
            Some("file:///glib/index.html".to_owned())
        );
        assert_eq!(
            provider.resolve(gtk_root),
            Some("file:///gtk/index.html".to_owned())
        );
        assert_eq!(provider.books().len(), 2);
        assert_ne!(glib_root.book(), gtk_root.book());
    }

    #[test]
    fn test_drop_releases_all_books() {
        let temp = tempfile::tempdir().unwrap();
        let dir = write_book(temp.path(), "glib", r#"<book title="GLib"/>"#);
        let mut provider = DevhelpProvider::new();
        provider.build(&dir).unwrap();
        provider.build(&dir).unwrap();

        assert_eq!(provider.books().len(), 2);
        drop(provider);
    }
}
