//! Navigation tree arena.
//!
//! Nodes are stored in flat vectors with parent/children relationships
//! tracked by [`NodeId`] handles. This replaces a pointer-linked tree with
//! plain indices:
//! - O(1) title/parent/children access
//! - O(d) root lookup where d is the node depth
//! - teardown is dropping the arena, no recursive deletion

/// Handle to a node inside a [`DocTree`].
///
/// Only meaningful for the tree that produced it; handles from one tree
/// must not be used with another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Navigation tree of one documentation set.
///
/// Created with its root node already present; every other node is attached
/// below an existing node and stays there for the tree's lifetime. Child
/// insertion order is display order.
#[derive(Debug)]
pub struct DocTree {
    titles: Vec<String>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
}

impl DocTree {
    /// Create a tree holding only its root node.
    #[must_use]
    pub(crate) fn new(root_title: String) -> Self {
        Self {
            titles: vec![root_title],
            parents: vec![None],
            children: vec![Vec::new()],
        }
    }

    /// Handle of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child node under `parent` and return its handle.
    pub(crate) fn add_child(&mut self, parent: NodeId, title: String) -> NodeId {
        let id = NodeId(self.titles.len());
        self.titles.push(title);
        self.parents.push(Some(parent));
        self.children.push(Vec::new());
        self.children[parent.0].push(id);
        id
    }

    /// Display title of a node.
    #[must_use]
    pub fn title(&self, id: NodeId) -> &str {
        &self.titles[id.0]
    }

    /// Parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    /// Children of a node in display order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.0]
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.titles.len()
    }

    /// Walk parent links from `id` up to the node with no parent.
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parents[current.0] {
            current = parent;
        }
        current
    }
}
