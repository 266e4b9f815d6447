//! Ancestor lookup: which column is a pointer target inside?
//!
//! Drag-over events report the innermost element under the pointer, usually a
//! card or one of its children. The column is found by walking the
//! containment chain outward until a node carrying a column tag turns up.
//! [`Containment`] abstracts that chain so the walk works the same over the
//! live DOM (see [`crate::web`]) and over [`ElementTree`], an ownership table
//! used by tests and the command-line host.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::column::Column;
use crate::error::BoardError;

/// A tree of nodes with parent links and optional column tags.
pub trait Containment {
    type Node: Clone;

    /// The node containing `node`, or `None` at the root.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The column tag on `node` itself, if any.
    fn column_tag(&self, node: &Self::Node) -> Option<String>;
}

/// The first column tag found on `target` or any of its ancestors.
pub fn find_column_tag<T: Containment>(tree: &T, target: &T::Node) -> Option<String> {
    let mut current = Some(target.clone());
    while let Some(node) = current {
        if let Some(tag) = tree.column_tag(&node) {
            return Some(tag);
        }
        current = tree.parent(&node);
    }
    None
}

/// Resolve `target` to the column containing it.
///
/// `Ok(None)` when no tagged ancestor exists.
///
/// # Errors
///
/// Returns `InvalidColumn` when the nearest tag is not a column name.
pub fn resolve_column<T: Containment>(tree: &T, target: &T::Node) -> Result<Option<Column>, BoardError> {
    find_column_tag(tree, target).map(|tag| tag.parse::<Column>()).transpose()
}

/// Index of a node in an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    tag: Option<String>,
}

/// Ownership table of nodes. Node 0 is the document root.
///
/// A parent link always points at an earlier node, so links cannot form a
/// cycle. A node added under an id this tree never issued has no parent and
/// becomes a root of its own.
#[derive(Debug, Clone)]
pub struct ElementTree {
    nodes: Vec<Node>,
}

impl ElementTree {
    /// A tree holding only the untagged root.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![Node { parent: None, tag: None }] }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Add an untagged node under `parent`, or as a new root if `parent` is
    /// not in this tree.
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        self.push(parent, None)
    }

    /// Add a node under `parent` tagged with a raw column marker value.
    pub fn add_tagged(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        self.push(parent, Some(tag.into()))
    }

    /// Add a column container under `parent`.
    pub fn add_column(&mut self, parent: NodeId, column: Column) -> NodeId {
        self.add_tagged(parent, column.as_str())
    }

    /// Build a single chain from an event path and return the tree and target.
    ///
    /// `path` lists tags innermost first, the order a browser reports an event
    /// path in: the target, then each ancestor outward. The root is implicit.
    pub fn from_path<I, S>(path: I) -> (Self, NodeId)
    where
        I: IntoIterator<Item = Option<S>>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        let mut tree = Self::new();
        let mut target = tree.root();
        for tag in path.into_iter().rev() {
            target = tree.push(target, tag.map(Into::into));
        }
        (tree, target)
    }

    /// Number of nodes including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; the root is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, parent: NodeId, tag: Option<String>) -> NodeId {
        let known = parent.0 < self.nodes.len();
        if !known {
            tracing::debug!(parent = parent.0, nodes = self.nodes.len(), "unknown parent; node added as a root");
        }
        let parent = known.then_some(parent);
        self.nodes.push(Node { parent, tag });
        NodeId(self.nodes.len() - 1)
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Containment for ElementTree {
    type Node = NodeId;

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn column_tag(&self, node: &NodeId) -> Option<String> {
        self.nodes.get(node.0).and_then(|n| n.tag.clone())
    }
}
