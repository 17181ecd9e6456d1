//! Namespace tree built from dotted bundle keys.
//!
//! Every key segment becomes one node. `errors.io.notFound` produces the
//! nodes `errors`, `errors.io` and `errors.io.notFound`, the first two as
//! implicit branches and the last one as a leaf carrying the raw value.
//!
//! A node may be a leaf and a branch at the same time: `a = x` followed by
//! `a.b = y` leaves `a` with the value `x` and the child `b`.
//!
//! Nodes live in an arena indexed by [`NodeId`]; a path index resolves
//! dotted paths to ids so ancestors are found or created without recursion.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeStruct};

const ROOT_PATH: &str = "";

/// Index of a node inside its [`NamespaceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    name: String,
    path: String,
    children: Vec<NodeId>,
    value: Option<String>,
}

/// Hierarchical view of a bundle's keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTree {
    nodes: Vec<NodeData>,
    index: HashMap<String, NodeId>,
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTree {
    /// An empty tree holding only the root.
    pub fn new() -> Self {
        let root = NodeData {
            name: ROOT_PATH.to_string(),
            path: ROOT_PATH.to_string(),
            children: Vec::new(),
            value: None,
        };
        Self {
            nodes: vec![root],
            index: HashMap::from([(ROOT_PATH.to_string(), NodeId::ROOT)]),
        }
    }

    /// Build a tree from ordered `(path, value)` entries in a single pass.
    ///
    /// Entries with an empty path are skipped: they would address the root,
    /// which never carries a value.
    pub fn build<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut tree = Self::new();
        for (path, value) in entries {
            tree.insert(path.as_ref(), value.into());
        }
        tree
    }

    fn insert(&mut self, path: &str, value: String) {
        if path.is_empty() {
            return;
        }

        if let Some(&id) = self.index.get(path) {
            self.nodes[id.0].value = Some(value);
            return;
        }

        // Collect the missing part of the ancestor chain, deepest first.
        let mut missing = vec![path];
        let mut parent = parent_path(path);
        let mut parent_id = loop {
            if let Some(&id) = self.index.get(parent) {
                break id;
            }
            missing.push(parent);
            parent = parent_path(parent);
        };

        let mut value = Some(value);
        for &node_path in missing.iter().rev() {
            let node_value = if node_path == path { value.take() } else { None };
            parent_id = self.push_child(parent_id, node_path, node_value);
        }
    }

    fn push_child(&mut self, parent: NodeId, path: &str, value: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            name: last_segment(path).to_string(),
            path: path.to_string(),
            children: Vec::new(),
            value,
        });
        self.nodes[parent.0].children.push(id);
        self.index.insert(path.to_string(), id);
        id
    }

    pub fn root(&self) -> Node<'_> {
        self.node(NodeId::ROOT)
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { tree: self, id }
    }

    /// Look up a node by its full dotted path. `""` is the root.
    pub fn get(&self, path: &str) -> Option<Node<'_>> {
        self.index.get(path).map(|&id| self.node(id))
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// All nodes except the root, depth-first in children order.
    pub fn descendants(&self) -> Vec<Node<'_>> {
        let mut result = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut stack: Vec<NodeId> = self.nodes[0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            result.push(self.node(id));
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        result
    }

    /// All leaves, depth-first in children order.
    pub fn leaves(&self) -> Vec<Node<'_>> {
        self.descendants()
            .into_iter()
            .filter(|node| node.is_leaf())
            .collect()
    }
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a NamespaceTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Final path segment. Empty for the root.
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// Full dotted path. Empty for the root.
    pub fn path(&self) -> &'a str {
        &self.data().path
    }

    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    pub fn is_leaf(&self) -> bool {
        self.data().value.is_some()
    }

    pub fn has_children(&self) -> bool {
        !self.data().children.is_empty()
    }

    /// Raw format string, present iff this node is a leaf.
    pub fn value(&self) -> Option<&'a str> {
        self.data().value.as_deref()
    }

    pub fn children(self) -> impl ExactSizeIterator<Item = Node<'a>> + 'a {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    pub fn child(self, name: &str) -> Option<Node<'a>> {
        self.children().find(|child| child.name() == name)
    }

    /// Number of segments in the path; 0 for the root.
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.path().split('.').count()
        }
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("path", &self.path())
            .field("value", &self.value())
            .field("children", &self.data().children.len())
            .finish()
    }
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 5)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("leaf", &self.is_leaf())?;
        state.serialize_field("value", &self.value())?;
        let children: Vec<Node<'_>> = self.children().collect();
        state.serialize_field("children", &children)?;
        state.end()
    }
}

impl Serialize for NamespaceTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

/// Build a namespace tree from ordered `(path, value)` entries.
pub fn build_tree<I, K, V>(entries: I) -> NamespaceTree
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    NamespaceTree::build(entries)
}

fn parent_path(path: &str) -> &str {
    match path.rfind('.') {
        Some(index) => &path[..index],
        None => ROOT_PATH,
    }
}

fn last_segment(path: &str) -> &str {
    match path.rfind('.') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}
