//! Node and edge identities.
//!
//! Grounded on `original_source/lib/graph_data.py`: a labelled node with a
//! distinguished "null" value that is never equal to anything (including
//! itself), and an unordered edge with set-equality endpoints and its own
//! null sentinel. A statically typed target can collapse these to newtyped
//! integers and unordered pairs (spec.md §9's Design Notes) — the wrapper's
//! only job is to keep raw `usize` indices from leaking in where a `Node`
//! is meant, which the type system now enforces at compile time.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A labelled vertex identity, or the distinguished null node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Node(Option<usize>);

impl Node {
    /// The null node (used only as a transient "external" placeholder in
    /// `Graph::permute`).
    pub const NULL: Node = Node(None);

    /// Creates a node with the given label.
    pub fn new(label: usize) -> Self {
        Node(Some(label))
    }

    /// Returns the null node.
    pub fn null() -> Self {
        Self::NULL
    }

    /// Returns true if this is the null node.
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the label, or `None` if this is the null node.
    pub fn label(&self) -> Option<usize> {
        self.0
    }
}

impl PartialEq for Node {
    /// Label-based equality; the null node is never equal to anything,
    /// including another null node.
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for Node {
    /// Ordered by label; incomparable if either side is null.
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "NULL-NODE"),
        }
    }
}

/// An unordered pair of nodes, or the null edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge(Node, Node);

impl Edge {
    /// Creates an edge between `a` and `b`.
    pub fn new(a: Node, b: Node) -> Self {
        Edge(a, b)
    }

    /// Returns the null edge.
    pub fn null() -> Self {
        Edge(Node::null(), Node::null())
    }

    /// Returns true if this is the null edge.
    pub fn is_null(&self) -> bool {
        self.0.is_null() && self.1.is_null()
    }

    /// Returns the two endpoints as a tuple.
    pub fn endpoints(&self) -> (Node, Node) {
        (self.0, self.1)
    }

    /// Returns true if `node` is one of this edge's endpoints.
    pub fn contains(&self, node: Node) -> bool {
        !self.is_null() && (self.0 == node || self.1 == node)
    }

    /// Returns the endpoint that is not `node`, if `node` is an endpoint.
    pub fn other(&self, node: Node) -> Option<Node> {
        if self.0 == node {
            Some(self.1)
        } else if self.1 == node {
            Some(self.0)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    /// Set-equality of endpoints; never equal if either side is the null
    /// edge.
    fn eq(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_null() {
            state.write_u8(0xFF);
            return;
        }
        // XOR two independently hashed endpoints so the combination is
        // order-independent, matching the order-independent equality above.
        let mut h0 = DefaultHasher::new();
        self.0.hash(&mut h0);
        let mut h1 = DefaultHasher::new();
        self.1.hash(&mut h1);
        state.write_u64(h0.finish() ^ h1.finish());
    }
}

impl IntoIterator for Edge {
    type Item = Node;
    type IntoIter = std::array::IntoIter<Node, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.0, self.1].into_iter()
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "NULL-EDGE")
        } else {
            write!(f, "{}-{}", self.0, self.1)
        }
    }
}
