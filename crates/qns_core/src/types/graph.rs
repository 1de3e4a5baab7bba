//! Undirected simple graph with sampling and node-pair permutation.
//!
//! Grounded on `original_source/lib/graph.py` (a thin wrapper around
//! rustworkx's `PyGraph` there; here a plain adjacency-list graph, since a
//! statically typed target has no need for the Python binding layer) and on
//! the teacher's `HardwareProfile::rebuild_connectivity` for the
//! "mutate, then rebuild the lookup cache" shape.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::graph_data::{Edge, Node};
use crate::error::{QnsError, Result};

/// Undirected, simple (no parallel edges, no self-loops) graph with unique
/// node labels.
///
/// (De)serializes via the node/edge lists only; the adjacency and
/// membership caches are rebuilt on load rather than carried across the
/// wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "GraphShadow", into = "GraphShadow")]
pub struct Graph {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: HashMap<Node, Vec<Node>>,
    edge_set: HashSet<Edge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphShadow {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl From<GraphShadow> for Graph {
    fn from(shadow: GraphShadow) -> Self {
        let mut graph = Graph::new(shadow.name);
        graph.add_nodes(&shadow.nodes);
        graph.add_edges(&shadow.edges);
        graph
    }
}

impl From<Graph> for GraphShadow {
    fn from(graph: Graph) -> Self {
        GraphShadow {
            name: graph.name,
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}

impl Graph {
    /// Creates an empty, named graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            adjacency: HashMap::new(),
            edge_set: HashSet::new(),
        }
    }

    /// Builds a graph from a raw edge list of integer labels, relabelling
    /// endpoints consecutively from `0..k` in sorted order of the labels
    /// seen. Rejects input containing a parallel edge or a self-loop.
    pub fn from_edges(edges: &[(usize, usize)]) -> Result<Self> {
        let mut old_labels: Vec<usize> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
        old_labels.sort_unstable();
        old_labels.dedup();

        let mut graph = Self::new("graph");
        graph.add_nodes(&(0..old_labels.len()).map(Node::new).collect::<Vec<_>>());

        let index_of = |label: usize| old_labels.binary_search(&label).expect("label was collected above");

        let mut seen = HashSet::new();
        for &(a, b) in edges {
            let (i, j) = (index_of(a), index_of(b));
            if i == j {
                return Err(QnsError::construction(format!(
                    "self-loop at node {a} is not allowed"
                )));
            }
            let edge = Edge::new(Node::new(i), Node::new(j));
            if !seen.insert(canonical_pair(i, j)) {
                return Err(QnsError::construction(format!(
                    "parallel edge ({a}, {b}) is not allowed"
                )));
            }
            graph.push_edge(edge);
        }

        Ok(graph)
    }

    /// Renames this graph (builder-style, for the named architecture-graph
    /// constructors in `archgraphs`).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The graph's name (used only for diagnostics/metrics).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes in canonical (insertion) order.
    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.clone()
    }

    /// Edges in canonical (insertion) order.
    pub fn edges(&self) -> Vec<Edge> {
        self.edges.clone()
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if `node` is in this graph.
    pub fn has_node(&self, node: Node) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Returns true if `u` and `v` are adjacent in this graph.
    pub fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_set.contains(&Edge::new(u, v))
    }

    /// Returns the neighbours of `node` (empty if `node` is absent).
    pub fn neighbours(&self, node: Node) -> Vec<Node> {
        self.adjacency.get(&node).cloned().unwrap_or_default()
    }

    /// Returns the edges incident to `node`.
    pub fn incident_edges(&self, node: Node) -> Vec<Edge> {
        self.neighbours(node)
            .into_iter()
            .map(|neighbour| Edge::new(node, neighbour))
            .collect()
    }

    /// Adds a single node (a no-op if already present).
    pub fn add_node(&mut self, node: Node) {
        self.add_nodes(&[node]);
    }

    /// Adds several nodes (skipping any already present).
    pub fn add_nodes(&mut self, nodes: &[Node]) {
        for &node in nodes {
            if !self.adjacency.contains_key(&node) {
                self.adjacency.insert(node, Vec::new());
                self.nodes.push(node);
            }
        }
    }

    /// Removes a node and every edge incident to it.
    pub fn remove_node(&mut self, node: Node) {
        self.remove_nodes(&[node]);
    }

    /// Removes several nodes and every edge incident to any of them.
    pub fn remove_nodes(&mut self, nodes: &[Node]) {
        let doomed: HashSet<Node> = nodes.iter().copied().collect();
        self.edges.retain(|edge| {
            let (u, v) = edge.endpoints();
            !(doomed.contains(&u) || doomed.contains(&v))
        });
        self.nodes.retain(|n| !doomed.contains(n));
        self.rebuild_caches();
    }

    /// Adds an edge (a no-op if it already exists; both endpoints must
    /// already be in the graph).
    pub fn add_edge(&mut self, edge: Edge) {
        self.add_edges(&[edge]);
    }

    /// Adds several edges (skipping duplicates and self-loops).
    pub fn add_edges(&mut self, edges: &[Edge]) {
        for &edge in edges {
            let (u, v) = edge.endpoints();
            if u == v || self.edge_set.contains(&edge) {
                continue;
            }
            self.push_edge(edge);
        }
    }

    /// Removes an edge (a no-op if absent).
    pub fn remove_edge(&mut self, edge: Edge) {
        self.remove_edges(&[edge]);
    }

    /// Removes several edges.
    pub fn remove_edges(&mut self, edges: &[Edge]) {
        for edge in edges {
            self.edges.retain(|e| e != edge);
        }
        self.rebuild_caches();
    }

    fn push_edge(&mut self, edge: Edge) {
        let (u, v) = edge.endpoints();
        self.add_node(u);
        self.add_node(v);
        self.edges.push(edge);
        self.edge_set.insert(edge);
        self.adjacency.entry(u).or_default().push(v);
        self.adjacency.entry(v).or_default().push(u);
    }

    fn rebuild_caches(&mut self) {
        self.edge_set = self.edges.iter().copied().collect();
        self.adjacency = HashMap::new();
        for &node in &self.nodes {
            self.adjacency.entry(node).or_default();
        }
        for edge in &self.edges {
            let (u, v) = edge.endpoints();
            self.adjacency.entry(u).or_default().push(v);
            self.adjacency.entry(v).or_default().push(u);
        }
    }

    /// Returns a deep copy of this graph.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Draws `m` edges uniformly without replacement and returns the
    /// edge-induced subgraph (node set = endpoints of the sampled edges).
    ///
    /// Precondition: `1 <= m <= self.num_edges()`.
    pub fn random_subgraph<R: Rng + ?Sized>(&self, m: usize, rng: &mut R) -> Result<Self> {
        if m == 0 || m > self.edges.len() {
            return Err(QnsError::construction(format!(
                "random_subgraph: requested {m} edges from a graph with {}",
                self.edges.len()
            )));
        }
        let sampled: Vec<Edge> = self
            .edges
            .choose_multiple(rng, m)
            .copied()
            .collect();
        let mut subgraph = Self::new(format!("{}-subgraph", self.name));
        subgraph.add_edges(&sampled);
        Ok(subgraph)
    }

    /// Draws `n` nodes independently with replacement. If `include_all` is
    /// set, the first `num_nodes()` draws are a uniform permutation of
    /// every node and the rest are i.i.d.; this requires `n >=
    /// num_nodes()`.
    pub fn random_nodes<R: Rng + ?Sized>(
        &self,
        n: usize,
        include_all: bool,
        rng: &mut R,
    ) -> Result<Vec<Node>> {
        if include_all && n < self.nodes.len() {
            return Err(QnsError::construction(format!(
                "random_nodes: cannot include every node with n={n} < {}",
                self.nodes.len()
            )));
        }
        let mut remaining = n;
        let mut out = Vec::with_capacity(n);
        if include_all {
            let mut shuffled = self.nodes.clone();
            shuffled.shuffle(rng);
            out.extend(shuffled);
            remaining -= self.nodes.len();
        }
        out.extend((0..remaining).map(|_| *self.nodes.choose(rng).expect("graph has nodes")));
        Ok(out)
    }

    /// Draws `n` edges independently with replacement. If `include_all` is
    /// set (the default in spec.md §4.1), the first `num_edges()` draws are
    /// a uniform permutation of every edge and the rest are i.i.d.
    pub fn random_edges<R: Rng + ?Sized>(
        &self,
        n: usize,
        include_all: bool,
        rng: &mut R,
    ) -> Result<Vec<Edge>> {
        if include_all && n < self.edges.len() {
            return Err(QnsError::construction(format!(
                "random_edges: cannot include every edge with n={n} < {}",
                self.edges.len()
            )));
        }
        let mut remaining = n;
        let mut out = Vec::with_capacity(n);
        if include_all {
            let mut shuffled = self.edges.clone();
            shuffled.shuffle(rng);
            out.extend(shuffled);
            remaining -= self.edges.len();
        }
        out.extend((0..remaining).map(|_| *self.edges.choose(rng).expect("graph has edges")));
        Ok(out)
    }

    /// Produces a graph isomorphic to this one except that the
    /// neighbourhoods of `u` and `v` are exchanged, leaving `{u, v}` itself
    /// (if present) untouched. If exactly one of `u`, `v` is absent, it is
    /// temporarily added (acting as an empty neighbourhood) and removed
    /// again afterwards. If neither is present, the graph is unchanged.
    pub fn permute(&self, u: Node, v: Node) -> Self {
        let mut permuted = self.clone();
        permuted.permute_in_place(u, v);
        permuted
    }

    /// In-place version of [`Graph::permute`].
    pub fn permute_in_place(&mut self, u: Node, v: Node) {
        if !self.has_node(u) && !self.has_node(v) {
            return;
        }

        let u_external = !self.has_node(u);
        let v_external = !self.has_node(v);
        if u_external {
            self.add_node(u);
        }
        if v_external {
            self.add_node(v);
        }

        let u_neighbours: Vec<Node> = self.neighbours(u).into_iter().filter(|&n| n != v).collect();
        let v_neighbours: Vec<Node> = self.neighbours(v).into_iter().filter(|&n| n != u).collect();

        for &n in &u_neighbours {
            self.remove_edge(Edge::new(u, n));
        }
        for &n in &v_neighbours {
            self.remove_edge(Edge::new(v, n));
        }
        for &n in &u_neighbours {
            self.add_edge(Edge::new(v, n));
        }
        for &n in &v_neighbours {
            self.add_edge(Edge::new(u, n));
        }

        if u_external {
            self.remove_node(u);
        }
        if v_external {
            self.remove_node(v);
        }
    }

    /// Returns the vertex-union, edge-union of this graph and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let mut unioned = self.clone();
        unioned.union_in_place(other);
        unioned
    }

    /// In-place version of [`Graph::union`].
    pub fn union_in_place(&mut self, other: &Self) {
        self.add_nodes(&other.nodes);
        self.add_edges(&other.edges);
    }
}

impl PartialEq for Graph {
    /// Equal if the node sets and edge sets are equal (order-independent).
    fn eq(&self, other: &Self) -> bool {
        let self_nodes: HashSet<_> = self.nodes.iter().filter_map(|n| n.label()).collect();
        let other_nodes: HashSet<_> = other.nodes.iter().filter_map(|n| n.label()).collect();
        if self_nodes != other_nodes {
            return false;
        }
        let self_edges: HashSet<_> = self.edges.iter().copied().collect();
        let other_edges: HashSet<_> = other.edges.iter().copied().collect();
        self_edges == other_edges
    }
}

fn canonical_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
