//! A glink chain: a sequence of `(subgraph, permutation)` pairs whose
//! composition has a provably known routing cost.
//!
//! Grounded on `original_source/lib/glink.py`'s `Glink`/`GlinkChain`
//! linked-list. A statically typed target has no need for Python's
//! hand-rolled linked list (spec.md §9's Design Notes); an owning `Vec` is
//! used instead, re-architected per that Open Question's resolution
//! recorded in DESIGN.md.

use qns_core::types::{Graph, Permutation};

/// One step of a glink chain: a subgraph of the architecture graph paired
/// with the permutation it is responsible for realising, and that
/// permutation's contribution to the chain's total predicted cost.
#[derive(Debug, Clone)]
pub struct Glink {
    subgraph: Graph,
    permutation: Permutation,
    cost: usize,
}

impl Glink {
    /// Creates a glink from its subgraph, target permutation and
    /// predicted cost contribution.
    pub fn new(subgraph: Graph, permutation: Permutation, cost: usize) -> Self {
        Self {
            subgraph,
            permutation,
            cost,
        }
    }

    /// The subgraph this glink draws its coupling from.
    pub fn subgraph(&self) -> &Graph {
        &self.subgraph
    }

    /// The permutation this glink realises.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// This glink's contribution to the chain's predicted routing cost.
    pub fn cost(&self) -> usize {
        self.cost
    }
}

/// An ordered sequence of glinks, together with the architecture graph
/// they are drawn from.
#[derive(Debug, Clone)]
pub struct GlinkChain {
    archgraph: Graph,
    links: Vec<Glink>,
}

impl GlinkChain {
    /// Creates an empty chain over the given architecture graph.
    pub fn new(archgraph: Graph) -> Self {
        Self {
            archgraph,
            links: Vec::new(),
        }
    }

    /// The architecture graph this chain draws subgraphs from.
    pub fn archgraph(&self) -> &Graph {
        &self.archgraph
    }

    /// Appends a glink to the chain.
    pub fn push(&mut self, glink: Glink) {
        self.links.push(glink);
    }

    /// The chain's glinks, in build order.
    pub fn links(&self) -> &[Glink] {
        &self.links
    }

    /// Number of glinks in the chain.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True if the chain has no glinks yet.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The sum of every glink's predicted cost contribution: the chain's
    /// known-by-construction total routing cost.
    pub fn total_cost(&self) -> usize {
        self.links.iter().map(Glink::cost).sum()
    }

    /// The immediate predecessor's subgraph, i.e. the last glink pushed so
    /// far: the `G_{i-1}` a candidate glink's strong-glink check is judged
    /// against. `None` before the head glink is pushed.
    pub fn predecessor_subgraph(&self) -> Option<&Graph> {
        self.links.last().map(Glink::subgraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qns_core::types::PermutationMode;

    fn sample_graph() -> Graph {
        Graph::from_edges(&[(0, 1)]).unwrap()
    }

    #[test]
    fn test_empty_chain_has_zero_cost() {
        let chain = GlinkChain::new(sample_graph());
        assert_eq!(chain.total_cost(), 0);
        assert!(chain.is_empty());
    }

    #[test]
    fn test_total_cost_accumulates() {
        let mut chain = GlinkChain::new(sample_graph());
        chain.push(Glink::new(sample_graph(), Permutation::identity(PermutationMode::Swap), 1));
        chain.push(Glink::new(sample_graph(), Permutation::identity(PermutationMode::Swap), 2));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.total_cost(), 3);
    }

    #[test]
    fn test_predecessor_subgraph_is_none_before_any_glink() {
        let chain = GlinkChain::new(sample_graph());
        assert!(chain.predecessor_subgraph().is_none());
    }

    #[test]
    fn test_predecessor_subgraph_is_the_last_glink_pushed() {
        let mut chain = GlinkChain::new(sample_graph());
        let a = Graph::from_edges(&[(0, 1)]).unwrap();
        let b = Graph::from_edges(&[(1, 2)]).unwrap();
        chain.push(Glink::new(a, Permutation::identity(PermutationMode::Swap), 0));
        chain.push(Glink::new(b.clone(), Permutation::identity(PermutationMode::Swap), 0));
        assert_eq!(chain.predecessor_subgraph(), Some(&b));
    }
}
