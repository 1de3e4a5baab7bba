//! Node-pair permutations in map or swap semantics.
//!
//! Grounded on `original_source/lib/permutation.py`'s `Permutation` class:
//! a sequence of node-pair transpositions applied either as a simultaneous
//! directed relabelling ("map" mode, used for the bijection a chain's head
//! glink realises) or as a sequential chain of physical swaps ("swap" mode,
//! used for the actual SWAP gates a router inserts).

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::graph_data::{Edge, Node};
use crate::error::{QnsError, Result};

/// Distinguishes how a [`Permutation`]'s transpositions compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermutationMode {
    /// Each pair is a directed `(src, dst)` relabelling, applied
    /// simultaneously against the original assignment rather than chained.
    Map,
    /// Transpositions are applied one after another against the running
    /// result, as physical SWAP gates would be.
    Swap,
}

/// A permutation expressed as a sequence of node-pair transpositions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permutation {
    mode: PermutationMode,
    sequence: Vec<Edge>,
}

impl Permutation {
    /// Builds a permutation from an explicit transposition sequence.
    pub fn new(mode: PermutationMode, sequence: Vec<Edge>) -> Self {
        Self { mode, sequence }
    }

    /// The identity permutation (an empty transposition sequence).
    pub fn identity(mode: PermutationMode) -> Self {
        Self::new(mode, Vec::new())
    }

    /// Draws a uniformly random bijection over `nodes` as a map-mode
    /// permutation: every node is paired with one node drawn from the same
    /// shuffled set, including itself (a fixed point is a legal, no-op
    /// pairing). Works for any node count, odd or even.
    pub fn random<R: Rng + ?Sized>(nodes: &[Node], rng: &mut R) -> Result<Self> {
        if nodes.is_empty() {
            return Err(QnsError::construction("Permutation::random needs at least one node"));
        }
        let mut shuffled = nodes.to_vec();
        shuffled.shuffle(rng);
        let sequence = nodes
            .iter()
            .zip(shuffled.iter())
            .map(|(&original, &dst)| Edge::new(original, dst))
            .collect();
        Ok(Self::new(PermutationMode::Map, sequence))
    }

    /// This permutation's mode.
    pub fn mode(&self) -> PermutationMode {
        self.mode
    }

    /// The transposition sequence.
    pub fn sequence(&self) -> &[Edge] {
        &self.sequence
    }

    /// Number of transpositions.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// True if this is the identity permutation.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Applies this permutation to `assignment`, a sequence of node
    /// identities, returning the permuted assignment.
    ///
    /// In map mode, each transposition `(src, dst)` is a directed
    /// relabelling: wherever `src` occurs in `assignment` it becomes `dst`,
    /// one-way (unlike a transposition, `dst` is left untouched unless some
    /// other pair also targets it). In swap mode, each transposition's
    /// endpoints are located by *value* within `assignment` (not used as
    /// raw indices), since `assignment` is generally itself the result of
    /// an earlier permutation and so no longer in label order; positions
    /// are resolved once against the pre-permutation `assignment`, matching
    /// the original's `sigma` table, so that transpositions sharing a node
    /// compose against a fixed reference rather than each other's output.
    /// Transpositions involving the null node are ignored in both modes.
    pub fn apply(&self, assignment: &[Node]) -> Vec<Node> {
        match self.mode {
            PermutationMode::Map => {
                let mut sigma: HashMap<Node, Node> = HashMap::new();
                for edge in &self.sequence {
                    let (src, dst) = edge.endpoints();
                    if src.is_null() || dst.is_null() {
                        continue;
                    }
                    sigma.insert(src, dst);
                }
                assignment.iter().map(|node| sigma.get(node).copied().unwrap_or(*node)).collect()
            }
            PermutationMode::Swap => {
                let mut result = assignment.to_vec();
                for edge in &self.sequence {
                    let (a, b) = edge.endpoints();
                    if a.is_null() || b.is_null() {
                        continue;
                    }
                    let (Some(i), Some(j)) = (position_of(assignment, a), position_of(assignment, b)) else {
                        continue;
                    };
                    result.swap(i, j);
                }
                result
            }
        }
    }

    /// One-line (cycle) notation, e.g. `(0 1)(2 3)`.
    pub fn oneline(&self) -> String {
        self.sequence
            .iter()
            .map(|edge| {
                let (a, b) = edge.endpoints();
                format!("({a} {b})")
            })
            .collect()
    }
}

/// Finds `target`'s position within `assignment` by value, not label.
fn position_of(assignment: &[Node], target: Node) -> Option<usize> {
    assignment.iter().position(|&n| n == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn nodes(labels: &[usize]) -> Vec<Node> {
        labels.iter().map(|&l| Node::new(l)).collect()
    }

    #[test]
    fn test_identity_is_a_no_op() {
        let perm = Permutation::identity(PermutationMode::Map);
        assert_eq!(perm.apply(&nodes(&[1, 2, 3])), nodes(&[1, 2, 3]));
    }

    #[test]
    fn test_map_mode_apply_is_a_directed_relabelling() {
        // (src, dst) edges are one-way: only positions holding `src` change.
        // A three-cycle 0->1->2->0 rotates every position, since each node
        // is both some edge's src and another edge's dst.
        let perm = Permutation::new(
            PermutationMode::Map,
            vec![
                Edge::new(Node::new(0), Node::new(1)),
                Edge::new(Node::new(1), Node::new(2)),
                Edge::new(Node::new(2), Node::new(0)),
            ],
        );
        assert_eq!(perm.apply(&nodes(&[0, 1, 2])), nodes(&[1, 2, 0]));
    }

    #[test]
    fn test_map_mode_apply_leaves_untargeted_destinations_unmodified() {
        // only `0`'s position changes; `1`'s own position is untouched
        // since nothing maps onto it as a destination-only rewrite back.
        let perm = Permutation::new(PermutationMode::Map, vec![Edge::new(Node::new(0), Node::new(1))]);
        assert_eq!(perm.apply(&nodes(&[0, 1, 2])), nodes(&[1, 1, 2]));
    }

    #[test]
    fn test_swap_mode_apply_is_sequential() {
        let perm = Permutation::new(
            PermutationMode::Swap,
            vec![Edge::new(Node::new(0), Node::new(1)), Edge::new(Node::new(1), Node::new(2))],
        );
        // sigma is fixed from the pre-permutation array: position(0)=0,
        // position(1)=1, position(2)=2 throughout, even though the first
        // swap moves node 1 out of position 1.
        assert_eq!(perm.apply(&nodes(&[0, 1, 2])), nodes(&[1, 2, 0]));
    }

    #[test]
    fn test_apply_finds_nodes_by_value_in_a_rearranged_assignment() {
        // assignment is already permuted: node 2 sits at position 0.
        let perm = Permutation::new(PermutationMode::Swap, vec![Edge::new(Node::new(2), Node::new(0))]);
        assert_eq!(perm.apply(&nodes(&[2, 1, 0])), nodes(&[0, 1, 2]));
    }

    #[test]
    fn test_random_is_a_bijection_over_every_node() {
        let nodes = vec![Node::new(0), Node::new(1), Node::new(2), Node::new(3)];
        let mut rng = StdRng::seed_from_u64(11);
        let perm = Permutation::random(&nodes, &mut rng).unwrap();
        assert_eq!(perm.len(), nodes.len());
        let mut sources: Vec<Node> = perm.sequence().iter().map(|e| e.endpoints().0).collect();
        sources.sort_by_key(|n| n.label());
        assert_eq!(sources, nodes);
        let mut destinations: Vec<Node> = perm.sequence().iter().map(|e| e.endpoints().1).collect();
        destinations.sort_by_key(|n| n.label());
        assert_eq!(destinations, nodes);
        let mut applied = perm.apply(&nodes);
        applied.sort_by_key(|n| n.label());
        assert_eq!(applied, nodes);
    }

    #[test]
    fn test_random_works_for_odd_node_counts() {
        let nodes: Vec<Node> = (0..53).map(Node::new).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let perm = Permutation::random(&nodes, &mut rng).unwrap();
        assert_eq!(perm.len(), 53);
        let applied = perm.apply(&nodes);
        let mut sorted = applied.clone();
        sorted.sort_by_key(|n| n.label());
        assert_eq!(sorted, nodes);
    }

    #[test]
    fn test_random_rejects_empty_node_list() {
        let nodes: Vec<Node> = vec![];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Permutation::random(&nodes, &mut rng).is_err());
    }

    #[test]
    fn test_swap_mode_reverse_is_the_identity() {
        let perm = Permutation::new(
            PermutationMode::Swap,
            vec![
                Edge::new(Node::new(0), Node::new(1)),
                Edge::new(Node::new(1), Node::new(2)),
                Edge::new(Node::new(0), Node::new(3)),
            ],
        );
        let reverse = Permutation::new(
            PermutationMode::Swap,
            perm.sequence().iter().rev().copied().collect(),
        );
        let original = nodes(&[0, 1, 2, 3]);
        let forward = perm.apply(&original);
        let back = reverse.apply(&forward);
        assert_eq!(back, original);
    }

    #[test]
    fn test_oneline_formatting() {
        let perm = Permutation::new(PermutationMode::Map, vec![Edge::new(Node::new(0), Node::new(1))]);
        assert_eq!(perm.oneline(), "(0 1)");
    }
}
