//! The "strong glink" predicate: a bounded subgraph-isomorphism search.
//!
//! Grounded on `original_source/lib/quekno.py`'s glink-acceptance check and
//! the architecture-graph embedding step it performs before accepting a
//! candidate `(subgraph, permutation)` pair: permute the candidate subgraph
//! by its own transpositions, reject it outright if that permutation had no
//! effect, union the permuted candidate with the immediate predecessor's
//! subgraph, and accept iff that union embeds into the architecture graph.
//! The embedding search is a VF2-style backtracking monomorphism
//! enumeration, grounded in the teacher's `router::sabre` front-layer
//! bookkeeping for the "try partial mappings, backtrack on conflict" shape,
//! bounded by a call budget.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use qns_core::types::{Graph, Node, Permutation};

/// A bounded VF2-style subgraph-isomorphism matcher.
pub struct GlinkPredicate {
    call_limit: usize,
}

impl GlinkPredicate {
    /// Creates a predicate with the given backtracking call budget.
    pub fn new(call_limit: usize) -> Self {
        Self { call_limit }
    }

    /// Returns true if `candidate` is a strong glink against the
    /// architecture graph `archgraph`, given the immediate predecessor's
    /// subgraph `predecessor` (`None` for the head glink).
    ///
    /// Builds `candidate'`, the image of `candidate` under `permutation`
    /// (each transposition applied via [`Graph::permute`]); rejects a
    /// permutation that left the candidate unchanged; unions `candidate'`
    /// with `predecessor` (or takes it alone, if there is none yet); and
    /// accepts iff that union embeds into `archgraph` within the call
    /// budget. Exhausting the budget without finding an embedding is
    /// treated as "no embedding found".
    pub fn is_strong(
        &self,
        candidate: &Graph,
        permutation: &Permutation,
        predecessor: Option<&Graph>,
        archgraph: &Graph,
    ) -> bool {
        if permutation.is_empty() {
            return false;
        }

        let mut permuted = candidate.clone();
        for edge in permutation.sequence() {
            let (u, v) = edge.endpoints();
            permuted.permute_in_place(u, v);
        }
        if permuted == *candidate {
            return false;
        }

        let union = match predecessor {
            Some(prev) => prev.union(&permuted),
            None => permuted,
        };

        let mut order = union.nodes();
        order.sort_by_key(|n| Reverse(union.neighbours(*n).len()));
        let archgraph_nodes = archgraph.nodes();

        let mut calls = 0usize;
        let mut mapping = HashMap::new();
        let mut used = HashSet::new();
        self.embed(&order, 0, &mut mapping, &mut used, &union, archgraph, &archgraph_nodes, &mut calls)
    }

    #[allow(clippy::too_many_arguments)]
    fn embed(
        &self,
        order: &[Node],
        depth: usize,
        mapping: &mut HashMap<Node, Node>,
        used: &mut HashSet<Node>,
        union: &Graph,
        archgraph: &Graph,
        archgraph_nodes: &[Node],
        calls: &mut usize,
    ) -> bool {
        if *calls >= self.call_limit {
            return false;
        }
        *calls += 1;

        if depth == order.len() {
            return true;
        }

        let u = order[depth];
        for &v in archgraph_nodes {
            if used.contains(&v) {
                continue;
            }
            if !self.consistent(u, v, mapping, union, archgraph) {
                continue;
            }
            mapping.insert(u, v);
            used.insert(v);
            if self.embed(order, depth + 1, mapping, used, union, archgraph, archgraph_nodes, calls) {
                return true;
            }
            mapping.remove(&u);
            used.remove(&v);
            if *calls >= self.call_limit {
                return false;
            }
        }
        false
    }

    /// `v` is a consistent placement for `u` if every already-mapped
    /// neighbour of `u` in `union` maps to a neighbour of `v` in
    /// `archgraph` (non-induced embedding: absent edges need not match).
    fn consistent(&self, u: Node, v: Node, mapping: &HashMap<Node, Node>, union: &Graph, archgraph: &Graph) -> bool {
        for (&mapped_u, &mapped_v) in mapping.iter() {
            if union.has_edge(u, mapped_u) && !archgraph.has_edge(v, mapped_v) {
                return false;
            }
        }
        true
    }
}
