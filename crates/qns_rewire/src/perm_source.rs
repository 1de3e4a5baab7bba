//! Permutation sources: the three cost-accounting regimes a glink's
//! target permutation can be drawn from.
//!
//! Grounded on `original_source/lib/quekno.py`'s `__consecutive_permutations`
//! (opt1/opt2) and `__parallel_permutations` (depth).

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use qns_core::config::{OptType, RuntimeConstants};
use qns_core::error::{QnsError, Result};
use qns_core::types::{Edge, Graph, Node, Permutation, PermutationMode};

/// Draws a glink's target permutation and predicted cost contribution
/// from the architecture graph's own edges, per the builder's configured
/// [`OptType`].
#[derive(Debug, Clone, Copy)]
pub struct PermutationSource<'a> {
    opt_type: OptType,
    constants: &'a RuntimeConstants,
}

/// A drawn permutation together with its predicted cost contribution
/// under the source's accounting regime (gate count for opt1/opt2, layer
/// count for depth).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draw {
    pub permutation: Permutation,
    pub cost: usize,
}

impl<'a> PermutationSource<'a> {
    /// Creates a permutation source for the given regime and runtime
    /// constants.
    pub fn new(opt_type: OptType, constants: &'a RuntimeConstants) -> Self {
        Self { opt_type, constants }
    }

    /// Draws a permutation and cost from `archgraph`'s own edges (not a
    /// glink's candidate subgraph, which exists only for the strong-glink
    /// check and back-gate sampling). `remaining_cost` is the budget still
    /// left to reach the target cost; opt2 clamps its swap count to it so
    /// the last glink in a chain cannot overshoot.
    pub fn draw<R: Rng + ?Sized>(&self, archgraph: &Graph, remaining_cost: usize, rng: &mut R) -> Result<Draw> {
        if archgraph.num_edges() == 0 {
            return Err(QnsError::construction(
                "PermutationSource::draw requires at least one edge",
            ));
        }
        match self.opt_type {
            OptType::Opt1 => self.opt1(archgraph, rng),
            OptType::Opt2 => self.opt2(archgraph, remaining_cost, rng),
            OptType::Depth => self.depth(archgraph, rng),
        }
    }

    /// A single swap on a randomly chosen architecture-graph edge.
    fn opt1<R: Rng + ?Sized>(&self, archgraph: &Graph, rng: &mut R) -> Result<Draw> {
        let edges = archgraph.edges();
        let edge = *edges.choose(rng).expect("checked non-empty above");
        Ok(Draw {
            permutation: Permutation::new(PermutationMode::Swap, vec![edge]),
            cost: 1,
        })
    }

    /// One swap, or (with probability `consec_swaps_bias`) two consecutive
    /// swaps sharing a node. When a second swap is drawn, its endpoints
    /// are reoriented so the shared node appears first in one edge and
    /// last in the other, keeping the pair a genuine two-step transposition
    /// chain rather than two independent swaps that happen to touch. Only
    /// ever adds a second swap when `remaining_cost` allows it.
    fn opt2<R: Rng + ?Sized>(&self, archgraph: &Graph, remaining_cost: usize, rng: &mut R) -> Result<Draw> {
        let edges = archgraph.edges();
        let first = *edges.choose(rng).expect("checked non-empty above");
        let (a, b) = first.endpoints();
        let mut sequence = vec![first];

        let max_swaps = remaining_cost.min(2);
        let bias = self.constants.consec_swaps_bias.clamp(0.0, 1.0);
        if max_swaps >= 2 && rng.gen_bool(bias) {
            let mut candidates: Vec<Edge> = archgraph
                .incident_edges(a)
                .into_iter()
                .chain(archgraph.incident_edges(b))
                .filter(|edge| *edge != first)
                .collect();
            candidates.dedup_by(|x, y| x == y);
            if let Some(&second) = candidates.choose(rng) {
                let (c, d) = second.endpoints();
                let reoriented = if a == c || b == d {
                    Edge::new(d, c)
                } else {
                    Edge::new(c, d)
                };
                sequence.push(reoriented);
                return Ok(Draw {
                    permutation: Permutation::new(PermutationMode::Swap, sequence),
                    cost: 2,
                });
            }
        }

        Ok(Draw {
            permutation: Permutation::new(PermutationMode::Swap, sequence),
            cost: 1,
        })
    }

    /// Packs a single node-disjoint layer of architecture-graph edges: seed
    /// with one random edge, then repeatedly either add another edge
    /// disjoint from everything chosen so far or stop, each outcome equally
    /// likely among the remaining disjoint candidates plus one "stop"
    /// option. A depth-regime glink always contributes exactly one unit of
    /// cost, however many parallel swaps its layer packs in.
    fn depth<R: Rng + ?Sized>(&self, archgraph: &Graph, rng: &mut R) -> Result<Draw> {
        let all_edges = archgraph.edges();
        let seed = *all_edges.choose(rng).expect("checked non-empty above");
        let mut layer = vec![seed];

        loop {
            let mut layer_nodes: HashSet<Node> = HashSet::new();
            for edge in &layer {
                let (u, v) = edge.endpoints();
                layer_nodes.insert(u);
                layer_nodes.insert(v);
            }
            let candidates: Vec<Edge> = all_edges
                .iter()
                .filter(|edge| {
                    let (u, v) = edge.endpoints();
                    !layer_nodes.contains(&u) && !layer_nodes.contains(&v)
                })
                .copied()
                .collect();
            if candidates.is_empty() {
                break;
            }
            // one extra "stop" option alongside the disjoint candidates,
            // mirroring the null-edge sentinel the original mixes into its
            // candidate pool.
            if rng.gen_bool(1.0 / (candidates.len() as f64 + 1.0)) {
                break;
            }
            let next = *candidates.choose(rng).expect("checked non-empty above");
            layer.push(next);
        }

        Ok(Draw {
            permutation: Permutation::new(PermutationMode::Swap, layer),
            cost: 1,
        })
    }
}
