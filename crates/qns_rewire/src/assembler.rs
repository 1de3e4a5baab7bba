//! Assembles a glink chain into a concrete [`Circuit`].
//!
//! Grounded on `original_source/lib/quekno.py`'s `build_circuit`: walk the
//! chain glink by glink, tracking the qubit layout each glink's
//! permutation induces, emit "front" gates for every architecture edge
//! whose endpoints move relative to one another, then fill in "back"
//! gates — extra two-qubit gates drawn only from that glink's own subgraph
//! (so they add no further routing cost) and one-qubit gates topping up
//! to the configured gate-type ratio.

use rand::seq::SliceRandom;
use rand::Rng;

use qns_core::error::{QnsError, Result};
use qns_core::types::{Circuit, Gate, Node};

use qns_core::config::BuilderConfig;

use crate::glink::GlinkChain;

/// Assembles a [`Circuit`] from a built [`GlinkChain`].
pub struct CircuitAssembler<'a> {
    config: &'a BuilderConfig,
}

impl<'a> CircuitAssembler<'a> {
    /// Creates an assembler for the given configuration.
    pub fn new(config: &'a BuilderConfig) -> Self {
        Self { config }
    }

    /// Assembles `chain` into a circuit over the architecture graph's
    /// qubits, addressed by current layout position (the same convention
    /// [`crate::self_router::route`] expects when it walks the circuit
    /// back to the chain's glinks).
    pub fn assemble<R: Rng + ?Sized>(&self, chain: &GlinkChain, rng: &mut R) -> Result<Circuit> {
        let archgraph = chain.archgraph();
        let mut circuit = Circuit::new(archgraph.num_nodes());
        let mut layout = archgraph.nodes();

        for (index, glink) in chain.links().iter().enumerate() {
            let permuted = glink.permutation().apply(&layout);
            if permuted == layout {
                return Err(QnsError::invariant(format!("glink {index} realises the identity permutation")));
            }

            let front_gates: Vec<(usize, usize)> = archgraph
                .edges()
                .iter()
                .filter_map(|edge| {
                    let (u, v) = edge.endpoints();
                    let before = unordered(position_of(&layout, u)?, position_of(&layout, v)?);
                    let after = unordered(position_of(&permuted, u)?, position_of(&permuted, v)?);
                    (before != after).then_some(after)
                })
                .collect();

            if front_gates.is_empty() {
                return Err(QnsError::invariant(format!("glink {index} produced no front gates")));
            }

            let subgraph = glink.subgraph();
            let back_2q_count = if subgraph.num_edges() == 0 {
                0
            } else {
                let spread = rng.gen_range(1..=4);
                (subgraph.num_edges() as f64 * (1.0 + self.config.constants.rand_edges_var * spread as f64)).ceil() as usize
            };
            let back_2q = subgraph.random_edges(back_2q_count, true, rng)?;

            let back_1q_count = ((front_gates.len() + back_2q.len()) as f64 * self.config.qbg_ratio).ceil() as usize;
            let back_1q = subgraph.random_nodes(back_1q_count, false, rng)?;

            let mut back_gates: Vec<Gate> = Vec::with_capacity(back_2q.len() + back_1q.len());
            for edge in &back_2q {
                let (u, v) = edge.endpoints();
                let (Some(iu), Some(iv)) = (position_of(&permuted, u), position_of(&permuted, v)) else {
                    continue;
                };
                back_gates.push(Gate::TwoQubit(iu, iv));
            }
            for node in &back_1q {
                if let Some(i) = position_of(&permuted, *node) {
                    back_gates.push(Gate::OneQubit(i));
                }
            }
            back_gates.shuffle(rng);

            for (a, b) in &front_gates {
                circuit.push(Gate::TwoQubit(*a, *b));
            }
            for gate in back_gates {
                circuit.push(gate);
            }

            if self.config.add_barriers && index + 1 < chain.len() {
                circuit.push(Gate::Barrier);
            }

            layout = permuted;
        }

        Ok(circuit)
    }
}

fn unordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Finds `target`'s position within `layout` by value.
pub(crate) fn position_of(layout: &[Node], target: Node) -> Option<usize> {
    layout.iter().position(|&n| n == target)
}
