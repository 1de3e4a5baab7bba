//! Build metrics emitted alongside a generated circuit.
//!
//! Grounded on the teacher's JSON output structs in `qns_cli::main`
//! (`cmd_run`/`cmd_benchmark`'s result objects) for the "serde-serialize a
//! flat metrics struct for CLI/file output" shape.

use serde::{Deserialize, Serialize};

use qns_core::config::{BuilderConfig, OptType};
use qns_core::types::Circuit;

use crate::glink::GlinkChain;

/// A flat summary of one build, suitable for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    pub opt_type: OptType,
    /// The cost the build was asked to target.
    pub target_cost: usize,
    /// The chain's predicted cost, independently reproduced by the
    /// self-router.
    pub predicted_cost: usize,
    /// Number of glinks in the built chain.
    pub chain_length: usize,
    /// Mean number of edges per glink's subgraph.
    pub avg_subgraph_size: f64,
    /// Realised one-qubit / two-qubit gate ratio in the unrouted circuit.
    pub qbg_ratio: f64,
    pub num_qubits: usize,
    pub gate_count: usize,
    pub one_qubit_gate_count: usize,
    pub two_qubit_gate_count: usize,
    pub depth: usize,
    /// `routed.two_qubit_gate_count() - circuit.two_qubit_gate_count()`:
    /// the number of SWAP gates routing actually needed to insert.
    pub gate_cost: usize,
    /// `routed.depth() - circuit.depth()`: the routing cost measured in
    /// circuit-depth layers instead of gate count.
    pub depth_cost: usize,
    /// The head glink's permutation in one-line notation: the circuit's
    /// initial qubit layout.
    pub init_map: String,
}

impl Metrics {
    /// Summarises a finished build from both the layout-addressed circuit
    /// and its routed counterpart.
    pub fn new(
        config: &BuilderConfig,
        chain: &GlinkChain,
        circuit: &Circuit,
        routed: &Circuit,
        predicted_cost: usize,
    ) -> Self {
        let avg_subgraph_size = if chain.is_empty() {
            0.0
        } else {
            chain.links().iter().map(|l| l.subgraph().num_edges() as f64).sum::<f64>() / chain.len() as f64
        };
        let qbg_ratio = circuit.one_qubit_gate_count() as f64 / circuit.two_qubit_gate_count().max(1) as f64;
        let init_map = chain.links().first().map(|l| l.permutation().oneline()).unwrap_or_default();

        Self {
            opt_type: config.opt_type,
            target_cost: config.target_cost,
            predicted_cost,
            chain_length: chain.len(),
            avg_subgraph_size,
            qbg_ratio,
            num_qubits: circuit.num_qubits(),
            gate_count: circuit.gate_count(),
            one_qubit_gate_count: circuit.one_qubit_gate_count(),
            two_qubit_gate_count: circuit.two_qubit_gate_count(),
            depth: circuit.depth(),
            gate_cost: routed.two_qubit_gate_count() - circuit.two_qubit_gate_count(),
            depth_cost: routed.depth() - circuit.depth(),
            init_map,
        }
    }

    /// Serializes to a pretty-printed JSON string.
    pub fn to_json(&self) -> qns_core::error::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
