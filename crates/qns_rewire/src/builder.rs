//! The top-level entry point: builds a chain, verifies it, assembles a
//! circuit, and summarises the result.
//!
//! Grounded on `original_source/lib/quekno.py`'s `QUEKNO.run()`.

use rand::Rng;
use tracing::info;

use qns_core::config::BuilderConfig;
use qns_core::error::Result;
use qns_core::types::Circuit;

use crate::assembler::CircuitAssembler;
use crate::chain_builder::ChainBuilder;
use crate::glink::GlinkChain;
use crate::metrics::Metrics;
use crate::self_router;

/// The circuits and bookkeeping produced by one build.
///
/// `circuit` addresses its gates by each glink's evolving layout; `routed`
/// is the same circuit replayed onto the architecture graph with SWAPs
/// inserted wherever a gate was not yet architecture-adjacent. The gap
/// between the two is the chain's known-by-construction routing cost.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub circuit: Circuit,
    pub routed: Circuit,
    pub chain: GlinkChain,
    pub metrics: Metrics,
}

/// Builds QUEKNO-style routing-benchmark circuits from a [`BuilderConfig`].
pub struct QueknoBuilder<'a> {
    config: &'a BuilderConfig,
}

impl<'a> QueknoBuilder<'a> {
    /// Creates a builder for the given configuration.
    pub fn new(config: &'a BuilderConfig) -> Self {
        Self { config }
    }

    /// Builds a glink chain, verifies its cost is self-consistent, assembles
    /// the layout-addressed circuit, and routes it onto the architecture
    /// graph.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BuildOutput> {
        let chain = ChainBuilder::new(self.config).build(rng)?;
        let predicted_cost = self_router::verify(&chain)?;
        info!(chain_length = chain.len(), predicted_cost, "chain verified");

        let circuit = CircuitAssembler::new(self.config).assemble(&chain, rng)?;
        let routed = self_router::route(&circuit, &chain)?;
        info!(
            gate_cost = routed.two_qubit_gate_count() - circuit.two_qubit_gate_count(),
            depth_cost = routed.depth() - circuit.depth(),
            "circuit routed"
        );

        let metrics = Metrics::new(self.config, &chain, &circuit, &routed, predicted_cost);

        Ok(BuildOutput { circuit, routed, chain, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qns_core::archgraphs;
    use qns_core::config::{subgraph_size, OptType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_run_produces_a_verified_build() {
        let cfg = BuilderConfig::new(OptType::Opt1, 4, archgraphs::grid(3, 3), subgraph_size::SMALL.min(4), 1.5);
        let mut rng = StdRng::seed_from_u64(13);
        let output = QueknoBuilder::new(&cfg).run(&mut rng).unwrap();
        assert!(output.metrics.predicted_cost >= cfg.target_cost);
        assert!(output.metrics.chain_length > 0);
        assert_eq!(output.circuit.num_qubits(), cfg.archgraph.num_nodes());
        assert_eq!(output.metrics.gate_cost, output.metrics.predicted_cost);
    }

    #[test]
    fn test_run_is_reproducible_with_same_seed() {
        let cfg = BuilderConfig::new(OptType::Depth, 3, archgraphs::grid(3, 3), subgraph_size::SMALL.min(4), 1.5);
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = QueknoBuilder::new(&cfg).run(&mut rng_a).unwrap();
        let b = QueknoBuilder::new(&cfg).run(&mut rng_b).unwrap();
        assert_eq!(a.metrics.predicted_cost, b.metrics.predicted_cost);
        assert_eq!(a.circuit.gate_count(), b.circuit.gate_count());
        assert_eq!(a.metrics.depth_cost, b.metrics.depth_cost);
    }

    #[test]
    fn test_run_routed_gate_delta_matches_predicted_cost_for_opt2() {
        let cfg = BuilderConfig::new(OptType::Opt2, 5, archgraphs::grid(4, 4), subgraph_size::SMALL.min(6), 1.5);
        let mut rng = StdRng::seed_from_u64(23);
        let output = QueknoBuilder::new(&cfg).run(&mut rng).unwrap();
        assert_eq!(
            output.routed.two_qubit_gate_count() - output.circuit.two_qubit_gate_count(),
            output.metrics.predicted_cost
        );
    }

    #[test]
    fn test_tokyo_opt1_zero_cost_adds_no_swaps() {
        let cfg = BuilderConfig::new(OptType::Opt1, 0, archgraphs::tokyo(), 5, 1.5);
        let mut rng = StdRng::seed_from_u64(1);
        let output = QueknoBuilder::new(&cfg).run(&mut rng).unwrap();
        assert_eq!(output.chain.len(), 1);
        assert_eq!(output.routed.two_qubit_gate_count(), output.circuit.two_qubit_gate_count());
        assert_eq!(output.routed.depth(), output.circuit.depth());
    }

    #[test]
    fn test_tokyo_opt1_target_cost_three_adds_four_glinks_and_three_swaps() {
        let cfg = BuilderConfig::new(OptType::Opt1, 3, archgraphs::tokyo(), 5, 1.5);
        let mut rng = StdRng::seed_from_u64(2);
        let output = QueknoBuilder::new(&cfg).run(&mut rng).unwrap();
        assert_eq!(output.chain.len(), 4);
        assert_eq!(
            output.routed.two_qubit_gate_count() - output.circuit.two_qubit_gate_count(),
            3
        );
    }

    #[test]
    fn test_rochester_opt1_target_cost_ten_adds_eleven_glinks_and_ten_swaps() {
        let cfg = BuilderConfig::new(OptType::Opt1, 10, archgraphs::rochester(), 5, 1.5);
        let mut rng = StdRng::seed_from_u64(3);
        let output = QueknoBuilder::new(&cfg).run(&mut rng).unwrap();
        assert_eq!(output.chain.len(), 11);
        assert_eq!(
            output.routed.two_qubit_gate_count() - output.circuit.two_qubit_gate_count(),
            10
        );
    }

    #[test]
    fn test_same_seed_produces_identical_circuit_and_routed_gate_sequences() {
        let cfg = BuilderConfig::new(OptType::Depth, 2, archgraphs::tokyo(), 5, 2.55);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = QueknoBuilder::new(&cfg).run(&mut rng_a).unwrap();
        let b = QueknoBuilder::new(&cfg).run(&mut rng_b).unwrap();
        assert_eq!(a.circuit.gates(), b.circuit.gates());
        assert_eq!(a.routed.gates(), b.routed.gates());
    }
}
