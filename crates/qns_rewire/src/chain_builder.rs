//! Grows a [`GlinkChain`] up to a target predicted cost.
//!
//! Grounded on `original_source/lib/quekno.py`'s `next_glink` retry loop:
//! sample a subgraph size from a Gaussian (the teacher's
//! `drift_scan::measure` module is the pack's precedent for
//! `rand_distr::Normal` sampling), draw a candidate subgraph and
//! permutation, and keep resampling until the strong-glink predicate
//! accepts one or the patience/attempt budgets are exhausted.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, trace};

use qns_core::config::BuilderConfig;
use qns_core::error::{QnsError, Result};
use qns_core::types::Permutation;

use crate::glink::{Glink, GlinkChain};
use crate::perm_source::PermutationSource;
use crate::predicate::GlinkPredicate;

/// Builds a glink chain from a [`BuilderConfig`].
pub struct ChainBuilder<'a> {
    config: &'a BuilderConfig,
}

impl<'a> ChainBuilder<'a> {
    /// Creates a builder for the given configuration.
    pub fn new(config: &'a BuilderConfig) -> Self {
        Self { config }
    }

    /// Grows a chain until its total predicted cost reaches
    /// `config.target_cost`, or returns [`QnsError::SearchFailure`] if the
    /// total attempt budget is exhausted first.
    ///
    /// A head glink is always pushed first, unconditionally, even when
    /// `target_cost` is 0: its subgraph is sampled the same way every other
    /// glink's is, but its permutation is a full random bijection over the
    /// whole architecture graph (the circuit's initial qubit layout), not a
    /// swap sequence, so it contributes no cost.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GlinkChain> {
        let mut chain = GlinkChain::new(self.config.archgraph.clone());
        let predicate = GlinkPredicate::new(self.config.constants.vf2_call_limit);
        let source = PermutationSource::new(self.config.opt_type, &self.config.constants);
        let mut total_attempts = 0usize;

        let head_size = self.sample_subgraph_size(rng)?;
        let head_subgraph = self.config.archgraph.random_subgraph(head_size, rng)?;
        let head_permutation = Permutation::random(&self.config.archgraph.nodes(), rng)?;
        chain.push(Glink::new(head_subgraph, head_permutation, 0));

        while chain.total_cost() < self.config.target_cost {
            let remaining_cost = self.config.target_cost - chain.total_cost();
            let glink = self.next_glink(&chain, &predicate, &source, remaining_cost, rng, &mut total_attempts)?;
            debug!(cost = glink.cost(), total = chain.total_cost() + glink.cost(), "accepted glink");
            chain.push(glink);
        }
        Ok(chain)
    }

    fn sample_subgraph_size<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        let max_edges = self.config.archgraph.num_edges();
        if max_edges == 0 {
            return Err(QnsError::construction("architecture graph has no edges to draw from"));
        }
        let normal = Normal::new(self.config.subgraph_size as f64, self.config.constants.subgraph_size_std)
            .map_err(|e| QnsError::construction(e.to_string()))?;
        Ok(normal.sample(rng).round().clamp(1.0, max_edges as f64) as usize)
    }

    fn next_glink<R: Rng + ?Sized>(
        &self,
        chain: &GlinkChain,
        predicate: &GlinkPredicate,
        source: &PermutationSource<'_>,
        remaining_cost: usize,
        rng: &mut R,
        total_attempts: &mut usize,
    ) -> Result<Glink> {
        loop {
            let sampled_size = self.sample_subgraph_size(rng)?;

            let mut patience = 0;
            loop {
                *total_attempts += 1;
                if *total_attempts > self.config.constants.max_total_attempts {
                    return Err(QnsError::SearchFailure(*total_attempts));
                }

                let subgraph = self.config.archgraph.random_subgraph(sampled_size, rng)?;
                let draw = source.draw(&self.config.archgraph, remaining_cost, rng)?;
                let predecessor = chain.predecessor_subgraph();

                if predicate.is_strong(&subgraph, &draw.permutation, predecessor, &self.config.archgraph) {
                    return Ok(Glink::new(subgraph, draw.permutation, draw.cost));
                }

                trace!(attempt = *total_attempts, patience, "rejected candidate glink");
                patience += 1;
                if patience >= self.config.constants.glink_search_patience {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qns_core::archgraphs;
    use qns_core::config::{subgraph_size, OptType, RuntimeConstants};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(target_cost: usize, opt_type: OptType) -> BuilderConfig {
        BuilderConfig::new(opt_type, target_cost, archgraphs::grid(3, 3), subgraph_size::SMALL.min(4), 1.5)
    }

    #[test]
    fn test_build_reaches_target_cost() {
        let cfg = config(3, OptType::Opt1);
        let builder = ChainBuilder::new(&cfg);
        let mut rng = StdRng::seed_from_u64(42);
        let chain = builder.build(&mut rng).unwrap();
        assert!(chain.total_cost() >= cfg.target_cost);
        assert!(!chain.is_empty());
    }

    #[test]
    fn test_build_is_deterministic_given_seed() {
        let cfg = config(4, OptType::Depth);
        let builder = ChainBuilder::new(&cfg);
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let chain_a = builder.build(&mut rng_a).unwrap();
        let chain_b = builder.build(&mut rng_b).unwrap();
        assert_eq!(chain_a.total_cost(), chain_b.total_cost());
        assert_eq!(chain_a.len(), chain_b.len());
    }

    #[test]
    fn test_zero_target_cost_still_produces_a_head_glink() {
        let cfg = config(0, OptType::Opt1);
        let builder = ChainBuilder::new(&cfg);
        let mut rng = StdRng::seed_from_u64(2);
        let chain = builder.build(&mut rng).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.total_cost(), 0);
        assert_eq!(chain.links()[0].cost(), 0);
    }

    #[test]
    fn test_oversized_subgraph_size_clamps_to_archgraph_edge_count() {
        let archgraph = archgraphs::grid(3, 3);
        let max_edges = archgraph.num_edges();
        let mut cfg = BuilderConfig::new(OptType::Opt1, 0, archgraph, max_edges * 10, 0.1);
        cfg.constants.subgraph_size_std = 0.1;
        let builder = ChainBuilder::new(&cfg);
        let mut rng = StdRng::seed_from_u64(9);
        let chain = builder.build(&mut rng).unwrap();
        assert!(chain.links()[0].subgraph().num_edges() <= max_edges);
    }

    #[test]
    fn test_opt2_build_never_overshoots_target_cost() {
        let cfg = config(5, OptType::Opt2);
        let builder = ChainBuilder::new(&cfg);
        let mut rng = StdRng::seed_from_u64(17);
        let chain = builder.build(&mut rng).unwrap();
        assert_eq!(chain.total_cost(), cfg.target_cost);
    }

    #[test]
    fn test_search_failure_when_attempt_budget_too_small() {
        let mut cfg = config(100, OptType::Opt1);
        cfg.constants.max_total_attempts = 1;
        let builder = ChainBuilder::new(&cfg);
        let mut rng = StdRng::seed_from_u64(1);
        let result = builder.build(&mut rng);
        assert!(matches!(result, Err(QnsError::SearchFailure(_))));
    }
}
