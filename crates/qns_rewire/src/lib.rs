//! # QNS Rewire
//!
//! Builds QUEKNO-style synthetic routing-benchmark circuits: a sequence
//! of `(subgraph, permutation)` glinks whose composition has a
//! known-by-construction optimal SWAP/depth routing cost, assembled into
//! a circuit and independently re-verified before being handed back.
//!
//! ```rust
//! use qns_core::prelude::*;
//! use qns_rewire::QueknoBuilder;
//! use rand::SeedableRng;
//!
//! let archgraph = qns_core::archgraphs::grid(3, 3);
//! let config = BuilderConfig::new(OptType::Opt1, 3, archgraph, subgraph_size::SMALL.min(4), qbg_ratio::TFL);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let output = QueknoBuilder::new(&config).run(&mut rng).unwrap();
//! assert!(output.metrics.predicted_cost >= config.target_cost);
//! assert_eq!(output.metrics.gate_cost, output.metrics.predicted_cost);
//! ```

pub mod assembler;
pub mod builder;
pub mod chain_builder;
pub mod glink;
pub mod metrics;
pub mod perm_source;
pub mod predicate;
pub mod self_router;

pub use assembler::CircuitAssembler;
pub use builder::{BuildOutput, QueknoBuilder};
pub use chain_builder::ChainBuilder;
pub use glink::{Glink, GlinkChain};
pub use metrics::Metrics;
pub use perm_source::{Draw, PermutationSource};
pub use predicate::GlinkPredicate;
