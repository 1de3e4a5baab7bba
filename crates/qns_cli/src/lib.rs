//! # QNS CLI
//!
//! Command-line driver for the QUEKNO-style routing-benchmark generator.
//!
//! ```rust
//! use qns_cli::sweep::{SweepGrid, SweepPoint};
//! use qns_core::config::OptType;
//!
//! let grid = SweepGrid {
//!     opt_types: vec![OptType::Opt1],
//!     target_costs: vec![1, 2],
//!     qbg_ratios: vec![1.5],
//!     subgraph_sizes: vec![8],
//!     repeats: 2,
//! };
//! let points: Vec<SweepPoint> = grid.points().collect();
//! assert_eq!(points.len(), 4);
//! ```

pub mod sweep;
