//! # QNS Core
//!
//! Core value types shared by the QUEKNO routing-benchmark generator:
//! - `Node` / `Edge`: labelled graph vertex and unordered-pair identities
//! - `Graph`: undirected simple graph with subgraph/node/edge sampling and
//!   the node-pair permutation used to grow a glink chain
//! - `Permutation`: map-mode and swap-mode node permutations
//! - `Gate` / `Circuit`: the three-label opaque gate alphabet and the
//!   circuit it assembles into
//! - `archgraphs`: a handful of fixed and parameterised architecture graphs
//! - `QnsError`: unified error type
//!
//! ## Example
//!
//! ```rust
//! use qns_core::prelude::*;
//!
//! let ag = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)]).unwrap();
//! assert_eq!(ag.num_nodes(), 4);
//! assert!(ag.has_edge(Node::new(0), Node::new(1)));
//! ```

pub mod archgraphs;
pub mod config;
pub mod error;
pub mod prelude;
pub mod types;

pub use error::{QnsError, Result};
pub use types::{Circuit, Edge, Gate, Graph, Node, Permutation, PermutationMode};
