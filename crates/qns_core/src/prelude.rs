//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use qns_core::prelude::*;
//! ```

pub use crate::archgraphs;
pub use crate::config::{qbg_ratio, subgraph_size, BuilderConfig, OptType, RuntimeConstants};
pub use crate::error::{QnsError, Result};
pub use crate::types::{Circuit, Edge, Gate, Graph, Node, Permutation, PermutationMode};
