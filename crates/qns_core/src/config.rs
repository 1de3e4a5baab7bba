//! Builder configuration for the QUEKNO routing-benchmark generator.

use serde::{Deserialize, Serialize};

use crate::types::Graph;

/// Selects the permutation-source regime and cost accounting (spec.md §6).
///
/// The teacher sources carry two inconsistent `OptType` definitions (one
/// string-valued, one numeric-valued) across files; per spec.md §9 only the
/// three-variant meaning is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptType {
    /// Single-swap glinks (gate-count objective).
    Opt1,
    /// One-or-two consecutive-swap glinks (gate-count objective).
    Opt2,
    /// Parallel non-overlapping swap layers (depth objective).
    Depth,
}

impl std::fmt::Display for OptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OptType::Opt1 => "opt1",
            OptType::Opt2 => "opt2",
            OptType::Depth => "depth",
        };
        write!(f, "{s}")
    }
}

/// Runtime constants tunable independently of a particular build request
/// (spec.md §6 "Runtime constants" table).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConstants {
    /// Gaussian standard deviation for subgraph-edge-count sampling.
    pub subgraph_size_std: f64,
    /// Variance term in the back-two-qubit-gate count.
    pub rand_edges_var: f64,
    /// Bias toward pairing swaps in the opt2 regime.
    pub consec_swaps_bias: f64,
    /// Attempts per candidate subgraph before regenerating it.
    pub glink_search_patience: usize,
    /// Isomorphism-matcher call budget.
    pub vf2_call_limit: usize,
    /// Hard cap on total `next_glink` attempts across a whole build, after
    /// which `SearchFailure` is raised instead of looping forever. This is
    /// an extension beyond spec.md §7's "a driver may cap wall time" note,
    /// so that a build is guaranteed to terminate without an external timer.
    pub max_total_attempts: usize,
}

impl Default for RuntimeConstants {
    fn default() -> Self {
        Self {
            subgraph_size_std: 10.0,
            rand_edges_var: 0.05,
            consec_swaps_bias: 0.0,
            glink_search_patience: 10,
            vf2_call_limit: 10_000,
            max_total_attempts: 10_000,
        }
    }
}

/// The five required builder options of spec.md §6, plus the tunable
/// runtime constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Selects the permutation-source regime and cost accounting.
    pub opt_type: OptType,
    /// Intended routing cost of the generated circuit.
    pub target_cost: usize,
    /// The architecture graph (AG).
    pub archgraph: Graph,
    /// Mean number of edges per subgraph (TOKYO=5, SMALL=8, LARGE=16).
    pub subgraph_size: usize,
    /// Target one-qubit / two-qubit gate ratio (TFL≈1.5, QSE≈2.55).
    pub qbg_ratio: f64,
    /// Whether to emit a barrier marker between glinks.
    pub add_barriers: bool,
    /// Tunable runtime constants.
    #[serde(default)]
    pub constants: RuntimeConstants,
}

/// Named `subgraph_size` presets from spec.md §6.
pub mod subgraph_size {
    /// Mean subgraph size tuned for the 20-qubit Tokyo architecture.
    pub const TOKYO: usize = 5;
    /// Small mean subgraph size.
    pub const SMALL: usize = 8;
    /// Large mean subgraph size.
    pub const LARGE: usize = 16;
}

/// Named `qbg_ratio` presets from spec.md §6.
pub mod qbg_ratio {
    /// Transpiled-from-literature ratio (≈1.5).
    pub const TFL: f64 = 1.5;
    /// QSE-derived ratio (≈2.55).
    pub const QSE: f64 = 2.55;
}

impl BuilderConfig {
    /// Creates a new config with default runtime constants.
    pub fn new(
        opt_type: OptType,
        target_cost: usize,
        archgraph: Graph,
        subgraph_size: usize,
        qbg_ratio: f64,
    ) -> Self {
        Self {
            opt_type,
            target_cost,
            archgraph,
            subgraph_size,
            qbg_ratio,
            add_barriers: false,
            constants: RuntimeConstants::default(),
        }
    }

    /// Loads configuration from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Serializes configuration to a JSON string.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Graph;

    #[test]
    fn test_default_constants() {
        let constants = RuntimeConstants::default();
        assert_eq!(constants.glink_search_patience, 10);
        assert_eq!(constants.vf2_call_limit, 10_000);
    }

    #[test]
    fn test_json_roundtrip() {
        let ag = Graph::from_edges(&[(0, 1), (1, 2)]).unwrap();
        let config = BuilderConfig::new(OptType::Opt1, 3, ag, subgraph_size::SMALL, qbg_ratio::TFL);
        let json = config.to_json().unwrap();
        let parsed = BuilderConfig::from_json(&json).unwrap();

        assert_eq!(config.target_cost, parsed.target_cost);
        assert_eq!(config.opt_type, parsed.opt_type);
    }

    #[test]
    fn test_opt_type_display() {
        assert_eq!(OptType::Opt1.to_string(), "opt1");
        assert_eq!(OptType::Depth.to_string(), "depth");
    }
}
