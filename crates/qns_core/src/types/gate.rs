//! The opaque gate alphabet a built circuit is assembled from.
//!
//! Unlike the teacher's twelve-variant gate enum with matrix semantics, the
//! routing-benchmark alphabet per spec.md §4.5 is opaque: a one-qubit gate,
//! a two-qubit gate, and a barrier marker. No unitary, angle or inverse is
//! ever attached — a generated circuit exists to be routed, not simulated.

use serde::{Deserialize, Serialize};

/// One entry in a built circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// An opaque one-qubit gate (spec.md's fixed `ONE_QUBIT_GATE`).
    OneQubit(usize),
    /// An opaque two-qubit gate (spec.md's fixed `TWO_QUBIT_GATE`), acting
    /// on the given pair in the order supplied.
    TwoQubit(usize, usize),
    /// A barrier separating one glink's contribution from the next, used
    /// only when `BuilderConfig::add_barriers` is set.
    Barrier,
}

impl Gate {
    /// Returns the qubit indices this gate operates on (empty for a
    /// barrier).
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::OneQubit(q) => vec![*q],
            Gate::TwoQubit(a, b) => vec![*a, *b],
            Gate::Barrier => Vec::new(),
        }
    }

    /// True for [`Gate::OneQubit`].
    pub fn is_one_qubit(&self) -> bool {
        matches!(self, Gate::OneQubit(_))
    }

    /// True for [`Gate::TwoQubit`].
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::TwoQubit(_, _))
    }

    /// True for [`Gate::Barrier`].
    pub fn is_barrier(&self) -> bool {
        matches!(self, Gate::Barrier)
    }

    /// Remaps the qubits this gate acts on using `mapping[old] = new`.
    /// A barrier is returned unchanged.
    pub fn map_qubits(&self, mapping: &[usize]) -> Gate {
        match self {
            Gate::OneQubit(q) => Gate::OneQubit(mapping[*q]),
            Gate::TwoQubit(a, b) => Gate::TwoQubit(mapping[*a], mapping[*b]),
            Gate::Barrier => Gate::Barrier,
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::OneQubit(q) => write!(f, "1q({q})"),
            Gate::TwoQubit(a, b) => write!(f, "2q({a}, {b})"),
            Gate::Barrier => write!(f, "barrier"),
        }
    }
}
