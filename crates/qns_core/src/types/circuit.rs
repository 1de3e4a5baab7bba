//! The gate sequence a [`super::graph::Graph`]-targeted build assembles.
//!
//! Grounded on the teacher's `CircuitGenome` for the shape (a flat gate
//! list plus derived `depth()`/`gate_count()` accessors) adapted to the
//! narrower three-variant `Gate` alphabet spec.md §4.5 and §4.6 assemble
//! circuits from.

use serde::{Deserialize, Serialize};

use super::gate::Gate;

/// A flat, ordered gate sequence over a fixed number of qubits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates an empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    /// Number of qubits this circuit is defined over.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The gate sequence, in program order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Appends a single gate.
    pub fn push(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Appends every gate in `gates`, in order.
    pub fn extend(&mut self, gates: impl IntoIterator<Item = Gate>) {
        self.gates.extend(gates);
    }

    /// Total number of non-barrier gates.
    pub fn gate_count(&self) -> usize {
        self.gates.iter().filter(|g| !g.is_barrier()).count()
    }

    /// Number of one-qubit gates.
    pub fn one_qubit_gate_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_one_qubit()).count()
    }

    /// Number of two-qubit gates.
    pub fn two_qubit_gate_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Circuit depth: the length of the longest qubit-dependency chain. A
    /// barrier synchronises every qubit to the current maximum depth.
    pub fn depth(&self) -> usize {
        let mut layer_of_qubit = vec![0usize; self.num_qubits];
        for gate in &self.gates {
            match gate {
                Gate::Barrier => {
                    let max_layer = layer_of_qubit.iter().copied().max().unwrap_or(0);
                    layer_of_qubit.iter_mut().for_each(|l| *l = max_layer);
                }
                _ => {
                    let qubits = gate.qubits();
                    let layer = qubits.iter().map(|&q| layer_of_qubit[q]).max().unwrap_or(0) + 1;
                    for q in qubits {
                        layer_of_qubit[q] = layer;
                    }
                }
            }
        }
        layer_of_qubit.into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::new(3);
        assert_eq!(circuit.gate_count(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_gate_counts() {
        let mut circuit = Circuit::new(3);
        circuit.extend([Gate::OneQubit(0), Gate::TwoQubit(0, 1), Gate::OneQubit(2)]);
        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.one_qubit_gate_count(), 2);
        assert_eq!(circuit.two_qubit_gate_count(), 1);
    }

    #[test]
    fn test_depth_sequential_on_same_qubit() {
        let mut circuit = Circuit::new(1);
        circuit.extend([Gate::OneQubit(0), Gate::OneQubit(0), Gate::OneQubit(0)]);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_depth_parallel_on_disjoint_qubits() {
        let mut circuit = Circuit::new(2);
        circuit.extend([Gate::OneQubit(0), Gate::OneQubit(1)]);
        assert_eq!(circuit.depth(), 1);
    }

    #[test]
    fn test_depth_two_qubit_gate_synchronises() {
        let mut circuit = Circuit::new(3);
        circuit.extend([Gate::OneQubit(0), Gate::TwoQubit(0, 2), Gate::OneQubit(2)]);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_barrier_synchronises_every_qubit() {
        let mut circuit = Circuit::new(2);
        circuit.extend([Gate::OneQubit(0), Gate::Barrier, Gate::OneQubit(1)]);
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.gate_count(), 2);
    }
}
