//! Renders a [`Circuit`] to OpenQASM 2.0 text.
//!
//! Grounded on `original_source/config.py`'s `ONE_QUBIT_GATE = HGate()` /
//! `TWO_QUBIT_GATE = CXGate()` and `original_source/main.py`'s use of
//! `qiskit.qasm2.dump` to export generated circuits: the one-qubit gate
//! alphabet is a Hadamard (`h`), the two-qubit gate alphabet a CNOT (`cx`).

use qns_core::types::{Circuit, Gate};

use crate::error::{QasmError, Result};

const HEADER: &str = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\n";

/// Renders `circuit` as an OpenQASM 2.0 program using a single register
/// named `q`. `Gate::Barrier` emits a QASM `barrier` spanning every qubit.
pub fn to_qasm2(circuit: &Circuit) -> Result<String> {
    if circuit.num_qubits() == 0 {
        return Err(QasmError::EmitError("circuit has no qubits".to_string()));
    }

    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str(&format!("qreg q[{}];\n", circuit.num_qubits()));

    for gate in circuit.gates() {
        match gate {
            Gate::OneQubit(q) => out.push_str(&format!("h q[{q}];\n")),
            Gate::TwoQubit(a, b) => out.push_str(&format!("cx q[{a}],q[{b}];\n")),
            Gate::Barrier => out.push_str(&barrier_line(circuit.num_qubits())),
        }
    }

    Ok(out)
}

fn barrier_line(num_qubits: usize) -> String {
    let qubits = (0..num_qubits).map(|q| format!("q[{q}]")).collect::<Vec<_>>().join(",");
    format!("barrier {qubits};\n")
}
