//! OpenQASM 2.0 export for QNS-generated circuits.
//!
//! ```rust
//! use qns_core::types::{Circuit, Gate};
//! use qns_qasm::to_qasm2;
//!
//! let mut circuit = Circuit::new(2);
//! circuit.push(Gate::OneQubit(0));
//! circuit.push(Gate::TwoQubit(0, 1));
//! let qasm = to_qasm2(&circuit).unwrap();
//! assert!(qasm.contains("cx q[0],q[1];"));
//! ```

pub mod emit;
pub mod error;

pub use emit::to_qasm2;
pub use error::{QasmError, Result};
