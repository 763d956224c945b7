//! Efficient simulation of Clifford circuits on registers of qubits via the
//! Gottesman-Knill theorem.
//!
//! States are tracked as stabilizer tableaux rather than amplitude vectors,
//! so a circuit of *m* operations on *n* qubits runs in *O*(*m* *n*<sup>2</sup>)
//! time and *O*(*n*<sup>2</sup>) space. Only Clifford-group transformations
//! (Hadamard, Pauli, S, S<sup>†</sup>, CNOT, and CZ) and Z-basis measurements
//! are supported; anything else is rejected with
//! [`SimError::UnsupportedGate`][error::SimError::UnsupportedGate].
//!
//! # Example
//! ```
//! use gk_sim::{ circuit::Circuit, shots::{ sample, ShotConfig } };
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(0).cx(0, 1).measure_all();
//!
//! let config = ShotConfig { shots: Some(200), seed: Some(1), ..Default::default() };
//! let result = sample(&circuit, &config).unwrap();
//! for (register, _count) in result.sorted_counts() {
//!     assert!(register == "00" || register == "11");
//! }
//! ```

pub mod error;
pub mod pauli;
pub mod tableau;
pub mod gate;
pub mod measure;
pub mod circuit;
pub mod shots;
