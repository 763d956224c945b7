//! Building circuits as ordered operation lists and driving them through a
//! [`Tableau`].
//!
//! # Example
//! ```
//! use gk_sim::circuit::Circuit;
//!
//! let mut circuit = Circuit::new(3);
//! circuit.h(0).cx(0, 1).cx(0, 2).measure_all();
//!
//! let record = circuit.run(Some(10546)).unwrap();
//! let bits = record.bits();
//! assert_eq!(bits.len(), 3);
//! assert!(bits.iter().all(|b| *b == bits[0]));
//! ```

use std::fmt;
use itertools::Itertools;
use rand::{ rngs::StdRng, SeedableRng };
use tracing::{ debug, trace, warn };
use crate::{
    error::SimResult,
    gate::Gate,
    measure::Outcome,
    tableau::{ StabGroup, Tableau },
};

/// A single step of a circuit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Apply a gate.
    Gate(Gate),
    /// Projectively measure a qubit in the Z-basis.
    Measure(usize),
}

impl From<Gate> for Operation {
    fn from(gate: Gate) -> Self { Self::Gate(gate) }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gate(gate) => gate.fmt(f),
            Self::Measure(k) => write!(f, "M({})", k),
        }
    }
}

/// An ordered list of [`Operation`]s on a declared number of qubits.
///
/// Qubit indices are not checked until the circuit is run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Circuit {
    n: usize,
    ops: Vec<Operation>,
}

impl IntoIterator for Circuit {
    type Item = Operation;
    type IntoIter = <Vec<Operation> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.ops.into_iter() }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Operation;
    type IntoIter = <&'a Vec<Operation> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.ops.iter() }
}

macro_rules! single_qubit_ops {
    ( $( $name:ident, $name_all:ident => $gate:ident ($doc:literal) );* $(;)? )
    => {
        $(
            #[doc = concat!("Append ", $doc, " on qubit `k`.")]
            pub fn $name(&mut self, k: usize) -> &mut Self {
                self.ops.push(Operation::Gate(Gate::$gate(k)));
                self
            }

            #[doc = concat!("Append ", $doc, " on every qubit.")]
            pub fn $name_all(&mut self) -> &mut Self {
                let n = self.n;
                self.ops.extend((0..n).map(|k| Operation::Gate(Gate::$gate(k))));
                self
            }
        )*
    }
}

impl Circuit {
    /// Create an empty circuit on `n` qubits.
    pub fn new(n: usize) -> Self { Self { n, ops: Vec::new() } }

    /// Create a circuit on `n` qubits from a list of operations.
    pub fn from_ops<I>(n: usize, ops: I) -> Self
    where I: IntoIterator<Item = Operation>
    {
        Self { n, ops: ops.into_iter().collect() }
    }

    /// Return the declared number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the operations in order.
    pub fn ops(&self) -> &[Operation] { &self.ops }

    pub fn len(&self) -> usize { self.ops.len() }

    pub fn is_empty(&self) -> bool { self.ops.is_empty() }

    /// Return the number of measurements in `self`.
    pub fn num_measurements(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Operation::Measure(..))).count()
    }

    /// Append an operation.
    pub fn push<O>(&mut self, op: O) -> &mut Self
    where O: Into<Operation>
    {
        self.ops.push(op.into());
        self
    }

    single_qubit_ops!(
        h, h_all => H ("a Hadamard gate");
        x, x_all => X ("an X gate");
        y, y_all => Y ("a Y gate");
        z, z_all => Z ("a Z gate");
        s, s_all => S ("an S gate");
        sdg, sdg_all => SInv ("an S<sup>†</sup> gate");
        t, t_all => T ("a T gate");
        tdg, tdg_all => TInv ("a T<sup>†</sup> gate");
    );

    /// Append a Z-basis measurement on qubit `k`.
    pub fn measure(&mut self, k: usize) -> &mut Self {
        self.ops.push(Operation::Measure(k));
        self
    }

    /// Append a Z-basis measurement on every qubit, in ascending order.
    pub fn measure_all(&mut self) -> &mut Self {
        let n = self.n;
        self.ops.extend((0..n).map(Operation::Measure));
        self
    }

    /// Append a CNOT gate with control `c` and target `t`.
    pub fn cx(&mut self, c: usize, t: usize) -> &mut Self {
        self.ops.push(Operation::Gate(Gate::CX(c, t)));
        self
    }

    /// Append a CZ gate on qubits `a` and `b`.
    pub fn cz(&mut self, a: usize, b: usize) -> &mut Self {
        self.ops.push(Operation::Gate(Gate::CZ(a, b)));
        self
    }

    /// Append a Toffoli gate with controls `c0`, `c1` and target `t`.
    pub fn ccx(&mut self, c0: usize, c1: usize, t: usize) -> &mut Self {
        self.ops.push(Operation::Gate(Gate::CCX(c0, c1, t)));
        self
    }

    /// Run `self` once from ∣0...0⟩, optionally seeding the random number
    /// generator.
    pub fn run(&self, seed: Option<u64>) -> SimResult<Record> {
        let mut exec = Executor::new(self.n, seed);
        exec.run(self)?;
        let (_, record) = exec.into_parts();
        Ok(record)
    }

    /// Like [`Self::run`], but also return the final stabilizer group.
    pub fn run_with_group(&self, seed: Option<u64>)
        -> SimResult<(Record, StabGroup)>
    {
        let mut exec = Executor::new(self.n, seed);
        exec.run(self)?;
        let group = exec.group();
        let (_, record) = exec.into_parts();
        Ok((record, group))
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.n, self.ops.iter().join(" "))
    }
}

/// Measurement results accumulated over a single run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Every outcome, in the order the measurements occurred.
    pub outcomes: Vec<Outcome>,
    /// The qubit targeted by each measurement.
    pub targets: Vec<usize>,
    // most recent outcome on each qubit; `false` if never measured
    register: Vec<bool>,
}

impl Record {
    /// Create an empty record for `n` qubits.
    pub fn new(n: usize) -> Self {
        Self { outcomes: Vec::new(), targets: Vec::new(), register: vec![false; n] }
    }

    fn push(&mut self, k: usize, outcome: Outcome) {
        self.outcomes.push(outcome);
        self.targets.push(k);
        self.register[k] = outcome.is_1();
    }

    /// Return the number of measurements recorded.
    pub fn len(&self) -> usize { self.outcomes.len() }

    pub fn is_empty(&self) -> bool { self.outcomes.is_empty() }

    /// Return the outcome bits in measurement order.
    pub fn bits(&self) -> Vec<u8> {
        self.outcomes.iter().map(Outcome::bit).collect()
    }

    /// Return the per-qubit result register as a string of `0`s and `1`s,
    /// qubit 0 first. Each qubit shows its most recent outcome, or `0` if it
    /// was never measured.
    pub fn register(&self) -> String {
        self.register.iter().map(|b| if *b { '1' } else { '0' }).collect()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.register())
    }
}

/// Main driver for running a circuit on a single stabilizer state.
///
/// Operations are applied strictly in order; if one fails, execution halts
/// there and everything before it stays applied.
#[derive(Clone, Debug)]
pub struct Executor {
    state: Tableau,
    // sized to `state`
    record: Record,
    rng: StdRng,
}

impl Executor {
    /// Create a new `Executor` for `n` qubits, with state initialized to
    /// ∣0...0⟩ and no recorded outcomes. Optionally also seed the internal
    /// random number generator.
    pub fn new(n: usize, seed: Option<u64>) -> Self {
        let rng
            = seed.map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_entropy);
        Self::with_rng(n, rng)
    }

    /// Like [`Self::new`], but with a caller-supplied generator.
    pub fn with_rng(n: usize, rng: StdRng) -> Self {
        Self::from_state(Tableau::new(n), rng)
    }

    /// Continue from an existing state, e.g. one rebuilt with
    /// [`Tableau::from_group`], with no recorded outcomes.
    pub fn from_state(state: Tableau, rng: StdRng) -> Self {
        let record = Record::new(state.num_qubits());
        Self { state, record, rng }
    }

    /// Return a reference to the current state.
    pub fn state(&self) -> &Tableau { &self.state }

    /// Return a reference to the outcomes recorded so far.
    pub fn record(&self) -> &Record { &self.record }

    /// Consume `self`, returning the final state and the recorded outcomes.
    pub fn into_parts(self) -> (Tableau, Record) { (self.state, self.record) }

    /// Apply a single operation, returning the outcome if it was a
    /// measurement.
    pub fn apply(&mut self, op: Operation) -> SimResult<Option<Outcome>> {
        match op {
            Operation::Gate(gate) => {
                self.state.apply_gate(gate)?;
                Ok(None)
            },
            Operation::Measure(k) => {
                let outcome = self.state.measure(k, &mut self.rng)?;
                trace!(
                    qubit = k,
                    bit = outcome.bit(),
                    random = outcome.is_rand(),
                    "measured"
                );
                self.record.push(k, outcome);
                Ok(Some(outcome))
            },
        }
    }

    /// Apply every operation in `circuit` in order, stopping at the first
    /// failure.
    pub fn run(&mut self, circuit: &Circuit) -> SimResult<&Record> {
        debug!(
            qubits = self.state.num_qubits(),
            ops = circuit.len(),
            "starting circuit run"
        );
        for (step, op) in circuit.ops.iter().enumerate() {
            if let Err(err) = self.apply(*op) {
                warn!(step, op = %op, error = %err, "circuit run halted");
                return Err(err);
            }
        }
        debug!(measurements = self.record.len(), "circuit run finished");
        Ok(&self.record)
    }

    /// Return the current stabilizer/destabilizer groups.
    pub fn group(&self) -> StabGroup { self.state.as_group() }
}
