//! *n*-qubit stabilizer states in the Aaronson-Gottesman tableau
//! representation.
//!
//! A pure stabilizer state on *n* qubits is identified not by its 2<sup>*n*</sup>
//! complex amplitudes but by the *n* independent, mutually commuting Pauli
//! operators that stabilize it. Following [arXiv:quant-ph/0406196][tableau],
//! the *n* stabilizers are stored alongside *n* "destabilizers", which together
//! generate the full *n*-qubit Pauli group. Row *i* < *n* is the *i*-th
//! destabilizer and row *n* + *i* is the *i*-th stabilizer, and the rows always
//! satisfy the canonical commutation pattern:
//! - stabilizers commute pairwise;
//! - destabilizer *i* anticommutes with stabilizer *i* and commutes with every
//!   other row.
//!
//! Each row is a [`PauliRow`], so the full state costs 2*n* (2*n* + 1) bits.
//! The gate rules live in [`gate`][crate::gate] and the measurement protocol in
//! [`measure`][crate::measure].
//!
//! # Example
//! ```
//! use gk_sim::{ gate::Gate, tableau::Tableau };
//!
//! // initialize a new state to ∣000⟩
//! let mut tab = Tableau::new(3);
//!
//! // generate a Bell state on qubits 0, 1
//! tab.apply_gate(Gate::H(0)).unwrap();
//! tab.apply_gate(Gate::CX(0, 1)).unwrap();
//!
//! // stabilizer | destabilizer
//! assert_eq!(
//!     format!("{:#}", tab.as_group()),
//!     "+XX. | +Z..\n+ZZ. | +.X.\n+..Z | +..X",
//! );
//! ```
//!
//! [tableau]: https://arxiv.org/abs/quant-ph/0406196

use std::fmt;
use crate::{
    error::{ SimError, SimResult },
    pauli::{ NPauli, Pauli, PauliRow, PW },
};

/// A stabilizer state of a fixed register of qubits, identified by its
/// stabilizer and destabilizer generators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tableau {
    pub(crate) n: usize,
    // 2n rows: destabilizers first, then stabilizers
    pub(crate) rows: Vec<PauliRow>,
}

impl Tableau {
    /// Create a new stabilizer state of size `n` initialized to ∣0...0⟩.
    pub fn new(n: usize) -> Self {
        let rows: Vec<PauliRow>
            = (0..n).map(|i| PauliRow::single(n, i, Pauli::X))
            .chain((0..n).map(|i| PauliRow::single(n, i, Pauli::Z)))
            .collect();
        Self { n, rows }
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    pub(crate) fn check_qubit(&self, k: usize) -> SimResult<()> {
        if k < self.n {
            Ok(())
        } else {
            Err(SimError::InvalidQubit { qubit: k, n: self.n })
        }
    }

    /// Return a reference to the `i`-th row, `0 ≤ i < 2n`.
    ///
    /// *Panics if `i` is out of bounds.*
    pub fn row(&self, i: usize) -> &PauliRow { &self.rows[i] }

    /// Return a reference to the `i`-th destabilizer.
    ///
    /// *Panics if `i >= n`.*
    pub fn destab(&self, i: usize) -> &PauliRow {
        assert!(i < self.n, "Tableau::destab: index out of bounds");
        &self.rows[i]
    }

    /// Return a reference to the `i`-th stabilizer.
    ///
    /// *Panics if `i >= n`.*
    pub fn stab(&self, i: usize) -> &PauliRow {
        assert!(i < self.n, "Tableau::stab: index out of bounds");
        &self.rows[self.n + i]
    }

    /// Iterate over all 2*n* rows, destabilizers first.
    pub fn rows(&self) -> impl Iterator<Item = &PauliRow> + '_ {
        self.rows.iter()
    }

    /// Overwrite the `i`-th row.
    ///
    /// This does not check the tableau invariants.
    ///
    /// *Panics if `i` is out of bounds or `row` has the wrong width.*
    pub fn replace_row(&mut self, i: usize, row: PauliRow) -> &mut Self {
        assert_eq!(
            row.n, self.n, "Tableau::replace_row: row width mismatch");
        self.rows[i] = row;
        self
    }

    /// Swap rows `a` and `b`.
    ///
    /// This does not check the tableau invariants.
    ///
    /// *Panics if either index is out of bounds.*
    pub fn swap_rows(&mut self, a: usize, b: usize) -> &mut Self {
        self.rows.swap(a, b);
        self
    }

    /// Return `true` if the rows satisfy the canonical commutation pattern and
    /// are linearly independent, i.e. if `self` encodes a valid pure stabilizer
    /// state.
    pub fn is_valid(&self) -> bool {
        self.rows.len() == 2 * self.n
            && self.rows.iter().all(|row| row.n == self.n)
            && self.commutation_ok()
            && self.rank() == 2 * self.n
    }

    fn commutation_ok(&self) -> bool {
        let n = self.n;
        for i in 0..2 * n {
            for j in i + 1..2 * n {
                let anti: bool = j == i + n;
                if self.rows[i].commutes_with(&self.rows[j]) == anti {
                    return false;
                }
            }
        }
        true
    }

    // rank over GF(2) of the 2n rows as vectors in GF(2)^(2n)
    fn rank(&self) -> usize {
        let n = self.n;
        let mut vecs: Vec<(Vec<u32>, Vec<u32>)>
            = self.rows.iter()
            .map(|row| (row.x.clone(), row.z.clone()))
            .collect();
        let mut rank: usize = 0;
        for col in 0..2 * n {
            let j: usize = if col < n { col } else { col - n };
            let j5: usize = j >> 5;
            let pw: u32 = PW[j & 31];
            let bit = |v: &(Vec<u32>, Vec<u32>)| -> bool {
                if col < n { v.0[j5] & pw != 0 } else { v.1[j5] & pw != 0 }
            };
            let Some(piv) = (rank..vecs.len()).find(|k| bit(&vecs[*k]))
                else { continue; };
            vecs.swap(rank, piv);
            let (head, tail) = vecs.split_at_mut(rank + 1);
            let pivot = &head[rank];
            for v in tail.iter_mut() {
                if bit(&*v) {
                    v.0.iter_mut().zip(&pivot.0).for_each(|(a, b)| { *a ^= *b; });
                    v.1.iter_mut().zip(&pivot.1).for_each(|(a, b)| { *a ^= *b; });
                }
            }
            rank += 1;
        }
        rank
    }

    /// Convert `self` to a more human-readable stabilizer/destabilizer group
    /// representation.
    pub fn as_group(&self) -> StabGroup {
        let destab: Vec<NPauli>
            = self.rows.iter().take(self.n).map(PauliRow::to_npauli).collect();
        let stab: Vec<NPauli>
            = self.rows.iter().skip(self.n).map(PauliRow::to_npauli).collect();
        StabGroup { stab, destab }
    }

    /// Rebuild a tableau from a stabilizer/destabilizer group, e.g. one
    /// produced by [`Self::as_group`] in an earlier run.
    ///
    /// Returns `None` if the group does not describe a valid pure stabilizer
    /// state.
    pub fn from_group(group: &StabGroup) -> Option<Self> {
        let n = group.stab.len();
        if group.destab.len() != n
            || group.destab.iter().chain(&group.stab).any(|g| g.ops.len() != n)
        {
            return None;
        }
        let rows: Vec<PauliRow>
            = group.destab.iter().chain(&group.stab).map(PauliRow::from).collect();
        let tab = Self { n, rows };
        tab.is_valid().then_some(tab)
    }
}

/// The complete `n`-qubit stabilizer/destabilizer groups for a given state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StabGroup {
    pub stab: Vec<NPauli>,
    pub destab: Vec<NPauli>,
}

impl fmt::Display for StabGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.stab.len();
        for (k, (stab, destab)) in
            self.stab.iter().zip(&self.destab).enumerate()
        {
            stab.fmt(f)?;
            write!(f, " | ")?;
            destab.fmt(f)?;
            if k < n - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}
