//! Gates and their action on a [`Tableau`].
//!
//! Only gates in the Clifford group map every Pauli string to another Pauli
//! string under conjugation, so only those have an update rule here. Each rule
//! conjugates every one of the 2*n* rows in place, which is *O*(*n*) per gate.
//! Non-Clifford gates can still be described by [`Gate`] so that a circuit
//! containing them can be built, but [`Tableau::apply_gate`] rejects them.
//!
//! See also: <https://en.wikipedia.org/wiki/Clifford_gates>

use std::fmt;
use crate::{
    error::{ SimError, SimResult },
    pauli::PW,
    tableau::Tableau,
};

/// Description of a single gate for a register of qubits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard
    H(usize),
    /// π rotation about X
    X(usize),
    /// π rotation about Y
    Y(usize),
    /// π rotation about Z
    Z(usize),
    /// π/2 rotation about Z
    S(usize),
    /// −π/2 rotation about Z
    SInv(usize),
    /// Z-controlled π rotation about X.
    ///
    /// The first qubit index is the control.
    CX(usize, usize),
    /// Z-controlled π rotation about Z.
    CZ(usize, usize),
    /// π/4 rotation about Z (not Clifford)
    T(usize),
    /// −π/4 rotation about Z (not Clifford)
    TInv(usize),
    /// Doubly Z-controlled π rotation about X (not Clifford).
    ///
    /// The first two qubit indices are the controls.
    CCX(usize, usize, usize),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::H(k) => write!(f, "H({})", k),
            Self::X(k) => write!(f, "X({})", k),
            Self::Y(k) => write!(f, "Y({})", k),
            Self::Z(k) => write!(f, "Z({})", k),
            Self::S(k) => write!(f, "S({})", k),
            Self::SInv(k) => write!(f, "S†({})", k),
            Self::CX(a, b) => write!(f, "CX({}, {})", a, b),
            Self::CZ(a, b) => write!(f, "CZ({}, {})", a, b),
            Self::T(k) => write!(f, "T({})", k),
            Self::TInv(k) => write!(f, "T†({})", k),
            Self::CCX(a, b, c) => write!(f, "CCX({}, {}, {})", a, b, c),
        }
    }
}

impl Gate {
    /// Return `true` if `self` has an update rule in the tableau engine.
    pub fn is_clifford(&self) -> bool {
        !matches!(self, Self::T(..) | Self::TInv(..) | Self::CCX(..))
    }

    // qubit indices in argument order, padded to a fixed width
    fn qubit_buf(&self) -> ([usize; 3], usize) {
        match *self {
            Self::H(k)
            | Self::X(k)
            | Self::Y(k)
            | Self::Z(k)
            | Self::S(k)
            | Self::SInv(k)
            | Self::T(k)
            | Self::TInv(k)
            => ([k, 0, 0], 1),
            Self::CX(a, b)
            | Self::CZ(a, b)
            => ([a, b, 0], 2),
            Self::CCX(a, b, c) => ([a, b, c], 3),
        }
    }

    /// Iterate over the qubit indices `self` acts on, in argument order.
    pub fn qubits(&self) -> impl Iterator<Item = usize> {
        let (buf, len) = self.qubit_buf();
        buf.into_iter().take(len)
    }
}

impl Tableau {
    // check the gate can be applied before touching any rows
    fn check_gate(&self, gate: Gate) -> SimResult<()> {
        if !gate.is_clifford() {
            return Err(SimError::UnsupportedGate { gate });
        }
        let (buf, len) = gate.qubit_buf();
        let qubits = &buf[..len];
        for (i, &k) in qubits.iter().enumerate() {
            self.check_qubit(k)?;
            if qubits[..i].contains(&k) {
                return Err(SimError::InvalidQubit { qubit: k, n: self.n });
            }
        }
        Ok(())
    }

    /// Perform the action of a gate.
    ///
    /// Fails with [`SimError::UnsupportedGate`] for non-Clifford gates and with
    /// [`SimError::InvalidQubit`] if any qubit index is out of bounds or a
    /// two-qubit gate is given the same qubit twice. In either case no row is
    /// modified.
    pub fn apply_gate(&mut self, gate: Gate) -> SimResult<&mut Self> {
        self.check_gate(gate)?;
        match gate {
            Gate::H(k) => self.apply_h_unchecked(k),
            Gate::X(k) => self.apply_x_unchecked(k),
            Gate::Y(k) => self.apply_y_unchecked(k),
            Gate::Z(k) => self.apply_z_unchecked(k),
            Gate::S(k) => self.apply_s_unchecked(k),
            Gate::SInv(k) => self.apply_sinv_unchecked(k),
            Gate::CX(a, b) => self.apply_cnot_unchecked(a, b),
            Gate::CZ(a, b) => self.apply_cz_unchecked(a, b),
            Gate::T(..) | Gate::TInv(..) | Gate::CCX(..) => unreachable!(),
        };
        Ok(self)
    }

    /// Perform a series of gates, stopping at the first failure.
    ///
    /// Gates before the failing one remain applied.
    pub fn apply_circuit<'a, I>(&mut self, gates: I) -> SimResult<&mut Self>
    where I: IntoIterator<Item = &'a Gate>
    {
        gates.into_iter().copied()
            .try_for_each(|g| self.apply_gate(g).map(|_| ()))?;
        Ok(self)
    }

    /// Apply a Hadamard gate to the `k`-th qubit.
    pub fn apply_h(&mut self, k: usize) -> SimResult<&mut Self> {
        self.apply_gate(Gate::H(k))
    }

    /// Apply an X gate to the `k`-th qubit.
    pub fn apply_x(&mut self, k: usize) -> SimResult<&mut Self> {
        self.apply_gate(Gate::X(k))
    }

    /// Apply a Y gate to the `k`-th qubit.
    pub fn apply_y(&mut self, k: usize) -> SimResult<&mut Self> {
        self.apply_gate(Gate::Y(k))
    }

    /// Apply a Z gate to the `k`-th qubit.
    pub fn apply_z(&mut self, k: usize) -> SimResult<&mut Self> {
        self.apply_gate(Gate::Z(k))
    }

    /// Apply an S gate (= Z(π/2)) to the `k`-th qubit.
    pub fn apply_s(&mut self, k: usize) -> SimResult<&mut Self> {
        self.apply_gate(Gate::S(k))
    }

    /// Apply an S<sup>†</sup> gate (= Z(−π/2)) to the `k`-th qubit.
    pub fn apply_sinv(&mut self, k: usize) -> SimResult<&mut Self> {
        self.apply_gate(Gate::SInv(k))
    }

    /// Apply a CNOT gate to the `b`-th qubit, with the `a`-th qubit as control.
    pub fn apply_cnot(&mut self, a: usize, b: usize) -> SimResult<&mut Self> {
        self.apply_gate(Gate::CX(a, b))
    }

    /// Apply a CZ gate to the `a`-th and `b`-th qubits.
    pub fn apply_cz(&mut self, a: usize, b: usize) -> SimResult<&mut Self> {
        self.apply_gate(Gate::CZ(a, b))
    }

    fn apply_h_unchecked(&mut self, k: usize) -> &mut Self {
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        let mut tmp: u32;
        for row in self.rows.iter_mut() {
            if row.x[k5] & pw != 0 && row.z[k5] & pw != 0 { row.r = !row.r; }
            tmp = row.x[k5];
            row.x[k5] ^= (row.x[k5] ^ row.z[k5]) & pw;
            row.z[k5] ^= (row.z[k5] ^ tmp) & pw;
        }
        self
    }

    fn apply_s_unchecked(&mut self, k: usize) -> &mut Self {
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        for row in self.rows.iter_mut() {
            if row.x[k5] & pw != 0 && row.z[k5] & pw != 0 { row.r = !row.r; }
            row.z[k5] ^= row.x[k5] & pw;
        }
        self
    }

    fn apply_sinv_unchecked(&mut self, k: usize) -> &mut Self {
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        for row in self.rows.iter_mut() {
            row.z[k5] ^= row.x[k5] & pw;
            if row.x[k5] & pw != 0 && row.z[k5] & pw != 0 { row.r = !row.r; }
        }
        self
    }

    fn apply_x_unchecked(&mut self, k: usize) -> &mut Self {
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        for row in self.rows.iter_mut() {
            if row.z[k5] & pw != 0 { row.r = !row.r; }
        }
        self
    }

    fn apply_y_unchecked(&mut self, k: usize) -> &mut Self {
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        for row in self.rows.iter_mut() {
            if (row.x[k5] ^ row.z[k5]) & pw != 0 { row.r = !row.r; }
        }
        self
    }

    fn apply_z_unchecked(&mut self, k: usize) -> &mut Self {
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        for row in self.rows.iter_mut() {
            if row.x[k5] & pw != 0 { row.r = !row.r; }
        }
        self
    }

    fn apply_cnot_unchecked(&mut self, a: usize, b: usize) -> &mut Self {
        let a5: usize = a >> 5;
        let b5: usize = b >> 5;
        let pwa: u32 = PW[a & 31];
        let pwb: u32 = PW[b & 31];
        let mut xa: bool;
        let mut za: bool;
        let mut xb: bool;
        let mut zb: bool;
        for row in self.rows.iter_mut() {
            xa = row.x[a5] & pwa != 0;
            za = row.z[a5] & pwa != 0;
            xb = row.x[b5] & pwb != 0;
            zb = row.z[b5] & pwb != 0;
            if xa && zb && (xb == za) { row.r = !row.r; }
            if zb { row.z[a5] ^= pwa; }
            if xa { row.x[b5] ^= pwb; }
        }
        self
    }

    fn apply_cz_unchecked(&mut self, a: usize, b: usize) -> &mut Self {
        let a5: usize = a >> 5;
        let b5: usize = b >> 5;
        let pwa: u32 = PW[a & 31];
        let pwb: u32 = PW[b & 31];
        let mut xa: bool;
        let mut za: bool;
        let mut xb: bool;
        let mut zb: bool;
        for row in self.rows.iter_mut() {
            xa = row.x[a5] & pwa != 0;
            za = row.z[a5] & pwa != 0;
            xb = row.x[b5] & pwb != 0;
            zb = row.z[b5] & pwb != 0;
            if xa && xb && (za != zb) { row.r = !row.r; }
            if xb { row.z[a5] ^= pwa; }
            if xa { row.z[b5] ^= pwb; }
        }
        self
    }
}

#[cfg(test)]
mod test {
    use rand::{ rngs::StdRng, Rng, SeedableRng };
    use crate::pauli::{ NPauli, PauliRow };
    use super::*;

    fn sample_clifford<R>(n: usize, rng: &mut R) -> Gate
    where R: Rng + ?Sized
    {
        let a = rng.gen_range(0..n);
        if n == 1 {
            return match rng.gen_range(0..6_usize) {
                0 => Gate::H(a),
                1 => Gate::X(a),
                2 => Gate::Y(a),
                3 => Gate::Z(a),
                4 => Gate::S(a),
                _ => Gate::SInv(a),
            };
        }
        let b = (a + rng.gen_range(1..n)) % n;
        match rng.gen_range(0..8_usize) {
            0 => Gate::H(a),
            1 => Gate::X(a),
            2 => Gate::Y(a),
            3 => Gate::Z(a),
            4 => Gate::S(a),
            5 => Gate::SInv(a),
            6 => Gate::CX(a, b),
            7 => Gate::CZ(a, b),
            _ => unreachable!(),
        }
    }

    // conjugate a single Pauli string through a gate by writing it into the
    // first row of a throwaway tableau
    fn conjugate(gate: Gate, p: &str) -> String {
        let npauli: NPauli = p.parse().unwrap();
        let mut tab = Tableau::new(npauli.ops.len());
        tab.replace_row(0, PauliRow::from(&npauli));
        tab.apply_gate(gate).unwrap();
        format!("{}", tab.row(0))
    }

    #[test]
    fn single_qubit_conjugation() {
        assert_eq!(conjugate(Gate::H(0), "+X"), "+Z");
        assert_eq!(conjugate(Gate::H(0), "+Z"), "+X");
        assert_eq!(conjugate(Gate::H(0), "+Y"), "-Y");
        assert_eq!(conjugate(Gate::S(0), "+X"), "+Y");
        assert_eq!(conjugate(Gate::S(0), "+Y"), "-X");
        assert_eq!(conjugate(Gate::S(0), "+Z"), "+Z");
        assert_eq!(conjugate(Gate::SInv(0), "+X"), "-Y");
        assert_eq!(conjugate(Gate::SInv(0), "+Y"), "+X");
        assert_eq!(conjugate(Gate::X(0), "+Z"), "-Z");
        assert_eq!(conjugate(Gate::X(0), "+Y"), "-Y");
        assert_eq!(conjugate(Gate::X(0), "+X"), "+X");
        assert_eq!(conjugate(Gate::Y(0), "+X"), "-X");
        assert_eq!(conjugate(Gate::Y(0), "+Z"), "-Z");
        assert_eq!(conjugate(Gate::Y(0), "-Y"), "-Y");
        assert_eq!(conjugate(Gate::Z(0), "+X"), "-X");
        assert_eq!(conjugate(Gate::Z(0), "+Y"), "-Y");
    }

    #[test]
    fn two_qubit_conjugation() {
        assert_eq!(conjugate(Gate::CX(0, 1), "+XI"), "+XX");
        assert_eq!(conjugate(Gate::CX(0, 1), "+IZ"), "+ZZ");
        assert_eq!(conjugate(Gate::CX(0, 1), "+ZI"), "+ZI");
        assert_eq!(conjugate(Gate::CX(0, 1), "+IX"), "+IX");
        assert_eq!(conjugate(Gate::CX(0, 1), "+XZ"), "-YY");
        assert_eq!(conjugate(Gate::CX(0, 1), "+YY"), "-XZ");
        assert_eq!(conjugate(Gate::CZ(0, 1), "+XI"), "+XZ");
        assert_eq!(conjugate(Gate::CZ(0, 1), "+IX"), "+ZX");
        assert_eq!(conjugate(Gate::CZ(0, 1), "+XX"), "+YY");
        assert_eq!(conjugate(Gate::CZ(0, 1), "+XY"), "-YX");
    }

    #[test]
    fn involutions() {
        let mut rng = StdRng::seed_from_u64(10546);
        let n = 5;
        let mut tab = Tableau::new(n);
        for _ in 0..200 {
            tab.apply_gate(sample_clifford(n, &mut rng)).unwrap();
        }
        let init = tab.clone();

        tab.apply_h(2).unwrap().apply_h(2).unwrap();
        assert_eq!(tab, init);
        (0..4).for_each(|_| { tab.apply_s(3).unwrap(); });
        assert_eq!(tab, init);
        tab.apply_s(1).unwrap().apply_sinv(1).unwrap();
        assert_eq!(tab, init);
        tab.apply_cnot(0, 4).unwrap().apply_cnot(0, 4).unwrap();
        assert_eq!(tab, init);
        tab.apply_cz(3, 1).unwrap().apply_cz(3, 1).unwrap();
        assert_eq!(tab, init);
    }

    #[test]
    fn sinv_is_s_cubed() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 3;
        let mut tab = Tableau::new(n);
        for _ in 0..50 {
            tab.apply_gate(sample_clifford(n, &mut rng)).unwrap();
        }
        let mut tab3 = tab.clone();
        tab.apply_sinv(1).unwrap();
        (0..3).for_each(|_| { tab3.apply_s(1).unwrap(); });
        assert_eq!(tab, tab3);
    }

    #[test]
    fn invariants_preserved() {
        let mut rng = StdRng::seed_from_u64(31415);
        for n in [1, 2, 3, 8, 33] {
            let mut tab = Tableau::new(n);
            for _ in 0..150 {
                tab.apply_gate(sample_clifford(n, &mut rng)).unwrap();
                assert!(tab.is_valid());
            }
        }
    }

    #[test]
    fn rejected_gates_leave_rows_untouched() {
        let mut tab = Tableau::new(2);
        tab.apply_h(0).unwrap();
        let init = tab.clone();
        assert_eq!(
            tab.apply_gate(Gate::T(0)).map(|_| ()),
            Err(SimError::UnsupportedGate { gate: Gate::T(0) }),
        );
        assert_eq!(
            tab.apply_gate(Gate::CCX(0, 1, 2)).map(|_| ()),
            Err(SimError::UnsupportedGate { gate: Gate::CCX(0, 1, 2) }),
        );
        assert_eq!(
            tab.apply_gate(Gate::H(2)).map(|_| ()),
            Err(SimError::InvalidQubit { qubit: 2, n: 2 }),
        );
        assert_eq!(
            tab.apply_gate(Gate::CX(1, 1)).map(|_| ()),
            Err(SimError::InvalidQubit { qubit: 1, n: 2 }),
        );
        assert_eq!(tab, init);
    }

    #[test]
    fn single_qubit_register() {
        let mut rng = StdRng::seed_from_u64(2718);
        let mut tab = Tableau::new(1);
        for _ in 0..100 {
            let gate = sample_clifford(1, &mut rng);
            assert_eq!(gate.qubits().collect::<Vec<usize>>(), vec![0]);
            tab.apply_gate(gate).unwrap();
            assert!(tab.is_valid());
        }
        let init = tab.clone();
        tab.apply_h(0).unwrap().apply_h(0).unwrap();
        assert_eq!(tab, init);
        (0..4).for_each(|_| { tab.apply_s(0).unwrap(); });
        assert_eq!(tab, init);
    }

    #[test]
    fn gate_qubits() {
        assert_eq!(Gate::SInv(4).qubits().collect::<Vec<usize>>(), vec![4]);
        assert_eq!(Gate::CZ(3, 1).qubits().collect::<Vec<usize>>(), vec![3, 1]);
        assert_eq!(
            Gate::CCX(0, 2, 1).qubits().collect::<Vec<usize>>(), vec![0, 2, 1]);
        assert!(Gate::CX(0, 1).is_clifford());
        assert!(!Gate::T(0).is_clifford());
    }

    #[test]
    fn circuit_stops_at_first_failure() {
        let mut tab = Tableau::new(2);
        let gates = [Gate::H(0), Gate::CX(0, 1), Gate::TInv(1), Gate::X(0)];
        assert!(tab.apply_circuit(&gates).is_err());
        let mut expected = Tableau::new(2);
        expected.apply_circuit(&gates[..2]).unwrap();
        assert_eq!(tab, expected);
    }
}
