//! Single Pauli operators and signed *n*-qubit Pauli strings.
//!
//! A [`PauliRow`] is the bit-packed form used inside a
//! [`Tableau`][crate::tableau::Tableau]: for each qubit *j* it stores a pair
//! (*x*<sub>*j*</sub>, *z*<sub>*j*</sub>) identifying the Pauli acting on it,
//!
//! | *x*<sub>*j*</sub> | *z*<sub>*j*</sub> | Pauli |
//! | :---------------: | :---------------: | :---: |
//! | 0                 | 0                 | *I*   |
//! | 1                 | 0                 | *X*   |
//! | 1                 | 1                 | *Y*   |
//! | 0                 | 1                 | *Z*   |
//!
//! plus a single sign bit. Bits are packed into `u32` words, so a row over *n*
//! qubits occupies `2 × (floor(n / 32) + 1)` words regardless of its contents.
//!
//! [`NPauli`] is the unpacked, human-readable counterpart, which can be printed
//! and parsed back.

use std::{ fmt, str::FromStr };
use thiserror::Error;

pub(crate) const PW: [u32; 32] = [ // PW[i] = 2^i
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
    65536, 131072, 262144, 524288, 1048576, 2097152, 4194304, 8388608, 16777216,
    33554432, 67108864, 134217728, 268435456, 536870912, 1073741824, 2147483648
];

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "{}", if f.alternate() { "." } else { "I" }),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Pauli {
    /// Return `true` if `self` and `other` commute.
    pub fn commutes_with(self, other: Self) -> bool {
        match (self, other) {
            (_, Self::I) => true,
            (Self::I, _) => true,
            (a, b) => a == b,
        }
    }

    /// Convert to the (*x*, *z*) bit pair encoding.
    pub fn to_bits(self) -> (bool, bool) {
        match self {
            Self::I => (false, false),
            Self::X => (true,  false),
            Self::Y => (true,  true ),
            Self::Z => (false, true ),
        }
    }

    /// Convert from the (*x*, *z*) bit pair encoding.
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true,  false) => Self::X,
            (true,  true ) => Self::Y,
            (false, true ) => Self::Z,
        }
    }
}

/// One signed Pauli string over `n` qubits in packed (*x*, *z*, *r*) form.
///
/// The width is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PauliRow {
    pub(crate) n: usize,
    // `x` and `z` each hold n bits packed into u32s; size floor(n / 32) + 1
    pub(crate) x: Vec<u32>,
    pub(crate) z: Vec<u32>,
    pub(crate) r: bool, // sign bit; `true` for -1
}

impl PauliRow {
    /// Create the identity operator `+I...I` on `n` qubits.
    pub fn new(n: usize) -> Self {
        let over32: usize = (n >> 5) + 1;
        Self { n, x: vec![0; over32], z: vec![0; over32], r: false }
    }

    /// Create `+P` acting on only the `k`-th of `n` qubits.
    ///
    /// *Panics if `k >= n`.*
    pub fn single(n: usize, k: usize, op: Pauli) -> Self {
        assert!(k < n, "PauliRow::single: qubit index out of bounds");
        let mut row = Self::new(n);
        row.set(k, op);
        row
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the *x* bit for qubit `k`.
    pub fn x(&self, k: usize) -> bool { self.x[k >> 5] & PW[k & 31] != 0 }

    /// Return the *z* bit for qubit `k`.
    pub fn z(&self, k: usize) -> bool { self.z[k >> 5] & PW[k & 31] != 0 }

    /// Return the sign bit (`true` for −1).
    pub fn sign(&self) -> bool { self.r }

    /// Set the sign bit (`true` for −1).
    pub fn set_sign(&mut self, r: bool) { self.r = r; }

    /// Return the Pauli acting on qubit `k`.
    pub fn get(&self, k: usize) -> Pauli { Pauli::from_bits(self.x(k), self.z(k)) }

    /// Set the Pauli acting on qubit `k`, leaving the sign untouched.
    pub fn set(&mut self, k: usize, op: Pauli) {
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];
        let (x, z) = op.to_bits();
        if x { self.x[k5] |= pw; } else { self.x[k5] &= !pw; }
        if z { self.z[k5] |= pw; } else { self.z[k5] &= !pw; }
    }

    /// Reset to `+I...I`.
    pub fn clear(&mut self) {
        self.x.iter_mut().for_each(|w| { *w = 0; });
        self.z.iter_mut().for_each(|w| { *w = 0; });
        self.r = false;
    }

    /// Return `true` if no qubit carries a non-identity Pauli.
    pub fn is_identity(&self) -> bool {
        self.x.iter().chain(&self.z).all(|w| *w == 0)
    }

    /// Symplectic inner product with another row of the same width: `1` if the
    /// two operators anticommute, `0` if they commute.
    pub fn symplectic(&self, other: &Self) -> u8 {
        let ones: u32
            = self.x.iter().zip(&self.z)
            .zip(other.x.iter().zip(&other.z))
            .map(|((&xa, &za), (&xb, &zb))| ((xa & zb) ^ (za & xb)).count_ones())
            .sum();
        (ones % 2) as u8
    }

    /// Return `true` if `self` and `other` commute.
    pub fn commutes_with(&self, other: &Self) -> bool {
        self.symplectic(other) == 0
    }

    // return the exponent on i (0, ..., 3) picked up when `b` is
    // left-multiplied by `a`, including both signs
    fn mul_phase(a: &Self, b: &Self) -> u8 {
        let mut e: i32 = 0;
        let mut j5: usize;
        let mut pw: u32;
        let mut xa: bool;
        let mut za: bool;
        let mut xb: bool;
        let mut zb: bool;
        for j in 0..a.n {
            j5 = j >> 5;
            pw = PW[j & 31];
            xa = a.x[j5] & pw != 0;
            za = a.z[j5] & pw != 0;
            xb = b.x[j5] & pw != 0;
            zb = b.z[j5] & pw != 0;
            match (xa, za) {
                (true, false) => { // X
                    if xb && zb { e += 1; }
                    if !xb && zb { e -= 1; }
                },
                (true, true) => { // Y
                    if !xb && zb { e += 1; }
                    if xb && !zb { e -= 1; }
                },
                (false, true) => { // Z
                    if xb && !zb { e += 1; }
                    if xb && zb { e -= 1; }
                },
                (false, false) => { },
            }
        }
        e += 2 * i32::from(a.r) + 2 * i32::from(b.r);
        e.rem_euclid(4) as u8
    }

    /// Left-multiply `self` by `a` in place, so that `self` becomes `a · self`.
    ///
    /// Both rows must belong to the same tableau; when they commute, the
    /// product is Hermitian and its phase reduces to a sign bit. The
    /// anticommuting case only arises for rows that are subsequently
    /// overwritten, so the imaginary part of the phase is dropped.
    pub fn left_mul(&mut self, a: &Self) {
        self.r = Self::mul_phase(a, self) >= 2;
        self.x.iter_mut().zip(&a.x).for_each(|(xb, xa)| { *xb ^= *xa; });
        self.z.iter_mut().zip(&a.z).for_each(|(zb, za)| { *zb ^= *za; });
    }

    /// Convert to the unpacked, human-readable form.
    pub fn to_npauli(&self) -> NPauli {
        let ops: Vec<Pauli> = (0..self.n).map(|j| self.get(j)).collect();
        NPauli { neg: self.r, ops }
    }
}

impl From<&NPauli> for PauliRow {
    fn from(npauli: &NPauli) -> Self {
        let mut row = Self::new(npauli.ops.len());
        npauli.ops.iter().enumerate()
            .for_each(|(j, op)| { row.set(j, *op); });
        row.r = npauli.neg;
        row
    }
}

impl fmt::Display for PauliRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_npauli().fmt(f)
    }
}

/// A single `n`-qubit Pauli operator with a sign.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NPauli {
    /// `true` for an overall −1.
    pub neg: bool,
    pub ops: Vec<Pauli>,
}

impl fmt::Display for NPauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.neg { "-" } else { "+" })?;
        self.ops.iter()
            .try_for_each(|p| p.fmt(f))
    }
}

/// Returned by [`NPauli::from_str`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PauliParseError {
    #[error("empty Pauli string")]
    Empty,

    #[error("invalid character {ch:?} at position {pos} in Pauli string")]
    InvalidChar { ch: char, pos: usize },
}

impl FromStr for NPauli {
    type Err = PauliParseError;

    /// Parse strings like `+XIZ`, `-YY`, or `Z.Z`. The sign is optional and
    /// defaults to `+`; `.` is accepted in place of `I`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (neg, body, offs)
            = match s.chars().next() {
                Some('+') => (false, &s[1..], 1),
                Some('-') => (true,  &s[1..], 1),
                Some(_) => (false, s, 0),
                None => { return Err(PauliParseError::Empty); },
            };
        if body.is_empty() { return Err(PauliParseError::Empty); }
        let ops: Vec<Pauli>
            = body.chars().enumerate()
            .map(|(k, ch)| {
                match ch {
                    'I' | '.' => Ok(Pauli::I),
                    'X' => Ok(Pauli::X),
                    'Y' => Ok(Pauli::Y),
                    'Z' => Ok(Pauli::Z),
                    _ => Err(PauliParseError::InvalidChar { ch, pos: k + offs }),
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { neg, ops })
    }
}
