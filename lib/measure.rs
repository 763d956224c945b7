//! Projective Z-basis measurement on a [`Tableau`].
//!
//! The outcome of measuring qubit *k* is random exactly when some stabilizer
//! anticommutes with *Z*<sub>*k*</sub>, i.e. has an *x* bit on *k*. Otherwise
//! ±*Z*<sub>*k*</sub> is already in the stabilizer group, and its sign is
//! recovered as a product of stabilizers selected by the destabilizers, without
//! disturbing the state. See Section III of
//! [arXiv:quant-ph/0406196][tableau].
//!
//! [tableau]: https://arxiv.org/abs/quant-ph/0406196

use rand::Rng;
use crate::{
    error::SimResult,
    pauli::{ PauliRow, PW },
    tableau::Tableau,
};

/// The result of a measurement, generated by [`Tableau::measure`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A deterministic outcome resulting in ∣0⟩
    Det0,
    /// A deterministic outcome resulting in ∣1⟩
    Det1,
    /// A random outcome resulting in ∣0⟩
    Rand0,
    /// A random outcome resulting in ∣1⟩
    Rand1,
}

impl Outcome {
    /// Returns `true` if `self` is `Det0` or `Rand0`.
    pub fn is_0(&self) -> bool { matches!(self, Self::Det0 | Self::Rand0) }

    /// Returns `true` if `self` is `Det1` or `Rand1`.
    pub fn is_1(&self) -> bool { matches!(self, Self::Det1 | Self::Rand1) }

    /// Returns `true` if `self` is `Det0` or `Det1`.
    pub fn is_det(&self) -> bool { matches!(self, Self::Det0 | Self::Det1) }

    /// Returns `true` if `self` is `Rand0` or `Rand1`.
    pub fn is_rand(&self) -> bool { matches!(self, Self::Rand0 | Self::Rand1) }

    /// Return the classical bit, `0` or `1`.
    pub fn bit(&self) -> u8 { u8::from(self.is_1()) }
}

impl Tableau {
    /// Perform a projective measurement on a qubit `k` in the Z-basis,
    /// returning the outcome of the measurement.
    ///
    /// The measurement is either deterministic (when the target qubit is
    /// ∣0⟩ or ∣1⟩) or random (otherwise), in which case one uniform bit is
    /// drawn from `rng` and the state collapses accordingly. Fails with
    /// [`SimError::InvalidQubit`][crate::error::SimError::InvalidQubit] if `k`
    /// is out of bounds, without modifying `self`.
    pub fn measure<R>(&mut self, k: usize, rng: &mut R) -> SimResult<Outcome>
    where R: Rng + ?Sized
    {
        self.check_qubit(k)?;
        let n = self.n;
        let k5: usize = k >> 5;
        let pw: u32 = PW[k & 31];

        let maybe_p: Option<usize>
            = (n..2 * n).find(|i| self.rows[*i].x[k5] & pw != 0);
        if let Some(p) = maybe_p {
            let row_p: PauliRow = self.rows[p].clone();
            for (i, row) in self.rows.iter_mut().enumerate() {
                if i != p && row.x[k5] & pw != 0 { row.left_mul(&row_p); }
            }
            self.rows[p - n] = row_p;
            let b: bool = rng.gen();
            let stab = &mut self.rows[p];
            stab.clear();
            stab.z[k5] = pw;
            stab.r = b;
            if b { Ok(Outcome::Rand1) } else { Ok(Outcome::Rand0) }
        } else {
            let mut scratch = PauliRow::new(n);
            for d in 0..n {
                if self.rows[d].x[k5] & pw != 0 {
                    scratch.left_mul(&self.rows[n + d]);
                }
            }
            if scratch.r { Ok(Outcome::Det1) } else { Ok(Outcome::Det0) }
        }
    }
}

#[cfg(test)]
mod test {
    use rand::{ rngs::StdRng, SeedableRng };
    use crate::{ error::SimError, gate::Gate };
    use super::*;

    #[test]
    fn deterministic_x() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let mut tab = Tableau::new(1);
            tab.apply_x(0).unwrap();
            assert_eq!(tab.measure(0, &mut rng), Ok(Outcome::Det1));
        }
    }

    #[test]
    fn deterministic_z() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let mut tab = Tableau::new(1);
            tab.apply_z(0).unwrap();
            assert_eq!(tab.measure(0, &mut rng), Ok(Outcome::Det0));
        }
    }

    #[test]
    fn deterministic_leaves_state_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tab = Tableau::new(3);
        tab.apply_h(0).unwrap()
            .apply_cnot(0, 1).unwrap()
            .apply_x(2).unwrap()
            .apply_h(0).unwrap();
        let init = tab.clone();
        assert_eq!(tab.measure(2, &mut rng), Ok(Outcome::Det1));
        assert_eq!(tab, init);
    }

    #[test]
    fn random_then_repeatable() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let mut tab = Tableau::new(2);
            tab.apply_h(1).unwrap();
            let first = tab.measure(1, &mut rng).unwrap();
            assert!(first.is_rand());
            assert!(tab.is_valid());
            let second = tab.measure(1, &mut rng).unwrap();
            assert!(second.is_det());
            assert_eq!(first.bit(), second.bit());
        }
    }

    #[test]
    fn bell_correlation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ones: usize = 0;
        for _ in 0..1000 {
            let mut tab = Tableau::new(2);
            tab.apply_h(0).unwrap().apply_cnot(0, 1).unwrap();
            let m0 = tab.measure(0, &mut rng).unwrap();
            let m1 = tab.measure(1, &mut rng).unwrap();
            assert!(m0.is_rand());
            assert!(m1.is_det());
            assert_eq!(m0.bit(), m1.bit());
            ones += usize::from(m0.bit());
        }
        assert!((400..=600).contains(&ones), "biased: {} / 1000", ones);
    }

    #[test]
    fn ghz_parity() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let mut tab = Tableau::new(4);
            tab.apply_circuit(
                &[Gate::H(0), Gate::CX(0, 1), Gate::CX(1, 2), Gate::CX(2, 3)]
            ).unwrap();
            let bits: Vec<u8>
                = (0..4).map(|k| tab.measure(k, &mut rng).unwrap().bit())
                .collect();
            assert!(bits.iter().all(|b| *b == bits[0]));
        }
    }

    #[test]
    fn y_eigenstate_is_random() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut tab = Tableau::new(1);
        tab.apply_h(0).unwrap().apply_s(0).unwrap();
        assert!(tab.measure(0, &mut rng).unwrap().is_rand());
    }

    #[test]
    fn minus_state_rotated_back() {
        // H X H = Z, so ∣0⟩ → ∣0⟩ with a phase only
        let mut rng = StdRng::seed_from_u64(6);
        let mut tab = Tableau::new(1);
        tab.apply_h(0).unwrap().apply_x(0).unwrap().apply_h(0).unwrap();
        assert_eq!(tab.measure(0, &mut rng), Ok(Outcome::Det0));
        // H Z H = X
        let mut tab = Tableau::new(1);
        tab.apply_h(0).unwrap().apply_z(0).unwrap().apply_h(0).unwrap();
        assert_eq!(tab.measure(0, &mut rng), Ok(Outcome::Det1));
    }

    #[test]
    fn invalid_qubit() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tab = Tableau::new(3);
        tab.apply_h(0).unwrap();
        let init = tab.clone();
        assert_eq!(
            tab.measure(3, &mut rng),
            Err(SimError::InvalidQubit { qubit: 3, n: 3 }),
        );
        assert_eq!(tab, init);
    }

    #[test]
    fn invariants_after_measurement() {
        let mut rng = StdRng::seed_from_u64(8);
        let n = 6;
        let mut tab = Tableau::new(n);
        for k in 0..n { tab.apply_h(k).unwrap(); }
        for k in 0..n - 1 { tab.apply_cz(k, k + 1).unwrap(); }
        for k in (0..n).rev() {
            tab.measure(k, &mut rng).unwrap();
            assert!(tab.is_valid());
            tab.apply_s(k).unwrap().apply_h(k).unwrap();
            assert!(tab.is_valid());
        }
    }

    #[test]
    fn seeded_runs_reproduce() {
        let run = |seed: u64| -> Vec<u8> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut tab = Tableau::new(8);
            (0..8).for_each(|k| { tab.apply_h(k).unwrap(); });
            (0..8).map(|k| tab.measure(k, &mut rng).unwrap().bit()).collect()
        };
        assert_eq!(run(99), run(99));
    }
}
