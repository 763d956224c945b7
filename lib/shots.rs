//! Repeated independent executions of a [`Circuit`], aggregated either into
//! register counts or into final stabilizer groups.
//!
//! Every shot starts from a fresh ∣0...0⟩ state and owns its own random
//! number generator, seeded by the configured seed plus the shot index, so
//! that seeded sampling is reproducible no matter how the shots are scheduled
//! across threads.

use itertools::Itertools;
use rand::{ rngs::StdRng, Rng, SeedableRng };
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use rustc_hash::FxHashMap as HashMap;
use tracing::info;
use crate::{
    circuit::{ Circuit, Executor },
    error::SimResult,
    tableau::StabGroup,
};

/// What [`sample`] should collect from each shot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Returns {
    /// Histogram of per-qubit result registers.
    #[default]
    Counts,
    /// The final stabilizer group of every shot.
    Stabilizers,
}

impl Returns {
    /// Shot count used when none is given.
    pub fn default_shots(&self) -> usize {
        match self {
            Self::Counts => 100,
            Self::Stabilizers => 1,
        }
    }
}

/// Configuration for [`sample`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShotConfig {
    /// Number of shots; `None` defers to [`Returns::default_shots`].
    pub shots: Option<usize>,
    /// Base seed for the per-shot generators; `None` draws one from entropy.
    pub seed: Option<u64>,
    pub returns: Returns,
}

impl ShotConfig {
    /// Return the number of shots that will actually be run.
    pub fn num_shots(&self) -> usize {
        self.shots.unwrap_or_else(|| self.returns.default_shots())
    }
}

/// Aggregated output of [`sample`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShotResult {
    Counts(HashMap<String, usize>),
    Stabilizers(Vec<StabGroup>),
}

impl ShotResult {
    /// Return the counts, if `self` is `Counts`.
    pub fn counts(&self) -> Option<&HashMap<String, usize>> {
        match self {
            Self::Counts(counts) => Some(counts),
            Self::Stabilizers(_) => None,
        }
    }

    /// Return the groups, if `self` is `Stabilizers`.
    pub fn stabilizers(&self) -> Option<&[StabGroup]> {
        match self {
            Self::Counts(_) => None,
            Self::Stabilizers(groups) => Some(groups),
        }
    }

    /// Return the counts as a list sorted by descending count, with ties
    /// broken by register string.
    pub fn sorted_counts(&self) -> Vec<(&str, usize)> {
        self.counts()
            .map(|counts| {
                counts.iter()
                    .map(|(reg, c)| (reg.as_str(), *c))
                    .sorted_by(|(ra, ca), (rb, cb)| cb.cmp(ca).then(ra.cmp(rb)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn run_shot(circuit: &Circuit, seed: u64) -> SimResult<Executor> {
    let mut exec
        = Executor::with_rng(circuit.num_qubits(), StdRng::seed_from_u64(seed));
    exec.run(circuit)?;
    Ok(exec)
}

/// Run `circuit` for the configured number of shots in parallel, returning
/// the first error encountered by any shot.
pub fn sample(circuit: &Circuit, config: &ShotConfig) -> SimResult<ShotResult> {
    let shots = config.num_shots();
    let base: u64
        = config.seed.unwrap_or_else(|| StdRng::from_entropy().gen());
    info!(
        qubits = circuit.num_qubits(),
        ops = circuit.len(),
        shots,
        returns = ?config.returns,
        "sampling circuit"
    );
    let result
        = match config.returns {
            Returns::Counts => {
                let registers: Vec<String>
                    = (0..shots).into_par_iter()
                    .map(|i| {
                        run_shot(circuit, base.wrapping_add(i as u64))
                            .map(|exec| exec.record().register())
                    })
                    .collect::<SimResult<_>>()?;
                let mut counts: HashMap<String, usize> = HashMap::default();
                registers.into_iter()
                    .for_each(|reg| { *counts.entry(reg).or_insert(0) += 1; });
                info!(distinct = counts.len(), "sampling finished");
                ShotResult::Counts(counts)
            },
            Returns::Stabilizers => {
                let groups: Vec<StabGroup>
                    = (0..shots).into_par_iter()
                    .map(|i| {
                        run_shot(circuit, base.wrapping_add(i as u64))
                            .map(|exec| exec.group())
                    })
                    .collect::<SimResult<_>>()?;
                info!(groups = groups.len(), "sampling finished");
                ShotResult::Stabilizers(groups)
            },
        };
    Ok(result)
}
