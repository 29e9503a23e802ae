//! Tie-break providers.
//!
//! Choosing a winner among simultaneous claimants is the only
//! nondeterministic step of an allocation. Everything random goes through
//! [`TieBreak`], so tests and replays can substitute a fixed sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks a winner among tied claimants.
///
/// Only called for contested resources, so `claimants.len() >= 2`.
/// Must return an index into `claimants`.
///
/// # Panics
///
/// Implementations may panic when `claimants` is empty;
/// [`UniformTieBreak`] does.
pub trait TieBreak {
    fn choose(&mut self, resource: &str, claimants: &[&str]) -> usize;
}

impl<F> TieBreak for F
where
    F: FnMut(&str, &[&str]) -> usize,
{
    fn choose(&mut self, resource: &str, claimants: &[&str]) -> usize {
        self(resource, claimants)
    }
}

/// Uniform random choice backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct UniformTieBreak<R> {
    rng: R,
}

impl<R: Rng> UniformTieBreak<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformTieBreak<StdRng> {
    /// Creates a reproducible tie-break from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TieBreak for UniformTieBreak<R> {
    fn choose(&mut self, _resource: &str, claimants: &[&str]) -> usize {
        debug_assert!(claimants.len() >= 2, "tie-break needs at least two claimants");
        self.rng.random_range(0..claimants.len())
    }
}

/// Replays a recorded sequence of choices.
///
/// Once the script runs out every further tie goes to the first claimant.
///
/// ```
/// use u_allocate::allocation::{ScriptedTieBreak, TieBreak};
///
/// let mut tb = ScriptedTieBreak::new([1]);
/// assert_eq!(tb.choose("X", &["A", "B"]), 1);
/// assert_eq!(tb.choose("Y", &["C", "D"]), 0);
/// assert_eq!(tb.draws(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedTieBreak {
    script: Vec<usize>,
    draws: usize,
}

impl ScriptedTieBreak {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            draws: 0,
        }
    }

    /// Number of ties resolved so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl TieBreak for ScriptedTieBreak {
    fn choose(&mut self, _resource: &str, _claimants: &[&str]) -> usize {
        let pick = self.script.get(self.draws).copied().unwrap_or(0);
        self.draws += 1;
        pick
    }
}
