//! Uniform candidate sampling over a bounded identifier space.
//!
//! Sampling is with replacement: a sampler keeps no memory of candidates that
//! were already tried, so the same failing identifier may come up twice.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Exclusive upper bound of a catalog's identifier space.
///
/// Candidates drawn against a bound `b` always lie in `[0, b)`, so a bound of
/// zero is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CatalogBound(u64);

impl CatalogBound {
    /// Wrap `value`, rejecting an empty identifier space.
    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// The exclusive upper bound.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for CatalogBound {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "catalog bound must be greater than zero".to_string())
    }
}

impl From<CatalogBound> for u64 {
    fn from(bound: CatalogBound) -> Self {
        bound.0
    }
}

impl fmt::Display for CatalogBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A tentatively sampled key: a catalog ID or a search offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(pub u64);

impl Candidate {
    /// The raw key.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Draw one candidate uniformly from `[0, bound)`.
pub fn sample<R: Rng + ?Sized>(bound: CatalogBound, rng: &mut R) -> Candidate {
    Candidate(rng.gen_range(0..bound.get()))
}

/// Source of candidates for a discovery run.
pub trait Sampler: Send {
    /// Produce the next candidate within `bound`.
    fn next_candidate(&mut self, bound: CatalogBound) -> Candidate;
}

/// Sampler backed by a seedable PRNG.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// Seed from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sampler, useful for replaying a sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Sampler for RandomSampler {
    fn next_candidate(&mut self, bound: CatalogBound) -> Candidate {
        sample(bound, &mut self.rng)
    }
}

/// Sampler that replays a fixed script of keys, cycling when it runs out.
///
/// Keys are reduced modulo the bound so the `[0, bound)` guarantee holds for
/// scripted runs as well.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    script: Vec<u64>,
    position: usize,
}

impl ScriptedSampler {
    /// Create a sampler over `script`. An empty script always yields `0`.
    pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: script.into_iter().collect(),
            position: 0,
        }
    }

    /// Number of candidates handed out so far.
    pub fn drawn(&self) -> usize {
        self.position
    }
}

impl Sampler for ScriptedSampler {
    fn next_candidate(&mut self, bound: CatalogBound) -> Candidate {
        let key = if self.script.is_empty() {
            0
        } else {
            self.script[self.position % self.script.len()]
        };
        self.position += 1;
        Candidate(key % bound.get())
    }
}
