//! Random sources for ten-sided dice.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that can produce ten-sided die faces.
///
/// Every roll in the engine is drawn through this trait, so a seeded
/// [`StdRng`] replays a whole combat and [`ScriptedRolls`] can force exact
/// faces in tests.
pub trait DieSource {
    /// One face in `0..=9`.
    fn face(&mut self) -> u32;

    /// A uniform index in `0..n`, used for table picks. Returns 0 when `n`
    /// is 0.
    fn below(&mut self, n: u32) -> u32;
}

impl DieSource for StdRng {
    fn face(&mut self) -> u32 {
        self.random_range(0..10)
    }

    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.random_range(0..n)
    }
}

/// A die source that plays back forced values, then falls back to a
/// seeded [`StdRng`].
///
/// Forced values serve both [`DieSource::face`] (taken modulo 10) and
/// [`DieSource::below`] (taken modulo `n`), in the order they are drawn.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    queue: VecDeque<u32>,
    fallback: StdRng,
}

impl ScriptedRolls {
    /// Play back `faces`, then continue from seed 0.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self::with_seed(faces, 0)
    }

    /// Play back `faces`, then continue from `seed`.
    pub fn with_seed(faces: impl IntoIterator<Item = u32>, seed: u64) -> Self {
        Self {
            queue: faces.into_iter().collect(),
            fallback: StdRng::seed_from_u64(seed),
        }
    }

    /// Queue more forced values after the ones already waiting.
    pub fn push(&mut self, value: u32) {
        self.queue.push_back(value);
    }

    /// Number of forced values not yet drawn.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DieSource for ScriptedRolls {
    fn face(&mut self) -> u32 {
        match self.queue.pop_front() {
            Some(v) => v % 10,
            None => self.fallback.face(),
        }
    }

    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        match self.queue.pop_front() {
            Some(v) => v % n,
            None => self.fallback.below(n),
        }
    }
}
