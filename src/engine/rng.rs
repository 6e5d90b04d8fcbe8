//! Random number sources for the game.
//!
//! Every random draw in a session goes through [`RandomSource`], so a session
//! seeded with the same value replays identically and tests can script draws.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform value in `0..sides`. Returns 0 when `sides` is 0.
    fn roll(&mut self, sides: u32) -> u32;

    /// True with probability `percent`/100.
    fn percent(&mut self, percent: u32) -> bool {
        self.roll(100) < percent
    }

    /// True with probability 1/n.
    fn one_in(&mut self, n: u32) -> bool {
        n > 0 && self.roll(n) == 0
    }
}

/// Seeded ChaCha generator used by real sessions.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(0..sides)
    }
}

/// Replays a fixed list of draws in order.
///
/// Each draw is clamped into `0..sides`. Once the script runs out every draw
/// returns `sides - 1`, which makes percentage and one-in checks fail.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<u32>,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        match self.rolls.pop_front() {
            Some(r) => r.min(sides - 1),
            None => sides - 1,
        }
    }
}

/// Entries picked with probability proportional to their weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTable<T> {
    entries: Vec<(T, u32)>,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> WeightedTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table where every entry has weight 1.
    pub fn uniform(entries: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e, 1)).collect(),
        }
    }

    pub fn push(&mut self, entry: T, weight: u32) {
        self.entries.push((entry, weight));
    }

    /// Sum of all weights, or `None` if it does not fit in a `u32`.
    pub fn total_weight(&self) -> Option<u32> {
        self.entries
            .iter()
            .try_fold(0u32, |acc, (_, w)| acc.checked_add(*w))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(e, _)| e)
    }

    /// Draws once from `rng`. `None` when the table has no weight at all or
    /// its weights overflow.
    pub fn pick(&self, rng: &mut dyn RandomSource) -> Option<&T> {
        let total = self.total_weight()?;
        if total == 0 {
            return None;
        }

        let mut roll = rng.roll(total);
        for (entry, weight) in &self.entries {
            if roll < *weight {
                return Some(entry);
            }
            roll -= weight;
        }
        None
    }
}
