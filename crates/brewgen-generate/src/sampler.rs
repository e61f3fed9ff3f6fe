use std::ops::RangeInclusive;

use chrono::{NaiveDateTime, TimeDelta};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of every random draw made during a run.
///
/// Generators only talk to this trait, so a run is reproducible from its seed
/// and tests can script exact draw sequences.
pub trait Sampler {
    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn int_in(&mut self, low: u32, high: u32) -> u32;

    /// Uniform timestamp in `[start, end)`, whole seconds. Returns `start` for
    /// an empty interval.
    fn timestamp_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime;

    /// Fair coin.
    fn coin(&mut self) -> bool {
        self.int_in(1, 2) == 1
    }

    fn pick_id(&mut self, ids: &RangeInclusive<u32>) -> u32 {
        self.int_in(*ids.start(), *ids.end())
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let last = u32::try_from(items.len().checked_sub(1)?).ok()?;
        items.get(self.int_in(0, last) as usize)
    }

    /// `len` uniform decimal digits.
    fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + self.int_in(0, 9) as u8))
            .collect()
    }
}

/// ChaCha8-backed sampler seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededSampler {
    rng: ChaCha8Rng,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Sampler for SeededSampler {
    fn int_in(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }

    fn timestamp_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
        let span = (end - start).num_seconds();
        if span <= 0 {
            return start;
        }
        start + TimeDelta::seconds(self.rng.random_range(0..span))
    }
}
