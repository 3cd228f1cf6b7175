//! Seedable random sampling.
//!
//! All randomness in the bot (which restaurants to recommend, which photo
//! to show) goes through one `Sampler`, so a fixed seed makes replies
//! reproducible.

use eatba_core::catalog::RestaurantRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::sync::Mutex;

/// Maximum number of restaurants recommended at once.
pub const MAX_PICKS: usize = 3;

/// Thread-safe random source for restaurant and image selection.
pub struct Sampler {
    rng: Mutex<StdRng>,
}

impl Sampler {
    /// A sampler with a fixed seed (deterministic output).
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// A sampler seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seeded when `seed` is given, OS-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_os_rng(),
        }
    }

    /// Draw `min(group.len(), 3)` restaurants without replacement.
    pub fn sample<'a>(&self, group: &'a [RestaurantRecord]) -> Vec<&'a RestaurantRecord> {
        let amount = group.len().min(MAX_PICKS);
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        group.choose_multiple(&mut *rng, amount).collect()
    }

    /// Pick one item uniformly at random.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        items.choose(&mut *rng)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_os_rng()
    }
}
