//! Permutation sources for shuffle mode

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Produces the shuffle table for an image list
pub trait ShuffleSource {
    /// Return a permutation of `0..len`
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

/// Shuffles with the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShuffle;

impl ShuffleSource for RandomShuffle {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut table: Vec<usize> = (0..len).collect();
        table.shuffle(&mut rand::rng());
        table
    }
}

/// Reproducible shuffles from a fixed seed
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    seed: u64,
    rng: StdRng,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ShuffleSource for SeededShuffle {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut table: Vec<usize> = (0..len).collect();
        table.shuffle(&mut self.rng);
        table
    }
}

/// Check that `table` holds every index of `0..len` exactly once
pub fn is_permutation(table: &[usize], len: usize) -> bool {
    if table.len() != len {
        return false;
    }

    let mut seen = vec![false; len];
    for &i in table {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
