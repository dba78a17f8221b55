//! Index samplers used to pick templates without replacement.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Picks `amount` distinct indices from `0..population`.
///
/// Implementations must return exactly `amount` unique in-range indices;
/// the generator validates this and falls back otherwise.
pub trait TemplateSampler: Send + Sync {
    fn sample(&self, population: usize, amount: usize) -> Vec<usize>;
}

/// Thread-local randomness; the production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSampler;

impl TemplateSampler for RandomSampler {
    fn sample(&self, population: usize, amount: usize) -> Vec<usize> {
        let mut rng = rand::thread_rng();
        index::sample(&mut rng, population, amount.min(population)).into_vec()
    }
}

/// Reproducible picks from a fixed seed.
#[derive(Debug)]
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TemplateSampler for SeededSampler {
    fn sample(&self, population: usize, amount: usize) -> Vec<usize> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        index::sample(&mut *rng, population, amount.min(population)).into_vec()
    }
}

/// Replays fixed picks, one script per call. Exhausted scripts yield nothing.
#[derive(Debug, Default)]
pub struct ScriptedSampler {
    picks: Mutex<Vec<Vec<usize>>>,
}

impl ScriptedSampler {
    pub fn new(picks: Vec<Vec<usize>>) -> Self {
        let mut picks = picks;
        picks.reverse();
        Self {
            picks: Mutex::new(picks),
        }
    }
}

impl TemplateSampler for ScriptedSampler {
    fn sample(&self, _population: usize, _amount: usize) -> Vec<usize> {
        self.picks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_picks_are_distinct_and_in_range() {
        for _ in 0..50 {
            let picks = RandomSampler.sample(9, 5);
            assert_eq!(picks.len(), 5);
            assert!(picks.iter().all(|&i| i < 9));
            assert_eq!(picks.iter().collect::<HashSet<_>>().len(), 5);
        }
    }

    #[test]
    fn test_amount_is_capped_by_population() {
        assert_eq!(RandomSampler.sample(2, 5).len(), 2);
        assert_eq!(SeededSampler::new(1).sample(2, 5).len(), 2);
    }

    #[test]
    fn test_same_seed_same_picks() {
        let a = SeededSampler::new(42);
        let b = SeededSampler::new(42);
        for _ in 0..5 {
            assert_eq!(a.sample(9, 4), b.sample(9, 4));
        }
    }

    #[test]
    fn test_scripted_picks_replay_in_order() {
        let sampler = ScriptedSampler::new(vec![vec![0, 1, 2], vec![8, 7, 6]]);
        assert_eq!(sampler.sample(9, 3), vec![0, 1, 2]);
        assert_eq!(sampler.sample(9, 3), vec![8, 7, 6]);
        assert!(sampler.sample(9, 3).is_empty());
    }
}
