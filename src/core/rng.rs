//! Server-scoped deterministic random source
//!
//! Every probability roll in the combat pipeline draws from one of these,
//! owned by the tick loop and passed down by `&mut`. A fixed seed therefore
//! reproduces an entire combat exchange, which the scenario tests rely on.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic PRNG wrapper for combat rolls
#[derive(Debug, Clone)]
pub struct CombatRng {
    inner: ChaCha8Rng,
}

impl CombatRng {
    /// Seeded construction for deterministic behavior
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Roll an integer in `0..bound`. A bound of 0 always yields 0.
    pub fn roll(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.inner.gen_range(0..bound)
    }

    /// Roll an integer in `min..=max` (inclusive both ends).
    pub fn between(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    /// Succeed with probability `chance` (clamped to [0, 1]).
    pub fn chance(&mut self, chance: f64) -> bool {
        if chance <= 0.0 {
            return false;
        }
        if chance >= 1.0 {
            return true;
        }
        self.inner.gen_bool(chance)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.inner.gen()
    }

    /// Uniform fraction in [0, 1)
    pub fn fraction(&mut self) -> f64 {
        self.inner.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = CombatRng::seed_from_u64(42);
        let mut b = CombatRng::seed_from_u64(42);

        for _ in 0..32 {
            assert_eq!(a.roll(100), b.roll(100));
        }
    }

    #[test]
    fn test_different_seed_diverges() {
        let mut a = CombatRng::seed_from_u64(42);
        let mut b = CombatRng::seed_from_u64(999);

        let rolls_a: Vec<u32> = (0..16).map(|_| a.roll(1000)).collect();
        let rolls_b: Vec<u32> = (0..16).map(|_| b.roll(1000)).collect();
        assert_ne!(rolls_a, rolls_b);
    }

    #[test]
    fn test_between_inclusive() {
        let mut rng = CombatRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = rng.between(3, 5);
            assert!((3..=5).contains(&v));
        }
        assert_eq!(rng.between(4, 4), 4);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = CombatRng::seed_from_u64(7);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
        assert!(!rng.chance(-0.5));
        assert!(rng.chance(2.0));
    }

    #[test]
    fn test_roll_zero_bound() {
        let mut rng = CombatRng::seed_from_u64(7);
        assert_eq!(rng.roll(0), 0);
    }
}
