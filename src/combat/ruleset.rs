//! Hit-chance formula families
//!
//! The [`Ruleset`] flag is declared next to the rest of the configuration;
//! its combat math lives here. Both families are compatibility surfaces:
//! the classic ratio must keep matching the original shard behavior
//! exactly, and the modern formula keeps its double rescale and 2% floor.

use crate::core::config::Ruleset;

/// Skill floor for the modern formula: values at or below -20 are raised
/// to just above it so the ratio stays finite.
const MODERN_SKILL_FLOOR: f64 = -19.9;

/// Same guard for the classic formula at its -50 offset.
const CLASSIC_SKILL_FLOOR: f64 = -49.9;

impl Ruleset {
    /// Chance for the attacker to land a swing.
    ///
    /// `atk_bonus`/`def_bonus` are the already-capped accuracy and evasion
    /// buckets; the classic family ignores them by construction (callers
    /// pass zero).
    pub fn hit_chance(
        &self,
        atk_skill: f64,
        def_skill: f64,
        atk_bonus: i32,
        def_bonus: i32,
        min_chance: f64,
    ) -> f64 {
        match self {
            Ruleset::Modern => {
                let atk = if atk_skill <= -20.0 { MODERN_SKILL_FLOOR } else { atk_skill };
                let def = if def_skill <= -20.0 { MODERN_SKILL_FLOOR } else { def_skill };

                let ours = (atk + 20.0) * (100.0 + atk_bonus as f64);
                // A deeply negative defense bucket must not zero the denominator
                let theirs = ((def + 20.0) * (100.0 + def_bonus as f64)).max(0.1);

                let mut chance = ours / (theirs * 2.0);
                // Accuracy rescales the ratio a second time
                chance *= 1.0 + atk_bonus as f64 / 100.0;

                chance.clamp(min_chance, 1.0)
            }
            Ruleset::Classic => {
                let atk = if atk_skill <= -50.0 { CLASSIC_SKILL_FLOOR } else { atk_skill };
                let def = if def_skill <= -50.0 { CLASSIC_SKILL_FLOOR } else { def_skill };

                let chance = (atk + 50.0) / ((def + 50.0) * 2.0);
                chance.clamp(0.0, 1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_exact_ratio() {
        // Attacker 100 vs defender 50: (100+50) / ((50+50)*2) = 0.75
        let chance = Ruleset::Classic.hit_chance(100.0, 50.0, 0, 0, 0.02);
        assert_eq!(chance, 0.75);
    }

    #[test]
    fn test_classic_equal_skill_is_half() {
        let chance = Ruleset::Classic.hit_chance(100.0, 100.0, 0, 0, 0.02);
        assert_eq!(chance, 0.5);
    }

    #[test]
    fn test_modern_equal_skill_no_bonus_is_half() {
        let chance = Ruleset::Modern.hit_chance(100.0, 100.0, 0, 0, 0.02);
        assert_eq!(chance, 0.5);
    }

    #[test]
    fn test_modern_floor_applies() {
        let chance = Ruleset::Modern.hit_chance(0.0, 120.0, 0, 45, 0.02);
        assert!(chance >= 0.02);
    }

    #[test]
    fn test_modern_bonus_rescales_twice() {
        let flat = Ruleset::Modern.hit_chance(50.0, 50.0, 0, 0, 0.02);
        let boosted = Ruleset::Modern.hit_chance(50.0, 50.0, 20, 0, 0.02);
        // 20% bonus enters the numerator and then rescales the ratio again
        assert!((boosted / flat - 1.2 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_in_attacker_skill() {
        for ruleset in [Ruleset::Modern, Ruleset::Classic] {
            let mut last = 0.0;
            for skill in [0.0, 25.0, 50.0, 75.0, 100.0, 120.0] {
                let chance = ruleset.hit_chance(skill, 80.0, 0, 0, 0.02);
                assert!(chance >= last, "{:?} not monotonic at {}", ruleset, skill);
                last = chance;
            }
        }
    }

    #[test]
    fn test_antitonic_in_defender_skill() {
        for ruleset in [Ruleset::Modern, Ruleset::Classic] {
            let mut last = 1.0;
            for skill in [0.0, 25.0, 50.0, 75.0, 100.0, 120.0] {
                let chance = ruleset.hit_chance(80.0, skill, 0, 0, 0.02);
                assert!(chance <= last, "{:?} not antitonic at {}", ruleset, skill);
                last = chance;
            }
        }
    }

    #[test]
    fn test_extreme_negative_defense_bucket_guarded() {
        let chance = Ruleset::Modern.hit_chance(50.0, 50.0, 0, -100, 0.02);
        assert!(chance.is_finite());
        assert!((0.02..=1.0).contains(&chance));
    }

    #[test]
    fn test_degenerate_skills_stay_finite() {
        for ruleset in [Ruleset::Modern, Ruleset::Classic] {
            let chance = ruleset.hit_chance(-100.0, -100.0, 0, 0, 0.02);
            assert!(chance.is_finite());
            assert!((0.0..=1.0).contains(&chance));
        }
    }
}
