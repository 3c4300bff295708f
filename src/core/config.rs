//! Combat configuration with documented constants
//!
//! All tunable caps and toggles are collected here with explanations of
//! their purpose and how they interact with each other.

use serde::{Deserialize, Serialize};

/// Which combat formula family is in force.
///
/// Selected once at configuration time; the resolver and calculator consult
/// it through [`CombatConfig`] rather than branching ad hoc. Both families
/// are long-lived compatibility surfaces and neither may be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruleset {
    /// The original multiplicative math: per-bonus compounding damage
    /// scaling and the `(skill+50)/((skill+50)*2)` hit formula.
    Classic,
    /// The attribute-driven additive math: summed percentage buckets,
    /// offset-20 hit formula with a 2% floor.
    Modern,
}

/// Configuration for the combat resolution pipeline
///
/// These values have been tuned against the live shards. Changing them
/// shifts the melee balance; the caps in particular exist to keep stacked
/// equipment attributes from running away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Formula family selector (see [`Ruleset`])
    pub ruleset: Ruleset,

    // === HIT RESOLUTION ===
    /// Cap on the attacker's summed accuracy bonus, in percent.
    ///
    /// Attack-chance attributes, technique accuracy and situational buffs
    /// are added together and clamped here before entering the formula.
    pub hit_chance_cap: i32,

    /// Cap on the defender's summed evasion bonus, in percent.
    pub defend_chance_cap: i32,

    /// Floor on the final hit chance under the modern ruleset (fraction).
    pub min_hit_chance: f64,

    // === DAMAGE SCALING ===
    /// Cap on the status-bar damage-increase bucket, in percent.
    ///
    /// Covers the weapon-damage attribute plus transformation, fury,
    /// mastery and discordance modifiers. Skill-derived bonuses are not
    /// subject to this cap.
    pub damage_increase_cap: i32,

    /// Cap on the post-calculation stacking bonus (slayers, pack instinct,
    /// enemy-of-one, honor), in percent. 300 means "at most x4 damage".
    pub damage_bonus_cap: i32,

    /// Damage value above which diminishing returns apply.
    pub damage_soft_cap: f64,

    /// Fraction of damage retained above the soft cap.
    ///
    /// At 0.5, every point above `damage_soft_cap` counts for half.
    pub damage_soft_cap_falloff: f64,

    // === SWING TIMING ===
    /// Cap on the weapon-speed attribute, in percent.
    pub weapon_speed_cap: i32,

    /// Hard floor on the swing delay, in seconds.
    pub min_swing_delay: f64,

    // === MITIGATION ===
    /// Cap on the parry chance (fraction).
    pub parry_chance_cap: f64,

    /// Fraction of damage that survives a successful block.
    pub parry_damage_fraction: f64,

    // === SIDE EFFECTS ===
    /// Classic poisoning mode: when false, weapons never deliver their
    /// loaded poison on hit (delivery moves to the infectious-strike
    /// technique instead).
    pub classic_poisoning: bool,

    /// When true, a mounted defender's mount can absorb a glancing hit
    /// after the rider is missed (classic shard behavior).
    pub mounted_glance: bool,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            ruleset: Ruleset::Modern,

            // Accuracy/evasion caps (45% each side)
            hit_chance_cap: 45,
            defend_chance_cap: 45,
            min_hit_chance: 0.02,

            // Damage caps
            damage_increase_cap: 100,
            damage_bonus_cap: 300,
            damage_soft_cap: 35.0,
            damage_soft_cap_falloff: 0.5,

            // Swing timing
            weapon_speed_cap: 60,
            min_swing_delay: 1.25,

            // Mitigation
            parry_chance_cap: 0.58,
            parry_damage_fraction: 0.5,

            // Side effects
            classic_poisoning: true,
            mounted_glance: false,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config running the classic formula family.
    pub fn classic() -> Self {
        Self {
            ruleset: Ruleset::Classic,
            ..Self::default()
        }
    }

    /// Load and validate a config from TOML (shard settings files).
    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(text).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_hit_chance) {
            return Err(format!(
                "min_hit_chance ({}) must be a fraction in [0, 1]",
                self.min_hit_chance
            ));
        }

        if !(0.0..=1.0).contains(&self.parry_chance_cap)
            || !(0.0..=1.0).contains(&self.parry_damage_fraction)
        {
            return Err("parry_chance_cap and parry_damage_fraction must be fractions".into());
        }

        if self.hit_chance_cap < 0 || self.defend_chance_cap < 0 {
            return Err("hit/defend chance caps must be non-negative".into());
        }

        // A bonus cap below 0 would turn every bonus into a penalty
        if self.damage_increase_cap < 0 || self.damage_bonus_cap < 0 {
            return Err("damage caps must be non-negative".into());
        }

        if self.min_swing_delay <= 0.0 {
            return Err(format!(
                "min_swing_delay ({}) must be positive",
                self.min_swing_delay
            ));
        }

        Ok(())
    }
}
