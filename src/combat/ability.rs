//! Technique integration: weapon abilities and special moves
//!
//! Techniques are the pluggable hooks the resolver, calculator and applier
//! consult. Each combatant can have at most one weapon ability and one
//! special move armed per swing, carried in the swing session; either can
//! be cleared mid-resolution when its precondition fails (a parried armor
//! ignore, for instance, fizzles without effect).
//!
//! Hit/miss reactions live where they act: infectious strike in the poison
//! gate, double strike as the session flag, and a whiff simply clears
//! whatever was armed.

use serde::{Deserialize, Serialize};

/// Capability shared by all technique variants.
pub trait Technique {
    /// Accuracy contribution to the attacker's hit bucket, in percent.
    fn accuracy_bonus(&self) -> i32 {
        0
    }

    /// Damage multiplier folded into the stacking bucket.
    fn damage_scalar(&self) -> f64 {
        1.0
    }

    /// Whether the final damage bypasses the armor/resistance layer.
    fn ignores_armor(&self) -> bool {
        false
    }

    /// Last-moment precondition; returning false clears the technique
    /// without any of its effects firing.
    fn on_before_damage(&self) -> bool {
        true
    }

    /// Multiplier on weapon property chances (leech and proc rolls).
    fn property_bonus(&self) -> f64 {
        1.0
    }
}

/// Abilities granted by the weapon itself (or innately, for creatures).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponAbility {
    /// Bypass the resistance layer entirely, at reduced damage.
    ArmorIgnore,
    /// Heavy single blow.
    CrushingBlow,
    /// Two fast swings at reduced damage each.
    DoubleStrike,
    /// Deliver the loaded poison through the modern path.
    InfectiousStrike,
    /// Half-damage strike from the shadows.
    ShadowStrike,
    /// Wild accuracy at the cost of a clean hit.
    WhirlwindAttack,
}

impl Technique for WeaponAbility {
    fn accuracy_bonus(&self) -> i32 {
        match self {
            WeaponAbility::WhirlwindAttack => 10,
            _ => 0,
        }
    }

    fn damage_scalar(&self) -> f64 {
        match self {
            WeaponAbility::ArmorIgnore => 0.9,
            WeaponAbility::CrushingBlow => 1.5,
            WeaponAbility::DoubleStrike => 0.9,
            WeaponAbility::ShadowStrike => 0.5,
            _ => 1.0,
        }
    }

    fn ignores_armor(&self) -> bool {
        matches!(self, WeaponAbility::ArmorIgnore)
    }
}

/// Stance-driven special moves from the eastern disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialMove {
    /// Bushido: +50 accuracy strike.
    LightningStrike,
    /// Bushido: execution follow-up; misses carry a penalty elsewhere.
    HonorableExecution,
    /// Ninjitsu: armor-bypassing assassination strike.
    DeathStrike,
    /// Ninjitsu: opening strike from stealth.
    SurpriseAttack,
    /// Focused single-target attack.
    FocusAttack,
}

impl Technique for SpecialMove {
    fn accuracy_bonus(&self) -> i32 {
        match self {
            SpecialMove::LightningStrike => 50,
            _ => 0,
        }
    }

    fn damage_scalar(&self) -> f64 {
        match self {
            SpecialMove::HonorableExecution => 1.5,
            SpecialMove::FocusAttack => 1.25,
            SpecialMove::SurpriseAttack => 0.9,
            _ => 1.0,
        }
    }

    fn ignores_armor(&self) -> bool {
        matches!(self, SpecialMove::DeathStrike)
    }

    fn property_bonus(&self) -> f64 {
        match self {
            SpecialMove::FocusAttack => 1.6,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_neutral() {
        assert_eq!(WeaponAbility::CrushingBlow.accuracy_bonus(), 0);
        assert_eq!(SpecialMove::DeathStrike.damage_scalar(), 1.0);
        assert!(WeaponAbility::CrushingBlow.on_before_damage());
    }

    #[test]
    fn test_armor_ignore_flags() {
        assert!(WeaponAbility::ArmorIgnore.ignores_armor());
        assert!(SpecialMove::DeathStrike.ignores_armor());
        assert!(!WeaponAbility::DoubleStrike.ignores_armor());
    }

    #[test]
    fn test_lightning_strike_accuracy() {
        assert_eq!(SpecialMove::LightningStrike.accuracy_bonus(), 50);
    }
}
