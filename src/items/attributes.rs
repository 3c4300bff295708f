//! Percentage attribute bundles carried by weapons and worn gear
//!
//! All values are flat percentages (or percent-chances) and default to zero;
//! an absent attribute is indistinguishable from a zero one, which is what
//! keeps the hot path free of missing-data errors.

use serde::{Deserialize, Serialize};

/// Attribute bundle for weapons.
///
/// Chance attributes (`leech_*`, `area_*`, `hit_*`) are percent-chances
/// rolled per hit; the rest are flat percentage modifiers fed into the
/// capped buckets of the hit and damage formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponAttributes {
    pub attack_chance: i32,
    pub defend_chance: i32,
    pub weapon_damage: i32,
    pub weapon_speed: i32,

    /// Use the best of the three melee skills instead of the weapon's own.
    pub use_best_skill: bool,
    /// Substitute Magery for the weapon skill when it is higher.
    pub mage_weapon: bool,

    /// Chance per eligible hit to regain 1 durability instead of losing it.
    pub self_repair: i32,
    /// Extra durability percentage folded into the scale factor.
    pub bonus_durability: i32,

    // Leech chances; each success transfers 15% of dealt damage.
    pub leech_life: i32,
    pub leech_stamina: i32,
    pub leech_mana: i32,

    // Elemental area-burst chances.
    pub area_physical: i32,
    pub area_fire: i32,
    pub area_cold: i32,
    pub area_poison: i32,
    pub area_energy: i32,

    // Single-target spell proc chances.
    pub hit_magic_arrow: i32,
    pub hit_harm: i32,
    pub hit_fireball: i32,
    pub hit_lightning: i32,
    pub hit_dispel: i32,
    pub hit_lower_attack: i32,
    pub hit_lower_defense: i32,
}

impl WeaponAttributes {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The attribute subset worn gear can carry (jewelry, armor affixes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearAttributes {
    pub attack_chance: i32,
    pub defend_chance: i32,
    pub weapon_damage: i32,
}

/// Elemental damage percentages imbued on a weapon.
///
/// Physical is never stored: it is always the remainder after the listed
/// channels, so the split invariant (sum == 100) holds by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDamages {
    pub fire: u8,
    pub cold: u8,
    pub poison: u8,
    pub energy: u8,
    pub chaos: u8,
    pub direct: u8,
}

impl ElementDamages {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn total(&self) -> u32 {
        self.fire as u32
            + self.cold as u32
            + self.poison as u32
            + self.energy as u32
            + self.chaos as u32
            + self.direct as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(WeaponAttributes::default().is_empty());
        assert!(ElementDamages::default().is_empty());
    }

    #[test]
    fn test_any_field_marks_non_empty() {
        let attrs = WeaponAttributes {
            leech_life: 20,
            ..Default::default()
        };
        assert!(!attrs.is_empty());
    }

    #[test]
    fn test_element_total() {
        let elems = ElementDamages {
            fire: 40,
            cold: 10,
            ..Default::default()
        };
        assert_eq!(elems.total(), 50);
    }
}
