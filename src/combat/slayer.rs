//! Slayer weapon tags and creature classification
//!
//! A slayer tag doubles damage against its matching creature class. Wielding
//! one is not free: creatures from the opposing class strike the wielder
//! harder in return.

use serde::{Deserialize, Serialize};

/// Broad creature classification used by slayers and enemy-of-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureClass {
    Humanoid,
    Undead,
    Arachnid,
    Reptile,
    Elemental,
    Demon,
    Dragon,
    Beast,
}

/// Slayer tags a weapon can carry (at most two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlayerKind {
    /// Undead bane.
    Silver,
    /// Humanoid bane.
    Repond,
    ArachnidDoom,
    ReptilianDeath,
    ElementalBan,
    Exorcism,
    DragonSlaying,
}

impl SlayerKind {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(SlayerKind::Silver),
            1 => Some(SlayerKind::Repond),
            2 => Some(SlayerKind::ArachnidDoom),
            3 => Some(SlayerKind::ReptilianDeath),
            4 => Some(SlayerKind::ElementalBan),
            5 => Some(SlayerKind::Exorcism),
            6 => Some(SlayerKind::DragonSlaying),
            _ => None,
        }
    }

    /// The class this slayer is effective against.
    pub fn slays(&self) -> CreatureClass {
        match self {
            SlayerKind::Silver => CreatureClass::Undead,
            SlayerKind::Repond => CreatureClass::Humanoid,
            SlayerKind::ArachnidDoom => CreatureClass::Arachnid,
            SlayerKind::ReptilianDeath => CreatureClass::Reptile,
            SlayerKind::ElementalBan => CreatureClass::Elemental,
            SlayerKind::Exorcism => CreatureClass::Demon,
            SlayerKind::DragonSlaying => CreatureClass::Dragon,
        }
    }

    /// The class whose members punish wielders of this slayer.
    pub fn opposed_by(&self) -> Option<CreatureClass> {
        match self {
            SlayerKind::Silver => Some(CreatureClass::Humanoid),
            SlayerKind::Repond => Some(CreatureClass::Undead),
            SlayerKind::ArachnidDoom => Some(CreatureClass::Reptile),
            SlayerKind::ReptilianDeath => Some(CreatureClass::Arachnid),
            SlayerKind::ElementalBan => Some(CreatureClass::Demon),
            SlayerKind::Exorcism => Some(CreatureClass::Elemental),
            SlayerKind::DragonSlaying => None,
        }
    }
}

/// Result of the slayer comparison for one swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlayerMatch {
    /// Attacker's weapon slays the defender's class.
    Slayer,
    /// Defender's weapon provokes the attacker's class.
    Opposition,
    None,
}

fn weapon_slays(weapon: &crate::items::weapon::Weapon, class: CreatureClass) -> bool {
    [weapon.slayer, weapon.slayer2]
        .into_iter()
        .flatten()
        .any(|s| s.slays() == class)
}

fn weapon_provokes(weapon: &crate::items::weapon::Weapon, class: CreatureClass) -> bool {
    [weapon.slayer, weapon.slayer2]
        .into_iter()
        .flatten()
        .any(|s| s.opposed_by() == Some(class))
}

/// Compare attacker weapon and defender class; a direct slayer match wins
/// over any opposition effect.
pub fn check_slayers(
    attacker_weapon: &crate::items::weapon::Weapon,
    attacker_class: Option<CreatureClass>,
    defender_weapon: &crate::items::weapon::Weapon,
    defender_class: Option<CreatureClass>,
) -> SlayerMatch {
    if let Some(class) = defender_class {
        if weapon_slays(attacker_weapon, class) {
            return SlayerMatch::Slayer;
        }
    }

    if let Some(class) = attacker_class {
        if weapon_provokes(defender_weapon, class) {
            return SlayerMatch::Opposition;
        }
    }

    SlayerMatch::None
}
