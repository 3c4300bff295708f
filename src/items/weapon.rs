//! Weapon definition: the combat-relevant state of an equippable weapon
//!
//! Base ranges, speed and skill association are fixed at crafting time;
//! the combat engine only ever mutates `hits`, `max_hits`, `wear` and the
//! loaded poison charges. Everything else is read-only here.

use serde::{Deserialize, Serialize};

use crate::entity::skills::SkillId;
use crate::items::attributes::{ElementDamages, WeaponAttributes};
use crate::items::material::{Material, MaterialClass};
use crate::items::poison::LoadedPoison;

/// Crafting quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Regular,
    Exceptional,
}

/// Magical damage tier found on loot weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DamageLevel {
    Regular,
    Ruin,
    Might,
    Force,
    Power,
    Vanquishing,
}

/// Magical accuracy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccuracyLevel {
    Regular,
    Accurate,
    Surpassingly,
    Eminently,
    Exceedingly,
    Supremely,
}

/// Magical durability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DurabilityLevel {
    Regular,
    Durable,
    Substantial,
    Massive,
    Fortified,
    Indestructible,
}

/// Mechanical weapon family; drives category-skill bonuses and the poison
/// delivery restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponFamily {
    Slashing,
    Piercing,
    Bashing,
    Axe,
    Polearm,
    Staff,
    Ranged,
    Harpoon,
    Pickaxe,
    Unarmed,
}

/// An equippable weapon's combat state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub family: WeaponFamily,
    pub skill: SkillId,

    pub min_damage: u16,
    pub max_damage: u16,
    /// Attack speed rating; higher swings faster.
    pub speed: f32,
    /// 1 = melee; ranged weapons reach further.
    pub max_range: u8,

    pub quality: Quality,
    pub damage_level: DamageLevel,
    pub accuracy_level: AccuracyLevel,
    pub durability_level: DurabilityLevel,
    pub material: Material,

    /// Remaining structural durability.
    pub hits: i32,
    pub max_hits: i32,
    /// Cosmetic degradation counter, 0..=100. Written on wear, never read
    /// back into combat math.
    pub wear: u8,

    pub slayer: Option<crate::combat::slayer::SlayerKind>,
    pub slayer2: Option<crate::combat::slayer::SlayerKind>,

    pub poison: Option<LoadedPoison>,

    pub attributes: WeaponAttributes,
    pub elements: ElementDamages,

    /// Consecrated by a paladin; redirects the whole split at the target's
    /// weakest resistance. Transient, never serialized.
    #[serde(skip)]
    pub consecrated: bool,
    /// Cursed by a necromancer; adds life leech. Transient, never serialized.
    #[serde(skip)]
    pub cursed: bool,
}

impl Weapon {
    /// A bare-fisted "weapon" for unarmed combatants.
    ///
    /// Zero max_hits keeps fists out of every durability path.
    pub fn fists() -> Self {
        Self::base("fists", WeaponFamily::Unarmed, SkillId::Wrestling, 1, 4, 50.0, 0)
    }

    pub fn longsword() -> Self {
        Self::base("longsword", WeaponFamily::Slashing, SkillId::Swords, 11, 17, 30.0, 70)
    }

    pub fn war_mace() -> Self {
        Self::base("war mace", WeaponFamily::Bashing, SkillId::Macing, 13, 17, 26.0, 110)
    }

    pub fn kryss() -> Self {
        Self::base("kryss", WeaponFamily::Piercing, SkillId::Fencing, 10, 12, 53.0, 60)
    }

    pub fn battle_axe() -> Self {
        Self::base("battle axe", WeaponFamily::Axe, SkillId::Swords, 14, 18, 28.0, 80)
    }

    pub fn bardiche() -> Self {
        Self::base("bardiche", WeaponFamily::Polearm, SkillId::Swords, 16, 20, 20.0, 90)
    }

    pub fn quarterstaff() -> Self {
        Self::base("quarterstaff", WeaponFamily::Staff, SkillId::Macing, 11, 14, 36.0, 50)
    }

    pub fn longbow() -> Self {
        let mut w = Self::base("longbow", WeaponFamily::Ranged, SkillId::Archery, 15, 19, 25.0, 50);
        w.max_range = 10;
        w.material = Material::Oak;
        w
    }

    pub fn harpoon() -> Self {
        Self::base("harpoon", WeaponFamily::Harpoon, SkillId::Fencing, 12, 16, 28.0, 50)
    }

    pub fn pickaxe() -> Self {
        Self::base("pickaxe", WeaponFamily::Pickaxe, SkillId::Fencing, 10, 14, 28.0, 50)
    }

    fn base(
        name: &str,
        family: WeaponFamily,
        skill: SkillId,
        min_damage: u16,
        max_damage: u16,
        speed: f32,
        durability: i32,
    ) -> Self {
        Self {
            name: name.into(),
            family,
            skill,
            min_damage,
            max_damage,
            speed,
            max_range: 1,
            quality: Quality::Regular,
            damage_level: DamageLevel::Regular,
            accuracy_level: AccuracyLevel::Regular,
            durability_level: DurabilityLevel::Regular,
            material: Material::Iron,
            hits: durability,
            max_hits: durability,
            wear: 0,
            slayer: None,
            slayer2: None,
            poison: None,
            attributes: WeaponAttributes::default(),
            elements: ElementDamages::default(),
            consecrated: false,
            cursed: false,
        }
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self.family, WeaponFamily::Ranged)
    }

    /// Wooden ranged weapons earn the fletching damage bonus.
    pub fn is_wooden_ranged(&self) -> bool {
        self.is_ranged() && self.material.class() == MaterialClass::Wood
    }

    /// Axe-family weapons earn the lumberjacking bonus.
    pub fn rewards_lumberjacking(&self) -> bool {
        matches!(self.family, WeaponFamily::Axe)
    }

    /// Bashing weapons earn the mining bonus.
    pub fn rewards_mining(&self) -> bool {
        matches!(self.family, WeaponFamily::Bashing)
    }

    pub fn is_harpoon(&self) -> bool {
        matches!(self.family, WeaponFamily::Harpoon)
    }

    /// Staves and wands earn the necromancy/magery bonuses.
    pub fn is_stave(&self) -> bool {
        matches!(self.family, WeaponFamily::Staff)
    }

    /// Bushido rewards the samurai weapon families only.
    pub fn rewards_bushido(&self) -> bool {
        matches!(
            self.family,
            WeaponFamily::Axe | WeaponFamily::Slashing | WeaponFamily::Polearm
        )
    }

    /// Whether this weapon can ever deliver a loaded poison.
    ///
    /// Bashing and pickaxe-family weapons never poison. Classic mode further
    /// restricts delivery to edged, pointed and ranged weapons.
    pub fn can_deliver_poison(&self, classic: bool) -> bool {
        match self.family {
            WeaponFamily::Bashing | WeaponFamily::Pickaxe => false,
            WeaponFamily::Staff | WeaponFamily::Unarmed => !classic,
            _ => true,
        }
    }

    /// Accuracy-tier bonus folded into the attacker's hit bucket.
    pub fn accuracy_bonus(&self) -> i32 {
        match self.accuracy_level {
            AccuracyLevel::Regular => 0,
            AccuracyLevel::Accurate => 2,
            AccuracyLevel::Surpassingly => 4,
            AccuracyLevel::Eminently => 6,
            AccuracyLevel::Exceedingly => 8,
            AccuracyLevel::Supremely => 10,
        }
    }

    /// Quality + damage tier bonus, in percent, for the modern damage bucket.
    pub fn damage_bonus(&self) -> i32 {
        let quality = match self.quality {
            Quality::Regular => 0,
            Quality::Exceptional => 20,
        };
        let tier = match self.damage_level {
            DamageLevel::Regular => 0,
            DamageLevel::Ruin => 15,
            DamageLevel::Might => 20,
            DamageLevel::Force => 25,
            DamageLevel::Power => 30,
            DamageLevel::Vanquishing => 35,
        };
        quality + tier
    }

    /// Flat damage offset for the classic formula: `2*tier - 1`.
    pub fn classic_damage_offset(&self) -> f64 {
        match self.damage_level {
            DamageLevel::Regular => 0.0,
            tier => 2.0 * tier as u8 as f64 - 1.0,
        }
    }
}
