//! Combatant: the attacker/defender model consumed by the resolution engine
//!
//! Players and creatures share one shape. Creature-only behavior (innate
//! damage ranges, elemental profiles, pack instinct, corrosive blood) lives
//! in optional fields that default to absent, so the engine never branches
//! on a "kind" tag.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::elements::DamageSplit;
use crate::combat::slayer::CreatureClass;
use crate::core::types::EntityId;
use crate::entity::skills::SkillSet;
use crate::entity::status::StatusEffects;
use crate::items::gear::{GearPiece, WearSlot};
use crate::items::poison::PoisonLevel;
use crate::items::weapon::Weapon;

/// Body archetype; parry is a human-bodied privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Human,
    Monster,
    Animal,
}

/// Pack-hunting species tag. Allied controlled creatures sharing a tag gain
/// stacking damage against a common target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackInstinct {
    Canine,
    Feline,
    Arachnid,
    Daemon,
    Equine,
}

/// Per-type damage resistances, in percent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Resistances {
    pub physical: i32,
    pub fire: i32,
    pub cold: i32,
    pub poison: i32,
    pub energy: i32,
}

/// Alternate soul-bound essence pool; when present it replaces the weapon's
/// leech attributes as the source of leech chances.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SoulBond {
    pub life_essence: i32,
    pub stamina_essence: i32,
    pub mana_essence: i32,
}

/// A ridden mount, able to absorb glancing hits for its rider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mount {
    pub name: String,
    pub hits: i32,
}

/// A participant in combat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub body: Body,
    pub player: bool,

    // Raw stats
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,

    // Resource pools
    pub hits: i32,
    pub hits_max: i32,
    pub stamina: i32,
    pub stamina_max: i32,
    pub mana: i32,
    pub mana_max: i32,

    pub skills: SkillSet,
    pub status: StatusEffects,
    pub resistances: Resistances,

    pub weapon: Weapon,
    pub equipment: AHashMap<WearSlot, GearPiece>,

    // Creature-only behavior; absent for players
    /// Innate damage range overriding the weapon's.
    pub damage_range: Option<(u16, u16)>,
    /// Innate elemental damage profile.
    pub innate_elements: Option<DamageSplit>,
    /// Slayer-relevant classification.
    pub class: Option<CreatureClass>,
    pub pack_instinct: Option<PackInstinct>,
    /// Allied same-pack creatures currently engaging this combatant's
    /// target, maintained by the AI layer.
    pub pack_allies: u8,
    /// Acid-blooded: melee weapons always corrode on hit.
    pub corrosive: bool,
    /// Creature-innate technique armed by chance at swing start.
    pub innate_ability: Option<crate::combat::ability::WeaponAbility>,
    /// Trigger chance for the innate technique, in percent.
    pub innate_ability_chance: i32,

    pub poisoned: Option<PoisonLevel>,
    pub poison_immunity: Option<PoisonLevel>,

    pub soul_bond: Option<SoulBond>,
    pub mount: Option<Mount>,
}

impl Combatant {
    /// Bare unarmed human; the starting point every builder refines.
    pub fn new(name: &str) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            body: Body::Human,
            player: false,
            strength: 50,
            dexterity: 50,
            intelligence: 50,
            hits: 50,
            hits_max: 50,
            stamina: 50,
            stamina_max: 50,
            mana: 50,
            mana_max: 50,
            skills: SkillSet::new(),
            status: StatusEffects::default(),
            resistances: Resistances::default(),
            weapon: Weapon::fists(),
            equipment: AHashMap::new(),
            damage_range: None,
            innate_elements: None,
            class: None,
            pack_instinct: None,
            pack_allies: 0,
            corrosive: false,
            innate_ability: None,
            innate_ability_chance: 0,
            poisoned: None,
            poison_immunity: None,
            soul_bond: None,
            mount: None,
        }
    }

    /// Test/spawn preset: seasoned human swordsman.
    pub fn veteran(name: &str) -> Self {
        use crate::entity::skills::SkillId;

        let mut c = Self::new(name);
        c.player = true;
        c.strength = 100;
        c.dexterity = 90;
        c.hits = 100;
        c.hits_max = 100;
        c.stamina = 90;
        c.stamina_max = 90;
        c.skills = SkillSet::new()
            .with(SkillId::Swords, 100.0)
            .with(SkillId::Tactics, 100.0)
            .with(SkillId::Anatomy, 90.0)
            .with(SkillId::Parry, 80.0);
        c.weapon = Weapon::longsword();
        c
    }

    /// Test/spawn preset: non-human brute relying on wrestling.
    pub fn brute(name: &str, class: CreatureClass) -> Self {
        use crate::entity::skills::SkillId;

        let mut c = Self::new(name);
        c.body = Body::Monster;
        c.strength = 120;
        c.hits = 140;
        c.hits_max = 140;
        c.skills = SkillSet::new()
            .with(SkillId::Wrestling, 80.0)
            .with(SkillId::Tactics, 70.0);
        c.damage_range = Some((8, 14));
        c.class = Some(class);
        c
    }

    pub fn is_human_body(&self) -> bool {
        self.body == Body::Human
    }

    pub fn alive(&self) -> bool {
        self.hits > 0
    }

    /// Summed attack-chance attribute across weapon and worn gear.
    pub fn attack_chance_attr(&self) -> i32 {
        self.weapon.attributes.attack_chance
            + self.equipment.values().map(|g| g.attrs.attack_chance).sum::<i32>()
    }

    /// Summed defend-chance attribute across weapon and worn gear.
    pub fn defend_chance_attr(&self) -> i32 {
        self.weapon.attributes.defend_chance
            + self.equipment.values().map(|g| g.attrs.defend_chance).sum::<i32>()
    }

    /// Summed weapon-damage attribute across weapon and worn gear.
    pub fn weapon_damage_attr(&self) -> i32 {
        self.weapon.attributes.weapon_damage
            + self.equipment.values().map(|g| g.attrs.weapon_damage).sum::<i32>()
    }

    pub fn resistance(&self, ty: crate::core::types::DamageType) -> i32 {
        use crate::core::types::DamageType;
        match ty {
            DamageType::Physical => self.resistances.physical,
            DamageType::Fire => self.resistances.fire,
            DamageType::Cold => self.resistances.cold,
            DamageType::Poison => self.resistances.poison,
            DamageType::Energy => self.resistances.energy,
            // Chaos and direct damage bypass resistances entirely
            DamageType::Chaos | DamageType::Direct => 0,
        }
    }

    pub fn shield(&self) -> Option<&GearPiece> {
        self.equipment
            .get(&WearSlot::Shield)
            .filter(|g| g.kind == crate::items::gear::GearKind::Shield)
    }

    // Pool mutation, all clamped to [0, max]

    pub fn take_damage(&mut self, amount: i32) {
        self.hits = (self.hits - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.hits = (self.hits + amount).min(self.hits_max);
    }

    pub fn gain_stamina(&mut self, amount: i32) {
        self.stamina = (self.stamina + amount).min(self.stamina_max);
    }

    pub fn gain_mana(&mut self, amount: i32) {
        self.mana = (self.mana + amount).min(self.mana_max);
    }

    pub fn drain_mana(&mut self, amount: i32) -> i32 {
        let drained = amount.min(self.mana);
        self.mana -= drained;
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DamageType;
    use crate::items::attributes::GearAttributes;

    #[test]
    fn test_pools_clamp() {
        let mut c = Combatant::new("clamp");
        c.take_damage(1000);
        assert_eq!(c.hits, 0);
        c.heal(1000);
        assert_eq!(c.hits, c.hits_max);
        c.gain_stamina(1000);
        assert_eq!(c.stamina, c.stamina_max);
    }

    #[test]
    fn test_drain_mana_reports_actual() {
        let mut c = Combatant::new("drain");
        c.mana = 5;
        assert_eq!(c.drain_mana(20), 5);
        assert_eq!(c.mana, 0);
    }

    #[test]
    fn test_attribute_totals_span_gear() {
        let mut c = Combatant::veteran("ring bearer");
        c.weapon.attributes.attack_chance = 10;
        c.equipment.insert(
            WearSlot::Ring,
            GearPiece::jewelry(
                "ruby ring",
                GearAttributes {
                    attack_chance: 5,
                    ..Default::default()
                },
            ),
        );
        assert_eq!(c.attack_chance_attr(), 15);
    }

    #[test]
    fn test_chaos_ignores_resists() {
        let mut c = Combatant::new("resistant");
        c.resistances.physical = 70;
        assert_eq!(c.resistance(DamageType::Physical), 70);
        assert_eq!(c.resistance(DamageType::Chaos), 0);
        assert_eq!(c.resistance(DamageType::Direct), 0);
    }

    #[test]
    fn test_shield_lookup_requires_shield_kind() {
        let mut c = Combatant::new("shieldless");
        assert!(c.shield().is_none());
        c.equipment
            .insert(WearSlot::Shield, GearPiece::shield("kite shield", 12, 60));
        assert!(c.shield().is_some());
    }
}
