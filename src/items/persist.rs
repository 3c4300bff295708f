//! Versioned binary persistence for weapon combat state
//!
//! Layout: `u32` version, then version-specific fields. Since v1 a flag
//! word records which optional fields follow, so a plain iron longsword
//! costs a handful of bytes. Readers accept every historical version and
//! fill absent fields with the documented baselines (`Material::Iron`,
//! `Quality::Regular`, no poison).
//!
//! Version history:
//! - v0: fixed field layout, no flags.
//! - v1: flag word; slayers, attributes and elemental damages joined.
//! - v2 (current): cosmetic `wear` byte follows the version.

use bitflags::bitflags;

use crate::core::error::{CombatError, Result};
use crate::entity::skills::SkillId;
use crate::items::attributes::{ElementDamages, WeaponAttributes};
use crate::items::material::Material;
use crate::items::poison::{LoadedPoison, PoisonLevel};
use crate::items::weapon::{
    AccuracyLevel, DamageLevel, DurabilityLevel, Quality, Weapon, WeaponFamily,
};

const CURRENT_VERSION: u32 = 2;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct SaveFlags: u32 {
        const QUALITY          = 1 << 0;
        const DAMAGE_LEVEL     = 1 << 1;
        const ACCURACY_LEVEL   = 1 << 2;
        const DURABILITY_LEVEL = 1 << 3;
        const MATERIAL         = 1 << 4;
        const SLAYER           = 1 << 5;
        const SLAYER2          = 1 << 6;
        const POISON           = 1 << 7;
        const ATTRIBUTES       = 1 << 8;
        const ELEMENTS         = 1 << 9;
    }
}

// === Encoding ===

struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    fn new() -> Self {
        Self { buf: Vec::with_capacity(64) }
    }

    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        self.u16(bytes.len().min(u16::MAX as usize) as u16);
        self.buf.extend_from_slice(&bytes[..bytes.len().min(u16::MAX as usize)]);
    }
}

/// Serialize a weapon's combat state at the current version.
pub fn write_weapon(weapon: &Weapon) -> Vec<u8> {
    let mut w = ByteWriter::new();

    w.u32(CURRENT_VERSION);
    w.u8(weapon.wear);

    let mut flags = SaveFlags::empty();
    flags.set(SaveFlags::QUALITY, weapon.quality != Quality::Regular);
    flags.set(SaveFlags::DAMAGE_LEVEL, weapon.damage_level != DamageLevel::Regular);
    flags.set(SaveFlags::ACCURACY_LEVEL, weapon.accuracy_level != AccuracyLevel::Regular);
    flags.set(
        SaveFlags::DURABILITY_LEVEL,
        weapon.durability_level != DurabilityLevel::Regular,
    );
    flags.set(SaveFlags::MATERIAL, weapon.material != Material::Iron);
    flags.set(SaveFlags::SLAYER, weapon.slayer.is_some());
    flags.set(SaveFlags::SLAYER2, weapon.slayer2.is_some());
    flags.set(SaveFlags::POISON, weapon.poison.is_some());
    flags.set(SaveFlags::ATTRIBUTES, !weapon.attributes.is_empty());
    flags.set(SaveFlags::ELEMENTS, !weapon.elements.is_empty());
    w.u32(flags.bits());

    // Fixed fields
    w.str(&weapon.name);
    w.u8(weapon.family as u8);
    w.u8(weapon.skill as u8);
    w.u16(weapon.min_damage);
    w.u16(weapon.max_damage);
    w.f32(weapon.speed);
    w.u8(weapon.max_range);
    w.i32(weapon.hits);
    w.i32(weapon.max_hits);

    // Flagged fields
    if flags.contains(SaveFlags::QUALITY) {
        w.u8(weapon.quality as u8);
    }
    if flags.contains(SaveFlags::DAMAGE_LEVEL) {
        w.u8(weapon.damage_level as u8);
    }
    if flags.contains(SaveFlags::ACCURACY_LEVEL) {
        w.u8(weapon.accuracy_level as u8);
    }
    if flags.contains(SaveFlags::DURABILITY_LEVEL) {
        w.u8(weapon.durability_level as u8);
    }
    if flags.contains(SaveFlags::MATERIAL) {
        w.u8(weapon.material as u8);
    }
    if let Some(slayer) = weapon.slayer {
        w.u8(slayer as u8);
    }
    if let Some(slayer) = weapon.slayer2 {
        w.u8(slayer as u8);
    }
    if let Some(poison) = weapon.poison {
        w.u8(poison.level.index() as u8);
        w.u8(poison.charges);
    }
    if flags.contains(SaveFlags::ATTRIBUTES) {
        write_attributes(&mut w, &weapon.attributes);
    }
    if flags.contains(SaveFlags::ELEMENTS) {
        let e = &weapon.elements;
        for v in [e.fire, e.cold, e.poison, e.energy, e.chaos, e.direct] {
            w.u8(v);
        }
    }

    w.buf
}

fn write_attributes(w: &mut ByteWriter, attrs: &WeaponAttributes) {
    for v in [
        attrs.attack_chance,
        attrs.defend_chance,
        attrs.weapon_damage,
        attrs.weapon_speed,
        attrs.self_repair,
        attrs.bonus_durability,
        attrs.leech_life,
        attrs.leech_stamina,
        attrs.leech_mana,
        attrs.area_physical,
        attrs.area_fire,
        attrs.area_cold,
        attrs.area_poison,
        attrs.area_energy,
        attrs.hit_magic_arrow,
        attrs.hit_harm,
        attrs.hit_fireball,
        attrs.hit_lightning,
        attrs.hit_dispel,
        attrs.hit_lower_attack,
        attrs.hit_lower_defense,
    ] {
        w.i32(v);
    }
    w.u8(attrs.use_best_skill as u8);
    w.u8(attrs.mage_weapon as u8);
}

// === Decoding ===

struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            return Err(CombatError::TruncatedRecord(self.pos));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take(2)?.try_into().unwrap()))
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn str(&mut self) -> Result<String> {
        let len = self.u16()? as usize;
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Deserialize a weapon's combat state, migrating old versions forward.
pub fn read_weapon(bytes: &[u8]) -> Result<Weapon> {
    let mut r = ByteReader::new(bytes);
    let version = r.u32()?;

    match version {
        2 => {
            let wear = r.u8()?;
            let mut weapon = read_flagged(&mut r)?;
            weapon.wear = wear.min(100);
            Ok(weapon)
        }
        // v1 predates the wear counter; migrated records start pristine
        1 => read_flagged(&mut r),
        0 => read_fixed_v0(&mut r),
        other => Err(CombatError::UnsupportedVersion(other)),
    }
}

fn read_flagged(r: &mut ByteReader) -> Result<Weapon> {
    let flags = SaveFlags::from_bits_truncate(r.u32()?);

    let mut weapon = Weapon::fists();
    weapon.name = r.str()?;
    weapon.family = family_from(r.u8()?);
    weapon.skill = skill_from(r.u8()?);
    weapon.min_damage = r.u16()?;
    weapon.max_damage = r.u16()?;
    weapon.speed = r.f32()?;
    weapon.max_range = r.u8()?;
    weapon.hits = r.i32()?.max(0);
    weapon.max_hits = r.i32()?.max(0);
    weapon.hits = weapon.hits.min(weapon.max_hits);

    if flags.contains(SaveFlags::QUALITY) {
        weapon.quality = match r.u8()? {
            1 => Quality::Exceptional,
            _ => Quality::Regular,
        };
    }
    if flags.contains(SaveFlags::DAMAGE_LEVEL) {
        weapon.damage_level = damage_level_from(r.u8()?);
    }
    if flags.contains(SaveFlags::ACCURACY_LEVEL) {
        weapon.accuracy_level = accuracy_level_from(r.u8()?);
    }
    if flags.contains(SaveFlags::DURABILITY_LEVEL) {
        weapon.durability_level = durability_level_from(r.u8()?);
    }
    if flags.contains(SaveFlags::MATERIAL) {
        weapon.material = material_from(r.u8()?);
    }
    if flags.contains(SaveFlags::SLAYER) {
        weapon.slayer = crate::combat::slayer::SlayerKind::from_index(r.u8()? as u32);
    }
    if flags.contains(SaveFlags::SLAYER2) {
        weapon.slayer2 = crate::combat::slayer::SlayerKind::from_index(r.u8()? as u32);
    }
    if flags.contains(SaveFlags::POISON) {
        let level = PoisonLevel::from_index(r.u8()? as u32);
        let charges = r.u8()?;
        // A record with an unknown level loses the poison, not the weapon
        weapon.poison = level.map(|level| LoadedPoison { level, charges });
    }
    if flags.contains(SaveFlags::ATTRIBUTES) {
        weapon.attributes = read_attributes(r)?;
    }
    if flags.contains(SaveFlags::ELEMENTS) {
        weapon.elements = ElementDamages {
            fire: r.u8()?,
            cold: r.u8()?,
            poison: r.u8()?,
            energy: r.u8()?,
            chaos: r.u8()?,
            direct: r.u8()?,
        };
    }

    Ok(weapon)
}

/// The pre-flag fixed layout. Slayers, attributes and elemental damages did
/// not exist yet; they come back as their defaults.
fn read_fixed_v0(r: &mut ByteReader) -> Result<Weapon> {
    let mut weapon = Weapon::fists();
    weapon.name = "weapon".into();
    weapon.family = family_from(r.u8()?);
    weapon.skill = skill_from(r.u8()?);
    weapon.min_damage = r.u16()?;
    weapon.max_damage = r.u16()?;
    weapon.speed = r.f32()?;
    weapon.max_range = 1;
    weapon.hits = r.i32()?.max(0);
    weapon.max_hits = r.i32()?.max(0);
    weapon.hits = weapon.hits.min(weapon.max_hits);
    weapon.quality = match r.u8()? {
        1 => Quality::Exceptional,
        _ => Quality::Regular,
    };

    let poison_level = r.i32()?;
    let charges = r.u8()?;
    if poison_level >= 0 {
        weapon.poison = PoisonLevel::from_index(poison_level as u32)
            .map(|level| LoadedPoison { level, charges });
    }

    Ok(weapon)
}

fn read_attributes(r: &mut ByteReader) -> Result<WeaponAttributes> {
    let mut attrs = WeaponAttributes::default();
    attrs.attack_chance = r.i32()?;
    attrs.defend_chance = r.i32()?;
    attrs.weapon_damage = r.i32()?;
    attrs.weapon_speed = r.i32()?;
    attrs.self_repair = r.i32()?;
    attrs.bonus_durability = r.i32()?;
    attrs.leech_life = r.i32()?;
    attrs.leech_stamina = r.i32()?;
    attrs.leech_mana = r.i32()?;
    attrs.area_physical = r.i32()?;
    attrs.area_fire = r.i32()?;
    attrs.area_cold = r.i32()?;
    attrs.area_poison = r.i32()?;
    attrs.area_energy = r.i32()?;
    attrs.hit_magic_arrow = r.i32()?;
    attrs.hit_harm = r.i32()?;
    attrs.hit_fireball = r.i32()?;
    attrs.hit_lightning = r.i32()?;
    attrs.hit_dispel = r.i32()?;
    attrs.hit_lower_attack = r.i32()?;
    attrs.hit_lower_defense = r.i32()?;
    attrs.use_best_skill = r.u8()? != 0;
    attrs.mage_weapon = r.u8()? != 0;
    Ok(attrs)
}

// Enum decoders clamp unknown values to the documented baselines instead of
// failing the whole load.

fn family_from(v: u8) -> WeaponFamily {
    match v {
        0 => WeaponFamily::Slashing,
        1 => WeaponFamily::Piercing,
        2 => WeaponFamily::Bashing,
        3 => WeaponFamily::Axe,
        4 => WeaponFamily::Polearm,
        5 => WeaponFamily::Staff,
        6 => WeaponFamily::Ranged,
        7 => WeaponFamily::Harpoon,
        8 => WeaponFamily::Pickaxe,
        _ => WeaponFamily::Unarmed,
    }
}

fn skill_from(v: u8) -> SkillId {
    match v {
        0 => SkillId::Swords,
        1 => SkillId::Fencing,
        2 => SkillId::Macing,
        3 => SkillId::Archery,
        _ => SkillId::Wrestling,
    }
}

fn damage_level_from(v: u8) -> DamageLevel {
    match v {
        0 => DamageLevel::Regular,
        1 => DamageLevel::Ruin,
        2 => DamageLevel::Might,
        3 => DamageLevel::Force,
        4 => DamageLevel::Power,
        5 => DamageLevel::Vanquishing,
        // Out-of-range tiers demote to the lowest magical tier
        _ => DamageLevel::Ruin,
    }
}

fn accuracy_level_from(v: u8) -> AccuracyLevel {
    match v {
        0 => AccuracyLevel::Regular,
        1 => AccuracyLevel::Accurate,
        2 => AccuracyLevel::Surpassingly,
        3 => AccuracyLevel::Eminently,
        4 => AccuracyLevel::Exceedingly,
        5 => AccuracyLevel::Supremely,
        _ => AccuracyLevel::Accurate,
    }
}

fn durability_level_from(v: u8) -> DurabilityLevel {
    match v {
        0 => DurabilityLevel::Regular,
        1 => DurabilityLevel::Durable,
        2 => DurabilityLevel::Substantial,
        3 => DurabilityLevel::Massive,
        4 => DurabilityLevel::Fortified,
        5 => DurabilityLevel::Indestructible,
        _ => DurabilityLevel::Durable,
    }
}

fn material_from(v: u8) -> Material {
    match v {
        0 => Material::Iron,
        1 => Material::DullCopper,
        2 => Material::ShadowIron,
        3 => Material::Copper,
        4 => Material::Bronze,
        5 => Material::Golden,
        6 => Material::Agapite,
        7 => Material::Verite,
        8 => Material::Valorite,
        9 => Material::Oak,
        10 => Material::Ash,
        11 => Material::Yew,
        12 => Material::Heartwood,
        13 => Material::Bone,
        _ => Material::Iron,
    }
}
