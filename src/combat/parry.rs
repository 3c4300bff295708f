//! Block and parry resolution
//!
//! Only human-bodied defenders parry. A shield gives the straightforward
//! skill-over-400 chance; weapon parry wants bushido backing it up and
//! falls back to the slower skill-over-800 path without it. Low dexterity
//! degrades everything.

use crate::combat::adapter::WorldHooks;
use crate::core::config::CombatConfig;
use crate::core::rng::CombatRng;
use crate::entity::combatant::Combatant;
use crate::entity::skills::SkillId;
use crate::items::weapon::WeaponFamily;

/// Skill threshold granting the flat 5% parry bonus.
const PARRY_SKILL_THRESHOLD: f64 = 100.0;
const PARRY_SKILL_BONUS: f64 = 0.05;

/// Below this dexterity the chance is scaled down.
const PARRY_DEX_THRESHOLD: i32 = 80;

fn dex_penalty(chance: f64, dexterity: i32) -> f64 {
    if dexterity < PARRY_DEX_THRESHOLD {
        chance * (20 + dexterity) as f64 / 100.0
    } else {
        chance
    }
}

/// The defender's current parry chance, shield or weapon.
pub fn parry_chance(defender: &Combatant, config: &CombatConfig) -> f64 {
    let parry = defender.skills.value(SkillId::Parry);
    let bushido = defender.skills.value(SkillId::Bushido);

    let chance = if defender.shield().is_some() {
        let mut chance = ((parry - bushido) / 400.0).max(0.0);
        if parry >= PARRY_SKILL_THRESHOLD || bushido >= PARRY_SKILL_THRESHOLD {
            chance += PARRY_SKILL_BONUS;
        }
        dex_penalty(chance, defender.dexterity)
    } else {
        match defender.weapon.family {
            // Bare hands and bows cannot turn a blade
            WeaponFamily::Unarmed | WeaponFamily::Ranged => return 0.0,
            _ => {}
        }

        let mut chance = parry * bushido / 48000.0;
        let mut plain = parry / 800.0;

        if parry >= PARRY_SKILL_THRESHOLD {
            chance += PARRY_SKILL_BONUS;
            plain += PARRY_SKILL_BONUS;
        } else if bushido >= PARRY_SKILL_THRESHOLD {
            chance += PARRY_SKILL_BONUS;
        }

        dex_penalty(chance.max(plain), defender.dexterity)
    };

    chance.min(config.parry_chance_cap)
}

/// Roll the parry, reporting the attempt to the progression system.
pub fn check_parry(
    defender: &Combatant,
    config: &CombatConfig,
    rng: &mut CombatRng,
    world: &mut dyn WorldHooks,
) -> bool {
    let chance = parry_chance(defender, config);
    if chance <= 0.0 {
        return false;
    }

    let success = rng.chance(chance);
    world.on_skill_use(defender.id, SkillId::Parry, chance, success);
    success
}
