//! On-hit proc rolling: elemental bursts and spell strikes
//!
//! Every proc is an independent percentage roll against its weapon
//! attribute. The heavy lifting (spreading an area burst, resolving a
//! fireball) belongs to the spell subsystem; this module only decides what
//! fires and records it.

use serde::{Deserialize, Serialize};

use crate::combat::adapter::WorldHooks;
use crate::combat::session::{CombatEvent, SwingSession};
use crate::core::rng::CombatRng;
use crate::entity::combatant::Combatant;

/// Elemental area-burst flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaElement {
    Physical,
    Fire,
    Cold,
    Poison,
    Energy,
}

/// Single-target spell-like procs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellProc {
    MagicArrow,
    Harm,
    Fireball,
    Lightning,
    Dispel,
    LowerAttack,
    LowerDefense,
}

/// Roll every proc carried by the attacker's weapon.
///
/// `property_bonus` scales the stored chances (focused special moves raise
/// it above 1.0). `base_damage` feeds the area bursts.
pub fn roll_procs(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    property_bonus: f64,
    base_damage: u32,
    session: &mut SwingSession,
    rng: &mut CombatRng,
    world: &mut dyn WorldHooks,
) {
    let attrs = attacker.weapon.attributes;

    let area_chances = [
        (AreaElement::Physical, attrs.area_physical),
        (AreaElement::Fire, attrs.area_fire),
        (AreaElement::Cold, attrs.area_cold),
        (AreaElement::Poison, attrs.area_poison),
        (AreaElement::Energy, attrs.area_energy),
    ];

    for (element, stored) in area_chances {
        let chance = (stored as f64 * property_bonus) as i32;
        if chance > 0 && chance > rng.roll(100) as i32 {
            session.push(CombatEvent::AreaBurst { element });
            world.area_burst(attacker, defender, element, base_damage, rng);
        }
    }

    let spell_chances = [
        (SpellProc::MagicArrow, attrs.hit_magic_arrow),
        (SpellProc::Harm, attrs.hit_harm),
        (SpellProc::Fireball, attrs.hit_fireball),
        (SpellProc::Lightning, attrs.hit_lightning),
        (SpellProc::Dispel, attrs.hit_dispel),
        (SpellProc::LowerAttack, attrs.hit_lower_attack),
        (SpellProc::LowerDefense, attrs.hit_lower_defense),
    ];

    for (proc, stored) in spell_chances {
        let chance = (stored as f64 * property_bonus) as i32;
        if chance > 0 && chance > rng.roll(100) as i32 {
            // The attack/defense debuffs land in engine state directly;
            // everything else is the spell system's business
            match proc {
                SpellProc::LowerAttack => defender.status.lower_attack = true,
                SpellProc::LowerDefense => defender.status.lower_defense = true,
                _ => {}
            }
            session.push(CombatEvent::SpellStruck { proc });
            world.spell_proc(attacker, defender, proc, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::adapter::DefaultWorld;

    fn count_events(session: &SwingSession) -> (usize, usize) {
        let areas = session
            .events()
            .iter()
            .filter(|e| matches!(e, CombatEvent::AreaBurst { .. }))
            .count();
        let spells = session
            .events()
            .iter()
            .filter(|e| matches!(e, CombatEvent::SpellStruck { .. }))
            .count();
        (areas, spells)
    }

    #[test]
    fn test_zero_attributes_never_proc() {
        let mut attacker = Combatant::veteran("calm");
        let mut defender = Combatant::new("victim");
        let mut session = SwingSession::new();
        let mut rng = CombatRng::seed_from_u64(1);

        roll_procs(
            &mut attacker,
            &mut defender,
            1.0,
            10,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert_eq!(count_events(&session), (0, 0));
    }

    #[test]
    fn test_certain_chance_always_procs() {
        let mut attacker = Combatant::veteran("stormcaller");
        attacker.weapon.attributes.area_fire = 100;
        attacker.weapon.attributes.hit_lightning = 100;
        let mut defender = Combatant::new("victim");
        let mut session = SwingSession::new();
        let mut rng = CombatRng::seed_from_u64(1);

        roll_procs(
            &mut attacker,
            &mut defender,
            1.0,
            10,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert_eq!(count_events(&session), (1, 1));
    }

    #[test]
    fn test_lower_defense_lands_in_status() {
        let mut attacker = Combatant::veteran("hexblade");
        attacker.weapon.attributes.hit_lower_defense = 100;
        let mut defender = Combatant::new("victim");
        let mut session = SwingSession::new();
        let mut rng = CombatRng::seed_from_u64(1);

        roll_procs(
            &mut attacker,
            &mut defender,
            1.0,
            10,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert!(defender.status.lower_defense);
        assert!(!defender.status.lower_attack);
    }

    #[test]
    fn test_property_bonus_scales_chance() {
        // 50% stored chance, halved by a 0.0 property bonus: never fires
        let mut attacker = Combatant::veteran("muted");
        attacker.weapon.attributes.hit_harm = 50;
        let mut defender = Combatant::new("victim");
        let mut session = SwingSession::new();
        let mut rng = CombatRng::seed_from_u64(1);

        roll_procs(
            &mut attacker,
            &mut defender,
            0.0,
            10,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert_eq!(count_events(&session), (0, 0));
    }
}
