//! Hit resolution: used-skill selection and the accuracy/evasion buckets
//!
//! The final outcome is a skill check: the swing lands with the computed
//! probability and the progression system hears about the attempt either
//! way.

use std::time::Duration;

use crate::combat::ability::Technique;
use crate::combat::adapter::WorldHooks;
use crate::combat::session::SwingSession;
use crate::combat::CombatEngine;
use crate::core::config::Ruleset;
use crate::core::rng::CombatRng;
use crate::entity::combatant::Combatant;
use crate::entity::skills::SkillId;

impl CombatEngine {
    /// The skill a combatant actually fights with this swing.
    ///
    /// Use-best-skill weapons take the best of the three melee skills; a
    /// mage weapon substitutes Magery when it is higher; non-player,
    /// non-human bodies fall back to Wrestling when that beats the nominal
    /// weapon skill.
    pub fn used_skill(&self, who: &Combatant) -> SkillId {
        let weapon = &who.weapon;

        if weapon.attributes.use_best_skill {
            return who.skills.best_melee().0;
        }

        if weapon.attributes.mage_weapon
            && who.skills.value(SkillId::Magery) > who.skills.value(weapon.skill)
        {
            return SkillId::Magery;
        }

        let nominal = weapon.skill;
        if nominal != SkillId::Wrestling
            && !who.player
            && !who.is_human_body()
            && who.skills.value(SkillId::Wrestling) > who.skills.value(nominal)
        {
            return SkillId::Wrestling;
        }

        nominal
    }

    /// Attacker accuracy bucket, clamped to the configured cap.
    pub fn accuracy_bonus(&self, attacker: &Combatant, session: &SwingSession) -> i32 {
        let mut bonus = attacker.weapon.accuracy_bonus();
        bonus += attacker.attack_chance_attr();

        if attacker.status.divine_fury {
            bonus += 10;
        }
        if attacker.status.lower_attack {
            bonus -= 25;
        }
        if let Some(form) = attacker.status.transformation {
            bonus += form.accuracy_bonus();
        }

        if let Some(ability) = session.ability {
            bonus += ability.accuracy_bonus();
        }
        if let Some(special) = session.special_move {
            bonus += special.accuracy_bonus();
        }

        bonus.min(self.config.hit_chance_cap)
    }

    /// Defender evasion bucket, clamped to the configured cap.
    pub fn evasion_bonus(&self, defender: &Combatant) -> i32 {
        let mut bonus = defender.defend_chance_attr();

        if let Some(block) = defender.status.block_bonus {
            bonus += block;
        }
        if defender.status.divine_fury {
            bonus -= 20;
        }
        if defender.status.lower_defense {
            bonus -= 25;
        }
        if let Some(malus) = defender.status.surprise_malus {
            bonus -= malus;
        }
        if let Some(effect) = defender.status.discordance {
            bonus -= effect;
        }

        bonus.min(self.config.defend_chance_cap)
    }

    /// Does this swing land?
    pub fn check_hit(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        session: &SwingSession,
        rng: &mut CombatRng,
        world: &mut dyn WorldHooks,
    ) -> bool {
        let atk_skill = self.used_skill(attacker);
        let def_skill = self.used_skill(defender);

        let atk_value = attacker.skills.value(atk_skill);
        let def_value = defender.skills.value(def_skill);

        // The classic family predates equipment bonuses entirely
        let (atk_bonus, def_bonus) = match self.config.ruleset {
            Ruleset::Modern => (
                self.accuracy_bonus(attacker, session),
                self.evasion_bonus(defender),
            ),
            Ruleset::Classic => (0, 0),
        };

        let chance = self.config.ruleset.hit_chance(
            atk_value,
            def_value,
            atk_bonus,
            def_bonus,
            self.config.min_hit_chance,
        );

        let success = rng.chance(chance);
        world.on_skill_use(attacker.id, atk_skill, chance, success);
        success
    }

    /// Delay before the attacker may swing again.
    ///
    /// Stamina and the capped weapon-speed attribute accelerate the swing;
    /// fury adds a flat 10 and discordance slows it back down. Never drops
    /// below the configured floor.
    pub fn swing_delay(&self, attacker: &Combatant) -> Duration {
        let speed = attacker.weapon.speed as f64;
        if speed <= 0.0 {
            return Duration::from_secs(3600);
        }

        let mut bonus = attacker
            .weapon
            .attributes
            .weapon_speed
            .min(self.config.weapon_speed_cap);

        if attacker.status.divine_fury {
            bonus += 10;
        }
        if let Some(effect) = attacker.status.discordance {
            bonus -= effect;
        }
        bonus = bonus.min(self.config.weapon_speed_cap);

        let vigor = (attacker.stamina + 100) as f64 * speed;
        let delay = 15000.0 / (vigor * (100.0 + bonus as f64) / 100.0);

        Duration::from_secs_f64(delay.max(self.config.min_swing_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::adapter::DefaultWorld;
    use crate::combat::CombatEngine;
    use crate::core::config::CombatConfig;
    use crate::entity::combatant::Body;
    use crate::items::weapon::{AccuracyLevel, Weapon};

    #[test]
    fn test_used_skill_is_weapon_skill() {
        let engine = CombatEngine::default();
        let veteran = Combatant::veteran("vet");
        assert_eq!(engine.used_skill(&veteran), SkillId::Swords);
    }

    #[test]
    fn test_use_best_skill_takes_max() {
        let engine = CombatEngine::default();
        let mut vet = Combatant::veteran("vet");
        vet.weapon.attributes.use_best_skill = true;
        vet.skills.set(SkillId::Macing, 110.0);
        assert_eq!(engine.used_skill(&vet), SkillId::Macing);
    }

    #[test]
    fn test_mage_weapon_substitutes_magery() {
        let engine = CombatEngine::default();
        let mut vet = Combatant::veteran("vet");
        vet.weapon.attributes.mage_weapon = true;
        vet.skills.set(SkillId::Magery, 110.0);
        assert_eq!(engine.used_skill(&vet), SkillId::Magery);

        vet.skills.set(SkillId::Magery, 10.0);
        assert_eq!(engine.used_skill(&vet), SkillId::Swords);
    }

    #[test]
    fn test_creature_falls_back_to_wrestling() {
        let engine = CombatEngine::default();
        let mut beast = Combatant::new("beast");
        beast.body = Body::Monster;
        beast.weapon = Weapon::longsword();
        beast.skills.set(SkillId::Swords, 20.0);
        beast.skills.set(SkillId::Wrestling, 90.0);
        assert_eq!(engine.used_skill(&beast), SkillId::Wrestling);

        // Players never fall back
        beast.player = true;
        assert_eq!(engine.used_skill(&beast), SkillId::Swords);
    }

    #[test]
    fn test_accuracy_bucket_is_capped() {
        let engine = CombatEngine::default();
        let mut vet = Combatant::veteran("vet");
        vet.weapon.attributes.attack_chance = 200;
        vet.weapon.accuracy_level = AccuracyLevel::Supremely;
        vet.status.divine_fury = true;
        let session = SwingSession::new();
        assert_eq!(
            engine.accuracy_bonus(&vet, &session),
            engine.config.hit_chance_cap
        );
    }

    #[test]
    fn test_lower_attack_is_a_malus() {
        let engine = CombatEngine::default();
        let mut vet = Combatant::veteran("vet");
        vet.status.lower_attack = true;
        let session = SwingSession::new();
        assert_eq!(engine.accuracy_bonus(&vet, &session), -25);
    }

    #[test]
    fn test_evasion_stacks_maluses() {
        let engine = CombatEngine::default();
        let mut vet = Combatant::veteran("vet");
        vet.status.block_bonus = Some(10);
        vet.status.surprise_malus = Some(20);
        vet.status.discordance = Some(15);
        assert_eq!(engine.evasion_bonus(&vet), 10 - 20 - 15);
    }

    #[test]
    fn test_check_hit_notifies_progression() {
        struct Recorder {
            calls: Vec<(SkillId, f64)>,
        }
        impl WorldHooks for Recorder {
            fn on_skill_use(
                &mut self,
                _user: crate::core::types::EntityId,
                skill: SkillId,
                chance: f64,
                _success: bool,
            ) {
                self.calls.push((skill, chance));
            }
        }

        let engine = CombatEngine::new(CombatConfig::classic());
        let attacker = Combatant::veteran("attacker");
        let mut defender = Combatant::veteran("defender");
        defender.skills.set(SkillId::Swords, 50.0);

        let mut recorder = Recorder { calls: Vec::new() };
        let mut rng = CombatRng::seed_from_u64(3);
        let session = SwingSession::new();
        engine.check_hit(&attacker, &defender, &session, &mut rng, &mut recorder);

        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(recorder.calls[0].0, SkillId::Swords);
        // Scenario A: (100+50) / ((50+50)*2)
        assert_eq!(recorder.calls[0].1, 0.75);
    }

    #[test]
    fn test_swing_delay_floor() {
        let engine = CombatEngine::default();
        let mut vet = Combatant::veteran("vet");
        vet.weapon.speed = 100.0;
        vet.weapon.attributes.weapon_speed = 500;
        let delay = engine.swing_delay(&vet);
        assert!(delay.as_secs_f64() >= engine.config.min_swing_delay);
    }

    #[test]
    fn test_zero_speed_never_swings() {
        let engine = CombatEngine::default();
        let mut vet = Combatant::veteran("vet");
        vet.weapon.speed = 0.0;
        assert_eq!(engine.swing_delay(&vet), Duration::from_secs(3600));
    }

    #[test]
    fn test_hit_rate_tracks_chance() {
        // Statistical sanity: 0.75 chance should land roughly 75% of swings
        let engine = CombatEngine::new(CombatConfig::classic());
        let attacker = Combatant::veteran("attacker");
        let mut defender = Combatant::veteran("defender");
        defender.skills.set(SkillId::Swords, 50.0);

        let mut rng = CombatRng::seed_from_u64(99);
        let session = SwingSession::new();
        let mut world = DefaultWorld;
        let hits = (0..2000)
            .filter(|_| engine.check_hit(&attacker, &defender, &session, &mut rng, &mut world))
            .count();
        assert!((1400..1600).contains(&hits), "hits = {}", hits);
    }
}
