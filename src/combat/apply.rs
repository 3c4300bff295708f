//! Damage application: mitigation, stacking, split, side effects
//!
//! One linear state machine per landed swing, no branching back:
//! parry, item wear, bonus stacking, elemental split, final resolution
//! through the resistance collaborator, leech, procs, poison, weapon
//! self-wear. Misses run a far lighter path.

use tracing::{debug, warn};

use crate::combat::ability::{Technique, WeaponAbility};
use crate::combat::adapter::WorldHooks;
use crate::combat::elements::{consecrated_split, wielder_split};
use crate::combat::parry;
use crate::combat::procs::roll_procs;
use crate::combat::session::{CombatEvent, SwingSession};
use crate::combat::slayer::{check_slayers, SlayerMatch};
use crate::combat::CombatEngine;
use crate::core::rng::CombatRng;
use crate::core::types::scale;
use crate::entity::combatant::Combatant;
use crate::entity::skills::SkillId;
use crate::entity::status::Transformation;
use crate::items::durability::{Damageable, WearOutcome};
use crate::items::gear::WearSlot;
use crate::items::poison::PoisonLevel;
use crate::items::weapon::Weapon;

/// Fraction of dealt damage a successful leech transfers.
const LEECH_PERCENT: i32 = 15;

/// Leech rolls compare their chance against a 125-sided die.
const LEECH_DIE: u32 = 125;

/// One in this many hits wears the weapon.
const SELF_WEAR_DIE: u32 = 15;

impl CombatEngine {
    /// Resolve a landed swing. Returns the authoritative damage dealt.
    pub fn on_hit(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        damage: u32,
        session: &mut SwingSession,
        rng: &mut CombatRng,
        world: &mut dyn WorldHooks,
    ) -> u32 {
        let mut damage = damage as i32;

        // 1. Block/parry, a human-bodied privilege
        let mut blocked = false;
        if defender.is_human_body() && parry::check_parry(defender, &self.config, rng, world) {
            blocked = true;
            damage = (damage as f64 * self.config.parry_damage_fraction).floor() as i32;
            session.push(CombatEvent::Blocked);

            // A clean block redeems the execution aftermath
            defender.status.honorable_execution_penalty = false;

            if defender.status.counter_attack {
                defender.status.counter_attack = false;
                session.push(CombatEvent::CounterArmed);
            }

            if defender.status.confidence {
                let bushido = defender.skills.value(SkillId::Bushido);
                let hits = rng.between(1, (bushido / 12.0).max(1.0) as i32);
                let stamina = rng.between(1, (bushido / 5.0).max(1.0) as i32);
                defender.heal(hits);
                defender.gain_stamina(stamina);
                session.push(CombatEvent::ConfidenceHeal { hits, stamina });
            }

            // The shield takes the strain
            if let Some(shield) = defender.equipment.get_mut(&WearSlot::Shield) {
                if shield.apply_wear(1) == WearOutcome::Destroyed {
                    defender.equipment.remove(&WearSlot::Shield);
                    session.push(CombatEvent::GearDestroyed {
                        slot: WearSlot::Shield,
                    });
                }
            }
        }

        // 2. An unblocked hit lands somewhere on the defender's gear
        if !blocked {
            self.gear_wear(defender, session, rng);
        }

        // 3. Stacking percentage bonuses, additive and capped
        if let Some(ability) = session.ability {
            if !ability.on_before_damage() {
                session.clear_ability();
            }
        }
        if let Some(special) = session.special_move {
            if !special.on_before_damage() {
                session.clear_move();
            }
        }

        let pct = self.stacking_bonus(attacker, defender, session);
        damage += scale(damage, pct);

        if damage <= 0 {
            // Fully absorbed: armed abilities fizzle without effect
            session.clear_ability();
            damage = 0;
        }

        // 4. Elemental split
        let split = if attacker.weapon.consecrated {
            consecrated_split(defender)
        } else {
            wielder_split(attacker, &attacker.weapon)
        };
        debug_assert_eq!(split.total(), 100);

        let ignore_armor = session.ability.map_or(false, |a| a.ignores_armor())
            || session.special_move.map_or(false, |m| m.ignores_armor());

        // 5. Final resolution; this result drives all later percentages
        let ranged = attacker.weapon.is_ranged();
        let dealt = world.deal_damage(attacker, defender, damage as u32, &split, ignore_armor, ranged);
        session.push(CombatEvent::Hit { damage: dealt });
        debug!(attacker = %attacker.name, defender = %defender.name, dealt, "hit resolved");

        // 6. Leech
        self.leech(attacker, defender, dealt, session, rng);

        // 7. Area and spell procs
        let property_bonus = session.special_move.map_or(1.0, |m| m.property_bonus());
        roll_procs(attacker, defender, property_bonus, dealt, session, rng, world);

        // 8. Poison delivery
        self.deliver_poison(attacker, defender, session, rng, world);

        // 9. The weapon pays for its work
        self.weapon_self_wear(attacker, defender, session, rng, world);

        dealt
    }

    /// The lighter path for a swing that misses.
    pub fn on_miss(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        session: &mut SwingSession,
        rng: &mut CombatRng,
        world: &mut dyn WorldHooks,
    ) {
        session.push(CombatEvent::Miss);

        // Armed techniques are spent by the whiff
        session.clear_ability();
        session.clear_move();

        // Classic shards let the mount catch a glancing blow
        if self.config.mounted_glance && defender.mount.is_some() {
            let glanced = {
                let plain = SwingSession::new();
                self.check_hit(attacker, defender, &plain, rng, world)
            };
            if glanced {
                let glance = scale(
                    self.compute_damage(attacker, rng, world) as i32,
                    rng.between(10, 50),
                )
                .max(1) as u32;
                if let Some(mount) = defender.mount.as_mut() {
                    mount.hits = (mount.hits - glance as i32).max(0);
                    session.push(CombatEvent::MountGlance { damage: glance });
                }
            }
        }
    }

    /// Everything in the additive stacking bucket, capped at the configured
    /// maximum.
    fn stacking_bonus(
        &self,
        attacker: &mut Combatant,
        defender: &Combatant,
        session: &mut SwingSession,
    ) -> i32 {
        let mut pct = 0i32;

        if let Some(ability) = session.ability {
            pct += (ability.damage_scalar() * 100.0) as i32 - 100;
        }
        if let Some(special) = session.special_move {
            pct += (special.damage_scalar() * 100.0) as i32 - 100;
        }
        pct += (session.damage_multiplier * 100.0) as i32 - 100;

        match check_slayers(
            &attacker.weapon,
            attacker.class,
            &defender.weapon,
            defender.class,
        ) {
            SlayerMatch::Slayer => {
                session.push(CombatEvent::SlayerFlare);
                pct += 100;
            }
            // Wielding a slayer provokes the opposing class in return
            SlayerMatch::Opposition => pct += 100,
            SlayerMatch::None => {}
        }

        // Enemy of one: devoted players hit their chosen class harder and
        // everything else hits them harder
        if !attacker.player && defender.player {
            if let Some(sworn) = defender.status.enemy_of_one {
                if attacker.class != Some(sworn) {
                    pct += 100;
                }
            }
        } else if attacker.player && !defender.player {
            if attacker.status.awaiting_enemy_of_one {
                attacker.status.enemy_of_one = defender.class;
                attacker.status.awaiting_enemy_of_one = false;
            }
            if attacker.status.enemy_of_one.is_some()
                && attacker.status.enemy_of_one == defender.class
            {
                pct += 50;
            }
        }

        // Pack instinct, tiered by packmates on the same target
        if attacker.pack_instinct.is_some() && !attacker.player && !defender.player {
            let in_pack = attacker.pack_allies as i32 + 1;
            pct += match in_pack {
                i if i >= 5 => 100,
                4 => 75,
                3 => 50,
                2 => 25,
                _ => 0,
            };
        }

        if session.double_strike {
            pct -= 10;
        }

        // Silver bites every necromantic form except the beast
        let silver = [attacker.weapon.slayer, attacker.weapon.slayer2]
            .into_iter()
            .flatten()
            .any(|s| s == crate::combat::slayer::SlayerKind::Silver);
        if silver
            && defender
                .status
                .transformation
                .map_or(false, |form| form.is_necromantic())
        {
            pct += 25;
        }

        if attacker.player && attacker.status.honor_active {
            pct += 25;
        }
        pct += attacker.status.perfection.clamp(0, 100);

        pct.min(self.config.damage_bonus_cap)
    }

    /// One random occupied slot takes a point of wear, gated by the
    /// defender's arms-lore upkeep.
    fn gear_wear(&self, defender: &mut Combatant, session: &mut SwingSession, rng: &mut CombatRng) {
        let occupied: Vec<WearSlot> = WearSlot::ALL
            .into_iter()
            .filter(|slot| defender.equipment.contains_key(slot))
            .collect();
        if occupied.is_empty() {
            return;
        }

        let slot = occupied[rng.roll(occupied.len() as u32) as usize];

        // Well-kept gear shrugs hits off; lore raises the guard threshold
        let lore = defender.skills.value(SkillId::ArmsLore);
        let guard = 0.5 * (lore / 120.0) + rng.between(1, 50) as f64 / 100.0;
        if !(rng.coin() && rng.fraction() > guard) {
            return;
        }

        if let Some(piece) = defender.equipment.get_mut(&slot) {
            match piece.apply_wear(1) {
                WearOutcome::Destroyed => {
                    defender.equipment.remove(&slot);
                    session.push(CombatEvent::GearDestroyed { slot });
                }
                _ => session.push(CombatEvent::GearStruck { slot }),
            }
        }
    }

    /// Independent life/stamina/mana leech rolls off the dealt damage.
    fn leech(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        dealt: u32,
        session: &mut SwingSession,
        rng: &mut CombatRng,
    ) {
        let dealt = dealt as i32;

        // Soul-bound essences replace the weapon's own leech attributes
        let (mut life_chance, stamina_chance, mut mana_chance) = match attacker.soul_bond {
            Some(bond) => (
                bond.life_essence,
                bond.stamina_essence,
                bond.mana_essence,
            ),
            None => (
                attacker.weapon.attributes.leech_life,
                attacker.weapon.attributes.leech_stamina,
                attacker.weapon.attributes.leech_mana,
            ),
        };

        if attacker.weapon.cursed {
            life_chance += 15;
        }
        if attacker.status.under(Transformation::VampiricEmbrace) {
            life_chance += 10;
        }

        // Wraith form steals mana outright rather than leeching a share
        if attacker.status.under(Transformation::WraithForm) {
            let strength =
                5 + (15.0 * attacker.skills.value(SkillId::Necromancy) / 100.0) as i32;
            let drained = defender.drain_mana(scale(dealt, strength));
            if drained > 0 {
                attacker.gain_mana(drained);
                session.push(CombatEvent::ManaDrained { amount: drained });
            }
            mana_chance += strength;
        }

        if life_chance > rng.roll(LEECH_DIE) as i32 {
            let amount = scale(dealt, LEECH_PERCENT).min(attacker.hits_max - attacker.hits);
            if amount > 0 {
                attacker.heal(amount);
                session.push(CombatEvent::LifeLeech { amount });
            }
        }
        if stamina_chance > rng.roll(LEECH_DIE) as i32 {
            let amount = scale(dealt, LEECH_PERCENT).min(attacker.stamina_max - attacker.stamina);
            if amount > 0 {
                attacker.gain_stamina(amount);
                session.push(CombatEvent::StaminaLeech { amount });
            }
        }
        if mana_chance > rng.roll(LEECH_DIE) as i32 {
            let amount = scale(dealt, LEECH_PERCENT).min(attacker.mana_max - attacker.mana);
            if amount > 0 {
                attacker.gain_mana(amount);
                session.push(CombatEvent::ManaLeech { amount });
            }
        }
    }

    /// Loaded-poison delivery, behind its gauntlet of checks.
    fn deliver_poison(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        session: &mut SwingSession,
        rng: &mut CombatRng,
        world: &mut dyn WorldHooks,
    ) {
        // Serpent form envenoms bare melee strikes on its own
        if !attacker.weapon.is_ranged()
            && attacker.status.under(Transformation::GiantSerpent)
            && defender.poisoned.is_none()
            && defender.poison_immunity.map_or(true, |i| i < PoisonLevel::Lesser)
        {
            world.apply_poison(defender, PoisonLevel::Lesser);
            session.push(CombatEvent::Poisoned {
                level: PoisonLevel::Lesser,
            });
        }

        let Some(loaded) = attacker.weapon.poison else {
            return;
        };

        let infectious = session.ability == Some(WeaponAbility::InfectiousStrike);

        let mut will_poison = attacker.player && loaded.charges > 0;
        // Plain delivery only exists in classic mode; the modern path needs
        // the infectious-strike technique armed
        if !self.config.classic_poisoning && !infectious {
            will_poison = false;
        }
        if !attacker.weapon.can_deliver_poison(self.config.classic_poisoning) {
            will_poison = false;
        }
        if defender.poisoned.is_some() {
            will_poison = false;
        }
        if defender.poison_immunity.map_or(false, |i| i >= loaded.level) {
            will_poison = false;
        }
        if !will_poison {
            return;
        }

        // Delivery still hinges on the poisoner's own craft
        let poisoning = attacker.skills.value(SkillId::Poisoning);
        let chance = poisoning / 125.0;
        let success = rng.chance(chance);
        world.on_skill_use(attacker.id, SkillId::Poisoning, chance, success);
        if !success {
            return;
        }

        match loaded.charges {
            0 | 1 => attacker.weapon.poison = None,
            n => {
                attacker.weapon.poison = Some(crate::items::poison::LoadedPoison {
                    level: loaded.level,
                    charges: n - 1,
                })
            }
        }

        world.apply_poison(defender, loaded.level);
        session.push(CombatEvent::Poisoned {
            level: loaded.level,
        });
    }

    /// The weapon's own durability tax for a successful hit.
    fn weapon_self_wear(
        &self,
        attacker: &mut Combatant,
        defender: &Combatant,
        session: &mut SwingSession,
        rng: &mut CombatRng,
        world: &mut dyn WorldHooks,
    ) {
        if attacker.weapon.max_hits <= 0 {
            return;
        }

        // Acid-blooded targets corrode melee weapons on every hit
        let corroded = defender.corrosive && attacker.weapon.max_range <= 1;
        if !corroded && rng.roll(SELF_WEAR_DIE) != 0 {
            return;
        }
        if corroded {
            session.push(CombatEvent::WeaponCorroded);
        }

        if attacker.weapon.attributes.self_repair > rng.roll(20) as i32 {
            attacker.weapon.mend();
            return;
        }

        match attacker.weapon.apply_wear(1) {
            WearOutcome::Worn => session.push(CombatEvent::WeaponWorn),
            WearOutcome::Weakened => {
                warn!(owner = %attacker.name, weapon = %attacker.weapon.name, "weapon severely damaged");
                session.push(CombatEvent::WeaponWeakened);
            }
            WearOutcome::Destroyed => {
                warn!(owner = %attacker.name, weapon = %attacker.weapon.name, "weapon destroyed");
                session.push(CombatEvent::WeaponDestroyed);
                world.weapon_destroyed(attacker.id);
                attacker.weapon = Weapon::fists();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::adapter::DefaultWorld;
    use crate::combat::slayer::{CreatureClass, SlayerKind};
    use crate::entity::combatant::{PackInstinct, SoulBond};
    use crate::items::poison::LoadedPoison;

    fn setup() -> (CombatEngine, Combatant, Combatant, CombatRng) {
        (
            CombatEngine::default(),
            Combatant::veteran("attacker"),
            Combatant::brute("troll", CreatureClass::Humanoid),
            CombatRng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_on_hit_deals_damage() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        let mut session = SwingSession::new();
        let dealt = engine.on_hit(
            &mut attacker,
            &mut defender,
            10,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert!(dealt > 0);
        assert!(defender.hits < defender.hits_max);
        assert!(session
            .events()
            .iter()
            .any(|e| matches!(e, CombatEvent::Hit { .. })));
    }

    #[test]
    fn test_slayer_doubles_stacking() {
        let (engine, mut attacker, defender, _) = setup();
        let mut session = SwingSession::new();
        let plain = engine.stacking_bonus(&mut attacker, &defender, &mut session);

        attacker.weapon.slayer = Some(SlayerKind::Repond);
        let mut session = SwingSession::new();
        let slain = engine.stacking_bonus(&mut attacker, &defender, &mut session);
        assert_eq!(slain - plain, 100);
        assert!(session.events().contains(&CombatEvent::SlayerFlare));
    }

    #[test]
    fn test_pack_instinct_tiers() {
        let (engine, _, defender, _) = setup();
        let mut wolf = Combatant::brute("wolf", CreatureClass::Beast);
        wolf.pack_instinct = Some(PackInstinct::Canine);

        let expectations = [(0, 0), (1, 25), (2, 50), (3, 75), (4, 100), (9, 100)];
        for (allies, bonus) in expectations {
            wolf.pack_allies = allies;
            let mut session = SwingSession::new();
            assert_eq!(
                engine.stacking_bonus(&mut wolf, &defender, &mut session),
                bonus,
                "allies = {}",
                allies
            );
        }
    }

    #[test]
    fn test_double_strike_malus() {
        let (engine, mut attacker, defender, _) = setup();
        let mut session = SwingSession::new();
        session.double_strike = true;
        assert_eq!(
            engine.stacking_bonus(&mut attacker, &defender, &mut session),
            -10
        );
    }

    #[test]
    fn test_stacking_cap() {
        let (engine, mut attacker, mut defender, _) = setup();
        attacker.weapon.slayer = Some(SlayerKind::Repond);
        attacker.status.honor_active = true;
        attacker.status.perfection = 100;
        defender.status.transformation = Some(Transformation::WraithForm);
        attacker.weapon.slayer2 = Some(SlayerKind::Silver);
        let mut session = SwingSession::new();
        session.damage_multiplier = 3.0;

        let pct = engine.stacking_bonus(&mut attacker, &defender, &mut session);
        assert_eq!(pct, engine.config.damage_bonus_cap);
    }

    #[test]
    fn test_enemy_of_one_both_sides() {
        let engine = CombatEngine::default();
        let mut sworn = Combatant::veteran("avenger");
        sworn.status.enemy_of_one = Some(CreatureClass::Undead);
        let mut undead = Combatant::brute("wight", CreatureClass::Undead);
        let mut reptile = Combatant::brute("drake", CreatureClass::Reptile);

        // Matching class: +50 for the devoted attacker
        let mut session = SwingSession::new();
        assert_eq!(engine.stacking_bonus(&mut sworn, &undead, &mut session), 50);

        // Every other class punishes the oath-bound defender
        let mut session = SwingSession::new();
        assert_eq!(engine.stacking_bonus(&mut reptile, &sworn, &mut session), 100);

        // The sworn class itself gets no such bonus
        let mut session = SwingSession::new();
        assert_eq!(engine.stacking_bonus(&mut undead, &sworn, &mut session), 0);
    }

    #[test]
    fn test_leech_caps_at_fifteen_percent() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        attacker.weapon.attributes.leech_life = 200; // always fires
        attacker.hits = 1;

        let mut session = SwingSession::new();
        engine.leech(&mut attacker, &mut defender, 100, &mut session, &mut rng);

        let leeched = session
            .events()
            .iter()
            .find_map(|e| match e {
                CombatEvent::LifeLeech { amount } => Some(*amount),
                _ => None,
            })
            .expect("life leech fired");
        assert_eq!(leeched, 15);
        assert_eq!(attacker.hits, 16);
    }

    #[test]
    fn test_leech_never_fires_at_zero_chance() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        for _ in 0..64 {
            let mut session = SwingSession::new();
            engine.leech(&mut attacker, &mut defender, 100, &mut session, &mut rng);
            assert!(session.events().is_empty());
        }
    }

    #[test]
    fn test_soul_bond_replaces_weapon_leech() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        attacker.weapon.attributes.leech_life = 200;
        attacker.soul_bond = Some(SoulBond::default()); // all essences zero
        attacker.hits = 1;

        for _ in 0..32 {
            let mut session = SwingSession::new();
            engine.leech(&mut attacker, &mut defender, 100, &mut session, &mut rng);
            assert!(session.events().is_empty());
        }
    }

    #[test]
    fn test_wraith_form_drains_defender() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        attacker.status.transformation = Some(Transformation::WraithForm);
        attacker.skills.set(SkillId::Necromancy, 100.0);
        attacker.mana = 0;
        defender.mana = 50;

        let mut session = SwingSession::new();
        engine.leech(&mut attacker, &mut defender, 100, &mut session, &mut rng);

        // 5 + 15 = 20% of 100 damage
        assert_eq!(defender.mana, 30);
        assert!(attacker.mana >= 20);
        assert!(session
            .events()
            .iter()
            .any(|e| matches!(e, CombatEvent::ManaDrained { amount: 20 })));
    }

    #[test]
    fn test_poison_delivery_decrements_charges() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        attacker.weapon = Weapon::kryss();
        attacker.weapon.poison = Some(LoadedPoison::new(PoisonLevel::Greater, 2));
        attacker.skills.set(SkillId::Poisoning, 120.0);

        // Roll until the skill check lands
        for _ in 0..64 {
            let mut session = SwingSession::new();
            engine.deliver_poison(
                &mut attacker,
                &mut defender,
                &mut session,
                &mut rng,
                &mut DefaultWorld,
            );
            if defender.poisoned.is_some() {
                break;
            }
        }

        assert_eq!(defender.poisoned, Some(PoisonLevel::Greater));
        assert_eq!(attacker.weapon.poison.unwrap().charges, 1);
    }

    #[test]
    fn test_bashing_weapon_never_poisons() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        attacker.weapon = Weapon::war_mace();
        attacker.weapon.poison = Some(LoadedPoison::new(PoisonLevel::Lethal, 10));
        attacker.skills.set(SkillId::Poisoning, 120.0);

        for _ in 0..64 {
            let mut session = SwingSession::new();
            engine.deliver_poison(
                &mut attacker,
                &mut defender,
                &mut session,
                &mut rng,
                &mut DefaultWorld,
            );
        }
        assert!(defender.poisoned.is_none());
        assert_eq!(attacker.weapon.poison.unwrap().charges, 10);
    }

    #[test]
    fn test_immunity_blocks_poison() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        attacker.weapon = Weapon::kryss();
        attacker.weapon.poison = Some(LoadedPoison::new(PoisonLevel::Regular, 5));
        attacker.skills.set(SkillId::Poisoning, 120.0);
        defender.poison_immunity = Some(PoisonLevel::Deadly);

        for _ in 0..64 {
            let mut session = SwingSession::new();
            engine.deliver_poison(
                &mut attacker,
                &mut defender,
                &mut session,
                &mut rng,
                &mut DefaultWorld,
            );
        }
        assert!(defender.poisoned.is_none());
    }

    #[test]
    fn test_modern_mode_needs_infectious_strike() {
        let mut engine = CombatEngine::default();
        engine.config.classic_poisoning = false;
        let mut attacker = Combatant::veteran("poisoner");
        attacker.weapon = Weapon::kryss();
        attacker.weapon.poison = Some(LoadedPoison::new(PoisonLevel::Regular, 5));
        attacker.skills.set(SkillId::Poisoning, 120.0);
        let mut defender = Combatant::brute("troll", CreatureClass::Humanoid);
        let mut rng = CombatRng::seed_from_u64(42);

        // Without the technique, nothing lands
        for _ in 0..32 {
            let mut session = SwingSession::new();
            engine.deliver_poison(
                &mut attacker,
                &mut defender,
                &mut session,
                &mut rng,
                &mut DefaultWorld,
            );
        }
        assert!(defender.poisoned.is_none());

        // Armed, it delivers
        for _ in 0..64 {
            let mut session = SwingSession::new();
            session.ability = Some(WeaponAbility::InfectiousStrike);
            engine.deliver_poison(
                &mut attacker,
                &mut defender,
                &mut session,
                &mut rng,
                &mut DefaultWorld,
            );
            if defender.poisoned.is_some() {
                break;
            }
        }
        assert!(defender.poisoned.is_some());
    }

    #[test]
    fn test_corrosive_defender_always_wears() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        defender.corrosive = true;
        let before = attacker.weapon.hits;

        let mut session = SwingSession::new();
        engine.weapon_self_wear(
            &mut attacker,
            &defender,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert_eq!(attacker.weapon.hits, before - 1);
        assert!(session.events().contains(&CombatEvent::WeaponCorroded));
    }

    #[test]
    fn test_weapon_destruction_replaces_with_fists() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        defender.corrosive = true;
        attacker.weapon.hits = 0;
        attacker.weapon.max_hits = 1;

        let mut session = SwingSession::new();
        engine.weapon_self_wear(
            &mut attacker,
            &defender,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert!(session.events().contains(&CombatEvent::WeaponDestroyed));
        assert_eq!(attacker.weapon.family, crate::items::weapon::WeaponFamily::Unarmed);
    }

    #[test]
    fn test_self_repair_mends_instead() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        defender.corrosive = true;
        attacker.weapon.attributes.self_repair = 100; // always wins the roll
        attacker.weapon.hits = 10;

        let mut session = SwingSession::new();
        engine.weapon_self_wear(
            &mut attacker,
            &defender,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert_eq!(attacker.weapon.hits, 11);
    }

    #[test]
    fn test_miss_path_clears_techniques() {
        let (engine, mut attacker, mut defender, mut rng) = setup();
        let mut session = SwingSession::new();
        session.ability = Some(WeaponAbility::ArmorIgnore);

        engine.on_miss(
            &mut attacker,
            &mut defender,
            &mut session,
            &mut rng,
            &mut DefaultWorld,
        );
        assert!(session.ability.is_none());
        assert!(session.events().contains(&CombatEvent::Miss));
    }
}
