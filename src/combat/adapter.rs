//! Collaborator seams for the surrounding server systems
//!
//! The engine does not know how skill gain, spell effects or the wider
//! resistance bookkeeping work; it reports through this trait and consumes
//! the one answer it needs back (actual damage dealt). The default method
//! bodies implement the standard shard behavior so tests and the skirmish
//! runner work without a full server behind them.

use crate::combat::elements::DamageSplit;
use crate::combat::procs::{AreaElement, SpellProc};
use crate::core::rng::CombatRng;
use crate::core::types::{DamageType, EntityId};
use crate::entity::combatant::Combatant;
use crate::entity::skills::SkillId;
use crate::items::poison::PoisonLevel;

/// External systems consulted during swing resolution.
pub trait WorldHooks {
    /// Passive skill-gain notification; fired after every internal skill
    /// check with the chance that was rolled and its outcome.
    fn on_skill_use(&mut self, _user: EntityId, _skill: SkillId, _chance: f64, _success: bool) {}

    /// A skill was exercised without a check (tactics and anatomy during
    /// damage scaling); the progression system may still award gains.
    fn on_passive_gain(&mut self, _user: EntityId, _skill: SkillId) {}

    /// Hand the type-split damage to the resistance/HP system. The return
    /// value is the authoritative damage dealt and drives all following
    /// leech and proc math.
    fn deal_damage(
        &mut self,
        _attacker: &mut Combatant,
        defender: &mut Combatant,
        amount: u32,
        split: &DamageSplit,
        ignore_armor: bool,
        _ranged: bool,
    ) -> u32 {
        let mut weighted: i64 = 0;
        for ty in DamageType::ALL {
            let share = split.share(ty) as i64;
            if share == 0 {
                continue;
            }
            let resist = if ignore_armor {
                0
            } else {
                defender.resistance(ty).clamp(0, 100) as i64
            };
            weighted += amount as i64 * share * (100 - resist);
        }

        let dealt = (weighted / 10_000) as i32;
        defender.take_damage(dealt);
        dealt.max(0) as u32
    }

    /// A single-target spell proc fired from a weapon attribute.
    fn spell_proc(
        &mut self,
        _attacker: &mut Combatant,
        _defender: &mut Combatant,
        _proc: SpellProc,
        _rng: &mut CombatRng,
    ) {
    }

    /// An elemental burst around the defender. `base_damage` is the
    /// weapon's unscaled base roll; the spell system spreads it.
    fn area_burst(
        &mut self,
        _attacker: &mut Combatant,
        _defender: &mut Combatant,
        _element: AreaElement,
        _base_damage: u32,
        _rng: &mut CombatRng,
    ) {
    }

    /// Apply a poison that already passed every delivery check.
    fn apply_poison(&mut self, defender: &mut Combatant, level: PoisonLevel) {
        defender.poisoned = Some(level);
    }

    /// The wielder's weapon crumbled away mid-swing.
    fn weapon_destroyed(&mut self, _owner: EntityId) {}
}

/// Stand-in world for tests and the skirmish runner: default behavior only.
#[derive(Debug, Default)]
pub struct DefaultWorld;

impl WorldHooks for DefaultWorld {}
