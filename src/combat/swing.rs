//! Swing orchestration: the one entry point the tick loop calls
//!
//! A swing either resolves completely or not at all: the gate check runs
//! before anything else, and once resolution starts there is no suspension
//! point until the outcome is returned.

use std::time::Duration;

use tracing::trace;

use crate::combat::ability::WeaponAbility;
use crate::combat::adapter::WorldHooks;
use crate::combat::session::{CombatEvent, SwingSession};
use crate::combat::CombatEngine;
use crate::core::rng::CombatRng;
use crate::entity::combatant::Combatant;

/// Everything the tick loop needs to know about one resolved swing.
#[derive(Debug, Clone)]
pub struct SwingOutcome {
    pub hit: bool,
    /// Authoritative damage dealt (post-mitigation); 0 on a miss.
    pub damage: u32,
    /// Delay before the attacker's next swing.
    pub delay: Duration,
    /// Side effects in occurrence order, for presentation and timers.
    pub events: Vec<CombatEvent>,
}

impl CombatEngine {
    /// Whether the attacker may start a swing at all.
    pub fn can_swing(&self, attacker: &Combatant) -> bool {
        attacker.status.can_swing()
    }

    /// Resolve one full swing. Returns `None` when the attacker is
    /// paralyzed, frozen, mid-cast or peace-bound; cancellation after this
    /// point does not exist.
    pub fn swing(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        rng: &mut CombatRng,
        world: &mut dyn WorldHooks,
    ) -> Option<SwingOutcome> {
        if !self.can_swing(attacker) {
            return None;
        }

        let mut session = SwingSession::new();

        // Creatures arm their innate technique by chance each swing
        if !attacker.player {
            if let Some(ability) = attacker.innate_ability {
                if rng.chance(attacker.innate_ability_chance as f64 / 100.0) {
                    session.ability = Some(ability);
                }
            }
        }
        if session.ability == Some(WeaponAbility::DoubleStrike) {
            session.double_strike = true;
        }

        let hit = self.check_hit(attacker, defender, &session, rng, world);
        trace!(attacker = %attacker.name, defender = %defender.name, hit, "swing");

        let damage = if hit {
            let raw = self.compute_damage(attacker, rng, world);
            self.on_hit(attacker, defender, raw, &mut session, rng, world)
        } else {
            self.on_miss(attacker, defender, &mut session, rng, world);
            0
        };

        Some(SwingOutcome {
            hit,
            damage,
            delay: self.swing_delay(attacker),
            events: session.take_events(),
        })
    }
}
