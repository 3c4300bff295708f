//! Per-swing combat session
//!
//! One session is created at swing start, threaded through the resolver,
//! calculator and applier, and dropped when the swing completes. It owns
//! the armed techniques (there are no global ability registries) and the
//! event log the caller turns into animations, sounds and messages.

use crate::combat::ability::{SpecialMove, WeaponAbility};
use crate::combat::procs::{AreaElement, SpellProc};
use crate::items::gear::WearSlot;
use crate::items::poison::PoisonLevel;

/// Observable side effects of one swing, in occurrence order.
///
/// The engine never talks to the presentation layer; it records events and
/// the tick loop replays them as effects, sounds and overhead messages.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    Hit { damage: u32 },
    Miss,
    /// Defender blocked; emitted exactly once per blocked swing.
    Blocked,
    CounterArmed,
    ConfidenceHeal { hits: i32, stamina: i32 },
    GearStruck { slot: WearSlot },
    GearDestroyed { slot: WearSlot },
    SlayerFlare,
    LifeLeech { amount: i32 },
    StaminaLeech { amount: i32 },
    ManaLeech { amount: i32 },
    ManaDrained { amount: i32 },
    AreaBurst { element: AreaElement },
    SpellStruck { proc: SpellProc },
    Poisoned { level: PoisonLevel },
    WeaponWorn,
    WeaponCorroded,
    /// `max_hits` was consumed instead of `hits`.
    WeaponWeakened,
    WeaponDestroyed,
    MountGlance { damage: u32 },
}

/// Context owned for the lifetime of one swing.
#[derive(Debug, Clone, Default)]
pub struct SwingSession {
    /// Armed weapon ability, if any; cleared when parried or vetoed.
    pub ability: Option<WeaponAbility>,
    /// Armed special move, if any; cleared when vetoed.
    pub special_move: Option<SpecialMove>,

    /// External damage multiplier for this swing (1.0 = plain swing;
    /// the second half of a double strike passes less).
    pub damage_multiplier: f64,
    /// Set for both halves of a double strike; applies the -10% malus.
    pub double_strike: bool,

    events: Vec<CombatEvent>,
}

impl SwingSession {
    pub fn new() -> Self {
        Self {
            damage_multiplier: 1.0,
            ..Default::default()
        }
    }

    pub fn with_multiplier(multiplier: f64) -> Self {
        Self {
            damage_multiplier: multiplier,
            ..Self::new()
        }
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Drain the event log for the caller.
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear the armed ability (parried or precondition failed).
    pub fn clear_ability(&mut self) {
        self.ability = None;
    }

    pub fn clear_move(&mut self) {
        self.special_move = None;
    }
}
