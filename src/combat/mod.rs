//! Weapon combat resolution
//!
//! The pipeline per swing: [`CombatEngine::check_hit`] decides whether the
//! swing lands; on a hit, [`CombatEngine::compute_damage`] produces the raw
//! damage and [`CombatEngine::on_hit`] mitigates, splits, applies and
//! resolves every side effect. [`CombatEngine::swing`] ties the stages
//! together and is what the tick loop calls.

pub mod ability;
pub mod adapter;
pub mod apply;
pub mod damage;
pub mod elements;
pub mod hit;
pub mod parry;
pub mod procs;
pub mod ruleset;
pub mod session;
pub mod slayer;
pub mod swing;

pub use ability::{SpecialMove, Technique, WeaponAbility};
pub use adapter::{DefaultWorld, WorldHooks};
pub use elements::{consecrated_split, wielder_split, DamageSplit};
pub use procs::{AreaElement, SpellProc};
pub use session::{CombatEvent, SwingSession};
pub use slayer::{check_slayers, CreatureClass, SlayerKind, SlayerMatch};
pub use swing::SwingOutcome;

use crate::core::config::CombatConfig;

/// The combat resolution engine.
///
/// Holds the tunable configuration (including the ruleset strategy) and
/// nothing else; all combat state lives on the combatants, the per-swing
/// session and the caller-owned RNG.
#[derive(Debug, Clone)]
pub struct CombatEngine {
    pub config: CombatConfig,
}

impl CombatEngine {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }
}

impl Default for CombatEngine {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}
