//! Transient combat status effects
//!
//! Everything here is set and cleared by outside systems (spells, skills,
//! virtue abilities) and merely *read* by the resolution pipeline — with two
//! exceptions: the lower-attack/lower-defense procs and the parry follow-ups
//! write back into the defender's status mid-swing.

use serde::{Deserialize, Serialize};

use crate::combat::slayer::CreatureClass;

/// Body-altering transformation states with combat side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transformation {
    /// Necromantic beast form: +25% damage, fixed unarmed damage range.
    HorrificBeast,
    /// Necromantic embrace: +10% life leech.
    VampiricEmbrace,
    /// Necromantic shade: drains mana from the victim directly.
    WraithForm,
    /// Feral shapeshift: +25% accuracy.
    FeralWolf,
    /// Feral shapeshift with the same accuracy bonus as the wolf.
    MysticFox,
    /// Feral serpent: delivers a weak innate poison on melee hits.
    GiantSerpent,
}

impl Transformation {
    /// Necromantic transformations take bonus damage from silver weapons;
    /// the beast form is the exception.
    pub fn is_necromantic(&self) -> bool {
        matches!(
            self,
            Transformation::VampiricEmbrace | Transformation::WraithForm
        )
    }

    pub fn accuracy_bonus(&self) -> i32 {
        match self {
            Transformation::FeralWolf | Transformation::MysticFox => 25,
            _ => 0,
        }
    }

    /// Fixed unarmed damage range imposed by the form, if any.
    pub fn fixed_damage_range(&self) -> Option<(u16, u16)> {
        match self {
            Transformation::HorrificBeast => Some((17, 35)),
            _ => None,
        }
    }
}

/// Transient buffs, debuffs and stances consulted during resolution.
///
/// All fields default to "absent"; a freshly spawned combatant carries no
/// status at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    /// Divine fury: +10 accuracy and damage, -20 to the defense bonus.
    pub divine_fury: bool,

    /// Under a lower-attack proc: -25 accuracy.
    pub lower_attack: bool,

    /// Under a lower-defense proc: -25 to the defense bonus.
    pub lower_defense: bool,

    /// Active transformation, if any.
    pub transformation: Option<Transformation>,

    /// Enemy-of-one designation: chosen creature class, or pending choice.
    pub enemy_of_one: Option<CreatureClass>,
    pub awaiting_enemy_of_one: bool,

    /// Discordance malus strength (0..=28), applied to defense and damage.
    pub discordance: Option<i32>,

    /// Defense-mastery stance: damage malus while active (50..=80).
    pub defense_mastery: Option<i32>,

    /// Block-stance readiness: bonus to the defense bucket.
    pub block_bonus: Option<i32>,

    /// Surprise-attack malus against this combatant's defense.
    pub surprise_malus: Option<i32>,

    /// Honorable-execution aftermath penalty; cleared by a successful block.
    pub honorable_execution_penalty: bool,

    /// Counter-attack stance armed by a bushido ability.
    pub counter_attack: bool,

    /// Confidence stance: heals on successful block.
    pub confidence: bool,

    /// Honor virtue active against the current target.
    pub honor_active: bool,

    /// Perfection damage bonus earned through consecutive honorable hits.
    pub perfection: i32,

    // Swing gating, owned by external systems
    pub paralyzed: bool,
    pub frozen: bool,
    pub casting: bool,
    pub peace_bound: bool,
}

impl StatusEffects {
    /// Can this combatant begin a swing at all?
    ///
    /// Checked once before resolution starts; past this gate a swing always
    /// runs to completion.
    pub fn can_swing(&self) -> bool {
        !self.paralyzed && !self.frozen && !self.casting && !self.peace_bound
    }

    pub fn under(&self, form: Transformation) -> bool {
        self.transformation == Some(form)
    }
}
