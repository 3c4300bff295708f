//! Skill identifiers and per-combatant skill values
//!
//! Skill values are in tenths-free display units (0.0 .. 120.0). The combat
//! pipeline only ever reads them; gains are the progression collaborator's
//! business and arrive through [`crate::combat::WorldHooks`].

use serde::{Deserialize, Serialize};

/// Skills consulted by the combat engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum SkillId {
    Swords,
    Fencing,
    Macing,
    Archery,
    Wrestling,
    Tactics,
    Anatomy,
    Parry,
    Poisoning,
    ArmsLore,
    Lumberjacking,
    Mining,
    Fishing,
    Bushido,
    Ninjitsu,
    Necromancy,
    Magery,
    Fletching,
}

impl SkillId {
    pub const COUNT: usize = 18;

    /// The three melee weapon skills, for use-best-skill resolution.
    pub const MELEE: [SkillId; 3] = [SkillId::Swords, SkillId::Fencing, SkillId::Macing];

    pub fn name(&self) -> &'static str {
        match self {
            SkillId::Swords => "Swords",
            SkillId::Fencing => "Fencing",
            SkillId::Macing => "Macing",
            SkillId::Archery => "Archery",
            SkillId::Wrestling => "Wrestling",
            SkillId::Tactics => "Tactics",
            SkillId::Anatomy => "Anatomy",
            SkillId::Parry => "Parry",
            SkillId::Poisoning => "Poisoning",
            SkillId::ArmsLore => "Arms Lore",
            SkillId::Lumberjacking => "Lumberjacking",
            SkillId::Mining => "Mining",
            SkillId::Fishing => "Fishing",
            SkillId::Bushido => "Bushido",
            SkillId::Ninjitsu => "Ninjitsu",
            SkillId::Necromancy => "Necromancy",
            SkillId::Magery => "Magery",
            SkillId::Fletching => "Fletching",
        }
    }
}

/// A combatant's skill values, indexed by [`SkillId`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSet {
    values: Vec<f64>,
}

impl Default for SkillSet {
    fn default() -> Self {
        Self {
            values: vec![0.0; SkillId::COUNT],
        }
    }
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, skill: SkillId) -> f64 {
        self.values[skill as usize]
    }

    pub fn set(&mut self, skill: SkillId, value: f64) -> &mut Self {
        self.values[skill as usize] = value.clamp(0.0, 120.0);
        self
    }

    /// Builder-style setter for test and spawn construction.
    pub fn with(mut self, skill: SkillId, value: f64) -> Self {
        self.set(skill, value);
        self
    }

    /// The highest of the three melee weapon skills.
    pub fn best_melee(&self) -> (SkillId, f64) {
        let mut best = (SkillId::Swords, self.value(SkillId::Swords));
        for sk in [SkillId::Fencing, SkillId::Macing] {
            let val = self.value(sk);
            if val > best.1 {
                best = (sk, val);
            }
        }
        best
    }
}
