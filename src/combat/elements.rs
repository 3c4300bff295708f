//! Elemental damage splitting
//!
//! Every hit is distributed across seven damage channels before it reaches
//! the resistance system. The split always sums to exactly 100: the listed
//! elemental channels claim their share and physical absorbs the remainder.

use serde::{Deserialize, Serialize};

use crate::core::types::DamageType;
use crate::entity::combatant::Combatant;
use crate::items::weapon::Weapon;

/// A percentage distribution of one hit across damage channels.
///
/// Invariant: the seven fields always sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSplit {
    pub physical: u8,
    pub fire: u8,
    pub cold: u8,
    pub poison: u8,
    pub energy: u8,
    pub chaos: u8,
    pub direct: u8,
}

impl Default for DamageSplit {
    fn default() -> Self {
        Self::PHYSICAL
    }
}

impl DamageSplit {
    /// Plain 100% physical.
    pub const PHYSICAL: DamageSplit = DamageSplit {
        physical: 100,
        fire: 0,
        cold: 0,
        poison: 0,
        energy: 0,
        chaos: 0,
        direct: 0,
    };

    pub fn total(&self) -> u32 {
        self.physical as u32
            + self.fire as u32
            + self.cold as u32
            + self.poison as u32
            + self.energy as u32
            + self.chaos as u32
            + self.direct as u32
    }

    pub fn share(&self, ty: DamageType) -> u8 {
        match ty {
            DamageType::Physical => self.physical,
            DamageType::Fire => self.fire,
            DamageType::Cold => self.cold,
            DamageType::Poison => self.poison,
            DamageType::Energy => self.energy,
            DamageType::Chaos => self.chaos,
            DamageType::Direct => self.direct,
        }
    }

    /// Build a creature's split from its innate percentages, normalizing an
    /// over-committed profile so the invariant holds.
    pub fn from_parts(
        fire: u8,
        cold: u8,
        poison: u8,
        energy: u8,
        chaos: u8,
        direct: u8,
    ) -> Self {
        let mut split = DamageSplit {
            physical: 0,
            fire,
            cold,
            poison,
            energy,
            chaos,
            direct,
        };
        let elemental = split.total();
        if elemental > 100 {
            // Shed the overflow channel by channel, rarest first
            let mut excess = elemental - 100;
            for channel in [
                &mut split.direct,
                &mut split.chaos,
                &mut split.energy,
                &mut split.poison,
                &mut split.cold,
                &mut split.fire,
            ] {
                let cut = (*channel as u32).min(excess) as u8;
                *channel -= cut;
                excess -= cut as u32;
                if excess == 0 {
                    break;
                }
            }
        }
        split.physical = (100 - split.total()) as u8;
        split
    }
}

/// Claim `requested` points of the physical remainder for one channel.
///
/// Returns what is left of the remainder; the channel never pushes the
/// elemental total past 100.
fn claim_overlay(requested: u8, channel: &mut u8, remaining: u32) -> u32 {
    if remaining == 0 || requested == 0 {
        return remaining;
    }

    let mut claimed = requested as u32;
    if claimed + *channel as u32 > 100 {
        claimed = 100 - *channel as u32;
    }
    claimed = claimed.min(remaining);

    *channel += claimed as u8;
    remaining - claimed
}

/// The split a wielder's hit carries: creature profiles win, otherwise the
/// weapon's imbued percentages plus its material overlay.
pub fn wielder_split(attacker: &Combatant, weapon: &Weapon) -> DamageSplit {
    if let Some(innate) = attacker.innate_elements {
        return innate;
    }

    let imbued = &weapon.elements;
    let mut split = DamageSplit::from_parts(
        imbued.fire,
        imbued.cold,
        imbued.poison,
        imbued.energy,
        imbued.chaos,
        imbued.direct,
    );

    // Material overlays eat into whatever physical remainder is left
    let mat = weapon.material.info();
    let mut left = split.physical as u32;
    left = claim_overlay(mat.cold, &mut split.cold, left);
    left = claim_overlay(mat.energy, &mut split.energy, left);
    left = claim_overlay(mat.fire, &mut split.fire, left);
    left = claim_overlay(mat.poison, &mut split.poison, left);
    left = claim_overlay(mat.chaos, &mut split.chaos, left);
    left = claim_overlay(mat.direct, &mut split.direct, left);
    split.physical = left as u8;

    split
}

/// Consecrated override: the entire hit lands on the defender's single
/// weakest resistance (chaos and direct never participate).
pub fn consecrated_split(defender: &Combatant) -> DamageSplit {
    let candidates = [
        (DamageType::Physical, defender.resistances.physical),
        (DamageType::Fire, defender.resistances.fire),
        (DamageType::Cold, defender.resistances.cold),
        (DamageType::Poison, defender.resistances.poison),
        (DamageType::Energy, defender.resistances.energy),
    ];

    let mut weakest = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < weakest.1 {
            weakest = *candidate;
        }
    }

    let mut split = DamageSplit {
        physical: 0,
        fire: 0,
        cold: 0,
        poison: 0,
        energy: 0,
        chaos: 0,
        direct: 0,
    };
    match weakest.0 {
        DamageType::Physical => split.physical = 100,
        DamageType::Fire => split.fire = 100,
        DamageType::Cold => split.cold = 100,
        DamageType::Poison => split.poison = 100,
        DamageType::Energy => split.energy = 100,
        DamageType::Chaos | DamageType::Direct => unreachable!(),
    }
    split
}
