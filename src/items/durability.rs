//! Durability bookkeeping shared by weapons and worn gear
//!
//! One capability trait covers every equippable: current and maximum
//! durability plus a single wear entry point. Wear always drains `hits`
//! first, then starts eating `max_hits`, and the piece is destroyed exactly
//! when `max_hits` reaches zero.

use crate::items::gear::GearPiece;
use crate::items::weapon::{DurabilityLevel, Quality, Weapon};

/// Base scale applied when no bonuses are present: stored values are
/// interpreted as 50% of their displayed durability.
const DURABILITY_BASE_SCALE: i32 = 50;

/// Outcome of applying one point of wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WearOutcome {
    /// Durability reduced, piece still serviceable.
    Worn,
    /// `hits` exhausted; `max_hits` reduced instead.
    Weakened,
    /// `max_hits` reached zero; the piece must be removed from the world.
    Destroyed,
}

/// Anything that tracks structural durability and can take wear.
pub trait Damageable {
    fn current_durability(&self) -> i32;
    fn max_durability(&self) -> i32;

    /// Apply `points` of wear, draining `hits` then `max_hits`.
    fn apply_wear(&mut self, points: i32) -> WearOutcome;

    /// Regain one point of durability, clamped at the maximum.
    fn mend(&mut self);
}

fn wear_fields(hits: &mut i32, max_hits: &mut i32, points: i32) -> WearOutcome {
    if *hits >= points {
        *hits -= points;
        WearOutcome::Worn
    } else if *max_hits > points {
        *hits = 0;
        *max_hits -= points;
        WearOutcome::Weakened
    } else {
        *hits = 0;
        *max_hits = 0;
        WearOutcome::Destroyed
    }
}

impl Damageable for Weapon {
    fn current_durability(&self) -> i32 {
        self.hits
    }

    fn max_durability(&self) -> i32 {
        self.max_hits
    }

    fn apply_wear(&mut self, points: i32) -> WearOutcome {
        let outcome = wear_fields(&mut self.hits, &mut self.max_hits, points);
        // Cosmetic counter; monotonically non-decreasing, display-only.
        self.wear = self.wear.saturating_add(points.clamp(0, 100) as u8).min(100);
        outcome
    }

    fn mend(&mut self) {
        if self.hits < self.max_hits {
            self.hits += 1;
        }
    }
}

impl Damageable for GearPiece {
    fn current_durability(&self) -> i32 {
        self.hits
    }

    fn max_durability(&self) -> i32 {
        self.max_hits
    }

    fn apply_wear(&mut self, points: i32) -> WearOutcome {
        wear_fields(&mut self.hits, &mut self.max_hits, points)
    }

    fn mend(&mut self) {
        if self.hits < self.max_hits {
            self.hits += 1;
        }
    }
}

/// Total durability bonus percentage for a weapon: quality, magical tier,
/// material and imbued attribute, summed.
pub fn durability_bonus(weapon: &Weapon) -> i32 {
    let mut bonus = 0;

    if weapon.quality == Quality::Exceptional {
        bonus += 20;
    }

    bonus += match weapon.durability_level {
        DurabilityLevel::Regular => 0,
        DurabilityLevel::Durable => 20,
        DurabilityLevel::Substantial => 50,
        DurabilityLevel::Massive => 70,
        DurabilityLevel::Fortified => 100,
        DurabilityLevel::Indestructible => 120,
    };

    bonus += weapon.material.info().durability;
    bonus += weapon.attributes.bonus_durability;

    bonus
}

/// Re-derive scaled `hits`/`max_hits` after a quality, tier or material
/// change. Rounds up so scaling never destroys a point outright.
pub fn scale_durability(weapon: &mut Weapon) {
    let scale = DURABILITY_BASE_SCALE + durability_bonus(weapon);
    weapon.hits = (weapon.hits * scale + 99) / 100;
    weapon.max_hits = (weapon.max_hits * scale + 99) / 100;
}

/// Inverse of [`scale_durability`]; rounds up symmetrically so that
/// unscale-then-scale round-trips up to integer rounding.
pub fn unscale_durability(weapon: &mut Weapon) {
    let scale = DURABILITY_BASE_SCALE + durability_bonus(weapon);
    weapon.hits = (weapon.hits * 100 + scale - 1) / scale;
    weapon.max_hits = (weapon.max_hits * 100 + scale - 1) / scale;
}
