//! Worn equipment pieces: armor, shields, clothing and jewelry
//!
//! Gear shares one shape regardless of kind; the combat engine only cares
//! that a piece occupies a slot, may carry attributes, and can take wear.

use serde::{Deserialize, Serialize};

use crate::items::attributes::GearAttributes;

/// Equipment slots a hit can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WearSlot {
    Helm,
    Neck,
    Torso,
    Arms,
    Gloves,
    Waist,
    Legs,
    Feet,
    Cloak,
    Shield,
    Ring,
    Bracelet,
    Earrings,
}

impl WearSlot {
    /// Slot scan order for random item-hit selection, armor-heavy first.
    pub const ALL: [WearSlot; 13] = [
        WearSlot::Torso,
        WearSlot::Legs,
        WearSlot::Helm,
        WearSlot::Arms,
        WearSlot::Gloves,
        WearSlot::Neck,
        WearSlot::Waist,
        WearSlot::Feet,
        WearSlot::Cloak,
        WearSlot::Shield,
        WearSlot::Bracelet,
        WearSlot::Ring,
        WearSlot::Earrings,
    ];
}

/// What kind of thing occupies the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GearKind {
    Armor,
    Shield,
    Clothing,
    Jewelry,
}

/// A worn equipment piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearPiece {
    pub name: String,
    pub kind: GearKind,
    pub hits: i32,
    pub max_hits: i32,
    /// Armor rating; only meaningful for armor and shields.
    pub rating: i32,
    pub attrs: GearAttributes,
}

impl GearPiece {
    pub fn armor(name: &str, rating: i32, durability: i32) -> Self {
        Self {
            name: name.into(),
            kind: GearKind::Armor,
            hits: durability,
            max_hits: durability,
            rating,
            attrs: GearAttributes::default(),
        }
    }

    pub fn shield(name: &str, rating: i32, durability: i32) -> Self {
        Self {
            kind: GearKind::Shield,
            ..Self::armor(name, rating, durability)
        }
    }

    pub fn clothing(name: &str) -> Self {
        Self {
            name: name.into(),
            kind: GearKind::Clothing,
            hits: 25,
            max_hits: 25,
            rating: 0,
            attrs: GearAttributes::default(),
        }
    }

    pub fn jewelry(name: &str, attrs: GearAttributes) -> Self {
        Self {
            name: name.into(),
            kind: GearKind::Jewelry,
            hits: 15,
            max_hits: 15,
            rating: 0,
            attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_keeps_rating() {
        let shield = GearPiece::shield("heater shield", 16, 80);
        assert_eq!(shield.kind, GearKind::Shield);
        assert_eq!(shield.rating, 16);
        assert_eq!(shield.hits, shield.max_hits);
    }

    #[test]
    fn test_all_slots_distinct() {
        let mut seen = std::collections::HashSet::new();
        for slot in WearSlot::ALL {
            assert!(seen.insert(slot));
        }
        assert_eq!(seen.len(), 13);
    }
}
