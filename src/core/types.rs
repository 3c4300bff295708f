//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for combatants (players, creatures, summons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// The elemental damage channels recognized by the resistance system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Poison,
    Energy,
    Chaos,
    Direct,
}

impl DamageType {
    /// All channels, in the order the resistance system expects them.
    pub const ALL: [DamageType; 7] = [
        DamageType::Physical,
        DamageType::Fire,
        DamageType::Cold,
        DamageType::Poison,
        DamageType::Energy,
        DamageType::Chaos,
        DamageType::Direct,
    ];
}

/// Integer percentage scaling, truncating toward zero.
///
/// Used everywhere a "percent of damage" amount is computed so the same
/// rounding applies to leech, durability scaling and bonus math.
pub fn scale(value: i32, percent: i32) -> i32 {
    value * percent / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn test_scale_truncates() {
        assert_eq!(scale(10, 15), 1);
        assert_eq!(scale(100, 15), 15);
        assert_eq!(scale(7, 50), 3);
        assert_eq!(scale(0, 75), 0);
    }
}
