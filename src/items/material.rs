//! Crafting materials and their combat-relevant bonuses
//!
//! Each material contributes a durability bonus and an optional elemental
//! overlay to weapons made from it. Unknown or plain materials contribute
//! nothing; there is deliberately no error path here.

use serde::{Deserialize, Serialize};

/// Broad material class; drives the metal damage multiplier and the
/// wooden-ranged fletching bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialClass {
    Metal,
    Wood,
    Other,
}

/// Resource a weapon was crafted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    // Metals, in ore-rarity order
    Iron,
    DullCopper,
    ShadowIron,
    Copper,
    Bronze,
    Golden,
    Agapite,
    Verite,
    Valorite,
    // Woods
    Oak,
    Ash,
    Yew,
    Heartwood,
    // Everything else
    Bone,
}

/// Per-material combat bonuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialInfo {
    /// Percentage folded into the durability scale factor.
    pub durability: i32,
    // Elemental overlay percentages, claimed out of the physical remainder.
    pub fire: u8,
    pub cold: u8,
    pub poison: u8,
    pub energy: u8,
    pub chaos: u8,
    pub direct: u8,
}

impl Material {
    pub fn class(&self) -> MaterialClass {
        match self {
            Material::Iron
            | Material::DullCopper
            | Material::ShadowIron
            | Material::Copper
            | Material::Bronze
            | Material::Golden
            | Material::Agapite
            | Material::Verite
            | Material::Valorite => MaterialClass::Metal,
            Material::Oak | Material::Ash | Material::Yew | Material::Heartwood => {
                MaterialClass::Wood
            }
            Material::Bone => MaterialClass::Other,
        }
    }

    /// Combat bonuses contributed by this material.
    pub fn info(&self) -> MaterialInfo {
        match self {
            Material::Iron | Material::Oak | Material::Bone => MaterialInfo::default(),
            Material::DullCopper => MaterialInfo {
                durability: 50,
                ..Default::default()
            },
            Material::ShadowIron => MaterialInfo {
                durability: 10,
                cold: 20,
                ..Default::default()
            },
            Material::Copper => MaterialInfo {
                durability: 25,
                fire: 10,
                ..Default::default()
            },
            Material::Bronze => MaterialInfo {
                durability: 30,
                fire: 20,
                ..Default::default()
            },
            Material::Golden => MaterialInfo {
                durability: 10,
                energy: 10,
                ..Default::default()
            },
            Material::Agapite => MaterialInfo {
                durability: 30,
                poison: 20,
                energy: 10,
                ..Default::default()
            },
            Material::Verite => MaterialInfo {
                durability: 40,
                poison: 30,
                ..Default::default()
            },
            Material::Valorite => MaterialInfo {
                durability: 60,
                fire: 10,
                cold: 10,
                poison: 10,
                energy: 10,
                ..Default::default()
            },
            Material::Ash => MaterialInfo {
                durability: 10,
                ..Default::default()
            },
            Material::Yew => MaterialInfo {
                durability: 20,
                fire: 10,
                ..Default::default()
            },
            Material::Heartwood => MaterialInfo {
                durability: 30,
                chaos: 10,
                ..Default::default()
            },
        }
    }
}

impl Default for Material {
    /// Iron is the documented baseline for absent or malformed records.
    fn default() -> Self {
        Material::Iron
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iron_is_neutral() {
        let info = Material::Iron.info();
        assert_eq!(info.durability, 0);
        assert_eq!(info.fire + info.cold + info.poison + info.energy, 0);
    }

    #[test]
    fn test_class_partition() {
        assert_eq!(Material::Valorite.class(), MaterialClass::Metal);
        assert_eq!(Material::Heartwood.class(), MaterialClass::Wood);
        assert_eq!(Material::Bone.class(), MaterialClass::Other);
    }

    #[test]
    fn test_overlays_leave_room_for_physical() {
        // No material may claim the full 100% on its own
        for mat in [
            Material::DullCopper,
            Material::ShadowIron,
            Material::Copper,
            Material::Bronze,
            Material::Golden,
            Material::Agapite,
            Material::Verite,
            Material::Valorite,
            Material::Yew,
            Material::Heartwood,
        ] {
            let info = mat.info();
            let total = info.fire as u32
                + info.cold as u32
                + info.poison as u32
                + info.energy as u32
                + info.chaos as u32
                + info.direct as u32;
            assert!(total < 100, "{:?} claims the whole split", mat);
        }
    }
}
