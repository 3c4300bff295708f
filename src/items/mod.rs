pub mod attributes;
pub mod durability;
pub mod gear;
pub mod material;
pub mod persist;
pub mod poison;
pub mod weapon;

pub use attributes::{ElementDamages, GearAttributes, WeaponAttributes};
pub use durability::{durability_bonus, scale_durability, unscale_durability, Damageable, WearOutcome};
pub use gear::{GearKind, GearPiece, WearSlot};
pub use material::{Material, MaterialClass};
pub use poison::{LoadedPoison, PoisonLevel};
pub use weapon::{
    AccuracyLevel, DamageLevel, DurabilityLevel, Quality, Weapon, WeaponFamily,
};
