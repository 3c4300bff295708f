pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{CombatConfig, Ruleset};
pub use error::{CombatError, Result};
pub use rng::CombatRng;
pub use types::{scale, DamageType, EntityId, Tick};
