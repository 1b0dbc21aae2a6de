//! Generation and Economy
//!
//! The public game math that must be independently reproducible: mapping a
//! property hash to a celestial body, deriving its stats, and projecting the
//! economy of an already-discovered location forward in time.
//!
//! ## Module Structure
//!
//! - `params`: Per-game configuration (thresholds, rounds, speed)
//! - `body`: Property hash -> body type, size, comet boosts
//! - `stats`: Base stat tables and comet doubling
//! - `economy`: Lazy accrual, distance decay, travel scheduling, upgrades
//! - `state`: Dynamic state of an initialized location

pub mod body;
pub mod economy;
pub mod params;
pub mod state;
pub mod stats;

// Re-export key types
pub use body::{determine_body, CelestialBodyProperties, CelestialBodyType, CometBoost};
pub use params::{GameParameters, NoiseThresholds, ParamError, GAME_SPEED_ONE};
pub use state::{CelestialBody, DynamicState, UpgradeFocus};
pub use stats::{apply_comets, base_stats, CelestialBodyStats};
