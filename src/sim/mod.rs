//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Clock access only through the injected scheduler
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{GameState, Obstacle, Player, RunStatus};
pub use tick::{GameEvent, TickInput, handle_timer, tick};
