//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Commands applied between ticks, never during one
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{hits_obstacle, off_screen, out_of_bounds, passed};
pub use input::{Command, CommandQueue};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Outcome, Sprite, Viewport};
pub use tick::tick;
