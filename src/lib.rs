//! Envelope Flap - a one-button canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, game state)
//! - `renderer`: Scene building and Canvas2D drawing
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ScoringRule, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Horizontal offset of the envelope from the left edge
    pub const SPRITE_X: f32 = 50.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.3;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -7.0;

    /// Pipe scroll speed (pixels per tick)
    pub const SCROLL_SPEED: f32 = 2.0;
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    /// Vertical opening between the top and bottom pipe
    pub const GAP_HEIGHT: f32 = 200.0;
    /// A new pipe spawns once the last one is this far from the right edge
    pub const SPAWN_SPACING: f32 = 300.0;
    /// Minimum distance between the gap and the top/bottom edge
    pub const MIN_MARGIN: f32 = 50.0;

    /// Passing this many pipes wins the game
    pub const WIN_SCORE: u32 = 10;

    /// Delay between game over and navigating to the outcome page
    pub const REDIRECT_DELAY_MS: f64 = 500.0;
}
