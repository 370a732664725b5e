//! Data-driven game balance
//!
//! Every physics and pacing constant the simulation reads lives here, so a
//! level can be rebalanced from JSON without touching the tick code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::storage;

/// How a pipe passing the envelope is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// Pipe moved from right of the envelope to at-or-left of it this tick
    #[default]
    Crossed,
    /// Pipe x lands exactly on the envelope x (misses when the scroll steps over it)
    ExactMatch,
}

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("{field} must be negative")]
    NotNegative { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("win score must be at least 1")]
    ZeroWinScore,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub sprite_x: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub scroll_speed: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub spawn_spacing: f32,
    pub min_margin: f32,
    pub win_score: u32,
    pub scoring: ScoringRule,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sprite_x: SPRITE_X,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            scroll_speed: SCROLL_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            spawn_spacing: SPAWN_SPACING,
            min_margin: MIN_MARGIN,
            win_score: WIN_SCORE,
            scoring: ScoringRule::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot make progress with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("scroll_speed", self.scroll_speed),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("spawn_spacing", self.spawn_spacing),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field });
            }
        }
        if !(self.jump_impulse < 0.0) {
            return Err(TuningError::NotNegative {
                field: "jump_impulse",
            });
        }
        for (field, value) in [("sprite_x", self.sprite_x), ("gravity", self.gravity)] {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field });
            }
        }
        // A negative margin lets the gap range reach past the viewport edges
        if !(self.min_margin >= 0.0) {
            return Err(TuningError::Negative {
                field: "min_margin",
            });
        }
        if self.win_score == 0 {
            return Err(TuningError::ZeroWinScore);
        }
        Ok(())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "envelope_flap_tuning";

    /// Load a tuning override from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        let Some(json) = storage::load_string(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning override, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
