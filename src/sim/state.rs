//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in `GameState`. The driver only
//! reads it and talks to it through `start`, `jump`, `reset` and `resize`.

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Visible play area in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Build a viewport, clamping negative or non-finite sizes to zero
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Vertical middle, where the envelope starts
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Allowed range for a new gap's top edge.
    ///
    /// Collapses to `min_margin..=min_margin` when the viewport is too short
    /// to fit the gap with margins on both sides.
    pub fn gap_top_range(&self, tuning: &Tuning) -> RangeInclusive<f32> {
        let lo = tuning.min_margin;
        let hi = (self.height - tuning.gap_height - tuning.min_margin).max(lo);
        lo..=hi
    }
}

/// Which terminal page the game ends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap or space
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended; stays here until reset
    Over(Outcome),
}

/// One-shot notifications for the driver, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Scored { score: u32 },
    GameOver { outcome: Outcome },
    Reset,
}

/// The envelope the player steers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// `x` is fixed for the whole run; pipes scroll past instead
    pub pos: Vec2,
    pub velocity: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
}

impl Sprite {
    pub fn new(viewport: &Viewport, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.sprite_x, viewport.center_y()),
            velocity: 0.0,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
        }
    }

    /// Semi-implicit Euler: velocity first, then position
    pub fn integrate(&mut self) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;
    }

    pub fn jump(&mut self) {
        self.velocity = self.jump_impulse;
    }
}

/// A top/bottom pipe pair with an opening between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the top pipe; the gap starts here
    pub gap_top: f32,
}

impl Obstacle {
    pub fn right_edge(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width
    }

    pub fn gap_bottom(&self, tuning: &Tuning) -> f32 {
        self.gap_top + tuning.gap_height
    }
}

/// Complete game state (deterministic for a given seed and command stream)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap placement RNG; keeps running across resets
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub sprite: Sprite,
    /// Pipes in spawn order (leftmost first)
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub phase: GamePhase,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    /// Pending notifications for the driver
    pub events: Vec<GameEvent>,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Fresh game with default tuning
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            sprite: Sprite::new(&viewport, &tuning),
            tuning,
            viewport,
            obstacles: Vec::new(),
            score: 0,
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn over(&self) -> bool {
        matches!(self.phase, GamePhase::Over(_))
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// NotStarted -> Playing. Returns false (and does nothing) in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Game started (seed {})", self.seed);
        true
    }

    /// Flap. Only has an effect while playing.
    pub fn jump(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.sprite.jump();
        true
    }

    /// Back to a fresh NotStarted state for the current viewport.
    ///
    /// The RNG stream is not rewound, so the next run gets new gaps.
    pub fn reset(&mut self) {
        self.sprite = Sprite::new(&self.viewport, &self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.phase = GamePhase::NotStarted;
        self.time_ticks = 0;
        self.events.clear();
        self.events.push(GameEvent::Reset);
        self.next_id = 1;
        log::info!("Game reset");
    }

    /// Apply new canvas dimensions. Existing pipes keep their coordinates.
    ///
    /// While waiting to start, the envelope is re-centered on the new height.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!(
                "Viewport {}x{} -> {}x{}",
                self.viewport.width,
                self.viewport.height,
                viewport.width,
                viewport.height
            );
            self.viewport = viewport;
            if self.phase == GamePhase::NotStarted {
                self.sprite = Sprite::new(&self.viewport, &self.tuning);
            }
        }
    }

    /// Swap in new balance values. Gravity and jump impulse apply from the
    /// next tick; `sprite_x` only on the next reset.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.sprite.gravity = tuning.gravity;
        self.sprite.jump_impulse = tuning.jump_impulse;
        self.tuning = tuning;
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a pipe at the right edge with a random gap
    pub fn spawn_obstacle(&mut self) {
        let range = self.viewport.gap_top_range(&self.tuning);
        let lo = *range.start();
        // Whole-pixel gaps
        let gap_top = self.rng.random_range(range).floor().max(lo);
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            x: self.viewport.width,
            gap_top,
        });
        log::debug!("Spawned obstacle {} (gap_top {})", id, gap_top);
    }

    /// Enter the terminal phase. Emits `GameOver` once.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.over() {
            return;
        }
        self.phase = GamePhase::Over(outcome);
        self.events.push(GameEvent::GameOver { outcome });
        log::info!(
            "Game over: {:?} (score {}, {} ticks)",
            outcome,
            self.score,
            self.time_ticks
        );
    }
}
