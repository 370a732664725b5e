//! Hit and pass tests between the envelope, the pipes and the canvas edges
//!
//! The envelope is treated as a point at `sprite.pos`.

use glam::Vec2;

use super::state::Obstacle;
use crate::tuning::{ScoringRule, Tuning};

/// Envelope left the canvas through the top or bottom edge
#[inline]
pub fn out_of_bounds(y: f32, height: f32) -> bool {
    y > height || y < 0.0
}

/// Envelope is horizontally inside the pipe and outside its gap
pub fn hits_obstacle(pos: Vec2, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let inside_span = pos.x > obstacle.x && pos.x < obstacle.right_edge(tuning);
    let outside_gap = pos.y < obstacle.gap_top || pos.y > obstacle.gap_bottom(tuning);
    inside_span && outside_gap
}

/// Pipe's right edge has scrolled past the left boundary
#[inline]
pub fn off_screen(obstacle: &Obstacle, tuning: &Tuning) -> bool {
    obstacle.right_edge(tuning) < 0.0
}

/// Pipe moved from `prev_x` to `x` this tick and passed the envelope at `sprite_x`
pub fn passed(prev_x: f32, x: f32, sprite_x: f32, rule: ScoringRule) -> bool {
    match rule {
        ScoringRule::Crossed => prev_x > sprite_x && x <= sprite_x,
        ScoringRule::ExactMatch => x == sprite_x,
    }
}
