//! Autopilot / demo mode
//!
//! Steers the envelope toward the middle of the next gap with a single
//! jump-or-not decision per tick. Used by the headless native run and by the
//! in-browser demo toggle.

use super::state::GameState;

/// How far below the target the envelope may sink before flapping
const SINK_TOLERANCE: f32 = 25.0;

/// Y the autopilot is currently aiming for
pub fn target_y(state: &GameState) -> f32 {
    let sprite_x = state.sprite.pos.x;
    state
        .obstacles
        .iter()
        .find(|o| o.right_edge(&state.tuning) >= sprite_x)
        .map(|o| o.gap_top + state.tuning.gap_height / 2.0)
        .unwrap_or_else(|| state.viewport.center_y())
}

/// Whether to jump this tick
pub fn should_jump(state: &GameState) -> bool {
    if !state.is_playing() {
        return false;
    }
    let sprite = &state.sprite;
    let next_y = sprite.pos.y + sprite.velocity + sprite.gravity;
    sprite.velocity > 0.0 && next_y > target_y(state) + SINK_TOLERANCE
}
