//! Scene building: game state to a flat list of 2D draw commands
//!
//! Kept free of web APIs so the layout can be tested natively; the canvas
//! backend just replays the list.

use glam::Vec2;
use rand::Rng;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Obstacle, Sprite};

pub const ENVELOPE_COLOR: &str = "white";
pub const PIPE_COLOR: &str = "lime";
pub const DIGIT_COLOR: &str = "black";
pub const TEXT_COLOR: &str = "white";
pub const FONT: &str = "20px Arial";

/// Half-width and full height of the envelope diamond
const ENVELOPE_HALF_WIDTH: f32 = 30.0;
const ENVELOPE_HEIGHT: f32 = 40.0;

/// Vertical pitch of the digits drawn down a pipe
const DIGIT_PITCH: f32 = 40.0;

/// One canvas operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        width: f32,
        height: f32,
    },
    Polygon {
        points: Vec<Vec2>,
        color: &'static str,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: &'static str,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        color: &'static str,
    },
    /// Text horizontally centered on the canvas (needs the backend to measure it)
    CenteredText {
        text: String,
        y: f32,
        color: &'static str,
    },
}

/// Draw list for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCmd>,
}

impl Scene {
    /// Lay out a frame. `rng` only picks the flickering pipe digits.
    pub fn build(state: &GameState, settings: &Settings, rng: &mut impl Rng) -> Self {
        let viewport = state.viewport;
        let mut commands = vec![DrawCmd::Clear {
            width: viewport.width,
            height: viewport.height,
        }];

        commands.push(envelope(&state.sprite));

        for obstacle in &state.obstacles {
            pipe_pair(&mut commands, obstacle, state, settings, rng);
        }

        commands.push(DrawCmd::Text {
            text: format!("Score: {}", state.score),
            x: 10.0,
            y: 30.0,
            color: TEXT_COLOR,
        });

        if state.phase == GamePhase::NotStarted {
            commands.push(DrawCmd::CenteredText {
                text: settings.start_prompt.clone(),
                y: viewport.center_y(),
                color: TEXT_COLOR,
            });
        }

        Self { commands }
    }
}

/// Diamond hanging below the sprite position
fn envelope(sprite: &Sprite) -> DrawCmd {
    let p = sprite.pos;
    DrawCmd::Polygon {
        points: vec![
            p,
            p + Vec2::new(ENVELOPE_HALF_WIDTH, ENVELOPE_HEIGHT / 2.0),
            p + Vec2::new(0.0, ENVELOPE_HEIGHT),
            p + Vec2::new(-ENVELOPE_HALF_WIDTH, ENVELOPE_HEIGHT / 2.0),
        ],
        color: ENVELOPE_COLOR,
    }
}

fn pipe_pair(
    commands: &mut Vec<DrawCmd>,
    obstacle: &Obstacle,
    state: &GameState,
    settings: &Settings,
    rng: &mut impl Rng,
) {
    let tuning = &state.tuning;
    let height = state.viewport.height;
    let w = tuning.obstacle_width;
    let bottom = obstacle.gap_bottom(tuning);

    commands.push(DrawCmd::Rect {
        x: obstacle.x,
        y: 0.0,
        w,
        h: obstacle.gap_top,
        color: PIPE_COLOR,
    });
    commands.push(DrawCmd::Rect {
        x: obstacle.x,
        y: bottom,
        w,
        h: (height - bottom).max(0.0),
        color: PIPE_COLOR,
    });

    if !settings.binary_digits {
        return;
    }
    let flicker = settings.digit_flicker();
    let rows = (height / DIGIT_PITCH).ceil() as u32;
    for row in 0..rows {
        let one = if flicker {
            rng.random_bool(0.5)
        } else {
            (obstacle.id + row) % 2 == 1
        };
        commands.push(DrawCmd::Text {
            text: if one { "1" } else { "0" }.to_string(),
            x: obstacle.x + 15.0,
            y: row as f32 * DIGIT_PITCH + 20.0,
            color: DIGIT_COLOR,
        });
    }
}
