//! Per-frame simulation tick
//!
//! Advances the game by exactly one step. Order inside a tick:
//! physics, boundary check, spawn, scroll and cull, scoring, win check,
//! pipe collision. The first terminal condition hit ends the tick.

use super::collision::{hits_obstacle, off_screen, out_of_bounds, passed};
use super::state::{GameEvent, GameState, Outcome};

/// Advance the game state by one frame. No-op unless playing.
pub fn tick(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }

    state.time_ticks += 1;

    state.sprite.integrate();

    if out_of_bounds(state.sprite.pos.y, state.viewport.height) {
        state.finish(Outcome::Lose);
        return;
    }

    spawn_obstacles(state);
    advance_obstacles(state);

    score_passes(state);
    if state.score >= state.tuning.win_score {
        state.finish(Outcome::Win);
        return;
    }

    if state
        .obstacles
        .iter()
        .any(|o| hits_obstacle(state.sprite.pos, o, &state.tuning))
    {
        state.finish(Outcome::Lose);
    }
}

/// Spawn a pipe when there is none yet or the newest one has scrolled far enough
pub fn spawn_obstacles(state: &mut GameState) {
    let threshold = state.viewport.width - state.tuning.spawn_spacing;
    let due = state.obstacles.last().is_none_or(|last| last.x < threshold);
    if due {
        state.spawn_obstacle();
    }
}

/// Scroll every pipe left, then drop the ones fully off screen
pub fn advance_obstacles(state: &mut GameState) {
    let speed = state.tuning.scroll_speed;
    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }

    let before = state.obstacles.len();
    let tuning = &state.tuning;
    state.obstacles.retain(|o| !off_screen(o, tuning));
    let evicted = before - state.obstacles.len();
    if evicted > 0 {
        log::debug!("Evicted {} obstacle(s)", evicted);
    }
}

/// +1 for each pipe that passed the envelope during this tick's scroll
pub fn score_passes(state: &mut GameState) {
    let sprite_x = state.sprite.pos.x;
    let speed = state.tuning.scroll_speed;
    let rule = state.tuning.scoring;

    let passes = state
        .obstacles
        .iter()
        .filter(|o| passed(o.x + speed, o.x, sprite_x, rule))
        .count() as u32;

    for _ in 0..passes {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Obstacle, Viewport};
    use crate::tuning::{ScoringRule, Tuning};
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Viewport::new(400.0, 600.0));
        state.start();
        state.take_events();
        state
    }

    /// Tuning with no gravity so the envelope hovers in place
    fn hover_tuning() -> Tuning {
        Tuning {
            gravity: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_physics_scenario() {
        let mut state = playing(1);
        tick(&mut state);
        assert!((state.sprite.velocity - 0.3).abs() < 1e-6);
        assert!((state.sprite.pos.y - 300.3).abs() < 1e-4);

        let mut state = playing(1);
        state.jump();
        tick(&mut state);
        assert!((state.sprite.velocity - -6.7).abs() < 1e-6);
        assert!((state.sprite.pos.y - 293.3).abs() < 1e-4);
    }

    #[test]
    fn test_tick_noop_when_not_playing() {
        let mut state = GameState::new(5, Viewport::new(400.0, 600.0));
        let before = state.clone();
        tick(&mut state);
        assert_eq!(state, before);

        let mut state = playing(5);
        for _ in 0..10 {
            tick(&mut state);
        }
        state.finish(Outcome::Lose);
        let before = state.clone();
        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_falls_out_of_bottom() {
        let mut state = playing(2);
        let mut ticks = 0;
        while state.is_playing() {
            tick(&mut state);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(state.phase, GamePhase::Over(Outcome::Lose));
        assert!(state.sprite.pos.y > 600.0);
        // Only the game-over notification was emitted
        assert_eq!(
            state.take_events(),
            vec![GameEvent::GameOver {
                outcome: Outcome::Lose
            }]
        );
    }

    #[test]
    fn test_out_of_top() {
        let mut state = playing(2);
        state.sprite.pos.y = 3.0;
        state.jump();
        tick(&mut state);
        assert_eq!(state.outcome(), Some(Outcome::Lose));
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_first_tick_spawns_and_scrolls() {
        let mut state = playing(9);
        tick(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 398.0);

        // Next spawn waits until the newest pipe is past width - spacing
        let mut state = playing(9);
        state.set_tuning(hover_tuning());
        for _ in 0..150 {
            tick(&mut state);
        }
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 100.0);
        tick(&mut state);
        // 100 is not < 100, so no spawn yet
        assert_eq!(state.obstacles.len(), 1);
        tick(&mut state);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[1].x, 398.0);
    }

    #[test]
    fn test_scroll_and_evict_scenario() {
        let mut state = playing(4);
        state.obstacles.push(Obstacle {
            id: 99,
            x: 400.0,
            gap_top: 100.0,
        });
        for _ in 0..200 {
            advance_obstacles(&mut state);
        }
        assert_eq!(state.obstacles[0].x, 0.0);

        // Right edge reaches -0 after 25 more, evicted on the 26th
        for _ in 0..25 {
            advance_obstacles(&mut state);
        }
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, -50.0);
        advance_obstacles(&mut state);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_eviction_keeps_following_obstacles() {
        let mut state = playing(4);
        state.sprite.pos.x = 50.0;
        state.obstacles = vec![
            Obstacle {
                id: 1,
                x: -49.0,
                gap_top: 100.0,
            },
            Obstacle {
                id: 2,
                x: 52.0,
                gap_top: 100.0,
            },
        ];
        advance_obstacles(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, 2);
        assert_eq!(state.obstacles[0].x, 50.0);

        score_passes(&mut state);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_scores_once_per_pipe() {
        let mut state = playing(6);
        state.set_tuning(hover_tuning());
        state.obstacles.push(Obstacle {
            id: 50,
            x: 60.0,
            gap_top: 200.0,
        });
        for _ in 0..40 {
            tick(&mut state);
        }
        assert!(state.is_playing());
        assert_eq!(state.score, 1);
        assert!(state.take_events().contains(&GameEvent::Scored { score: 1 }));
    }

    #[test]
    fn test_odd_width_scores_only_with_crossed_rule() {
        for (rule, expected) in [(ScoringRule::Crossed, 1), (ScoringRule::ExactMatch, 0)] {
            let mut state = playing(6);
            state.set_tuning(Tuning {
                scoring: rule,
                ..hover_tuning()
            });
            state.obstacles.push(Obstacle {
                id: 50,
                x: 61.0,
                gap_top: 200.0,
            });
            for _ in 0..40 {
                tick(&mut state);
            }
            assert_eq!(state.score, expected, "{:?}", rule);
        }
    }

    #[test]
    fn test_collision_with_pipe() {
        let mut state = playing(8);
        state.set_tuning(hover_tuning());
        // Gap at 400..600, envelope hovers at 300
        state.obstacles.push(Obstacle {
            id: 50,
            x: 54.0,
            gap_top: 400.0,
        });
        tick(&mut state);
        assert!(state.is_playing());
        tick(&mut state);
        // x = 50: passes (score 1) but is not strictly past the envelope yet
        assert!(state.is_playing());
        assert_eq!(state.score, 1);
        tick(&mut state);
        assert_eq!(state.outcome(), Some(Outcome::Lose));
    }

    #[test]
    fn test_win_at_threshold_same_tick() {
        let mut state = playing(3);
        state.set_tuning(hover_tuning());
        state.score = 9;
        state.obstacles.push(Obstacle {
            id: 50,
            x: 52.0,
            gap_top: 200.0,
        });
        tick(&mut state);
        assert_eq!(state.score, 10);
        assert_eq!(state.outcome(), Some(Outcome::Win));
        let events = state.take_events();
        assert_eq!(
            events,
            vec![
                GameEvent::Scored { score: 10 },
                GameEvent::GameOver {
                    outcome: Outcome::Win
                }
            ]
        );
    }

    #[test]
    fn test_win_takes_precedence_over_collision() {
        let mut state = playing(3);
        state.set_tuning(hover_tuning());
        state.score = 9;
        // Crosses from 51 to 49: scores and overlaps a solid pipe the same tick
        state.obstacles.push(Obstacle {
            id: 50,
            x: 51.0,
            gap_top: 400.0,
        });
        tick(&mut state);
        assert_eq!(state.outcome(), Some(Outcome::Win));
    }

    #[test]
    fn test_boundary_takes_precedence_over_win() {
        let mut state = playing(3);
        state.score = 9;
        state.sprite.pos.y = 599.9;
        state.obstacles.push(Obstacle {
            id: 50,
            x: 52.0,
            gap_top: 200.0,
        });
        tick(&mut state);
        assert_eq!(state.outcome(), Some(Outcome::Lose));
        assert_eq!(state.score, 9);
    }

    #[test]
    fn test_resize_keeps_existing_pipes() {
        let mut state = playing(10);
        tick(&mut state);
        let first = state.obstacles[0].clone();

        state.resize(Viewport::new(1000.0, 600.0));
        tick(&mut state);
        assert_eq!(state.obstacles[0].id, first.id);
        assert_eq!(state.obstacles[0].x, first.x - 2.0);
        // New width pushes the spawn threshold to 700, so a pipe appears at 1000
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[1].x, 998.0);
    }

    #[test]
    fn test_zero_viewport_does_not_panic() {
        let mut state = GameState::new(1, Viewport::new(0.0, 0.0));
        state.start();
        state.sprite.pos.y = 0.0;
        state.set_tuning(hover_tuning());
        tick(&mut state);
        assert!(state.is_playing());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].gap_top, 50.0);
    }

    proptest! {
        #[test]
        fn prop_gap_fits_viewport(seed in any::<u64>(), width in 1.0f32..2000.0, height in 300.0f32..2000.0) {
            let mut state = GameState::new(seed, Viewport::new(width, height));
            for _ in 0..20 {
                state.spawn_obstacle();
            }
            for o in &state.obstacles {
                prop_assert!(o.gap_top >= 0.0);
                prop_assert!(o.gap_top + state.tuning.gap_height <= height);
                prop_assert!(o.gap_top >= state.tuning.min_margin);
            }
        }

        #[test]
        fn prop_physics_integration(seed in any::<u64>(), jumps in prop::collection::vec(any::<bool>(), 1..200)) {
            let mut state = playing(seed);
            for jump in jumps {
                if jump {
                    state.jump();
                }
                if !state.is_playing() {
                    break;
                }
                let (y, v) = (state.sprite.pos.y, state.sprite.velocity);
                tick(&mut state);
                prop_assert_eq!(state.sprite.velocity, v + 0.3);
                prop_assert_eq!(state.sprite.pos.y, y + (v + 0.3));
            }
        }

        #[test]
        fn prop_score_monotonic_and_eviction_rule(seed in any::<u64>(), jumps in prop::collection::vec(any::<bool>(), 1..600)) {
            let mut state = playing(seed);
            for jump in jumps {
                if jump {
                    state.jump();
                }
                let score = state.score;
                let before: Vec<(u32, f32)> = state.obstacles.iter().map(|o| (o.id, o.x)).collect();
                tick(&mut state);
                prop_assert!(state.score >= score && state.score <= score + 1);

                // A pipe only disappears once its right edge scrolled past 0
                for (id, x) in before {
                    if !state.obstacles.iter().any(|o| o.id == id) {
                        prop_assert!(x - 2.0 + state.tuning.obstacle_width < 0.0);
                    }
                }
                for o in &state.obstacles {
                    prop_assert!(o.x + state.tuning.obstacle_width >= 0.0);
                }
                if !state.is_playing() {
                    break;
                }
            }
        }
    }
}
