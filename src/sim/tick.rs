//! Fixed timestep simulation tick
//!
//! Advances a running round by exactly one tick. The step order is fixed:
//! background, player, obstacles, collision, bounds, spawn and score, prune.
//! A crash detected in the collision or bounds step is applied once the tick
//! is complete, so its reported score includes a spawn on the same tick.

use super::autopilot;
use super::collision::{self, CrashCause};
use super::entity::wrap_background;
use super::spawner;
use super::state::{GameEvent, GameState};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Demo mode - the autopilot decides whether to flap this tick
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Idle and GameOver are frozen
    if !state.is_running() {
        return;
    }

    if input.autopilot && autopilot::wants_flap(state) {
        state.flap();
    }

    state.time_ticks += 1;
    let config = &state.config;

    // 1. Background
    for tile in state.backgrounds.iter_mut() {
        tile.update(config);
    }
    wrap_background(&mut state.backgrounds);

    // 2. Player
    state.player.update(config);

    // 3. Obstacles
    for obstacle in state.obstacles.iter_mut() {
        obstacle.update(config);
    }

    // 4. Collision
    let mut crash = None;
    if let Some(index) = collision::first_hit(&state.player, &state.obstacles) {
        log::debug!("Player hit obstacle {}", state.obstacles[index].id);
        crash = Some(CrashCause::Collision);
    }

    // 5. Bounds (a collision on the same tick takes precedence)
    let screen_height = state.config.screen_height as f32;
    if crash.is_none() && collision::out_of_bounds(&state.player, screen_height) {
        crash = Some(CrashCause::OutOfBounds);
    }

    // 6. Spawn and score (still runs on the tick that ends the round)
    if spawner::should_spawn(&state.obstacles, &state.config) {
        spawner::spawn_pair(state);
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
    }

    // 7. Prune obstacles fully off the left edge
    state.obstacles.retain(|obstacle| obstacle.right() >= 0.0);

    if let Some(cause) = crash {
        state.crash(cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    /// Keep the player parked mid-screen with no obstacles in its column
    fn hover(state: &mut GameState) {
        state.player.pos.y = state.config.screen_height as f32 / 2.0;
        state.player.vel.y = 0.0;
    }

    fn clear_column(state: &mut GameState) {
        let player_x = state.player.pos.x;
        for obstacle in state.obstacles.iter_mut() {
            if (obstacle.pos.x - player_x).abs() < 200.0 {
                obstacle.pos.y += 10_000.0;
            }
        }
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut state = GameState::new(GameConfig::sprite(), 1);
        let before = state.clone();

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player, before.player);
        assert_eq!(state.backgrounds, before.backgrounds);
    }

    #[test]
    fn test_score_increments_once_per_spawn() {
        let mut state = GameState::new(GameConfig::solid(), 42);
        state.drain_events();

        // First pair starts at x = 480; it crosses x < 200 after 141 ticks
        for _ in 0..140 {
            hover(&mut state);
            clear_column(&mut state);
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), 2);

        hover(&mut state);
        clear_column(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert_eq!(state.obstacles.len(), 4);
        assert_eq!(state.drain_events(), vec![GameEvent::Scored { score: 1 }]);
    }

    #[test]
    fn test_offscreen_obstacles_are_pruned() {
        let mut state = GameState::new(GameConfig::solid(), 42);
        for _ in 0..400 {
            hover(&mut state);
            clear_column(&mut state);
            tick(&mut state, &TickInput::default());
        }
        assert!(state.is_running());
        assert!(state.obstacles.iter().all(|o| o.right() >= 0.0));
        // One pair every 141 ticks: 2 scored, the first pair already pruned
        assert_eq!(state.score, 2);
        assert_eq!(state.obstacles.len(), 4);
    }

    #[test]
    fn test_falling_out_of_bounds_ends_round_and_freezes() {
        let mut state = GameState::new(GameConfig::solid(), 7);
        state.obstacles.clear();
        state.player.pos.y = 1.0;
        state.player.vel.y = -2.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        let frozen = state.player.clone();
        assert!(frozen.pos.y < 0.0);

        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player, frozen);
    }

    #[test]
    fn test_rising_above_screen_ends_round() {
        let mut state = GameState::new(GameConfig::solid(), 7);
        state.obstacles.clear();
        state.player.pos.y = 599.0;
        state.player.vel.y = 8.0;
        state.drain_events();

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Crashed {
                cause: CrashCause::OutOfBounds,
                ..
            }
        )));
    }

    #[test]
    fn test_crash_score_includes_same_tick_spawn() {
        let mut state = GameState::new(GameConfig::solid(), 7);
        // No obstacles left, so this tick spawns a pair and scores
        state.obstacles.clear();
        state.player.pos.y = 1.0;
        state.player.vel.y = -2.0;
        state.drain_events();

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 1);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Scored { score: 1 },
                GameEvent::Crashed {
                    cause: CrashCause::OutOfBounds,
                    score: 1
                },
            ]
        );
    }

    #[test]
    fn test_collision_reported_once() {
        let mut state = GameState::new(GameConfig::solid(), 7);
        // Obstacle right on top of the player and player also leaving the floor
        state.obstacles[0].pos = Vec2::new(state.player.pos.x, 0.0);
        state.player.pos.y = 0.2;
        state.drain_events();

        tick(&mut state, &TickInput::default());

        let crashes: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Crashed { .. }))
            .collect();
        assert_eq!(
            crashes,
            vec![GameEvent::Crashed {
                cause: CrashCause::Collision,
                score: 0
            }]
        );
    }

    #[test]
    fn test_round_trip_resets_score_and_player() {
        let mut state = GameState::new(GameConfig::sprite(), 11);
        assert_eq!(state.phase, GamePhase::Idle);

        state.reset();
        state.score = 3;
        state.obstacles[0].pos = state.player.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        state.reset();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, state.config.player_spawn());
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_backgrounds_scroll_only_while_running() {
        let mut state = GameState::new(GameConfig::sprite(), 3);
        state.reset();
        let start = state.backgrounds[0].pos.x;

        tick(&mut state, &TickInput::default());

        assert_eq!(
            state.backgrounds[0].pos.x,
            start - state.config.background_speed
        );
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(GameConfig::solid(), 99999);
        let mut state2 = GameState::new(GameConfig::solid(), 99999);
        let input = TickInput { autopilot: true };

        for _ in 0..2000 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.obstacles, state2.obstacles);
    }
}
