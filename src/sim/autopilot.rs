//! Demo-mode autopilot
//!
//! Steers for the gap center of the next pair still ahead of the player.
//! A flap lifts the bird roughly 60px over 16 ticks, so flapping only once
//! it is falling and 20px under the target keeps it inside a 150px gap.

use super::entity::{EntityKind, ObstacleSide};
use super::state::GameState;

/// How far under the target the bird may sink before flapping
const FLAP_MARGIN: f32 = 20.0;

/// Height the autopilot is currently aiming for
pub fn target_height(state: &GameState) -> f32 {
    let player_left = state.player.left();
    let half_gap = state.config.pipe_gap as f32 / 2.0;

    state
        .obstacles
        .iter()
        .filter(|o| {
            matches!(
                o.kind,
                EntityKind::Obstacle {
                    side: ObstacleSide::Lower,
                    ..
                }
            )
        })
        .find(|lower| lower.right() >= player_left)
        .map(|lower| lower.top() + half_gap)
        .unwrap_or(state.config.screen_height as f32 / 2.0)
}

/// Whether the autopilot flaps this tick
pub fn wants_flap(state: &GameState) -> bool {
    let player = &state.player;
    player.pos.y < target_height(state) - FLAP_MARGIN && player.vel.y <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_targets_first_gap_ahead() {
        let state = GameState::new(GameConfig::solid(), 5);
        let lower = &state.obstacles[0];
        let expected = lower.top() + 75.0;
        assert_eq!(target_height(&state), expected);
    }

    #[test]
    fn test_no_obstacles_targets_mid_screen() {
        let mut state = GameState::new(GameConfig::solid(), 5);
        state.obstacles.clear();
        assert_eq!(target_height(&state), 300.0);
    }

    #[test]
    fn test_flaps_only_when_falling_below_target() {
        let mut state = GameState::new(GameConfig::solid(), 5);
        let target = target_height(&state);

        state.player.pos.y = target - 30.0;
        state.player.vel.y = -1.0;
        assert!(wants_flap(&state));

        // Still rising from the last flap
        state.player.vel.y = 3.0;
        assert!(!wants_flap(&state));

        state.player.pos.y = target;
        state.player.vel.y = -1.0;
        assert!(!wants_flap(&state));
    }

    #[test]
    fn test_autopilot_survives() {
        for seed in [1, 2, 3, 0xDEAD_BEEF] {
            let mut state = GameState::new(GameConfig::solid(), seed);
            let input = TickInput { autopilot: true };
            for _ in 0..1500 {
                tick(&mut state, &input);
            }
            assert!(state.is_running(), "seed {seed} crashed at score {}", state.score);
            assert!(state.score >= 5);
        }
    }
}
