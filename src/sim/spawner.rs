//! Obstacle-pair spawning
//!
//! A pair is two full-height pipes sharing one randomized gap center, placed
//! just beyond the right edge of the screen.

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, ObstacleSide};
use super::state::GameState;
use crate::config::GameConfig;

/// Draw a gap center uniformly from the configured inclusive range
pub fn roll_gap_center<R: Rng>(rng: &mut R, config: &GameConfig) -> i32 {
    rng.random_range(config.gap_center_min..=config.gap_center_max)
}

/// Centers of the lower and upper pipe around `gap_center`
pub fn pair_centers(gap_center: i32, config: &GameConfig) -> (Vec2, Vec2) {
    let x = config.spawn_x();
    let offset = config.pair_offset();
    let gap_center = gap_center as f32;
    (
        Vec2::new(x, gap_center - offset),
        Vec2::new(x, gap_center + offset),
    )
}

/// Whether a new pair is due: no obstacles at all, or the newest obstacle
/// has moved left of the spawn threshold.
pub fn should_spawn(obstacles: &[Entity], config: &GameConfig) -> bool {
    obstacles
        .last()
        .is_none_or(|newest| newest.pos.x < config.spawn_threshold())
}

/// Append one pair (lower first, then upper). Returns the gap center.
pub fn spawn_pair(state: &mut GameState) -> i32 {
    let gap_center = roll_gap_center(&mut state.rng, &state.config);
    let (lower_center, upper_center) = pair_centers(gap_center, &state.config);

    let lower_id = state.next_entity_id();
    let upper_id = state.next_entity_id();
    let lower = Entity::obstacle(lower_id, lower_id, ObstacleSide::Lower, lower_center, &state.config);
    let upper = Entity::obstacle(upper_id, lower_id, ObstacleSide::Upper, upper_center, &state.config);
    state.obstacles.extend([lower, upper]);

    log::debug!("Spawned pair {} with gap center {}", lower_id, gap_center);
    gap_center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gap_center_stays_in_range() {
        let config = GameConfig::solid();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let center = roll_gap_center(&mut rng, &config);
            assert!((200..=400).contains(&center));
        }
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let config = GameConfig {
            gap_center_min: 321,
            gap_center_max: 321,
            ..GameConfig::solid()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(roll_gap_center(&mut rng, &config), 321);
    }

    #[test]
    fn test_pair_geometry() {
        let config = GameConfig::solid();
        let (lower, upper) = pair_centers(300, &config);
        // 300 - 75 - 200 and 300 + 75 + 200
        assert_eq!(lower, Vec2::new(480.0, 25.0));
        assert_eq!(upper, Vec2::new(480.0, 575.0));

        // The open gap between the two pipes is exactly pipe_gap tall
        let lower_top = lower.y + config.pipe_height as f32 / 2.0;
        let upper_bottom = upper.y - config.pipe_height as f32 / 2.0;
        assert_eq!(upper_bottom - lower_top, config.pipe_gap as f32);
    }

    #[test]
    fn test_should_spawn_threshold_is_strict() {
        let config = GameConfig::solid();
        assert!(should_spawn(&[], &config));

        let mut pipe = Entity::obstacle(1, 1, ObstacleSide::Upper, Vec2::new(200.0, 500.0), &config);
        assert!(!should_spawn(std::slice::from_ref(&pipe), &config));

        pipe.pos.x = 198.0;
        assert!(should_spawn(std::slice::from_ref(&pipe), &config));
    }

    #[test]
    fn test_should_spawn_looks_at_newest_only() {
        let config = GameConfig::solid();
        let old = Entity::obstacle(1, 1, ObstacleSide::Upper, Vec2::new(10.0, 500.0), &config);
        let newest = Entity::obstacle(2, 2, ObstacleSide::Upper, Vec2::new(400.0, 500.0), &config);
        assert!(!should_spawn(&[old, newest], &config));
    }

    #[test]
    fn test_spawn_pair_appends_lower_then_upper() {
        let mut state = GameState::new(GameConfig::solid(), 99);
        state.obstacles.clear();

        let gap_center = spawn_pair(&mut state);

        assert_eq!(state.obstacles.len(), 2);
        let (lower, upper) = (&state.obstacles[0], &state.obstacles[1]);
        let EntityKind::Obstacle { pair_id: lower_pair, side: ObstacleSide::Lower } = lower.kind else {
            panic!("first member should be the lower pipe");
        };
        let EntityKind::Obstacle { pair_id: upper_pair, side: ObstacleSide::Upper } = upper.kind else {
            panic!("second member should be the upper pipe");
        };
        assert_eq!(lower_pair, upper_pair);
        assert!(lower.pos.y < upper.pos.y);
        assert_eq!(lower.pos.y, gap_center as f32 - 275.0);
        assert_eq!(upper.pos.y, gap_center as f32 + 275.0);
        assert_eq!(lower.pos.x, 480.0);
    }
}
