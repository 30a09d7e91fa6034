//! Entities and their per-tick motion
//!
//! Every moving thing is an `Entity` tagged with its kind. Motion is
//! integrated once per tick with per-tick constants, never scaled by the
//! frame delta.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::GameConfig;

/// Which member of an obstacle pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleSide {
    /// Below the gap
    Lower,
    /// Above the gap
    Upper,
}

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The bird
    Player,
    /// One pipe of a pair; both members share `pair_id`
    Obstacle { pair_id: u32, side: ObstacleSide },
    /// One of the two scrolling background tiles
    Background,
}

/// A positioned, sized, moving thing. `pos` is the box center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Entity {
    /// Player at its spawn point with zero velocity
    pub fn player(id: u32, config: &GameConfig) -> Self {
        Self {
            id,
            kind: EntityKind::Player,
            pos: config.player_spawn(),
            vel: Vec2::ZERO,
            size: Vec2::splat(config.bird_size as f32),
        }
    }

    pub fn obstacle(
        id: u32,
        pair_id: u32,
        side: ObstacleSide,
        center: Vec2,
        config: &GameConfig,
    ) -> Self {
        Self {
            id,
            kind: EntityKind::Obstacle { pair_id, side },
            pos: center,
            vel: Vec2::new(-config.pipe_speed, 0.0),
            size: Vec2::new(config.pipe_width as f32, config.pipe_height as f32),
        }
    }

    /// Full-screen background tile whose left edge is at `left`
    pub fn background_tile(id: u32, left: f32, config: &GameConfig) -> Self {
        let size = config.screen_size();
        Self {
            id,
            kind: EntityKind::Background,
            pos: Vec2::new(left + size.x / 2.0, size.y / 2.0),
            vel: Vec2::new(-config.background_speed, 0.0),
            size,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, config: &GameConfig) {
        match self.kind {
            EntityKind::Player => {
                self.vel.y += config.gravity;
                self.pos.y += self.vel.y;
            }
            EntityKind::Obstacle { .. } | EntityKind::Background => {
                self.pos.x += self.vel.x;
            }
        }
    }

    /// Overwrite vertical velocity (flaps never accumulate)
    #[inline]
    pub fn flap(&mut self, strength: f32) {
        self.vel.y = strength;
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }
}

/// Move any tile whose right edge reached the left boundary behind the
/// rightmost tile, so two tiles scroll forever.
pub fn wrap_background(tiles: &mut [Entity]) {
    for i in 0..tiles.len() {
        if tiles[i].right() > 0.0 {
            continue;
        }
        let rightmost = tiles
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, tile)| tile.right())
            .fold(f32::NEG_INFINITY, f32::max);
        if rightmost.is_finite() {
            let half_width = tiles[i].size.x / 2.0;
            tiles[i].pos.x = rightmost + half_width;
        }
    }
}
