//! Collision detection
//!
//! Axis-aligned boxes only. Boxes whose edges merely touch do not collide:
//! both axes use strict inequalities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// True iff the boxes share interior area on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Player box overlapped an obstacle
    Collision,
    /// Player center left the vertical play area
    OutOfBounds,
}

/// Index of the first obstacle overlapping the player, if any
pub fn first_hit(player: &Entity, obstacles: &[Entity]) -> Option<usize> {
    let player_box = player.bounds();
    obstacles
        .iter()
        .position(|obstacle| player_box.overlaps(&obstacle.bounds()))
}

/// Whether the player's center has left `[0, screen_height]`
#[inline]
pub fn out_of_bounds(player: &Entity, screen_height: f32) -> bool {
    player.pos.y < 0.0 || player.pos.y > screen_height
}
