//! Draw list for one frame
//!
//! `build_scene` only reads the state. The solid variant draws colored
//! rectangles; the sprite variant draws textured, optionally rotated or
//! flipped sprites.

use glam::Vec2;

use crate::sim::{Entity, EntityKind, GameState, ObstacleSide};

/// sRGB colors, 0-255
pub mod colors {
    pub const SKY_BLUE: [u8; 3] = [135, 206, 235];
    pub const YELLOW: [u8; 3] = [255, 255, 0];
    pub const GREEN: [u8; 3] = [0, 255, 0];
}

/// Which texture a sprite samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    Bird,
    Pipe,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDraw {
    pub center: Vec2,
    pub size: Vec2,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sprite: SpriteId,
    pub center: Vec2,
    pub size: Vec2,
    /// Counter-clockwise, radians
    pub rotation: f32,
    /// Mirror vertically (upper pipes hang from the top)
    pub flip_y: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Game-space extent, origin bottom-left
    pub screen: Vec2,
    pub clear_color: [u8; 3],
    /// Drawn first, in order
    pub rects: Vec<RectDraw>,
    /// Drawn after rects, in order
    pub sprites: Vec<SpriteDraw>,
}

/// Bird tilt follows its vertical speed
pub fn bird_tilt(vel_y: f32) -> f32 {
    (vel_y * 4.0).clamp(-70.0, 25.0).to_radians()
}

fn rect(entity: &Entity, color: [u8; 3]) -> RectDraw {
    RectDraw {
        center: entity.pos,
        size: entity.size,
        color,
    }
}

fn sprite(entity: &Entity) -> SpriteDraw {
    let (sprite, rotation, flip_y) = match entity.kind {
        EntityKind::Player => (SpriteId::Bird, bird_tilt(entity.vel.y), false),
        EntityKind::Obstacle { side, .. } => (SpriteId::Pipe, 0.0, side == ObstacleSide::Upper),
        EntityKind::Background => (SpriteId::Background, 0.0, false),
    };
    SpriteDraw {
        sprite,
        center: entity.pos,
        size: entity.size,
        rotation,
        flip_y,
    }
}

/// Build the draw list for the current state
pub fn build_scene(state: &GameState) -> Scene {
    let mut scene = Scene {
        screen: state.config.screen_size(),
        clear_color: colors::SKY_BLUE,
        rects: Vec::new(),
        sprites: Vec::new(),
    };

    if state.config.variant.uses_assets() {
        scene.sprites.reserve(state.backgrounds.len() + state.obstacles.len() + 1);
        scene.sprites.extend(state.backgrounds.iter().map(sprite));
        scene.sprites.extend(state.obstacles.iter().map(sprite));
        // Before the first launch only the background and the bird show
        scene.sprites.push(sprite(&state.player));
    } else {
        scene.rects.push(rect(&state.player, colors::YELLOW));
        scene
            .rects
            .extend(state.obstacles.iter().map(|o| rect(o, colors::GREEN)));
    }
    scene
}
