//! Quad generation for rects and sprites

use std::ops::Range;

use glam::Vec2;

use super::scene::{RectDraw, Scene, SpriteDraw, SpriteId};
use super::vertex::{SpriteVertex, Vertex, color_for_surface};

/// Game space (origin bottom-left, y up) to normalized device coordinates
#[inline]
pub fn to_ndc(p: Vec2, screen: Vec2) -> Vec2 {
    p / screen * 2.0 - Vec2::ONE
}

/// Corners of a possibly rotated box, in triangle-list order
fn corners(center: Vec2, size: Vec2, rotation: f32) -> [Vec2; 6] {
    let half = size * 0.5;
    let rot = Vec2::from_angle(rotation);
    let bl = center + rot.rotate(Vec2::new(-half.x, -half.y));
    let br = center + rot.rotate(Vec2::new(half.x, -half.y));
    let tr = center + rot.rotate(Vec2::new(half.x, half.y));
    let tl = center + rot.rotate(Vec2::new(-half.x, half.y));
    [bl, br, tr, bl, tr, tl]
}

/// Two triangles covering a rect
pub fn rect_quad(rect: &RectDraw, screen: Vec2, srgb_surface: bool) -> [Vertex; 6] {
    let color = color_for_surface(rect.color, srgb_surface);
    corners(rect.center, rect.size, 0.0).map(|p| {
        let p = to_ndc(p, screen);
        Vertex::new(p.x, p.y, color)
    })
}

/// Two triangles covering a sprite, with uvs
pub fn sprite_quad(draw: &SpriteDraw, screen: Vec2) -> [SpriteVertex; 6] {
    // Image rows go down; v = 1 is the bottom row
    let (v_bottom, v_top) = if draw.flip_y { (0.0, 1.0) } else { (1.0, 0.0) };
    let uvs = [
        (0.0, v_bottom),
        (1.0, v_bottom),
        (1.0, v_top),
        (0.0, v_bottom),
        (1.0, v_top),
        (0.0, v_top),
    ];
    let points = corners(draw.center, draw.size, draw.rotation);
    std::array::from_fn(|i| {
        let p = to_ndc(points[i], screen);
        SpriteVertex::new(p.x, p.y, uvs[i].0, uvs[i].1)
    })
}

/// All rect vertices of a scene
pub fn scene_vertices(scene: &Scene, srgb_surface: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.rects.len() * 6);
    for rect in &scene.rects {
        vertices.extend(rect_quad(rect, scene.screen, srgb_surface));
    }
    vertices
}

/// A run of consecutive sprites sharing a texture
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteBatch {
    pub sprite: SpriteId,
    pub vertices: Range<u32>,
}

/// Sprite vertices plus the batches that draw them in scene order
pub fn sprite_batches(scene: &Scene) -> (Vec<SpriteVertex>, Vec<SpriteBatch>) {
    let mut vertices = Vec::with_capacity(scene.sprites.len() * 6);
    let mut batches: Vec<SpriteBatch> = Vec::new();

    for draw in &scene.sprites {
        let start = vertices.len() as u32;
        vertices.extend(sprite_quad(draw, scene.screen));
        let end = vertices.len() as u32;

        match batches.last_mut() {
            Some(batch) if batch.sprite == draw.sprite => batch.vertices.end = end,
            _ => batches.push(SpriteBatch {
                sprite: draw.sprite,
                vertices: start..end,
            }),
        }
    }
    (vertices, batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::scene::build_scene;
    use crate::sim::GameState;

    const SCREEN: Vec2 = Vec2::new(400.0, 600.0);

    fn approx(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5
    }

    #[test]
    fn test_ndc_corners() {
        assert_eq!(to_ndc(Vec2::ZERO, SCREEN), Vec2::new(-1.0, -1.0));
        assert_eq!(to_ndc(SCREEN, SCREEN), Vec2::new(1.0, 1.0));
        assert_eq!(to_ndc(SCREEN / 2.0, SCREEN), Vec2::ZERO);
    }

    #[test]
    fn test_full_screen_rect() {
        let rect = RectDraw {
            center: SCREEN / 2.0,
            size: SCREEN,
            color: [255, 0, 0],
        };
        let quad = rect_quad(&rect, SCREEN, false);
        assert!(approx(quad[0].position, [-1.0, -1.0]));
        assert!(approx(quad[2].position, [1.0, 1.0]));
        assert!(approx(quad[5].position, [-1.0, 1.0]));
        assert_eq!(quad[0].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_flipped_sprite_swaps_v() {
        let draw = SpriteDraw {
            sprite: SpriteId::Pipe,
            center: Vec2::new(100.0, 100.0),
            size: Vec2::new(80.0, 400.0),
            rotation: 0.0,
            flip_y: false,
        };
        let upright = sprite_quad(&draw, SCREEN);
        let flipped = sprite_quad(&SpriteDraw { flip_y: true, ..draw }, SCREEN);
        assert_eq!(upright[0].uv, [0.0, 1.0]);
        assert_eq!(flipped[0].uv, [0.0, 0.0]);
        assert_eq!(upright[0].position, flipped[0].position);
    }

    #[test]
    fn test_rotation_keeps_center() {
        let draw = SpriteDraw {
            sprite: SpriteId::Bird,
            center: Vec2::new(200.0, 300.0),
            size: Vec2::splat(30.0),
            rotation: 0.7,
            flip_y: false,
        };
        let quad = sprite_quad(&draw, SCREEN);
        // bl and tr are opposite corners
        let mid = [
            (quad[0].position[0] + quad[2].position[0]) / 2.0,
            (quad[0].position[1] + quad[2].position[1]) / 2.0,
        ];
        assert!(approx(mid, [0.0, 0.0]));
    }

    #[test]
    fn test_batches_merge_consecutive_textures() {
        let mut state = GameState::new(GameConfig::sprite(), 9);
        state.reset();
        let scene = build_scene(&state);
        let (vertices, batches) = sprite_batches(&scene);

        assert_eq!(vertices.len(), scene.sprites.len() * 6);
        let order: Vec<_> = batches.iter().map(|b| b.sprite).collect();
        assert_eq!(order, vec![SpriteId::Background, SpriteId::Pipe, SpriteId::Bird]);
        assert_eq!(batches[0].vertices, 0..12);
        assert_eq!(batches[2].vertices.end, vertices.len() as u32);
    }

    #[test]
    fn test_solid_scene_vertex_count() {
        let state = GameState::new(GameConfig::solid(), 9);
        let scene = build_scene(&state);
        assert_eq!(scene_vertices(&scene, true).len(), scene.rects.len() * 6);
    }
}
