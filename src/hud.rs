//! HUD text layout
//!
//! Pure function of the game state. Positions are in game coordinates
//! (origin bottom-left, y up); the web layer turns them into CSS.

use glam::Vec2;

use crate::sim::{GamePhase, GameState};

/// Horizontal anchoring of a text item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `pos` is the left edge of the baseline
    Left,
    /// `pos` is the center of the text box
    Center,
}

/// One piece of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    /// Stable DOM id
    pub id: &'static str,
    pub text: String,
    pub pos: Vec2,
    /// RGB
    pub color: [u8; 3],
    /// Font size in pixels
    pub size: f32,
    pub align: Align,
}

pub const BLACK: [u8; 3] = [0, 0, 0];
pub const RED: [u8; 3] = [255, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

impl HudText {
    pub fn css_color(&self) -> String {
        let [r, g, b] = self.color;
        format!("rgb({r}, {g}, {b})")
    }

    /// Inline style placing the text over a canvas of the given height
    pub fn css_style(&self) -> String {
        let transform = match self.align {
            Align::Left => "none",
            Align::Center => "translate(-50%, 50%)",
        };
        format!(
            "position:absolute;left:{}px;bottom:{}px;color:{};font-size:{}px;transform:{};white-space:nowrap;",
            self.pos.x,
            self.pos.y,
            self.css_color(),
            self.size,
            transform
        )
    }
}

/// Every HUD element that should be visible right now
pub fn hud_texts(state: &GameState) -> Vec<HudText> {
    let width = state.config.screen_width as f32;
    let height = state.config.screen_height as f32;
    let center = Vec2::new((width / 2.0).floor(), (height / 2.0).floor());

    let mut texts = Vec::with_capacity(2);
    match state.phase {
        GamePhase::Idle => texts.push(HudText {
            id: "hud-prompt",
            text: "Press SPACE to start".into(),
            pos: center,
            color: WHITE,
            size: 20.0,
            align: Align::Center,
        }),
        GamePhase::Running | GamePhase::GameOver => texts.push(HudText {
            id: "hud-score",
            text: format!("Score: {}", state.score),
            pos: Vec2::new(10.0, height - 30.0),
            color: BLACK,
            size: 16.0,
            align: Align::Left,
        }),
    }
    if state.phase == GamePhase::GameOver {
        texts.push(HudText {
            id: "hud-game-over",
            text: "GAME OVER".into(),
            pos: center,
            color: RED,
            size: 24.0,
            align: Align::Center,
        });
    }
    texts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_running_shows_score_only() {
        let mut state = GameState::new(GameConfig::solid(), 1);
        state.score = 7;
        let texts = hud_texts(&state);
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, "Score: 7");
        assert_eq!(texts[0].pos, Vec2::new(10.0, 570.0));
        assert_eq!(texts[0].color, BLACK);
        assert_eq!(texts[0].align, Align::Left);
    }

    #[test]
    fn test_game_over_adds_centered_banner() {
        let mut state = GameState::new(GameConfig::solid(), 1);
        state.phase = GamePhase::GameOver;
        let texts = hud_texts(&state);
        let banner = texts.iter().find(|t| t.text == "GAME OVER").expect("banner");
        assert_eq!(banner.pos, Vec2::new(200.0, 300.0));
        assert_eq!(banner.color, RED);
        assert_eq!(banner.size, 24.0);
        assert!(texts.iter().any(|t| t.id == "hud-score"));
    }

    #[test]
    fn test_idle_shows_prompt() {
        let state = GameState::new(GameConfig::sprite(), 1);
        let texts = hud_texts(&state);
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].id, "hud-prompt");
        assert_eq!(texts[0].align, Align::Center);
    }

    #[test]
    fn test_css_style() {
        let mut state = GameState::new(GameConfig::solid(), 1);
        state.phase = GamePhase::GameOver;
        let banner = hud_texts(&state).pop().expect("banner");
        let style = banner.css_style();
        assert!(style.contains("left:200px;bottom:300px;"));
        assert!(style.contains("color:rgb(255, 0, 0);"));
        assert!(style.contains("translate(-50%, 50%)"));
    }
}
