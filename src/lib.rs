//! Flappy Arcade - A single-screen side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `renderer`: WebGPU rendering pipeline (solid quads and textured sprites)
//! - `hud`: Score / game-over text layout
//! - `audio`: Sound cues for game events
//! - `assets`: Sprite and sound asset manifest and loading
//! - `config`: Immutable game configuration and launch options

pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod headless;
pub mod hud;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, LaunchOptions, Variant};
pub use error::{AssetError, ConfigError, GameError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, physics constants are tuned per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death.
    /// Below `MAX_FRAME_DT / SIM_DT`, so a clamped long frame still hits it.
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta accepted by the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default seed when none is supplied at launch
    pub const DEFAULT_SEED: u64 = 0x5EED_F1A9;
    /// Default tick budget for headless runs (one minute of play)
    pub const DEFAULT_HEADLESS_TICKS: u64 = 60 * 60;
}
