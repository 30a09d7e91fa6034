//! Game configuration
//!
//! One immutable `GameConfig` is built at startup and handed to
//! `GameState::new`. Two presets exist, one per presentation variant; both
//! share the same per-tick physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Presentation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Solid-color rectangles, no sound, starts running immediately
    #[default]
    Solid,
    /// Bitmap sprites, scrolling background, sound clips, idle screen, Escape quits
    Sprite,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Solid => "solid",
            Variant::Sprite => "sprite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "solid" | "classic" => Some(Variant::Solid),
            "sprite" | "sprites" | "assets" => Some(Variant::Sprite),
            _ => None,
        }
    }

    /// Whether this variant loads image and sound files
    pub fn uses_assets(&self) -> bool {
        matches!(self, Variant::Sprite)
    }

    /// Whether the round waits in `Idle` for the first flap
    pub fn has_idle_screen(&self) -> bool {
        matches!(self, Variant::Sprite)
    }

    /// Whether Escape terminates the game
    pub fn has_quit_key(&self) -> bool {
        matches!(self, Variant::Sprite)
    }

    /// Whether the two-tile scrolling background exists
    pub fn has_background(&self) -> bool {
        matches!(self, Variant::Sprite)
    }
}

/// Immutable gameplay and window configuration
///
/// Screen and obstacle dimensions are integers so that the halving used by
/// the spawner truncates exactly like the tuned reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: Variant,
    /// Window title
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,

    // === Player ===
    /// Vertical acceleration added to velocity each tick (pixels/tick²)
    pub gravity: f32,
    /// Velocity set by a flap (pixels/tick)
    pub flap_strength: f32,
    /// Player square side length
    pub bird_size: u32,
    /// Player spawn column
    pub bird_x: f32,

    // === Obstacles ===
    /// Leftward obstacle speed (pixels/tick)
    pub pipe_speed: f32,
    /// Vertical gap between the members of a pair
    pub pipe_gap: u32,
    pub pipe_width: u32,
    pub pipe_height: u32,
    /// Inclusive range for the randomized gap center
    pub gap_center_min: i32,
    pub gap_center_max: i32,

    // === Background ===
    /// Leftward background scroll speed (pixels/tick)
    pub background_speed: f32,

    // === Audio ===
    /// Clip volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::solid()
    }
}

impl GameConfig {
    /// Solid-color preset (400×600)
    pub fn solid() -> Self {
        Self {
            variant: Variant::Solid,
            title: "Flappy Bird".to_string(),
            screen_width: 400,
            screen_height: 600,

            gravity: -0.5,
            flap_strength: 8.0,
            bird_size: 30,
            bird_x: 100.0,

            pipe_speed: 2.0,
            pipe_gap: 150,
            pipe_width: 80,
            pipe_height: 400,
            gap_center_min: 200,
            gap_center_max: 400,

            background_speed: 0.0,
            volume: 0.0,
        }
    }

    /// Sprite preset (480×640, scrolling background, sound)
    pub fn sprite() -> Self {
        Self {
            variant: Variant::Sprite,
            title: "Flappy Bird (Sprites)".to_string(),
            screen_width: 480,
            screen_height: 640,
            background_speed: 1.0,
            volume: 0.8,
            ..Self::solid()
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Solid => Self::solid(),
            Variant::Sprite => Self::sprite(),
        }
    }

    /// Overlay the fields present in a JSON object onto this config
    pub fn with_json_overrides(self, json: &str) -> Result<Self, ConfigError> {
        let mut base = serde_json::to_value(&self)?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let Some(fields) = overrides.as_object() else {
            return Err(ConfigError::Invalid(
                "config overrides must be a JSON object".to_string(),
            ));
        };
        if let Some(base_fields) = base.as_object_mut() {
            for (key, value) in fields {
                base_fields.insert(key.clone(), value.clone());
            }
        }
        let config: Self = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.screen_width == 0 || self.screen_height == 0 {
            return invalid("screen dimensions must be non-zero");
        }
        if self.bird_size == 0 || self.pipe_width == 0 || self.pipe_height == 0 {
            return invalid("entity sizes must be non-zero");
        }
        if self.screen_width.checked_add(self.pipe_width).is_none() {
            return invalid("screen_width + pipe_width overflows");
        }
        if self.gap_center_min > self.gap_center_max {
            return invalid("gap_center_min must not exceed gap_center_max");
        }
        let floats = [
            ("gravity", self.gravity),
            ("flap_strength", self.flap_strength),
            ("bird_x", self.bird_x),
            ("pipe_speed", self.pipe_speed),
            ("background_speed", self.background_speed),
            ("volume", self.volume),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite")));
        }
        if self.pipe_speed <= 0.0 {
            return invalid("pipe_speed must be positive");
        }
        if self.background_speed < 0.0 {
            return invalid("background_speed must not be negative");
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return invalid("volume must be within 0.0..=1.0");
        }
        Ok(())
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width as f32, self.screen_height as f32)
    }

    /// Player spawn point (vertically centered, truncated like the window math)
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(self.bird_x, (self.screen_height / 2) as f32)
    }

    /// Column at which new obstacle pairs appear
    pub fn spawn_x(&self) -> f32 {
        (self.screen_width + self.pipe_width) as f32
    }

    /// A new pair spawns once the newest obstacle's center is left of this.
    ///
    /// Pair spacing is derived from the obstacle height, not a dedicated
    /// spacing constant. Tune `pipe_height` to change it.
    pub fn spawn_threshold(&self) -> f32 {
        self.screen_width as f32 - (self.pipe_height / 2) as f32
    }

    /// Distance from the gap center to the center of either pair member
    pub fn pair_offset(&self) -> f32 {
        ((self.pipe_gap / 2) + (self.pipe_height / 2)) as f32
    }

    /// LocalStorage key for JSON overrides
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flappy_arcade_config";

    /// Environment variable naming a JSON overrides file (native only)
    pub const CONFIG_ENV: &'static str = "FLAPPY_CONFIG";

    /// Build the variant preset and apply LocalStorage overrides (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(variant: Variant) -> Result<Self, ConfigError> {
        let config = Self::for_variant(variant);
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Applying config overrides from LocalStorage");
                return config.with_json_overrides(&json);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Build the variant preset and apply the `FLAPPY_CONFIG` file, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(variant: Variant) -> Result<Self, ConfigError> {
        let config = Self::for_variant(variant);
        match std::env::var_os(Self::CONFIG_ENV) {
            Some(path) => {
                let path = std::path::PathBuf::from(path);
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
                log::info!("Applying config overrides from {}", path.display());
                config.with_json_overrides(&json)
            }
            None => {
                config.validate()?;
                Ok(config)
            }
        }
    }
}

/// Options picked at launch (URL query on the web, arguments natively)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchOptions {
    pub variant: Variant,
    pub seed: Option<u64>,
    /// Tick budget for headless runs
    pub ticks: Option<u64>,
}

impl LaunchOptions {
    /// Parse `?variant=sprite&seed=42` style query strings
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "variant" => {
                    if let Some(variant) = Variant::from_str(value) {
                        options.variant = variant;
                    }
                }
                "seed" => options.seed = value.parse().ok(),
                "ticks" => options.ticks = value.parse().ok(),
                _ => {}
            }
        }
        options
    }

    /// Parse positional `[variant] [ticks] [seed]` arguments
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut options = Self::default();
        let mut args = args.into_iter();
        if let Some(variant) = args.next().as_deref().and_then(Variant::from_str) {
            options.variant = variant;
        }
        options.ticks = args.next().and_then(|t| t.parse().ok());
        options.seed = args.next().and_then(|s| s.parse().ok());
        options
    }
}
