//! Audio system
//!
//! Three short clips (flap, point, hit) cued by game events. Playback is
//! fire-and-forget through `HtmlAudioElement`s on the web; the solid variant
//! is silent.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player flapped
    Flap,
    /// A new pair spawned (score went up)
    Point,
    /// Round ended on an obstacle or the screen edge
    Hit,
}

/// Which clip, if any, an event should trigger
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Flapped => Some(SoundEffect::Flap),
        GameEvent::Scored { .. } => Some(SoundEffect::Point),
        // Both crash causes share one clip
        GameEvent::Crashed { .. } => Some(SoundEffect::Hit),
        GameEvent::RoundStarted | GameEvent::QuitRequested => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::SoundEffect;
    use crate::assets::ClipUrls;
    use crate::error::GameError;

    /// Audio manager for the game
    pub struct AudioManager {
        flap: HtmlAudioElement,
        point: HtmlAudioElement,
        hit: HtmlAudioElement,
        volume: f32,
    }

    impl AudioManager {
        /// Create one audio element per clip. The URLs must already have been
        /// fetched by `assets::load_web`.
        pub fn new(clips: &ClipUrls, volume: f32) -> Result<Self, GameError> {
            let load = |url: &str| {
                let element = HtmlAudioElement::new_with_src(url)
                    .map_err(|e| GameError::Audio(format!("{url}: {e:?}")))?;
                element.set_preload("auto");
                Ok::<_, GameError>(element)
            };
            let manager = Self {
                flap: load(&clips.flap)?,
                point: load(&clips.point)?,
                hit: load(&clips.hit)?,
                volume: volume.clamp(0.0, 1.0),
            };
            log::info!("Audio clips ready");
            Ok(manager)
        }

        fn clip(&self, effect: SoundEffect) -> &HtmlAudioElement {
            match effect {
                SoundEffect::Flap => &self.flap,
                SoundEffect::Point => &self.point,
                SoundEffect::Hit => &self.hit,
            }
        }

        /// Play a sound effect from the start
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let clip = self.clip(effect);
            clip.set_volume(self.volume as f64);
            clip.set_current_time(0.0);
            // Autoplay may be blocked until the first key press
            if let Err(e) = clip.play() {
                log::debug!("Could not play {:?}: {:?}", effect, e);
            }
        }
    }
}
