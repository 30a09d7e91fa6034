//! Sprite and sound assets
//!
//! The sprite variant needs one background image, one bird image, one pipe
//! image and three clips. Every one of them is required: a missing or broken
//! file aborts startup, there is no fallback rendering.

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Directory holding the asset files
pub const ASSET_DIR: &str = "assets";

/// Identifies one required asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Background,
    Bird,
    Pipe,
    FlapSound,
    PointSound,
    HitSound,
}

impl AssetId {
    pub const ALL: [AssetId; 6] = [
        AssetId::Background,
        AssetId::Bird,
        AssetId::Pipe,
        AssetId::FlapSound,
        AssetId::PointSound,
        AssetId::HitSound,
    ];

    pub fn is_image(&self) -> bool {
        matches!(self, AssetId::Background | AssetId::Bird | AssetId::Pipe)
    }
}

/// File names of each asset inside the asset directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub background: String,
    pub bird: String,
    pub pipe: String,
    pub flap_sound: String,
    pub point_sound: String,
    pub hit_sound: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            background: "background.png".into(),
            bird: "bird.png".into(),
            pipe: "pipe.png".into(),
            flap_sound: "flap.wav".into(),
            point_sound: "point.wav".into(),
            hit_sound: "hit.wav".into(),
        }
    }
}

impl AssetManifest {
    pub fn file(&self, id: AssetId) -> &str {
        match id {
            AssetId::Background => &self.background,
            AssetId::Bird => &self.bird,
            AssetId::Pipe => &self.pipe,
            AssetId::FlapSound => &self.flap_sound,
            AssetId::PointSound => &self.point_sound,
            AssetId::HitSound => &self.hit_sound,
        }
    }
}

/// Join an asset file name onto a base directory or URL prefix
pub fn asset_url(base: &str, file: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), file)
}

/// Where each sound clip is served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipUrls {
    pub flap: String,
    pub point: String,
    pub hit: String,
}

impl ClipUrls {
    pub fn resolve(base: &str, manifest: &AssetManifest) -> Self {
        Self {
            flap: asset_url(base, &manifest.flap_sound),
            point: asset_url(base, &manifest.point_sound),
            hit: asset_url(base, &manifest.hit_sound),
        }
    }

    /// Every clip URL with its asset id, in manifest order
    pub fn entries(&self) -> [(AssetId, &str); 3] {
        [
            (AssetId::FlapSound, self.flap.as_str()),
            (AssetId::PointSound, self.point.as_str()),
            (AssetId::HitSound, self.hit.as_str()),
        ]
    }
}

/// RGBA8 pixels ready for texture upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// The three decoded sprite images
#[derive(Debug, Clone)]
pub struct SpriteImages {
    pub background: DecodedImage,
    pub bird: DecodedImage,
    pub pipe: DecodedImage,
}

/// Decode PNG bytes into RGBA8
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<DecodedImage, AssetError> {
    let image = image::load_from_memory(bytes)
        .map_err(|source| AssetError::Decode {
            path: name.to_string(),
            source,
        })?
        .to_rgba8();
    Ok(DecodedImage {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{NativeAssets, asset_root, load_native};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use super::*;

    /// Everything the sprite variant loaded from disk
    #[derive(Debug, Clone)]
    pub struct NativeAssets {
        pub root: PathBuf,
        pub images: SpriteImages,
        /// Clip paths, verified to exist and be readable
        pub clips: Vec<(AssetId, PathBuf)>,
    }

    /// `assets/` next to the running executable
    pub fn asset_root() -> Result<PathBuf, AssetError> {
        let exe = std::env::current_exe().map_err(AssetError::ExeDir)?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.join(ASSET_DIR))
    }

    fn read(root: &Path, file: &str) -> Result<(PathBuf, Vec<u8>), AssetError> {
        let path = root.join(file);
        if !path.is_file() {
            return Err(AssetError::Missing { path });
        }
        let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        Ok((path, bytes))
    }

    fn read_image(root: &Path, file: &str) -> Result<DecodedImage, AssetError> {
        let (path, bytes) = read(root, file)?;
        decode_image(&path.display().to_string(), &bytes)
    }

    /// Load and verify every asset in the manifest
    pub fn load_native(root: &Path, manifest: &AssetManifest) -> Result<NativeAssets, AssetError> {
        let images = SpriteImages {
            background: read_image(root, &manifest.background)?,
            bird: read_image(root, &manifest.bird)?,
            pipe: read_image(root, &manifest.pipe)?,
        };

        let mut clips = Vec::new();
        for id in AssetId::ALL.into_iter().filter(|id| !id.is_image()) {
            let (path, bytes) = read(root, manifest.file(id))?;
            log::debug!("Verified clip {} ({} bytes)", path.display(), bytes.len());
            clips.push((id, path));
        }

        log::info!("Loaded assets from {}", root.display());
        Ok(NativeAssets {
            root: root.to_path_buf(),
            images,
            clips,
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{WebAssets, load_web};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    use super::*;

    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
        let fetch_error = |reason: String| AssetError::Fetch {
            path: url.to_string(),
            reason,
        };
        let window = web_sys::window().ok_or_else(|| fetch_error("no window".into()))?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| fetch_error(format!("{e:?}")))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| fetch_error("not a Response".into()))?;
        if !response.ok() {
            return Err(fetch_error(format!("HTTP {}", response.status())));
        }
        let buffer = response
            .array_buffer()
            .map_err(|e| fetch_error(format!("{e:?}")))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| fetch_error(format!("{e:?}")))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    async fn fetch_image(base: &str, file: &str) -> Result<DecodedImage, AssetError> {
        let url = asset_url(base, file);
        let bytes = fetch_bytes(&url).await?;
        decode_image(&url, &bytes)
    }

    /// Everything the sprite variant fetched from the page
    #[derive(Debug, Clone)]
    pub struct WebAssets {
        pub images: SpriteImages,
        /// Clip URLs, each fetched successfully once
        pub clips: ClipUrls,
    }

    /// Fetch and decode the sprite images and verify the clips, relative to
    /// the page
    pub async fn load_web(base: &str, manifest: &AssetManifest) -> Result<WebAssets, AssetError> {
        let images = SpriteImages {
            background: fetch_image(base, &manifest.background).await?,
            bird: fetch_image(base, &manifest.bird).await?,
            pipe: fetch_image(base, &manifest.pipe).await?,
        };

        let clips = ClipUrls::resolve(base, manifest);
        for (id, url) in clips.entries() {
            let bytes = fetch_bytes(url).await?;
            if bytes.is_empty() {
                return Err(AssetError::Fetch {
                    path: url.to_string(),
                    reason: "empty file".into(),
                });
            }
            log::debug!("Verified clip {:?} at {} ({} bytes)", id, url, bytes.len());
        }

        log::info!("Fetched assets from {}", base);
        Ok(WebAssets { images, clips })
    }
}
