use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/terraflight.toml";

/// Top-level game configuration, loaded from TOML with per-section
/// defaults so a partial file works.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub controls: ControlsConfig,
    pub plane: PlaneConfig,
    pub terrain: TerrainSettings,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Scales the per-tick position offsets before integration.
    pub sensitivity: f32,
    /// Key binding overrides: action name -> key names.
    pub bindings: HashMap<String, Vec<String>>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            bindings: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaneConfig {
    /// Spawn altitude above the world origin.
    pub spawn_height: f32,
    /// Visual scale of the plane model.
    pub scale: f32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            spawn_height: 30.0,
            scale: 1.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Heightmap image; a procedural fallback is used when absent.
    pub heightmap: Option<PathBuf>,
    /// Alternate heightmap for the single center block.
    pub city_heightmap: Option<PathBuf>,
    pub blocks_per_side: usize,
    pub block_scale: f32,
    /// Height-value rescaling bounds, before the block scale.
    pub min_y: f32,
    pub max_y: f32,
    /// Ground texture tiling across one block.
    pub texture_repeat: f32,
    /// Sample count per side of the procedural fallback heightmap.
    pub synthetic_resolution: usize,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            heightmap: None,
            city_heightmap: None,
            blocks_per_side: 5,
            block_scale: 75.0,
            min_y: 0.0,
            max_y: 0.25,
            texture_repeat: 40.0,
            synthetic_resolution: 128,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Upward tilt of the chase offset in degrees.
    pub tilt_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { tilt_degrees: 20.0 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub fog_color: [f32; 3],
    pub fog_density: f32,
    pub light_direction: [f32; 3],
    pub light_color: [f32; 3],
    pub ambient_color: [f32; 3],
    pub zenith_color: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fog_color: [0.5, 0.5, 0.5],
            fog_density: 0.02,
            light_direction: [0.0, 1.0, 1.0],
            light_color: [1.0, 1.0, 1.0],
            ambient_color: [0.3, 0.3, 0.3],
            zenith_color: [0.35, 0.55, 0.85],
        }
    }
}

impl GameConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to
    /// defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GameConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if path != Path::new(DEFAULT_CONFIG_PATH) {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                GameConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_terrain_setup() {
        let config = GameConfig::default();
        assert_eq!(config.terrain.blocks_per_side, 5);
        assert_eq!(config.terrain.block_scale, 75.0);
        assert_eq!(config.terrain.max_y, 0.25);
        assert_eq!(config.scene.fog_density, 0.02);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: GameConfig = toml::from_str(
            r#"
            [terrain]
            block_scale = 50.0

            [controls]
            sensitivity = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.terrain.block_scale, 50.0);
        assert_eq!(cfg.terrain.blocks_per_side, 5);
        assert_eq!(cfg.controls.sensitivity, 0.5);
        assert_eq!(cfg.window.width, 1280);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let cfg = GameConfig::load_from_path(Path::new("/nonexistent/terraflight.toml"));
        assert_eq!(cfg.window.width, 1280);
    }
}
