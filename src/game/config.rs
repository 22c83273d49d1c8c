// Player configuration - one file, loaded once, validated before use

use crate::engine::animation::AnimationParameters;
use crate::engine::physics::ProbeSettings;
use crate::game::actor::MovementSettings;
use serde::Deserialize;
use std::path::Path;

/// Configuration errors. All of these are fatal at initialization; setup
/// halts instead of proceeding with defaults that mask the problem.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Scene transition tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Minimum visible duration of a loading screen
    pub min_loading_time: f32,
    /// Scene loaded at startup
    pub start_scene: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            min_loading_time: 5.0,
            start_scene: "MainScene".to_string(),
        }
    }
}

/// Everything the player character needs tuned, aggregated from one file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub movement: MovementSettings,
    pub probe: ProbeSettings,
    pub animation: AnimationParameters,
    pub scene: SceneSettings,
}

impl PlayerSettings {
    /// Load and validate settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = toml::from_str(&text)?;
        settings.validate()?;
        log::info!("Loaded player settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate().map_err(ConfigError::Invalid)?;
        self.probe.validate().map_err(ConfigError::Invalid)?;
        if self.scene.min_loading_time < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scene.min_loading_time must be >= 0, got {}",
                self.scene.min_loading_time
            )));
        }
        Ok(())
    }
}
