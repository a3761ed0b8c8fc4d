mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::math::Vec3;
use crate::renderer::{default_workers, RenderSettings};
use crate::scene::{Scene, SceneError};
use crate::DEFAULT_RECURSION_DEPTH;

pub use loader::load_config;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub scene: Scene,
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// Canvas size, bounce budget and parallelism
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    #[serde(default = "default_canvas_size")]
    pub width: u32,
    #[serde(default = "default_canvas_size")]
    pub height: u32,
    #[serde(default = "default_recursion_depth")]
    pub recursion_depth: u32,
    /// Worker thread count; defaults to the platform concurrency hint
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_canvas_size() -> u32 {
    600
}

fn default_recursion_depth() -> u32 {
    DEFAULT_RECURSION_DEPTH
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_size(),
            height: default_canvas_size(),
            recursion_depth: default_recursion_depth(),
            workers: None,
        }
    }
}

impl RenderConfig {
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            recursion_depth: self.recursion_depth,
            workers: self.workers.unwrap_or_else(default_workers),
        }
    }
}

/// Camera drift across a sequence of independent frames
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Camera translation applied every `frame_interval` frames
    #[serde(default = "default_camera_step")]
    pub camera_step: Vec3,
    #[serde(default = "default_frame_interval")]
    pub frame_interval: u32,
    /// Camera position at frame 0; the scene camera's position when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_start: Option<Vec3>,
}

fn default_frames() -> u32 {
    1
}

fn default_camera_step() -> Vec3 {
    Vec3::new(0.005, 0.001, -0.001)
}

fn default_frame_interval() -> u32 {
    2
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            camera_step: default_camera_step(),
            frame_interval: default_frame_interval(),
            camera_start: None,
        }
    }
}

impl AnimationConfig {
    /// Total camera displacement at `frame`
    pub fn camera_offset(&self, frame: u32) -> Vec3 {
        let steps = frame / self.frame_interval.max(1);
        self.camera_step * steps as f32
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load configuration, falling back to default paths and then to the
    /// built-in scene
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_paths = ["scene.yaml", "scene.yml", "./config/scene.yaml"];
                for p in default_paths {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                tracing::debug!("No config file found, using built-in scene");
                Ok(Self::default())
            }
        }
    }

    /// Scene for `frame` of the animation: the configured scene with the
    /// camera moved by the accumulated drift
    pub fn frame_scene(&self, frame: u32) -> Scene {
        let mut scene = self.scene.clone();
        if let Some(start) = self.animation.camera_start {
            scene.camera.position = start;
        }
        scene.camera.translate(self.animation.camera_offset(frame));
        scene
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.width == 0 || self.render.height == 0 {
            return Err(ConfigError::Validation(
                "render.width and render.height must be positive".into(),
            ));
        }
        if self.render.workers == Some(0) {
            return Err(ConfigError::Validation("render.workers must be at least 1".into()));
        }
        if self.animation.frames == 0 {
            return Err(ConfigError::Validation("animation.frames must be at least 1".into()));
        }
        if self.animation.frame_interval == 0 {
            return Err(ConfigError::Validation(
                "animation.frame_interval must be at least 1".into(),
            ));
        }
        if !self.animation.camera_step.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Validation(
                "animation.camera_step components must be finite".into(),
            ));
        }
        if let Some(start) = self.animation.camera_start {
            if !start.iter().all(|c| c.is_finite()) {
                return Err(ConfigError::Validation(
                    "animation.camera_start components must be finite".into(),
                ));
            }
        }
        self.scene.validate()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
