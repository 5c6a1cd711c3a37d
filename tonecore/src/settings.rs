//! Read-only settings and well-known directories.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const APP_NAME: &str = "tonepad";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `C.wav` … `B.wav`
    pub sounds_dir: PathBuf,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub stroke_width: f32,
    pub marker_radius: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sounds_dir: PathBuf::from("sounds"),
            canvas_width: 800.0,
            canvas_height: 400.0,
            stroke_width: 2.0,
            marker_radius: 5.0,
            window_width: 960.0,
            window_height: 620.0,
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        config_dir(APP_NAME).join("settings.json")
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    /// Replace sizes that are not positive and finite with their defaults.
    ///
    /// Canvas times divide by the width, so a zero or negative width would turn
    /// drawn events into NaN or infinity.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let sizes = [
            ("canvas_width", &mut self.canvas_width, defaults.canvas_width),
            ("canvas_height", &mut self.canvas_height, defaults.canvas_height),
            ("stroke_width", &mut self.stroke_width, defaults.stroke_width),
            ("marker_radius", &mut self.marker_radius, defaults.marker_radius),
            ("window_width", &mut self.window_width, defaults.window_width),
            ("window_height", &mut self.window_height, defaults.window_height),
        ];
        for (name, value, default) in sizes {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("settings: {name} {value} is not a positive size, using {default}");
                *value = default;
            }
        }
        self
    }

    /// Settings from the config file, or defaults when it is missing or unreadable.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("settings loaded from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Config directory for an app of this suite
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("co", "slowcomputer", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The user's documents directory, falling back to the working directory
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
