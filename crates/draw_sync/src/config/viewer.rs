//! Viewer window settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::draw::Screen;

/// Step sizes for keyboard/wheel style camera control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Pan step per event
    pub pan_speed: f32,
    /// Pan step per event with precision mode held
    pub precision_pan_speed: f32,
    /// Zoom step per event
    pub zoom_speed: f32,
    /// Zoom step per event with precision mode held
    pub precision_zoom_speed: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            pan_speed: 0.025,
            precision_pan_speed: 0.005,
            zoom_speed: 0.000_25,
            precision_zoom_speed: 0.000_05,
        }
    }
}

/// Grid of viewports inside one display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLayout {
    /// Rows of viewports
    pub rows: u32,
    /// Columns of viewports
    pub columns: u32,
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self { rows: 1, columns: 1 }
    }
}

/// Settings of one viewer window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Draw-objects tagged for other screens are ignored
    pub linked_screen: Screen,
    /// Base directory for relative texture file references
    pub texture_root: Option<PathBuf>,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Camera step sizes
    pub navigation: NavigationConfig,
    /// Initial viewport layout
    pub layout: DisplayLayout,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            linked_screen: Screen::Main,
            texture_root: None,
            log_filter: "info".to_string(),
            navigation: NavigationConfig::default(),
            layout: DisplayLayout::default(),
        }
    }
}

impl Config for ViewerConfig {}

impl ViewerConfig {
    /// Reject settings the viewport cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nav = &self.navigation;
        let speeds = [
            ("pan_speed", nav.pan_speed),
            ("precision_pan_speed", nav.precision_pan_speed),
            ("zoom_speed", nav.zoom_speed),
            ("precision_zoom_speed", nav.precision_zoom_speed),
        ];
        for (name, value) in speeds {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Parse(format!(
                    "navigation.{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.layout.rows == 0 || self.layout.columns == 0 {
            return Err(ConfigError::Parse(format!(
                "layout must have at least one row and column, got {}x{}",
                self.layout.rows, self.layout.columns
            )));
        }

        Ok(())
    }
}
