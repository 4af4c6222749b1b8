//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsmind/rsmind.toml`
//! 3. Environment variables: `RSMIND_*` prefix (e.g. `RSMIND_LAYOUT__NODE_WIDTH`)
//!
//! Settings cover layout metrics and outline display only; trees themselves
//! are never persisted.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::layout::LayoutParams;

/// Diagram layout metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutSettings {
    /// Node box width in diagram units
    pub node_width: f64,
    /// Node box height in diagram units
    pub node_height: f64,
    /// Horizontal advance per depth level
    pub h_spacing: f64,
    /// Vertical gap between sibling subtrees
    pub v_spacing: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let params = LayoutParams::default();
        Self {
            node_width: params.node_width,
            node_height: params.node_height,
            h_spacing: params.h_spacing,
            v_spacing: params.v_spacing,
        }
    }
}

/// Outline display options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutlineSettings {
    /// Show short node ids in listings
    pub show_ids: bool,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self { show_ids: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub layout: LayoutSettings,
    pub outline: OutlineSettings,
}

impl Settings {
    /// Loads settings with layered precedence.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = Self::global_config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder
            .add_source(
                Environment::with_prefix("RSMIND")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Path of the global config file, if a home directory exists.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rsmind").map(|dirs| dirs.config_dir().join("rsmind.toml"))
    }

    /// TOML rendering of the compiled defaults, for `config init`.
    pub fn template() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Settings::default())
    }

    /// Layout params assembled from settings; the diagram origin is fixed
    /// at (0, 0).
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            origin_x: 0.0,
            origin_y: 0.0,
            node_width: self.layout.node_width,
            node_height: self.layout.node_height,
            h_spacing: self.layout.h_spacing,
            v_spacing: self.layout.v_spacing,
        }
    }
}
