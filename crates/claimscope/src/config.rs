//! Dashboard configuration.
//!
//! Loaded from an optional TOML file; missing keys take their defaults and
//! command-line flags override the result.
//!
//! ```toml
//! initial_page = "Fraud Analysis"
//! theme = "light"
//! log_filter = "claimscope=debug,warn"
//!
//! [window]
//! width = 1600.0
//! height = 1000.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{DashboardError, DashboardResult};
use crate::navigation::Page;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Color theme.
    pub theme: ThemeChoice,
    /// Page shown at startup.
    pub initial_page: Page,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Native window geometry.
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Dark,
            initial_page: Page::Overview,
            log_filter: "info".to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse from a TOML document.
    pub fn from_toml_str(source: &str) -> DashboardResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> DashboardResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Native window geometry in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial width.
    pub width: f32,
    /// Initial height.
    pub height: f32,
    /// Minimum width.
    pub min_width: f32,
    /// Minimum height.
    pub min_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
            min_width: 800.0,
            min_height: 600.0,
        }
    }
}

/// Color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Dark background.
    #[default]
    Dark,
    /// Light background.
    Light,
}

impl FromStr for ThemeChoice {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeChoice::Dark),
            "light" => Ok(ThemeChoice::Light),
            other => Err(DashboardError::Config(format!("unknown theme {other:?}"))),
        }
    }
}
