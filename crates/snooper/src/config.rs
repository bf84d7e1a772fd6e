//! User configuration.
//!
//! ```yaml
//! visual_base: FrameworkElement
//! initial_selection: Button
//! align_attributes: false
//! simplify: true
//! theme:
//!   dark:
//!     element_name: yellow.bold
//!     attribute_name: cyan
//! ```
//!
//! Every field is optional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snooper_markup::{Classification, ColorizeOptions};

use crate::catalog::CatalogOptions;
use crate::inspector::InspectOptions;
use crate::names::TypeName;
use crate::theme::{AdaptiveTheme, Theme};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SNOOPER_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {origin}: {message}")]
    Parse { origin: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnooperConfig {
    pub visual_base: TypeName,
    /// Descriptor shown when none is named.
    pub initial_selection: String,
    pub align_attributes: bool,
    pub simplify: bool,
    pub theme: ThemeConfig,
}

/// Per-mode style overrides as dotted style strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub light: BTreeMap<Classification, String>,
    pub dark: BTreeMap<Classification, String>,
}

impl Default for SnooperConfig {
    fn default() -> Self {
        Self {
            visual_base: CatalogOptions::default().visual_base,
            initial_selection: "Button".to_string(),
            align_attributes: false,
            simplify: true,
            theme: ThemeConfig::default(),
        }
    }
}

impl SnooperConfig {
    pub fn from_yaml_str(source: &str, origin: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid, all-defaults config.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|err| ConfigError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&source, &path.display().to_string())?;
        log::debug!(target: "snooper::config", "loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the explicit path if given, else the file named by
    /// [`CONFIG_ENV`], else the defaults.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            visual_base: self.visual_base.clone(),
        }
    }

    pub fn inspect_options(&self) -> InspectOptions {
        InspectOptions {
            simplify: self.simplify,
            colorize: ColorizeOptions {
                align_attributes: self.align_attributes,
            },
        }
    }

    /// The built-in presets with this config's overrides applied.
    pub fn adaptive_theme(&self) -> AdaptiveTheme {
        AdaptiveTheme::new(
            Theme::light().with_overrides(&self.theme.light),
            Theme::dark().with_overrides(&self.theme.dark),
        )
    }
}
