//! Manifest-backed modules.
//!
//! A manifest describes a module's type table and the resources it ships:
//!
//! ```yaml
//! name: Controls
//! types:
//!   - name: FancyButton
//!     base: Button
//!     constructor: non_public
//!     default_style_key: FancyButton
//!     static_members:
//!       - name: GlyphStyleKey
//!         value: FancyButton.GlyphStyleKey
//! resources:
//!   FancyButton: !style
//!     target_type: FancyButton
//!     setters:
//!       - property: Margin
//!         value: !thickness "2,2,2,2"
//! ```
//!
//! Manifests are read from `.yaml`/`.yml` (with `serde_yaml`) or `.json`
//! (with `serde_json`) files. The presentation framework slice the tool
//! starts with is embedded at compile time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Constructor, Instance, ModuleError, TypeInfo, TypeUniverse};
use crate::names::TypeName;
use crate::style::ResourceDictionary;

/// File extensions accepted as modules.
pub const MODULE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

const BUILTIN_MODULE: &str = include_str!("../../assets/presentation.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(ManifestFormat::Yaml),
            "json" => Some(ManifestFormat::Json),
            _ => None,
        }
    }
}

/// A module described by a manifest document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeInfo>,
    #[serde(default)]
    pub resources: ResourceDictionary,
}

impl ModuleManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The embedded presentation framework module.
    pub fn builtin() -> Result<Self, ModuleError> {
        Self::from_yaml_str(BUILTIN_MODULE, "<builtin>")
    }

    /// Loads a manifest file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::UnsupportedExtension`] for files that are not
    /// modules, and read or parse errors otherwise.
    pub fn load(path: &Path) -> Result<Self, ModuleError> {
        let format = ManifestFormat::from_path(path).ok_or_else(|| {
            ModuleError::UnsupportedExtension {
                path: path.to_path_buf(),
            }
        })?;
        let source = std::fs::read_to_string(path).map_err(|source| ModuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path.display().to_string();
        let manifest = match format {
            ManifestFormat::Yaml => Self::from_yaml_str(&source, &origin)?,
            ManifestFormat::Json => Self::from_json_str(&source, &origin)?,
        };
        log::info!(
            target: "snooper::module",
            "loaded module '{}' from {origin}: {} types, {} resources",
            manifest.name,
            manifest.types.len(),
            manifest.resources.len()
        );
        Ok(manifest)
    }

    pub fn from_yaml_str(source: &str, origin: &str) -> Result<Self, ModuleError> {
        serde_yaml::from_str(source).map_err(|err| ModuleError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })
    }

    pub fn from_json_str(source: &str, origin: &str) -> Result<Self, ModuleError> {
        serde_json::from_str(source).map_err(|err| ModuleError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })
    }

    pub fn with_type(mut self, info: TypeInfo) -> Self {
        self.types.push(info);
        self
    }

    pub fn with_resources(mut self, resources: ResourceDictionary) -> Self {
        self.resources = resources;
        self
    }

    pub fn find_type(&self, name: &TypeName) -> Option<&TypeInfo> {
        self.types.iter().find(|info| &info.name == name)
    }
}

impl TypeUniverse for ModuleManifest {
    fn module_name(&self) -> &str {
        &self.name
    }

    fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    fn instantiate(&self, type_name: &TypeName) -> Result<Instance, ModuleError> {
        let info = self
            .find_type(type_name)
            .ok_or_else(|| ModuleError::UnknownType {
                type_name: type_name.clone(),
            })?;

        if info.is_abstract {
            return Err(ModuleError::AbstractType {
                type_name: info.name.clone(),
            });
        }
        if info.constructor == Constructor::Absent {
            return Err(ModuleError::NoDefaultConstructor {
                type_name: info.name.clone(),
            });
        }
        if let Some(message) = &info.instantiation_error {
            return Err(ModuleError::Instantiation {
                type_name: info.name.clone(),
                message: message.clone(),
            });
        }

        Ok(Instance {
            runtime_type: info.name.clone(),
            default_style_key: info.default_style_key.clone(),
            static_members: info.static_members.clone(),
        })
    }
}
