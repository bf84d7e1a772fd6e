//! A browsing session: the loaded module, its descriptors, and the
//! serialize → simplify → colorize pipeline for one selection.

use std::path::Path;

use serde::Serialize;
use snooper_markup::{
    colorize_document, colorize_with, failure_runs, rewrite, ColorizeOptions, MarkupDocument,
    MarkupError, StyledRun,
};

use crate::catalog::{CatalogOptions, StyleDescriptor, TypeCatalog};
use crate::module::{ModuleError, ModuleManifest, TypeInfo};
use crate::style::{ResourceDictionary, ScopeChain, SerializedStyle, StyleSerializer};

/// Shown when a serialized style cannot be turned into runs.
pub const MARKUP_UNREADABLE: &str = "[Serialized style could not be displayed]";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("error loading module: {0}")]
    Module(#[from] ModuleError),

    #[error("module '{module}' does not contain any compatible types")]
    NoCompatibleTypes { module: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// Run the markup rewrites before colorizing.
    pub simplify: bool,
    pub colorize: ColorizeOptions,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            simplify: true,
            colorize: ColorizeOptions::default(),
        }
    }
}

/// Display-ready result for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub display_name: String,
    pub success: bool,
    pub runs: Vec<StyledRun>,
}

#[derive(Debug)]
pub struct Inspector {
    catalog: TypeCatalog,
    module: ModuleManifest,
    /// Resources of the module the session started with. They stay
    /// reachable after another module is loaded.
    framework: ResourceDictionary,
    /// Type table of that first module, for resolving base types of modules
    /// loaded later.
    framework_types: Vec<TypeInfo>,
    descriptors: Vec<StyleDescriptor>,
}

impl Inspector {
    /// Starts a session on `module`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoCompatibleTypes`] when the module has nothing
    /// to browse.
    pub fn new(module: ModuleManifest, options: CatalogOptions) -> Result<Self, LoadError> {
        let catalog = TypeCatalog::new(options);
        let descriptors = catalog.scan(&module);
        if descriptors.is_empty() {
            return Err(LoadError::NoCompatibleTypes {
                module: module.name,
            });
        }
        Ok(Self {
            catalog,
            framework: module.resources.clone(),
            framework_types: module.types.clone(),
            module,
            descriptors,
        })
    }

    /// Starts a session on the embedded presentation framework module.
    pub fn with_builtin(options: CatalogOptions) -> Result<Self, LoadError> {
        Self::new(ModuleManifest::builtin()?, options)
    }

    pub fn module(&self) -> &ModuleManifest {
        &self.module
    }

    pub fn descriptors(&self) -> &[StyleDescriptor] {
        &self.descriptors
    }

    pub fn find(&self, display_name: &str) -> Option<&StyleDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.display_name == display_name)
    }

    /// Replaces the browsed module, returning the new descriptor count.
    ///
    /// A module without compatible types is rejected and the current one
    /// stays loaded.
    pub fn load(&mut self, module: ModuleManifest) -> Result<usize, LoadError> {
        let descriptors = self.catalog.scan_with_known(&module, &self.framework_types);
        if descriptors.is_empty() {
            log::warn!(
                target: "snooper::inspector",
                "module '{}' has no compatible types; keeping '{}'",
                module.name,
                self.module.name
            );
            return Err(LoadError::NoCompatibleTypes {
                module: module.name,
            });
        }

        log::info!(
            target: "snooper::inspector",
            "switched from '{}' to '{}' ({} descriptors)",
            self.module.name,
            module.name,
            descriptors.len()
        );
        self.module = module;
        self.descriptors = descriptors;
        Ok(self.descriptors.len())
    }

    pub fn load_path(&mut self, path: &Path) -> Result<usize, LoadError> {
        self.load(ModuleManifest::load(path)?)
    }

    /// Looks a descriptor up in the module's resources, then the framework's.
    pub fn serialize(&self, descriptor: &StyleDescriptor) -> SerializedStyle {
        let scope = ScopeChain::new()
            .with_layer(&self.module.resources)
            .with_layer(&self.framework);
        StyleSerializer::new(&scope).serialize(descriptor)
    }

    pub fn inspect(&self, descriptor: &StyleDescriptor, options: InspectOptions) -> Inspection {
        let serialized = self.serialize(descriptor);
        if !serialized.success {
            return Inspection {
                display_name: descriptor.display_name.clone(),
                success: false,
                runs: failure_runs(&serialized.text),
            };
        }

        match display_runs(&serialized.text, options) {
            Ok(runs) => Inspection {
                display_name: descriptor.display_name.clone(),
                success: true,
                runs,
            },
            Err(err) => {
                log::warn!(
                    target: "snooper::inspector",
                    "cannot display {}: {err}",
                    descriptor.display_name
                );
                Inspection {
                    display_name: descriptor.display_name.clone(),
                    success: false,
                    runs: failure_runs(&format!("{MARKUP_UNREADABLE}\n\n{err}")),
                }
            }
        }
    }
}

/// Colorizes serialized markup, simplifying it first when asked to.
pub fn display_runs(markup: &str, options: InspectOptions) -> Result<Vec<StyledRun>, MarkupError> {
    if !options.simplify {
        return colorize_with(markup, options.colorize);
    }
    let mut document = MarkupDocument::parse(markup)?;
    let rewrites = rewrite(&mut document);
    log::debug!(target: "snooper::inspector", "{rewrites} rewrites applied");
    colorize_document(document, options.colorize)
}
