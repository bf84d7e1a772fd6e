//! Module loading and instantiation errors.

use std::path::PathBuf;

use crate::module::MODULE_EXTENSIONS;
use crate::names::TypeName;

/// Error raised while loading a module or creating one of its types.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// The module file could not be read.
    #[error("failed to read module {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The module text is not a valid manifest.
    #[error("failed to parse module {origin}: {message}")]
    Parse { origin: String, message: String },
    /// The selected file is not a module.
    #[error(
        "{} is not a module; expected one of: {}",
        .path.display(),
        MODULE_EXTENSIONS.join(", ")
    )]
    UnsupportedExtension { path: PathBuf },
    #[error("type '{type_name}' is not defined in this module")]
    UnknownType { type_name: TypeName },
    #[error("type '{type_name}' is abstract")]
    AbstractType { type_name: TypeName },
    #[error("type '{type_name}' has no default constructor")]
    NoDefaultConstructor { type_name: TypeName },
    /// The constructor ran and failed.
    #[error("constructor of '{type_name}' failed: {message}")]
    Instantiation { type_name: TypeName, message: String },
}
