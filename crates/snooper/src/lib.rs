//! # snooper
//!
//! Browse the visual-control types of a UI module and read the default
//! styles the framework assigns to them.
//!
//! A module is described by a manifest: its type table (names, bases,
//! constructors, style keys) and the resources it registers. [`TypeCatalog`]
//! turns a module into a sorted list of [`StyleDescriptor`]s;
//! [`StyleSerializer`] resolves a descriptor against a resource scope and
//! writes the style as markup; [`Inspector`] ties these together with the
//! rewriter and colorizer from `snooper_markup`.
//!
//! ```rust
//! use snooper::{CatalogOptions, InspectOptions, Inspector};
//! use snooper_markup::runs_to_string;
//!
//! let inspector = Inspector::with_builtin(CatalogOptions::default()).unwrap();
//! let button = inspector.find("Button").unwrap();
//! let inspection = inspector.inspect(button, InspectOptions::default());
//!
//! assert!(inspection.success);
//! assert!(runs_to_string(&inspection.runs).starts_with("<Style TargetType=\"{x:Type Button}\""));
//! ```

mod catalog;
mod config;
mod inspector;
pub mod module;
mod names;
mod render;
pub mod style;
mod theme;

pub use catalog::{CatalogOptions, StyleDescriptor, TypeCatalog};
pub use config::{ConfigError, SnooperConfig, ThemeConfig, CONFIG_ENV};
pub use inspector::{display_runs, InspectOptions, Inspection, Inspector, LoadError, MARKUP_UNREADABLE};
pub use module::{ModuleError, ModuleManifest, TypeUniverse};
pub use names::{ResourceKey, TypeName};
pub use render::{render_runs, OutputMode, UnknownOutputMode};
pub use style::{ResourceScope, SerializedStyle, StyleSerializer};
pub use theme::{detect_color_mode, set_theme_detector, AdaptiveTheme, ColorMode, Theme};
