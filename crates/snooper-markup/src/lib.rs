//! # snooper-markup
//!
//! Markup handling for serialized styles: a small element tree, the
//! simplification rewrites that make serializer output readable, and a
//! colorizer that turns markup into indented, syntax-classified runs.
//!
//! ```rust
//! use snooper_markup::{colorize, runs_to_string, simplify};
//!
//! let raw = r#"<Setter Property="Margin"><Setter.Value><Thickness>4,4,4,4</Thickness></Setter.Value></Setter>"#;
//! let simplified = simplify(raw).unwrap();
//! assert_eq!(simplified, r#"<Setter Property="Margin" Value="4"/>"#);
//!
//! let runs = colorize(&simplified).unwrap();
//! assert_eq!(runs_to_string(&runs), "<Setter Property=\"Margin\" Value=\"4\" />\n");
//! ```

mod colorize;
mod error;
mod node;
mod parse;
mod rewrite;
mod thickness;
mod write;

pub use colorize::{
    colorize, colorize_document, colorize_with, failure_runs, runs_to_string, Classification,
    ColorizeOptions, Colorizer, StyledRun,
};
pub use error::MarkupError;
pub use node::{
    MarkupDocument, MarkupNode, PRESENTATION_NAMESPACE, PRIMITIVES_NAMESPACE, XAML_NAMESPACE,
};
pub use rewrite::{rewrite, simplify};
pub use thickness::simplify_thickness;
pub use write::INDENT_WIDTH;
