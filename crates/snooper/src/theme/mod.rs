//! Painting styled runs for the terminal.
//!
//! - [`Theme`]: classification → `console::Style`
//! - [`AdaptiveTheme`]: light/dark theme pair chosen by OS detection
//! - [`ColorMode`]: light or dark

mod adaptive;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::{detect_color_mode, set_theme_detector, AdaptiveTheme, ColorMode};
pub use theme::Theme;
