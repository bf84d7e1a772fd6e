//! Turning styled runs into output text.

use std::str::FromStr;

use snooper_markup::StyledRun;

use crate::theme::Theme;

/// How styled runs are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// ANSI colors when the terminal supports them.
    #[default]
    Auto,
    /// Always ANSI colors.
    Term,
    /// No colors.
    Text,
    /// Classifications as `[name]...[/name]` tags.
    TermDebug,
    /// The runs themselves, as JSON.
    Json,
}

impl OutputMode {
    pub fn should_use_color(self) -> bool {
        match self {
            OutputMode::Auto => console::colors_enabled(),
            OutputMode::Term => true,
            OutputMode::Text | OutputMode::TermDebug | OutputMode::Json => false,
        }
    }

    pub fn is_debug(self) -> bool {
        self == OutputMode::TermDebug
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output mode '{0}'; expected auto, term, text, term-debug or json")]
pub struct UnknownOutputMode(String);

impl FromStr for OutputMode {
    type Err = UnknownOutputMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(OutputMode::Auto),
            "term" => Ok(OutputMode::Term),
            "text" => Ok(OutputMode::Text),
            "term-debug" | "term_debug" => Ok(OutputMode::TermDebug),
            "json" => Ok(OutputMode::Json),
            _ => Err(UnknownOutputMode(s.to_string())),
        }
    }
}

/// Writes runs in the given mode.
///
/// # Errors
///
/// Only JSON output can fail.
pub fn render_runs(
    runs: &[StyledRun],
    theme: &Theme,
    mode: OutputMode,
) -> Result<String, serde_json::Error> {
    if mode == OutputMode::Json {
        return serde_json::to_string_pretty(runs);
    }

    let use_color = mode.should_use_color();
    let output = runs
        .iter()
        .map(|run| {
            if mode.is_debug() {
                theme.paint_debug(run)
            } else {
                theme.paint(run, use_color)
            }
        })
        .collect();
    Ok(output)
}
