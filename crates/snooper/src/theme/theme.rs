//! Classification → terminal style tables.

use std::collections::{BTreeMap, HashMap};

use console::Style;
use snooper_markup::{Classification, StyledRun};

/// The styles used to paint styled runs.
///
/// # Example
///
/// ```rust
/// use console::Style;
/// use snooper::Theme;
/// use snooper_markup::{Classification, StyledRun};
///
/// let theme = Theme::new().add(Classification::ElementName, Style::new().blue());
/// let run = StyledRun::new("Setter", Classification::ElementName);
/// assert_eq!(theme.paint(&run, false), "Setter");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<Classification, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style for a classification, returning the theme for chaining.
    pub fn add(mut self, classification: Classification, style: Style) -> Self {
        self.styles.insert(classification, style);
        self
    }

    pub fn style(&self, classification: Classification) -> Option<&Style> {
        self.styles.get(&classification)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Colors for light terminal backgrounds.
    pub fn light() -> Self {
        Self::new()
            .add(Classification::Bracket, Style::new().blue())
            .add(Classification::ElementName, Style::new().red())
            .add(Classification::AttributeName, Style::new().magenta())
            .add(Classification::Quote, Style::new().blue())
            .add(Classification::Text, Style::new().black())
    }

    /// Colors for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self::new()
            .add(Classification::Bracket, Style::new().cyan())
            .add(Classification::ElementName, Style::new().yellow().bold())
            .add(Classification::AttributeName, Style::new().magenta())
            .add(Classification::Quote, Style::new().cyan())
            .add(Classification::Text, Style::new().white())
    }

    /// Replaces styles with dotted style strings such as `"red.bold"`.
    pub fn with_overrides(mut self, overrides: &BTreeMap<Classification, String>) -> Self {
        for (classification, dotted) in overrides {
            self.styles
                .insert(*classification, Style::from_dotted_str(dotted));
        }
        self
    }

    /// Renders one run. Without color, or without a style for the run's
    /// classification, the text comes back unchanged.
    pub fn paint(&self, run: &StyledRun, use_color: bool) -> String {
        match self.style(run.classification) {
            Some(style) if use_color && !run.text.trim().is_empty() => style
                .clone()
                .force_styling(true)
                .apply_to(&run.text)
                .to_string(),
            _ => run.text.clone(),
        }
    }

    /// Renders one run as `[name]text[/name]`, for inspecting classifications.
    pub fn paint_debug(&self, run: &StyledRun) -> String {
        if run.classification == Classification::Plain || run.text.trim().is_empty() {
            return run.text.clone();
        }
        let name = run.classification.as_str();
        format!("[{name}]{}[/{name}]", run.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_add_replaces() {
        let theme = Theme::new()
            .add(Classification::Quote, Style::new().red())
            .add(Classification::Quote, Style::new().green());
        assert_eq!(theme.len(), 1);
    }

    #[test]
    fn test_presets_cover_markup_classifications() {
        for theme in [Theme::light(), Theme::dark()] {
            for classification in Classification::ALL {
                let styled = theme.style(classification).is_some();
                assert_eq!(styled, classification != Classification::Plain);
            }
        }
    }

    #[test]
    fn test_paint_without_color_is_plain() {
        let run = StyledRun::new("Style", Classification::ElementName);
        assert_eq!(Theme::dark().paint(&run, false), "Style");
    }

    #[test]
    fn test_paint_with_color_emits_ansi() {
        let theme = Theme::new().add(Classification::ElementName, Style::new().red());
        let run = StyledRun::new("Style", Classification::ElementName);
        let painted = theme.paint(&run, true);
        assert!(painted.contains("\x1b[31m"));
        assert!(painted.contains("Style"));
    }

    #[test]
    fn test_paint_leaves_whitespace_alone() {
        let run = StyledRun::new("        ", Classification::Text);
        assert_eq!(Theme::light().paint(&run, true), "        ");
    }

    #[test]
    fn test_overrides_use_dotted_styles() {
        let overrides = BTreeMap::from([(Classification::Quote, "green.bold".to_string())]);
        let theme = Theme::new().with_overrides(&overrides);
        let run = StyledRun::new("\"", Classification::Quote);
        let painted = theme.paint(&run, true);
        assert!(painted.contains("\x1b[32m"));
        assert!(painted.contains("\x1b[1m"));
    }

    #[test]
    fn test_paint_debug_tags() {
        let theme = Theme::new();
        let run = StyledRun::new("Value", Classification::AttributeName);
        assert_eq!(
            theme.paint_debug(&run),
            "[attribute_name]Value[/attribute_name]"
        );
        assert_eq!(theme.paint_debug(&StyledRun::plain("\n")), "\n");
    }
}
