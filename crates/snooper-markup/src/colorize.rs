//! Syntax-classified pretty printing.
//!
//! The colorizer turns markup into a flat sequence of [`StyledRun`]s. Each run
//! carries a [`Classification`] that a display surface maps to a visual
//! treatment; line breaks and indentation are ordinary runs, so concatenating
//! every run's text reproduces the pretty-printed markup.
//!
//! # Layout rules
//!
//! - A start tag is indented by four spaces per open element, followed by
//!   `<`, the element name and its attributes in document order.
//! - An empty element ends with ` />` and leaves the depth unchanged; any
//!   other start tag ends with `>` and opens a level.
//! - Text is indented at the current depth, i.e. after any preceding close.
//! - A closing tag first closes the level, then is indented.
//!
//! Two attribute values get special treatment: `TargetType` is shown as a
//! `{x:Type ...}` extension and `Margin`/`Padding` (and the text of a
//! `Thickness` element) are shown in shorthand form.
//!
//! The same state machine is driven either by a `quick-xml` event stream
//! ([`colorize`]) or by an owned tree ([`colorize_document`]).

use quick_xml::events::Event;
use serde::{Deserialize, Serialize};

use crate::error::MarkupError;
use crate::node::{MarkupDocument, MarkupNode};
use crate::parse::{read_start, reader};
use crate::thickness::simplify_thickness;
use crate::write::INDENT_WIDTH;

/// Syntactic role of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// `<`, `</`, `>`, ` />` and `=`.
    Bracket,
    ElementName,
    AttributeName,
    Quote,
    /// Attribute values, text content and indentation.
    Text,
    /// Unclassified: line breaks and failure messages.
    Plain,
}

impl Classification {
    /// All classifications in declaration order.
    pub const ALL: [Classification; 6] = [
        Classification::Bracket,
        Classification::ElementName,
        Classification::AttributeName,
        Classification::Quote,
        Classification::Text,
        Classification::Plain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Bracket => "bracket",
            Classification::ElementName => "element_name",
            Classification::AttributeName => "attribute_name",
            Classification::Quote => "quote",
            Classification::Text => "text",
            Classification::Plain => "plain",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of text with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    pub classification: Classification,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, classification: Classification) -> Self {
        Self {
            text: text.into(),
            classification,
        }
    }

    /// An unclassified run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Classification::Plain)
    }

    pub fn is_line_break(&self) -> bool {
        self.classification == Classification::Plain && self.text == "\n"
    }
}

/// Runs shown in place of markup when serialization failed.
pub fn failure_runs(message: &str) -> Vec<StyledRun> {
    vec![StyledRun::plain(message)]
}

/// Concatenates the text of every run.
pub fn runs_to_string(runs: &[StyledRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

/// Layout switches for the colorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorizeOptions {
    /// Put every attribute after the first on its own line, aligned under the
    /// first one.
    pub align_attributes: bool,
}

/// Streaming state machine producing styled runs.
#[derive(Debug)]
pub struct Colorizer {
    options: ColorizeOptions,
    runs: Vec<StyledRun>,
    depth: usize,
    /// Local names of the currently open elements.
    open: Vec<String>,
    root_closed: bool,
}

impl Colorizer {
    pub fn new(options: ColorizeOptions) -> Self {
        Self {
            options,
            runs: Vec::new(),
            depth: 0,
            open: Vec::new(),
            root_closed: false,
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Emits a start tag; `is_empty` marks a self-closing element.
    pub fn start_element<'a, I>(
        &mut self,
        name: &str,
        attributes: I,
        is_empty: bool,
    ) -> Result<(), MarkupError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        if self.root_closed {
            return Err(MarkupError::MultipleRoots);
        }

        self.indent(self.depth);
        self.push("<", Classification::Bracket);
        self.push(name, Classification::ElementName);

        let continuation = INDENT_WIDTH * self.depth + name.len() + 1;
        for (index, (attribute, value)) in attributes.into_iter().enumerate() {
            if index > 0 && self.options.align_attributes {
                self.line_break();
                self.push(" ".repeat(continuation), Classification::Text);
            }
            self.push(format!(" {attribute}"), Classification::AttributeName);
            self.push("=", Classification::Bracket);
            self.push("\"", Classification::Quote);
            self.push(display_value(attribute, value), Classification::Text);
            self.push("\"", Classification::Quote);
        }

        if is_empty {
            self.push(" />", Classification::Bracket);
            self.line_break();
            self.root_closed = self.depth == 0;
        } else {
            self.push(">", Classification::Bracket);
            self.line_break();
            self.depth += 1;
            self.open.push(local_name(name).to_string());
        }
        Ok(())
    }

    /// Emits text content at the current depth.
    pub fn text(&mut self, text: &str) {
        let value = if self.open.last().is_some_and(|name| name == "Thickness") {
            simplify_thickness(text)
        } else {
            text.to_string()
        };
        self.indent(self.depth);
        self.push(value, Classification::Text);
        self.line_break();
    }

    /// Emits a closing tag.
    pub fn end_element(&mut self, name: &str) -> Result<(), MarkupError> {
        if self.depth == 0 {
            return Err(MarkupError::UnexpectedClose {
                tag_name: name.to_string(),
            });
        }
        self.depth -= 1;
        self.open.pop();

        self.indent(self.depth);
        self.push("</", Classification::Bracket);
        self.push(name, Classification::ElementName);
        self.push(">", Classification::Bracket);
        self.line_break();
        self.root_closed = self.depth == 0;
        Ok(())
    }

    /// Returns the runs, checking that every element was closed.
    pub fn finish(self) -> Result<Vec<StyledRun>, MarkupError> {
        if self.depth != 0 {
            return Err(MarkupError::Unbalanced { depth: self.depth });
        }
        if !self.root_closed {
            return Err(MarkupError::NoRoot);
        }
        Ok(self.runs)
    }

    fn indent(&mut self, depth: usize) {
        if depth > 0 {
            self.push(" ".repeat(INDENT_WIDTH * depth), Classification::Text);
        }
    }

    fn line_break(&mut self) {
        self.runs.push(StyledRun::plain("\n"));
    }

    fn push(&mut self, text: impl Into<String>, classification: Classification) {
        self.runs.push(StyledRun::new(text, classification));
    }
}

fn local_name(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, local)| local)
}

fn display_value(attribute: &str, value: &str) -> String {
    match attribute {
        "TargetType" if !value.starts_with('{') => format!("{{x:Type {value}}}"),
        "Margin" | "Padding" => simplify_thickness(value),
        _ => value.to_string(),
    }
}

/// Colorizes markup text in a single forward pass.
///
/// # Errors
///
/// Returns an error for malformed markup or when the element structure does
/// not return to depth 0.
pub fn colorize(markup: &str) -> Result<Vec<StyledRun>, MarkupError> {
    colorize_with(markup, ColorizeOptions::default())
}

/// Like [`colorize`], with explicit layout options.
pub fn colorize_with(markup: &str, options: ColorizeOptions) -> Result<Vec<StyledRun>, MarkupError> {
    let mut reader = reader(markup);
    let mut colorizer = Colorizer::new(options);

    loop {
        let position = reader.buffer_position() as u64;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(MarkupError::syntax(position, err)),
        };

        match event {
            Event::Start(start) => {
                let (name, attributes) = read_start(&start, position)?;
                colorizer.start_element(&name, pairs(&attributes), false)?;
            }
            Event::Empty(start) => {
                let (name, attributes) = read_start(&start, position)?;
                colorizer.start_element(&name, pairs(&attributes), true)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| MarkupError::syntax(position, err))?;
                if colorizer.depth() == 0 {
                    return Err(MarkupError::syntax(position, "text outside of the root element"));
                }
                colorizer.text(&value);
            }
            Event::CData(data) => {
                colorizer.text(&String::from_utf8_lossy(&data.into_inner()));
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                colorizer.end_element(&name)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    colorizer.finish()
}

/// Colorizes a tree, consuming it.
pub fn colorize_document(
    document: MarkupDocument,
    options: ColorizeOptions,
) -> Result<Vec<StyledRun>, MarkupError> {
    let mut colorizer = Colorizer::new(options);
    visit(&mut colorizer, &document.root)?;
    colorizer.finish()
}

fn visit(colorizer: &mut Colorizer, node: &MarkupNode) -> Result<(), MarkupError> {
    let attributes = node
        .attributes
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()));
    colorizer.start_element(&node.tag_name, attributes, node.is_empty())?;
    if node.is_empty() {
        return Ok(());
    }
    if let Some(text) = &node.text_content {
        colorizer.text(text);
    }
    for child in &node.children {
        visit(colorizer, child)?;
    }
    colorizer.end_element(&node.tag_name)
}

fn pairs(attributes: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    attributes
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(runs: &[StyledRun]) -> Vec<&str> {
        runs.iter().map(|run| run.text.as_str()).collect()
    }

    #[test]
    fn test_empty_root_element() {
        let runs = colorize("<Button/>").unwrap();
        assert_eq!(texts(&runs), vec!["<", "Button", " />", "\n"]);
        assert_eq!(runs[0].classification, Classification::Bracket);
        assert_eq!(runs[1].classification, Classification::ElementName);
        assert!(runs[3].is_line_break());
    }

    #[test]
    fn test_attribute_runs() {
        let runs = colorize(r#"<Setter Property="Margin" Value="4" />"#).unwrap();
        assert_eq!(
            texts(&runs),
            vec![
                "<", "Setter", " Property", "=", "\"", "Margin", "\"", " Value", "=", "\"", "4",
                "\"", " />", "\n"
            ]
        );
        assert_eq!(runs[7].classification, Classification::AttributeName);
        assert_eq!(runs[8].classification, Classification::Bracket);
        assert_eq!(runs[9].classification, Classification::Quote);
        assert_eq!(runs[10].classification, Classification::Text);
    }

    #[test]
    fn test_nested_indentation() {
        let runs = colorize("<Style><Setter /><Style.Triggers><Trigger /></Style.Triggers></Style>").unwrap();
        let text = runs_to_string(&runs);
        assert_eq!(
            text,
            "<Style>\n    <Setter />\n    <Style.Triggers>\n        <Trigger />\n    </Style.Triggers>\n</Style>\n"
        );
    }

    #[test]
    fn test_text_indented_after_open() {
        let runs = colorize("<SolidColorBrush>#FF000000</SolidColorBrush>").unwrap();
        assert_eq!(
            runs_to_string(&runs),
            "<SolidColorBrush>\n    #FF000000\n</SolidColorBrush>\n"
        );
    }

    #[test]
    fn test_target_type_wrapped() {
        let runs = colorize(r#"<Style TargetType="Button" />"#).unwrap();
        assert!(texts(&runs).contains(&"{x:Type Button}"));
    }

    #[test]
    fn test_target_type_extension_not_wrapped_twice() {
        let runs = colorize(r#"<Style TargetType="{x:Type Button}" />"#).unwrap();
        assert!(texts(&runs).contains(&"{x:Type Button}"));
        assert!(!runs_to_string(&runs).contains("{x:Type {x:Type"));
    }

    #[test]
    fn test_margin_and_padding_simplified() {
        let runs = colorize(r#"<Border Margin="4,4,4,4" Padding="2,5,2,5" Tag="1,1,1,1" />"#).unwrap();
        let values = texts(&runs);
        assert!(values.contains(&"4"));
        assert!(values.contains(&"2,5"));
        assert!(values.contains(&"1,1,1,1"));
    }

    #[test]
    fn test_thickness_text_simplified() {
        let runs = colorize("<Thickness>3,3,3,3</Thickness>").unwrap();
        assert!(texts(&runs).contains(&"3"));
    }

    #[test]
    fn test_aligned_attributes() {
        let options = ColorizeOptions {
            align_attributes: true,
        };
        let runs = colorize_with(r#"<Style><Setter Property="A" Value="1" /></Style>"#, options).unwrap();
        assert_eq!(
            runs_to_string(&runs),
            "<Style>\n    <Setter Property=\"A\"\n            Value=\"1\" />\n</Style>\n"
        );
    }

    #[test]
    fn test_document_and_stream_agree() {
        let source = r#"<Style TargetType="Button"><Setter Property="Margin" Value="4" /><Setter Property="Template"><Setter.Value><ControlTemplate><Border /></ControlTemplate></Setter.Value></Setter></Style>"#;
        let streamed = colorize(source).unwrap();
        let document = MarkupDocument::parse(source).unwrap();
        let walked = colorize_document(document, ColorizeOptions::default()).unwrap();
        assert_eq!(streamed, walked);
    }

    #[test]
    fn test_unbalanced_close_rejected() {
        let mut colorizer = Colorizer::new(ColorizeOptions::default());
        assert!(colorizer.end_element("Style").is_err());
    }

    #[test]
    fn test_unfinished_stream_rejected() {
        let mut colorizer = Colorizer::new(ColorizeOptions::default());
        colorizer
            .start_element("Style", std::iter::empty(), false)
            .unwrap();
        assert_eq!(
            colorizer.finish().unwrap_err(),
            MarkupError::Unbalanced { depth: 1 }
        );
    }

    #[test]
    fn test_second_root_rejected() {
        assert_eq!(
            colorize("<A /><B />").unwrap_err(),
            MarkupError::MultipleRoots
        );
    }

    #[test]
    fn test_failure_runs_single_plain() {
        let runs = failure_runs("[Style not found]");
        assert_eq!(runs, vec![StyledRun::plain("[Style not found]")]);
    }
}
