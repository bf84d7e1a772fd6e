//! Markup parsing on top of `quick-xml`.
//!
//! The reader is configured to trim whitespace-only text, so indentation
//! written by the serializer never shows up as text content. Namespace
//! declarations are kept as ordinary attributes (they must survive a
//! write-back) and are also tracked on a scope stack so every element can be
//! tagged with the namespace URI its prefix resolves to.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::MarkupError;
use crate::node::{MarkupDocument, MarkupNode};

#[derive(Debug, Clone, Default)]
struct NamespaceScope {
    default: Option<String>,
    prefixes: HashMap<String, String>,
}

impl NamespaceScope {
    fn resolve(&self, tag_name: &str) -> Option<String> {
        match tag_name.split_once(':') {
            Some((prefix, _)) => self.prefixes.get(prefix).cloned(),
            None => self.default.clone(),
        }
    }
}

/// Creates a reader over `source` with the configuration shared by the
/// parser and the streaming colorizer.
pub(crate) fn reader(source: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);
    reader
}

/// Reads the name and attributes of a start tag, unescaping values.
pub(crate) fn read_start(
    start: &BytesStart<'_>,
    position: u64,
) -> Result<(String, Vec<(String, String)>), MarkupError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|err| MarkupError::syntax(position, err))?
        .to_string();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| MarkupError::syntax(position, err))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|err| MarkupError::syntax(position, err))?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|err| MarkupError::syntax(position, err))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok((name, attributes))
}

pub(crate) fn parse_document(source: &str) -> Result<MarkupDocument, MarkupError> {
    let mut reader = reader(source);
    let mut scopes = vec![NamespaceScope::default()];
    let mut open: Vec<MarkupNode> = Vec::new();
    let mut root: Option<MarkupNode> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(MarkupError::syntax(position, err)),
        };

        match event {
            Event::Start(start) => {
                let node = open_element(&start, position, &mut scopes)?;
                open.push(node);
            }
            Event::Empty(start) => {
                let node = open_element(&start, position, &mut scopes)?;
                scopes.pop();
                attach(node, &mut open, &mut root)?;
            }
            Event::End(end) => {
                let node = open.pop().ok_or_else(|| MarkupError::UnexpectedClose {
                    tag_name: String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                })?;
                scopes.pop();
                attach(node, &mut open, &mut root)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| MarkupError::syntax(position, err))?;
                push_text(&mut open, &value, position)?;
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&mut open, &value, position)?;
            }
            Event::Eof => break,
            // Declarations, comments and processing instructions carry no style data.
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(MarkupError::Unclosed {
            tag_name: unclosed.tag_name.clone(),
        });
    }

    root.map(MarkupDocument::new).ok_or(MarkupError::NoRoot)
}

fn open_element(
    start: &BytesStart<'_>,
    position: u64,
    scopes: &mut Vec<NamespaceScope>,
) -> Result<MarkupNode, MarkupError> {
    let (tag_name, attributes) = read_start(start, position)?;

    let mut scope = scopes.last().cloned().unwrap_or_default();
    for (key, value) in &attributes {
        if key == "xmlns" {
            scope.default = Some(value.clone());
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            scope.prefixes.insert(prefix.to_string(), value.clone());
        }
    }

    let node = MarkupNode {
        namespace: scope.resolve(&tag_name),
        tag_name,
        attributes: attributes.into_iter().collect(),
        children: Vec::new(),
        text_content: None,
    };
    scopes.push(scope);
    Ok(node)
}

fn attach(
    node: MarkupNode,
    open: &mut [MarkupNode],
    root: &mut Option<MarkupNode>,
) -> Result<(), MarkupError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => return Err(MarkupError::MultipleRoots),
        None => *root = Some(node),
    }
    Ok(())
}

fn push_text(open: &mut [MarkupNode], text: &str, position: u64) -> Result<(), MarkupError> {
    let Some(parent) = open.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(MarkupError::syntax(
            position,
            "text outside of the root element",
        ));
    };
    match parent.text_content.as_mut() {
        Some(existing) => existing.push_str(text),
        None => parent.text_content = Some(text.to_string()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{PRESENTATION_NAMESPACE, PRIMITIVES_NAMESPACE, XAML_NAMESPACE};

    #[test]
    fn test_parse_nested_elements_in_order() {
        let doc = MarkupDocument::parse(
            r#"<Style TargetType="Button" BasedOn="x"><Setter Property="A" /><Setter Property="B" /></Style>"#,
        )
        .unwrap();

        assert_eq!(doc.root.tag_name, "Style");
        let names: Vec<&str> = doc.root.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["TargetType", "BasedOn"]);
        let properties: Vec<&str> = doc
            .root
            .children
            .iter()
            .filter_map(|child| child.attribute("Property"))
            .collect();
        assert_eq!(properties, vec!["A", "B"]);
    }

    #[test]
    fn test_parse_resolves_namespaces() {
        let source = format!(
            r#"<Style xmlns="{PRESENTATION_NAMESPACE}" xmlns:x="{XAML_NAMESPACE}" xmlns:s="{PRIMITIVES_NAMESPACE}"><s:Double>1</s:Double><x:Static Member="A.B" /></Style>"#
        );
        let doc = MarkupDocument::parse(&source).unwrap();

        assert_eq!(doc.root.namespace.as_deref(), Some(PRESENTATION_NAMESPACE));
        assert!(doc.root.children[0].is_primitive());
        assert!(doc.root.children[1].is_xaml());
        // Declarations stay as attributes so they survive a write-back.
        assert!(doc.root.attribute("xmlns:s").is_some());
    }

    #[test]
    fn test_parse_trims_indentation_text() {
        let doc = MarkupDocument::parse("<Thickness>\n    4,4,4,4\n</Thickness>").unwrap();
        assert_eq!(doc.root.text_content.as_deref(), Some("4,4,4,4"));
    }

    #[test]
    fn test_parse_unescapes_values() {
        let doc = MarkupDocument::parse(r#"<A Value="&lt;b&gt;">a &amp; b</A>"#).unwrap();
        assert_eq!(doc.root.attribute("Value"), Some("<b>"));
        assert_eq!(doc.root.text_content.as_deref(), Some("a & b"));
    }

    #[test]
    fn test_parse_rejects_multiple_roots() {
        let err = MarkupDocument::parse("<A /><B />").unwrap_err();
        assert_eq!(err, MarkupError::MultipleRoots);
    }

    #[test]
    fn test_parse_rejects_unclosed_element() {
        let err = MarkupDocument::parse("<A><B /></A><C>").unwrap_err();
        assert!(matches!(
            err,
            MarkupError::Unclosed { .. } | MarkupError::MultipleRoots | MarkupError::Syntax { .. }
        ));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!(MarkupDocument::parse("").unwrap_err(), MarkupError::NoRoot);
    }

    #[test]
    fn test_parse_rejects_mismatched_close() {
        assert!(MarkupDocument::parse("<A></B>").is_err());
    }

    #[test]
    fn test_parse_rejects_text_outside_root() {
        let err = MarkupDocument::parse("stray<A />").unwrap_err();
        assert!(matches!(err, MarkupError::Syntax { .. }));
    }
}
