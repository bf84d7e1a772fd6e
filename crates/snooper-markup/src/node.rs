//! Markup tree.

use indexmap::IndexMap;

use crate::error::MarkupError;
use crate::{parse, write};

/// Default namespace of presentation elements (`<Style>`, `<Setter>`, ...).
pub const PRESENTATION_NAMESPACE: &str =
    "http://schemas.microsoft.com/winfx/2006/xaml/presentation";

/// Namespace of markup language directives (`x:Key`, `x:Static`, ...).
pub const XAML_NAMESPACE: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

/// Namespace of boxed primitive values (`<s:Double>`, `<s:String>`, ...).
pub const PRIMITIVES_NAMESPACE: &str = "clr-namespace:System;assembly=mscorlib";

const PRIMITIVES_NAMESPACE_PREFIX: &str = "clr-namespace:System;";

/// One element of a parsed markup document.
///
/// Attributes keep the order they were written in. Replacing an existing
/// attribute keeps its position; a new attribute goes after the others.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupNode {
    /// Qualified name as written, e.g. `Setter` or `x:Static`.
    pub tag_name: String,
    /// Namespace URI the name resolved to, if any.
    pub namespace: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<MarkupNode>,
    pub text_content: Option<String>,
}

impl MarkupNode {
    /// Creates an element with no namespace, attributes or content.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// The tag name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.tag_name.split_once(':') {
            Some((_, local)) => local,
            None => &self.tag_name,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets an attribute, replacing in place or appending.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Index of the first child element with the given local name.
    ///
    /// First match only: later siblings with the same name are not looked at.
    pub fn child_position(&self, local_name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.local_name() == local_name)
    }

    pub fn child(&self, local_name: &str) -> Option<&MarkupNode> {
        self.child_position(local_name)
            .map(|index| &self.children[index])
    }

    /// `true` when the element has neither children nor text.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text_content.is_none()
    }

    /// `true` for elements of the presentation vocabulary, including
    /// unprefixed elements in documents that declare no namespace.
    pub fn is_presentation(&self) -> bool {
        match self.namespace.as_deref() {
            Some(namespace) => namespace == PRESENTATION_NAMESPACE,
            None => !self.tag_name.contains(':'),
        }
    }

    pub fn is_xaml(&self) -> bool {
        self.namespace.as_deref() == Some(XAML_NAMESPACE)
    }

    /// `true` for boxed primitives from any `System` assembly.
    pub fn is_primitive(&self) -> bool {
        self.namespace
            .as_deref()
            .is_some_and(|namespace| namespace.starts_with(PRIMITIVES_NAMESPACE_PREFIX))
    }

    /// Number of elements in this subtree, including the node itself.
    pub fn element_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(MarkupNode::element_count)
            .sum::<usize>()
    }
}

/// A markup document with exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    pub root: MarkupNode,
}

impl MarkupDocument {
    pub fn new(root: MarkupNode) -> Self {
        Self { root }
    }

    /// Parses markup text into a tree.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed input, unclosed elements, text outside
    /// the root, or a document with zero or several roots.
    pub fn parse(source: &str) -> Result<Self, MarkupError> {
        parse::parse_document(source)
    }

    /// Writes the tree back to text with four spaces per nesting level.
    pub fn to_markup(&self) -> Result<String, MarkupError> {
        write::write_document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_strips_prefix() {
        assert_eq!(MarkupNode::new("x:Static").local_name(), "Static");
        assert_eq!(MarkupNode::new("Setter.Value").local_name(), "Setter.Value");
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut node = MarkupNode::new("Setter")
            .with_attribute("Value", "1")
            .with_attribute("Property", "Margin");
        node.set_attribute("Value", "2");
        node.set_attribute("TargetName", "border");

        let names: Vec<&str> = node.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Value", "Property", "TargetName"]);
        assert_eq!(node.attribute("Value"), Some("2"));
    }

    #[test]
    fn test_child_lookup_by_local_name() {
        let node = MarkupNode::new("Style")
            .with_child(MarkupNode::new("Style.Resources"))
            .with_child(MarkupNode::new("Setter"));
        assert_eq!(node.child_position("Setter"), Some(1));
        assert!(node.child("Trigger").is_none());
    }

    #[test]
    fn test_namespace_classification() {
        let plain = MarkupNode::new("Thickness");
        assert!(plain.is_presentation());

        let unresolved = MarkupNode::new("s:Double");
        assert!(!unresolved.is_presentation());
        assert!(!unresolved.is_primitive());

        let boxed = MarkupNode::new("s:Double")
            .with_namespace("clr-namespace:System;assembly=System.Runtime");
        assert!(boxed.is_primitive());

        let directive = MarkupNode::new("x:Static").with_namespace(XAML_NAMESPACE);
        assert!(directive.is_xaml());
        assert!(!directive.is_presentation());
    }

    #[test]
    fn test_element_count() {
        let node = MarkupNode::new("Style").with_child(
            MarkupNode::new("Setter").with_child(MarkupNode::new("Setter.Value")),
        );
        assert_eq!(node.element_count(), 3);
    }
}
