//! Turning a resolved style into markup.
//!
//! The output is deliberately verbose: every non-literal value is written as
//! a `Setter.Value` property element and a `Style.Resources` dictionary is
//! always present. `snooper_markup::simplify` folds those back down for
//! display.

use serde::Serialize;
use snooper_markup::{
    MarkupDocument, MarkupError, MarkupNode, PRESENTATION_NAMESPACE, PRIMITIVES_NAMESPACE,
    XAML_NAMESPACE,
};

use super::model::{ObjectElement, Resource, ResourceDictionary, Setter, Style, Trigger, Value};
use super::scope::ResourceScope;
use crate::catalog::StyleDescriptor;
use crate::names::{ResourceKey, TypeName};

/// Shown when a descriptor has no key or the key does not resolve to a style.
pub const STYLE_NOT_FOUND: &str = "[Style not found]";

/// Prefix of the text shown when a style could not be written.
pub const SERIALIZATION_FAILED: &str = "[Exception thrown while serializing style]";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    #[error("cannot serialize value of type '{type_name}' for property '{property}'")]
    UnsupportedValue {
        property: String,
        type_name: TypeName,
    },

    #[error(transparent)]
    Write(#[from] MarkupError),
}

/// Outcome of serializing one descriptor. Failures carry display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializedStyle {
    pub success: bool,
    pub text: String,
}

impl SerializedStyle {
    pub fn not_found() -> Self {
        Self {
            success: false,
            text: STYLE_NOT_FOUND.to_string(),
        }
    }

    pub fn failed(error: &SerializeError) -> Self {
        Self {
            success: false,
            text: format!("{SERIALIZATION_FAILED}\n\n{error}"),
        }
    }
}

/// Resolves descriptors against a resource scope and writes their styles.
#[derive(Debug, Clone, Copy)]
pub struct StyleSerializer<'a, S: ResourceScope + ?Sized> {
    scope: &'a S,
}

impl<'a, S: ResourceScope + ?Sized> StyleSerializer<'a, S> {
    pub fn new(scope: &'a S) -> Self {
        Self { scope }
    }

    /// Never fails; problems come back as placeholder text.
    pub fn serialize(&self, descriptor: &StyleDescriptor) -> SerializedStyle {
        let Some(key) = &descriptor.resource_key else {
            log::debug!(
                target: "snooper::serialize",
                "{} has no resource key",
                descriptor.display_name
            );
            return SerializedStyle::not_found();
        };
        let Some(style) = self.scope.find_style(key) else {
            log::debug!(
                target: "snooper::serialize",
                "no style registered under '{key}' for {}",
                descriptor.display_name
            );
            return SerializedStyle::not_found();
        };

        match serialize_style(style) {
            Ok(text) => SerializedStyle {
                success: true,
                text,
            },
            Err(err) => {
                log::warn!(
                    target: "snooper::serialize",
                    "failed to serialize {}: {err}",
                    descriptor.display_name
                );
                SerializedStyle::failed(&err)
            }
        }
    }
}

/// Writes a style as a standalone markup document.
pub fn serialize_style(style: &Style) -> Result<String, SerializeError> {
    let mut root = style_element(style, None)?;
    root.set_attribute("xmlns", PRESENTATION_NAMESPACE);
    root.set_attribute("xmlns:x", XAML_NAMESPACE);
    root.set_attribute("xmlns:s", PRIMITIVES_NAMESPACE);
    Ok(MarkupDocument::new(root).to_markup()?)
}

fn element(name: &str) -> MarkupNode {
    MarkupNode::new(name).with_namespace(PRESENTATION_NAMESPACE)
}

fn style_element(style: &Style, key: Option<&ResourceKey>) -> Result<MarkupNode, SerializeError> {
    let mut node = element("Style");
    if let Some(key) = key {
        node.set_attribute("x:Key", key.as_str());
    }
    if let Some(target_type) = &style.target_type {
        node.set_attribute("TargetType", target_type.as_str());
    }

    if let Some(based_on) = &style.based_on {
        node.children
            .push(element("Style.BasedOn").with_child(value_element(based_on, "BasedOn")?));
    }

    node.children.push(
        element("Style.Resources").with_child(dictionary_element(&style.resources)?),
    );

    for setter in &style.setters {
        node.children.push(setter_element(setter)?);
    }

    if !style.triggers.is_empty() {
        let mut triggers = element("Style.Triggers");
        for trigger in &style.triggers {
            triggers.children.push(trigger_element(trigger)?);
        }
        node.children.push(triggers);
    }

    Ok(node)
}

fn dictionary_element(dictionary: &ResourceDictionary) -> Result<MarkupNode, SerializeError> {
    let mut node = element("ResourceDictionary");
    for (key, resource) in dictionary.iter() {
        let entry = match resource {
            Resource::Style(style) => style_element(style, Some(key))?,
            Resource::Other(type_name) => {
                element(type_name.as_str()).with_attribute("x:Key", key.as_str())
            }
        };
        node.children.push(entry);
    }
    Ok(node)
}

fn setter_element(setter: &Setter) -> Result<MarkupNode, SerializeError> {
    let mut node = element("Setter").with_attribute("Property", setter.property.as_str());
    if let Some(target_name) = &setter.target_name {
        node.set_attribute("TargetName", target_name.as_str());
    }
    match &setter.value {
        Value::Literal(text) => node.set_attribute("Value", text.as_str()),
        value => node.children.push(
            element("Setter.Value").with_child(value_element(value, &setter.property)?),
        ),
    }
    Ok(node)
}

fn trigger_element(trigger: &Trigger) -> Result<MarkupNode, SerializeError> {
    let mut node = element("Trigger")
        .with_attribute("Property", trigger.property.as_str())
        .with_attribute("Value", trigger.value.as_str());
    for setter in &trigger.setters {
        node.children.push(setter_element(setter)?);
    }
    Ok(node)
}

fn value_element(value: &Value, property: &str) -> Result<MarkupNode, SerializeError> {
    let node = match value {
        Value::Literal(text) => MarkupNode::new("s:String")
            .with_namespace(PRIMITIVES_NAMESPACE)
            .with_text(text.as_str()),
        Value::Primitive { type_name, value } => MarkupNode::new(format!("s:{type_name}"))
            .with_namespace(PRIMITIVES_NAMESPACE)
            .with_text(value.as_str()),
        Value::SolidColorBrush(color) => element("SolidColorBrush").with_text(color.as_str()),
        Value::Thickness(text) => element("Thickness").with_text(text.as_str()),
        Value::DynamicResource(key) => {
            element("DynamicResource").with_attribute("ResourceKey", key.as_str())
        }
        Value::StaticResource(key) => {
            element("StaticResource").with_attribute("ResourceKey", key.as_str())
        }
        Value::Static(member) => MarkupNode::new("x:Static")
            .with_namespace(XAML_NAMESPACE)
            .with_attribute("Member", member.as_str()),
        Value::Element(object) => object_element(object),
        Value::Unsupported(type_name) => {
            return Err(SerializeError::UnsupportedValue {
                property: property.to_string(),
                type_name: type_name.clone(),
            })
        }
    };
    Ok(node)
}

fn object_element(object: &ObjectElement) -> MarkupNode {
    let mut node = element(&object.type_name);
    for (name, value) in &object.properties {
        node.set_attribute(name.as_str(), value.as_str());
    }
    node.children = object.content.iter().map(object_element).collect();
    node.text_content = object.text.clone();
    node
}
