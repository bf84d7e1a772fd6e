//! Style object graphs as registered in a resource scope.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::names::{ResourceKey, TypeName};

/// Something registered under a key in a resource scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Style(Style),
    /// Any non-style resource, known only by its type.
    Other(TypeName),
}

/// A keyed collection of resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDictionary {
    entries: BTreeMap<ResourceKey, Resource>,
}

impl ResourceDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<ResourceKey>, resource: Resource) -> Self {
        self.insert(key, resource);
        self
    }

    pub fn insert(&mut self, key: impl Into<ResourceKey>, resource: Resource) {
        self.entries.insert(key.into(), resource);
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&Resource> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKey, &Resource)> {
        self.entries.iter()
    }
}

/// A bundle of property setters applied to instances of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub target_type: Option<TypeName>,
    #[serde(default)]
    pub based_on: Option<Value>,
    #[serde(default)]
    pub resources: ResourceDictionary,
    #[serde(default)]
    pub setters: Vec<Setter>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

impl Style {
    pub fn new(target_type: impl Into<TypeName>) -> Self {
        Self {
            target_type: Some(target_type.into()),
            ..Self::default()
        }
    }

    pub fn based_on(mut self, value: Value) -> Self {
        self.based_on = Some(value);
        self
    }

    pub fn with_setter(mut self, setter: Setter) -> Self {
        self.setters.push(setter);
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn with_resources(mut self, resources: ResourceDictionary) -> Self {
        self.resources = resources;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setter {
    pub property: String,
    #[serde(default)]
    pub target_name: Option<String>,
    pub value: Value,
}

impl Setter {
    pub fn new(property: impl Into<String>, value: Value) -> Self {
        Self {
            property: property.into(),
            target_name: None,
            value,
        }
    }

    pub fn on(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = Some(target_name.into());
        self
    }
}

/// Setters applied while a property holds a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub property: String,
    pub value: String,
    #[serde(default)]
    pub setters: Vec<Setter>,
}

impl Trigger {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            setters: Vec::new(),
        }
    }

    pub fn with_setter(mut self, setter: Setter) -> Self {
        self.setters.push(setter);
        self
    }
}

/// The value side of a setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Text the markup writes straight into an attribute (enum names, ...).
    Literal(String),
    /// A boxed scalar such as a `Double` or `Boolean`.
    Primitive {
        #[serde(rename = "type")]
        type_name: String,
        value: String,
    },
    /// A brush given as a color, e.g. `#FF000000`.
    SolidColorBrush(String),
    /// `left,top,right,bottom`.
    Thickness(String),
    DynamicResource(ResourceKey),
    StaticResource(ResourceKey),
    /// A static member reference, e.g. `SystemColors.ControlBrush`.
    Static(String),
    /// A nested object such as a control template.
    Element(ObjectElement),
    /// A value the markup writer has no representation for.
    Unsupported(TypeName),
}

/// A generic object in a style graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectElement {
    pub type_name: String,
    /// Properties written as attributes, in order.
    #[serde(default)]
    pub properties: IndexMap<String, String>,
    #[serde(default)]
    pub content: Vec<ObjectElement>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ObjectElement {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: IndexMap::new(),
            content: Vec::new(),
            text: None,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_content(mut self, child: ObjectElement) -> Self {
        self.content.push(child);
        self
    }
}
