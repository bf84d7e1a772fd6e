//! Type universes: the metadata a catalog scan runs over.
//!
//! A module exposes a table of [`TypeInfo`] rows and the ability to create an
//! instance of any of them ([`TypeUniverse::instantiate`]). The catalog only
//! ever talks to this trait; [`ModuleManifest`] is the implementation backed
//! by a YAML or JSON manifest file.

mod error;
mod manifest;

pub use error::ModuleError;
pub use manifest::{ModuleManifest, MODULE_EXTENSIONS};

use serde::{Deserialize, Serialize};

use crate::names::{ResourceKey, TypeName};

/// Type name of static members holding a style key.
pub const RESOURCE_KEY_TYPE: &str = "ResourceKey";

/// Visibility of a type's parameterless constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constructor {
    #[default]
    Public,
    NonPublic,
    /// No parameterless constructor at all.
    #[serde(rename = "none")]
    Absent,
}

/// A static member declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMember {
    pub name: String,
    #[serde(rename = "type", default = "resource_key_type")]
    pub member_type: TypeName,
    #[serde(default)]
    pub value: Option<ResourceKey>,
}

fn resource_key_type() -> TypeName {
    TypeName::new(RESOURCE_KEY_TYPE)
}

impl StaticMember {
    pub fn new(name: impl Into<String>, value: impl Into<ResourceKey>) -> Self {
        Self {
            name: name.into(),
            member_type: resource_key_type(),
            value: Some(value.into()),
        }
    }

    /// `true` for members named `...StyleKey` whose type is the style-key type.
    pub fn is_style_key(&self) -> bool {
        self.name.ends_with("StyleKey") && self.member_type == *RESOURCE_KEY_TYPE
    }
}

/// One row of a module's type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: TypeName,
    #[serde(default)]
    pub base: Option<TypeName>,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
    /// Has open type parameters.
    #[serde(rename = "generic", default)]
    pub is_generic: bool,
    #[serde(default)]
    pub constructor: Constructor,
    #[serde(default)]
    pub default_style_key: Option<ResourceKey>,
    /// Static members in declaration order.
    #[serde(default)]
    pub static_members: Vec<StaticMember>,
    /// When set, creating the type fails with this message.
    #[serde(default)]
    pub instantiation_error: Option<String>,
}

impl TypeInfo {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            base: None,
            is_abstract: false,
            is_generic: false,
            constructor: Constructor::Public,
            default_style_key: None,
            static_members: Vec::new(),
            instantiation_error: None,
        }
    }

    pub fn with_base(mut self, base: impl Into<TypeName>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_default_style_key(mut self, key: impl Into<ResourceKey>) -> Self {
        self.default_style_key = Some(key.into());
        self
    }

    pub fn with_static_member(mut self, member: StaticMember) -> Self {
        self.static_members.push(member);
        self
    }

    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = constructor;
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn generic_type(mut self) -> Self {
        self.is_generic = true;
        self
    }

    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.instantiation_error = Some(message.into());
        self
    }

    pub fn has_default_constructor(&self) -> bool {
        self.constructor != Constructor::Absent
    }
}

/// A created instance, reduced to what a catalog scan reads from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub runtime_type: TypeName,
    pub default_style_key: Option<ResourceKey>,
    /// Static members of the runtime type, in declaration order.
    pub static_members: Vec<StaticMember>,
}

/// A universe of types that can be scanned for styles.
pub trait TypeUniverse {
    /// Display name of the module, used in notices and logs.
    fn module_name(&self) -> &str;

    /// The type table, in module order.
    fn types(&self) -> &[TypeInfo];

    /// Creates an instance through the parameterless constructor, public or not.
    fn instantiate(&self, type_name: &TypeName) -> Result<Instance, ModuleError>;
}
