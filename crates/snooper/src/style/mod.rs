//! Styles, the scopes they are registered in, and their markup form.

mod model;
mod scope;
mod serialize;

pub use model::{ObjectElement, Resource, ResourceDictionary, Setter, Style, Trigger, Value};
pub use scope::{ResourceScope, ScopeChain};
pub use serialize::{
    serialize_style, SerializeError, SerializedStyle, StyleSerializer, SERIALIZATION_FAILED,
    STYLE_NOT_FOUND,
};
