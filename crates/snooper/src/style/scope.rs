//! Resource lookup.

use super::model::{Resource, ResourceDictionary, Style};
use crate::names::ResourceKey;

/// A table that resolves keys to resources.
pub trait ResourceScope {
    fn find_resource(&self, key: &ResourceKey) -> Option<&Resource>;

    /// Resolves a key to a style; non-style resources do not count.
    fn find_style(&self, key: &ResourceKey) -> Option<&Style> {
        match self.find_resource(key)? {
            Resource::Style(style) => Some(style),
            Resource::Other(_) => None,
        }
    }
}

impl ResourceScope for ResourceDictionary {
    fn find_resource(&self, key: &ResourceKey) -> Option<&Resource> {
        self.get(key)
    }
}

/// Dictionaries searched in order; the first one holding the key wins.
#[derive(Debug, Clone, Default)]
pub struct ScopeChain<'a> {
    layers: Vec<&'a ResourceDictionary>,
}

impl<'a> ScopeChain<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: &'a ResourceDictionary) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ResourceScope for ScopeChain<'_> {
    fn find_resource(&self, key: &ResourceKey) -> Option<&Resource> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}
