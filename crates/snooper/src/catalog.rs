//! Discovering which types in a module carry a default style.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::module::{Instance, TypeInfo, TypeUniverse};
use crate::names::{ResourceKey, TypeName};

/// One browsable entry: a type's default style or an auxiliary style key it
/// exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDescriptor {
    /// The type name, or `Type.MemberName` for auxiliary keys.
    pub display_name: String,
    pub resource_key: Option<ResourceKey>,
    pub owner_type: TypeName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Only types deriving from this one are scanned.
    pub visual_base: TypeName,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            visual_base: TypeName::new("FrameworkElement"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    options: CatalogOptions,
}

impl TypeCatalog {
    pub fn new(options: CatalogOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Concrete, non-generic visual types with a parameterless constructor,
    /// ordered by name.
    pub fn candidates<'m, U: TypeUniverse + ?Sized>(&self, module: &'m U) -> Vec<&'m TypeInfo> {
        self.candidates_with_known(module, &[])
    }

    /// Like [`candidates`](Self::candidates), but base types missing from
    /// `module` are looked up in `known`, the type table of an already
    /// loaded module. The module's own declarations win.
    pub fn candidates_with_known<'m, U: TypeUniverse + ?Sized>(
        &self,
        module: &'m U,
        known: &[TypeInfo],
    ) -> Vec<&'m TypeInfo> {
        let mut by_name: HashMap<&TypeName, &TypeInfo> = known
            .iter()
            .map(|info| (&info.name, info))
            .collect();
        by_name.extend(module.types().iter().map(|info| (&info.name, info)));

        let mut candidates: Vec<&TypeInfo> = module
            .types()
            .iter()
            .filter(|info| {
                !info.is_abstract
                    && !info.is_generic
                    && info.has_default_constructor()
                    && self.is_visual(info, &by_name)
            })
            .collect();
        // Ordinal, so "ToolBar" sorts before "Toolkit".
        candidates.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        candidates
    }

    /// Lists every style descriptor the module offers.
    ///
    /// Types that cannot be instantiated are skipped.
    pub fn scan<U: TypeUniverse + ?Sized>(&self, module: &U) -> Vec<StyleDescriptor> {
        self.scan_with_known(module, &[])
    }

    /// Scans `module`, resolving base chains through `known` as well.
    /// Only types of `module` itself are listed.
    pub fn scan_with_known<U: TypeUniverse + ?Sized>(
        &self,
        module: &U,
        known: &[TypeInfo],
    ) -> Vec<StyleDescriptor> {
        let mut descriptors = Vec::new();
        for info in self.candidates_with_known(module, known) {
            match module.instantiate(&info.name) {
                Ok(instance) => describe(info, &instance, &mut descriptors),
                Err(err) => log::warn!(
                    target: "snooper::catalog",
                    "skipping {} in {}: {err}",
                    info.name,
                    module.module_name()
                ),
            }
        }
        log::debug!(
            target: "snooper::catalog",
            "{} descriptors in {}",
            descriptors.len(),
            module.module_name()
        );
        descriptors
    }

    fn is_visual(&self, info: &TypeInfo, by_name: &HashMap<&TypeName, &TypeInfo>) -> bool {
        let base = &self.options.visual_base;
        let mut seen = HashSet::new();
        let mut current = info;
        loop {
            if &current.name == base {
                return true;
            }
            if !seen.insert(&current.name) {
                log::debug!(target: "snooper::catalog", "base cycle at {}", current.name);
                return false;
            }
            let Some(parent) = &current.base else {
                return false;
            };
            if parent == base {
                return true;
            }
            match by_name.get(parent).copied() {
                Some(next) => current = next,
                None => return false,
            }
        }
    }
}

fn describe(info: &TypeInfo, instance: &Instance, out: &mut Vec<StyleDescriptor>) {
    if let Some(key) = &instance.default_style_key {
        out.push(StyleDescriptor {
            display_name: info.name.to_string(),
            resource_key: Some(key.clone()),
            owner_type: info.name.clone(),
        });
    } else {
        log::debug!(target: "snooper::catalog", "{} has no default style key", info.name);
    }

    for member in instance.static_members.iter().filter(|m| m.is_style_key()) {
        out.push(StyleDescriptor {
            display_name: format!("{}.{}", instance.runtime_type, member.name),
            resource_key: member.value.clone(),
            owner_type: info.name.clone(),
        });
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::module::ModuleManifest;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn scan_lists_every_keyed_type_in_order(
            names in proptest::collection::vec("[A-Za-z]{1,8}", 0..12)
        ) {
            let mut module = ModuleManifest::new("generated");
            for name in &names {
                module = module.with_type(
                    TypeInfo::new(name.as_str())
                        .with_base("FrameworkElement")
                        .with_default_style_key(name.as_str()),
                );
            }

            let descriptors = TypeCatalog::default().scan(&module);
            prop_assert_eq!(descriptors.len(), names.len());
            prop_assert!(descriptors
                .windows(2)
                .all(|pair| pair[0].display_name <= pair[1].display_name));
        }
    }
}
