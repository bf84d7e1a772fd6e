//! Semantic simplification of serialized styles.
//!
//! Style serializers write every value in its most verbose form. Two rewrites
//! shorten the output without losing information:
//!
//! - **Empty resources**: `<X.Resources><ResourceDictionary /></X.Resources>`
//!   under an element `X` is removed.
//! - **Value collapsing**: `<X.Value>` holding a single recognised value
//!   element is replaced by a `Value` attribute on `X`.
//!
//! | value element | attribute text |
//! |---------------|----------------|
//! | `SolidColorBrush` | its text |
//! | `DynamicResource` / `StaticResource` | `{DynamicResource key}` / `{StaticResource key}` |
//! | primitive (`s:Double`, `s:String`, ...) | its text |
//! | `Thickness` | its text, in shorthand form |
//! | `x:Static` | last dotted segment of `Member` |
//!
//! Both rewrites only ever remove elements, and they are applied until the
//! tree stops changing, so [`simplify`] is idempotent. Sibling order is never
//! changed.

use crate::error::MarkupError;
use crate::node::{MarkupDocument, MarkupNode};
use crate::thickness::simplify_thickness;

/// Parses, rewrites and writes back `markup`.
///
/// # Example
///
/// ```rust
/// use snooper_markup::simplify;
///
/// let out = simplify("<Button><Button.Resources><ResourceDictionary /></Button.Resources></Button>").unwrap();
/// assert_eq!(out, "<Button/>");
/// ```
///
/// # Errors
///
/// Returns an error when `markup` is not a well-formed single-root document.
pub fn simplify(markup: &str) -> Result<String, MarkupError> {
    let mut document = MarkupDocument::parse(markup)?;
    rewrite(&mut document);
    document.to_markup()
}

/// Applies both rewrites to the whole tree until nothing changes.
///
/// Returns the number of rewrites performed.
pub fn rewrite(document: &mut MarkupDocument) -> usize {
    let mut total = 0;
    loop {
        let applied = prune_empty_resources(&mut document.root) + collapse_values(&mut document.root);
        if applied == 0 {
            return total;
        }
        total += applied;
    }
}

fn prune_empty_resources(node: &mut MarkupNode) -> usize {
    let mut applied = 0;
    let wrapper = format!("{}.Resources", node.local_name());
    if let Some(index) = node.child_position(&wrapper) {
        if holds_only_empty_dictionary(&node.children[index]) {
            node.children.remove(index);
            applied += 1;
        }
    }
    applied
        + node
            .children
            .iter_mut()
            .map(prune_empty_resources)
            .sum::<usize>()
}

fn holds_only_empty_dictionary(wrapper: &MarkupNode) -> bool {
    match wrapper.children.as_slice() {
        [dictionary] => dictionary.local_name() == "ResourceDictionary" && dictionary.is_empty(),
        _ => false,
    }
}

fn collapse_values(node: &mut MarkupNode) -> usize {
    let mut applied = 0;
    let wrapper = format!("{}.Value", node.local_name());
    if let Some(index) = node.child_position(&wrapper) {
        let derived = match node.children[index].children.as_slice() {
            [value] => derive_value(value),
            _ => None,
        };
        if let Some(value) = derived {
            node.children.remove(index);
            node.set_attribute("Value", value);
            applied += 1;
        }
    }
    applied
        + node
            .children
            .iter_mut()
            .map(collapse_values)
            .sum::<usize>()
}

/// Attribute text for a value element, or `None` when it has no compact form.
fn derive_value(element: &MarkupNode) -> Option<String> {
    let text = || element.text_content.clone().unwrap_or_default();

    if element.is_xaml() {
        if element.local_name() != "Static" {
            return None;
        }
        return element
            .attribute("Member")
            .and_then(|member| member.rsplit('.').next())
            .map(str::to_string);
    }
    if element.is_primitive() {
        return Some(text());
    }
    if !element.is_presentation() {
        return None;
    }

    match element.local_name() {
        "SolidColorBrush" => Some(text()),
        "DynamicResource" | "StaticResource" => Some(format!(
            "{{{} {}}}",
            element.local_name(),
            element.attribute("ResourceKey").unwrap_or_default()
        )),
        "Thickness" => Some(simplify_thickness(&text())),
        _ => None,
    }
}
