//! Per-resource shaping state.
//!
//! A [`ShapingContext`] lives for exactly one top-level resource. Backends
//! record every enum and foreign resource they reference through it, and
//! the shaper turns those records into the resource's [`Imports`]. Nothing
//! is stored on the backend itself, so resources can be shaped in parallel.

use serde::Serialize;
use std::collections::BTreeSet;

/// Types a shaped resource pulls in from elsewhere, sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Imports {
    /// Global enum type names
    pub enums: Vec<String>,
    /// Other top-level resource type names
    pub resources: Vec<String>,
}

impl Imports {
    /// `true` when nothing is imported.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.resources.is_empty()
    }
}

/// Call-scoped state threaded through one resource's shaping.
#[derive(Debug, Default)]
pub struct ShapingContext {
    resource: String,
    sub_resources: Vec<String>,
    enums: BTreeSet<String>,
    resources: BTreeSet<String>,
}

impl ShapingContext {
    /// Starts shaping the resource with type name `resource`.
    #[must_use]
    pub fn for_resource(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Type name of the top-level resource being shaped.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Type name of the innermost sub-resource being shaped, if any.
    #[must_use]
    pub fn sub_resource(&self) -> Option<&str> {
        self.sub_resources.last().map(String::as_str)
    }

    /// Records a reference to a global enum type.
    pub fn reference_enum(&mut self, type_name: impl Into<String>) {
        self.enums.insert(type_name.into());
    }

    /// Records a reference to another top-level resource.
    ///
    /// Self-references are not imports and are ignored.
    pub fn reference_resource(&mut self, type_name: impl Into<String>) {
        let type_name = type_name.into();
        if type_name != self.resource {
            self.resources.insert(type_name);
        }
    }

    /// Runs `f` with `type_name` pushed as the active sub-resource.
    pub fn with_sub_resource<R>(&mut self, type_name: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.sub_resources.push(type_name.to_string());
        let result = f(self);
        self.sub_resources.pop();
        result
    }

    /// Consumes the context into the imports it collected.
    #[must_use]
    pub fn finish(self) -> Imports {
        Imports {
            enums: self.enums.into_iter().collect(),
            resources: self.resources.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imports_are_sorted_and_unique() {
        let mut ctx = ShapingContext::for_resource("Invoice");
        ctx.reference_resource("Subscription");
        ctx.reference_resource("Customer");
        ctx.reference_resource("Customer");
        ctx.reference_enum("AutoCollection");
        ctx.reference_enum("AutoCollection");

        let imports = ctx.finish();
        assert_eq!(imports.resources, vec!["Customer", "Subscription"]);
        assert_eq!(imports.enums, vec!["AutoCollection"]);
    }

    #[test]
    fn test_self_reference_is_not_imported() {
        let mut ctx = ShapingContext::for_resource("Customer");
        ctx.reference_resource("Customer");
        assert!(ctx.finish().is_empty());
    }

    #[test]
    fn test_sub_resource_scope_is_restored() {
        let mut ctx = ShapingContext::for_resource("Invoice");
        assert_eq!(ctx.sub_resource(), None);

        let seen = ctx.with_sub_resource("LineItem", |ctx| {
            ctx.with_sub_resource("Tax", |ctx| ctx.sub_resource().map(str::to_string))
        });

        assert_eq!(seen.as_deref(), Some("Tax"));
        assert_eq!(ctx.sub_resource(), None);
    }

    #[test]
    fn test_fresh_context_starts_empty() {
        let ctx = ShapingContext::for_resource("Plan");
        assert_eq!(ctx.resource(), "Plan");
        assert_eq!(ctx.finish(), Imports::default());
    }
}
