//! Enum resolution.
//!
//! Merges the three enum sources into name-unique lists:
//!
//! 1. global enums declared as component schemas, plus inline enums flagged
//!    global anywhere in the resource graph;
//! 2. local enums, owned by resource attributes (see
//!    [`Resource::local_enums`]);
//! 3. schema-less enums, found only one level inside action body or query
//!    parameters.
//!
//! The first definition seen under a name wins; later ones are dropped.

use super::attribute::Attribute;
use super::enumeration::{Enum, EnumOrigin, enum_name_from_reference};
use super::resource::Resource;
use super::traits::local_enum_name;
use crate::document::{Document, SCHEMA_REF_PREFIX};
use crate::extension::Extensions;
use crate::inflect::singularize;
use crate::Result;

/// Name-unique, insertion-ordered enum collection.
///
/// # Examples
///
/// ```
/// use sdkgen_core::{Enum, EnumOrigin, EnumRegistry};
///
/// let mut registry = EnumRegistry::new();
/// assert!(registry.insert(Enum::new("mode", vec!["on".into()], &[], EnumOrigin::Local)));
/// assert!(!registry.insert(Enum::new("mode", vec!["off".into()], &[], EnumOrigin::Local)));
/// assert_eq!(registry.get("mode").unwrap().values(), ["on"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: Vec<Enum>,
}

impl EnumRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { enums: Vec::new() }
    }

    /// Adds an enum unless one with the same name exists.
    ///
    /// Returns `false` when the enum was discarded as a duplicate.
    pub fn insert(&mut self, candidate: Enum) -> bool {
        if self.contains(candidate.name()) {
            tracing::debug!(enum_name = candidate.name(), "Discarding duplicate enum");
            return false;
        }
        self.enums.push(candidate);
        true
    }

    /// Whether an enum with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Looks an enum up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name() == name)
    }

    /// Enums in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Enum> {
        self.enums.iter()
    }

    /// Number of enums.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    /// `true` when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    /// Consumes the registry.
    #[must_use]
    pub fn into_vec(self) -> Vec<Enum> {
        self.enums
    }
}

/// Collects global enums.
///
/// Component string-enum schemas come first in document order, then global
/// enums met on resource attributes and action parameters.
pub(crate) fn collect_global_enums(
    document: &Document,
    resources: &[Resource],
    strict: bool,
) -> Result<EnumRegistry> {
    let mut registry = EnumRegistry::new();
    for (name, schema) in document.components.schemas.iter() {
        let Some(values) = schema.string_enum_values() else {
            continue;
        };
        let ext = Extensions::decode(&schema.extensions, &format!("schema {name}"), strict)?;
        registry.insert(
            Enum::new(
                enum_name_from_reference(name),
                values,
                &ext.deprecated_enum_values,
                EnumOrigin::Global,
            )
            .with_reference(format!("{SCHEMA_REF_PREFIX}{name}")),
        );
    }
    for resource in resources {
        let params = resource.actions().iter().flat_map(|action| {
            action
                .path_params()
                .iter()
                .chain(action.query_params())
                .chain(action.request_body_params())
        });
        for attribute in resource.attributes().iter().chain(params) {
            for node in attribute.walk() {
                if let Some(e) = node.enum_def().filter(|e| e.is_global()) {
                    registry.insert(e.clone());
                }
            }
        }
    }
    Ok(registry)
}

/// Synthesizes schema-less enums from action parameters.
///
/// Looks one level into object, sub-resource, multi-value and
/// composite-array body/query parameters. An enum is skipped when `known`
/// already has its name or when the resource named after the parameter
/// defines the same enum attribute itself.
pub(crate) fn collect_schema_less_enums(
    resources: &[Resource],
    known: &EnumRegistry,
) -> EnumRegistry {
    let mut registry = EnumRegistry::new();
    for resource in resources {
        for action in resource.actions() {
            let params = action
                .request_body_params()
                .iter()
                .chain(action.query_params());
            for param in params.filter(|p| is_scanned_parameter(p)) {
                for child in param.attributes() {
                    let Some(found) = child.enum_def().filter(|e| !e.is_global()) else {
                        continue;
                    };
                    let name = local_enum_name(param.name(), child.name());
                    if known.contains(&name) {
                        continue;
                    }
                    let owner = singularize(param.name());
                    if find_resource(resources, &owner)
                        .and_then(|r| r.attribute(child.name()))
                        .is_some_and(Attribute::is_enum)
                    {
                        tracing::debug!(
                            enum_name = %name,
                            resource = %owner,
                            "Resource defines this enum, skipping schema-less copy"
                        );
                        continue;
                    }
                    let candidate = Enum::new(
                        name,
                        found.values().to_vec(),
                        found.deprecated_values(),
                        EnumOrigin::SchemaLess,
                    );
                    registry.insert(candidate);
                }
            }
        }
    }
    registry
}

fn is_scanned_parameter(param: &Attribute) -> bool {
    !param.traits().is_filter()
        && (param.shape().has_members() || param.is_multi_value() || param.is_composite_array_body())
}

fn find_resource<'r>(resources: &'r [Resource], id: &str) -> Option<&'r Resource> {
    resources.iter().find_map(|resource| {
        if resource.id() == id {
            Some(resource)
        } else {
            find_resource(resource.sub_resources(), id)
        }
    })
}
