//! Resources: top-level generated types and their nested sub-resources.

use super::action::Action;
use super::attribute::{Attribute, build_members, sort_by_order};
use super::context::BuildContext;
use super::enumeration::Enum;
use super::traits::AttributeShape;
use crate::document::{Document, Schema};
use crate::extension::{Extensions, UNORDERED};
use crate::inflect::to_snake_case;
use crate::{GenerationConfig, Result};
use std::collections::HashSet;

/// Resource-level flags, decoded once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTraits {
    /// Hidden from client SDKs
    pub hidden: bool,
    /// Owned by a third party, never generated
    pub third_party: bool,
    /// Accepts custom fields
    pub custom_fields_supported: bool,
    /// Backing schema allows extra keys
    pub additional_properties: bool,
    /// Product catalog tag (`1` or `2`), if any
    pub catalog_version: Option<i64>,
    /// Early-access only
    pub eap: bool,
    /// Position hint, `-1` when unordered
    pub sort_order: i64,
}

/// A top-level resource referenced by one of this resource's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentResource {
    /// Name of the referencing attribute
    pub attribute: String,
    /// Referenced resource id
    pub resource_id: String,
    /// Referenced resource type name
    pub type_name: String,
    /// `true` when the attribute is an array of references
    pub is_list: bool,
}

/// A generated resource type.
#[derive(Debug, Clone)]
pub struct Resource {
    id: String,
    name: String,
    path_name: Option<String>,
    description: Option<String>,
    traits: ResourceTraits,
    attributes: Vec<Attribute>,
    actions: Vec<Action>,
    sub_resources: Vec<Resource>,
}

impl Resource {
    /// Builds a top-level resource from a component schema.
    ///
    /// Only actions visible in the configured mode are kept, stably sorted by
    /// sort order.
    pub(crate) fn build(
        id: &str,
        schema_name: &str,
        schema: &Schema,
        ext: &Extensions,
        actions: Vec<Action>,
        document: &Document,
        config: &GenerationConfig,
    ) -> Result<Self> {
        let ctx = BuildContext::new(document, config, id).enter_ref(schema_name)?;
        let attributes = build_members(schema, id, &ctx)?;

        let mut actions: Vec<Action> = actions
            .into_iter()
            .filter(|action| {
                let visible = action.is_visible(config.qa_mode);
                if !visible {
                    tracing::debug!(resource = id, action = action.name(), "Filtered hidden action");
                }
                visible
            })
            .collect();
        sort_by_order(&mut actions, Action::sort_order);

        let path_name = ext.resource_path_name.clone().or_else(|| {
            actions
                .first()
                .map(|action| action.url_prefix().trim_start_matches('/').to_string())
        });

        Ok(Self {
            id: id.to_string(),
            name: schema_name.to_string(),
            path_name,
            description: schema.description.clone(),
            traits: ResourceTraits {
                hidden: ext.hidden_from_sdk,
                third_party: ext.is_third_party_resource,
                custom_fields_supported: ext.is_custom_fields_supported,
                additional_properties: schema.allows_additional_properties(),
                catalog_version: ext.product_catalog_version,
                eap: ext.is_eap,
                sort_order: ext.sort_order.unwrap_or(UNORDERED),
            },
            sub_resources: derive_sub_resources(&attributes),
            attributes,
            actions,
        })
    }

    /// Builds the nested resource a sub-resource attribute stands for.
    fn from_sub_resource(attribute: &Attribute, type_name: &str) -> Self {
        Self {
            id: to_snake_case(type_name),
            name: type_name.to_string(),
            path_name: None,
            description: attribute.description().map(str::to_string),
            traits: ResourceTraits {
                hidden: attribute.is_hidden(),
                eap: attribute.traits().eap,
                sort_order: attribute.sort_order(),
                ..ResourceTraits::default()
            },
            sub_resources: derive_sub_resources(attribute.attributes()),
            attributes: attribute.attributes().to_vec(),
            actions: Vec::new(),
        }
    }

    /// Resource id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Type name, PascalCase.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL path name, when known.
    #[must_use]
    pub fn path_name(&self) -> Option<&str> {
        self.path_name.as_deref()
    }

    /// Description text.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Resource flags.
    #[must_use]
    pub const fn traits(&self) -> &ResourceTraits {
        &self.traits
    }

    /// Sort position, `-1` when unordered.
    #[must_use]
    pub const fn sort_order(&self) -> i64 {
        self.traits.sort_order
    }

    /// Attributes, sorted by sort order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Visible actions, sorted by sort order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Nested resources for sub-resource attributes, one per type name.
    #[must_use]
    pub fn sub_resources(&self) -> &[Self] {
        &self.sub_resources
    }

    /// Attributes referencing other top-level resources.
    #[must_use]
    pub fn dependent_resources(&self) -> Vec<DependentResource> {
        self.attributes
            .iter()
            .filter_map(|attribute| {
                let (resource_id, type_name) = attribute.shape().resource_reference()?;
                Some(DependentResource {
                    attribute: attribute.name().to_string(),
                    resource_id: resource_id.to_string(),
                    type_name: type_name.to_string(),
                    is_list: attribute.shape().is_list(),
                })
            })
            .collect()
    }

    /// Dependent resources held as a single reference.
    #[must_use]
    pub fn singular_dependent_resources(&self) -> Vec<DependentResource> {
        self.dependent_resources()
            .into_iter()
            .filter(|d| !d.is_list)
            .collect()
    }

    /// Dependent resources held as an array of references.
    #[must_use]
    pub fn list_dependent_resources(&self) -> Vec<DependentResource> {
        self.dependent_resources()
            .into_iter()
            .filter(|d| d.is_list)
            .collect()
    }

    /// `true` if any action is a list operation.
    #[must_use]
    pub fn has_list_operations(&self) -> bool {
        self.actions.iter().any(Action::is_list)
    }

    /// Inline enums of this resource's attributes, nested members included.
    ///
    /// Global enums are excluded. Deduplicated by name, first occurrence
    /// wins.
    #[must_use]
    pub fn local_enums(&self) -> Vec<&Enum> {
        let mut seen = HashSet::new();
        self.attributes
            .iter()
            .flat_map(Attribute::walk)
            .filter_map(Attribute::enum_def)
            .filter(|e| !e.is_global() && seen.insert(e.name()))
            .collect()
    }

    /// Looks up a top-level attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }
}

/// Sub-resources declared by `attributes`, including ones nested inside
/// inline objects. A sub-resource's own members belong to it, not to us.
fn derive_sub_resources(attributes: &[Attribute]) -> Vec<Resource> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    collect_sub_resources(attributes, &mut seen, &mut found);
    found
}

fn collect_sub_resources(
    attributes: &[Attribute],
    seen: &mut HashSet<String>,
    found: &mut Vec<Resource>,
) {
    for attribute in attributes {
        if let Some(type_name) = attribute.sub_resource_type_name() {
            if seen.insert(type_name.to_string()) {
                found.push(Resource::from_sub_resource(attribute, type_name));
            }
        } else if matches!(attribute.shape().element(), AttributeShape::Object) {
            collect_sub_resources(attribute.attributes(), seen, found);
        }
    }
}
