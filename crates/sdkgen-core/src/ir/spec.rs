//! The root aggregate of one generation run.

use super::action::Action;
use super::enum_resolver::{EnumRegistry, collect_global_enums, collect_schema_less_enums};
use super::enumeration::Enum;
use super::resource::Resource;
use crate::document::Document;
use crate::extension::Extensions;
use crate::version::{ProductCatalogVersion, Version};
use crate::{Error, GenerationConfig, Result};
use std::collections::{BTreeMap, HashSet};

/// The IR of one document.
///
/// Built fresh per run with [`Spec::build`]; immutable afterwards.
///
/// # Examples
///
/// ```
/// use sdkgen_core::{Document, GenerationConfig, Spec};
/// use serde_json::json;
///
/// let doc = Document::from_value(json!({
///     "paths": {"/customers": {"get": {
///         "operationId": "list_customers",
///         "x-cb-operation-method-name": "list",
///         "x-cb-resource-id": "customer",
///         "x-cb-operation-is-list": true
///     }}},
///     "components": {"schemas": {"Customer": {
///         "type": "object",
///         "x-cb-resource-id": "customer",
///         "properties": {"id": {"type": "string"}}
///     }}}
/// }))
/// .unwrap();
///
/// let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();
/// let customer = spec.resource("customer").unwrap();
/// assert_eq!(customer.name(), "Customer");
/// assert!(customer.has_list_operations());
/// ```
#[derive(Debug, Clone)]
pub struct Spec {
    title: Option<String>,
    version: Version,
    qa_mode: bool,
    resources: Vec<Resource>,
    enums: EnumRegistry,
    schema_less_enums: EnumRegistry,
}

impl Spec {
    /// Builds the IR.
    ///
    /// Every GET/POST operation becomes an [`Action`]; actions are grouped
    /// by resource id and those without a matching resource are dropped.
    /// Hidden resources (outside QA mode), third-party resources and
    /// resources tagged for another catalog version are filtered out. The
    /// rest are sorted by name.
    ///
    /// # Errors
    ///
    /// Fails fast, producing no partial result, on an invalid configuration,
    /// an operation missing its method name or extensions, an unresolved or
    /// cyclic `$ref`, excessive nesting, a duplicate resource id, or (in
    /// strict mode) an unrecognized or wrongly typed extension.
    pub fn build(document: &Document, config: &GenerationConfig) -> Result<Self> {
        config.validate()?;
        let strict = config.strict_extensions;
        let document_ext = Extensions::decode(document.extensions(), "document", strict)?;
        let version = Version::resolve(&document_ext);

        let mut grouped = group_actions(document, config)?;

        let mut seen_ids = HashSet::new();
        let mut resources = Vec::new();
        for (schema_name, schema) in document.components.schemas.iter() {
            let ext = Extensions::decode(&schema.extensions, &format!("schema {schema_name}"), strict)?;
            let Some(id) = ext.resource_id.as_deref() else {
                continue;
            };
            if !seen_ids.insert(id.to_string()) {
                return Err(Error::DuplicateResourceId { id: id.to_string() });
            }
            let actions = grouped.remove(id).unwrap_or_default();
            let resource = Resource::build(id, schema_name, schema, &ext, actions, document, config)?;
            if keep_resource(&resource, version, config.qa_mode) {
                resources.push(resource);
            }
        }
        for (resource_id, actions) in &grouped {
            for action in actions {
                tracing::debug!(resource = %resource_id, action = action.id(), "Dropping action without a resource");
            }
        }
        resources.sort_by(|a, b| a.name().cmp(b.name()));

        let enums = collect_global_enums(document, &resources, strict)?;
        let schema_less_enums = collect_schema_less_enums(&resources, &enums);

        tracing::info!(
            resources = resources.len(),
            global_enums = enums.len(),
            schema_less_enums = schema_less_enums.len(),
            %version,
            "Spec built"
        );

        Ok(Self {
            title: document.info.title.clone(),
            version,
            qa_mode: config.qa_mode,
            resources,
            enums,
            schema_less_enums,
        })
    }

    /// API title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Resolved version pair.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Whether the spec was built in QA mode.
    #[must_use]
    pub const fn qa_mode(&self) -> bool {
        self.qa_mode
    }

    /// Generated resources, sorted by name.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Looks a resource up by id.
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id() == id)
    }

    /// Global enums, first definition per name.
    #[must_use]
    pub const fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    /// Enums synthesized from action parameters.
    #[must_use]
    pub const fn schema_less_enums(&self) -> &EnumRegistry {
        &self.schema_less_enums
    }

    /// Global followed by schema-less enums.
    pub fn all_enums(&self) -> impl Iterator<Item = &Enum> {
        self.enums.iter().chain(self.schema_less_enums.iter())
    }
}

fn group_actions(document: &Document, config: &GenerationConfig) -> Result<BTreeMap<String, Vec<Action>>> {
    let mut grouped: BTreeMap<String, Vec<Action>> = BTreeMap::new();
    for (path, item) in document.paths.iter() {
        for method in item.unsupported_methods() {
            tracing::warn!(%path, method, "Skipping unsupported HTTP method");
        }
        for (method, operation) in item.operations() {
            let action = Action::build(path, method, operation, &item.parameters, document, config)?;
            match action.resource_id() {
                Some(id) => grouped.entry(id.to_string()).or_default().push(action),
                None => {
                    tracing::debug!(action = action.id(), "Dropping action without a resource id");
                }
            }
        }
    }
    Ok(grouped)
}

fn keep_resource(resource: &Resource, version: Version, qa_mode: bool) -> bool {
    let traits = resource.traits();
    if traits.third_party {
        tracing::debug!(resource = resource.id(), "Filtered third-party resource");
        return false;
    }
    if traits.hidden && !qa_mode {
        tracing::debug!(resource = resource.id(), "Filtered hidden resource");
        return false;
    }
    if let Some(tag) = traits.catalog_version
        && ProductCatalogVersion::from_tag(tag).is_none()
    {
        tracing::warn!(
            resource = resource.id(),
            catalog = tag,
            "Unrecognized product catalog version, dropping resource"
        );
        return false;
    }
    if !version.includes_catalog(traits.catalog_version) {
        tracing::debug!(
            resource = resource.id(),
            catalog = ?traits.catalog_version,
            "Filtered resource for another catalog version"
        );
        return false;
    }
    true
}
