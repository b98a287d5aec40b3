//! Actions: one per generated GET/POST operation.

use super::attribute::{Attribute, build_members, sort_by_order};
use super::context::BuildContext;
use super::response::{ActionResponse, LIST_FIELD, ListResponse, NEXT_OFFSET, Response};
use crate::document::{Document, HttpMethod, Operation, Parameter, ParameterLocation, Schema};
use crate::extension::{ExtensionKey, Extensions, UNORDERED};
use crate::{Error, GenerationConfig, Result};

/// Operation-level flags, decoded once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTraits {
    /// Returns a paginated list
    pub is_list: bool,
    /// Bulk operation, hidden outside QA mode
    pub is_bulk: bool,
    /// Batch operation
    pub is_batch: bool,
    /// Internal operation, hidden outside QA mode
    pub is_internal: bool,
    /// Safe to retry with an idempotency key
    pub is_idempotent: bool,
    /// Hidden from client SDKs
    pub hidden: bool,
    /// Body is sent as JSON
    pub needs_json_input: bool,
    /// Parameters are passed as one input object
    pub needs_input_object: bool,
    /// Early-access only
    pub eap: bool,
    /// Operation is deprecated
    pub deprecated: bool,
    /// Accepts custom fields
    pub custom_fields_supported: bool,
    /// Sub-domain the request is routed to
    pub sub_domain: Option<String>,
    /// Position among the resource's actions, `-1` when unordered
    pub sort_order: i64,
}

impl ActionTraits {
    fn from_extensions(ext: &Extensions, deprecated: bool) -> Self {
        Self {
            is_list: ext.is_list_operation,
            is_bulk: ext.is_bulk_operation,
            is_batch: ext.is_batch_operation,
            is_internal: ext.is_internal,
            is_idempotent: ext.is_idempotent,
            hidden: ext.hidden_from_sdk,
            needs_json_input: ext.needs_json_input,
            needs_input_object: ext.needs_input_object,
            eap: ext.is_eap,
            deprecated,
            custom_fields_supported: ext.is_custom_fields_supported,
            sub_domain: ext.sub_domain.clone(),
            sort_order: ext.sort_order.unwrap_or(UNORDERED),
        }
    }
}

/// An SDK method backed by one operation.
#[derive(Debug, Clone)]
pub struct Action {
    id: String,
    name: String,
    resource_id: Option<String>,
    http_method: HttpMethod,
    url: String,
    url_prefix: String,
    url_suffix: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    path_params: Vec<Attribute>,
    query_params: Vec<Attribute>,
    request_body_params: Vec<Attribute>,
    response: ActionResponse,
    traits: ActionTraits,
}

impl Action {
    /// Builds an action from an operation.
    ///
    /// `shared` holds the path-level parameters; operation parameters with
    /// the same name and location replace them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingExtensions`] for an operation without vendor
    /// extensions, [`Error::MissingExtension`] when the method name is
    /// absent, and any reference or strict-mode error raised while building
    /// parameters.
    pub(crate) fn build(
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        shared: &[Parameter],
        document: &Document,
        config: &GenerationConfig,
    ) -> Result<Self> {
        let id = operation
            .operation_id
            .clone()
            .unwrap_or_else(|| format!("{method} {path}"));
        if operation.vendor_keys().next().is_none() {
            return Err(Error::MissingExtensions { operation: id });
        }
        let location = format!("operation {id}");
        let ext = Extensions::decode(&operation.extensions, &location, config.strict_extensions)?;
        let name = ext
            .operation_method_name
            .clone()
            .ok_or(Error::MissingExtension {
                location,
                key: ExtensionKey::OperationMethodName.name(),
            })?;

        let owner = ext.resource_id.clone().unwrap_or_else(|| name.clone());
        let ctx = BuildContext::new(document, config, &name);

        let mut path_params = Vec::new();
        let mut query_params = Vec::new();
        for parameter in merge_parameters(shared, &operation.parameters) {
            let bucket = match parameter.location {
                ParameterLocation::Path => &mut path_params,
                ParameterLocation::Query => &mut query_params,
                ParameterLocation::Header | ParameterLocation::Cookie => {
                    tracing::debug!(parameter = %parameter.name, action = %name, "Skipping header/cookie parameter");
                    continue;
                }
            };
            let attribute = parameter_attribute(parameter, &owner, &ctx)?;
            if attribute.is_hidden() && !config.qa_mode {
                tracing::debug!(parameter = %parameter.name, action = %name, "Filtered hidden parameter");
                continue;
            }
            bucket.push(attribute);
        }
        sort_by_order(&mut query_params, Attribute::sort_order);

        let request_body_params = match operation.request_body.as_ref().and_then(|b| b.schema()) {
            Some(body) => object_members(body, &owner, &ctx)?,
            None => Vec::new(),
        };

        let response = match operation.success_schema() {
            Some(schema) => build_response(schema, ext.is_list_operation, &owner, &ctx)?,
            None => ActionResponse::Empty,
        };

        let (url_prefix, url_suffix) = split_url(path);
        Ok(Self {
            id,
            name,
            resource_id: ext.resource_id.clone(),
            http_method: method,
            url: path.to_string(),
            url_prefix,
            url_suffix,
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            path_params,
            query_params,
            request_body_params,
            response,
            traits: ActionTraits::from_extensions(&ext, operation.deprecated),
        })
    }

    /// `operationId`, or `METHOD path` when absent.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// SDK method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the resource the action belongs to.
    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// HTTP method.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// Path template as written.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path up to the first path parameter.
    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Path after the path parameter, if any.
    #[must_use]
    pub fn url_suffix(&self) -> Option<&str> {
        self.url_suffix.as_deref()
    }

    /// Summary text.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Description text.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Path parameters in declared order.
    #[must_use]
    pub fn path_params(&self) -> &[Attribute] {
        &self.path_params
    }

    /// Query parameters, sorted by sort order.
    #[must_use]
    pub fn query_params(&self) -> &[Attribute] {
        &self.query_params
    }

    /// Request body fields, sorted by sort order.
    #[must_use]
    pub fn request_body_params(&self) -> &[Attribute] {
        &self.request_body_params
    }

    /// Success response shape.
    #[must_use]
    pub const fn response(&self) -> &ActionResponse {
        &self.response
    }

    /// Operation flags.
    #[must_use]
    pub const fn traits(&self) -> &ActionTraits {
        &self.traits
    }

    /// Sort position, `-1` when unordered.
    #[must_use]
    pub const fn sort_order(&self) -> i64 {
        self.traits.sort_order
    }

    /// `true` for list operations.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        self.traits.is_list
    }

    /// `true` for operations that take path parameters.
    #[must_use]
    pub fn has_path_params(&self) -> bool {
        !self.path_params.is_empty()
    }

    /// Whether the action is generated in the given mode.
    ///
    /// Hidden, bulk and internal actions only appear in QA mode.
    #[must_use]
    pub const fn is_visible(&self, qa_mode: bool) -> bool {
        qa_mode || !(self.traits.hidden || self.traits.is_bulk || self.traits.is_internal)
    }
}

fn merge_parameters<'p>(shared: &'p [Parameter], own: &'p [Parameter]) -> Vec<&'p Parameter> {
    let mut merged: Vec<&Parameter> = shared
        .iter()
        .filter(|s| {
            !own.iter()
                .any(|o| o.name == s.name && o.location == s.location)
        })
        .collect();
    merged.extend(own);
    merged
}

fn parameter_attribute(
    parameter: &Parameter,
    owner: &str,
    ctx: &BuildContext<'_>,
) -> Result<Attribute> {
    let mut schema = parameter.schema.clone().unwrap_or_default();
    schema.deprecated |= parameter.deprecated;
    schema.extensions.extend(
        parameter
            .extensions
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    Attribute::build(&parameter.name, &schema, parameter.required, owner, ctx)
}

fn object_members(schema: &Schema, owner: &str, ctx: &BuildContext<'_>) -> Result<Vec<Attribute>> {
    let node = ctx.resolve(schema)?;
    let ctx = match node.target {
        Some((name, _)) => ctx.enter_ref(name)?,
        None => ctx.clone(),
    };
    build_members(node.body, owner, &ctx)
}

fn build_response(
    schema: &Schema,
    is_list: bool,
    owner: &str,
    ctx: &BuildContext<'_>,
) -> Result<ActionResponse> {
    let node = ctx.resolve(schema)?;
    if !is_list {
        let attributes = object_members(schema, owner, ctx)?;
        if attributes.is_empty() && !node.body.is_object() {
            return Ok(ActionResponse::Empty);
        }
        return Ok(ActionResponse::Single(Response { attributes }));
    }

    let body = node.body;
    let item_attributes = match body
        .properties
        .as_ref()
        .and_then(|p| p.get(LIST_FIELD))
    {
        Some(list) => {
            let list = ctx.resolve(list)?;
            match list.body.items.as_deref() {
                Some(items) => object_members(items, owner, ctx)?,
                None => Vec::new(),
            }
        }
        None => {
            tracing::warn!(action = %ctx.location(), "List operation response has no list field");
            Vec::new()
        }
    };
    let next_offset = match body.properties.as_ref().and_then(|p| p.get(NEXT_OFFSET)) {
        Some(cursor) => Some(Attribute::build(NEXT_OFFSET, cursor, false, owner, ctx)?),
        None => None,
    };
    Ok(ActionResponse::List(ListResponse {
        item_attributes,
        next_offset,
    }))
}

/// Splits a path around its first path parameter.
///
/// Without a path parameter the first segment is the prefix.
fn split_url(url: &str) -> (String, Option<String>) {
    let segments: Vec<&str> = url.trim_start_matches('/').split('/').collect();
    let (head, tail) = match segments.iter().position(|s| s.starts_with('{')) {
        Some(idx) => (&segments[..idx], &segments[idx + 1..]),
        None => (&segments[..1], &segments[1..]),
    };
    let prefix = format!("/{}", head.join("/"));
    let suffix = (!tail.is_empty()).then(|| format!("/{}", tail.join("/")));
    (prefix, suffix)
}
