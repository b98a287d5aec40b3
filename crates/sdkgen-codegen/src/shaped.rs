//! Renderer-ready output of shaping.
//!
//! Every field is always serialized (absent values become `null`) so strict
//! templates can test any field without tripping over a missing key.

use crate::backend::TypeCategory;
use crate::context::Imports;
use sdkgen_core::EnumOrigin;
use serde::Serialize;

/// A whole shaped spec.
#[derive(Debug, Clone, Serialize)]
pub struct ShapedSpec {
    /// Backend that produced it
    pub backend: String,
    /// Document title
    pub title: Option<String>,
    /// API version, e.g. `v2`
    pub api_version: String,
    /// Product catalog version, e.g. `pc2`
    pub product_catalog_version: String,
    /// Global enums
    pub enums: Vec<ShapedEnum>,
    /// Enums that exist only as request parameters
    pub schema_less_enums: Vec<ShapedEnum>,
    /// Top-level resources
    pub resources: Vec<ShapedResource>,
}

/// A shaped resource or sub-resource.
#[derive(Debug, Clone, Serialize)]
pub struct ShapedResource {
    /// Resource id
    pub id: String,
    /// Target type name
    pub type_name: String,
    /// Path segment used in URLs
    pub path_name: Option<String>,
    /// Schema description
    pub description: Option<String>,
    /// Fields, sorted
    pub attributes: Vec<ShapedAttribute>,
    /// Inline enums of this resource
    pub enums: Vec<ShapedEnum>,
    /// Operations, sorted
    pub actions: Vec<ShapedAction>,
    /// Nested sub-resource types, sorted
    pub sub_resources: Vec<Self>,
    /// Attributes referencing other top-level resources
    pub dependent_resources: Vec<ShapedDependent>,
    /// Custom fields may appear on instances
    pub custom_fields_supported: bool,
    /// Unknown keys are allowed on instances
    pub additional_properties: bool,
    /// At least one action is a list operation
    pub has_list_operations: bool,
    /// Types referenced from other files; empty for sub-resources
    pub imports: Imports,
    /// Classified sort position, `-1` when unordered
    pub sort_order: i64,
}

/// A shaped field.
#[derive(Debug, Clone, Serialize)]
pub struct ShapedAttribute {
    /// Wire name
    pub name: String,
    /// Target property key
    pub identifier: String,
    /// Target type expression
    pub type_expr: String,
    /// Category of the type
    pub category: TypeCategory,
    /// Always present on instances
    pub required: bool,
    /// Deprecated
    pub deprecated: bool,
    /// Deprecation notice, when deprecated
    pub deprecation_message: Option<String>,
    /// Enum or list of enum
    pub is_enum: bool,
    /// Sub-resource or list of sub-resource
    pub is_sub_resource: bool,
    /// Array
    pub is_list: bool,
    /// Marked dependent in the document
    pub is_dependent: bool,
    /// Schema description
    pub description: Option<String>,
    /// Sort key used to order this attribute
    pub sort_order: i64,
    /// Nested fields of inline objects
    pub attributes: Vec<Self>,
}

/// One enum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapedEnumValue {
    /// Wire value
    pub value: String,
    /// Wire value as an escaped target string literal
    pub literal: String,
    /// Target member identifier
    pub identifier: String,
    /// Deprecated value
    pub deprecated: bool,
}

/// A shaped enum.
#[derive(Debug, Clone, Serialize)]
pub struct ShapedEnum {
    /// Canonical snake_case name
    pub name: String,
    /// Target type name
    pub type_name: String,
    /// Members in declaration order
    pub values: Vec<ShapedEnumValue>,
    /// Where the enum was discovered
    pub origin: EnumOrigin,
    /// Source reference of global enums
    pub reference: Option<String>,
}

/// How a request parameter is addressed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// `name=value`
    Value,
    /// `name[operator]=value`
    Filter,
    /// `parent[child]=value`
    NestedObject,
    /// `parent[child][index]=value`
    IndexedMultiValue,
}

/// A shaped request parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ShapedParam {
    /// Wire name
    pub name: String,
    /// Target property key
    pub identifier: String,
    /// Wire address; indexed children carry an `{index}` placeholder
    pub address: String,
    /// Target type expression
    pub type_expr: String,
    /// Category of the type
    pub category: TypeCategory,
    /// Addressing kind
    pub kind: ParamKind,
    /// Filter category name, e.g. `EnumFilter`
    pub filter_kind: Option<String>,
    /// Must be sent
    pub required: bool,
    /// Deprecated
    pub deprecated: bool,
    /// Deprecation notice, when deprecated
    pub deprecation_message: Option<String>,
    /// Enum or list of enum
    pub is_enum: bool,
    /// Accepts `is_present` filtering
    pub presence_operator_supported: bool,
    /// Pagination parameter
    pub pagination: bool,
    /// Schema description
    pub description: Option<String>,
    /// Sort key used to order this parameter
    pub sort_order: i64,
    /// One level of nested parameters
    pub params: Vec<Self>,
}

/// Path, query and body parameters of an action.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParamList {
    /// Path parameters in URL order
    pub path: Vec<ShapedParam>,
    /// Query parameters, sorted
    pub query: Vec<ShapedParam>,
    /// Body parameters, sorted
    pub body: Vec<ShapedParam>,
}

impl ParamList {
    /// `true` when the action takes query or body input.
    #[must_use]
    pub const fn has_input(&self) -> bool {
        !self.query.is_empty() || !self.body.is_empty()
    }
}

/// Kind of success response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// One object
    Single,
    /// A page of items
    List,
    /// No body
    Empty,
}

/// A shaped success response.
#[derive(Debug, Clone, Serialize)]
pub struct ShapedResponse {
    /// Response kind
    pub kind: ResponseKind,
    /// Target class name
    pub type_name: String,
    /// Object fields, or item fields for lists
    pub attributes: Vec<ShapedAttribute>,
    /// Pagination cursor of list responses
    pub next_offset: Option<ShapedAttribute>,
}

/// A shaped action.
#[derive(Debug, Clone, Serialize)]
pub struct ShapedAction {
    /// Raw method name
    pub name: String,
    /// Target method identifier
    pub identifier: String,
    /// `GET` or `POST`
    pub http_method: String,
    /// Full path template
    pub url: String,
    /// Path before the first parameter
    pub url_prefix: String,
    /// Path after the first parameter
    pub url_suffix: Option<String>,
    /// Has at least one path parameter
    pub has_path_params: bool,
    /// Paginated list operation
    pub is_list: bool,
    /// Batch operation
    pub is_batch: bool,
    /// Accepts idempotency keys
    pub is_idempotent: bool,
    /// Sends a JSON body
    pub needs_json_input: bool,
    /// Takes an input object even without parameters
    pub needs_input_object: bool,
    /// Deprecated
    pub deprecated: bool,
    /// Host sub-domain override
    pub sub_domain: Option<String>,
    /// Operation description
    pub description: Option<String>,
    /// Request class name, when there is input
    pub request_type_name: Option<String>,
    /// Parameters
    pub params: ParamList,
    /// Success response
    pub response: ShapedResponse,
    /// Sort key used to order this action
    pub sort_order: i64,
}

/// A dependent-resource reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapedDependent {
    /// Wire name of the referencing attribute
    pub attribute: String,
    /// Referenced resource id
    pub resource_id: String,
    /// Referenced resource type name
    pub type_name: String,
    /// Held as an array
    pub is_list: bool,
}
