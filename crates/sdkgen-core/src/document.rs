//! API description document structs for serde deserialization.
//!
//! A minimal subset of the OpenAPI 3 document: only what the generator
//! reads. Vendor extensions are kept raw on every node and decoded later by
//! the extension registry.

use crate::{Error, OrderedMap, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Raw extension map as written in the document.
///
/// Captures every member a struct does not name explicitly; only `x-` keys
/// are meaningful to the registry.
pub type RawExtensions = BTreeMap<String, Value>;

/// Prefix of local component schema references.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Root document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Declared OpenAPI version, informational only
    #[serde(default)]
    pub openapi: Option<String>,
    /// Document metadata and document-level extensions
    #[serde(default)]
    pub info: Info,
    /// Path items in document order
    #[serde(default)]
    pub paths: OrderedMap<PathItem>,
    /// Reusable component schemas
    #[serde(default)]
    pub components: Components,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    /// API title
    #[serde(default)]
    pub title: Option<String>,
    /// API description version string
    #[serde(default)]
    pub version: Option<String>,
    /// Document-level vendor extensions
    #[serde(flatten)]
    pub extensions: RawExtensions,
}

/// Components section containing reusable schemas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Named schemas in document order
    #[serde(default)]
    pub schemas: OrderedMap<Schema>,
}

/// HTTP method of a generated action.
///
/// Only GET and POST operations become actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read operation; parameters travel in the query string
    Get,
    /// Write operation; parameters travel in the request body
    Post,
}

impl HttpMethod {
    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path item with its operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// GET operation
    #[serde(default)]
    pub get: Option<Operation>,
    /// POST operation
    #[serde(default)]
    pub post: Option<Operation>,
    /// PUT operation (not generated)
    #[serde(default)]
    pub put: Option<Operation>,
    /// PATCH operation (not generated)
    #[serde(default)]
    pub patch: Option<Operation>,
    /// DELETE operation (not generated)
    #[serde(default)]
    pub delete: Option<Operation>,
    /// Path-level parameters shared by all operations
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// GET and POST operations, in that order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, self.get.as_ref()),
            (HttpMethod::Post, self.post.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }

    /// Names of declared methods the generator does not handle.
    pub fn unsupported_methods(&self) -> impl Iterator<Item = &'static str> {
        [
            ("PUT", self.put.is_some()),
            ("PATCH", self.patch.is_some()),
            ("DELETE", self.delete.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
    }
}

/// An API operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation identifier
    #[serde(default)]
    pub operation_id: Option<String>,
    /// Short summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Long description
    #[serde(default)]
    pub description: Option<String>,
    /// Path and query parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body
    #[serde(default)]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code
    #[serde(default)]
    pub responses: OrderedMap<ResponseObject>,
    /// Deprecation flag
    #[serde(default)]
    pub deprecated: bool,
    /// Operation-level vendor extensions
    #[serde(flatten)]
    pub extensions: RawExtensions,
}

impl Operation {
    /// Schema of the success response: `200`, else the first `2xx`.
    #[must_use]
    pub fn success_schema(&self) -> Option<&Schema> {
        let response = self.responses.get("200").or_else(|| {
            self.responses
                .iter()
                .find(|(code, _)| code.starts_with('2'))
                .map(|(_, response)| response)
        })?;
        response.content.values().find_map(|media| media.schema.as_ref())
    }

    /// Vendor (`x-`) keys only.
    pub fn vendor_keys(&self) -> impl Iterator<Item = &str> {
        self.extensions
            .keys()
            .map(String::as_str)
            .filter(|k| k.starts_with("x-"))
    }
}

/// Location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path segment
    Path,
    /// Query string
    Query,
    /// HTTP header
    Header,
    /// Cookie
    Cookie,
}

/// A path or query parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Wire name
    pub name: String,
    /// Where the parameter travels
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied
    #[serde(default)]
    pub required: bool,
    /// Deprecation flag
    #[serde(default)]
    pub deprecated: bool,
    /// Value schema
    #[serde(default)]
    pub schema: Option<Schema>,
    /// Parameter-level vendor extensions
    #[serde(flatten)]
    pub extensions: RawExtensions,
}

/// A request body definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    /// Whether a body must be sent
    #[serde(default)]
    pub required: bool,
    /// Media types in document order
    #[serde(default)]
    pub content: OrderedMap<MediaType>,
}

impl RequestBody {
    /// Body schema: form-encoded preferred, then JSON, then the first declared.
    #[must_use]
    pub fn schema(&self) -> Option<&Schema> {
        ["application/x-www-form-urlencoded", "application/json"]
            .iter()
            .find_map(|media| self.content.get(media).and_then(|m| m.schema.as_ref()))
            .or_else(|| self.content.values().find_map(|m| m.schema.as_ref()))
    }
}

/// A response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseObject {
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Media types in document order
    #[serde(default)]
    pub content: OrderedMap<MediaType>,
}

/// Media type content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    /// Payload schema
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `additionalProperties: true|false`
    Bool(bool),
    /// `additionalProperties: {schema}`
    Schema(Box<Schema>),
}

/// JSON Schema node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The declared type
    #[serde(rename = "type", default)]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema
    #[serde(rename = "$ref", default)]
    pub ref_path: Option<String>,

    /// Format hint (`date-time`, `unix-time`, `int64`, `decimal`, ...)
    #[serde(default)]
    pub format: Option<String>,

    /// Object properties in document order
    #[serde(default)]
    pub properties: Option<OrderedMap<Schema>>,

    /// Required property names
    #[serde(default)]
    pub required: Vec<String>,

    /// Item schema for arrays
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    /// Enum values as written
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<Value>>,

    /// Open-map marker
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    /// Union (any of)
    #[serde(default)]
    pub any_of: Option<Vec<Schema>>,

    /// Union (exactly one of)
    #[serde(default)]
    pub one_of: Option<Vec<Schema>>,

    /// Deprecation flag
    #[serde(default)]
    pub deprecated: bool,

    /// Description text, passed through untouched
    #[serde(default)]
    pub description: Option<String>,

    /// Schema-level vendor extensions
    #[serde(flatten)]
    pub extensions: RawExtensions,
}

impl Schema {
    /// First non-null declared type.
    #[must_use]
    pub fn primary_type(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaType::Single(t) => Some(t.as_str()),
            SchemaType::Multiple(types) => types.iter().map(String::as_str).find(|t| *t != "null"),
        }
    }

    /// `true` for `"type": "null"` only.
    #[must_use]
    pub fn is_null_type(&self) -> bool {
        matches!(&self.schema_type, Some(SchemaType::Single(t)) if t == "null")
    }

    /// `true` for array schemas.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.primary_type() == Some("array")
    }

    /// `true` for object schemas, including untyped schemas with properties.
    #[must_use]
    pub fn is_object(&self) -> bool {
        match self.primary_type() {
            Some(t) => t == "object",
            None => self.properties.is_some(),
        }
    }

    /// `true` when the schema allows arbitrary extra keys.
    #[must_use]
    pub fn allows_additional_properties(&self) -> bool {
        match &self.additional_properties {
            Some(AdditionalProperties::Bool(allowed)) => *allowed,
            Some(AdditionalProperties::Schema(_)) => true,
            None => false,
        }
    }

    /// String enum values, if every declared value is a string.
    ///
    /// Returns `None` for non-enum schemas, empty enums, and enums holding
    /// numbers or booleans.
    #[must_use]
    pub fn string_enum_values(&self) -> Option<Vec<String>> {
        let values = self.enum_values.as_ref()?;
        if values.is_empty() {
            return None;
        }
        values
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    /// Property map, empty when absent.
    pub fn property_iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.properties.iter().flat_map(OrderedMap::iter)
    }

    /// Whether a property name is listed as required.
    #[must_use]
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }

    /// `true` for `oneOf`/`anyOf` unions.
    #[must_use]
    pub fn is_union(&self) -> bool {
        self.one_of.is_some() || self.any_of.is_some()
    }
}

impl Document {
    /// Parses a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentParse`] if the JSON is malformed or does not
    /// match the document shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::Document;
    ///
    /// let doc = Document::from_json(r#"{"openapi": "3.0.1", "paths": {}}"#).unwrap();
    /// assert!(doc.paths.is_empty());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::DocumentParse {
            message: format!("Failed to parse document: {e}"),
            source: Some(e),
        })
    }

    /// Builds a document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentParse`] if the value does not match the
    /// document shape.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::DocumentParse {
            message: format!("Failed to read document: {e}"),
            source: Some(e),
        })
    }

    /// Document-level vendor extensions.
    #[must_use]
    pub const fn extensions(&self) -> &RawExtensions {
        &self.info.extensions
    }

    /// Looks up a component schema by name.
    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.components.schemas.get(name)
    }

    /// Resolves a local `$ref` to its component name and schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedReference`] for non-local references and
    /// for names missing from `components.schemas`.
    pub fn resolve_ref(&self, reference: &str) -> Result<(&str, &Schema)> {
        let unresolved = || Error::UnresolvedReference {
            reference: reference.to_string(),
        };
        let name = reference.strip_prefix(SCHEMA_REF_PREFIX).ok_or_else(unresolved)?;
        self.components
            .schemas
            .iter()
            .find(|(key, _)| *key == name)
            .ok_or_else(unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_document() {
        let doc = Document::from_value(json!({
            "openapi": "3.0.1",
            "info": {"title": "Billing", "x-cb-api-version": 2},
            "paths": {}
        }))
        .unwrap();
        assert_eq!(doc.info.title.as_deref(), Some("Billing"));
        assert_eq!(doc.extensions().get("x-cb-api-version"), Some(&json!(2)));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Document::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::DocumentParse { .. }));
    }

    #[test]
    fn test_resolve_ref() {
        let doc = Document::from_value(json!({
            "components": {"schemas": {"Customer": {"type": "object"}}}
        }))
        .unwrap();
        let (name, schema) = doc.resolve_ref("#/components/schemas/Customer").unwrap();
        assert_eq!(name, "Customer");
        assert!(schema.is_object());
        assert!(doc.resolve_ref("#/components/schemas/Missing").is_err());
        assert!(doc.resolve_ref("other.yaml#/Customer").is_err());
    }

    #[test]
    fn test_schema_helpers() {
        let schema: Schema = serde_json::from_value(json!({
            "type": ["string", "null"],
            "enum": ["on", "off"],
            "x-cb-sort-order": 3
        }))
        .unwrap();
        assert_eq!(schema.primary_type(), Some("string"));
        assert_eq!(
            schema.string_enum_values(),
            Some(vec!["on".to_string(), "off".to_string()])
        );
        assert_eq!(schema.extensions.get("x-cb-sort-order"), Some(&json!(3)));
    }

    #[test]
    fn test_numeric_enum_is_not_string_enum() {
        let schema: Schema = serde_json::from_value(json!({"type": "integer", "enum": [1, 2]})).unwrap();
        assert_eq!(schema.string_enum_values(), None);
    }

    #[test]
    fn test_success_schema_falls_back_to_first_2xx() {
        let op: Operation = serde_json::from_value(json!({
            "responses": {
                "202": {"content": {"application/json": {"schema": {"type": "object"}}}},
                "400": {"content": {"application/json": {"schema": {"type": "string"}}}}
            }
        }))
        .unwrap();
        assert!(op.success_schema().unwrap().is_object());
    }

    #[test]
    fn test_request_body_prefers_form_encoding() {
        let body: RequestBody = serde_json::from_value(json!({
            "content": {
                "application/json": {"schema": {"type": "string"}},
                "application/x-www-form-urlencoded": {"schema": {"type": "object"}}
            }
        }))
        .unwrap();
        assert!(body.schema().unwrap().is_object());
    }

    #[test]
    fn test_path_item_operations() {
        let item: PathItem = serde_json::from_value(json!({
            "post": {"operationId": "create"},
            "get": {"operationId": "list"},
            "delete": {"operationId": "remove"}
        }))
        .unwrap();
        let methods: Vec<_> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);
        assert_eq!(item.unsupported_methods().collect::<Vec<_>>(), vec!["DELETE"]);
    }
}
