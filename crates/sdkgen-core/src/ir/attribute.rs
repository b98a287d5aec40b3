//! Attributes: named, classified schema nodes.

use super::context::{BuildContext, Resolved};
use super::enumeration::Enum;
use super::traits::{AttributeShape, AttributeTraits, FilterKind, classify};
use crate::document::Schema;
use crate::extension::Extensions;
use crate::Result;

/// A resource field, request parameter or response field.
///
/// Built once with its classification and nested members; read-only
/// afterwards.
///
/// # Examples
///
/// ```
/// use sdkgen_core::{Document, GenerationConfig, Spec};
/// use serde_json::json;
///
/// let doc = Document::from_value(json!({
///     "components": {"schemas": {"Invoice": {
///         "type": "object",
///         "x-cb-resource-id": "invoice",
///         "properties": {
///             "line_items": {
///                 "type": "array",
///                 "items": {
///                     "type": "object",
///                     "x-cb-is-sub-resource": true,
///                     "properties": {"amount": {"type": "integer"}}
///                 }
///             }
///         }
///     }}}
/// }))
/// .unwrap();
///
/// let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();
/// let line_items = &spec.resource("invoice").unwrap().attributes()[0];
/// assert!(line_items.is_list_sub_resource_attribute());
/// assert_eq!(line_items.sub_resource_type_name(), Some("LineItem"));
/// assert_eq!(line_items.attributes()[0].name(), "amount");
/// ```
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    schema: Schema,
    required: bool,
    extensions: Extensions,
    traits: AttributeTraits,
    attributes: Vec<Attribute>,
}

impl Attribute {
    /// Builds an attribute one level below `ctx`.
    pub(crate) fn build<'a>(
        name: &str,
        schema: &'a Schema,
        required: bool,
        owner: &str,
        ctx: &BuildContext<'a>,
    ) -> Result<Self> {
        let ctx = ctx.descend(name)?;
        let node = ctx.resolve(schema)?;
        Self::from_resolved(name, &node, required, owner, &ctx)
    }

    fn from_resolved<'a>(
        name: &str,
        node: &Resolved<'a>,
        required: bool,
        owner: &str,
        ctx: &BuildContext<'a>,
    ) -> Result<Self> {
        let classified = classify(name, owner, node, ctx)?;
        let attributes = match &classified.members {
            Some((object, member_ctx)) if classified.traits.shape.has_members() => {
                build_members(object, name, member_ctx)?
            }
            _ => Vec::new(),
        };
        Ok(Self {
            name: name.to_string(),
            schema: node.to_schema(),
            required,
            extensions: classified.extensions,
            traits: classified.traits,
            attributes,
        })
    }

    /// Wire name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved schema, `$ref` followed and extensions merged.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Description text, untouched.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.schema.description.as_deref()
    }

    /// Whether the attribute must be present.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Decoded extensions, item fallback applied for arrays.
    #[must_use]
    pub const fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Classification record.
    #[must_use]
    pub const fn traits(&self) -> &AttributeTraits {
        &self.traits
    }

    /// Structural shape.
    #[must_use]
    pub const fn shape(&self) -> &AttributeShape {
        &self.traits.shape
    }

    /// Nested members, sorted by sort order.
    #[must_use]
    pub fn attributes(&self) -> &[Self] {
        &self.attributes
    }

    /// Sort position, `-1` when unordered.
    #[must_use]
    pub const fn sort_order(&self) -> i64 {
        self.traits.sort_order
    }

    /// Enum definition of an enum or list-of-enum attribute.
    #[must_use]
    pub fn enum_def(&self) -> Option<&Enum> {
        self.traits.shape.enum_def()
    }

    /// `true` for enums and lists of enums.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.traits.is_enum()
    }

    /// `true` for lists of enums.
    #[must_use]
    pub fn is_list_of_enum(&self) -> bool {
        self.traits.is_list_of_enum()
    }

    /// `true` for sub-resources and lists of them.
    #[must_use]
    pub fn is_sub_resource(&self) -> bool {
        self.traits.is_sub_resource()
    }

    /// `true` when the document marks this attribute as dependent.
    ///
    /// Informational only: the dependent-resource views are derived from
    /// the shape, this flag is passed through for backends that want it.
    #[must_use]
    pub const fn is_dependent(&self) -> bool {
        self.traits.dependent
    }

    /// `true` for lists of sub-resources.
    #[must_use]
    pub fn is_list_sub_resource_attribute(&self) -> bool {
        self.traits.is_list_sub_resource()
    }

    /// Generated type name of a sub-resource attribute.
    #[must_use]
    pub fn sub_resource_type_name(&self) -> Option<&str> {
        self.traits.shape.sub_resource_type()
    }

    /// `true` for references to top-level resources.
    #[must_use]
    pub fn is_global_resource_reference(&self) -> bool {
        self.traits.is_global_resource_reference()
    }

    /// `true` when hidden from client SDKs.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.traits.hidden
    }

    /// `true` when deprecated.
    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.traits.is_deprecated()
    }

    /// Deprecation message, present only when deprecated.
    #[must_use]
    pub fn deprecation_message(&self) -> Option<&str> {
        self.traits.deprecation.as_ref().map(|d| d.message.as_str())
    }

    /// Filter kind of a filter parameter.
    #[must_use]
    pub const fn filter_kind(&self) -> Option<FilterKind> {
        self.traits.filter
    }

    /// `true` for multi-value attributes.
    #[must_use]
    pub const fn is_multi_value(&self) -> bool {
        self.traits.multi_value
    }

    /// `true` for composite-array request bodies.
    #[must_use]
    pub const fn is_composite_array_body(&self) -> bool {
        self.traits.composite_array_body
    }

    /// This attribute followed by all nested members, depth first.
    #[must_use]
    pub fn walk(&self) -> Vec<&Self> {
        let mut out = vec![self];
        for child in &self.attributes {
            out.extend(child.walk());
        }
        out
    }
}

/// Builds the visible members of an object schema.
///
/// Null-typed properties are dropped, hidden ones too unless QA mode is on.
/// The result is stably sorted by sort order.
pub(crate) fn build_members<'a>(
    object: &'a Schema,
    owner: &str,
    ctx: &BuildContext<'a>,
) -> Result<Vec<Attribute>> {
    let mut members = Vec::new();
    for (name, property) in object.property_iter() {
        if property.is_null_type() {
            tracing::debug!(attribute = name, location = %ctx.location(), "Dropping null-typed attribute");
            continue;
        }
        let attribute = Attribute::build(name, property, object.is_required(name), owner, ctx)?;
        if attribute.is_hidden() && !ctx.qa_mode() {
            tracing::debug!(attribute = name, location = %ctx.location(), "Filtered hidden attribute");
            continue;
        }
        members.push(attribute);
    }
    sort_by_order(&mut members, Attribute::sort_order);
    Ok(members)
}

/// Stable sort by a sort-order key.
///
/// Unordered items (`-1`) come first and keep their encounter order.
pub(crate) fn sort_by_order<T>(items: &mut [T], key: impl Fn(&T) -> i64) {
    items.sort_by_key(|item| key(item));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, GenerationConfig};
    use serde_json::{Value, json};

    fn members(doc: &Document, config: &GenerationConfig, schema: Value) -> crate::Result<Vec<Attribute>> {
        let schema: Schema = serde_json::from_value(schema).unwrap();
        let ctx = BuildContext::new(doc, config, "customer");
        build_members(&schema, "customer", &ctx)
    }

    #[test]
    fn test_stable_sort_unordered_first() {
        let doc = Document::default();
        let config = GenerationConfig::default();
        let attrs = members(
            &doc,
            &config,
            json!({"type": "object", "properties": {
                "c": {"type": "string", "x-cb-sort-order": 5},
                "a": {"type": "string"},
                "d": {"type": "string", "x-cb-sort-order": 1},
                "b": {"type": "string"}
            }}),
        )
        .unwrap();
        let names: Vec<_> = attrs.iter().map(Attribute::name).collect();
        assert_eq!(names, vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_hidden_and_null_members_dropped() {
        let doc = Document::default();
        let schema = json!({"type": "object", "properties": {
            "id": {"type": "string"},
            "secret": {"type": "string", "x-cb-hidden-from-client-sdk": true},
            "nothing": {"type": "null"}
        }});

        let attrs = members(&doc, &GenerationConfig::default(), schema.clone()).unwrap();
        assert_eq!(attrs.len(), 1);

        let qa = GenerationConfig::builder().qa_mode(true).build();
        let attrs = members(&doc, &qa, schema).unwrap();
        let names: Vec<_> = attrs.iter().map(Attribute::name).collect();
        assert_eq!(names, vec!["id", "secret"]);
        assert!(attrs[1].is_hidden());
    }

    #[test]
    fn test_nested_enum_named_after_parent_attribute() {
        let doc = Document::default();
        let attrs = members(
            &doc,
            &GenerationConfig::default(),
            json!({"type": "object", "properties": {
                "line_items": {"type": "array", "items": {
                    "type": "object",
                    "x-cb-is-sub-resource": true,
                    "properties": {"entity_type": {"type": "string", "enum": ["plan", "addon"]}}
                }}
            }}),
        )
        .unwrap();
        let entity_type = &attrs[0].attributes()[0];
        assert_eq!(entity_type.enum_def().unwrap().name(), "line_item_entity_type");
        assert_eq!(attrs[0].walk().len(), 2);
    }

    #[test]
    fn test_required_flag() {
        let doc = Document::default();
        let attrs = members(
            &doc,
            &GenerationConfig::default(),
            json!({"type": "object", "required": ["id"], "properties": {
                "id": {"type": "string"},
                "email": {"type": "string"}
            }}),
        )
        .unwrap();
        assert!(attrs[0].is_required());
        assert!(!attrs[1].is_required());
    }

    #[test]
    fn test_self_referencing_sub_resource_is_cycle() {
        let doc = Document::from_value(json!({"components": {"schemas": {
            "Node": {"type": "object", "x-cb-is-sub-resource": true, "properties": {
                "child": {"$ref": "#/components/schemas/Node"}
            }}
        }}}))
        .unwrap();
        let err = members(
            &doc,
            &GenerationConfig::default(),
            json!({"type": "object", "properties": {"root": {"$ref": "#/components/schemas/Node"}}}),
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::CyclicReference { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let doc = Document::default();
        let config = GenerationConfig::builder().max_depth(2).build();
        let err = members(
            &doc,
            &config,
            json!({"type": "object", "properties": {"a": {"type": "object", "properties": {
                "b": {"type": "object", "properties": {"c": {"type": "string"}}}
            }}}}),
        )
        .unwrap_err();
        assert!(err.is_reference_error());
    }
}
