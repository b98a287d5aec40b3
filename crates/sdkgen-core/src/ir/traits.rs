//! Attribute classification.
//!
//! Every attribute is classified exactly once while the IR is built. The
//! result is an immutable [`AttributeTraits`] record; backends match on its
//! [`AttributeShape`] instead of re-reading raw metadata.
//!
//! Array attributes defer enum, sub-resource, deprecation, provenance and
//! ordering questions to their item schema whenever their own schema is
//! silent. Non-array attributes never look at an item schema.

use super::context::{BuildContext, Resolved};
use super::enumeration::{Enum, EnumOrigin, enum_name_from_reference};
use crate::document::Schema;
use crate::extension::{
    DEFAULT_DEPRECATION_MESSAGE, ExtensionKey, Extensions, UNORDERED, lookup_string,
};
use crate::inflect::{singularize, to_pascal_case, to_snake_case};
use crate::Result;
use serde::Serialize;
use std::fmt;

/// Name of the attribute that is always a sort filter.
pub const SORT_BY: &str = "sort_by";

/// Scalar value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// Plain string
    String,
    /// 32-bit integer
    Integer,
    /// 64-bit integer (`format: int64`)
    Long,
    /// Floating point number
    Number,
    /// Arbitrary-precision decimal carried as a string
    Decimal,
    /// Boolean
    Boolean,
    /// Money amount in minor units
    Money,
    /// Money amount that needs 64 bits
    LongMoney,
    /// ISO date or date-time string
    DateTime,
    /// Seconds since the epoch
    UnixTime,
}

/// Structural classification of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeShape {
    /// A scalar value
    Scalar(ScalarKind),
    /// A string enum
    Enum(Enum),
    /// An inline object whose members are nested attributes
    Object,
    /// A nested object emitted as its own type inside the parent resource
    SubResource {
        /// Generated type name, PascalCase
        type_name: String,
    },
    /// A reference to an independently generated top-level resource
    ResourceReference {
        /// Referenced resource id
        resource_id: String,
        /// Referenced resource type name
        type_name: String,
    },
    /// An object with arbitrary keys
    OpenMap,
    /// An array of the inner shape
    List(Box<AttributeShape>),
    /// Anything the classifier cannot map (unions, untyped, non-string enums)
    Unknown,
}

impl AttributeShape {
    /// Element shape for lists, the shape itself otherwise.
    #[must_use]
    pub fn element(&self) -> &Self {
        match self {
            Self::List(inner) => inner.element(),
            other => other,
        }
    }

    /// `true` for arrays.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Enum definition of an enum or list-of-enum shape.
    #[must_use]
    pub fn enum_def(&self) -> Option<&Enum> {
        match self.element() {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Type name of a sub-resource or list-of-sub-resource shape.
    #[must_use]
    pub fn sub_resource_type(&self) -> Option<&str> {
        match self.element() {
            Self::SubResource { type_name } => Some(type_name),
            _ => None,
        }
    }

    /// `(resource_id, type_name)` of a resource reference shape.
    #[must_use]
    pub fn resource_reference(&self) -> Option<(&str, &str)> {
        match self.element() {
            Self::ResourceReference {
                resource_id,
                type_name,
            } => Some((resource_id, type_name)),
            _ => None,
        }
    }

    /// `true` for shapes that own nested attributes.
    #[must_use]
    pub const fn has_members(&self) -> bool {
        match self {
            Self::Object | Self::SubResource { .. } => true,
            Self::List(inner) => inner.has_members(),
            _ => false,
        }
    }
}

/// Filter parameter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilterKind {
    /// `StringFilter`
    String,
    /// `NumberFilter`
    Number,
    /// `TimestampFilter`
    Timestamp,
    /// `BooleanFilter`
    Boolean,
    /// `EnumFilter`
    Enum,
    /// `DateFilter`
    Date,
    /// Sort parameter (`sort_by`)
    Sort,
}

impl FilterKind {
    /// Parses an authored filter name such as `EnumFilter`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.strip_suffix("Filter").unwrap_or(name) {
            "String" => Some(Self::String),
            "Number" => Some(Self::Number),
            "Timestamp" => Some(Self::Timestamp),
            "Boolean" => Some(Self::Boolean),
            "Enum" => Some(Self::Enum),
            "Date" => Some(Self::Date),
            "Sort" => Some(Self::Sort),
            _ => None,
        }
    }

    /// Authored name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "StringFilter",
            Self::Number => "NumberFilter",
            Self::Timestamp => "TimestampFilter",
            Self::Boolean => "BooleanFilter",
            Self::Enum => "EnumFilter",
            Self::Date => "DateFilter",
            Self::Sort => "SortFilter",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deprecation details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    /// Message shown to SDK users
    pub message: String,
}

/// Classification of one attribute, computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTraits {
    /// Structural shape
    pub shape: AttributeShape,
    /// Set when the attribute (or, for arrays, its item) is deprecated
    pub deprecation: Option<Deprecation>,
    /// Hidden from client SDKs
    pub hidden: bool,
    /// Early-access only
    pub eap: bool,
    /// Marked as a dependent attribute; carried through, never classified on
    pub dependent: bool,
    /// Filter kind when this is a filter parameter
    pub filter: Option<FilterKind>,
    /// Nests one level as `parent[child]`
    pub multi_value: bool,
    /// Pagination cursor parameter
    pub pagination: bool,
    /// Supports the "is present" operator
    pub presence_operator: bool,
    /// Request body sent as indexed arrays (`parent[child][index]`)
    pub composite_array_body: bool,
    /// Position among siblings, `-1` when unordered
    pub sort_order: i64,
}

impl AttributeTraits {
    /// `true` for enums and lists of enums.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.shape.enum_def().is_some()
    }

    /// `true` for lists of enums.
    #[must_use]
    pub fn is_list_of_enum(&self) -> bool {
        self.shape.is_list() && self.is_enum()
    }

    /// `true` for enums defined once at the document root.
    #[must_use]
    pub fn is_global_enum(&self) -> bool {
        self.shape.enum_def().is_some_and(Enum::is_global)
    }

    /// `true` for enums owned by an external type.
    #[must_use]
    pub fn is_external_enum(&self) -> bool {
        self.shape
            .enum_def()
            .is_some_and(|e| e.origin() == EnumOrigin::External)
    }

    /// `true` for sub-resources and lists of sub-resources.
    #[must_use]
    pub fn is_sub_resource(&self) -> bool {
        self.shape.sub_resource_type().is_some()
    }

    /// `true` for lists of sub-resources.
    #[must_use]
    pub fn is_list_sub_resource(&self) -> bool {
        self.shape.is_list() && self.is_sub_resource()
    }

    /// `true` for references to top-level resources.
    #[must_use]
    pub fn is_global_resource_reference(&self) -> bool {
        self.shape.resource_reference().is_some()
    }

    /// `true` for lists whose element is a scalar.
    #[must_use]
    pub fn is_list_of_simple_type(&self) -> bool {
        self.shape.is_list() && matches!(self.shape.element(), AttributeShape::Scalar(_))
    }

    /// `true` for open maps.
    #[must_use]
    pub const fn is_open_map(&self) -> bool {
        matches!(self.shape, AttributeShape::OpenMap)
    }

    /// `true` when deprecated.
    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    /// `true` for filter parameters.
    #[must_use]
    pub const fn is_filter(&self) -> bool {
        self.filter.is_some()
    }
}

/// Output of classification: traits plus where nested members come from.
pub(crate) struct Classified<'a> {
    pub traits: AttributeTraits,
    pub extensions: Extensions,
    pub members: Option<(&'a Schema, BuildContext<'a>)>,
}

/// Classifies a resolved node.
///
/// `owner` names the enclosing resource or attribute and seeds local enum
/// names.
pub(crate) fn classify<'a>(
    name: &str,
    owner: &str,
    node: &Resolved<'a>,
    ctx: &BuildContext<'a>,
) -> Result<Classified<'a>> {
    let own = ctx.decode(&node.raw)?;

    let (shape, members, extensions, deprecated) = match node.body.items.as_deref() {
        Some(items) if node.body.is_array() => {
            let item = ctx.resolve(items)?;
            let item_ext = ctx.decode(&item.raw)?;
            let merged = with_item_fallback(&own, &item_ext);
            let (inner, members) = shape_of(name, owner, &item, &merged, ctx)?;
            let deprecated = node.deprecated || item.deprecated;
            (AttributeShape::List(Box::new(inner)), members, merged, deprecated)
        }
        None if node.body.is_array() => (
            AttributeShape::List(Box::new(AttributeShape::Unknown)),
            None,
            own,
            node.deprecated,
        ),
        _ => {
            let (shape, members) = shape_of(name, owner, node, &own, ctx)?;
            (shape, members, own, node.deprecated)
        }
    };

    let operands = members.as_ref().map_or(node.body, |(schema, _)| *schema);
    let filter = filter_kind(name, &extensions, operands, ctx)?;
    let deprecation = deprecated.then(|| Deprecation {
        message: extensions
            .deprecation_message
            .clone()
            .unwrap_or_else(|| DEFAULT_DEPRECATION_MESSAGE.to_string()),
    });

    let traits = AttributeTraits {
        shape,
        deprecation,
        hidden: extensions.hidden_from_sdk,
        eap: extensions.is_eap,
        dependent: extensions.is_dependent_attribute,
        filter,
        multi_value: extensions.is_multi_value_attribute,
        pagination: extensions.is_pagination_parameter,
        presence_operator: extensions.is_presence_operator_supported,
        composite_array_body: extensions.is_composite_array_request_body,
        sort_order: extensions.sort_order.unwrap_or(UNORDERED),
    };
    Ok(Classified {
        traits,
        extensions,
        members,
    })
}

/// Fills the array's unset enum, sub-resource, provenance, deprecation and
/// ordering keys from its item. Flags combine with OR, optional values keep
/// the array's own when present.
pub(crate) fn with_item_fallback(own: &Extensions, item: &Extensions) -> Extensions {
    let mut merged = own.clone();
    merged.is_sub_resource |= item.is_sub_resource;
    merged.is_global_resource_reference |= item.is_global_resource_reference;
    merged.is_global_enum |= item.is_global_enum;
    merged.is_external_enum |= item.is_external_enum;
    merged.is_money_column |= item.is_money_column;
    merged.is_long_money_column |= item.is_long_money_column;
    if merged.resource_id.is_none() {
        merged.resource_id.clone_from(&item.resource_id);
    }
    if merged.sub_resource_name.is_none() {
        merged.sub_resource_name.clone_from(&item.sub_resource_name);
    }
    if merged.global_enum_reference.is_none() {
        merged.global_enum_reference.clone_from(&item.global_enum_reference);
    }
    if merged.deprecation_message.is_none() {
        merged.deprecation_message.clone_from(&item.deprecation_message);
    }
    if merged.deprecated_enum_values.is_empty() {
        merged.deprecated_enum_values.clone_from(&item.deprecated_enum_values);
    }
    merged.sort_order = merged.sort_order.or(item.sort_order);
    merged
}

type ShapeWithMembers<'a> = (AttributeShape, Option<(&'a Schema, BuildContext<'a>)>);

fn shape_of<'a>(
    name: &str,
    owner: &str,
    node: &Resolved<'a>,
    ext: &Extensions,
    ctx: &BuildContext<'a>,
) -> Result<ShapeWithMembers<'a>> {
    let body = node.body;

    if let Some((target_name, _)) = node.target
        && let Some(resource_id) = lookup_string(&body.extensions, ExtensionKey::ResourceId)
    {
        return Ok((
            AttributeShape::ResourceReference {
                resource_id: resource_id.to_string(),
                type_name: target_name.to_string(),
            },
            None,
        ));
    }
    if ext.is_global_resource_reference
        && let Some(resource_id) = &ext.resource_id
    {
        return Ok((
            AttributeShape::ResourceReference {
                resource_id: resource_id.clone(),
                type_name: to_pascal_case(resource_id),
            },
            None,
        ));
    }
    if body.is_union() {
        return Ok((AttributeShape::Unknown, None));
    }
    if body.enum_values.is_some() {
        let shape = body.string_enum_values().map_or(AttributeShape::Unknown, |values| {
            AttributeShape::Enum(build_enum(name, owner, values, ext, node.target))
        });
        return Ok((shape, None));
    }
    if body.is_object() {
        if body.properties.as_ref().is_none_or(|p| p.is_empty()) {
            return Ok((AttributeShape::OpenMap, None));
        }
        let member_ctx = match node.target {
            Some((target_name, _)) => ctx.enter_ref(target_name)?,
            None => ctx.clone(),
        };
        let shape = if ext.is_sub_resource {
            let type_name = ext
                .sub_resource_name
                .clone()
                .or_else(|| node.target.map(|(target_name, _)| target_name.to_string()))
                .unwrap_or_else(|| to_pascal_case(&singularize(name)));
            AttributeShape::SubResource { type_name }
        } else {
            AttributeShape::Object
        };
        return Ok((shape, Some((body, member_ctx))));
    }
    let shape = scalar_kind(body, ext).map_or(AttributeShape::Unknown, AttributeShape::Scalar);
    Ok((shape, None))
}

fn build_enum(
    name: &str,
    owner: &str,
    values: Vec<String>,
    ext: &Extensions,
    target: Option<(&str, &str)>,
) -> Enum {
    let deprecated = &ext.deprecated_enum_values;
    if let Some((target_name, reference)) = target {
        return Enum::new(
            enum_name_from_reference(target_name),
            values,
            deprecated,
            EnumOrigin::Global,
        )
        .with_reference(reference);
    }
    if let Some(reference) = &ext.global_enum_reference {
        return Enum::new(
            enum_name_from_reference(reference),
            values,
            deprecated,
            EnumOrigin::Global,
        )
        .with_reference(reference);
    }
    if ext.is_global_enum {
        return Enum::new(to_snake_case(name), values, deprecated, EnumOrigin::Global);
    }
    let origin = if ext.is_external_enum {
        EnumOrigin::External
    } else {
        EnumOrigin::Local
    };
    Enum::new(local_enum_name(owner, name), values, deprecated, origin)
}

/// Name of an inline enum owned by `owner`.
#[must_use]
pub fn local_enum_name(owner: &str, attribute: &str) -> String {
    format!("{}_{}", singularize(&to_snake_case(owner)), attribute)
}

fn scalar_kind(schema: &Schema, ext: &Extensions) -> Option<ScalarKind> {
    let format = schema.format.as_deref();
    let kind = match schema.primary_type()? {
        "string" => match format {
            Some("date-time" | "date") => ScalarKind::DateTime,
            Some("decimal") => ScalarKind::Decimal,
            Some("unix-time") => ScalarKind::UnixTime,
            _ => ScalarKind::String,
        },
        "integer" if ext.is_long_money_column => ScalarKind::LongMoney,
        "integer" if ext.is_money_column => ScalarKind::Money,
        "integer" => match format {
            Some("unix-time") => ScalarKind::UnixTime,
            Some("int64") => ScalarKind::Long,
            _ => ScalarKind::Integer,
        },
        "number" => match format {
            Some("decimal") => ScalarKind::Decimal,
            _ => ScalarKind::Number,
        },
        "boolean" => ScalarKind::Boolean,
        _ => return None,
    };
    Some(kind)
}

fn filter_kind(
    name: &str,
    ext: &Extensions,
    body: &Schema,
    ctx: &BuildContext<'_>,
) -> Result<Option<FilterKind>> {
    if name == SORT_BY {
        return Ok(Some(FilterKind::Sort));
    }
    if !ext.is_filter_parameter && ext.sdk_filter_name.is_none() {
        return Ok(None);
    }
    if let Some(explicit) = &ext.sdk_filter_name {
        match FilterKind::from_name(explicit) {
            Some(kind) => return Ok(Some(kind)),
            None => tracing::warn!(
                filter = %explicit,
                location = %ctx.location(),
                "Unknown filter name, inferring from operands"
            ),
        }
    }
    let operand = match body.property_iter().next() {
        Some((_, first)) => ctx.resolve(first)?.body,
        None => body,
    };
    Ok(Some(infer_filter_kind(operand)))
}

fn infer_filter_kind(operand: &Schema) -> FilterKind {
    let operand = match operand.items.as_deref() {
        Some(items) if operand.is_array() => items,
        _ => operand,
    };
    if operand.string_enum_values().is_some() {
        return FilterKind::Enum;
    }
    match (operand.primary_type(), operand.format.as_deref()) {
        (_, Some("unix-time" | "date-time")) => FilterKind::Timestamp,
        (_, Some("date")) => FilterKind::Date,
        (Some("integer" | "number"), _) => FilterKind::Number,
        (Some("boolean"), _) => FilterKind::Boolean,
        _ => FilterKind::String,
    }
}
