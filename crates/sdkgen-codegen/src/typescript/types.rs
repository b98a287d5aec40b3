//! Attribute shape to TypeScript type mapping.

use super::naming::{convert, quote_if_needed, string_literal};
use crate::backend::{NameKind, TargetType, TypeCategory};
use crate::context::ShapingContext;
use sdkgen_core::{Attribute, AttributeShape, Enum, FilterKind, ScalarKind};

/// Maps an attribute to its TypeScript type, recording imports on `ctx`.
#[must_use]
pub fn map_attribute(attribute: &Attribute, ctx: &mut ShapingContext) -> TargetType {
    if let Some(kind) = attribute.filter_kind() {
        return filter_type(kind, attribute);
    }
    map_shape(attribute.shape(), attribute, ctx)
}

fn map_shape(shape: &AttributeShape, attribute: &Attribute, ctx: &mut ShapingContext) -> TargetType {
    match shape {
        AttributeShape::Scalar(kind) => scalar_type(*kind),
        AttributeShape::Enum(e) => enum_type(e, ctx),
        AttributeShape::Object => inline_object(attribute.attributes(), ctx),
        AttributeShape::SubResource { type_name } => TargetType::new(
            format!("{}.{}", ctx.resource(), convert(type_name, NameKind::Type)),
            TypeCategory::Object,
        ),
        AttributeShape::ResourceReference { type_name, .. } => {
            let name = convert(type_name, NameKind::Type);
            ctx.reference_resource(name.clone());
            TargetType::new(name, TypeCategory::Reference)
        }
        AttributeShape::OpenMap => TargetType::new("Record<string, unknown>", TypeCategory::OpenMap),
        AttributeShape::List(inner) => {
            let element = map_shape(inner, attribute, ctx);
            let expr = if element.expr.contains(" | ") {
                format!("({})[]", element.expr)
            } else {
                format!("{}[]", element.expr)
            };
            TargetType::array(expr, element)
        }
        AttributeShape::Unknown => TargetType::unknown("unknown"),
    }
}

/// TypeScript type of a scalar kind.
#[must_use]
pub const fn scalar_type_expr(kind: ScalarKind) -> (&'static str, TypeCategory) {
    match kind {
        ScalarKind::String => ("string", TypeCategory::String),
        ScalarKind::Integer | ScalarKind::Long => ("number", TypeCategory::Integer),
        ScalarKind::Number => ("number", TypeCategory::Number),
        ScalarKind::Decimal => ("string", TypeCategory::Decimal),
        ScalarKind::Boolean => ("boolean", TypeCategory::Boolean),
        ScalarKind::Money | ScalarKind::LongMoney => ("number", TypeCategory::Money),
        ScalarKind::DateTime => ("string", TypeCategory::DateTime),
        ScalarKind::UnixTime => ("number", TypeCategory::UnixTime),
    }
}

fn scalar_type(kind: ScalarKind) -> TargetType {
    let (expr, category) = scalar_type_expr(kind);
    TargetType::new(expr, category)
}

fn enum_type(e: &Enum, ctx: &mut ShapingContext) -> TargetType {
    if e.is_global() {
        let name = convert(e.name(), NameKind::Type);
        ctx.reference_enum(name.clone());
        return TargetType::new(name, TypeCategory::Enum);
    }
    TargetType::new(literal_union(e), TypeCategory::Enum)
}

/// `'a' | 'b'` over every declared value; `string` for an empty enum.
#[must_use]
pub fn literal_union(e: &Enum) -> String {
    if e.values().is_empty() {
        return "string".to_string();
    }
    e.values()
        .iter()
        .map(|v| string_literal(v))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn inline_object(members: &[Attribute], ctx: &mut ShapingContext) -> TargetType {
    let fields: Vec<String> = members
        .iter()
        .map(|member| {
            let target = map_attribute(member, ctx);
            let optional = if member.is_required() { "" } else { "?" };
            format!("{}{optional}: {}", quote_if_needed(member.name()), target.expr)
        })
        .collect();
    let expr = if fields.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", fields.join("; "))
    };
    TargetType::new(expr, TypeCategory::Object)
}

fn filter_type(kind: FilterKind, attribute: &Attribute) -> TargetType {
    let expr = match kind {
        FilterKind::String => "filter.String".to_string(),
        FilterKind::Number => "filter.Number".to_string(),
        FilterKind::Timestamp => "filter.Timestamp".to_string(),
        FilterKind::Boolean => "filter.Boolean".to_string(),
        FilterKind::Date => "filter.Date".to_string(),
        FilterKind::Sort => "filter.Sort".to_string(),
        FilterKind::Enum => {
            let values = attribute
                .attributes()
                .iter()
                .find_map(Attribute::enum_def)
                .map_or_else(|| "string".to_string(), literal_union);
            format!("filter.Enum<{values}>")
        }
    };
    TargetType::new(expr, TypeCategory::Filter)
}
