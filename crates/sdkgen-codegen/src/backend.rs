//! The contract every target-language backend implements.
//!
//! A backend maps classified IR nodes to target types and identifiers. The
//! generic [`Shaper`](crate::Shaper) drives it and assembles the
//! renderer-ready structure, so a backend never walks the IR itself.
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::{Backend, NameKind, TypeScriptBackend};
//!
//! let backend = TypeScriptBackend::new();
//! assert_eq!(backend.naming_convention("line_item", NameKind::Type), "LineItem");
//! assert_eq!(backend.naming_convention("update_billing_info", NameKind::Action), "updateBillingInfo");
//! ```

use crate::context::ShapingContext;
use crate::shaped::{ParamKind, ParamList, ShapedParam};
use sdkgen_core::{Action, Attribute, Resource};
use serde::Serialize;

/// Broad category of a target type.
///
/// Every reachable shape maps to exactly one category; `Unknown` is the
/// explicit marker for shapes a backend cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    /// Text
    String,
    /// Floating point
    Number,
    /// Whole number
    Integer,
    /// Boolean
    Boolean,
    /// Enumeration
    Enum,
    /// Inline object or sub-resource
    Object,
    /// Reference to another top-level resource
    Reference,
    /// Sequence
    Array,
    /// String-keyed map of arbitrary values
    OpenMap,
    /// Money amount
    Money,
    /// Date or date-time
    DateTime,
    /// Epoch seconds
    UnixTime,
    /// Arbitrary-precision decimal
    Decimal,
    /// Filter parameter
    Filter,
    /// Unmappable shape
    Unknown,
}

/// A backend's rendering of one attribute's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetType {
    /// Type expression in the target language
    pub expr: String,
    /// Category of the type
    pub category: TypeCategory,
    /// Element type for arrays
    pub element: Option<Box<TargetType>>,
}

impl TargetType {
    /// Creates a non-array type.
    #[must_use]
    pub fn new(expr: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            expr: expr.into(),
            category,
            element: None,
        }
    }

    /// Creates an array type around `element`.
    #[must_use]
    pub fn array(expr: impl Into<String>, element: Self) -> Self {
        Self {
            expr: expr.into(),
            category: TypeCategory::Array,
            element: Some(Box::new(element)),
        }
    }

    /// The explicit unknown marker.
    #[must_use]
    pub fn unknown(expr: impl Into<String>) -> Self {
        Self::new(expr, TypeCategory::Unknown)
    }

    /// Element type for arrays, the type itself otherwise.
    #[must_use]
    pub fn element_or_self(&self) -> &Self {
        self.element.as_deref().unwrap_or(self)
    }
}

/// What a name is used for; backends case it accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// Resource, sub-resource or enum type
    Type,
    /// Attribute or property key
    Attribute,
    /// Enum member
    EnumMember,
    /// Action method
    Action,
    /// Request parameter class
    RequestClass,
    /// Response class
    ResponseClass,
    /// Local variable or function parameter
    Parameter,
}

/// A node that can be ordered among its siblings.
#[derive(Debug, Clone, Copy)]
pub enum SortNode<'a> {
    /// A resource
    Resource(&'a Resource),
    /// An action
    Action(&'a Action),
    /// An attribute
    Attribute(&'a Attribute),
}

impl SortNode<'_> {
    /// The node's classified sort order.
    #[must_use]
    pub const fn sort_order(&self) -> i64 {
        match self {
            Self::Resource(r) => r.sort_order(),
            Self::Action(a) => a.sort_order(),
            Self::Attribute(a) => a.sort_order(),
        }
    }
}

/// Target-language backend.
///
/// Implementations must be stateless; anything accumulated while shaping
/// lives in the [`ShapingContext`] passed to each call.
pub trait Backend: Send + Sync {
    /// Short backend name, e.g. `typescript`.
    fn name(&self) -> &'static str;

    /// Maps an attribute to a target type.
    ///
    /// Must be total: shapes the backend cannot express map to a
    /// [`TypeCategory::Unknown`] type rather than panicking.
    fn data_type(&self, attribute: &Attribute, ctx: &mut ShapingContext) -> TargetType;

    /// Converts a raw snake or kebab name into a target identifier.
    fn naming_convention(&self, raw: &str, kind: NameKind) -> String;

    /// Sort key of a node. Siblings are stably sorted by it before shaping.
    ///
    /// Resources get a neutral key by default, so they keep the name order
    /// of [`Spec::resources`](sdkgen_core::Spec::resources). Actions and
    /// attributes sort by their classified order.
    fn sort_key(&self, node: SortNode<'_>) -> i64 {
        match node {
            SortNode::Resource(_) => 0,
            SortNode::Action(_) | SortNode::Attribute(_) => node.sort_order(),
        }
    }

    /// Renders a wire value as a target string literal.
    fn string_literal(&self, value: &str) -> String {
        format!("{value:?}")
    }

    /// Shapes an action's path, query and body parameters.
    fn shape_request_parameters(&self, action: &Action, ctx: &mut ShapingContext) -> ParamList {
        shape_parameters(self, action, ctx)
    }
}

/// Default request parameter shaping.
///
/// Filter parameters become [`ParamKind::Filter`] with `parent[operator]`
/// children. Composite-array bodies become [`ParamKind::IndexedMultiValue`]
/// with `parent[child][{index}]` children typed by element. Other
/// multi-value or object parameters become [`ParamKind::NestedObject`] with
/// `parent[child]` children. Everything else is a plain value.
#[must_use]
pub fn shape_parameters<B: Backend + ?Sized>(
    backend: &B,
    action: &Action,
    ctx: &mut ShapingContext,
) -> ParamList {
    let path = action
        .path_params()
        .iter()
        .map(|param| {
            let mut shaped = value_param(backend, param, param.name().to_string(), ctx);
            shaped.identifier = backend.naming_convention(param.name(), NameKind::Parameter);
            shaped
        })
        .collect();
    let query = sorted(backend, action.query_params())
        .into_iter()
        .map(|param| shape_param(backend, param, ctx))
        .collect();
    let body = sorted(backend, action.request_body_params())
        .into_iter()
        .map(|param| shape_param(backend, param, ctx))
        .collect();
    ParamList { path, query, body }
}

/// Attributes stably sorted by the backend's sort key.
pub(crate) fn sorted<'a, B: Backend + ?Sized>(
    backend: &B,
    attributes: &'a [Attribute],
) -> Vec<&'a Attribute> {
    let mut refs: Vec<&Attribute> = attributes.iter().collect();
    refs.sort_by_key(|a| backend.sort_key(SortNode::Attribute(a)));
    refs
}

fn param_kind(param: &Attribute) -> ParamKind {
    if param.filter_kind().is_some() {
        ParamKind::Filter
    } else if param.is_composite_array_body() {
        ParamKind::IndexedMultiValue
    } else if param.is_multi_value() || param.shape().has_members() {
        ParamKind::NestedObject
    } else {
        ParamKind::Value
    }
}

fn shape_param<B: Backend + ?Sized>(
    backend: &B,
    param: &Attribute,
    ctx: &mut ShapingContext,
) -> ShapedParam {
    let kind = param_kind(param);
    let mut shaped = value_param(backend, param, param.name().to_string(), ctx);
    shaped.kind = kind;
    shaped.filter_kind = param.filter_kind().map(|k| k.as_str().to_string());
    shaped.params = match kind {
        ParamKind::Value => Vec::new(),
        ParamKind::Filter | ParamKind::NestedObject => sorted(backend, param.attributes())
            .into_iter()
            .map(|child| {
                let address = format!("{}[{}]", param.name(), child.name());
                value_param(backend, child, address, ctx)
            })
            .collect(),
        ParamKind::IndexedMultiValue => sorted(backend, param.attributes())
            .into_iter()
            .map(|child| {
                let address = format!("{}[{}][{{index}}]", param.name(), child.name());
                let mut leaf = value_param(backend, child, address, ctx);
                let element = backend.data_type(child, ctx).element_or_self().clone();
                leaf.type_expr = element.expr;
                leaf.category = element.category;
                leaf
            })
            .collect(),
    };
    shaped
}

fn value_param<B: Backend + ?Sized>(
    backend: &B,
    param: &Attribute,
    address: String,
    ctx: &mut ShapingContext,
) -> ShapedParam {
    let target = backend.data_type(param, ctx);
    ShapedParam {
        name: param.name().to_string(),
        identifier: backend.naming_convention(param.name(), NameKind::Attribute),
        address,
        type_expr: target.expr,
        category: target.category,
        kind: ParamKind::Value,
        filter_kind: None,
        required: param.is_required(),
        deprecated: param.is_deprecated(),
        deprecation_message: param.deprecation_message().map(str::to_string),
        is_enum: param.is_enum(),
        presence_operator_supported: param.traits().presence_operator,
        pagination: param.traits().pagination,
        description: param.description().map(str::to_string),
        sort_order: backend.sort_key(SortNode::Attribute(param)),
        params: Vec::new(),
    }
}
