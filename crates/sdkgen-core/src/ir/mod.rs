//! Intermediate representation.
//!
//! [`Spec`] is the entry point: it walks a [`Document`](crate::Document)
//! once and produces an immutable graph of [`Resource`], [`Action`],
//! [`Attribute`] and [`Enum`] nodes, each classified at construction.

mod action;
mod attribute;
mod context;
mod enum_resolver;
mod enumeration;
mod resource;
mod response;
mod spec;
mod traits;

pub use action::{Action, ActionTraits};
pub use attribute::Attribute;
pub use enum_resolver::EnumRegistry;
pub use enumeration::{Enum, EnumOrigin, enum_name_from_reference};
pub use resource::{DependentResource, Resource, ResourceTraits};
pub use response::{ActionResponse, LIST_FIELD, ListResponse, NEXT_OFFSET, Response};
pub use spec::Spec;
pub use traits::{
    AttributeShape, AttributeTraits, Deprecation, FilterKind, SORT_BY, ScalarKind,
    local_enum_name,
};
