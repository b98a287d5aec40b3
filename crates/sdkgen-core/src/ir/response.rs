//! Success response views of an action.

use super::attribute::Attribute;

/// Pagination cursor field of list responses.
pub const NEXT_OFFSET: &str = "next_offset";

/// Field holding the items of a list response.
pub const LIST_FIELD: &str = "list";

/// Shape of an action's success response.
#[derive(Debug, Clone)]
pub enum ActionResponse {
    /// One object
    Single(Response),
    /// A page of items plus a cursor
    List(ListResponse),
    /// No success body
    Empty,
}

impl ActionResponse {
    /// Top-level fields of a single-object response.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::Single(response) => &response.attributes,
            Self::List(_) | Self::Empty => &[],
        }
    }

    /// `true` for list responses.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

/// A single-object response.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Fields of the success schema
    pub attributes: Vec<Attribute>,
}

/// A paginated list response.
#[derive(Debug, Clone, Default)]
pub struct ListResponse {
    /// Fields of each list item
    pub item_attributes: Vec<Attribute>,
    /// The pagination cursor field, when declared
    pub next_offset: Option<Attribute>,
}

impl ListResponse {
    /// Fields of each list item.
    #[must_use]
    pub fn items(&self) -> &[Attribute] {
        &self.item_attributes
    }
}
