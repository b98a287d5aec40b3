//! Enum definitions.

use crate::inflect::to_snake_case;
use serde::Serialize;

/// Where an enum definition comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumOrigin {
    /// Declared once at the document root, referenced by name
    Global,
    /// Inline on a resource attribute
    Local,
    /// Inline, but owned by a type defined outside the generated SDK
    External,
    /// Found only inside action parameters
    SchemaLess,
}

/// A string enum.
///
/// Only the declared values and the deprecated subset are stored; the
/// valid values are always derived from them.
///
/// # Examples
///
/// ```
/// use sdkgen_core::{Enum, EnumOrigin};
///
/// let status = Enum::new(
///     "card_status",
///     vec!["no_card".into(), "valid".into(), "expired".into()],
///     &["valid".to_string()],
///     EnumOrigin::Global,
/// );
/// assert_eq!(status.valid_values(), vec!["no_card", "expired"]);
/// assert_eq!(status.deprecated_values(), ["valid"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    name: String,
    values: Vec<String>,
    deprecated_values: Vec<String>,
    origin: EnumOrigin,
    reference: Option<String>,
}

impl Enum {
    /// Creates an enum.
    ///
    /// Deprecated values not present in `values` are dropped; the rest
    /// keep their declared order.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        values: Vec<String>,
        deprecated: &[String],
        origin: EnumOrigin,
    ) -> Self {
        let name = name.into();
        for stray in deprecated.iter().filter(|d| !values.contains(d)) {
            tracing::debug!(enum_name = %name, value = %stray, "Deprecated value is not declared, ignoring");
        }
        let deprecated_values = values
            .iter()
            .filter(|v| deprecated.contains(v))
            .cloned()
            .collect();
        Self {
            name,
            values,
            deprecated_values,
            origin,
            reference: None,
        }
    }

    /// Marks the enum as a reference to a globally defined enum.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Returns a copy with a different origin.
    #[must_use]
    pub fn with_origin(mut self, origin: EnumOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Snake-case enum name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared values in order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Deprecated values, in declared order.
    #[must_use]
    pub fn deprecated_values(&self) -> &[String] {
        &self.deprecated_values
    }

    /// Declared values that are not deprecated, in declared order.
    #[must_use]
    pub fn valid_values(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|v| !self.deprecated_values.contains(v))
            .map(String::as_str)
            .collect()
    }

    /// Whether a value is deprecated.
    #[must_use]
    pub fn is_deprecated(&self, value: &str) -> bool {
        self.deprecated_values.iter().any(|d| d == value)
    }

    /// Origin of the definition.
    #[must_use]
    pub const fn origin(&self) -> EnumOrigin {
        self.origin
    }

    /// Document path of the global definition this enum stands for.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// `true` when backends should refer to the enum by name rather than
    /// inline its values.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(self.origin, EnumOrigin::Global)
    }
}

/// Derives an enum name from a reference path.
///
/// Takes the last path segment, strips a file extension and converts the
/// result to snake case.
///
/// # Examples
///
/// ```
/// use sdkgen_core::ir::enum_name_from_reference;
///
/// assert_eq!(enum_name_from_reference("#/components/schemas/AutoCollection"), "auto_collection");
/// assert_eq!(enum_name_from_reference("./enums/card_status.yaml"), "card_status");
/// ```
#[must_use]
pub fn enum_name_from_reference(reference: &str) -> String {
    let segment = reference.rsplit('/').next().unwrap_or(reference);
    let stem = segment
        .rsplit_once('.')
        .map_or(segment, |(stem, _)| stem);
    to_snake_case(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_valid_and_deprecated_partition_declared_values() {
        let e = Enum::new(
            "status",
            strings(&["active", "paused", "cancelled"]),
            &strings(&["cancelled", "paused"]),
            EnumOrigin::Local,
        );
        // deprecated keeps declared order, not the order of the hint list
        assert_eq!(e.deprecated_values(), strings(&["paused", "cancelled"]));
        assert_eq!(e.valid_values(), vec!["active"]);

        let mut union: Vec<&str> = e.valid_values();
        union.extend(e.deprecated_values().iter().map(String::as_str));
        assert_eq!(union.len(), e.values().len());
        for v in e.values() {
            assert!(union.contains(&v.as_str()));
        }
    }

    #[test]
    fn test_undeclared_deprecated_values_are_dropped() {
        let e = Enum::new("mode", strings(&["on"]), &strings(&["off"]), EnumOrigin::Local);
        assert!(e.deprecated_values().is_empty());
        assert_eq!(e.valid_values(), vec!["on"]);
    }

    #[test]
    fn test_reference_and_origin() {
        let e = Enum::new("auto_collection", strings(&["on", "off"]), &[], EnumOrigin::Local)
            .with_origin(EnumOrigin::Global)
            .with_reference("#/components/schemas/AutoCollection");
        assert!(e.is_global());
        assert_eq!(e.reference(), Some("#/components/schemas/AutoCollection"));
    }

    #[test]
    fn test_enum_name_from_reference() {
        assert_eq!(enum_name_from_reference("Channel"), "channel");
        assert_eq!(enum_name_from_reference("enums/price_type.yml"), "price_type");
    }
}
