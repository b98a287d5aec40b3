//! Extension registry.
//!
//! The closed catalog of vendor extension keys the generator understands,
//! with the kind of value each expects and its documented default. Raw
//! extension maps are decoded exactly once into [`Extensions`]; nothing
//! downstream reads raw keys.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{ExtensionKey, Extensions};
//! use serde_json::json;
//!
//! assert_eq!(ExtensionKey::from_name("x-cb-sort-order"), Some(ExtensionKey::SortOrder));
//! assert_eq!(ExtensionKey::SortOrder.default_value(), json!(-1));
//!
//! let raw = [("x-cb-operation-is-list".to_string(), json!(true))].into_iter().collect();
//! let ext = Extensions::decode(&raw, "operation list_customers", false).unwrap();
//! assert!(ext.is_list_operation);
//! ```

use crate::document::RawExtensions;
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;

/// Prefix shared by every vendor key.
pub const VENDOR_PREFIX: &str = "x-";

/// Sort order meaning "no explicit position".
pub const UNORDERED: i64 = -1;

/// Deprecation text used when a deprecated node supplies none.
pub const DEFAULT_DEPRECATION_MESSAGE: &str = "Please refer API docs to use other attributes";

/// Kind of value a registry key expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `true`/`false` (or their string forms)
    Bool,
    /// Integer (or a numeric string)
    Integer,
    /// String
    String,
    /// Array of strings
    StringList,
}

impl ValueKind {
    /// Human-readable name for error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Bool => "a boolean",
            Self::Integer => "an integer",
            Self::String => "a string",
            Self::StringList => "a list of strings",
        }
    }
}

/// Node type a key is authored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Document `info` block
    Document,
    /// Top-level resource schema
    Resource,
    /// Operation
    Operation,
    /// Any schema or parameter
    Schema,
    /// Resource, operation or schema
    Any,
}

macro_rules! extension_keys {
    ($($variant:ident => $name:literal, $kind:ident, $scope:ident;)+) => {
        /// A recognized vendor extension key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ExtensionKey {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl ExtensionKey {
            /// Every key in the registry.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name as written in documents.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Expected value kind.
            #[must_use]
            pub const fn kind(&self) -> ValueKind {
                match self {
                    $(Self::$variant => ValueKind::$kind,)+
                }
            }

            /// Node type the key is authored on.
            #[must_use]
            pub const fn scope(&self) -> Scope {
                match self {
                    $(Self::$variant => Scope::$scope,)+
                }
            }

            /// Looks a key up by wire name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

extension_keys! {
    ResourceId => "x-cb-resource-id", String, Any;
    ResourcePathName => "x-cb-resource-path-name", String, Resource;
    OperationMethodName => "x-cb-operation-method-name", String, Operation;
    IsListOperation => "x-cb-operation-is-list", Bool, Operation;
    IsBulkOperation => "x-cb-operation-is-bulk", Bool, Operation;
    IsBatchOperation => "x-cb-operation-is-batch", Bool, Operation;
    IsIdempotent => "x-cb-operation-is-idempotent", Bool, Operation;
    IsInternal => "x-cb-internal", Bool, Operation;
    SubDomain => "x-cb-operation-sub-domain-name", String, Operation;
    NeedsJsonInput => "x-cb-is-operation-needs-json-input", Bool, Operation;
    NeedsInputObject => "x-cb-is-operation-needs-input-object", Bool, Operation;
    HiddenFromClientSdk => "x-cb-hidden-from-client-sdk", Bool, Any;
    SortOrder => "x-cb-sort-order", Integer, Any;
    IsSubResource => "x-cb-is-sub-resource", Bool, Schema;
    SubResourceName => "x-cb-sub-resource-name", String, Schema;
    IsDependentAttribute => "x-cb-is-dependent-attribute", Bool, Schema;
    IsGlobalResourceReference => "x-cb-is-global-resource-reference", Bool, Schema;
    IsGlobalEnum => "x-cb-is-global-enum", Bool, Schema;
    GlobalEnumReference => "x-cb-global-enum-reference", String, Schema;
    IsExternalEnum => "x-cb-is-external-enum", Bool, Schema;
    DeprecatedEnumValues => "x-cb-deprecated-enum-values", StringList, Schema;
    DeprecationMessage => "x-cb-deprecation-message", String, Schema;
    IsFilterParameter => "x-cb-is-filter-parameter", Bool, Schema;
    SdkFilterName => "x-cb-sdk-filter-name", String, Schema;
    IsMultiValueAttribute => "x-cb-is-multi-value-attribute", Bool, Schema;
    IsPaginationParameter => "x-cb-is-pagination-parameter", Bool, Schema;
    IsPresenceOperatorSupported => "x-cb-is-presence-operator-supported", Bool, Schema;
    IsCompositeArrayRequestBody => "x-cb-is-composite-array-request-body", Bool, Schema;
    IsMoneyColumn => "x-cb-is-money-column", Bool, Schema;
    IsLongMoneyColumn => "x-cb-is-long-money-column", Bool, Schema;
    IsEap => "x-cb-is-eap", Bool, Any;
    IsCustomFieldsSupported => "x-cb-is-custom-fields-supported", Bool, Any;
    IsThirdPartyResource => "x-cb-is-third-party-resource", Bool, Resource;
    ProductCatalogVersion => "x-cb-product-catalog-version", Integer, Any;
    ApiVersion => "x-cb-api-version", Integer, Document;
}

impl ExtensionKey {
    /// Documented value when the key is absent.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match (self, self.kind()) {
            (Self::SortOrder, _) => Value::from(UNORDERED),
            (_, ValueKind::Bool) => Value::Bool(false),
            (_, ValueKind::StringList) => Value::Array(Vec::new()),
            (_, ValueKind::Integer | ValueKind::String) => Value::Null,
        }
    }

    /// Whether a property referencing a schema inherits this key from it.
    ///
    /// Only schema-scoped keys travel through `$ref`; resource- and
    /// position-level keys stay with the node that declares them.
    #[must_use]
    pub const fn is_inherited_through_ref(&self) -> bool {
        matches!(self.scope(), Scope::Schema)
    }
}

impl fmt::Display for ExtensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded extensions of one node, with registry defaults applied.
///
/// Optional values stay `None` when absent so that fallbacks (item schema,
/// `$ref` target) can tell "not set" apart from "set to the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
    /// `x-cb-resource-id`
    pub resource_id: Option<String>,
    /// `x-cb-resource-path-name`
    pub resource_path_name: Option<String>,
    /// `x-cb-operation-method-name`
    pub operation_method_name: Option<String>,
    /// `x-cb-operation-is-list`
    pub is_list_operation: bool,
    /// `x-cb-operation-is-bulk`
    pub is_bulk_operation: bool,
    /// `x-cb-operation-is-batch`
    pub is_batch_operation: bool,
    /// `x-cb-operation-is-idempotent`
    pub is_idempotent: bool,
    /// `x-cb-internal`
    pub is_internal: bool,
    /// `x-cb-operation-sub-domain-name`
    pub sub_domain: Option<String>,
    /// `x-cb-is-operation-needs-json-input`
    pub needs_json_input: bool,
    /// `x-cb-is-operation-needs-input-object`
    pub needs_input_object: bool,
    /// `x-cb-hidden-from-client-sdk`
    pub hidden_from_sdk: bool,
    /// `x-cb-sort-order`
    pub sort_order: Option<i64>,
    /// `x-cb-is-sub-resource`
    pub is_sub_resource: bool,
    /// `x-cb-sub-resource-name`
    pub sub_resource_name: Option<String>,
    /// `x-cb-is-dependent-attribute`
    pub is_dependent_attribute: bool,
    /// `x-cb-is-global-resource-reference`
    pub is_global_resource_reference: bool,
    /// `x-cb-is-global-enum`
    pub is_global_enum: bool,
    /// `x-cb-global-enum-reference`
    pub global_enum_reference: Option<String>,
    /// `x-cb-is-external-enum`
    pub is_external_enum: bool,
    /// `x-cb-deprecated-enum-values`
    pub deprecated_enum_values: Vec<String>,
    /// `x-cb-deprecation-message`
    pub deprecation_message: Option<String>,
    /// `x-cb-is-filter-parameter`
    pub is_filter_parameter: bool,
    /// `x-cb-sdk-filter-name`
    pub sdk_filter_name: Option<String>,
    /// `x-cb-is-multi-value-attribute`
    pub is_multi_value_attribute: bool,
    /// `x-cb-is-pagination-parameter`
    pub is_pagination_parameter: bool,
    /// `x-cb-is-presence-operator-supported`
    pub is_presence_operator_supported: bool,
    /// `x-cb-is-composite-array-request-body`
    pub is_composite_array_request_body: bool,
    /// `x-cb-is-money-column`
    pub is_money_column: bool,
    /// `x-cb-is-long-money-column`
    pub is_long_money_column: bool,
    /// `x-cb-is-eap`
    pub is_eap: bool,
    /// `x-cb-is-custom-fields-supported`
    pub is_custom_fields_supported: bool,
    /// `x-cb-is-third-party-resource`
    pub is_third_party_resource: bool,
    /// `x-cb-product-catalog-version`
    pub product_catalog_version: Option<i64>,
    /// `x-cb-api-version`
    pub api_version: Option<i64>,
}

impl Extensions {
    /// Decodes the vendor keys of one node.
    ///
    /// Non-`x-` members are ignored. Unrecognized `x-` keys and wrongly
    /// typed values are logged and defaulted, or rejected when `strict`.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`Error::UnknownExtension`] or
    /// [`Error::InvalidExtensionValue`].
    pub fn decode(raw: &RawExtensions, location: &str, strict: bool) -> Result<Self> {
        let mut ext = Self::default();
        for (name, value) in raw.iter().filter(|(k, _)| k.starts_with(VENDOR_PREFIX)) {
            let Some(key) = ExtensionKey::from_name(name) else {
                if strict {
                    return Err(Error::UnknownExtension {
                        location: location.to_string(),
                        key: name.clone(),
                    });
                }
                tracing::warn!(key = %name, %location, "Unrecognized extension key ignored");
                continue;
            };
            if !ext.apply(key, value) {
                if strict {
                    return Err(Error::InvalidExtensionValue {
                        location: location.to_string(),
                        key: key.name(),
                        expected: key.kind().describe(),
                    });
                }
                tracing::warn!(
                    key = key.name(),
                    %location,
                    expected = key.kind().describe(),
                    "Extension value has the wrong type, using default"
                );
            }
        }
        Ok(ext)
    }

    /// Sort order with the registry default applied.
    #[must_use]
    pub fn sort_order_or_default(&self) -> i64 {
        self.sort_order.unwrap_or(UNORDERED)
    }

    /// Stores one decoded value. Returns `false` if the value has the wrong kind.
    fn apply(&mut self, key: ExtensionKey, value: &Value) -> bool {
        use ExtensionKey as K;
        match key.kind() {
            ValueKind::Bool => {
                let Some(flag) = as_bool(value) else {
                    return false;
                };
                *self.flag_mut(key) = flag;
            }
            ValueKind::Integer => {
                let Some(number) = as_integer(value) else {
                    return false;
                };
                match key {
                    K::SortOrder => self.sort_order = Some(number),
                    K::ProductCatalogVersion => self.product_catalog_version = Some(number),
                    _ => self.api_version = Some(number),
                }
            }
            ValueKind::String => {
                let Some(text) = as_string(value) else {
                    return false;
                };
                let slot = match key {
                    K::ResourceId => &mut self.resource_id,
                    K::ResourcePathName => &mut self.resource_path_name,
                    K::OperationMethodName => &mut self.operation_method_name,
                    K::SubDomain => &mut self.sub_domain,
                    K::SubResourceName => &mut self.sub_resource_name,
                    K::GlobalEnumReference => &mut self.global_enum_reference,
                    K::DeprecationMessage => &mut self.deprecation_message,
                    _ => &mut self.sdk_filter_name,
                };
                *slot = Some(text);
            }
            ValueKind::StringList => {
                let Some(list) = as_string_list(value) else {
                    return false;
                };
                self.deprecated_enum_values = list;
            }
        }
        true
    }

    fn flag_mut(&mut self, key: ExtensionKey) -> &mut bool {
        use ExtensionKey as K;
        match key {
            K::IsListOperation => &mut self.is_list_operation,
            K::IsBulkOperation => &mut self.is_bulk_operation,
            K::IsBatchOperation => &mut self.is_batch_operation,
            K::IsIdempotent => &mut self.is_idempotent,
            K::IsInternal => &mut self.is_internal,
            K::NeedsJsonInput => &mut self.needs_json_input,
            K::NeedsInputObject => &mut self.needs_input_object,
            K::HiddenFromClientSdk => &mut self.hidden_from_sdk,
            K::IsSubResource => &mut self.is_sub_resource,
            K::IsDependentAttribute => &mut self.is_dependent_attribute,
            K::IsGlobalResourceReference => &mut self.is_global_resource_reference,
            K::IsGlobalEnum => &mut self.is_global_enum,
            K::IsExternalEnum => &mut self.is_external_enum,
            K::IsFilterParameter => &mut self.is_filter_parameter,
            K::IsMultiValueAttribute => &mut self.is_multi_value_attribute,
            K::IsPaginationParameter => &mut self.is_pagination_parameter,
            K::IsPresenceOperatorSupported => &mut self.is_presence_operator_supported,
            K::IsCompositeArrayRequestBody => &mut self.is_composite_array_request_body,
            K::IsMoneyColumn => &mut self.is_money_column,
            K::IsLongMoneyColumn => &mut self.is_long_money_column,
            K::IsEap => &mut self.is_eap,
            K::IsCustomFieldsSupported => &mut self.is_custom_fields_supported,
            _ => &mut self.is_third_party_resource,
        }
    }
}

/// Builds the raw map a `$ref`-typed property is decoded from.
///
/// Starts from the target's schema-scoped keys and lets the property's own
/// keys override them.
#[must_use]
pub fn inherit_through_ref(target: &RawExtensions, own: &RawExtensions) -> RawExtensions {
    let mut merged: RawExtensions = target
        .iter()
        .filter(|(k, _)| {
            ExtensionKey::from_name(k).is_some_and(|key| key.is_inherited_through_ref())
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    merged.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Reads one string-valued key without decoding the whole map.
///
/// Used to peek at `$ref` targets whose extensions are decoded where they
/// are declared.
#[must_use]
pub fn lookup_string(raw: &RawExtensions, key: ExtensionKey) -> Option<&str> {
    debug_assert_eq!(key.kind(), ValueKind::String);
    raw.get(key.name()).and_then(Value::as_str)
}

/// `x-` keys in a raw map that the registry does not know.
pub fn unrecognized_keys(raw: &RawExtensions) -> impl Iterator<Item = &str> {
    raw.keys()
        .map(String::as_str)
        .filter(|k| k.starts_with(VENDOR_PREFIX) && ExtensionKey::from_name(k).is_none())
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn as_string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}
