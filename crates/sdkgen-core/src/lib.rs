//! Core IR for the SDK generator.
//!
//! Reads one vendor-extended API description document and builds the
//! intermediate representation every target-language backend consumes.
//!
//! # Architecture
//!
//! The core consists of:
//! - A serde model of the document subset the generator reads
//! - The extension registry, decoding `x-cb-*` keys once into typed records
//! - Version resolution and catalog filtering
//! - The IR graph (`Spec`, `Resource`, `Action`, `Attribute`, `Enum`) with
//!   per-node classification computed at construction
//! - Configuration and the error hierarchy
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{Document, GenerationConfig, Spec};
//!
//! let doc = Document::from_json(r#"{"openapi": "3.0.1", "paths": {}}"#).unwrap();
//! let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();
//! assert!(spec.resources().is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod document;
mod error;
mod extension;
mod ordered_map;
mod version;

pub mod inflect;
pub mod ir;

pub use config::{DEFAULT_MAX_DEPTH, GenerationConfig, GenerationConfigBuilder};
pub use document::{
    AdditionalProperties, Components, Document, HttpMethod, Info, MediaType, Operation,
    Parameter, ParameterLocation, PathItem, RawExtensions, RequestBody, ResponseObject,
    SCHEMA_REF_PREFIX, Schema, SchemaType,
};
pub use error::{Error, Result};
pub use extension::{
    DEFAULT_DEPRECATION_MESSAGE, ExtensionKey, Extensions, Scope, UNORDERED, ValueKind,
    inherit_through_ref, lookup_string, unrecognized_keys,
};
pub use ir::{
    Action, ActionResponse, Attribute, AttributeShape, AttributeTraits, Enum, EnumOrigin,
    EnumRegistry, FilterKind, Resource, ScalarKind, Spec,
};
pub use ordered_map::OrderedMap;
pub use version::{ApiVersion, ProductCatalogVersion, Version};
