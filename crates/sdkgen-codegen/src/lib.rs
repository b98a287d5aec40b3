//! Backend shaping for the SDK generator.
//!
//! Turns the IR built by `sdkgen-core` into renderer-ready structures for
//! a target language and renders them with Handlebars templates.
//!
//! # Architecture
//!
//! - [`Backend`] is the per-language contract: types, names, sort keys and
//!   request parameter shaping
//! - [`ShapingContext`] carries per-resource state (referenced enums and
//!   resources) so backends stay stateless
//! - [`Shaper`] drives a backend over the IR and produces [`ShapedSpec`]
//! - [`TypeScriptBackend`] is the reference backend
//! - [`template_engine::TemplateEngine`] renders shaped output
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::{Shaper, TypeScriptBackend, template_engine::TemplateEngine, typescript};
//! use sdkgen_core::{Document, GenerationConfig, Spec};
//!
//! let doc = Document::from_json(r#"{
//!     "paths": {},
//!     "components": {"schemas": {"Plan": {
//!         "type": "object",
//!         "x-cb-resource-id": "plan",
//!         "properties": {"id": {"type": "string"}}
//!     }}}
//! }"#).unwrap();
//! let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();
//!
//! let backend = TypeScriptBackend::new();
//! let shaped = Shaper::new(&backend).shape_spec(&spec);
//! let engine = TemplateEngine::new().unwrap();
//! let code = typescript::render(&engine, &shaped).unwrap();
//! assert!(code.file("Plan.d.ts").unwrap().content.contains("export interface Plan {"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod backend;
mod context;
mod generated;
mod shaped;
mod shaper;

pub mod template_engine;
pub mod typescript;

pub use backend::{Backend, NameKind, SortNode, TargetType, TypeCategory, shape_parameters};
pub use context::{Imports, ShapingContext};
pub use generated::{GeneratedCode, GeneratedFile};
pub use shaped::{
    ParamKind, ParamList, ResponseKind, ShapedAction, ShapedAttribute, ShapedDependent,
    ShapedEnum, ShapedEnumValue, ShapedParam, ShapedResource, ShapedResponse, ShapedSpec,
};
pub use shaper::Shaper;
pub use typescript::TypeScriptBackend;
