//! TypeScript reference backend.
//!
//! Emits declaration-file types: PascalCase type names, camelCase methods,
//! wire-named properties, inline string-literal unions for local enums and
//! named types for global ones.
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::{Shaper, TypeScriptBackend};
//! use sdkgen_core::{Document, GenerationConfig, Spec};
//!
//! let doc = Document::from_json(r#"{
//!     "paths": {},
//!     "components": {"schemas": {"Customer": {
//!         "type": "object",
//!         "x-cb-resource-id": "customer",
//!         "properties": {"id": {"type": "string"}}
//!     }}}
//! }"#).unwrap();
//! let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();
//!
//! let backend = TypeScriptBackend::new();
//! let shaped = Shaper::new(&backend).shape_spec(&spec);
//! assert_eq!(shaped.resources[0].type_name, "Customer");
//! assert_eq!(shaped.resources[0].attributes[0].type_expr, "string");
//! ```

pub mod naming;
pub mod types;

use crate::backend::{Backend, NameKind, TargetType};
use crate::context::ShapingContext;
use crate::generated::{GeneratedCode, GeneratedFile};
use crate::shaped::ShapedSpec;
use crate::template_engine::{ENUMS_TEMPLATE, RESOURCE_TEMPLATE, TemplateEngine};
use sdkgen_core::{Attribute, Result};

/// File holding the global enum types.
pub const ENUMS_FILE: &str = "enums.d.ts";

/// Renders a shaped spec into one declaration file per resource plus
/// [`ENUMS_FILE`] when there are global or schema-less enums.
///
/// # Errors
///
/// Returns [`sdkgen_core::Error::RenderError`] if a template fails.
pub fn render(engine: &TemplateEngine<'_>, spec: &ShapedSpec) -> Result<GeneratedCode> {
    let mut code = GeneratedCode::new();
    if !spec.enums.is_empty() || !spec.schema_less_enums.is_empty() {
        code.add_file(GeneratedFile {
            path: ENUMS_FILE.to_string(),
            content: engine.render(ENUMS_TEMPLATE, spec)?,
        });
    }
    for resource in &spec.resources {
        code.add_file(GeneratedFile {
            path: format!("{}.d.ts", resource.type_name),
            content: engine.render(RESOURCE_TEMPLATE, resource)?,
        });
    }
    tracing::debug!(files = code.file_count(), "Rendered typescript declarations");
    Ok(code)
}

/// The TypeScript backend. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptBackend;

impl TypeScriptBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Backend for TypeScriptBackend {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn data_type(&self, attribute: &Attribute, ctx: &mut ShapingContext) -> TargetType {
        types::map_attribute(attribute, ctx)
    }

    fn naming_convention(&self, raw: &str, kind: NameKind) -> String {
        naming::convert(raw, kind)
    }

    fn string_literal(&self, value: &str) -> String {
        naming::string_literal(value)
    }
}
