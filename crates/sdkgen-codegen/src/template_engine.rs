//! Template engine for rendering shaped output using Handlebars.
//!
//! Provides a wrapper around Handlebars with the built-in TypeScript
//! declaration templates pre-registered. Rendering is the only fallible
//! step after the IR is built.
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "type {{name}} = string;").unwrap();
//! let out = engine.render("greeting", &json!({"name": "Id"})).unwrap();
//! assert_eq!(out, "type Id = string;");
//! ```

use handlebars::Handlebars;
use sdkgen_core::{Error, Result};
use serde::Serialize;

/// Template rendering one shaped resource as a declaration file.
pub const RESOURCE_TEMPLATE: &str = "typescript/resource";

/// Template rendering the global and schema-less enums of a shaped spec.
pub const ENUMS_TEMPLATE: &str = "typescript/enums";

/// Partial rendering an attribute list as interface fields.
const FIELDS_PARTIAL: &str = "typescript_fields";

/// Partial rendering sub-resource interfaces, recursing into their own.
const SUB_RESOURCES_PARTIAL: &str = "typescript_sub_resources";

/// Template engine for code generation.
///
/// Runs in strict mode, so a template that reads a field the context does
/// not carry fails instead of rendering an empty string. Output is code,
/// so HTML escaping is disabled.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderError`] if a built-in template fails to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_codegen::template_engine::TemplateEngine;
    ///
    /// let engine = TemplateEngine::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_typescript_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_typescript_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        for (name, partial) in [
            (FIELDS_PARTIAL, include_str!("../templates/typescript/fields.d.ts.hbs")),
            (
                SUB_RESOURCES_PARTIAL,
                include_str!("../templates/typescript/sub_resources.d.ts.hbs"),
            ),
        ] {
            handlebars
                .register_partial(name, partial)
                .map_err(|e| Error::RenderError {
                    message: format!("Failed to register typescript partial '{name}': {e}"),
                })?;
        }

        handlebars
            .register_template_string(
                RESOURCE_TEMPLATE,
                include_str!("../templates/typescript/resource.d.ts.hbs"),
            )
            .map_err(|e| Error::RenderError {
                message: format!("Failed to register typescript resource template: {e}"),
            })?;

        handlebars
            .register_template_string(
                ENUMS_TEMPLATE,
                include_str!("../templates/typescript/enums.d.ts.hbs"),
            )
            .map_err(|e| Error::RenderError {
                message: format!("Failed to register typescript enums template: {e}"),
            })?;

        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderError`] if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - Template rendering fails, including strict-mode misses
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::RenderError {
                message: format!("Template rendering failed: {e}"),
            })
    }

    /// Registers a custom template.
    ///
    /// Registering under a built-in name replaces the built-in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderError`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::RenderError {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }

    /// `true` if a template is registered under `name`.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
