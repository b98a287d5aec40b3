//! State threaded through one IR build.

use crate::document::{Document, RawExtensions, Schema};
use crate::extension::{Extensions, inherit_through_ref};
use crate::{Error, GenerationConfig, Result};

/// Immutable per-node build context.
///
/// Each recursion step derives a child context instead of mutating a shared
/// one, so the `$ref` chain and attribute path always describe the current
/// branch only.
#[derive(Debug, Clone)]
pub(crate) struct BuildContext<'a> {
    document: &'a Document,
    config: &'a GenerationConfig,
    path: Vec<String>,
    ref_chain: Vec<String>,
}

/// A schema with its `$ref` (if any) followed.
#[derive(Debug, Clone)]
pub(crate) struct Resolved<'a> {
    /// Schema to read the structure from
    pub body: &'a Schema,
    /// Extensions of the node, target keys inherited
    pub raw: RawExtensions,
    /// `(component name, reference)` when the node was a `$ref`
    pub target: Option<(&'a str, &'a str)>,
    /// Description of the referencing node, else of the target
    pub description: Option<String>,
    /// Deprecation flag of the referencing node or the target
    pub deprecated: bool,
}

impl Resolved<'_> {
    /// Clone of the resolved schema carrying the merged extensions.
    pub fn to_schema(&self) -> Schema {
        let mut schema = self.body.clone();
        schema.ref_path = None;
        schema.extensions.clone_from(&self.raw);
        schema.description.clone_from(&self.description);
        schema.deprecated = self.deprecated;
        schema
    }
}

impl<'a> BuildContext<'a> {
    pub fn new(document: &'a Document, config: &'a GenerationConfig, root: &str) -> Self {
        Self {
            document,
            config,
            path: vec![root.to_string()],
            ref_chain: Vec::new(),
        }
    }

    pub const fn document(&self) -> &'a Document {
        self.document
    }

    pub const fn config(&self) -> &'a GenerationConfig {
        self.config
    }

    pub const fn qa_mode(&self) -> bool {
        self.config.qa_mode
    }

    /// Dotted path of the node being built.
    pub fn location(&self) -> String {
        self.path.join(".")
    }

    /// Child context one nesting level down.
    pub fn descend(&self, segment: &str) -> Result<Self> {
        let mut child = self.clone();
        child.path.push(segment.to_string());
        if child.path.len() > self.config.max_depth + 1 {
            return Err(Error::DepthLimitExceeded {
                limit: self.config.max_depth,
                location: child.location(),
            });
        }
        Ok(child)
    }

    /// Child context that is expanding the named component schema.
    pub fn enter_ref(&self, name: &str) -> Result<Self> {
        if self.ref_chain.iter().any(|n| n == name) {
            let mut chain = self.ref_chain.clone();
            chain.push(name.to_string());
            return Err(Error::CyclicReference {
                chain: chain.join(" -> "),
            });
        }
        let mut child = self.clone();
        child.ref_chain.push(name.to_string());
        Ok(child)
    }

    /// Decodes a raw extension map under the run's strictness.
    pub fn decode(&self, raw: &RawExtensions) -> Result<Extensions> {
        Extensions::decode(raw, &self.location(), self.config.strict_extensions)
    }

    /// Follows a local `$ref`, merging inherited extensions.
    pub fn resolve(&self, schema: &'a Schema) -> Result<Resolved<'a>> {
        let Some(reference) = schema.ref_path.as_deref() else {
            return Ok(Resolved {
                body: schema,
                raw: schema.extensions.clone(),
                target: None,
                description: schema.description.clone(),
                deprecated: schema.deprecated,
            });
        };
        let (name, target) = self.document.resolve_ref(reference)?;
        Ok(Resolved {
            body: target,
            raw: inherit_through_ref(&target.extensions, &schema.extensions),
            target: Some((name, reference)),
            description: schema
                .description
                .clone()
                .or_else(|| target.description.clone()),
            deprecated: schema.deprecated || target.deprecated,
        })
    }
}
