//! Generic shaping driver.
//!
//! Walks the IR once per resource, asks the backend for types and names,
//! and assembles [`ShapedResource`] values. Each resource gets a fresh
//! [`ShapingContext`], so resources are independent and can be shaped on
//! a thread pool with the `parallel` feature.

use crate::backend::{Backend, NameKind, SortNode, sorted};
use crate::context::{Imports, ShapingContext};
use crate::shaped::{
    ResponseKind, ShapedAction, ShapedAttribute, ShapedDependent, ShapedEnum, ShapedEnumValue,
    ShapedResource, ShapedResponse, ShapedSpec,
};
use sdkgen_core::{Action, ActionResponse, Attribute, AttributeShape, Enum, Resource, Spec};

/// Drives a [`Backend`] over the IR.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::{Shaper, TypeScriptBackend};
/// use sdkgen_core::{Document, GenerationConfig, Spec};
///
/// let doc = Document::from_json(r#"{"paths": {}}"#).unwrap();
/// let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();
///
/// let backend = TypeScriptBackend::new();
/// let shaped = Shaper::new(&backend).shape_spec(&spec);
/// assert_eq!(shaped.backend, "typescript");
/// assert!(shaped.resources.is_empty());
/// ```
#[derive(Debug)]
pub struct Shaper<'b, B: Backend + ?Sized> {
    backend: &'b B,
}

impl<'b, B: Backend + ?Sized> Shaper<'b, B> {
    /// Creates a shaper for `backend`.
    #[must_use]
    pub const fn new(backend: &'b B) -> Self {
        Self { backend }
    }

    /// The backend being driven.
    #[must_use]
    pub const fn backend(&self) -> &'b B {
        self.backend
    }

    /// Shapes every resource and enum of `spec`, one resource at a time.
    #[must_use]
    pub fn shape_spec(&self, spec: &Spec) -> ShapedSpec {
        let resources = self.shape_all(spec.resources());
        self.assemble(spec, resources)
    }

    /// Like [`shape_spec`](Self::shape_spec) but shapes resources in
    /// parallel. The output is identical.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn shape_spec_parallel(&self, spec: &Spec) -> ShapedSpec {
        let resources = self.shape_all_parallel(spec.resources());
        self.assemble(spec, resources)
    }

    fn assemble(&self, spec: &Spec, resources: Vec<ShapedResource>) -> ShapedSpec {
        let shaped = ShapedSpec {
            backend: self.backend.name().to_string(),
            title: spec.title().map(str::to_string),
            api_version: spec.version().api.as_str().to_string(),
            product_catalog_version: spec.version().product_catalog.as_str().to_string(),
            enums: spec.enums().iter().map(|e| self.shape_enum(e)).collect(),
            schema_less_enums: spec
                .schema_less_enums()
                .iter()
                .map(|e| self.shape_enum(e))
                .collect(),
            resources,
        };
        tracing::info!(
            backend = %shaped.backend,
            resources = shaped.resources.len(),
            enums = shaped.enums.len(),
            "Shaped spec"
        );
        shaped
    }

    /// Shapes `resources` sequentially, ordered by the backend's sort key.
    #[must_use]
    pub fn shape_all(&self, resources: &[Resource]) -> Vec<ShapedResource> {
        self.sorted_resources(resources)
            .into_iter()
            .map(|resource| self.shape_resource(resource))
            .collect()
    }

    /// Shapes `resources` on the rayon pool, ordered by the backend's sort
    /// key.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn shape_all_parallel(&self, resources: &[Resource]) -> Vec<ShapedResource> {
        use rayon::prelude::*;

        self.sorted_resources(resources)
            .into_par_iter()
            .map(|resource| self.shape_resource(resource))
            .collect()
    }

    /// Shapes one top-level resource with a fresh context.
    #[must_use]
    pub fn shape_resource(&self, resource: &Resource) -> ShapedResource {
        let type_name = self.backend.naming_convention(resource.name(), NameKind::Type);
        let mut ctx = ShapingContext::for_resource(type_name.clone());
        let mut shaped = self.shape_resource_in(resource, type_name, &mut ctx);
        shaped.imports = ctx.finish();
        tracing::debug!(
            resource = resource.id(),
            imports = shaped.imports.resources.len() + shaped.imports.enums.len(),
            "Shaped resource"
        );
        shaped
    }

    /// Shapes an enum definition.
    #[must_use]
    pub fn shape_enum(&self, e: &Enum) -> ShapedEnum {
        ShapedEnum {
            name: e.name().to_string(),
            type_name: self.backend.naming_convention(e.name(), NameKind::Type),
            values: e
                .values()
                .iter()
                .map(|value| ShapedEnumValue {
                    value: value.clone(),
                    literal: self.backend.string_literal(value),
                    identifier: self.backend.naming_convention(value, NameKind::EnumMember),
                    deprecated: e.is_deprecated(value),
                })
                .collect(),
            origin: e.origin(),
            reference: e.reference().map(str::to_string),
        }
    }

    fn sorted_resources<'r>(&self, resources: &'r [Resource]) -> Vec<&'r Resource> {
        let mut refs: Vec<&Resource> = resources.iter().collect();
        refs.sort_by_key(|r| self.backend.sort_key(SortNode::Resource(r)));
        refs
    }

    fn shape_resource_in(
        &self,
        resource: &Resource,
        type_name: String,
        ctx: &mut ShapingContext,
    ) -> ShapedResource {
        let attributes = self.shape_attributes(resource.attributes(), ctx);

        let mut actions: Vec<&Action> = resource.actions().iter().collect();
        actions.sort_by_key(|a| self.backend.sort_key(SortNode::Action(a)));
        let actions = actions
            .into_iter()
            .map(|action| self.shape_action(action, ctx))
            .collect();

        let sub_resources = self
            .sorted_resources(resource.sub_resources())
            .into_iter()
            .map(|sub| {
                let sub_type = self.backend.naming_convention(sub.name(), NameKind::Type);
                ctx.with_sub_resource(&sub_type, |ctx| {
                    self.shape_resource_in(sub, sub_type.clone(), ctx)
                })
            })
            .collect();

        let dependent_resources = resource
            .dependent_resources()
            .into_iter()
            .map(|dependent| ShapedDependent {
                type_name: self
                    .backend
                    .naming_convention(&dependent.type_name, NameKind::Type),
                attribute: dependent.attribute,
                resource_id: dependent.resource_id,
                is_list: dependent.is_list,
            })
            .collect();

        ShapedResource {
            id: resource.id().to_string(),
            type_name,
            path_name: resource.path_name().map(str::to_string),
            description: resource.description().map(str::to_string),
            attributes,
            enums: resource
                .local_enums()
                .into_iter()
                .map(|e| self.shape_enum(e))
                .collect(),
            actions,
            sub_resources,
            dependent_resources,
            custom_fields_supported: resource.traits().custom_fields_supported,
            additional_properties: resource.traits().additional_properties,
            has_list_operations: resource.has_list_operations(),
            imports: Imports::default(),
            sort_order: resource.sort_order(),
        }
    }

    fn shape_attributes(
        &self,
        attributes: &[Attribute],
        ctx: &mut ShapingContext,
    ) -> Vec<ShapedAttribute> {
        sorted(self.backend, attributes)
            .into_iter()
            .map(|attribute| self.shape_attribute(attribute, ctx))
            .collect()
    }

    fn shape_attribute(&self, attribute: &Attribute, ctx: &mut ShapingContext) -> ShapedAttribute {
        let target = self.backend.data_type(attribute, ctx);
        // sub-resource members are shaped with the sub-resource itself
        let members = if matches!(attribute.shape().element(), AttributeShape::Object) {
            self.shape_attributes(attribute.attributes(), ctx)
        } else {
            Vec::new()
        };
        ShapedAttribute {
            name: attribute.name().to_string(),
            identifier: self
                .backend
                .naming_convention(attribute.name(), NameKind::Attribute),
            type_expr: target.expr,
            category: target.category,
            required: attribute.is_required(),
            deprecated: attribute.is_deprecated(),
            deprecation_message: attribute.deprecation_message().map(str::to_string),
            is_enum: attribute.is_enum(),
            is_sub_resource: attribute.is_sub_resource(),
            is_list: attribute.shape().is_list(),
            is_dependent: attribute.is_dependent(),
            description: attribute.description().map(str::to_string),
            sort_order: self.backend.sort_key(SortNode::Attribute(attribute)),
            attributes: members,
        }
    }

    fn shape_action(&self, action: &Action, ctx: &mut ShapingContext) -> ShapedAction {
        let params = self.backend.shape_request_parameters(action, ctx);
        let traits = action.traits();
        let request_type_name = (params.has_input() || traits.needs_input_object)
            .then(|| self.backend.naming_convention(action.name(), NameKind::RequestClass));

        ShapedAction {
            name: action.name().to_string(),
            identifier: self.backend.naming_convention(action.name(), NameKind::Action),
            http_method: action.http_method().as_str().to_string(),
            url: action.url().to_string(),
            url_prefix: action.url_prefix().to_string(),
            url_suffix: action.url_suffix().map(str::to_string),
            has_path_params: action.has_path_params(),
            is_list: traits.is_list,
            is_batch: traits.is_batch,
            is_idempotent: traits.is_idempotent,
            needs_json_input: traits.needs_json_input,
            needs_input_object: traits.needs_input_object,
            deprecated: traits.deprecated,
            sub_domain: traits.sub_domain.clone(),
            description: action.description().map(str::to_string),
            request_type_name,
            response: self.shape_response(action, ctx),
            params,
            sort_order: self.backend.sort_key(SortNode::Action(action)),
        }
    }

    fn shape_response(&self, action: &Action, ctx: &mut ShapingContext) -> ShapedResponse {
        let type_name = self
            .backend
            .naming_convention(action.name(), NameKind::ResponseClass);
        match action.response() {
            ActionResponse::Single(response) => ShapedResponse {
                kind: ResponseKind::Single,
                type_name,
                attributes: self.shape_attributes(&response.attributes, ctx),
                next_offset: None,
            },
            ActionResponse::List(list) => ShapedResponse {
                kind: ResponseKind::List,
                type_name,
                attributes: self.shape_attributes(list.items(), ctx),
                next_offset: list
                    .next_offset
                    .as_ref()
                    .map(|cursor| self.shape_attribute(cursor, ctx)),
            },
            ActionResponse::Empty => ShapedResponse {
                kind: ResponseKind::Empty,
                type_name,
                attributes: Vec::new(),
                next_offset: None,
            },
        }
    }
}
