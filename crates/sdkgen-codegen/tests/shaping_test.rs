//! Integration tests for shaping the IR with the TypeScript backend.

use sdkgen_codegen::{
    Backend, NameKind, ParamKind, ResponseKind, ShapedResource, ShapedSpec, Shaper,
    ShapingContext, SortNode, TargetType, TypeCategory, TypeScriptBackend,
    template_engine::TemplateEngine, typescript,
};
use sdkgen_core::{Attribute, Document, GenerationConfig, Spec};
use serde_json::{Value, json};

fn billing_document() -> Value {
    json!({
        "openapi": "3.0.1",
        "info": {"title": "Billing API", "version": "v2"},
        "paths": {
            "/invoices": {
                "get": {
                    "operationId": "list_invoices",
                    "x-cb-operation-method-name": "list",
                    "x-cb-resource-id": "invoice",
                    "x-cb-operation-is-list": true,
                    "parameters": [
                        {"name": "limit", "in": "query", "schema": {"type": "integer"}},
                        {
                            "name": "status",
                            "in": "query",
                            "x-cb-is-filter-parameter": true,
                            "x-cb-sdk-filter-name": "EnumFilter",
                            "schema": {"type": "object", "properties": {
                                "is": {"type": "string", "enum": ["paid", "posted"]}
                            }}
                        }
                    ],
                    "responses": {"200": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {
                            "list": {"type": "array", "items": {"type": "object", "properties": {
                                "invoice": {"$ref": "#/components/schemas/Invoice"}
                            }}},
                            "next_offset": {"type": "string"}
                        }
                    }}}}}
                }
            },
            "/customers": {
                "post": {
                    "operationId": "create_customer",
                    "x-cb-operation-method-name": "create",
                    "x-cb-resource-id": "customer",
                    "x-cb-sort-order": 2,
                    "requestBody": {"content": {"application/x-www-form-urlencoded": {"schema": {
                        "type": "object",
                        "properties": {
                            "email": {"type": "string"},
                            "billing_address": {
                                "type": "object",
                                "x-cb-is-multi-value-attribute": true,
                                "properties": {
                                    "city": {"type": "string"},
                                    "validation_status": {"type": "string", "enum": ["valid", "invalid"]}
                                }
                            },
                            "item_tiers": {
                                "type": "object",
                                "x-cb-is-composite-array-request-body": true,
                                "properties": {
                                    "pricing_type": {
                                        "type": "array",
                                        "items": {"type": "string", "enum": ["per_unit", "flat_fee"]}
                                    }
                                }
                            }
                        }
                    }}}},
                    "responses": {"200": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {"customer": {"$ref": "#/components/schemas/Customer"}}
                    }}}}}
                }
            },
            "/customers/{customer-id}": {
                "parameters": [
                    {"name": "customer-id", "in": "path", "required": true, "schema": {"type": "string"}}
                ],
                "get": {
                    "operationId": "retrieve_customer",
                    "x-cb-operation-method-name": "retrieve",
                    "x-cb-resource-id": "customer",
                    "x-cb-sort-order": 1
                }
            }
        },
        "components": {"schemas": {
            "Invoice": {
                "type": "object",
                "x-cb-resource-id": "invoice",
                "properties": {
                    "id": {"type": "string"},
                    "customer": {"$ref": "#/components/schemas/Customer"},
                    "line_items": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "x-cb-is-sub-resource": true,
                            "properties": {
                                "amount": {"type": "integer", "x-cb-is-money-column": true},
                                "entity_type": {"type": "string", "enum": ["plan", "addon"]}
                            }
                        }
                    }
                }
            },
            "Customer": {
                "type": "object",
                "x-cb-resource-id": "customer",
                "x-cb-is-custom-fields-supported": true,
                "properties": {
                    "id": {"type": "string", "x-cb-sort-order": 1},
                    "auto_collection": {"$ref": "#/components/schemas/AutoCollection"},
                    "card_status": {
                        "type": "string",
                        "enum": ["no_card", "valid"],
                        "x-cb-deprecated-enum-values": ["no_card"]
                    },
                    "invoices": {"type": "array", "items": {"$ref": "#/components/schemas/Invoice"}},
                    "meta_data": {"type": "object"},
                    "vat_number": {
                        "type": "string",
                        "deprecated": true,
                        "x-cb-deprecation-message": "Use tax_id"
                    }
                }
            },
            "AutoCollection": {"type": "string", "enum": ["on", "off"]}
        }}
    })
}

fn spec() -> Spec {
    let doc = Document::from_value(billing_document()).unwrap();
    Spec::build(&doc, &GenerationConfig::default()).unwrap()
}

fn shape() -> ShapedSpec {
    let backend = TypeScriptBackend::new();
    Shaper::new(&backend).shape_spec(&spec())
}

fn resource<'a>(shaped: &'a ShapedSpec, id: &str) -> &'a ShapedResource {
    shaped.resources.iter().find(|r| r.id == id).unwrap()
}

fn attribute_type<'a>(resource: &'a ShapedResource, name: &str) -> &'a str {
    &resource
        .attributes
        .iter()
        .find(|a| a.name == name)
        .unwrap()
        .type_expr
}

#[test]
fn test_spec_metadata() {
    let shaped = shape();
    assert_eq!(shaped.backend, "typescript");
    assert_eq!(shaped.title.as_deref(), Some("Billing API"));
    assert_eq!(shaped.api_version, "v2");
    assert_eq!(shaped.product_catalog_version, "pc2");
    let names: Vec<_> = shaped.resources.iter().map(|r| r.type_name.as_str()).collect();
    assert_eq!(names, vec!["Customer", "Invoice"]);
}

#[test]
fn test_scalar_and_enum_types() {
    let shaped = shape();
    let customer = resource(&shaped, "customer");

    assert_eq!(attribute_type(customer, "id"), "string");
    assert_eq!(attribute_type(customer, "auto_collection"), "AutoCollection");
    assert_eq!(attribute_type(customer, "card_status"), "'no_card' | 'valid'");
    assert_eq!(attribute_type(customer, "invoices"), "Invoice[]");
    assert_eq!(attribute_type(customer, "meta_data"), "Record<string, unknown>");
}

#[test]
fn test_deprecated_attribute_carries_message() {
    let shaped = shape();
    let customer = resource(&shaped, "customer");
    let vat = customer.attributes.iter().find(|a| a.name == "vat_number").unwrap();
    assert!(vat.deprecated);
    assert_eq!(vat.deprecation_message.as_deref(), Some("Use tax_id"));
}

#[test]
fn test_imports_collected_per_resource() {
    let shaped = shape();

    let customer = resource(&shaped, "customer");
    assert_eq!(customer.imports.enums, vec!["AutoCollection"]);
    assert_eq!(customer.imports.resources, vec!["Invoice"]);

    // the list response references Invoice itself, which is not an import
    let invoice = resource(&shaped, "invoice");
    assert!(invoice.imports.enums.is_empty());
    assert_eq!(invoice.imports.resources, vec!["Customer"]);
}

#[test]
fn test_sub_resource_types_are_qualified() {
    let shaped = shape();
    let invoice = resource(&shaped, "invoice");

    let line_items = invoice.attributes.iter().find(|a| a.name == "line_items").unwrap();
    assert_eq!(line_items.type_expr, "Invoice.LineItem[]");
    assert!(line_items.is_sub_resource);
    assert!(line_items.is_list);
    assert_eq!(line_items.category, TypeCategory::Array);

    let sub = &invoice.sub_resources[0];
    assert_eq!(sub.type_name, "LineItem");
    assert_eq!(attribute_type(sub, "amount"), "number");
    assert_eq!(attribute_type(sub, "entity_type"), "'plan' | 'addon'");
    assert!(sub.imports.is_empty());
}

#[test]
fn test_action_order_and_naming() {
    let shaped = shape();
    let customer = resource(&shaped, "customer");
    let names: Vec<_> = customer.actions.iter().map(|a| a.identifier.as_str()).collect();
    assert_eq!(names, vec!["retrieve", "create"]);

    let create = &customer.actions[1];
    assert_eq!(create.http_method, "POST");
    assert_eq!(create.request_type_name.as_deref(), Some("CreateInputParam"));
    assert_eq!(create.response.type_name, "CreateResponse");
    assert_eq!(create.response.kind, ResponseKind::Single);

    let retrieve = &customer.actions[0];
    assert!(retrieve.request_type_name.is_none());
    assert!(retrieve.has_path_params);
}

#[test]
fn test_path_params_use_binding_names() {
    let shaped = shape();
    let retrieve = &resource(&shaped, "customer").actions[0];
    let path = &retrieve.params.path[0];
    assert_eq!(path.name, "customer-id");
    assert_eq!(path.identifier, "customerId");
    assert_eq!(path.address, "customer-id");
    assert_eq!(path.kind, ParamKind::Value);
    assert!(path.required);
}

#[test]
fn test_filter_parameter_shaping() {
    let shaped = shape();
    let list = &resource(&shaped, "invoice").actions[0];
    assert_eq!(list.response.kind, ResponseKind::List);

    let status = list.params.query.iter().find(|p| p.name == "status").unwrap();
    assert_eq!(status.kind, ParamKind::Filter);
    assert_eq!(status.filter_kind.as_deref(), Some("EnumFilter"));
    assert_eq!(status.type_expr, "filter.Enum<'paid' | 'posted'>");
    assert_eq!(status.category, TypeCategory::Filter);
    assert_eq!(status.params[0].address, "status[is]");

    let limit = list.params.query.iter().find(|p| p.name == "limit").unwrap();
    assert_eq!(limit.kind, ParamKind::Value);
    assert_eq!(limit.type_expr, "number");
}

#[test]
fn test_nested_object_addressing() {
    let shaped = shape();
    let create = &resource(&shaped, "customer").actions[1];
    let billing = create.params.body.iter().find(|p| p.name == "billing_address").unwrap();

    assert_eq!(billing.kind, ParamKind::NestedObject);
    let addresses: Vec<_> = billing.params.iter().map(|p| p.address.as_str()).collect();
    assert_eq!(
        addresses,
        vec!["billing_address[city]", "billing_address[validation_status]"]
    );
    let status = &billing.params[1];
    assert!(status.is_enum);
    assert_eq!(status.type_expr, "'valid' | 'invalid'");
    // one level only
    assert!(billing.params.iter().all(|p| p.params.is_empty()));
}

#[test]
fn test_composite_array_addressing() {
    let shaped = shape();
    let create = &resource(&shaped, "customer").actions[1];
    let tiers = create.params.body.iter().find(|p| p.name == "item_tiers").unwrap();

    assert_eq!(tiers.kind, ParamKind::IndexedMultiValue);
    let pricing = &tiers.params[0];
    assert_eq!(pricing.address, "item_tiers[pricing_type][{index}]");
    assert_eq!(pricing.type_expr, "'per_unit' | 'flat_fee'");
    assert_eq!(pricing.category, TypeCategory::Enum);
    assert!(pricing.is_enum);
}

#[test]
fn test_list_response_shape() {
    let shaped = shape();
    let list = &resource(&shaped, "invoice").actions[0];
    let item = &list.response.attributes[0];
    assert_eq!(item.name, "invoice");
    assert_eq!(item.type_expr, "Invoice");
    assert_eq!(item.category, TypeCategory::Reference);
    assert_eq!(
        list.response.next_offset.as_ref().map(|n| n.type_expr.as_str()),
        Some("string")
    );
}

#[test]
fn test_global_enums_shaped() {
    let shaped = shape();
    let auto_collection = shaped.enums.iter().find(|e| e.name == "auto_collection").unwrap();
    assert_eq!(auto_collection.type_name, "AutoCollection");
    let members: Vec<_> = auto_collection
        .values
        .iter()
        .map(|v| v.identifier.as_str())
        .collect();
    assert_eq!(members, vec!["On", "Off"]);
}

#[test]
fn test_local_enum_deprecation_flags() {
    let shaped = shape();
    let customer = resource(&shaped, "customer");
    let card_status = customer.enums.iter().find(|e| e.name == "customer_card_status").unwrap();
    let flags: Vec<_> = card_status.values.iter().map(|v| v.deprecated).collect();
    assert_eq!(flags, vec![true, false]);
}

#[test]
fn test_shaping_is_deterministic() {
    let first = serde_json::to_value(shape()).unwrap();
    let second = serde_json::to_value(shape()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_resource_shaped_alone_matches_spec_shaping() {
    let spec = spec();
    let backend = TypeScriptBackend::new();
    let shaper = Shaper::new(&backend);

    let alone = shaper.shape_resource(spec.resource("invoice").unwrap());
    let shaped = shaper.shape_spec(&spec);
    assert_eq!(
        serde_json::to_value(&alone).unwrap(),
        serde_json::to_value(resource(&shaped, "invoice")).unwrap()
    );
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_shaping_matches_sequential() {
    let spec = spec();
    let backend = TypeScriptBackend::new();
    let shaper = Shaper::new(&backend);

    let sequential = serde_json::to_value(shaper.shape_spec(&spec)).unwrap();
    let parallel = serde_json::to_value(shaper.shape_spec_parallel(&spec)).unwrap();
    assert_eq!(sequential, parallel);
}

/// Reverses the classified order and maps every type to `unknown`.
struct ReversedOpaqueBackend;

impl Backend for ReversedOpaqueBackend {
    fn name(&self) -> &'static str {
        "opaque"
    }

    fn data_type(&self, _attribute: &Attribute, _ctx: &mut ShapingContext) -> TargetType {
        TargetType::unknown("any")
    }

    fn naming_convention(&self, raw: &str, _kind: NameKind) -> String {
        raw.to_uppercase()
    }

    fn sort_key(&self, node: SortNode<'_>) -> i64 {
        -node.sort_order()
    }
}

#[test]
fn test_custom_backend_sort_key_and_types() {
    let backend = ReversedOpaqueBackend;
    let shaped = Shaper::new(&backend).shape_spec(&spec());
    assert_eq!(shaped.backend, "opaque");

    let customer = resource(&shaped, "customer");
    let names: Vec<_> = customer.actions.iter().map(|a| a.identifier.as_str()).collect();
    assert_eq!(names, vec!["CREATE", "RETRIEVE"]);
    assert!(customer.attributes.iter().all(|a| a.category == TypeCategory::Unknown));
    assert!(customer.imports.is_empty());
}

#[test]
fn test_backend_is_usable_as_trait_object() {
    let backend: Box<dyn Backend> = Box::new(TypeScriptBackend::new());
    let shaped = Shaper::new(backend.as_ref()).shape_spec(&spec());
    assert_eq!(shaped.resources.len(), 2);
}

#[test]
fn test_render_declaration_files() {
    let engine = TemplateEngine::new().unwrap();
    let code = typescript::render(&engine, &shape()).unwrap();

    let paths: Vec<_> = code.files().map(|f| f.path()).collect();
    assert_eq!(paths, vec!["enums.d.ts", "Customer.d.ts", "Invoice.d.ts"]);

    let enums = code.file("enums.d.ts").unwrap();
    assert!(enums.content.contains("export type AutoCollection ="));

    let customer = code.file("Customer.d.ts").unwrap();
    assert!(customer.content.contains("///<reference path='./Invoice.d.ts' />"));
    assert!(customer.content.contains("///<reference path='./enums.d.ts' />"));
    assert!(customer.content.contains("auto_collection?: AutoCollection;"));
    assert!(customer.content.contains("export function retrieve(customerId: string"));
    assert!(customer.content.contains("export interface CreateInputParam {"));
    assert!(customer.content.contains("/** @deprecated Use tax_id */"));

    let invoice = code.file("Invoice.d.ts").unwrap();
    assert!(invoice.content.contains("line_items?: Invoice.LineItem[];"));
    assert!(invoice.content.contains("export interface LineItem {"));
    assert!(invoice.content.contains("list: {"));
    assert!(invoice.content.contains("next_offset?: string;"));
    assert!(invoice.content.contains("status?: filter.Enum<'paid' | 'posted'>;"));
}

#[test]
fn test_resources_keep_name_order_over_sort_order() {
    let mut value = billing_document();
    value["components"]["schemas"]["Customer"]["x-cb-sort-order"] = json!(34);
    value["components"]["schemas"]["Invoice"]["x-cb-sort-order"] = json!(14);
    let doc = Document::from_value(value).unwrap();
    let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();

    let backend = TypeScriptBackend::new();
    let shaped = Shaper::new(&backend).shape_spec(&spec);
    let ids: Vec<_> = shaped.resources.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<_> = spec.resources().iter().map(|r| r.id()).collect();
    assert_eq!(ids, expected);
    assert_eq!(ids, vec!["customer", "invoice"]);
    assert_eq!(shaped.resources[0].sort_order, 34);
}

#[test]
fn test_enum_literals_are_escaped() {
    let mut value = billing_document();
    value["components"]["schemas"]["AutoCollection"]["enum"] = json!(["on", "it's"]);
    let doc = Document::from_value(value).unwrap();
    let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();

    let backend = TypeScriptBackend::new();
    let shaped = Shaper::new(&backend).shape_spec(&spec);
    let engine = TemplateEngine::new().unwrap();
    let code = typescript::render(&engine, &shaped).unwrap();

    let enums = code.file("enums.d.ts").unwrap();
    assert!(enums.content.contains(r"| 'it\'s'"));
    assert!(!enums.content.contains("'it's'"));
}

#[test]
fn test_render_deeply_nested_sub_resources() {
    let doc = Document::from_value(json!({
        "components": {"schemas": {
            "Invoice": {
                "type": "object",
                "x-cb-resource-id": "invoice",
                "properties": {
                    "line_items": {"type": "array", "items": {
                        "type": "object",
                        "x-cb-is-sub-resource": true,
                        "properties": {
                            "taxes": {"type": "array", "items": {
                                "type": "object",
                                "x-cb-is-sub-resource": true,
                                "properties": {
                                    "details": {"type": "array", "items": {
                                        "type": "object",
                                        "x-cb-is-sub-resource": true,
                                        "properties": {"code": {"type": "string"}}
                                    }}
                                }
                            }}
                        }
                    }}
                }
            }
        }}
    }))
    .unwrap();
    let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();
    let backend = TypeScriptBackend::new();
    let shaped = Shaper::new(&backend).shape_spec(&spec);
    let engine = TemplateEngine::new().unwrap();
    let code = typescript::render(&engine, &shaped).unwrap();

    let invoice = code.file("Invoice.d.ts").unwrap();
    assert!(invoice.content.contains("line_items?: Invoice.LineItem[];"));
    assert!(invoice.content.contains("taxes?: Invoice.Tax[];"));
    assert!(invoice.content.contains("details?: Invoice.Detail[];"));
    for declared in ["LineItem", "Tax", "Detail"] {
        assert!(invoice.content.contains(&format!("export interface {declared} {{")));
    }
    assert!(invoice.content.contains("code?: string;"));
}

#[test]
fn test_dependent_flag_is_passed_through() {
    let mut value = billing_document();
    value["components"]["schemas"]["Customer"]["properties"]["invoices"]
        ["x-cb-is-dependent-attribute"] = json!(true);
    let doc = Document::from_value(value).unwrap();
    let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();

    let customer = spec.resource("customer").unwrap();
    assert!(customer.attribute("invoices").unwrap().is_dependent());
    assert!(!customer.attribute("id").unwrap().is_dependent());
    // the views still come from the shape
    assert_eq!(customer.list_dependent_resources().len(), 1);

    let backend = TypeScriptBackend::new();
    let shaped = Shaper::new(&backend).shape_spec(&spec);
    let customer = resource(&shaped, "customer");
    let flags: Vec<_> = customer
        .attributes
        .iter()
        .filter(|a| a.is_dependent)
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(flags, vec!["invoices"]);
}
