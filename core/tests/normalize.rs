use apisheet_core::{
    load_document, normalize_document, EndpointNormalizer, HttpMethod, NormalizedDocument,
    NormalizerConfig, ParamLocation, PropertyRecord,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

const PET_STORE: &str = r#"
openapi: 3.0.3
info:
  title: Pet Store
  version: "1.2.0"
  description: Sample store
servers:
  - url: https://api.example.com/v1
    description: Production
tags:
  - name: pets
    description: Pet operations
components:
  securitySchemes:
    ApiKeyAuth:
      type: apiKey
      in: header
      name: X-API-Key
    BearerAuth:
      type: http
      scheme: bearer
      bearerFormat: JWT
  parameters:
    PetId:
      name: petId
      in: path
      required: true
      schema:
        type: integer
        format: int64
  schemas:
    Entity:
      type: object
      required: [id]
      properties:
        id:
          type: integer
          format: int64
    Pet:
      allOf:
        - $ref: '#/components/schemas/Entity'
        - type: object
          required: [name]
          properties:
            name:
              type: string
            tags:
              type: array
              items:
                type: string
            owner:
              $ref: '#/components/schemas/Owner'
    Owner:
      type: object
      properties:
        email:
          type: string
          format: email
    Category:
      type: object
      properties:
        name:
          type: string
        parent:
          $ref: '#/components/schemas/Category'
paths:
  /pets:
    get:
      tags: [pets]
      summary: List pets
      operationId: listPets
      parameters:
        - name: status
          in: query
          schema:
            type: array
            items:
              type: string
          example: [available, sold]
      responses:
        "200":
          description: Pet list
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Pet'
    post:
      tags: [pets]
      operationId: createPet
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Pet'
            example:
              id: 2
              name: Ignored
            examples:
              rex:
                summary: A dog
                value:
                  id: 1
                  name: Rex
          application/xml:
            schema:
              $ref: '#/components/schemas/Pet'
          application/octet-stream:
            schema:
              type: string
              format: binary
      responses:
        "201":
          description: Created
  /pets/{petId}:
    parameters:
      - $ref: '#/components/parameters/PetId'
    delete:
      operationId: deletePet
      responses:
        "204":
          description: Deleted
  /categories:
    get:
      operationId: listCategories
      responses:
        "200":
          description: Category tree
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Category'
"#;

fn normalized() -> NormalizedDocument {
    normalize_document(PET_STORE, &NormalizerConfig::default()).unwrap()
}

fn prop(name: &str, ty: &str, format: Option<&str>, required: bool) -> PropertyRecord {
    PropertyRecord {
        name: name.into(),
        ty: ty.into(),
        format: format.map(Into::into),
        required,
        description: None,
        children: None,
    }
}

fn pet_properties() -> Vec<PropertyRecord> {
    let mut owner = prop("owner", "object", None, false);
    owner.children = Some(vec![prop("email", "string", Some("email"), false)]);
    vec![
        prop("id", "integer", Some("int64"), true),
        prop("name", "string", None, true),
        prop("tags", "array<string>", None, false),
        owner,
    ]
}

#[test]
fn test_endpoint_order() {
    let doc = normalized();
    let order: Vec<(HttpMethod, &str)> = doc
        .endpoints
        .iter()
        .map(|e| (e.method, e.path.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (HttpMethod::Get, "/pets"),
            (HttpMethod::Post, "/pets"),
            (HttpMethod::Delete, "/pets/{petId}"),
            (HttpMethod::Get, "/categories"),
        ]
    );
}

#[test]
fn test_array_of_composed_objects() {
    let doc = normalized();
    let list = &doc.endpoints[0];
    assert_eq!(list.summary, "List pets");
    assert_eq!(list.operation_id.as_deref(), Some("listPets"));

    let response = &list.responses[0];
    assert_eq!(response.status_code, "200");
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    assert_eq!(response.schema.as_deref(), Some("array<object>"));

    let mut items = prop("(items)", "object", None, false);
    items.children = Some(pet_properties());
    assert_eq!(response.properties, vec![items]);

    assert_eq!(response.samples.len(), 1);
    assert!(response.samples[0].value.starts_with('['));
    assert!(response.samples[0].value.contains("\"email\": \"user@example.com\""));
}

#[test]
fn test_query_parameter_explode() {
    let doc = normalized();
    let status = &doc.endpoints[0].parameters[0];
    assert_eq!(status.name, "status");
    assert_eq!(status.location, ParamLocation::Query);
    assert_eq!(status.ty, "array<string>");
    assert_eq!(status.example.as_deref(), Some("status=available&status=sold"));
}

#[test]
fn test_request_body_variants() {
    let doc = normalized();
    let create = &doc.endpoints[1];
    assert_eq!(create.request_bodies.len(), 2);

    let json = &create.request_bodies[0];
    assert!(json.required);
    assert_eq!(json.content_type, "application/json, application/xml");
    assert_eq!(json.schema, "object { id, name, tags, ... }");
    assert_eq!(json.properties, pet_properties());

    // Named examples beat the unnamed one.
    assert_eq!(json.samples.len(), 1);
    assert_eq!(json.samples[0].name.as_deref(), Some("rex"));
    assert_eq!(json.samples[0].summary.as_deref(), Some("A dog"));
    assert_eq!(json.samples[0].value, "{\n  \"id\": 1,\n  \"name\": \"Rex\"\n}");

    let file = &create.request_bodies[1];
    assert_eq!(file.content_type, "application/octet-stream");
    assert_eq!(file.schema, "string");
    assert!(file.properties.is_empty());
    assert!(file.samples.is_empty());

    let created = &create.responses[0];
    assert_eq!(created.status_code, "201");
    assert!(created.content_type.is_none());
}

#[test]
fn test_path_level_ref_parameter_and_bodiless_response() {
    let doc = normalized();
    let delete = &doc.endpoints[2];

    assert_eq!(delete.parameters.len(), 1);
    let pet_id = &delete.parameters[0];
    assert_eq!(pet_id.name, "petId");
    assert_eq!(pet_id.location, ParamLocation::Path);
    assert!(pet_id.required);
    assert_eq!(pet_id.ty, "integer");
    assert_eq!(pet_id.format.as_deref(), Some("int64"));

    let response = &delete.responses[0];
    assert_eq!(response.status_code, "204");
    assert_eq!(response.description, "Deleted");
    assert!(response.content_type.is_none());
    assert!(response.schema.is_none());
    assert!(response.properties.is_empty());
    assert!(delete.request_bodies.is_empty());
}

#[test]
fn test_cyclic_schema_is_truncated() {
    let doc = normalized();
    let response = &doc.endpoints[3].responses[0];
    assert_eq!(response.schema.as_deref(), Some("object { name, parent }"));

    let mut level = &response.properties;
    for _ in 0..5 {
        let parent = level.iter().find(|p| p.name == "parent").unwrap();
        level = parent.children.as_ref().unwrap();
    }
    let deepest = level.iter().find(|p| p.name == "parent").unwrap();
    assert_eq!(deepest.children, Some(Vec::new()));

    // The sampler stops at the schema it is already inside.
    assert_eq!(
        response.samples[0].value,
        "{\n  \"name\": \"string\",\n  \"parent\": null\n}"
    );
}

fn count_records(records: &[PropertyRecord]) -> usize {
    records
        .iter()
        .map(|r| 1 + r.children.as_deref().map_or(0, count_records))
        .sum()
}

fn leaf_depth(records: &[PropertyRecord]) -> usize {
    match records.first().and_then(|r| r.children.as_deref()) {
        Some(children) if !children.is_empty() => 1 + leaf_depth(children),
        _ => 0,
    }
}

#[test]
fn test_densely_recursive_components_stay_bounded() {
    let names = ["S0", "S1", "S2", "S3"];
    let mut schemas = serde_json::Map::new();
    for name in names {
        let properties: serde_json::Map<String, serde_json::Value> = names
            .iter()
            .enumerate()
            .map(|(i, target)| {
                (
                    format!("p{}", i),
                    json!({ "$ref": format!("#/components/schemas/{}", target) }),
                )
            })
            .collect();
        schemas.insert(name.into(), json!({ "type": "object", "properties": properties }));
    }
    let document = json!({
        "openapi": "3.0.3",
        "info": { "title": "Mesh", "version": "1" },
        "paths": {
            "/mesh": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/S0" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": { "schemas": schemas }
    });

    let doc = normalize_document(&document.to_string(), &NormalizerConfig::default()).unwrap();
    let response = &doc.endpoints[0].responses[0];
    assert_eq!(response.schema.as_deref(), Some("object { p0, p1, p2, ... }"));
    assert_eq!(response.properties.len(), 4);
    assert!(response
        .properties
        .iter()
        .all(|p| p.ty == "object" && p.children.as_ref().map(Vec::len) == Some(4)));

    // Six levels of four properties each, the last one truncated.
    assert_eq!(count_records(&response.properties), 4 + 16 + 64 + 256 + 1024 + 4096);
    assert_eq!(leaf_depth(&response.properties), 5);
    assert_eq!(response.samples.len(), 1);
}

#[test]
fn test_property_named_like_a_keyword() {
    let yaml = r#"
openapi: 3.1.0
info: {title: Keywords, version: "1"}
paths:
  /people:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                default: {$ref: '#/components/schemas/Addr'}
                home: {$ref: '#/components/schemas/Addr'}
                example: {$ref: '#/components/schemas/Addr/properties/city'}
      responses:
        default:
          $ref: '#/components/responses/Problem'
components:
  responses:
    Problem:
      description: Unexpected error
  schemas:
    Addr:
      type: object
      properties:
        city: {type: string}
"#;
    let doc = normalize_document(yaml, &NormalizerConfig::default()).unwrap();
    let endpoint = &doc.endpoints[0];
    let props = &endpoint.request_bodies[0].properties;

    assert_eq!(props[0].name, "default");
    assert_eq!(props[0].ty, "object");
    assert_eq!(props[0].children, props[1].children);
    assert_eq!(props[0].children.as_ref().unwrap()[0].name, "city");
    assert_eq!(props[2].name, "example");
    assert_eq!(props[2].ty, "string");

    assert_eq!(endpoint.responses[0].status_code, "default");
    assert_eq!(endpoint.responses[0].description, "Unexpected error");
}

#[test]
fn test_metadata() {
    let doc = normalized();
    assert_eq!(doc.meta.title, "Pet Store");
    assert_eq!(doc.meta.version, "1.2.0");
    assert_eq!(doc.meta.description, "Sample store");
    assert_eq!(doc.meta.servers[0].url, "https://api.example.com/v1");

    assert_eq!(doc.security_schemes.len(), 2);
    assert_eq!(doc.security_schemes[0].location, Some(ParamLocation::Header));
    assert_eq!(doc.security_schemes[0].parameter_name.as_deref(), Some("X-API-Key"));
    assert_eq!(doc.security_schemes[1].bearer_format.as_deref(), Some("JWT"));

    assert_eq!(doc.tags.len(), 1);
    assert_eq!(doc.tags[0].description.as_deref(), Some("Pet operations"));
}

#[test]
fn test_smaller_depth_bound() {
    let config = NormalizerConfig::default().with_max_depth(1);
    let doc = normalize_document(PET_STORE, &config).unwrap();
    let response = &doc.endpoints[3].responses[0];

    let parent = response.properties.iter().find(|p| p.name == "parent").unwrap();
    let nested = parent.children.as_ref().unwrap();
    let nested_parent = nested.iter().find(|p| p.name == "parent").unwrap();
    assert_eq!(nested_parent.children, Some(Vec::new()));
}

#[test]
fn test_serialized_shape() {
    let value = serde_json::to_value(normalized()).unwrap();
    let list = &value["endpoints"][0];
    assert_eq!(list["method"], "GET");
    assert_eq!(list["operationId"], "listPets");
    assert_eq!(list["parameters"][0]["in"], "query");
    assert_eq!(list["responses"][0]["statusCode"], "200");

    let deleted = &value["endpoints"][2]["responses"][0];
    assert!(deleted.get("contentType").is_none());
    assert!(deleted.get("schema").is_none());
    assert_eq!(value["securitySchemes"][1]["bearerFormat"], "JWT");
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    fs::write(&path, PET_STORE).unwrap();

    let config = NormalizerConfig::default();
    let openapi = load_document(&path, &config).unwrap();
    let doc = EndpointNormalizer::new(config).normalize(&openapi);
    assert_eq!(doc, normalized());
}
