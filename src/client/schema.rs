//! Conversion of MCP tool input schemas into Gemini function parameters.
//!
//! Gemini accepts an OpenAPI-style subset of JSON Schema: no `$ref`, no
//! `$schema`, no type arrays, no `additionalProperties`. The tool server's
//! schemas come from schemars and use all of these.

use serde_json::{Map, Value};

/// Keys copied through unchanged.
const KEPT_KEYS: &[&str] = &[
    "description",
    "enum",
    "required",
    "minimum",
    "maximum",
    "minItems",
    "maxItems",
];

/// `format` values Gemini understands.
const KEPT_FORMATS: &[&str] = &["int32", "int64", "float", "double", "date-time", "enum"];

/// `$ref` chains deeper than this are cut off.
const MAX_REF_DEPTH: usize = 16;

/// Rewrite a tool input schema for a Gemini function declaration.
///
/// Returns `None` for schemas without properties; Gemini rejects an OBJECT
/// parameter with an empty property map, so such functions are declared
/// without parameters.
pub fn to_gemini_parameters(schema: &Value) -> Option<Value> {
    let defs = schema
        .get("$defs")
        .or_else(|| schema.get("definitions"))
        .and_then(Value::as_object);

    let converted = convert(schema, defs, 0);
    let has_properties = converted
        .get("properties")
        .and_then(Value::as_object)
        .is_some_and(|props| !props.is_empty());

    has_properties.then_some(converted)
}

fn convert(schema: &Value, defs: Option<&Map<String, Value>>, depth: usize) -> Value {
    let Some(object) = schema.as_object() else {
        return Value::Object(Map::new());
    };

    if let Some(target) = object.get("$ref").and_then(Value::as_str) {
        let resolved = resolve_ref(target, defs).filter(|_| depth < MAX_REF_DEPTH);
        let mut inlined = match resolved {
            Some(target) => convert(target, defs, depth + 1),
            None => Value::Object(Map::new()),
        };
        // Sibling description wins over the referenced one.
        if let (Some(description), Some(map)) = (object.get("description"), inlined.as_object_mut())
        {
            map.insert("description".to_string(), description.clone());
        }
        return inlined;
    }

    // `anyOf: [X, {"type": "null"}]` is how an Option<X> is spelled.
    if let Some(variants) = object.get("anyOf").or_else(|| object.get("oneOf")) {
        if let Some(variants) = variants.as_array() {
            return convert_union(object, variants, defs, depth);
        }
    }

    let mut out = Map::new();

    match object.get("type") {
        Some(Value::String(ty)) => {
            out.insert("type".to_string(), Value::String(ty.clone()));
        }
        Some(Value::Array(types)) => {
            let mut concrete = types.iter().filter_map(Value::as_str).filter(|t| *t != "null");
            if let Some(ty) = concrete.next() {
                out.insert("type".to_string(), Value::String(ty.to_string()));
            }
            if types.iter().any(|t| t == "null") {
                out.insert("nullable".to_string(), Value::Bool(true));
            }
        }
        _ => {}
    }

    for key in KEPT_KEYS {
        if let Some(value) = object.get(*key) {
            out.insert((*key).to_string(), value.clone());
        }
    }

    // A null entry in an enum is expressed by `nullable`.
    if let Some(Value::Array(values)) = out.get_mut("enum") {
        if values.iter().any(Value::is_null) {
            values.retain(|v| !v.is_null());
            out.insert("nullable".to_string(), Value::Bool(true));
        }
    }

    if let Some(format) = object.get("format").and_then(Value::as_str) {
        if KEPT_FORMATS.contains(&format) {
            out.insert("format".to_string(), Value::String(format.to_string()));
        }
    }

    if let Some(properties) = object.get("properties").and_then(Value::as_object) {
        let converted: Map<String, Value> = properties
            .iter()
            .map(|(name, prop)| (name.clone(), convert(prop, defs, depth)))
            .collect();
        out.insert("properties".to_string(), Value::Object(converted));
        out.entry("type").or_insert_with(|| Value::String("object".to_string()));
    }

    if let Some(items) = object.get("items") {
        out.insert("items".to_string(), convert(items, defs, depth));
    }

    Value::Object(out)
}

fn convert_union(
    object: &Map<String, Value>,
    variants: &[Value],
    defs: Option<&Map<String, Value>>,
    depth: usize,
) -> Value {
    let is_null = |v: &Value| v.get("type").and_then(Value::as_str) == Some("null");
    let nullable = variants.iter().any(is_null);

    let mut converted = variants
        .iter()
        .find(|v| !is_null(v))
        .map(|v| convert(v, defs, depth))
        .unwrap_or_else(|| Value::Object(Map::new()));

    if let Some(map) = converted.as_object_mut() {
        if nullable {
            map.insert("nullable".to_string(), Value::Bool(true));
        }
        if let Some(description) = object.get("description") {
            map.insert("description".to_string(), description.clone());
        }
    }
    converted
}

fn resolve_ref<'a>(target: &str, defs: Option<&'a Map<String, Value>>) -> Option<&'a Value> {
    let name = target
        .strip_prefix("#/$defs/")
        .or_else(|| target.strip_prefix("#/definitions/"))?;
    defs?.get(name)
}
