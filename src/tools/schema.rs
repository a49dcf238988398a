//! Argument schemas
//!
//! An [`ObjectSchema`] describes the arguments of one tool. It renders itself
//! as JSON Schema for `tools/list` and validates raw JSON arguments before a
//! handler runs, applying defaults and dropping undeclared keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Type of a single argument field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    /// Closed set of string literals
    Enum(Vec<&'static str>),
    Array(Box<FieldType>),
    Object(ObjectSchema),
    /// Open-ended string-to-string map
    Labels,
    /// First matching alternative wins
    OneOf(Vec<FieldType>),
    Any,
}

impl FieldType {
    /// Enum over the given literals
    pub fn one_of_literals(values: &[&'static str]) -> Self {
        Self::Enum(values.to_vec())
    }

    /// Array of `item`
    pub fn array_of(item: FieldType) -> Self {
        Self::Array(Box::new(item))
    }

    /// Render as a JSON Schema fragment
    pub fn to_json_schema(&self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Number => json!({ "type": "number" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Enum(values) => json!({ "type": "string", "enum": values }),
            Self::Array(item) => json!({ "type": "array", "items": item.to_json_schema() }),
            Self::Object(schema) => schema.to_json_schema(),
            Self::Labels => json!({
                "type": "object",
                "additionalProperties": { "type": "string" }
            }),
            Self::OneOf(options) => {
                let options: Vec<Value> = options.iter().map(FieldType::to_json_schema).collect();
                json!({ "anyOf": options })
            }
            Self::Any => json!({}),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::String | Self::Enum(_) => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Array(_) => "array".to_string(),
            Self::Object(_) | Self::Labels => "object".to_string(),
            Self::OneOf(options) => options.iter().map(FieldType::label).collect::<Vec<_>>().join(" | "),
            Self::Any => "any".to_string(),
        }
    }

    /// Check `value` against this type, returning the coerced value
    fn check(&self, value: &Value, path: &str, errors: &mut Vec<FieldError>) -> Option<Value> {
        match self {
            Self::String => match value {
                Value::String(_) => Some(value.clone()),
                other => mismatch(path, "string", other, errors),
            },
            Self::Number => match value {
                Value::Number(_) => Some(value.clone()),
                other => mismatch(path, "number", other, errors),
            },
            Self::Integer => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
                Value::Number(n) => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(json!(f as i64)),
                    _ => {
                        errors.push(FieldError::new(path, "Expected integer, received float"));
                        None
                    }
                },
                other => mismatch(path, "integer", other, errors),
            },
            Self::Boolean => match value {
                Value::Bool(_) => Some(value.clone()),
                other => mismatch(path, "boolean", other, errors),
            },
            Self::Enum(allowed) => match value {
                Value::String(s) if allowed.contains(&s.as_str()) => Some(value.clone()),
                Value::String(s) => {
                    let expected: Vec<String> = allowed.iter().map(|v| format!("'{}'", v)).collect();
                    errors.push(FieldError::new(
                        path,
                        format!(
                            "Invalid enum value. Expected {}, received '{}'",
                            expected.join(" | "),
                            s
                        ),
                    ));
                    None
                }
                other => mismatch(path, "string", other, errors),
            },
            Self::Array(item) => match value {
                Value::Array(items) => {
                    let before = errors.len();
                    let checked: Vec<Value> = items
                        .iter()
                        .enumerate()
                        .filter_map(|(i, v)| item.check(v, &format!("{}[{}]", path, i), errors))
                        .collect();
                    (errors.len() == before).then_some(Value::Array(checked))
                }
                other => mismatch(path, "array", other, errors),
            },
            Self::Object(schema) => schema.check_object(value, path, errors).map(Value::Object),
            Self::Labels => match value {
                Value::Object(map) => {
                    let before = errors.len();
                    for (key, v) in map {
                        if !v.is_string() {
                            mismatch(&join_path(path, key), "string", v, errors);
                        }
                    }
                    (errors.len() == before).then(|| value.clone())
                }
                other => mismatch(path, "object", other, errors),
            },
            Self::OneOf(options) => {
                for option in options {
                    let mut scratch = Vec::new();
                    if let Some(v) = option.check(value, path, &mut scratch) {
                        return Some(v);
                    }
                }
                errors.push(FieldError::new(
                    path,
                    format!(
                        "Invalid input: expected {}, received {}",
                        self.label(),
                        value_kind(value)
                    ),
                ));
                None
            }
            Self::Any => Some(value.clone()),
        }
    }
}

/// One named argument
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub nullable: bool,
    pub default: Option<Value>,
    pub description: Option<&'static str>,
}

impl Field {
    /// A field that must be present
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
            nullable: false,
            default: None,
            description: None,
        }
    }

    /// A field that may be omitted
    pub fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Set description
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Set a default, which also makes the field optional
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self.required = false;
        self
    }

    /// Accept JSON `null`
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = self.field_type.to_json_schema();
        if self.nullable {
            schema = json!({ "anyOf": [schema, { "type": "null" }] });
        }
        if let Value::Object(map) = &mut schema {
            if let Some(default) = &self.default {
                map.insert("default".to_string(), default.clone());
            }
            if let Some(description) = self.description {
                map.insert("description".to_string(), Value::String(description.to_string()));
            }
        }
        schema
    }
}

/// Schema over a JSON object: an ordered list of fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<Field>,
}

impl ObjectSchema {
    /// Create an empty schema (accepts `{}`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a required field
    pub fn required(self, name: &'static str, field_type: FieldType) -> Self {
        self.field(Field::required(name, field_type))
    }

    /// Add an optional field
    pub fn optional(self, name: &'static str, field_type: FieldType) -> Self {
        self.field(Field::optional(name, field_type))
    }

    /// Declared fields in order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render as a JSON Schema object
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            properties.insert(field.name.to_string(), field.to_json_schema());
            if field.required {
                required.push(Value::String(field.name.to_string()));
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
            "additionalProperties": false
        });
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        schema
    }

    /// Validate raw arguments, returning the coerced argument map
    pub fn validate(&self, value: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let mut errors = Vec::new();
        let checked = self.check_object(value, "", &mut errors);
        match checked {
            Some(map) if errors.is_empty() => Ok(map),
            _ => Err(ValidationErrors(errors)),
        }
    }

    fn check_object(&self, value: &Value, path: &str, errors: &mut Vec<FieldError>) -> Option<Map<String, Value>> {
        let input = match value {
            Value::Object(map) => map,
            other => {
                mismatch(path, "object", other, errors);
                return None;
            }
        };

        let before = errors.len();
        let mut output = Map::new();
        for field in &self.fields {
            let field_path = join_path(path, field.name);
            match input.get(field.name) {
                None => {
                    if let Some(default) = &field.default {
                        output.insert(field.name.to_string(), default.clone());
                    } else if field.required {
                        errors.push(FieldError::new(field_path, "Required"));
                    }
                }
                Some(Value::Null) if field.nullable => {
                    output.insert(field.name.to_string(), Value::Null);
                }
                Some(raw) => {
                    if let Some(checked) = field.field_type.check(raw, &field_path, errors) {
                        output.insert(field.name.to_string(), checked);
                    }
                }
            }
        }

        (errors.len() == before).then_some(output)
    }
}

/// One validation failure, located by field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// All failures found while validating one argument object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Paths of all failing fields
    pub fn paths(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.path.as_str()).collect()
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &str, expected: &str, actual: &Value, errors: &mut Vec<FieldError>) -> Option<Value> {
    errors.push(FieldError::new(
        path,
        format!("Expected {}, received {}", expected, value_kind(actual)),
    ));
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change_type_schema() -> ObjectSchema {
        ObjectSchema::new()
            .required("id", FieldType::Integer)
            .field(Field::required("server_type", FieldType::String).describe("New server type (e.g. cx22)"))
            .field(Field::optional("upgrade_disk", FieldType::Boolean).with_default(json!(true)))
    }

    fn health_check_schema() -> ObjectSchema {
        ObjectSchema::new().optional(
            "health_check",
            FieldType::Object(
                ObjectSchema::new()
                    .required("protocol", FieldType::one_of_literals(&["tcp", "http"]))
                    .required("port", FieldType::Number)
                    .optional(
                        "http",
                        FieldType::Object(
                            ObjectSchema::new()
                                .field(Field::optional("domain", FieldType::String).nullable())
                                .optional("status_codes", FieldType::array_of(FieldType::String)),
                        ),
                    ),
            ),
        )
    }

    #[test]
    fn test_empty_schema_accepts_empty_object() {
        let args = ObjectSchema::new().validate(&json!({})).unwrap();
        assert!(args.is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let err = change_type_schema().validate(&json!({"server_type": "cx22"})).unwrap_err();
        assert_eq!(err.paths(), vec!["id"]);
        assert_eq!(err.errors()[0].message, "Required");
    }

    #[test]
    fn test_default_applied_when_omitted() {
        let args = change_type_schema()
            .validate(&json!({"id": 7, "server_type": "cx32"}))
            .unwrap();
        assert_eq!(args["upgrade_disk"], json!(true));
    }

    #[test]
    fn test_default_not_applied_when_supplied() {
        let args = change_type_schema()
            .validate(&json!({"id": 7, "server_type": "cx32", "upgrade_disk": false}))
            .unwrap();
        assert_eq!(args["upgrade_disk"], json!(false));
    }

    #[test]
    fn test_wrong_primitive_type() {
        let err = change_type_schema()
            .validate(&json!({"id": "seven", "server_type": "cx22"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "id: Expected integer, received string");
    }

    #[test]
    fn test_integer_accepts_integral_float() {
        let args = change_type_schema()
            .validate(&json!({"id": 42.0, "server_type": "cx22"}))
            .unwrap();
        assert_eq!(args["id"], json!(42));
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let err = change_type_schema()
            .validate(&json!({"id": 4.5, "server_type": "cx22"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "id: Expected integer, received float");
    }

    #[test]
    fn test_enum_outside_declared_set() {
        let schema = ObjectSchema::new().required("type", FieldType::one_of_literals(&["ipv4", "ipv6"]));
        let err = schema.validate(&json!({"type": "ipv5"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type: Invalid enum value. Expected 'ipv4' | 'ipv6', received 'ipv5'"
        );
    }

    #[test]
    fn test_nested_object_error_path() {
        let err = health_check_schema()
            .validate(&json!({"health_check": {"protocol": "tcp", "port": "80"}}))
            .unwrap_err();
        assert_eq!(err.paths(), vec!["health_check.port"]);
    }

    #[test]
    fn test_nested_nullable_field() {
        let args = health_check_schema()
            .validate(&json!({"health_check": {"protocol": "http", "port": 80, "http": {"domain": null}}}))
            .unwrap();
        assert_eq!(args["health_check"]["http"]["domain"], Value::Null);
    }

    #[test]
    fn test_null_rejected_for_non_nullable() {
        let schema = ObjectSchema::new().optional("name", FieldType::String);
        let err = schema.validate(&json!({"name": null})).unwrap_err();
        assert_eq!(err.to_string(), "name: Expected string, received null");
    }

    #[test]
    fn test_array_item_error_path() {
        let err = health_check_schema()
            .validate(&json!({"health_check": {"protocol": "http", "port": 80, "http": {"status_codes": ["2??", 3]}}}))
            .unwrap_err();
        assert_eq!(err.paths(), vec!["health_check.http.status_codes[1]"]);
    }

    #[test]
    fn test_labels_pass_through() {
        let schema = ObjectSchema::new().optional("labels", FieldType::Labels);
        let args = schema.validate(&json!({"labels": {"env": "prod", "team": "infra"}})).unwrap();
        assert_eq!(args["labels"], json!({"env": "prod", "team": "infra"}));
    }

    #[test]
    fn test_labels_reject_non_string_values() {
        let schema = ObjectSchema::new().optional("labels", FieldType::Labels);
        let err = schema.validate(&json!({"labels": {"replicas": 3}})).unwrap_err();
        assert_eq!(err.paths(), vec!["labels.replicas"]);
    }

    #[test]
    fn test_one_of_alternatives() {
        let schema = ObjectSchema::new().optional(
            "ssh_keys",
            FieldType::array_of(FieldType::OneOf(vec![FieldType::String, FieldType::Number])),
        );
        let args = schema.validate(&json!({"ssh_keys": ["laptop", 1234]})).unwrap();
        assert_eq!(args["ssh_keys"], json!(["laptop", 1234]));

        let err = schema.validate(&json!({"ssh_keys": [true]})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ssh_keys[0]: Invalid input: expected string | number, received boolean"
        );
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let schema = ObjectSchema::new().required("id", FieldType::Integer);
        let args = schema.validate(&json!({"id": 1, "force": true})).unwrap();
        assert!(!args.contains_key("force"));
    }

    #[test]
    fn test_omitted_optional_field_is_absent() {
        let schema = ObjectSchema::new()
            .required("id", FieldType::Integer)
            .optional("name", FieldType::String);
        let args = schema.validate(&json!({"id": 1})).unwrap();
        assert!(!args.contains_key("name"));
    }

    #[test]
    fn test_non_object_arguments() {
        let err = ObjectSchema::new().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "Expected object, received array");
    }

    #[test]
    fn test_multiple_errors_reported() {
        let err = change_type_schema().validate(&json!({"upgrade_disk": "yes"})).unwrap_err();
        assert_eq!(err.paths(), vec!["id", "server_type", "upgrade_disk"]);
    }

    #[test]
    fn test_json_schema_rendering() {
        let schema = change_type_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["id"]["type"], "integer");
        assert_eq!(schema["properties"]["server_type"]["description"], "New server type (e.g. cx22)");
        assert_eq!(schema["properties"]["upgrade_disk"]["default"], json!(true));
        assert_eq!(schema["required"], json!(["id", "server_type"]));
    }

    #[test]
    fn test_json_schema_without_required() {
        let schema = ObjectSchema::new().to_json_schema();
        assert!(schema.get("required").is_none());
        assert_eq!(schema["properties"], json!({}));
    }

    #[test]
    fn test_json_schema_nested_types() {
        let schema = health_check_schema().to_json_schema();
        let hc = &schema["properties"]["health_check"];
        assert_eq!(hc["properties"]["protocol"]["enum"], json!(["tcp", "http"]));
        assert_eq!(
            hc["properties"]["http"]["properties"]["domain"]["anyOf"][1],
            json!({"type": "null"})
        );
        assert_eq!(
            FieldType::Labels.to_json_schema()["additionalProperties"],
            json!({"type": "string"})
        );
    }
}
