//! # Schema Validation Module
//!
//! Tool inputs are described by a small structural schema ([`InputSchema`]): an ordered
//! list of properties, each with a primitive type, a description and a required flag.
//! The same schema is rendered as a JSON-schema object for the MCP `tools/list` surface
//! and used by [`validate_input`] before any executor runs.
//!
//! Validation is exhaustive: every missing required property and every type mismatch is
//! reported in one pass so a caller can fix all problems in a single round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

use crate::tool::ToolInput;

/// Primitive types a tool property may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Object,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Object => "object",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (PropertyType::String, Value::String(_))
                | (PropertyType::Number, Value::Number(_))
                | (PropertyType::Boolean, Value::Bool(_))
                | (PropertyType::Object, Value::Object(_))
        )
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared input property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: String,
    pub kind: PropertyType,
    pub description: String,
    pub required: bool,
}

/// Structural input schema of a tool. Property order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSchema {
    properties: Vec<PropertySpec>,
}

impl InputSchema {
    /// A schema with no properties.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn required(self, name: &str, kind: PropertyType, description: &str) -> Self {
        self.property(name, kind, description, true)
    }

    pub fn optional(self, name: &str, kind: PropertyType, description: &str) -> Self {
        self.property(name, kind, description, false)
    }

    fn property(mut self, name: &str, kind: PropertyType, description: &str, required: bool) -> Self {
        // Redeclaring a property replaces the earlier declaration in place.
        let spec = PropertySpec {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required,
        };
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => *existing = spec,
            None => self.properties.push(spec),
        }
        self
    }

    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// Render as a JSON-schema object: `{type: "object", properties, required}`.
    pub fn to_json(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for property in &self.properties {
            properties.insert(
                property.name.clone(),
                json!({
                    "type": property.kind.as_str(),
                    "description": property.description,
                }),
            );
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        let required: Vec<Value> = self
            .required_names()
            .map(|name| Value::String(name.to_string()))
            .collect();
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The payload itself is not a JSON object.
    NotAnObject { actual: String },
    MissingRequired { property: String },
    TypeMismatch {
        property: String,
        expected: PropertyType,
        actual: String,
    },
}

impl Violation {
    /// Name of the offending property, if the violation concerns one.
    pub fn property(&self) -> Option<&str> {
        match self {
            Violation::NotAnObject { .. } => None,
            Violation::MissingRequired { property } | Violation::TypeMismatch { property, .. } => {
                Some(property)
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotAnObject { actual } => {
                write!(f, "input must be an object, got {}", actual)
            }
            Violation::MissingRequired { property } => {
                write!(f, "missing required property '{}'", property)
            }
            Violation::TypeMismatch {
                property,
                expected,
                actual,
            } => write!(
                f,
                "property '{}' must be of type {}, got {}",
                property, expected, actual
            ),
        }
    }
}

/// JSON type name of a value, as used in violation messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate `input` against `schema`.
///
/// `null` counts as absent: it satisfies no required property and is dropped from the
/// returned input so executors see a missing optional field, never a null one. Properties
/// the schema does not declare are passed through untouched.
pub fn validate_input(schema: &InputSchema, input: &Value) -> Result<ToolInput, Vec<Violation>> {
    let empty = Map::new();
    let object = match input {
        Value::Object(object) => object,
        // An omitted payload is an empty object.
        Value::Null => &empty,
        other => {
            return Err(vec![Violation::NotAnObject {
                actual: json_type_name(other).to_string(),
            }]);
        }
    };

    let mut violations = Vec::new();
    for property in schema.properties() {
        match object.get(&property.name) {
            None | Some(Value::Null) => {
                if property.required {
                    violations.push(Violation::MissingRequired {
                        property: property.name.clone(),
                    });
                }
            }
            Some(value) if !property.kind.accepts(value) => {
                violations.push(Violation::TypeMismatch {
                    property: property.name.clone(),
                    expected: property.kind,
                    actual: json_type_name(value).to_string(),
                });
            }
            Some(_) => {}
        }
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    let cleaned: Map<String, Value> = object
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Ok(ToolInput::from(cleaned))
}
