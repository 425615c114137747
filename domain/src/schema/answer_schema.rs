//! Answer schema definition

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// JSON type a schema field must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }
}

/// One field of the answer contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Minimum characters (strings) or items (arrays). Ignored for other types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
}

impl SchemaField {
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            min_length: None,
        }
    }

    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            min_length: None,
        }
    }

    pub fn with_min_length(mut self, min: u64) -> Self {
        self.min_length = Some(min);
        self
    }

    fn to_property(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.field_type.as_str()));
        if let Some(min) = self.min_length {
            match self.field_type {
                FieldType::String => {
                    property.insert("minLength".to_string(), json!(min));
                }
                FieldType::Array => {
                    property.insert("minItems".to_string(), json!(min));
                }
                _ => {}
            }
        }
        Value::Object(property)
    }
}

/// The structural contract a submitted answer must satisfy.
///
/// Versionless: the log does not record which schema a row was checked
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSchema {
    fields: Vec<SchemaField>,
}

impl AnswerSchema {
    /// Name of the field free-text answers are placed into.
    pub const ANSWER_FIELD: &'static str = "answer";

    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Render the schema as a JSON Schema document.
    ///
    /// Unknown properties are allowed so that structured answers may carry
    /// extra metadata.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.to_property()))
            .collect();
        let required: Vec<&str> = self.required_fields().map(|f| f.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl Default for AnswerSchema {
    /// `answer` (required, non-empty string) plus optional `reasoning`,
    /// `sources` and `confidence`.
    fn default() -> Self {
        Self::new(vec![
            SchemaField::required(Self::ANSWER_FIELD, FieldType::String).with_min_length(1),
            SchemaField::optional("reasoning", FieldType::String),
            SchemaField::optional("sources", FieldType::Array),
            SchemaField::optional("confidence", FieldType::Number),
        ])
    }
}
