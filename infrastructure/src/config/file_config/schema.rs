//! Answer schema configuration from TOML (`[schema]` section)

use crate::config::issues::{ConfigIssue, ConfigIssueCode};
use judge_domain::{AnswerSchema, SchemaField};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Answer schema from TOML; the built-in schema applies when `fields` is unset.
///
/// # Example
///
/// ```toml
/// [[schema.fields]]
/// name = "answer"
/// type = "string"
/// required = true
/// min_length = 1
///
/// [[schema.fields]]
/// name = "sources"
/// type = "array"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSchemaConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<SchemaField>>,
}

impl FileSchemaConfig {
    pub fn to_schema(&self) -> AnswerSchema {
        match &self.fields {
            Some(fields) => AnswerSchema::new(fields.clone()),
            None => AnswerSchema::default(),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let Some(fields) = &self.fields else {
            return issues;
        };

        if fields.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptySchema,
                "schema.fields: at least one field is required",
            ));
        }

        let mut seen = HashSet::new();
        for field in fields {
            if !seen.insert(field.name.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateSchemaField {
                        name: field.name.clone(),
                    },
                    format!("schema.fields: '{}' is declared more than once", field.name),
                ));
            }
        }

        if fields.iter().all(|f| !f.required) && !fields.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptySchema,
                "schema.fields: no field is required, every JSON object will validate",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use judge_domain::FieldType;

    fn parse(toml_str: &str) -> FileSchemaConfig {
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        config.schema
    }

    #[test]
    fn test_absent_fields_use_default_schema() {
        let config = FileSchemaConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.to_schema(), AnswerSchema::default());
    }

    #[test]
    fn test_custom_fields() {
        let config = parse(
            r#"
[[schema.fields]]
name = "answer"
type = "string"
required = true

[[schema.fields]]
name = "sources"
type = "array"
"#,
        );
        assert!(config.validate().is_empty());
        let schema = config.to_schema();
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.fields()[1].field_type, FieldType::Array);
        assert!(!schema.fields()[1].required);
    }

    #[test]
    fn test_empty_and_duplicate_fields() {
        let empty = FileSchemaConfig {
            fields: Some(vec![]),
        };
        assert!(empty.validate().iter().any(|i| i.is_error()));

        let dup = FileSchemaConfig {
            fields: Some(vec![
                SchemaField::required("answer", FieldType::String),
                SchemaField::optional("answer", FieldType::String),
            ]),
        };
        let issues = dup.validate();
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::DuplicateSchemaField {
                name: "answer".to_string()
            }
        );
    }
}
