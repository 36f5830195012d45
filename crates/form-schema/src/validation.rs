//! Advisory checks over a form schema
//!
//! Validation never blocks a mutation; the builder runs it on demand (for
//! example before publishing a form) and shows the findings.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::field::FieldType;
use crate::schema::FormSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("field {field_id}: label must not be empty")]
    EmptyLabel { field_id: String },

    #[error("field {field_id}: dropdown has no options")]
    EmptyOptions { field_id: String },

    #[error("field {field_id}: id is used by more than one field")]
    DuplicateId { field_id: String },
}

impl ValidationError {
    pub fn field_id(&self) -> &str {
        match self {
            ValidationError::EmptyLabel { field_id }
            | ValidationError::EmptyOptions { field_id }
            | ValidationError::DuplicateId { field_id } => field_id,
        }
    }
}

/// Check every field, in schema order
pub fn validate(schema: &FormSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for field in schema.iter() {
        if !seen.insert(field.id()) {
            errors.push(ValidationError::DuplicateId {
                field_id: field.id().to_string(),
            });
        }

        if field.label.trim().is_empty() {
            errors.push(ValidationError::EmptyLabel {
                field_id: field.id().to_string(),
            });
        }

        if field.field_type == FieldType::Select
            && field.options.as_ref().map_or(true, |o| o.is_empty())
        {
            errors.push(ValidationError::EmptyOptions {
                field_id: field.id().to_string(),
            });
        }
    }

    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "form schema has validation findings");
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldUpdate, FormField};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_without_options() {
        let schema = FormSchema::from_fields(vec![
            FormField::new("country", FieldType::Select).with_label("Country"),
        ]);
        assert_eq!(
            validate(&schema),
            vec![ValidationError::EmptyOptions {
                field_id: "country".to_string()
            }]
        );

        let explicit_empty = schema.update_field("country", &FieldUpdate::new().options(Some(vec![])));
        let errors = validate(&explicit_empty);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_id(), "country");
    }

    #[test]
    fn test_select_with_options_is_valid() {
        let schema = FormSchema::from_fields(vec![FormField::new("country", FieldType::Select)
            .with_label("Country")
            .with_options(["US", "UK"])]);
        assert!(validate(&schema).is_empty());
    }

    #[test]
    fn test_blank_label() {
        let schema = FormSchema::from_fields(vec![
            FormField::new("a", FieldType::Text).with_label("   "),
            FormField::new("b", FieldType::Text).with_label(""),
            FormField::new("c", FieldType::Text).with_label("Name"),
        ]);
        let ids: Vec<_> = validate(&schema).iter().map(|e| e.field_id().to_string()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_default_fields_are_valid_except_select() {
        let mut schema = FormSchema::new();
        for t in FieldType::ALL {
            schema = schema.add_field(t);
        }
        let errors = validate(&schema);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::EmptyOptions { .. }));
    }

    #[test]
    fn test_duplicate_ids_reported() {
        let schema: FormSchema = serde_json::from_str(
            r#"{"fields": [
                {"id": "1", "type": "text", "label": "A"},
                {"id": "1", "type": "date", "label": "B"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            validate(&schema),
            vec![ValidationError::DuplicateId {
                field_id: "1".to_string()
            }]
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ValidationError::EmptyOptions {
            field_id: "f1".to_string(),
        };
        assert_eq!(err.to_string(), "field f1: dropdown has no options");
    }
}
