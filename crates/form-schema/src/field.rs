//! Field descriptors for the form builder

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SchemaError;

/// Input control kinds offered by the builder palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Number,
    Textarea,
    Select,
    Checkbox,
    Date,
}

impl FieldType {
    /// Palette order
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Number,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
        }
    }

    /// Button label in the field palette
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text Input",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
            FieldType::Number => "Number",
            FieldType::Textarea => "Long Text",
            FieldType::Select => "Dropdown",
            FieldType::Checkbox => "Checkbox",
            FieldType::Date => "Date",
        }
    }

    /// Label given to a freshly added field
    pub fn default_label(&self) -> String {
        format!("New {} field", self.as_str())
    }

    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownFieldType(s.to_string()))
    }
}

/// One input control in a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FormField {
    /// A field with the builder defaults: generated label, optional, no options
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: field_type.default_label(),
            placeholder: None,
            required: false,
            options: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Apply the attributes present in `update`; the id never changes
    pub fn apply(&mut self, update: &FieldUpdate) {
        if let Some(field_type) = update.field_type {
            self.field_type = field_type;
        }
        if let Some(ref label) = update.label {
            self.label = label.clone();
        }
        if let Some(ref placeholder) = update.placeholder {
            self.placeholder = placeholder.clone();
        }
        if let Some(required) = update.required {
            self.required = required;
        }
        if let Some(ref options) = update.options {
            self.options = options.clone();
        }
    }
}

/// Partial update of a field's attributes.
///
/// `None` leaves an attribute untouched. For the optional attributes,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Option<Vec<String>>>,
}

/// Distinguishes an explicit `null` (clear) from an absent key (keep)
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl FieldUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn options(mut self, options: Option<Vec<String>>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_labels() {
        assert_eq!(FieldType::Text.default_label(), "New text field");
        assert_eq!(FieldType::Textarea.default_label(), "New textarea field");
        assert_eq!(FieldType::Select.default_label(), "New select field");
    }

    #[test]
    fn test_field_type_parse() {
        for t in FieldType::ALL {
            assert_eq!(t.as_str().parse::<FieldType>().unwrap(), t);
        }
        assert!(matches!(
            "signature".parse::<FieldType>(),
            Err(SchemaError::UnknownFieldType(_))
        ));
    }

    #[test]
    fn test_field_json_shape() {
        let field = FormField::new("2", FieldType::Email)
            .with_label("Business Email")
            .with_placeholder("contact@company.com")
            .required();

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "2",
                "type": "email",
                "label": "Business Email",
                "placeholder": "contact@company.com",
                "required": true
            })
        );
    }

    #[test]
    fn test_apply_partial_update() {
        let mut field = FormField::new("1", FieldType::Text).with_placeholder("Acme");
        field.apply(&FieldUpdate::new().label("Company Name").required(true));

        assert_eq!(field.id(), "1");
        assert_eq!(field.label, "Company Name");
        assert!(field.required);
        assert_eq!(field.placeholder.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_apply_clears_placeholder() {
        let mut field = FormField::new("1", FieldType::Text).with_placeholder("Acme");
        field.apply(&FieldUpdate::new().placeholder(None));
        assert_eq!(field.placeholder, None);
    }

    #[test]
    fn test_update_json_null_vs_absent() {
        let clear: FieldUpdate = serde_json::from_str(r#"{"placeholder": null}"#).unwrap();
        assert_eq!(clear.placeholder, Some(None));

        let keep: FieldUpdate = serde_json::from_str(r#"{"label": "Country"}"#).unwrap();
        assert_eq!(keep.placeholder, None);
        assert_eq!(keep.label.as_deref(), Some("Country"));

        let options: FieldUpdate =
            serde_json::from_str(r#"{"type": "select", "options": ["US", "UK"]}"#).unwrap();
        assert_eq!(options.field_type, Some(FieldType::Select));
        assert_eq!(
            options.options,
            Some(Some(vec!["US".to_string(), "UK".to_string()]))
        );
    }

    #[test]
    fn test_empty_update() {
        assert!(FieldUpdate::new().is_empty());
        assert!(!FieldUpdate::new().required(false).is_empty());
    }
}
