//! Starter forms offered when inviting a client

use serde::Serialize;

use crate::errors::SchemaError;
use crate::field::{FieldType, FormField};
use crate::schema::FormSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormTemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const FORM_TEMPLATES: &[FormTemplateInfo] = &[
    FormTemplateInfo {
        id: "basic-kyc",
        name: "Basic KYC Form",
        description: "Standard client information",
    },
    FormTemplateInfo {
        id: "corporate-kyc",
        name: "Corporate KYC Form",
        description: "Enhanced corporate due diligence",
    },
    FormTemplateInfo {
        id: "high-risk-kyc",
        name: "High Risk KYC Form",
        description: "Comprehensive verification",
    },
];

/// Fields a new form starts with in the builder
pub fn default_onboarding_schema() -> FormSchema {
    FormSchema::from_fields(vec![
        FormField::new("company_name", FieldType::Text)
            .with_label("Company Name")
            .with_placeholder("Enter your company name")
            .required(),
        FormField::new("business_email", FieldType::Email)
            .with_label("Business Email")
            .with_placeholder("contact@company.com")
            .required(),
        FormField::new("phone_number", FieldType::Phone)
            .with_label("Phone Number")
            .with_placeholder("+1 (555) 123-4567"),
    ])
}

fn corporate_fields() -> Vec<FormField> {
    vec![
        FormField::new("registration_number", FieldType::Text)
            .with_label("Company Registration Number")
            .required(),
        FormField::new("incorporation_country", FieldType::Select)
            .with_label("Country of Incorporation")
            .with_options(["United States", "United Kingdom", "Canada", "Germany", "Other"])
            .required(),
        FormField::new("incorporation_date", FieldType::Date).with_label("Date of Incorporation"),
        FormField::new("beneficial_owners", FieldType::Textarea)
            .with_label("Beneficial Owners (25%+)")
            .with_placeholder("Name, ownership percentage, nationality")
            .required(),
        FormField::new("annual_revenue", FieldType::Number).with_label("Annual Revenue"),
    ]
}

fn high_risk_fields() -> Vec<FormField> {
    vec![
        FormField::new("source_of_funds", FieldType::Textarea)
            .with_label("Source of Funds")
            .required(),
        FormField::new("pep_declaration", FieldType::Checkbox)
            .with_label("A director or owner is a politically exposed person")
            .required(),
        FormField::new("expected_volume", FieldType::Select)
            .with_label("Expected Monthly Volume")
            .with_options(["< $10k", "$10k - $100k", "$100k - $1M", "> $1M"])
            .required(),
    ]
}

/// Build the starter schema for a form template id
pub fn starter_schema(template_id: &str) -> Result<FormSchema, SchemaError> {
    let mut fields = default_onboarding_schema().into_fields();
    match template_id {
        "basic-kyc" => {}
        "corporate-kyc" => fields.extend(corporate_fields()),
        "high-risk-kyc" => {
            fields.extend(corporate_fields());
            fields.extend(high_risk_fields());
        }
        other => return Err(SchemaError::UnknownTemplate(other.to_string())),
    }
    Ok(FormSchema::from_fields(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_starter_is_valid() {
        for info in FORM_TEMPLATES {
            let schema = starter_schema(info.id).unwrap();
            assert!(schema.validate().is_empty(), "{} has findings", info.id);
        }
    }

    #[test]
    fn test_starters_extend_each_other() {
        let basic = starter_schema("basic-kyc").unwrap();
        let corporate = starter_schema("corporate-kyc").unwrap();
        let high_risk = starter_schema("high-risk-kyc").unwrap();

        assert_eq!(basic, default_onboarding_schema());
        assert_eq!(&corporate.fields()[..basic.len()], basic.fields());
        assert_eq!(&high_risk.fields()[..corporate.len()], corporate.fields());
        assert!(high_risk.field("pep_declaration").is_some());
    }

    #[test]
    fn test_unknown_template() {
        assert_eq!(
            starter_schema("retail-kyc"),
            Err(SchemaError::UnknownTemplate("retail-kyc".to_string()))
        );
    }
}
