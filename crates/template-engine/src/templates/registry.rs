//! Template registry and metadata

use serde::{Deserialize, Serialize};

use super::embedded;
use crate::errors::{Result, TemplateError};
use crate::render::{render, unbound_variables, Bindings};
use crate::variables::unique_variables;

/// What a template is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Contract body rendered in the contract editor
    Contract,
    /// Message body (and subject) sent from the notification center
    Notification,
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateKind::Contract => write!(f, "contract"),
            TemplateKind::Notification => write!(f, "notification"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    Draft,
    Active,
    Archived,
}

/// A template with its full body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: TemplateKind,
    /// Subject line, notifications only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub status: TemplateStatus,
    pub created_at: String,
}

/// Output of rendering a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTemplate {
    pub subject: Option<String>,
    pub body: String,
    /// Variables left as literal placeholders
    pub unbound: Vec<String>,
}

impl Template {
    /// Distinct variables across subject and body, subject first
    pub fn variables(&self) -> Vec<String> {
        let mut names = self
            .subject
            .as_deref()
            .map(unique_variables)
            .unwrap_or_default();
        for name in unique_variables(&self.content) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn render(&self, bindings: &Bindings) -> RenderedTemplate {
        let mut unbound = self
            .subject
            .as_deref()
            .map(|s| unbound_variables(s, bindings))
            .unwrap_or_default();
        for name in unbound_variables(&self.content, bindings) {
            if !unbound.contains(&name) {
                unbound.push(name);
            }
        }

        RenderedTemplate {
            subject: self.subject.as_deref().map(|s| render(s, bindings)),
            body: render(&self.content, bindings),
            unbound,
        }
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind,
            status: self.status,
            variables: self.variables(),
            created_at: self.created_at.clone(),
        }
    }
}

/// Information about an available template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: TemplateKind,
    pub status: TemplateStatus,
    /// Derived from the body, never maintained by hand
    pub variables: Vec<String>,
    pub created_at: String,
}

struct BuiltinTemplate {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    kind: TemplateKind,
    subject: Option<&'static str>,
    created_at: &'static str,
}

const BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        id: "service_agreement",
        name: "Service Agreement Template",
        description: "Standard service agreement for consulting work",
        kind: TemplateKind::Contract,
        subject: None,
        created_at: "2024-01-15T10:00:00Z",
    },
    BuiltinTemplate {
        id: "nda",
        name: "NDA Template",
        description: "Non-disclosure agreement for sensitive projects",
        kind: TemplateKind::Contract,
        subject: None,
        created_at: "2024-01-18T14:30:00Z",
    },
    BuiltinTemplate {
        id: "client_welcome",
        name: "Client Welcome Email",
        description: "Sent when a client is invited to onboarding",
        kind: TemplateKind::Notification,
        subject: Some("Welcome to {{company_name}} - Let's Get Started!"),
        created_at: "2024-01-10T09:00:00Z",
    },
    BuiltinTemplate {
        id: "kyc_reminder",
        name: "KYC Reminder",
        description: "Nudges clients with outstanding identity verification",
        kind: TemplateKind::Notification,
        subject: Some("Action Required: Complete Your Identity Verification"),
        created_at: "2024-01-10T09:00:00Z",
    },
];

fn load(builtin: &BuiltinTemplate) -> Option<Template> {
    let content = embedded::get_embedded_template(builtin.id)?;
    Some(Template {
        id: builtin.id.to_string(),
        name: builtin.name.to_string(),
        description: builtin.description.to_string(),
        kind: builtin.kind,
        subject: builtin.subject.map(str::to_string),
        content: content.to_string(),
        status: TemplateStatus::Active,
        created_at: builtin.created_at.to_string(),
    })
}

/// List all available templates
pub fn list_templates() -> Vec<TemplateInfo> {
    BUILTIN_TEMPLATES
        .iter()
        .filter_map(load)
        .map(|t| t.info())
        .collect()
}

/// Look up a template by id
pub fn get_template(id: &str) -> Result<Template> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|b| b.id == id)
        .and_then(load)
        .ok_or_else(|| {
            tracing::warn!(template = id, "template not found");
            TemplateError::NotFound(id.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::bindings_from_pairs;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_templates() {
        let templates = list_templates();
        let ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["service_agreement", "nda", "client_welcome", "kyc_reminder"]);
    }

    #[test]
    fn test_placeholder_does_not_span_subject_and_body() {
        let template = Template {
            id: "split".to_string(),
            name: "Split".to_string(),
            description: String::new(),
            kind: TemplateKind::Notification,
            subject: Some("Hi {{a".to_string()),
            content: "b}} there {{name}}".to_string(),
            status: TemplateStatus::Draft,
            created_at: "2024-01-10T09:00:00Z".to_string(),
        };
        assert_eq!(template.variables(), vec!["name"]);
        assert_eq!(template.render(&Bindings::new()).unbound, vec!["name"]);
    }

    #[test]
    fn test_service_agreement_variables() {
        let template = get_template("service_agreement").unwrap();
        assert_eq!(template.kind, TemplateKind::Contract);
        assert_eq!(
            template.variables(),
            vec![
                "contract_date",
                "client_company",
                "service_provider",
                "scope_of_work",
                "contract_value",
                "payment_schedule",
                "late_fee_percentage",
                "deliverables",
                "start_date",
                "end_date",
                "ip_terms",
                "termination_notice",
                "client_name",
                "client_title",
                "provider_name",
                "provider_title",
            ]
        );
    }

    #[test]
    fn test_nda_variables() {
        let info = get_template("nda").unwrap().info();
        assert_eq!(
            info.variables,
            vec![
                "contract_date",
                "party_1",
                "party_2",
                "confidential_info_definition",
                "permitted_purpose",
                "duration_years",
                "party_1_signature",
                "party_2_signature",
            ]
        );
    }

    #[test]
    fn test_notification_subject_is_rendered() {
        let template = get_template("client_welcome").unwrap();
        assert_eq!(template.variables()[0], "company_name");

        let bindings = bindings_from_pairs([
            ("company_name", "Northwind"),
            ("client_name", "John Smith"),
        ]);
        let rendered = template.render(&bindings);

        assert_eq!(
            rendered.subject.as_deref(),
            Some("Welcome to Northwind - Let's Get Started!")
        );
        assert!(rendered.body.starts_with("Hi John Smith,"));
        assert_eq!(rendered.unbound, vec!["onboarding_link", "support_email"]);
    }

    #[test]
    fn test_repeated_variable_rendered_everywhere() {
        let template = get_template("kyc_reminder").unwrap();
        let bindings = bindings_from_pairs([
            ("client_name", "Emily"),
            ("verification_link", "https://verify.example.com/abc"),
            ("company_name", "Northwind"),
        ]);
        let rendered = template.render(&bindings);

        assert!(rendered.unbound.is_empty());
        assert_eq!(
            rendered.body.matches("https://verify.example.com/abc").count(),
            2
        );
    }

    #[test]
    fn test_unknown_template() {
        match get_template("lease") {
            Err(TemplateError::NotFound(id)) => assert_eq!(id, "lease"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
