//! Client directory: search and onboarding invitations

use chrono::{DateTime, Duration, Utc};
use form_schema::FORM_TEMPLATES;
use serde::{Deserialize, Serialize};
use shared_types::{Client, ClientStatus, RiskLevel};
use uuid::Uuid;

use crate::error::{InviteError, StoreError};
use crate::repository::Repository;

pub const DEFAULT_EXPIRY_DAYS: u32 = 7;
pub const MAX_EXPIRY_DAYS: u32 = 30;

/// Clients whose company, contact name or email contains `query`,
/// ignoring case. An empty query matches everyone.
pub fn search_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let needle = query.trim().to_lowercase();
    clients
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.company.to_lowercase().contains(&needle)
                || c.contact_name.to_lowercase().contains(&needle)
                || c.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// What the agency fills in to invite a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRequest {
    pub company: String,
    pub contact_name: String,
    pub email: String,
    #[serde(default = "default_risk")]
    pub risk_level: RiskLevel,
    /// Id from the form template catalogue
    #[serde(default = "default_form_template")]
    pub form_template: String,
    #[serde(default)]
    pub custom_message: Option<String>,
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,
}

fn default_risk() -> RiskLevel {
    RiskLevel::Low
}

fn default_form_template() -> String {
    "basic-kyc".to_string()
}

fn default_expiry_days() -> u32 {
    DEFAULT_EXPIRY_DAYS
}

impl InvitationRequest {
    pub fn new(
        company: impl Into<String>,
        contact_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            contact_name: contact_name.into(),
            email: email.into(),
            risk_level: default_risk(),
            form_template: default_form_template(),
            custom_message: None,
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }

    pub fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    pub fn with_form_template(mut self, id: impl Into<String>) -> Self {
        self.form_template = id.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    pub fn expires_in(mut self, days: u32) -> Self {
        self.expiry_days = days;
        self
    }

    fn check(&self) -> Result<(), InviteError> {
        if self.company.trim().is_empty() {
            return Err(InviteError::Invalid("company name is required".to_string()));
        }
        if self.contact_name.trim().is_empty() {
            return Err(InviteError::Invalid("contact name is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(InviteError::Invalid(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        if !(1..=MAX_EXPIRY_DAYS).contains(&self.expiry_days) {
            return Err(InviteError::Invalid(format!(
                "expiry must be between 1 and {} days",
                MAX_EXPIRY_DAYS
            )));
        }
        if !FORM_TEMPLATES.iter().any(|t| t.id == self.form_template) {
            return Err(InviteError::UnknownFormTemplate(self.form_template.clone()));
        }
        Ok(())
    }
}

/// A sent onboarding invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// `inv_<unique>`
    pub id: String,
    pub client_id: String,
    pub email: String,
    /// `<base_url>/client-onboarding/<id>`
    pub link: String,
    pub form_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    pub sent_at: String,
    pub expires_at: String,
}

impl Invitation {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .map(|at| at.with_timezone(&Utc) <= now)
            .unwrap_or(true)
    }
}

/// Clients of one organisation, backed by any client repository
pub struct ClientDirectory<R> {
    repo: R,
    org_id: String,
    base_url: String,
}

impl<R: Repository<Client>> ClientDirectory<R> {
    pub fn new(repo: R, org_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            repo,
            org_id: org_id.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// This organisation's clients matching `query`
    pub fn search(&self, query: &str) -> Result<Vec<Client>, StoreError> {
        let clients = self.repo.find(|c| c.org_id == self.org_id)?;
        Ok(search_clients(&clients, query).into_iter().cloned().collect())
    }

    pub fn invite(&self, request: &InvitationRequest) -> Result<(Client, Invitation), InviteError> {
        self.invite_at(request, Utc::now())
    }

    /// Create an `Invited` client and its onboarding link as of `now`
    pub fn invite_at(
        &self,
        request: &InvitationRequest,
        now: DateTime<Utc>,
    ) -> Result<(Client, Invitation), InviteError> {
        request.check()?;

        let stamp = now.to_rfc3339();
        let client = self.repo.create(Client {
            id: Uuid::new_v4().to_string(),
            org_id: self.org_id.clone(),
            company: request.company.trim().to_string(),
            contact_name: request.contact_name.trim().to_string(),
            email: request.email.trim().to_string(),
            risk_score: request.risk_level,
            status: ClientStatus::Invited,
            created_at: stamp.clone(),
            updated_at: stamp.clone(),
        })?;

        let id = format!("inv_{}", Uuid::new_v4().simple());
        let invitation = Invitation {
            link: format!("{}/client-onboarding/{}", self.base_url, id),
            id,
            client_id: client.id.clone(),
            email: client.email.clone(),
            form_template: request.form_template.clone(),
            custom_message: request.custom_message.clone(),
            sent_at: stamp,
            expires_at: (now + Duration::days(i64::from(request.expiry_days))).to_rfc3339(),
        };

        tracing::info!(
            client = %client.company,
            email = %client.email,
            invitation = %invitation.id,
            "client invited"
        );
        Ok((client, invitation))
    }
}
