//! KYC forms as listed in the form library

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::FormSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Active,
    Draft,
    Archived,
}

/// Behaviour toggles from the form settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    pub auto_save: bool,
    pub require_login: bool,
    pub send_confirmation: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            auto_save: true,
            require_login: false,
            send_confirmation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycForm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: FormStatus,
    #[serde(flatten)]
    pub schema: FormSchema,
    #[serde(default)]
    pub options: FormOptions,
    /// Number of submissions received
    #[serde(default)]
    pub responses: u32,
    pub created_at: String,
    pub updated_at: String,
}

fn today() -> String {
    Utc::now().date_naive().to_string()
}

impl KycForm {
    /// A new empty draft form
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = today();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            status: FormStatus::Draft,
            schema: FormSchema::new(),
            options: FormOptions::default(),
            responses: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn with_schema(mut self, schema: FormSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Copy as a fresh draft: new id, `(Copy)` suffix, no responses
    pub fn duplicate(&self) -> KycForm {
        let now = today();
        KycForm {
            id: Uuid::new_v4().to_string(),
            name: format!("{} (Copy)", self.name),
            status: FormStatus::Draft,
            responses: 0,
            created_at: now.clone(),
            updated_at: now,
            ..self.clone()
        }
    }

    /// Replace the field schema (a builder save)
    pub fn save_schema(&mut self, schema: FormSchema) {
        tracing::info!(form_id = %self.id, fields = schema.len(), "form saved");
        self.schema = schema;
        self.touch();
    }

    pub fn activate(&mut self) {
        self.status = FormStatus::Active;
        self.touch();
    }

    pub fn archive(&mut self) {
        self.status = FormStatus::Archived;
        self.touch();
    }

    pub fn is_published(&self) -> bool {
        self.status == FormStatus::Active
    }

    fn touch(&mut self) {
        self.updated_at = today();
    }
}
