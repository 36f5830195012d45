//! Tamper-evident audit log for compliance review events

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::types::ComplianceStatus;

/// Types of auditable events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    StatusChanged {
        from: ComplianceStatus,
        to: ComplianceStatus,
    },
    DocumentUploaded,
    ReviewStarted,
    AssignmentChanged {
        assignee: String,
    },
    FormSaved {
        fields: u32,
    },
    ContractRendered {
        template_id: String,
    },
    Login,
    Logout,
}

impl AuditAction {
    /// Short label shown in the audit log table
    pub fn label(&self) -> &'static str {
        match self {
            AuditAction::StatusChanged { .. } => "Status Changed",
            AuditAction::DocumentUploaded => "Document Uploaded",
            AuditAction::ReviewStarted => "Review Started",
            AuditAction::AssignmentChanged { .. } => "Assignment Changed",
            AuditAction::FormSaved { .. } => "Form Saved",
            AuditAction::ContractRendered { .. } => "Contract Rendered",
            AuditAction::Login => "Login",
            AuditAction::Logout => "Logout",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AuditError {
    #[error("chain broken at event {index}: expected prev {expected:?}, got {found:?}")]
    BrokenLink {
        index: usize,
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("audit chain serialization failed: {0}")]
    Serialization(String),
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: String,
    pub timestamp: String,
    pub action: AuditAction,
    pub actor: String,
    pub client: Option<String>,
    pub details: Option<String>,
    pub previous_hash: Option<String>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        actor: &str,
        client: Option<&str>,
        previous_hash: Option<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            action,
            actor: actor.to_string(),
            client: client.map(str::to_string),
            details,
            previous_hash,
        }
    }

    /// Compute the hash of this event (for chain linking).
    ///
    /// Every field is tagged and length-prefixed so text cannot shift
    /// between adjacent fields and `None` differs from `Some("")`.
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        let action = format!("{:?}", self.action);
        for field in [
            Some(self.event_id.as_str()),
            Some(self.timestamp.as_str()),
            Some(action.as_str()),
            Some(self.actor.as_str()),
            self.client.as_deref(),
            self.details.as_deref(),
            self.previous_hash.as_deref(),
        ] {
            hash_field(&mut hasher, field);
        }
        hex::encode(hasher.finalize())
    }
}

fn hash_field(hasher: &mut Sha256, field: Option<&str>) {
    match field {
        None => hasher.update([0u8]),
        Some(value) => {
            hasher.update([1u8]);
            hasher.update((value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
    }
}

/// Chain of audit events with hash linking
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AuditChain {
    pub events: Vec<AuditEvent>,
    pub org_id: String,
    pub created_at: String,
}

impl AuditChain {
    pub fn new(org_id: &str) -> Self {
        Self {
            events: Vec::new(),
            org_id: org_id.to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Get the hash of the last event (for linking)
    pub fn last_hash(&self) -> Option<String> {
        self.events.last().map(|e| e.compute_hash())
    }

    /// Append an event, automatically linking to previous hash
    pub fn append(
        &mut self,
        action: AuditAction,
        actor: &str,
        client: Option<&str>,
        details: Option<String>,
    ) -> &AuditEvent {
        let previous_hash = self.last_hash();
        let event = AuditEvent::new(action, actor, client, previous_hash, details);
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    /// Verify the integrity of the chain
    pub fn verify(&self) -> Result<(), AuditError> {
        let mut expected_prev: Option<String> = None;

        for (index, event) in self.events.iter().enumerate() {
            if event.previous_hash != expected_prev {
                return Err(AuditError::BrokenLink {
                    index,
                    expected: expected_prev,
                    found: event.previous_hash.clone(),
                });
            }
            expected_prev = Some(event.compute_hash());
        }

        Ok(())
    }

    /// Events that concern one client, oldest first
    pub fn for_client<'a>(&'a self, client: &'a str) -> impl Iterator<Item = &'a AuditEvent> + 'a {
        self.events
            .iter()
            .filter(move |e| e.client.as_deref() == Some(client))
    }

    pub fn to_json(&self) -> Result<String, AuditError> {
        serde_json::to_string_pretty(self).map_err(|e| AuditError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, AuditError> {
        serde_json::from_str(json).map_err(|e| AuditError::Serialization(e.to_string()))
    }

    /// Generate a summary for display
    pub fn summary(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| {
                format!(
                    "[{}] {} - {}{}",
                    e.timestamp.split('T').next().unwrap_or(&e.timestamp),
                    e.actor,
                    e.action.label(),
                    e.client
                        .as_deref()
                        .map(|c| format!(" ({})", c))
                        .unwrap_or_default()
                )
            })
            .collect()
    }
}
