//! KYC domain records shared by every crate in the workspace.
//!
//! Status and risk values are closed enums serialized as the same
//! `snake_case` strings the web client sends, so JSON exported from the
//! dashboard deserializes without a translation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Implements `as_str` and `Display` for a fieldless enum using its wire names.
macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Agent,
    Compliance,
}

wire_names!(Role {
    Admin => "admin",
    Agent => "agent",
    Compliance => "compliance",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

/// Risk rating assigned to a client or a compliance item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

wire_names!(RiskLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Where a client is in the onboarding funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Invited,
    Started,
    Completed,
    Approved,
    Rejected,
}

wire_names!(ClientStatus {
    Invited => "invited",
    Started => "started",
    Completed => "completed",
    Approved => "approved",
    Rejected => "rejected",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub org_id: String,
    pub company: String,
    pub contact_name: String,
    pub email: String,
    pub risk_score: RiskLevel,
    pub status: ClientStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Board column shared by onboarding flows and their tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    ToDo,
    WaitingClient,
    Review,
    Done,
}

wire_names!(WorkStatus {
    ToDo => "to_do",
    WaitingClient => "waiting_client",
    Review => "review",
    Done => "done",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingFlow {
    pub id: String,
    pub client_id: String,
    pub status: WorkStatus,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub progress_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub flow_id: String,
    pub title: String,
    pub assignee_id: Option<String>,
    pub due_date: Option<String>,
    pub status: WorkStatus,
    pub client_visible: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationKind {
    Identity,
    Address,
    Sanctions,
}

wire_names!(VerificationKind {
    Identity => "identity",
    Address => "address",
    Sanctions => "sanctions",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationProvider {
    StripeIdentity,
    Manual,
    #[serde(rename = "opensanctions")]
    OpenSanctions,
}

wire_names!(VerificationProvider {
    StripeIdentity => "stripe_identity",
    Manual => "manual",
    OpenSanctions => "opensanctions",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed,
    RequiresReview,
}

wire_names!(VerificationStatus {
    Pending => "pending",
    Verified => "verified",
    Failed => "failed",
    RequiresReview => "requires_review",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub id: String,
    pub client_id: String,
    #[serde(rename = "type")]
    pub kind: VerificationKind,
    pub provider: VerificationProvider,
    pub status: VerificationStatus,
    #[serde(default)]
    pub doc_urls: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignStatus {
    Draft,
    Sent,
    Signed,
    Completed,
}

wire_names!(SignStatus {
    Draft => "draft",
    Sent => "sent",
    Signed => "signed",
    Completed => "completed",
});

/// A contract instance generated from a template for one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub client_id: String,
    pub template_id: String,
    pub pdf_url: Option<String>,
    pub sign_status: SignStatus,
    pub sha256: Option<String>,
    pub created_at: String,
}

/// Category of a compliance check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceKind {
    Kyc,
    Aml,
    Sanctions,
    Pep,
}

wire_names!(ComplianceKind {
    Kyc => "kyc",
    Aml => "aml",
    Sanctions => "sanctions",
    Pep => "pep",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Pending,
    InReview,
    Approved,
    Rejected,
    Expired,
}

wire_names!(ComplianceStatus {
    Pending => "pending",
    InReview => "in_review",
    Approved => "approved",
    Rejected => "rejected",
    Expired => "expired",
});

/// One row of the compliance center's review queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceItem {
    pub id: String,
    pub client: String,
    #[serde(rename = "type")]
    pub kind: ComplianceKind,
    pub status: ComplianceStatus,
    pub risk_level: RiskLevel,
    /// ISO date (`YYYY-MM-DD`)
    pub due_date: String,
    pub completed_date: Option<String>,
    pub assigned_to: String,
    pub documents: u32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Card,
    BankAccount,
    SepaDebit,
}

wire_names!(PaymentMethodKind {
    Card => "card",
    BankAccount => "bank_account",
    SepaDebit => "sepa_debit",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Active,
    Pending,
    Failed,
}

wire_names!(PaymentStatus {
    Active => "active",
    Pending => "pending",
    Failed => "failed",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub client_id: String,
    /// Reference held by the payment processor (e.g. `pm_...`)
    pub provider_ref: String,
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    pub brand: String,
    pub last4: String,
    pub status: PaymentStatus,
    pub created_at: String,
}

impl PaymentMethod {
    /// Masked number as shown in the payment list, e.g. `•••• 4242`
    pub fn masked(&self) -> String {
        format!("•••• {}", self.last4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    Email,
    Sms,
    Slack,
    Webhook,
}

wire_names!(NotificationChannel {
    Email => "email",
    Sms => "sms",
    Slack => "slack",
    Webhook => "webhook",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Pending,
    Failed,
}

wire_names!(DeliveryStatus {
    Sent => "sent",
    Pending => "pending",
    Failed => "failed",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub channel: NotificationChannel,
    pub title: String,
    pub message: String,
    pub recipient: String,
    pub status: DeliveryStatus,
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}
