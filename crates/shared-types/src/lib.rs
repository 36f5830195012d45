pub mod audit;
pub mod types;

pub use audit::{AuditAction, AuditChain, AuditError, AuditEvent};
pub use types::{
    Client, ClientStatus, ComplianceItem, ComplianceKind, ComplianceStatus, Contract,
    DeliveryStatus, Notification, NotificationChannel, OnboardingFlow, PaymentMethod,
    PaymentMethodKind, PaymentStatus, RiskLevel, Role, SignStatus, Task, User, Verification,
    VerificationKind, VerificationProvider, VerificationStatus, WorkStatus,
};
