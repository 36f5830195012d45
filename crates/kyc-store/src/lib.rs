//! Persistence seams for the KYC platform
//!
//! - [`Repository`] with an in-memory backend for every record type
//! - [`ClientDirectory`] for client search and onboarding invitations
//! - [`SessionStore`] for the signed-in user (memory or JSON file)
//! - [`AuthService`] for the demo login/signup/logout flow, audited through
//!   an [`AuditLog`]
//! - [`StoreConfig`] read from the environment

pub mod audit_log;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod repository;
pub mod session;

pub use audit_log::AuditLog;
pub use auth::AuthService;
pub use clients::{search_clients, ClientDirectory, Invitation, InvitationRequest};
pub use config::{DemoCredentials, StoreConfig};
pub use error::{AuthError, InviteError, SessionError, StoreError};
pub use repository::{InMemoryRepository, Record, Repository};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
