//! Demo authentication backed by an injected session store

use chrono::Utc;
use shared_types::{AuditAction, AuditChain, Role, User};
use uuid::Uuid;

use crate::config::DemoCredentials;
use crate::error::AuthError;
use crate::session::SessionStore;

/// Login/signup/logout flow for the dashboard.
///
/// Call `init` once at startup to restore a persisted session; `logout`
/// tears it down again.
pub struct AuthService<S> {
    store: S,
    credentials: DemoCredentials,
    user: Option<User>,
    audit: AuditChain,
}

impl<S: SessionStore> AuthService<S> {
    pub fn new(store: S, credentials: DemoCredentials) -> Self {
        Self {
            store,
            credentials,
            user: None,
            audit: AuditChain::new("auth"),
        }
    }

    /// Continue an existing audit chain instead of starting a fresh one
    pub fn with_audit(mut self, audit: AuditChain) -> Self {
        self.audit = audit;
        self
    }

    /// Restore the persisted session, if any.
    ///
    /// A corrupt session is discarded rather than treated as fatal.
    pub fn init(&mut self) -> Result<Option<&User>, AuthError> {
        self.user = match self.store.load() {
            Ok(user) => user,
            Err(crate::error::SessionError::Corrupt(e)) => {
                tracing::warn!(error = %e, "discarding corrupt session");
                self.store.clear()?;
                None
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(ref user) = self.user {
            tracing::info!(email = %user.email, "session restored");
        }
        Ok(self.user.as_ref())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        if email != self.credentials.email || password != self.credentials.password {
            tracing::warn!(email, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            id: "1".to_string(),
            org_id: "org_1".to_string(),
            name: "Admin User".to_string(),
            email: email.to_string(),
            role: Role::Admin,
            created_at: Utc::now().to_rfc3339(),
        };
        self.start_session(user)
    }

    /// Register a new admin in a fresh organisation and sign them in
    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<&User, AuthError> {
        if name.trim().is_empty() {
            return Err(AuthError::InvalidSignup("name is required".to_string()));
        }
        if !email.contains('@') {
            return Err(AuthError::InvalidSignup(format!(
                "'{}' is not an email address",
                email
            )));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidSignup("password is required".to_string()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            org_id: format!("org_{}", Uuid::new_v4().simple()),
            name: name.trim().to_string(),
            email: email.to_string(),
            role: Role::Admin,
            created_at: Utc::now().to_rfc3339(),
        };
        self.start_session(user)
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        let user = self.user.take().ok_or(AuthError::NotLoggedIn)?;
        self.store.clear()?;
        self.audit.append(AuditAction::Logout, &user.email, None, None);
        tracing::info!(email = %user.email, "logged out");
        Ok(())
    }

    /// Login and logout events recorded by this service
    pub fn audit(&self) -> &AuditChain {
        &self.audit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn start_session(&mut self, user: User) -> Result<&User, AuthError> {
        self.store.save(&user)?;
        self.audit.append(AuditAction::Login, &user.email, None, None);
        tracing::info!(email = %user.email, role = %user.role, "logged in");
        Ok(self.user.insert(user))
    }
}
