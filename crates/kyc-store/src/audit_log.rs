//! Audit chain persisted next to the session file

use std::path::{Path, PathBuf};

use shared_types::AuditChain;

use crate::error::SessionError;

/// JSON file holding the login/logout audit chain across runs
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and verify the stored chain; a missing file yields an empty one
    pub fn load(&self) -> Result<AuditChain, SessionError> {
        if !self.path.exists() {
            return Ok(AuditChain::new("auth"));
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let chain: AuditChain = serde_json::from_str(&raw)?;
        chain.verify()?;
        Ok(chain)
    }

    pub fn save(&self, chain: &AuditChain) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(chain)?)?;
        tracing::debug!(path = %self.path.display(), events = chain.events.len(), "audit log saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::AuditAction;

    fn temp_log() -> AuditLog {
        AuditLog::new(
            std::env::temp_dir()
                .join(format!("kyc-audit-{}", uuid::Uuid::new_v4()))
                .join("audit.json"),
        )
    }

    #[test]
    fn test_missing_file_is_empty_chain() {
        let log = temp_log();
        assert!(log.load().unwrap().events.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let log = temp_log();
        let mut chain = AuditChain::new("auth");
        chain.append(AuditAction::Login, "admin@example.com", None, None);
        chain.append(AuditAction::Logout, "admin@example.com", None, None);
        log.save(&chain).unwrap();

        let loaded = log.load().unwrap();
        assert_eq!(loaded.events.len(), 2);
        assert_eq!(loaded.last_hash(), chain.last_hash());
    }

    #[test]
    fn test_edited_file_rejected() {
        let log = temp_log();
        let mut chain = AuditChain::new("auth");
        chain.append(AuditAction::Login, "admin@example.com", None, None);
        chain.append(AuditAction::Logout, "admin@example.com", None, None);
        chain.events[0].actor = "mallory@example.com".to_string();
        log.save(&chain).unwrap();

        assert!(matches!(log.load(), Err(SessionError::AuditIntegrity(_))));
    }
}
