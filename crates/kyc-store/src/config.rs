//! Store configuration from the environment

use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Credentials accepted by the demo login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCredentials {
    pub email: String,
    pub password: String,
}

impl Default for DemoCredentials {
    fn default() -> Self {
        Self {
            email: "admin@example.com".to_string(),
            password: "password".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Where the signed-in user is persisted
    pub session_path: PathBuf,
    /// Login/logout audit chain, next to the session by default
    pub audit_path: PathBuf,
    /// Origin used in client onboarding links
    pub base_url: String,
    pub credentials: DemoCredentials,
}

impl StoreConfig {
    /// Read `KYC_SESSION_PATH`, `KYC_AUDIT_PATH`, `KYC_BASE_URL`, `KYC_DEMO_EMAIL`
    /// and `KYC_DEMO_PASSWORD`, falling back to defaults for anything unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DemoCredentials::default();
        let session_path = lookup("KYC_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_session_path);
        let audit_path = lookup("KYC_AUDIT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| session_path.with_file_name("audit.json"));

        Self {
            session_path,
            audit_path,
            base_url: lookup("KYC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            credentials: DemoCredentials {
                email: lookup("KYC_DEMO_EMAIL").unwrap_or(defaults.email),
                password: lookup("KYC_DEMO_PASSWORD").unwrap_or(defaults.password),
            },
        }
    }
}

fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kyc-platform")
        .join("session.json")
}

/// Get platform-specific data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }
}
