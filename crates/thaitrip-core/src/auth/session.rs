use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::AdminCredentials;

/// Session file name in cache directory
const SESSION_FILE: &str = "admin_session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("נא להזין שם משתמש וסיסמה")]
    MissingField,

    #[error("שם משתמש או סיסמה שגויים")]
    InvalidCredentials,
}

/// Persisted sign-in marker. Never expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}

pub struct AdminSession {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl AdminSession {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load the sign-in marker from disk. Returns whether one was found.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read session file")?;
            let data: SessionData = serde_json::from_str(&contents)
                .context("Failed to parse session file")?;
            self.data = Some(data);
            return Ok(true);
        }
        Ok(false)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn state(&self) -> AuthState {
        if self.data.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.username.as_str())
    }

    /// Sign in when both fields match the configured credentials.
    ///
    /// A failure to persist the marker is logged; the in-memory state still
    /// switches to authenticated.
    pub fn login(
        &mut self,
        credentials: &AdminCredentials,
        username: &str,
        password: &str,
    ) -> Result<(), LoginError> {
        if username.is_empty() || password.is_empty() {
            return Err(LoginError::MissingField);
        }
        if !credentials.matches(username, password) {
            warn!("Admin login rejected");
            return Err(LoginError::InvalidCredentials);
        }

        self.data = Some(SessionData {
            username: username.to_string(),
            signed_in_at: Utc::now(),
        });
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to persist admin session");
        }
        info!(username, "Admin signed in");
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.clear() {
            warn!(error = %e, "Failed to remove admin session file");
        }
        info!("Admin signed out");
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let creds = AdminCredentials::default();

        let mut session = AdminSession::new(dir.path().to_path_buf());
        assert_eq!(session.state(), AuthState::Unauthenticated);
        session.login(&creds, "admin", "admin123").unwrap();
        assert!(session.is_authenticated());

        let mut restored = AdminSession::new(dir.path().to_path_buf());
        assert!(restored.load().unwrap());
        assert_eq!(restored.username(), Some("admin"));
    }

    #[test]
    fn test_login_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let creds = AdminCredentials::default();
        let mut session = AdminSession::new(dir.path().to_path_buf());

        assert_eq!(session.login(&creds, "", "admin123"), Err(LoginError::MissingField));
        assert_eq!(
            session.login(&creds, "admin", "wrong"),
            Err(LoginError::InvalidCredentials)
        );
        assert!(!session.is_authenticated());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[test]
    fn test_logout_clears_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AdminSession::new(dir.path().to_path_buf());
        session
            .login(&AdminCredentials::default(), "admin", "admin123")
            .unwrap();

        session.logout();
        assert!(!session.is_authenticated());

        let mut restored = AdminSession::new(dir.path().to_path_buf());
        assert!(!restored.load().unwrap());
    }
}
