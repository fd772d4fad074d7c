use std::fmt;

use crate::error::SolverError;

pub const PROJECT_ID_ENV_VAR: &str = "GOOGLE_CLOUD_PROJECT";
pub const CLIENT_EMAIL_ENV_VAR: &str = "GOOGLE_CLIENT_EMAIL";
pub const PRIVATE_KEY_ENV_VAR: &str = "GOOGLE_PRIVATE_KEY";

/// Service account used to authenticate against the optimization service.
#[derive(Clone)]
pub struct ServiceAccountCredentials {
    pub project_id: String,
    pub client_email: String,
    /// PEM encoded RSA private key.
    pub private_key: String,
}

impl ServiceAccountCredentials {
    pub fn from_env() -> Result<Self, SolverError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, SolverError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(SolverError::MissingCredential(name))
        };

        Ok(Self {
            project_id: required(PROJECT_ID_ENV_VAR)?,
            client_email: required(CLIENT_EMAIL_ENV_VAR)?,
            // keys pasted into .env files usually carry escaped newlines
            private_key: required(PRIVATE_KEY_ENV_VAR)?.replace("\\n", "\n"),
        })
    }
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
