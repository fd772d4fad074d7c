use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{credentials::ServiceAccountCredentials, error::SolverError};

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME: SignedDuration = SignedDuration::from_secs(3600);
const EXPIRY_MARGIN: SignedDuration = SignedDuration::from_secs(60);

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    access_token: String,
    expires_at: Timestamp,
}

impl CachedToken {
    fn is_fresh(&self, now: Timestamp) -> bool {
        now.checked_add(EXPIRY_MARGIN)
            .map(|deadline| deadline < self.expires_at)
            .unwrap_or(false)
    }
}

/// Exchanges a signed service account assertion for an OAuth access token
/// and caches it until shortly before it expires.
pub struct TokenProvider {
    client_email: String,
    key: EncodingKey,
    token_url: String,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        credentials: &ServiceAccountCredentials,
        token_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Result<Self, SolverError> {
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|error| SolverError::Token(format!("invalid private key: {error}")))?;

        Ok(Self {
            client_email: credentials.client_email.clone(),
            key,
            token_url: token_url.into(),
            client,
            cached: Mutex::new(None),
        })
    }

    pub async fn access_token(&self) -> Result<String, SolverError> {
        let mut cached = self.cached.lock().await;
        let now = Timestamp::now();

        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        let token = self.fetch_token(now).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }

    fn sign_assertion(&self, now: Timestamp) -> Result<String, SolverError> {
        let claims = Claims {
            iss: &self.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &self.token_url,
            iat: now.as_second(),
            exp: now.as_second() + ASSERTION_LIFETIME.as_secs(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|error| SolverError::Token(format!("failed to sign assertion: {error}")))
    }

    async fn fetch_token(&self, now: Timestamp) -> Result<CachedToken, SolverError> {
        let assertion = self.sign_assertion(now)?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SolverError::Token(format!(
                "token endpoint returned {status}: {message}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        debug!("TokenProvider: fetched access token valid for {}s", token.expires_in);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now
                .checked_add(SignedDuration::from_secs(token.expires_in))
                .unwrap_or(now),
        })
    }
}
