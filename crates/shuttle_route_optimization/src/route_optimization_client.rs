use std::{future::Future, time::Duration};

use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::{
    credentials::ServiceAccountCredentials,
    error::SolverError,
    model::OptimizeToursRequest,
    response::OptimizeToursResponse,
    retry_policy::RetryPolicy,
    route_solver::RouteSolver,
    token::{GOOGLE_TOKEN_URL, TokenProvider},
};

pub const ROUTE_OPTIMIZATION_API_URL: &str = "https://routeoptimization.googleapis.com";

const BASE_URL_ENV_VAR: &str = "SHUTTLE_SOLVER_BASE_URL";
const TIMEOUT_ENV_VAR: &str = "SHUTTLE_SOLVER_TIMEOUT_SECS";
const MAX_ATTEMPTS_ENV_VAR: &str = "SHUTTLE_SOLVER_MAX_ATTEMPTS";
const INITIAL_DELAY_ENV_VAR: &str = "SHUTTLE_SOLVER_INITIAL_DELAY_MS";

#[derive(Debug, Clone)]
pub struct ClientParams {
    pub base_url: String,
    pub token_url: String,
    /// Bounds a whole `solve` call, retries included.
    pub timeout: Duration,
    pub retry_policy: RetryPolicy,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            base_url: ROUTE_OPTIMIZATION_API_URL.to_owned(),
            token_url: GOOGLE_TOKEN_URL.to_owned(),
            timeout: Duration::from_secs(300),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl ClientParams {
    pub fn from_env() -> Result<Self, SolverError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, SolverError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut params = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV_VAR) {
            params.base_url = base_url;
        }

        if let Some(seconds) = parse_var::<u64>(&lookup, TIMEOUT_ENV_VAR)? {
            params.timeout = Duration::from_secs(seconds);
        }

        if let Some(max_attempts) = parse_var::<u32>(&lookup, MAX_ATTEMPTS_ENV_VAR)? {
            params.retry_policy.max_attempts = max_attempts;
        }

        if let Some(millis) = parse_var::<u64>(&lookup, INITIAL_DELAY_ENV_VAR)? {
            params.retry_policy.initial_delay = Duration::from_millis(millis);
        }

        Ok(params)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, SolverError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SolverError::InvalidConfig { name, value }),
        None => Ok(None),
    }
}

#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

fn api_error(status: u16, body: &str) -> SolverError {
    match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) => SolverError::Api {
            status,
            message: match envelope.error.status {
                Some(code) => format!("{}: {}", code, envelope.error.message),
                None => envelope.error.message,
            },
            details: envelope.error.details.map(|details| details.to_string()),
        },
        Err(_) => SolverError::Api {
            status,
            message: body.to_owned(),
            details: None,
        },
    }
}

/// HTTP client for the Google Route Optimization `optimizeTours` method.
pub struct RouteOptimizationClient {
    project_id: String,
    params: ClientParams,
    token_provider: TokenProvider,
    client: reqwest::Client,
}

impl RouteOptimizationClient {
    pub fn new(
        credentials: ServiceAccountCredentials,
        params: ClientParams,
    ) -> Result<Self, SolverError> {
        let client = reqwest::Client::new();
        let token_provider = TokenProvider::new(&credentials, &params.token_url, client.clone())?;

        Ok(Self {
            project_id: credentials.project_id,
            params,
            token_provider,
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/projects/{}:optimizeTours",
            self.params.base_url.trim_end_matches('/'),
            self.project_id
        )
    }

    async fn send_once(
        &self,
        request: &OptimizeToursRequest,
    ) -> Result<OptimizeToursResponse, SolverError> {
        let token = self.token_provider.access_token().await?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<OptimizeToursResponse, SolverError> {
        if response.status().is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(api_error(status, &body))
        }
    }

    #[instrument(skip_all, level = "debug")]
    async fn solve_with_retries(
        &self,
        request: &OptimizeToursRequest,
    ) -> Result<OptimizeToursResponse, SolverError> {
        let attempts = self.params.retry_policy.run(move |attempt| async move {
            let result = self.send_once(request).await;
            if let Err(error) = &result {
                error!(
                    attempt,
                    code = ?error.status_code(),
                    details = error.details().unwrap_or(""),
                    "RouteOptimization: optimizeTours failed: {}",
                    error
                );
            }
            result
        });

        let response = with_timeout(self.params.timeout, attempts).await?;

        info!(
            "RouteOptimization: received {} routes, {} skipped shipments",
            response.routes.len(),
            response.skipped_shipments.len()
        );

        Ok(response)
    }
}

async fn with_timeout<T, F>(timeout: Duration, operation: F) -> Result<T, SolverError>
where
    F: Future<Output = Result<T, SolverError>>,
{
    tokio::time::timeout(timeout, operation)
        .await
        .map_err(|_| SolverError::Timeout(timeout))?
}

impl RouteSolver for RouteOptimizationClient {
    fn solve(
        &self,
        request: &OptimizeToursRequest,
    ) -> impl Future<Output = Result<OptimizeToursResponse, SolverError>> + Send {
        self.solve_with_retries(request)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_elapsed() {
        let timeout = Duration::from_secs(300);

        let result: Result<(), _> = with_timeout(timeout, async {
            tokio::time::sleep(Duration::from_secs(301)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(SolverError::Timeout(elapsed)) if elapsed == timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_completes() {
        let result = with_timeout(Duration::from_secs(300), async {
            tokio::time::sleep(Duration::from_secs(299)).await;
            Ok(7)
        })
        .await;

        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_keeps_inner_error() {
        let result: Result<(), _> = with_timeout(Duration::from_secs(300), async {
            Err(SolverError::Token(String::from("invalid_grant")))
        })
        .await;

        assert!(matches!(result, Err(SolverError::Token(_))));
    }

    #[test]
    fn test_params_defaults() {
        let params = ClientParams::from_lookup(|_| None).unwrap();

        assert_eq!(params.base_url, ROUTE_OPTIMIZATION_API_URL);
        assert_eq!(params.timeout, Duration::from_secs(300));
        assert_eq!(params.retry_policy, RetryPolicy::default());
    }

    #[test]
    fn test_params_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (BASE_URL_ENV_VAR, "http://localhost:9090/"),
            (TIMEOUT_ENV_VAR, "45"),
            (MAX_ATTEMPTS_ENV_VAR, "2"),
        ]);

        let params =
            ClientParams::from_lookup(|name| vars.get(name).map(|value| value.to_string()))
                .unwrap();

        assert_eq!(params.base_url, "http://localhost:9090/");
        assert_eq!(params.timeout, Duration::from_secs(45));
        assert_eq!(params.retry_policy.max_attempts, 2);
    }

    #[test]
    fn test_params_rejects_garbage() {
        let result = ClientParams::from_lookup(|name| {
            (name == TIMEOUT_ENV_VAR).then(|| String::from("soon"))
        });

        assert!(matches!(
            result,
            Err(SolverError::InvalidConfig {
                name: TIMEOUT_ENV_VAR,
                ..
            })
        ));
    }

    #[test]
    fn test_api_error_parses_google_envelope() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "Shipment 0 has no pickups",
                "status": "INVALID_ARGUMENT",
                "details": [{ "reason": "EMPTY" }]
            }
        }"#;

        match api_error(400, body) {
            SolverError::Api {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "INVALID_ARGUMENT: Shipment 0 has no pickups");
                assert_eq!(details.as_deref(), Some(r#"[{"reason":"EMPTY"}]"#));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_api_error_keeps_plain_bodies() {
        match api_error(502, "Bad Gateway") {
            SolverError::Api { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
