//! HTTP client for the metro booking backend. All network I/O for the
//! client goes through here; callers get typed payloads plus an explicit
//! authorization-expired signal instead of a hidden redirect.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{
    AuthRequest, AuthResponse, BookingRequest, BookingResponse, StopRecord,
};

/// Endpoints that never send a bearer token and never expire a session.
const PUBLIC_ROUTES: &[&str] = &["/auth/login", "/auth/register"];

/// Maximum number of response-body bytes included in parse-failure logs.
const LOG_BODY_LIMIT: usize = 500;

/// Truncate a body for logging without splitting a multi-byte character.
fn truncate_for_log(body: &str) -> &str {
    if body.len() <= LOG_BODY_LIMIT {
        return body;
    }
    let mut end = LOG_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("API error: {0}")]
    ApiError(String),
}

/// Result of an authenticated call. `AuthExpired` is returned on HTTP
/// 401/403 so the caller owns the clear-session-and-navigate policy.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Ok(T),
    AuthExpired,
}

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| BackendError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn is_public_route(endpoint: &str) -> bool {
        PUBLIC_ROUTES.contains(&endpoint)
    }

    async fn execute<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<ApiOutcome<T>, BackendError> {
        let start = Instant::now();
        let request_id = Uuid::new_v4();
        let public = Self::is_public_route(endpoint);
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = token {
            if !public {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(
                    %request_id,
                    endpoint,
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Backend request failed"
                );
                return Err(BackendError::NetworkError(e.to_string()));
            }
        };

        let status = response.status().as_u16();

        if !public && (status == 401 || status == 403) {
            tracing::warn!(%request_id, endpoint, status, "Authorization rejected by backend");
            return Ok(ApiOutcome::AuthExpired);
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        match serde_json::from_str::<T>(&body_text) {
            Ok(parsed) => {
                tracing::debug!(
                    %request_id,
                    method = %method,
                    endpoint,
                    status,
                    duration_ms = start.elapsed().as_millis() as u64,
                    response_size = body_text.len(),
                    "Backend request completed"
                );
                Ok(ApiOutcome::Ok(parsed))
            }
            Err(e) => {
                tracing::warn!(
                    %request_id,
                    endpoint,
                    status,
                    error = %e,
                    body = truncate_for_log(&body_text),
                    "Failed to parse backend response"
                );
                Err(BackendError::ParseError(e.to_string()))
            }
        }
    }

    async fn execute_public<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, BackendError> {
        match self.execute(method, endpoint, None, body).await? {
            ApiOutcome::Ok(parsed) => Ok(parsed),
            ApiOutcome::AuthExpired => Err(BackendError::ApiError(format!(
                "Unexpected authorization rejection on public route {}",
                endpoint
            ))),
        }
    }

    pub async fn login(&self, request: &AuthRequest) -> Result<AuthResponse, BackendError> {
        self.execute_public(Method::POST, "/auth/login", Some(request))
            .await
    }

    pub async fn register(&self, request: &AuthRequest) -> Result<AuthResponse, BackendError> {
        self.execute_public(Method::POST, "/auth/register", Some(request))
            .await
    }

    /// Fetch the bookable stops for the dropdowns.
    pub async fn stops(&self, token: &str) -> Result<ApiOutcome<Vec<StopRecord>>, BackendError> {
        self.execute::<(), _>(Method::GET, "/stops", Some(token), None)
            .await
    }

    /// Submit a booking request and get back the computed itinerary.
    pub async fn create_booking(
        &self,
        token: &str,
        request: &BookingRequest,
    ) -> Result<ApiOutcome<BookingResponse>, BackendError> {
        self.execute(Method::POST, "/bookings", Some(token), Some(request))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_route_classification() {
        assert!(BackendClient::is_public_route("/auth/login"));
        assert!(BackendClient::is_public_route("/auth/register"));
        assert!(!BackendClient::is_public_route("/stops"));
        assert!(!BackendClient::is_public_route("/bookings"));
        assert!(!BackendClient::is_public_route("/auth/login/other"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = Config {
            api_base_url: "http://localhost:8080/api/".to_string(),
            ..Config::default()
        };
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn error_display() {
        assert_eq!(
            BackendError::NetworkError("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            BackendError::ParseError("expected value".into()).to_string(),
            "Parse error: expected value"
        );
    }

    #[test]
    fn log_truncation_respects_char_boundaries() {
        // Short bodies pass through untouched
        assert_eq!(truncate_for_log("plain"), "plain");

        // ASCII bodies cut exactly at the limit
        let ascii = "y".repeat(600);
        assert_eq!(truncate_for_log(&ascii).len(), 500);

        // A multi-byte character straddling the limit is dropped whole
        let straddling = format!("{}é", "x".repeat(499));
        let truncated = truncate_for_log(&straddling);
        assert_eq!(truncated.len(), 499);
        assert!(truncated.chars().all(|c| c == 'x'));

        // All-multi-byte bodies still land on a boundary
        let multibyte = "é".repeat(300);
        let truncated = truncate_for_log(&multibyte);
        assert_eq!(truncated.len(), 500);
        assert!(truncated.chars().all(|c| c == 'é'));
    }

    #[test]
    fn outcome_equality() {
        assert_eq!(ApiOutcome::Ok(1), ApiOutcome::Ok(1));
        assert_ne!(ApiOutcome::Ok(1), ApiOutcome::AuthExpired);
    }
}
