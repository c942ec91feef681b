//! API client for communicating with the PixStop REST API.
//!
//! This module provides the `ApiClient` struct for the authentication and
//! profile endpoints. The client is stateless per call: the bearer token is
//! an explicit argument rather than something read from storage, so the
//! repository stays the single owner of session state.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::models::{Credential, User};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Login endpoint, relative to the configured base URL.
const LOGIN_PATH: &str = "auth/login";

/// Logout endpoint (bearer auth, empty body).
const LOGOUT_PATH: &str = "auth/logout";

/// Profile endpoint for the authenticated account.
const PROFILE_PATH: &str = "me";

// ============================================================================
// Wire types
// ============================================================================

/// Standard response envelope used by every backend endpoint.
///
/// Unknown fields are ignored; `error` and `message` are both optional and
/// the first available message wins.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<ErrorBody>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Login request body. `user` is the backend's field name for the account
/// identifier (an email address in practice).
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    user: &'a str,
    password: &'a str,
}

/// Payload of a successful login: a Sanctum-style opaque bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    user: User,
}

// ============================================================================
// Client
// ============================================================================

/// API client for the PixStop backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client with the config's timeouts and a JSON `Accept` header
    /// applied to every request.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credential: &Credential) -> Result<LoginData, ApiError> {
        let body = LoginRequest {
            user: &credential.identifier,
            password: &credential.secret,
        };

        let response = self
            .http
            .post(self.config.endpoint(LOGIN_PATH))
            .json(&body)
            .send()
            .await?;

        Self::unwrap_envelope(response).await
    }

    /// Fetch the profile of the account the token belongs to.
    pub async fn fetch_profile(&self, token: Option<&str>) -> Result<User, ApiError> {
        let request = self.http.get(self.config.endpoint(PROFILE_PATH));
        let response = Self::with_bearer(request, token).send().await?;

        let profile: ProfileData = Self::unwrap_envelope(response).await?;
        Ok(profile.user)
    }

    /// Invalidate the token server-side. The response body carries nothing
    /// the caller needs, so only the status is checked.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        let request = self.http.post(self.config.endpoint(LOGOUT_PATH));
        let response = Self::with_bearer(request, token).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(
                status.as_u16(),
                Self::envelope_message(&body),
            ))
        }
    }

    fn with_bearer(
        request: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check the status and unwrap the response envelope, mapping every
    /// failure shape onto `ApiError`.
    async fn unwrap_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "API request failed");
            return Err(ApiError::from_status(
                status.as_u16(),
                Self::envelope_message(&body),
            ));
        }

        let body = response.text().await?;
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        let Envelope {
            success,
            data,
            error,
            message,
        } = envelope;
        let message = error.and_then(|e| e.message).or(message);

        if !success {
            return Err(ApiError::Rejected { message });
        }
        data.ok_or(ApiError::Rejected { message })
    }

    /// Best-effort extraction of the envelope message from an error body.
    fn envelope_message(body: &str) -> Option<String> {
        serde_json::from_str::<Envelope<serde_json::Value>>(body)
            .ok()
            .and_then(|e| e.error.and_then(|b| b.message).or(e.message))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(url: &str) -> ApiClient {
        ApiClient::new(ApiConfig::new(url)).expect("client should build")
    }

    /// A local URL nothing listens on, for transport-failure cases.
    fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}", port)
    }

    #[tokio::test]
    async fn login_returns_token_on_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(serde_json::json!({
                "user": "a@b.com",
                "password": "x"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"data":{"token":"T1","type":"Bearer"}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let login = client
            .login(&Credential::new("a@b.com", "x"))
            .await
            .expect("login should succeed");

        assert_eq!(login.token, "T1");
        assert_eq!(login.token_type.as_deref(), Some("Bearer"));
    }

    #[tokio::test]
    async fn login_maps_401_to_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"success":false,"error":{"message":"Unauthenticated."}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .login(&Credential::new("a@b.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn login_surfaces_envelope_rejection_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(r#"{"success":false,"error":{"message":"account disabled"}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .login(&Credential::new("a@b.com", "x"))
            .await
            .unwrap_err();

        match err {
            ApiError::Rejected { message } => {
                assert_eq!(message.as_deref(), Some("account disabled"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_profile_attaches_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/me")
            .match_header("authorization", "Bearer T1")
            .with_status(200)
            .with_body(
                r#"{"success":true,"data":{"user":{"id":1,"name":"Ann","email":"a@b.com"}}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let user = client
            .fetch_profile(Some("T1"))
            .await
            .expect("profile fetch should succeed");

        assert_eq!(user.name, "Ann");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_profile_ignores_unknown_envelope_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/me")
            .with_status(200)
            .with_body(
                r#"{"success":true,"data":{"user":{"id":1,"name":"Ann","email":"a@b.com","plan":"pro"}},"meta":{"page":1}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let user = client.fetch_profile(Some("T1")).await.unwrap();
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn server_error_carries_status_and_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/me")
            .with_status(503)
            .with_body(r#"{"success":false,"error":{"message":"maintenance"}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.fetch_profile(Some("T1")).await.unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message.as_deref(), Some("maintenance"));
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_envelope_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/me")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.fetch_profile(Some("T1")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn logout_ignores_response_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/logout")
            .match_header("authorization", "Bearer T1")
            .with_status(200)
            .with_body(r#"{"success":true,"data":null}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        client
            .logout(Some("T1"))
            .await
            .expect("logout should succeed");
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let client = client_for(&unreachable_url());
        let err = client.fetch_profile(Some("T1")).await.unwrap_err();
        assert!(err.is_transport());
    }
}
