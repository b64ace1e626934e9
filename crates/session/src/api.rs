//! Authentication server collaborator.
//!
//! The server is a black box: every call is request/response over a generic
//! transport and returns either a token or a structured error carrying a
//! human-readable message. Server-side authorization is enforced
//! independently; nothing here is trusted beyond what the token itself says.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the authentication collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure (DNS, refused connection, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server rejected the request ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Best-effort human-readable message for UI surfaces.
    pub fn message(&self) -> String {
        match self {
            ApiError::Transport(msg) => msg.clone(),
            ApiError::Server { message, .. } => message.clone(),
        }
    }
}

/// Registration payload forwarded verbatim to the server.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The authentication server, as seen from the client.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a signed identity token.
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// Notify the server that `token` is being abandoned.
    async fn logout(&self, token: &str) -> Result<(), ApiError>;

    /// Create an account; verification happens out-of-band.
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    /// Confirm a registration; returns a fresh identity token.
    async fn verify_token(&self, verification_token: &str) -> Result<String, ApiError>;

    /// Start a password reset for `email`.
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// Complete a password reset; returns a fresh identity token.
    async fn submit_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP implementation of [`AuthApi`] against the console API.
///
/// Timeout semantics are delegated to the underlying transport; no
/// client-level timeout is imposed here.
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Map a non-success response to [`ApiError::Server`], extracting the
    /// server's `message` field when the body carries one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_for_token(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let response = Self::check(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(token.token)
    }

    async fn post_for_unit(&self, path: &str, body: &serde_json::Value) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        self.post_for_token(
            "/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        self.post_for_unit("/auth/register", &body).await
    }

    async fn verify_token(&self, verification_token: &str) -> Result<String, ApiError> {
        self.post_for_token(
            "/auth/verify",
            &serde_json::json!({ "token": verification_token }),
        )
        .await
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.post_for_unit(
            "/auth/password-reset/request",
            &serde_json::json!({ "email": email }),
        )
        .await
    }

    async fn submit_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        self.post_for_token(
            "/auth/password-reset/submit",
            &serde_json::json!({ "token": reset_token, "password": new_password }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_prefers_server_body() {
        let err = ApiError::Server {
            status: 401,
            message: "invalid credentials".into(),
        };
        assert_eq!(err.message(), "invalid credentials");

        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = HttpAuthApi::new("https://console.example.com/");
        assert_eq!(api.url("/auth/login"), "https://console.example.com/auth/login");
    }
}
