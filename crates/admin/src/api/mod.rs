//! Typed HTTP client for the Neurolab backend API.
//!
//! All admin endpoints sit under the backend's `/api` prefix and expect an
//! opaque bearer token; `POST /login` is the one unauthenticated call this
//! client performs. Responses are normalized here: list envelopes flatten to
//! plain vectors and error bodies collapse to a single message, so callers
//! never see the backend's per-endpoint irregularities.
//!
//! The client fails closed: network errors, parse errors and HTTP error
//! statuses all surface as [`ApiError`], with a generic message when the
//! server does not provide one.

mod types;

use std::sync::Arc;
use std::time::Duration;

use neurolab_core::{Contact, Email, PartnerRequest, RequestId, TriageDecision, WhitelistEntry};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use crate::config::Config;
use types::{
    AddEmailBody, ContactsEnvelope, ErrorBody, LoginBody, LoginResponse,
    PartnerRequestsEnvelope, StatusBody, WhitelistAddEnvelope, WhitelistEnvelope,
};

/// Per-request timeout, matching the backend client contract.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fallback error text when the server sends no usable message.
const GENERIC_ERROR: &str = "Request failed";

/// Errors that can occur when talking to the Neurolab backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request with an error status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic fallback.
        message: String,
    },

    /// The bearer token was missing, invalid or expired (HTTP 401).
    ///
    /// Fatal to the session: the caller must clear the stored token and
    /// require a fresh login before any further authorized call.
    #[error("unauthorized: session expired or invalid")]
    Unauthorized,

    /// A 2xx response carried a body this client could not decode.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether this error invalidates the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Neurolab backend API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client for the backend at `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            self.inner.base_url.as_str().trim_end_matches('/')
        )
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Obtain a bearer token for an admin account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for rejected credentials, or any
    /// transport/status error otherwise.
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<SecretString, ApiError> {
        let body = LoginBody {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        let response = self
            .inner
            .client
            .post(self.url("/login"))
            .json(&body)
            .send()
            .await?;

        let login: LoginResponse = handle_response(response).await?;
        Ok(SecretString::from(login.token))
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// List all partner requests.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport, status or decode failure.
    pub async fn list_partner_requests(
        &self,
        token: &SecretString,
    ) -> Result<Vec<PartnerRequest>, ApiError> {
        let envelope: PartnerRequestsEnvelope = self.get("/partner-requests", token).await?;
        Ok(envelope.into_items())
    }

    /// List all contact messages.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport, status or decode failure.
    pub async fn list_contacts(&self, token: &SecretString) -> Result<Vec<Contact>, ApiError> {
        let envelope: ContactsEnvelope = self.get("/contacts", token).await?;
        Ok(envelope.into_items())
    }

    /// List all whitelist entries.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport, status or decode failure.
    pub async fn list_whitelist(
        &self,
        token: &SecretString,
    ) -> Result<Vec<WhitelistEntry>, ApiError> {
        let envelope: WhitelistEnvelope = self.get("/whitelist", token).await?;
        Ok(envelope.into_items())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Set a partner request's status to the decision's target.
    ///
    /// The response body is ignored; a 2xx status is the confirmation the
    /// caller applies its local update on.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport or status failure.
    pub async fn update_request_status(
        &self,
        token: &SecretString,
        id: &RequestId,
        decision: TriageDecision,
    ) -> Result<(), ApiError> {
        let body = StatusBody {
            status: decision.target(),
        };
        let response = self
            .inner
            .client
            .patch(self.url(&format!("/partner-requests/{id}/status")))
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await?;

        expect_success(response).await
    }

    /// Add an email address to the registration whitelist.
    ///
    /// Returns the entry the backend created, for prepending to the cached
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport, status or decode failure
    /// (including the backend's duplicate-email rejection).
    pub async fn add_whitelist_entry(
        &self,
        token: &SecretString,
        email: &Email,
    ) -> Result<WhitelistEntry, ApiError> {
        let body = AddEmailBody {
            email: email.as_str(),
        };
        let response = self
            .inner
            .client
            .post(self.url("/whitelist"))
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let envelope: WhitelistAddEnvelope = handle_response(response).await?;
        Ok(envelope.into_entry())
    }

    /// Remove an email address from the registration whitelist.
    ///
    /// Any 2xx response (including 204 No Content) counts as confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport or status failure.
    pub async fn remove_whitelist_entry(
        &self,
        token: &SecretString,
        email: &Email,
    ) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .delete(self.url(&format!("/whitelist/{}", email.as_str())))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        expect_success(response).await
    }

    /// Execute an authorized GET and decode the JSON body.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &SecretString,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        handle_response(response).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Decode a JSON body from a successful response, or map the failure.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    if response.status().is_success() {
        return response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("failed to decode response: {e}")));
    }

    Err(parse_error(response).await)
}

/// Check for a successful status, ignoring the body.
async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        return Ok(());
    }

    Err(parse_error(response).await)
}

/// Map an error response to [`ApiError`].
async fn parse_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();

    if status == 401 {
        return ApiError::Unauthorized;
    }

    // The backend attaches `{message}` on some routes and `{error}` on
    // others; fall back to a generic message when neither is present.
    let message = match response.text().await {
        Ok(text) => serde_json::from_str::<ErrorBody>(&text)
            .unwrap_or_default()
            .into_message()
            .unwrap_or_else(|| GENERIC_ERROR.to_owned()),
        Err(_) => GENERIC_ERROR.to_owned(),
    };

    ApiError::Api { status, message }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_client(base: &str) -> ApiClient {
        let config = Config {
            api_url: Url::parse(base).unwrap(),
            token_file: std::path::PathBuf::from("/tmp/ignored"),
            sentry_dsn: None,
            sentry_environment: None,
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_join_handles_trailing_slash() {
        let client = test_client("http://127.0.0.1:9/api/");
        assert_eq!(
            client.url("/partner-requests"),
            "http://127.0.0.1:9/api/partner-requests"
        );

        let client = test_client("http://127.0.0.1:9/api");
        assert_eq!(client.url("/whitelist"), "http://127.0.0.1:9/api/whitelist");
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(
            !ApiError::Api {
                status: 500,
                message: "boom".to_owned()
            }
            .is_unauthorized()
        );
    }
}
