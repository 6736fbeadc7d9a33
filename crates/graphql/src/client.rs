//! Generic GraphQL-over-HTTP client.
//!
//! The client owns the transport (a [`reqwest::Client`]), the endpoint and
//! any extra headers. What to ask for is supplied per call as a
//! [`GraphqlRequest`], so one client type serves every query.

use std::time::Duration;

use planetsync_core::sync::FetchError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Message used when an upstream error object has no `message` field.
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// A GraphQL operation: query text plus variables.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: serde_json::Value,
}

impl GraphqlRequest {
    /// A request with no variables (sent as `{}`).
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: serde_json::json!({}),
        }
    }

    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = variables;
        self
    }
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorEntry>>,
}

/// One entry of the `errors` array. Only the message is surfaced.
#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: Option<String>,
}

impl<T> GraphqlResponse<T> {
    /// Resolve the envelope: any reported error wins over data.
    fn into_result(self) -> Result<T, FetchError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let messages = errors
                .into_iter()
                .map(|e| e.message.unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()))
                .collect();
            return Err(FetchError::Protocol(messages));
        }

        self.data
            .ok_or_else(|| FetchError::Protocol(vec!["response contained no data".to_string()]))
    }
}

/// HTTP client for a single GraphQL endpoint.
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: String,
    headers: HeaderMap,
}

impl GraphqlClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            client,
            endpoint: endpoint.into(),
            headers,
        }
    }

    /// Add a header sent with every request (e.g. authorization).
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Execute `request` and decode its `data` object into `T`.
    ///
    /// Connection failures, timeouts and non-2xx statuses are
    /// [`FetchError::Transport`]; upstream `errors` and undecodable bodies
    /// are [`FetchError::Protocol`].
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &GraphqlRequest,
    ) -> Result<T, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %self.endpoint, error = %e, "GraphQL request failed");
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(endpoint = %self.endpoint, %status, "GraphQL endpoint returned an error status");
            return Err(FetchError::Transport(format!(
                "GraphQL endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let envelope: GraphqlResponse<T> = response.json().await.map_err(|e| {
            tracing::error!(endpoint = %self.endpoint, error = %e, "GraphQL response could not be decoded");
            FetchError::Protocol(vec![format!("invalid response payload: {e}")])
        })?;

        envelope.into_result().inspect_err(|e| {
            tracing::error!(endpoint = %self.endpoint, error = %e, "GraphQL response error");
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
