//! HTTP client for the search GraphQL endpoint.
//!
//! Every request is a single `POST /searchapi/graphql` with a bearer token.
//! TLS certificate verification is disabled: load tests run against
//! self-signed cluster routes. Do not reuse this client elsewhere.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Url;
use serde_json::Value;

use crate::auth::BearerToken;
use crate::error::{ConfigError, TaskError, TaskResult};
use crate::graphql::GraphqlRequest;

pub const GRAPHQL_PATH: &str = "/searchapi/graphql";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Append `?op=<operationName>` so the server log groups by operation.
    pub tag_operations: bool,
    /// Log the raw response body.
    pub debug_responses: bool,
    /// Treat GraphQL-level errors in a 2xx response as failures.
    pub validate_responses: bool,
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            tag_operations: false,
            debug_responses: false,
            validate_responses: false,
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: Url,
    options: ClientOptions,
}

impl SearchClient {
    pub fn new(host: &Url, options: ClientOptions) -> Result<Self, ConfigError> {
        let endpoint = host.join(GRAPHQL_PATH).map_err(|e| ConfigError::InvalidHost {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(options.request_timeout)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            options,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL a request for `operation` is sent to.
    pub fn url_for(&self, operation: &str) -> Url {
        let mut url = self.endpoint.clone();
        if self.options.tag_operations {
            url.query_pairs_mut().append_pair("op", operation);
        }
        url
    }

    /// Send one GraphQL request and return the HTTP status on success.
    ///
    /// A sample fails on transport errors and non-2xx statuses. With
    /// `validate_responses` it also fails on GraphQL errors in the body.
    pub async fn post(
        &self,
        token: &BearerToken,
        operation: &str,
        payload: &GraphqlRequest,
    ) -> TaskResult<u16> {
        let response = self
            .http
            .post(self.url_for(operation))
            .header(AUTHORIZATION, token.header_value())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if self.options.debug_responses {
            tracing::info!(
                operation,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "Response"
            );
        }

        if !status.is_success() {
            return Err(TaskError::Status {
                status: status.as_u16(),
            });
        }

        if self.options.validate_responses {
            validate_body(&body)?;
        }

        Ok(status.as_u16())
    }
}

/// Check that a GraphQL response carries `data` and no `errors`.
pub fn validate_body(body: &[u8]) -> TaskResult<()> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| TaskError::InvalidResponse(format!("body is not JSON: {e}")))?;

    if let Some(errors) = value.get("errors").and_then(Value::as_array) {
        if let Some(first) = errors.first() {
            let message = first
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(TaskError::InvalidResponse(format!(
                "{} GraphQL error(s), first: {}",
                errors.len(),
                message
            )));
        }
    }

    match value.get("data") {
        Some(data) if !data.is_null() => Ok(()),
        _ => Err(TaskError::InvalidResponse("response has no data".to_string())),
    }
}
