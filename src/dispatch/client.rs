//! HTTP client for the desktop automation server.
//!
//! Request construction is separated from I/O so the URL/body logic is
//! testable without a live server: `build_request` is pure, `dispatch` does
//! the one network call. Nothing is retried; a failed call is reported to the
//! user and that is the end of it.

use std::time::Duration;

use serde_json::{Map, Value};

use super::catalog::{lookup, Endpoint, HttpMethod};
use super::DispatchError;

/// A client for one desktop server instance.
#[derive(Debug, Clone)]
pub struct DesktopClient {
    http: reqwest::Client,
    base_url: String,
}

impl DesktopClient {
    /// Creates a client for the given base URL with a per-request timeout.
    ///
    /// Trailing slashes on the base URL are normalised away.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ClientBuild`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| DispatchError::ClientBuild { source })?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// The configured base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatches one tool call to the desktop server.
    ///
    /// Looks the tool up in the catalog, builds the request, issues it, and
    /// returns the parsed JSON body verbatim as an opaque payload.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::UnknownTool`] if the name is not in the catalog;
    ///   no request is issued
    /// - [`DispatchError::MissingPathParam`] / [`DispatchError::InvalidArguments`]
    ///   if the arguments cannot fill the endpoint path; no request is issued
    /// - [`DispatchError::Transport`] on connection or timeout failure
    /// - [`DispatchError::Status`] on a non-2xx response, carrying the status
    ///   code and raw body text
    /// - [`DispatchError::InvalidResponse`] if the body is not valid JSON
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> Result<Value, DispatchError> {
        let endpoint = lookup(name).ok_or_else(|| DispatchError::UnknownTool {
            name: name.to_string(),
        })?;

        let (url, body) = self.build_request(endpoint, arguments)?;

        tracing::debug!(tool = name, method = %endpoint.method, url = %url, "dispatching tool call");

        let request = match (endpoint.method, body) {
            (HttpMethod::Get, _) => self.http.get(&url),
            (HttpMethod::Post, None) => self.http.post(&url),
            (HttpMethod::Post, Some(body)) => self.http.post(&url).json(&body),
        };

        let response = request
            .send()
            .await
            .map_err(|source| DispatchError::Transport { source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(tool = name, status = status.as_u16(), "desktop server rejected call");
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|source| DispatchError::InvalidResponse { source })
    }

    /// Builds the concrete URL and optional JSON body for an endpoint.
    ///
    /// Path placeholders are filled from the arguments and the consumed
    /// fields are removed from the body, so `{trade_id}` arguments never
    /// appear twice. POST endpoints send the remaining object as the body
    /// when it is non-empty; GET endpoints send no body.
    fn build_request(
        &self,
        endpoint: &Endpoint,
        arguments: &Value,
    ) -> Result<(String, Option<Value>), DispatchError> {
        let mut args: Map<String, Value> = match arguments {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            _ => {
                return Err(DispatchError::InvalidArguments {
                    tool: endpoint.name.to_string(),
                })
            }
        };

        let mut path = endpoint.path.to_string();
        for placeholder in endpoint.path_placeholders() {
            let value = args
                .remove(placeholder)
                .and_then(|v| path_segment(&v))
                .ok_or_else(|| DispatchError::MissingPathParam {
                    tool: endpoint.name.to_string(),
                    param: placeholder.to_string(),
                })?;
            path = path.replace(&format!("{{{placeholder}}}"), &value);
        }

        let url = format!("{}{path}", self.base_url);

        let body = match endpoint.method {
            HttpMethod::Get => None,
            HttpMethod::Post if args.is_empty() => None,
            HttpMethod::Post => Some(Value::Object(args)),
        };

        Ok((url, body))
    }
}

/// Renders an argument value as a URL path segment.
///
/// Strings and numbers only; anything else does not belong in a path.
fn path_segment(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
