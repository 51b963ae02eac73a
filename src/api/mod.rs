//! Client for the coaching service REST API.
//!
//! Every endpoint goes through [`CoachApi::request`]: one place that builds the URL, attaches the
//! bearer token, sends JSON, and turns non-2xx responses into [`ApiError::Http`] carrying the
//! server's `detail` message. The per-resource files only know paths and payload types.

mod games;
mod players;
mod reports;
mod teams;

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, warn};
use ureq::Agent;

use crate::config::{AuthPolicy, Settings};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Error body shape used by the service: `{"detail": "..."}`.
/// Request validation failures carry a list of `{loc, msg}` objects instead of a string.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct CoachApi {
    base_url: String,
    auth: AuthPolicy,
    agent: Agent,
}

impl fmt::Debug for CoachApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoachApi")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .finish()
    }
}

impl CoachApi {
    pub fn new(settings: &Settings) -> Self {
        // Status codes are handled here so error bodies can be read.
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();
        Self { base_url: settings.api_base_url.clone(), auth: settings.auth.clone(), agent }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one request and decode the response.
    ///
    /// Returns `Ok(None)` for 204 or an empty 2xx body.
    pub fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>, ApiError> {
        let url = self.url(path);
        let authorization = format!("Bearer {}", self.auth.bearer_token());

        let response_result = {
            let _span = info_span!("coach_api", method = method.as_str(), url = %url).entered();
            match (method, body) {
                (Method::Get, _) => self.agent.get(&url).header("Authorization", &authorization).call(),
                (Method::Delete, _) => self.agent.delete(&url).header("Authorization", &authorization).call(),
                (Method::Post, None) => self.agent.post(&url).header("Authorization", &authorization).send_empty(),
                (Method::Post, Some(json)) => {
                    self.agent.post(&url).header("Authorization", &authorization).send_json(&json)
                }
                (Method::Put, json) => self
                    .agent
                    .put(&url)
                    .header("Authorization", &authorization)
                    .send_json(&json.unwrap_or(serde_json::Value::Null)),
                (Method::Patch, json) => self
                    .agent
                    .patch(&url)
                    .header("Authorization", &authorization)
                    .send_json(&json.unwrap_or(serde_json::Value::Null)),
            }
        };

        let response = match response_result {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, method = method.as_str(), url = %url, "Request failed");
                return Err(ApiError::Transport { url, message: e.to_string() });
            }
        };

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let text = match body_reader.read_to_string() {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, status, url = %url, "Failed to read response body");
                return Err(ApiError::Transport { url, message: format!("Failed to read response body: {}", e) });
            }
        };

        if !(200..300).contains(&status) {
            let detail = error_detail(status, &text);
            warn!(status, detail = %detail, method = method.as_str(), url = %url, "Service returned an error");
            return Err(ApiError::Http { status, detail });
        }

        info!(status, bytes = text.len(), method = method.as_str(), url = %url, "Request completed");
        if status == 204 || text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str::<T>(&text)
            .map(Some)
            .map_err(|e| {
                error!(error = %e, url = %url, "Failed to deserialize response body");
                ApiError::Decode { url, message: e.to_string() }
            })
    }

    /// GET that must return a body.
    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Get, path, None)?
            .ok_or_else(|| ApiError::UnexpectedEmpty { url: self.url(path) })
    }

    /// POST/PUT/PATCH with a JSON body that must return a body.
    pub(crate) fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let json = serde_json::to_value(body)
            .map_err(|e| ApiError::Encode { url: self.url(path), message: e.to_string() })?;
        self.request(method, path, Some(json))?
            .ok_or_else(|| ApiError::UnexpectedEmpty { url: self.url(path) })
    }

    /// DELETE. The service answers 204 with no body.
    pub(crate) fn remove(&self, path: &str) -> Result<(), ApiError> {
        self.request::<serde_json::Value>(Method::Delete, path, None).map(|_| ())
    }
}

/// Pull the human-readable message out of an error body.
fn error_detail(status: u16, body: &str) -> String {
    let fallback = || format!("Request failed with status {}", status);
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return fallback();
    };
    match parsed.detail {
        serde_json::Value::String(s) if !s.trim().is_empty() => s,
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()).map(str::to_string))
                .collect();
            if messages.is_empty() { fallback() } else { messages.join("; ") }
        }
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_used_verbatim() {
        assert_eq!(error_detail(404, r#"{"detail":"Game not found"}"#), "Game not found");
    }

    #[test]
    fn detail_list_joins_messages() {
        let body = r#"{"detail":[{"loc":["body","name"],"msg":"field required"},{"msg":"too short"}]}"#;
        assert_eq!(error_detail(422, body), "field required; too short");
    }

    #[test]
    fn missing_detail_falls_back_to_status() {
        assert_eq!(error_detail(502, "<html>Bad Gateway</html>"), "Request failed with status 502");
        assert_eq!(error_detail(500, r#"{"error":"boom"}"#), "Request failed with status 500");
    }

    #[test]
    fn joins_paths_without_double_slash() {
        let api = CoachApi::new(&Settings::development("http://localhost:8000/api/v1/"));
        assert_eq!(api.url("/teams"), "http://localhost:8000/api/v1/teams");
        assert_eq!(api.url("games/1/report"), "http://localhost:8000/api/v1/games/1/report");
    }
}
