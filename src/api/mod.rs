//! HTTP gateway to the campus events backend.
//!
//! Every outbound call goes through [`ApiClient::request`]: it joins the path
//! to the configured base URL, attaches JSON headers and (when asked for) the
//! bearer token, enforces the per-request timeout and normalizes failures
//! into [`ApiError`]. One attempt per call, no retries.

pub mod error;
pub mod request;

pub use error::{ApiError, ApiStatus};
pub use request::{Request, call};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use parking_lot::RwLock;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    /// Returns the JSON value, parsing text bodies that happen to hold JSON.
    pub fn into_json(self) -> AppResult<Value> {
        match self {
            ApiBody::Json(v) => Ok(v),
            ApiBody::Text(t) if t.trim().is_empty() => Ok(Value::Null),
            ApiBody::Text(t) => serde_json::from_str(&t).map_err(|_| {
                AppError::UnexpectedResponse(format!("expected JSON, got text: {}", preview(&t)))
            }),
        }
    }

    pub fn decode<T: DeserializeOwned>(self) -> AppResult<T> {
        Ok(serde_json::from_value(self.into_json()?)?)
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(80).collect();
    if text.chars().count() > 80 {
        out.push('…');
    }
    out
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    timeout: Duration,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            timeout,
            token: RwLock::new(None),
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(
            cfg.api_base_url.clone(),
            Duration::from_secs(cfg.request_timeout_secs.max(1)),
        )
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn default_headers(&self, require_auth: bool) -> AppResult<HeaderMap> {
        let mut map = HeaderMap::new();
        map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        map.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if require_auth {
            let guard = self.token.read();
            let token = guard.as_deref().ok_or(AppError::NotAuthenticated)?;
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| AppError::Config("bearer token contains invalid characters".into()))?;
            map.insert(AUTHORIZATION, value);
        }

        Ok(map)
    }

    /// Issues a single request.
    ///
    /// Fails locally with [`AppError::NotAuthenticated`] when `require_auth`
    /// is set and no token is held; nothing is sent in that case.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: Option<HeaderMap>,
        require_auth: bool,
    ) -> AppResult<ApiBody> {
        let mut merged = self.default_headers(require_auth)?;
        if let Some(extra) = headers {
            merged.extend(extra);
        }

        let url = self.url(path);
        let mut builder = self.http.request(method.clone(), &url).headers(merged);
        if let Some(json) = body {
            builder = builder.json(json);
        }

        let started = Instant::now();
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let is_json = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(is_json_content_type)
                .unwrap_or(false);
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, is_json, text))
        };

        let (status, is_json, text) = match tokio::time::timeout(self.timeout, exchange).await {
            Err(_) => {
                warn!(%method, path, timeout_ms = self.timeout.as_millis() as u64, "request timed out");
                return Err(ApiError::timeout().into());
            }
            Ok(Err(e)) if e.is_timeout() => {
                warn!(%method, path, "request timed out");
                return Err(ApiError::timeout().into());
            }
            Ok(Err(e)) => {
                warn!(%method, path, error = %e, "request failed");
                return Err(ApiError::network(e.to_string()).into());
            }
            Ok(Ok(parts)) => parts,
        };

        debug!(
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api call"
        );

        if !status.is_success() {
            let message = server_message(&text);
            warn!(%method, path, status = status.as_u16(), "api call rejected");
            return Err(ApiError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                message,
            )
            .into());
        }

        if is_json {
            if text.trim().is_empty() {
                return Ok(ApiBody::Json(Value::Null));
            }
            Ok(ApiBody::Json(serde_json::from_str(&text)?))
        } else {
            Ok(ApiBody::Text(text))
        }
    }

    pub async fn get(&self, path: &str, require_auth: bool) -> AppResult<ApiBody> {
        self.request(Method::GET, path, None, None, require_auth)
            .await
    }

    pub async fn post(&self, path: &str, body: &Value, require_auth: bool) -> AppResult<ApiBody> {
        self.request(Method::POST, path, Some(body), None, require_auth)
            .await
    }

    pub async fn put(&self, path: &str, body: &Value, require_auth: bool) -> AppResult<ApiBody> {
        self.request(Method::PUT, path, Some(body), None, require_auth)
            .await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: Option<&Value>,
        require_auth: bool,
    ) -> AppResult<ApiBody> {
        self.request(Method::DELETE, path, body, None, require_auth)
            .await
    }
}

fn is_json_content_type(value: &str) -> bool {
    value
        .parse::<mime::Mime>()
        .map(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
        .unwrap_or(false)
}

/// Extracts `message` or `error` from an error body, when it is JSON.
fn server_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_with_and_without_slash() {
        let api = ApiClient::new("http://localhost:9000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/event/getallevents"), "http://localhost:9000/api/event/getallevents");
        assert_eq!(api.url("event/getallevents"), "http://localhost:9000/api/event/getallevents");
    }

    #[test]
    fn json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("text/plain"));
    }

    #[test]
    fn server_message_prefers_message_field() {
        assert_eq!(
            server_message(r#"{"message":"nope","error":"x"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(server_message(r#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(server_message("plain text"), None);
    }

    #[test]
    fn auth_headers_require_token() {
        let api = ApiClient::new("http://localhost", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            api.default_headers(true),
            Err(AppError::NotAuthenticated)
        ));

        api.set_token("abc");
        let headers = api.default_headers(true).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");

        api.clear_token();
        assert!(!api.has_token());
        assert!(api.default_headers(false).unwrap().get(AUTHORIZATION).is_none());
    }
}
