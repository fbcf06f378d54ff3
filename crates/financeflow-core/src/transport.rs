//! Outbound HTTP to the ledger backend
//!
//! [`Transport::request`] never fails: every outcome, including a request
//! that never reached the backend, is folded into an [`ApiResponse`] and the
//! caller branches on `success`.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use financeflow_config::Config;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Message attached to every 2xx response
pub const SUCCESS_MESSAGE: &str = "Request successful";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Normalized backend response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    /// Parsed JSON body, raw text body, or null when nothing was received
    pub data: Value,
    pub message: String,
    /// HTTP status; 0 when no response was received
    pub status: u16,
}

impl ApiResponse {
    pub fn ok(status: u16, data: Value) -> Self {
        Self {
            success: true,
            data,
            message: SUCCESS_MESSAGE.to_string(),
            status,
        }
    }

    pub fn rejected(status: u16, data: Value) -> Self {
        Self {
            success: false,
            message: message_from_body(&data),
            data,
            status,
        }
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            message: message.into(),
            status: 0,
        }
    }

    /// Whether a response was received at all
    pub fn reached_backend(&self) -> bool {
        self.status != 0
    }

    /// Typed error for a failed response, used for logging
    pub fn to_error(&self) -> ClientError {
        if self.reached_backend() {
            ClientError::BackendRejected {
                status: self.status,
                message: self.message.clone(),
            }
        } else {
            ClientError::NetworkUnavailable {
                message: self.message.clone(),
            }
        }
    }
}

/// Display text of a failure body.
///
/// String bodies are used as-is, objects contribute their `message` or
/// `error` string field, anything else is rendered as JSON.
pub fn message_from_body(data: &Value) -> String {
    match data {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| data.to_string()),
        other => other.to_string(),
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiResponse;

    async fn get(&self, path: &str) -> ApiResponse {
        self.request(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> ApiResponse {
        self.request(Method::Post, path, Some(body)).await
    }
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ClientError::NetworkUnavailable {
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::new(&config.backend.base_url, config.backend_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiResponse {
        let url = self.url(path);
        let mut builder = self
            .client
            .request(method.into(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let (Some(body), false) = (body, method == Method::Get) {
            builder = builder.json(&body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("{} {} failed: {}", method, url, e);
                return ApiResponse::network_error(e.to_string());
            }
        };

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("{} {} body could not be read: {}", method, url, e);
                return ApiResponse::network_error(e.to_string());
            }
        };

        // Malformed JSON falls back to the raw text
        let data = if is_json {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        } else {
            Value::String(text)
        };

        log::debug!("{} {} -> {}", method, url, status.as_u16());
        if status.is_success() {
            ApiResponse::ok(status.as_u16(), data)
        } else {
            ApiResponse::rejected(status.as_u16(), data)
        }
    }
}

// ==================== Tests ====================
