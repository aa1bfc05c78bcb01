//! AI Engine forwarding client
//!
//! Re-sends a multipart form to the engine's analyze endpoint and hands back
//! the JSON body untouched. Single attempt: no retries, no backoff.

use axum::body::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{ProxyError, ProxyResult};

const USER_AGENT: &str = concat!("felix-ui/", env!("CARGO_PKG_VERSION"));

/// One multipart field as received from the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormPart {
    /// Plain text field
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: Bytes::from(value.into()),
        }
    }

    /// File field
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            data: data.into(),
        }
    }

    /// Field value as text, for logging
    pub fn as_text(&self) -> Option<&str> {
        if self.file_name.is_some() {
            return None;
        }
        std::str::from_utf8(&self.data).ok()
    }

    fn into_part(self) -> ProxyResult<Part> {
        let mut part = Part::bytes(self.data.to_vec());
        if let Some(file_name) = self.file_name {
            part = part.file_name(file_name);
        }
        if let Some(content_type) = self.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| ProxyError::Multipart(format!("content type '{}': {}", content_type, e)))?;
        }
        Ok(part)
    }
}

/// Client for the AI Engine analyze endpoint
#[derive(Clone)]
pub struct EngineClient {
    http_client: reqwest::Client,
    url: String,
}

impl EngineClient {
    /// Create a client; `timeout` of `None` leaves the request unbounded
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> felix_common::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    /// Engine endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward the fields, in order, and return the engine's JSON
    pub async fn forward(&self, parts: Vec<FormPart>) -> ProxyResult<Value> {
        // Field names go out as plain quoted strings, never RFC 2231 encoded
        let mut form = Form::new().percent_encode_noop();
        for part in parts {
            let name = part.name.clone();
            form = form.part(name, part.into_part()?);
        }

        debug!(url = %self.url, "Posting form to AI Engine");

        let response = self
            .http_client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(body_error)
    }
}

/// A timeout while the body streams in is a transport fault, not bad JSON
fn body_error(err: reqwest::Error) -> ProxyError {
    if err.is_timeout() {
        ProxyError::Transport(err.to_string())
    } else {
        ProxyError::Decode(err.to_string())
    }
}
