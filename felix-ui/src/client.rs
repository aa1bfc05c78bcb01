//! Dashboard client
//!
//! Submits an analysis to a running dashboard's `/api/analyze`, the same call
//! the browser makes. Used by the `analyze` subcommand.

use felix_common::{AnalysisRequest, Error, ImageUpload, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Default dashboard address
pub const DEFAULT_DASHBOARD_URL: &str = "http://127.0.0.1:3000";

/// HTTP client for the dashboard's analyze route
pub struct DashboardClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("felix-ui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Full URL of the analyze route
    pub fn analyze_url(&self) -> String {
        format!("{}/api/analyze", self.base_url.trim_end_matches('/'))
    }

    /// Submit a request and return the relayed JSON
    ///
    /// Any non-OK status is reported as `Error::AnalysisFailed`.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Value> {
        let url = self.analyze_url();
        debug!(%url, mode = %request.mode(), "Submitting analysis");

        let response = self
            .http_client
            .post(&url)
            .multipart(build_form(request)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(Error::AnalysisFailed(message));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Multipart form in browser order: `image` (when present), `context`, `mode`
pub fn build_form(request: &AnalysisRequest) -> Result<Form> {
    let mut form = Form::new();

    if let Some(image) = request.image() {
        let mut part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone().unwrap_or_else(|| "upload".to_string()));
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }
        form = form.part("image", part);
    }

    Ok(form
        .text("context", request.context().to_string())
        .text("mode", request.mode().as_str()))
}

/// Read an image from disk, naming it after the file and typing it by extension
pub async fn load_image(path: &Path) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path).await?;

    let mut image = ImageUpload::new(bytes).with_content_type(content_type_for(path));
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        image = image.with_file_name(name);
    }
    Ok(image)
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
