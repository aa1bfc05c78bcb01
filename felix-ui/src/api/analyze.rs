//! Analyze proxy
//!
//! POST /api/analyze: reads the browser's multipart form, forwards every
//! field to the AI Engine and relays the engine's JSON. Fields are neither
//! validated nor inspected; `mode` is only read for the log line.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde_json::Value;
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::engine::FormPart;
use crate::error::{ProxyError, ProxyResult};
use crate::AppState;

/// POST /api/analyze
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ProxyResult<Json<Value>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id);

    async move {
        let result = proxy(&state, multipart).await;
        match &result {
            Ok(_) => info!("Relayed AI Engine response"),
            Err(ProxyError::Upstream { status, body }) => {
                error!(status = *status, "Backend Error: {}", body);
            }
            Err(e) => error!("API Proxy Error: {}", e),
        }
        result.map(Json)
    }
    .instrument(span)
    .await
}

async fn proxy(state: &AppState, multipart: Result<Multipart, MultipartRejection>) -> ProxyResult<Value> {
    let parts = read_form(multipart?).await?;

    let mode = parts
        .iter()
        .find(|p| p.name == "mode")
        .and_then(FormPart::as_text)
        .unwrap_or("-");
    let has_image = parts.iter().any(|p| p.name == "image");
    info!(
        fields = parts.len(),
        mode,
        has_image,
        engine = %state.engine.url(),
        "Forwarding analysis request"
    );

    state.engine.forward(parts).await
}

/// Drain the inbound form, preserving field order, names, file names and content types
async fn read_form(mut multipart: Multipart) -> ProxyResult<Vec<FormPart>> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        parts.push(FormPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    Ok(parts)
}
