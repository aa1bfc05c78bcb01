//! Mock AI Engine
//!
//! Routes:
//! - POST /analyze   canned success response
//! - POST /echo      describes every received field as JSON
//! - POST /fail      503 with a plain-text body
//! - POST /not-json  200 with a plain-text body
//! - POST /created   201 with the canned success response
//! - POST /slow      canned success after a 2 s delay
//!
//! `StalledBodyEngine` is a raw TCP responder that sends headers and then
//! stops mid-body.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::Multipart,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub struct MockEngine {
    addr: SocketAddr,
}

impl MockEngine {
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/analyze", post(|| async { Json(sample_analysis()) }))
            .route("/echo", post(echo))
            .route(
                "/fail",
                post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
            )
            .route("/not-json", post(|| async { "<html>oops</html>" }))
            .route(
                "/created",
                post(|| async { (StatusCode::CREATED, Json(sample_analysis())) }),
            )
            .route(
                "/slow",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Json(sample_analysis())
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind mock engine");
        let addr = listener.local_addr().expect("Should have local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock engine failed");
        });

        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

async fn echo(mut multipart: Multipart) -> Json<Value> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("Should read field") {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.expect("Should read field bytes");

        fields.push(json!({
            "name": name,
            "file_name": file_name,
            "content_type": content_type,
            "len": data.len(),
            "text": String::from_utf8_lossy(&data),
        }));
    }
    Json(json!({ "fields": fields }))
}

/// Engine response shape as produced by the AI Engine
pub fn sample_analysis() -> Value {
    json!({
        "incident_id": "0b7e4c1a-3f7d-4c55-9a43-2f0e6d1c9b11",
        "status": "success",
        "analysis": {
            "detected_issues": "Corrosion",
            "severity": "High",
            "problem_description": "Surface rust along the weld seam of joint B-12.",
            "repair_solution": "1. Wire-brush the seam\n2. Apply zinc primer"
        },
        "knowledge_base": {
            "found_match": true,
            "confidence_score": 0.87,
            "reference_solution": "Replace the bracket and re-weld.",
            "document_ref": "MAINT-2291.pdf"
        }
    })
}

/// Address nothing is listening on
pub async fn unused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind");
    let addr = listener.local_addr().expect("Should have local addr");
    drop(listener);
    addr
}

/// Engine that answers 200 with a JSON content length it never delivers
pub struct StalledBodyEngine {
    addr: SocketAddr,
}

impl StalledBodyEngine {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind stalled engine");
        let addr = listener.local_addr().expect("Should have local addr");

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    // Drain the request up to the closing multipart boundary
                    let mut request = Vec::new();
                    let mut buf = [0u8; 4096];
                    while !request.ends_with(b"--\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }

                    let head = "HTTP/1.1 200 OK\r\n\
                                Content-Type: application/json\r\n\
                                Content-Length: 64\r\n\r\n{\"status\":";
                    if socket.write_all(head.as_bytes()).await.is_err() {
                        return;
                    }
                    let _ = socket.flush().await;
                    tokio::time::sleep(Duration::from_secs(5)).await;
                });
            }
        });

        Self { addr }
    }

    pub fn url(&self) -> String {
        format!("http://{}/analyze", self.addr)
    }
}
