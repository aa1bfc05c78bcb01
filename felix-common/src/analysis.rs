//! Analysis data model
//!
//! Types exchanged between the dashboard UI, the analyze proxy and the AI Engine.
//! The proxy itself relays engine output as opaque JSON; these types exist for
//! the display side (report rendering, CLI client) and for request construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Processing tier selected by the user
///
/// Passed through unmodified to the AI Engine, which decides what each tier means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    /// Cloud tier
    #[default]
    Cloud,
    /// Local privacy tier
    Local,
    /// Fast / offline tier
    Fast,
}

impl OperationMode {
    /// All modes in UI display order
    pub const ALL: [OperationMode; 3] = [Self::Cloud, Self::Local, Self::Fast];

    /// Wire tag sent in the `mode` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Local => "local",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cloud" => Ok(Self::Cloud),
            "local" => Ok(Self::Local),
            "fast" => Ok(Self::Fast),
            other => Err(Error::InvalidInput(format!(
                "unknown mode '{}' (expected cloud, local or fast)",
                other
            ))),
        }
    }
}

/// Image attached to an analysis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: None,
            content_type: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Client-side analysis submission
///
/// Ephemeral: built for one request and dropped once the response arrives.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    image: Option<ImageUpload>,
    context: String,
    mode: OperationMode,
}

impl AnalysisRequest {
    /// Build a request, refusing one that carries neither an image nor context text
    pub fn new(image: Option<ImageUpload>, context: impl Into<String>, mode: OperationMode) -> Result<Self> {
        let context = context.into();
        if !can_submit(image.is_some(), &context) {
            return Err(Error::InvalidInput(
                "an image or context text is required".to_string(),
            ));
        }
        Ok(Self { image, context, mode })
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }
}

/// Submission guard shared by the UI and the CLI
pub fn can_submit(has_image: bool, context: &str) -> bool {
    has_image || !context.is_empty()
}

/// AI Engine response
///
/// Every field defaults when absent so that partial or error-shaped engine
/// output can still be displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    pub incident_id: String,
    pub status: String,
    pub analysis: AnalysisRecord,
    pub knowledge_base: KnowledgeBaseRecord,
    /// Present when the engine reports a failure inside a 200 response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalysisResponse {
    /// True when the engine tagged this response as an error
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    pub detected_issues: String,
    pub severity: String,
    pub problem_description: String,
    pub repair_solution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseRecord {
    pub found_match: bool,
    /// 0.0 to 1.0
    pub confidence_score: f64,
    pub reference_solution: String,
    pub document_ref: String,
}

/// Generic failure body returned by the analyze proxy with HTTP 500
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_round_trips_through_str() {
        for mode in OperationMode::ALL {
            assert_eq!(mode.as_str().parse::<OperationMode>().unwrap(), mode);
        }
        assert_eq!(OperationMode::default(), OperationMode::Cloud);
    }

    #[test]
    fn test_mode_rejects_unknown_tag() {
        let err = "turbo".parse::<OperationMode>().unwrap_err();
        assert!(err.to_string().contains("turbo"));
        assert!("Cloud".parse::<OperationMode>().is_err());
    }

    #[test]
    fn test_request_requires_image_or_context() {
        assert!(AnalysisRequest::new(None, "", OperationMode::Cloud).is_err());
        assert!(AnalysisRequest::new(None, "rust on joint B-12", OperationMode::Fast).is_ok());

        let image = ImageUpload::new(vec![0xFF, 0xD8]).with_file_name("joint.jpg");
        let request = AnalysisRequest::new(Some(image), "", OperationMode::Local).unwrap();
        assert_eq!(request.image().unwrap().file_name.as_deref(), Some("joint.jpg"));
        assert_eq!(request.mode(), OperationMode::Local);
    }

    #[test]
    fn test_whitespace_context_is_submittable() {
        assert!(can_submit(false, " "));
        assert!(!can_submit(false, ""));
        assert!(can_submit(true, ""));
    }

    #[test]
    fn test_response_deserializes_engine_output() {
        let value = json!({
            "incident_id": "4f1c",
            "status": "success",
            "analysis": {
                "detected_issues": "Corrosion",
                "severity": "High",
                "problem_description": "Surface rust on weld seam.",
                "repair_solution": "Grind and repaint."
            },
            "knowledge_base": {
                "found_match": true,
                "confidence_score": 0.82,
                "reference_solution": "Replace bracket.",
                "document_ref": "MAN-0042.pdf"
            }
        });

        let response: AnalysisResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.analysis.severity, "High");
        assert!(response.knowledge_base.found_match);
        assert!(!response.is_error());
        assert!(response.message.is_none());
    }

    #[test]
    fn test_response_tolerates_error_shape() {
        let response: AnalysisResponse =
            serde_json::from_value(json!({"status": "error", "message": "model offline"})).unwrap();
        assert!(response.is_error());
        assert_eq!(response.message.as_deref(), Some("model offline"));
        assert_eq!(response.analysis, AnalysisRecord::default());
    }

    #[test]
    fn test_error_envelope_omits_missing_details() {
        let plain = serde_json::to_value(ErrorEnvelope::new("boom")).unwrap();
        assert_eq!(plain, json!({"status": "error", "message": "boom"}));

        let detailed = serde_json::to_value(ErrorEnvelope::new("boom").with_details("why")).unwrap();
        assert_eq!(detailed["details"], "why");
    }
}
