//! Plain-text diagnostic report
//!
//! Terminal counterpart of the dashboard's report panel.

use crate::analysis::{AnalysisResponse, KnowledgeBaseRecord};
use std::fmt::Write;

pub const MATCH_FOUND: &str = "Historical Match Found";
pub const NEW_ANOMALY: &str = "New Anomaly";

/// Knowledge-base headline
pub fn knowledge_base_verdict(kb: &KnowledgeBaseRecord) -> &'static str {
    if kb.found_match {
        MATCH_FOUND
    } else {
        NEW_ANOMALY
    }
}

/// Confidence as a percentage with one decimal, e.g. `0.825` -> `82.5%`
///
/// Halves round up, as the browser's `toFixed(1)` does.
pub fn format_confidence(score: f64) -> String {
    format!("{:.1}%", (score * 1000.0).round() / 10.0)
}

/// Render the full report
pub fn render(response: &AnalysisResponse) -> String {
    let mut out = String::new();

    if response.is_error() {
        let message = response.message.as_deref().unwrap_or("unknown engine error");
        let _ = writeln!(out, "Analysis failed: {}", message);
        return out;
    }

    if !response.incident_id.is_empty() {
        let _ = writeln!(out, "Incident {}", response.incident_id);
        out.push('\n');
    }

    let analysis = &response.analysis;
    let kb = &response.knowledge_base;

    let _ = writeln!(out, "Detected Severity : {}", analysis.severity);
    let _ = writeln!(
        out,
        "Knowledge Base    : {} (Confidence: {})",
        knowledge_base_verdict(kb),
        format_confidence(kb.confidence_score)
    );
    if !analysis.detected_issues.is_empty() {
        let _ = writeln!(out, "Detected Issues   : {}", analysis.detected_issues);
    }

    out.push_str("\nTechnical Analysis\n");
    push_indented(&mut out, &analysis.problem_description);

    out.push_str("\nRecommended Action\n");
    push_indented(&mut out, &analysis.repair_solution);

    if kb.found_match {
        let _ = writeln!(out, "\nReference Case: {}", kb.document_ref);
        let _ = writeln!(out, "    \"{}\"", kb.reference_solution);
    }

    out
}

fn push_indented(out: &mut String, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "    {}", line);
    }
}
