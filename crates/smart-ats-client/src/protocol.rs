//! Request and response shapes exchanged with the analysis backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

// ── Analysis ────────────────────────────────────────────────────

/// One resume upload. The job description is only sent in ATS mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume: PathBuf,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(resume: PathBuf, job_description: impl Into<String>) -> Self {
        Self {
            resume,
            job_description: job_description.into(),
        }
    }

    /// File name reported in the multipart part.
    pub fn file_name(&self) -> String {
        self.resume
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume".to_string())
    }
}

// Response is the raw analysis JSON, decoded per mode by the caller.

// ── Sentence Rewrite ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ImproveSentenceRequest {
    pub sentence: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImproveSentenceResponse {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub improved: Option<Value>,
}

impl ImproveSentenceResponse {
    /// The rewritten sentence, when the backend produced a usable one.
    pub fn improved_text(&self) -> Option<String> {
        self.improved
            .as_ref()
            .filter(|v| is_truthy(v))
            .map(display_value)
    }
}

// ── Errors ──────────────────────────────────────────────────────

/// The application error carried by a JSON object body, if its `error`
/// field is truthy.
pub fn application_error(body: &Value) -> Option<String> {
    body.get("error").filter(|v| is_truthy(v)).map(display_value)
}

/// JSON truthiness as a browser evaluates it: `null`, `false`, `0` and `""`
/// are falsy, everything else (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Content type for an uploaded resume, from its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
