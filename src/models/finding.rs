use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::proof::ExecutionType;

/// A saved finding from the scanning pipeline, as consumed by the offline
/// re-validation command. Field names follow the scanner's serialized
/// finding records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingRecord {
    /// Finding kind, e.g. "V" (verified) or "R" (reflected).
    #[serde(rename = "type")]
    pub finding_type: String,
    /// The crafted URL with the payload already embedded.
    pub data: String,
    #[serde(default)]
    pub payload: String,
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub message_str: String,
}

impl FindingRecord {
    /// The payload text to correlate the proof against. Scanner records
    /// populate either `payload` or `evidence` depending on the finding kind.
    pub fn payload_or_evidence(&self) -> &str {
        if !self.payload.is_empty() {
            &self.payload
        } else {
            &self.evidence
        }
    }

    /// Whether this record claims an actual XSS execution. Only verified
    /// ("V") records carry a payload whose execution can be re-proven in a
    /// browser; grep and reflection-only records never executed anything.
    pub fn is_verified_xss(&self) -> bool {
        self.finding_type == "V"
    }
}

/// Per-URL outcome inside a [`ProofReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub url: String,
    pub is_vulnerable: bool,
    pub execution_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_type: Option<ExecutionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Standalone report produced by re-validating a saved finding collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofReport {
    pub timestamp: DateTime<Utc>,
    pub total_tested: usize,
    pub valid_executions: usize,
    pub invalid_executions: usize,
    pub results: Vec<ReportEntry>,
}
