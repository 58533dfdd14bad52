use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The observable JavaScript side effect that confirmed execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionType {
    Alert,
    Confirm,
    Prompt,
    /// A blocking dialog of some other kind (e.g. beforeunload).
    Dialog,
    DomChange,
    Stored,
}

impl ExecutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionType::Alert => "alert",
            ExecutionType::Confirm => "confirm",
            ExecutionType::Prompt => "prompt",
            ExecutionType::Dialog => "dialog",
            ExecutionType::DomChange => "dom-change",
            ExecutionType::Stored => "stored",
        }
    }
}

/// Evidence that a payload's script executed in a real browser. Only ever
/// constructed after execution was positively observed; the screenshot
/// fields stay empty when capture, encoding, or persistence fails, but a
/// proof without an image is still a proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionProof {
    /// Hex SHA-256 of the payload, for correlation without storing raw payload text.
    pub payload_sha256: String,
    pub execution_type: ExecutionType,
    pub executed_at: DateTime<Utc>,
    /// Human-readable evidence, e.g. the dialog message.
    pub evidence: String,
    pub page_url: String,
    pub page_title: String,
    /// Caller-supplied label for where the payload was injected
    /// (e.g. "html", "attribute", "javascript").
    pub execution_context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_base64: Option<String>,
}

impl ExecutionProof {
    pub fn new(
        payload: &str,
        execution_type: ExecutionType,
        evidence: String,
        page_url: String,
        execution_context: String,
    ) -> Self {
        Self {
            payload_sha256: crate::utils::hashing::sha256_hex(payload),
            execution_type,
            executed_at: Utc::now(),
            evidence,
            page_url,
            page_title: String::new(),
            execution_context,
            screenshot_path: None,
            screenshot_base64: None,
        }
    }

    pub fn has_screenshot(&self) -> bool {
        self.screenshot_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_type_serializes_to_closed_set() {
        let cases = [
            (ExecutionType::Alert, "\"alert\""),
            (ExecutionType::Confirm, "\"confirm\""),
            (ExecutionType::Prompt, "\"prompt\""),
            (ExecutionType::Dialog, "\"dialog\""),
            (ExecutionType::DomChange, "\"dom-change\""),
            (ExecutionType::Stored, "\"stored\""),
        ];
        for (value, expected) in cases {
            assert_eq!(serde_json::to_string(&value).unwrap(), expected);
            assert_eq!(value.as_str(), expected.trim_matches('"'));
        }
    }

    #[test]
    fn new_proof_hashes_payload_and_omits_image_fields() {
        let proof = ExecutionProof::new(
            "<script>alert(1)</script>",
            ExecutionType::Alert,
            "1".into(),
            "http://example.com/?q=x".into(),
            "html".into(),
        );
        assert_eq!(proof.payload_sha256.len(), 64);
        assert!(!proof.has_screenshot());

        let json = serde_json::to_value(&proof).unwrap();
        assert!(json.get("screenshot_path").is_none());
        assert!(json.get("screenshot_base64").is_none());
    }
}
