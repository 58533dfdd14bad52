use serde::{Deserialize, Serialize};
use std::time::Duration;
use super::proof::ExecutionProof;

/// The engine's sole output. Constructed fresh per validation call and
/// immutable once returned.
///
/// `is_vulnerable` and `execution_detected` are currently always set
/// together, but they are deliberately separate fields: a future
/// DOM-mutation detector may report execution without a confirmed
/// vulnerability verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_vulnerable: bool,
    pub execution_detected: bool,
    pub execution_proofs: Vec<ExecutionProof>,
    /// Diagnostic text distinguishing "payload did not execute" from
    /// "browser tooling is broken". Never fatal to the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration: Duration,
}

impl ValidationResult {
    /// Execution positively observed.
    pub fn confirmed(proof: ExecutionProof, duration: Duration) -> Self {
        Self {
            is_vulnerable: true,
            execution_detected: true,
            execution_proofs: vec![proof],
            error: None,
            duration,
        }
    }

    /// The wait window elapsed without any observable side effect.
    pub fn clean(duration: Duration) -> Self {
        Self {
            is_vulnerable: false,
            execution_detected: false,
            execution_proofs: Vec::new(),
            error: None,
            duration,
        }
    }

    /// The call failed before a verdict could be reached. Indistinguishable
    /// from `clean` in the boolean verdict, but carries the failure.
    pub fn failed(error: impl Into<String>, duration: Duration) -> Self {
        Self {
            is_vulnerable: false,
            execution_detected: false,
            execution_proofs: Vec::new(),
            error: Some(error.into()),
            duration,
        }
    }
}
