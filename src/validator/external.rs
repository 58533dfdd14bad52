use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use crate::config::BrowserConfig;
use crate::errors::XsProofError;
use crate::models::{ExecutionProof, ExecutionType, ValidationResult};
use super::dispatcher::{ValidationBackend, ValidationRequest};

/// Extra time granted to the external process beyond navigation + wait.
const GRACE: Duration = Duration::from_secs(10);

/// Out-of-process validation backend. Delegates the identical procedure to
/// an external scripted driver invoked once per call with positional
/// arguments `(url, payload, session_id, timeout_secs, wait_secs)` and
/// parses one JSON object from its stdout. Process failure of any kind is
/// non-fatal: it collapses into a non-vulnerable result.
pub struct ScriptedDriver {
    command: PathBuf,
    config: BrowserConfig,
}

/// The external driver's output contract.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendOutput {
    is_vulnerable: bool,
    execution_detected: bool,
    #[serde(default)]
    execution_proofs: Vec<BackendProof>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendProof {
    screenshot_path: String,
    #[serde(default)]
    execution_type: Option<ExecutionType>,
    #[serde(default)]
    evidence: String,
    #[serde(default)]
    page_title: String,
}

impl ScriptedDriver {
    pub fn new(command: PathBuf, config: BrowserConfig) -> Self {
        Self { command, config }
    }

    fn deadline(&self) -> Duration {
        self.config.navigation_timeout() + self.config.effective_dialog_wait() + GRACE
    }

    fn result_from_output(
        &self,
        request: &ValidationRequest,
        output: BackendOutput,
        elapsed: Duration,
    ) -> ValidationResult {
        let proofs: Vec<ExecutionProof> = output
            .execution_proofs
            .into_iter()
            .map(|p| {
                let mut proof = ExecutionProof::new(
                    &request.payload,
                    p.execution_type.unwrap_or(ExecutionType::Dialog),
                    p.evidence,
                    request.url.clone(),
                    request.context_label.clone(),
                );
                proof.page_title = p.page_title;
                proof.screenshot_path = Some(PathBuf::from(p.screenshot_path));
                proof
            })
            .collect();

        ValidationResult {
            is_vulnerable: output.is_vulnerable,
            execution_detected: output.execution_detected,
            execution_proofs: proofs,
            error: output.error,
            duration: elapsed,
        }
    }
}

#[async_trait]
impl ValidationBackend for ScriptedDriver {
    async fn validate(&self, request: &ValidationRequest) -> ValidationResult {
        let started = Instant::now();

        let mut command = Command::new(&self.command);
        command
            .arg(&request.url)
            .arg(&request.payload)
            .arg(&request.session_id)
            .arg(self.config.navigation_timeout_secs.to_string())
            .arg(self.config.effective_dialog_wait().as_secs().to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.deadline(), command.output()).await {
            Err(_) => {
                warn!(command = %self.command.display(), "Scripted backend timed out");
                let e = XsProofError::Timeout(format!(
                    "scripted driver exceeded {}s",
                    self.deadline().as_secs()
                ));
                return ValidationResult::failed(e.to_string(), started.elapsed());
            }
            Ok(Err(e)) => {
                warn!(command = %self.command.display(), error = %e, "Scripted backend failed to start");
                let e = XsProofError::Backend(format!("spawn failed: {}", e));
                return ValidationResult::failed(e.to_string(), started.elapsed());
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                command = %self.command.display(),
                status = %output.status,
                stderr = %stderr.trim(),
                "Scripted backend exited nonzero"
            );
            let e = XsProofError::Backend(format!("driver exited with {}", output.status));
            return ValidationResult::failed(e.to_string(), started.elapsed());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match serde_json::from_str::<BackendOutput>(stdout.trim()) {
            Ok(parsed) => self.result_from_output(request, parsed, started.elapsed()),
            Err(e) => {
                warn!(command = %self.command.display(), error = %e, "Unparsable backend output");
                let e = XsProofError::Backend(format!("malformed output: {}", e));
                ValidationResult::failed(e.to_string(), started.elapsed())
            }
        }
    }
}
