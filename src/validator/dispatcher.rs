use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::browser::{EmbeddedDriver, Environment};
use crate::config::BackendKind;
use crate::models::ValidationResult;
use super::external::ScriptedDriver;

/// Payload label used when revisiting a URL for stored execution; there is
/// no payload to embed, the URL is expected to already serve it.
pub const STORED_CHECK_LABEL: &str = "[stored-check]";

/// One validation call: the crafted URL (payload already embedded by the
/// caller), the payload text for correlation, and where it was injected.
/// The session id exists for log correlation only; calls never share
/// browser state.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub session_id: String,
    pub url: String,
    pub payload: String,
    pub context_label: String,
}

impl ValidationRequest {
    pub fn new(url: &str, payload: &str, context_label: &str) -> Self {
        Self {
            session_id: format!("session_{}", Uuid::new_v4().simple()),
            url: url.to_string(),
            payload: payload.to_string(),
            context_label: context_label.to_string(),
        }
    }
}

/// A validation strategy. Implementations must be behaviorally equivalent
/// for the same input and must never fail the caller: every failure mode
/// collapses into a non-vulnerable result with the error field populated.
#[async_trait]
pub trait ValidationBackend: Send + Sync {
    async fn validate(&self, request: &ValidationRequest) -> ValidationResult;
}

/// Public entry point. Selects the configured backend once and normalizes
/// every call into the shared [`ValidationResult`] shape; no backend
/// specifics leak to callers.
pub struct Dispatcher {
    backend: Box<dyn ValidationBackend>,
}

impl Dispatcher {
    pub fn from_environment(env: Arc<Environment>) -> Self {
        let backend: Box<dyn ValidationBackend> = match &env.config().backend {
            BackendKind::Embedded => Box::new(EmbeddedDriver::new(env.clone())),
            BackendKind::Scripted { command } => Box::new(ScriptedDriver::new(
                command.clone(),
                env.config().clone(),
            )),
        };
        Self { backend }
    }

    /// Mainly for tests and embedding callers that bring their own backend.
    pub fn with_backend(backend: Box<dyn ValidationBackend>) -> Self {
        Self { backend }
    }

    /// Validate one (url, payload, context) tuple. Never errors; a caller
    /// scanning many URLs must not be aborted by one browser failure.
    pub async fn validate(&self, url: &str, payload: &str, context_label: &str) -> ValidationResult {
        let request = ValidationRequest::new(url, payload, context_label);
        info!(
            session_id = %request.session_id,
            url = %request.url,
            context = %request.context_label,
            "Validating payload execution"
        );
        self.backend.validate(&request).await
    }

    /// Revisit a URL to catch execution that only manifests on a later load,
    /// e.g. after the payload was persisted server-side. A fresh, independent
    /// validation; no state carries over from the original injection.
    pub async fn verify_stored(&self, url: &str, session_id: &str) -> ValidationResult {
        let request = ValidationRequest {
            session_id: session_id.to_string(),
            url: url.to_string(),
            payload: STORED_CHECK_LABEL.to_string(),
            context_label: "stored".to_string(),
        };
        info!(session_id = %request.session_id, url = %request.url, "Stored execution revisit");
        self.backend.validate(&request).await
    }
}
