use std::path::PathBuf;
use std::sync::Arc;

use chromiumoxide::detection::{default_executable, DetectionOptions};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::BrowserConfig;
use crate::errors::XsProofError;
use super::session::SessionRecord;

/// Explicitly owned browser environment handle, shared by every validation
/// call. Holds the read-only config, the session bookkeeping map, and the
/// resolved chromium executable behind a mutex-guarded readiness state.
///
/// A missing chromium installation is only detectable once, here at init
/// time; callers should disable browser validation for the rest of a run
/// instead of retrying per call.
pub struct Environment {
    config: BrowserConfig,
    sessions: DashMap<String, SessionRecord>,
    /// `Some(path)` once initialized; the path is the executable every
    /// launched context uses.
    executable: Mutex<Option<PathBuf>>,
}

impl Environment {
    pub fn new(config: BrowserConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            sessions: DashMap::new(),
            executable: Mutex::new(None),
        })
    }

    /// Resolve the chromium executable and mark the environment ready.
    /// Idempotent; concurrent callers serialize on the state lock.
    pub async fn init(&self) -> Result<(), XsProofError> {
        let mut executable = self.executable.lock().await;
        if executable.is_some() {
            return Ok(());
        }

        let resolved = match &self.config.chromium_binary {
            Some(path) if path.exists() => path.clone(),
            Some(path) => {
                return Err(XsProofError::Config(format!(
                    "Configured chromium binary not found: {}",
                    path.display()
                )));
            }
            None => default_executable(DetectionOptions::default())
                .map_err(XsProofError::Browser)?,
        };

        info!(chromium = %resolved.display(), "Browser environment initialized");
        *executable = Some(resolved);
        Ok(())
    }

    pub async fn is_ready(&self) -> bool {
        self.executable.lock().await.is_some()
    }

    /// The resolved chromium executable, or `NotReady` if `init` has not
    /// completed.
    pub async fn executable(&self) -> Result<PathBuf, XsProofError> {
        self.executable
            .lock()
            .await
            .clone()
            .ok_or_else(|| XsProofError::NotReady("browser environment not initialized".into()))
    }

    pub async fn shutdown(&self) {
        *self.executable.lock().await = None;
        self.sessions.clear();
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn begin_session(&self, id: &str) {
        self.sessions.insert(id.to_string(), SessionRecord::new(id));
    }

    pub fn end_session(&self, id: &str) {
        self.sessions.remove(id);
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_not_ready() {
        let env = Environment::new(BrowserConfig::default());
        assert!(!env.is_ready().await);
        assert!(matches!(
            env.executable().await.unwrap_err(),
            XsProofError::NotReady(_)
        ));
    }

    #[tokio::test]
    async fn missing_configured_binary_fails_init() {
        let env = Environment::new(BrowserConfig {
            chromium_binary: Some(PathBuf::from("/nonexistent/chromium")),
            ..Default::default()
        });
        assert!(matches!(
            env.init().await.unwrap_err(),
            XsProofError::Config(_)
        ));
        assert!(!env.is_ready().await);
    }

    #[tokio::test]
    async fn session_bookkeeping_tracks_in_flight_calls() {
        let env = Environment::new(BrowserConfig::default());
        env.begin_session("s1");
        env.begin_session("s2");
        assert_eq!(env.active_sessions(), 2);
        env.end_session("s1");
        assert_eq!(env.active_sessions(), 1);
        env.end_session("s2");
        assert_eq!(env.active_sessions(), 0);
    }
}
