use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Which validation backend the dispatcher drives.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum BackendKind {
    /// In-process CDP driver talking to a chromium instance directly.
    #[default]
    Embedded,
    /// External scripted driver invoked per validation call; must print a
    /// single JSON result object on stdout.
    Scripted { command: PathBuf },
}

/// Process-wide browser validation settings. Read-only after construction;
/// cloned into every component that needs it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    /// Run chromium without a visible window.
    pub headless: bool,
    /// Pass --no-sandbox (needed when running as root, e.g. in containers).
    pub disable_sandbox: bool,
    /// Hard deadline for page navigation, in seconds.
    pub navigation_timeout_secs: u64,
    /// How long to wait for a script-triggered dialog after navigation.
    /// Signed because operator configs have shipped zero and negative values;
    /// see [`BrowserConfig::effective_dialog_wait`].
    pub dialog_wait_secs: i64,
    /// Explicit chromium binary. When unset the system installation is used.
    pub chromium_binary: Option<PathBuf>,
    /// Capture a proof screenshot when execution is confirmed.
    pub take_screenshots: bool,
    /// Root directory for persisted proof images.
    pub proof_root: PathBuf,
    pub backend: BackendKind,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            disable_sandbox: false,
            navigation_timeout_secs: 30,
            dialog_wait_secs: 5,
            chromium_binary: None,
            take_screenshots: true,
            proof_root: PathBuf::from("snapshots"),
            backend: BackendKind::Embedded,
        }
    }
}

impl BrowserConfig {
    /// Dialog wait window with a positive floor. A non-positive wait would
    /// make dialog detection impossible, so zero and negative configured
    /// values fall back to 5s and anything else is clamped to at least 1s.
    pub fn effective_dialog_wait(&self) -> Duration {
        let secs = if self.dialog_wait_secs <= 0 {
            5
        } else {
            self.dialog_wait_secs.max(1) as u64
        };
        Duration::from_secs(secs)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}
