use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chromiumoxide::browser::{Browser, BrowserConfig as LaunchConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, DialogType, EventJavascriptDialogOpening,
    HandleJavaScriptDialogParams,
};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::capture;
use crate::errors::XsProofError;
use crate::models::{ExecutionProof, ExecutionType, ValidationResult};
use crate::store::ProofStore;
use crate::validator::{ValidationBackend, ValidationRequest};
use super::environment::Environment;

/// Launch flags applied to every validation context so page timing stays
/// deterministic, carried over from the chromedp-era flag set.
const LAUNCH_FLAGS: &[&str] = &[
    "--no-default-browser-check",
    "--disable-background-networking",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-client-side-phishing-detection",
    "--disable-default-apps",
    "--disable-extensions",
    "--disable-sync",
    "--metrics-recording-only",
    "--enable-automation",
];

/// In-process validation backend. Each call launches a fresh chromium with
/// an ephemeral profile, arms a dialog listener, navigates, and races the
/// first dialog event against the configured wait window. Session state is
/// never reused across calls; a prior payload must not leak into the next
/// check.
pub struct EmbeddedDriver {
    env: Arc<Environment>,
    store: ProofStore,
}

enum NavOutcome {
    /// Navigation completed and the wait window elapsed without a dialog.
    Clean,
    Error(XsProofError),
}

impl EmbeddedDriver {
    pub fn new(env: Arc<Environment>) -> Self {
        let store = ProofStore::new(env.config().proof_root.clone());
        Self { env, store }
    }

    async fn launch(
        &self,
        executable: &Path,
    ) -> Result<(Browser, JoinHandle<()>), XsProofError> {
        let cfg = self.env.config();

        let mut builder = LaunchConfig::builder()
            .chrome_executable(executable)
            .args(LAUNCH_FLAGS.iter().copied());
        if !cfg.headless {
            builder = builder.with_head();
        }
        if cfg.disable_sandbox {
            builder = builder.no_sandbox();
        }
        let launch_config = builder.build().map_err(XsProofError::Browser)?;

        let (browser, mut handler) = Browser::launch(launch_config)
            .await
            .map_err(|e| XsProofError::Browser(format!("Failed to launch chromium: {}", e)))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, handler_task))
    }

    async fn run(
        &self,
        request: &ValidationRequest,
        executable: &Path,
        started: Instant,
    ) -> Result<ValidationResult, XsProofError> {
        let (mut browser, handler_task) = self.launch(executable).await?;

        let outcome = self.observe(&browser, request, started).await;

        // Teardown on every exit path; a leaked browser context is a defect.
        if let Err(e) = browser.close().await {
            debug!(error = %e, "Browser close reported an error");
        }
        let _ = browser.wait().await;
        handler_task.abort();

        outcome
    }

    async fn observe(
        &self,
        browser: &Browser,
        request: &ValidationRequest,
        started: Instant,
    ) -> Result<ValidationResult, XsProofError> {
        let cfg = self.env.config();

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| XsProofError::Browser(format!("Failed to open page: {}", e)))?;

        // Armed strictly before navigation: an onload dialog fires mid-load
        // and must still be observed.
        let mut dialogs = page
            .event_listener::<EventJavascriptDialogOpening>()
            .await
            .map_err(|e| {
                XsProofError::Browser(format!("Failed to subscribe to dialog events: {}", e))
            })?;

        let navigation = navigate_and_wait(
            &page,
            &request.url,
            cfg.navigation_timeout(),
            cfg.effective_dialog_wait(),
        );
        tokio::pin!(navigation);

        // First signal wins: a dialog confirms execution, the navigation arm
        // finishing means either a bounded failure or a quiet wait window.
        let result = tokio::select! {
            maybe_dialog = dialogs.next() => match maybe_dialog {
                Some(dialog) => {
                    self.confirm_execution(&page, request, dialog.as_ref(), started)
                        .await
                }
                None => ValidationResult::failed("dialog event stream closed", started.elapsed()),
            },
            nav = &mut navigation => match nav {
                NavOutcome::Clean => ValidationResult::clean(started.elapsed()),
                NavOutcome::Error(e) => ValidationResult::failed(e.to_string(), started.elapsed()),
            },
        };

        Ok(result)
    }

    /// A dialog was observed: execution is confirmed. Everything beyond this
    /// point is proof enrichment and must not change the verdict.
    async fn confirm_execution(
        &self,
        page: &Page,
        request: &ValidationRequest,
        dialog: &EventJavascriptDialogOpening,
        started: Instant,
    ) -> ValidationResult {
        let execution_type = execution_type_for(&dialog.r#type);
        debug!(
            session_id = %request.session_id,
            execution_type = execution_type.as_str(),
            message = %dialog.message,
            "Dialog observed, execution confirmed"
        );

        let mut proof = ExecutionProof::new(
            &request.payload,
            execution_type,
            dialog.message.clone(),
            request.url.clone(),
            request.context_label.clone(),
        );

        // The dialog blocks the renderer until dismissed.
        match HandleJavaScriptDialogParams::builder().accept(true).build() {
            Ok(params) => {
                if let Err(e) = page.execute(params).await {
                    warn!(error = %e, "Failed to dismiss dialog");
                }
            }
            Err(e) => warn!(error = %e, "Failed to build dialog dismissal"),
        }

        if self.env.config().take_screenshots {
            match self.capture_proof(page, request).await {
                Ok((path, encoded)) => {
                    proof.screenshot_path = Some(path);
                    proof.screenshot_base64 = Some(encoded);
                }
                // Capture, encoding, and persistence failures degrade the
                // proof; execution stays confirmed.
                Err(e) => warn!(error = %e, "Proof capture failed, keeping verdict"),
            }
        }

        if let Ok(Some(title)) = page.get_title().await {
            proof.page_title = title;
        }

        ValidationResult::confirmed(proof, started.elapsed())
    }

    async fn capture_proof(
        &self,
        page: &Page,
        request: &ValidationRequest,
    ) -> Result<(PathBuf, String), XsProofError> {
        let png = page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
            )
            .await
            .map_err(|e| XsProofError::Browser(format!("Screenshot failed: {}", e)))?;

        let jpeg = capture::encode_jpeg(&png, capture::DEFAULT_QUALITY)?;
        let path = self.store.save(&request.url, &request.payload, &jpeg)?;
        Ok((path, BASE64.encode(&jpeg)))
    }
}

async fn navigate_and_wait(
    page: &Page,
    url: &str,
    nav_timeout: Duration,
    dialog_wait: Duration,
) -> NavOutcome {
    match timeout(nav_timeout, page.goto(url)).await {
        Err(_) => NavOutcome::Error(XsProofError::Timeout(format!(
            "navigation exceeded {}s",
            nav_timeout.as_secs()
        ))),
        Ok(Err(e)) => NavOutcome::Error(XsProofError::Navigation(e.to_string())),
        Ok(Ok(_)) => {
            tokio::time::sleep(dialog_wait).await;
            NavOutcome::Clean
        }
    }
}

fn execution_type_for(dialog: &DialogType) -> ExecutionType {
    match dialog {
        DialogType::Alert => ExecutionType::Alert,
        DialogType::Confirm => ExecutionType::Confirm,
        DialogType::Prompt => ExecutionType::Prompt,
        _ => ExecutionType::Dialog,
    }
}

#[async_trait]
impl ValidationBackend for EmbeddedDriver {
    async fn validate(&self, request: &ValidationRequest) -> ValidationResult {
        let started = Instant::now();

        let executable = match self.env.executable().await {
            Ok(path) => path,
            // Inert: no browser launch is attempted before init completes.
            Err(e) => return ValidationResult::failed(e.to_string(), started.elapsed()),
        };

        self.env.begin_session(&request.session_id);
        let result = self.run(request, &executable, started).await;
        self.env.end_session(&request.session_id);

        result.unwrap_or_else(|e| ValidationResult::failed(e.to_string(), started.elapsed()))
    }
}
