use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use xsproof::models::{
    ExecutionProof, ExecutionType, FindingRecord, ValidationResult,
};
use xsproof::reporting::revalidate_findings;
use xsproof::validator::{Dispatcher, ValidationBackend, ValidationRequest};

/// Deterministic stand-in for a browser: URLs containing "vuln" are reported
/// as confirmed alert executions, everything else as clean.
struct FakeBrowser;

#[async_trait]
impl ValidationBackend for FakeBrowser {
    async fn validate(&self, request: &ValidationRequest) -> ValidationResult {
        if request.url.contains("vuln") {
            let proof = ExecutionProof::new(
                &request.payload,
                ExecutionType::Alert,
                "xss".into(),
                request.url.clone(),
                request.context_label.clone(),
            );
            ValidationResult::confirmed(proof, Duration::from_millis(50))
        } else {
            ValidationResult::clean(Duration::from_millis(50))
        }
    }
}

/// Confirms every request it sees and counts how often it was asked.
struct EagerBrowser {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ValidationBackend for EagerBrowser {
    async fn validate(&self, request: &ValidationRequest) -> ValidationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let proof = ExecutionProof::new(
            &request.payload,
            ExecutionType::Alert,
            "xss".into(),
            request.url.clone(),
            request.context_label.clone(),
        );
        ValidationResult::confirmed(proof, Duration::from_millis(50))
    }
}

fn findings_fixture() -> Vec<FindingRecord> {
    serde_json::from_str(
        r#"[
            {"type":"V","data":"http://target/vuln?q=x","payload":"<script>alert(1)</script>","message_str":"Triggered XSS"},
            {"type":"R","data":"http://target/clean?q=x","evidence":"<b>reflected</b>","message_str":"Reflected only"},
            {"type":"V","data":"http://target/vuln2","payload":"<svg onload=alert(2)>","message_str":""}
        ]"#,
    )
    .unwrap()
}

#[tokio::test]
async fn report_counts_valid_and_invalid_executions() {
    let dispatcher = Dispatcher::with_backend(Box::new(FakeBrowser));
    let findings = findings_fixture();

    let report = revalidate_findings(&dispatcher, &findings).await;

    assert_eq!(report.total_tested, 3);
    assert_eq!(report.valid_executions, 2);
    assert_eq!(report.invalid_executions, 1);
    assert_eq!(report.results.len(), 3);

    assert!(report.results[0].execution_detected);
    assert_eq!(report.results[0].execution_type, Some(ExecutionType::Alert));
    assert!(!report.results[1].execution_detected);
    assert!(report.results[1].execution_type.is_none());
    assert!(report.results[1]
        .error
        .as_deref()
        .unwrap()
        .contains("not re-validated"));
}

#[tokio::test]
async fn non_xss_records_never_reach_the_backend() {
    let calls = Arc::new(AtomicUsize::new(0));
    let dispatcher = Dispatcher::with_backend(Box::new(EagerBrowser {
        calls: calls.clone(),
    }));
    // Reflected-only record; the backend would confirm it if it were asked.
    let findings: Vec<FindingRecord> = serde_json::from_str(
        r#"[{"type":"R","data":"http://target/vuln?q=x","evidence":"<b>reflected</b>"}]"#,
    )
    .unwrap();

    let report = revalidate_findings(&dispatcher, &findings).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.total_tested, 1);
    assert_eq!(report.valid_executions, 0);
    assert_eq!(report.invalid_executions, 1);
    assert!(!report.results[0].execution_detected);
    assert!(!report.results[0].is_vulnerable);
}

#[tokio::test]
async fn report_round_trips_through_the_external_shape() {
    let dispatcher = Dispatcher::with_backend(Box::new(FakeBrowser));
    let report = revalidate_findings(&dispatcher, &findings_fixture()).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("proof_report.json");
    std::fs::write(&path, serde_json::to_string_pretty(&report).unwrap()).unwrap();

    // An offline consumer reads the camelCase shape without modification.
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["totalTested"], 3);
    assert_eq!(raw["validExecutions"], 2);
    assert_eq!(raw["invalidExecutions"], 1);
    assert_eq!(raw["results"][0]["isVulnerable"], true);
    assert_eq!(raw["results"][0]["executionType"], "alert");
    assert!(raw["timestamp"].is_string());
}
