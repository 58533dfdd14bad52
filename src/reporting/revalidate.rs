use chrono::Utc;
use tracing::{debug, info};

use crate::models::{FindingRecord, ProofReport, ReportEntry, ValidationResult};
use crate::validator::Dispatcher;

/// Re-validate a saved finding collection and assemble a standalone proof
/// report. Runs offline, after a scan: each finding's crafted URL is opened
/// fresh, so only still-reproducible executions count as valid. Records that
/// are not verified XSS claims are never dispatched and count as invalid.
pub async fn revalidate_findings(
    dispatcher: &Dispatcher,
    findings: &[FindingRecord],
) -> ProofReport {
    let mut results = Vec::with_capacity(findings.len());
    let mut valid = 0usize;

    for finding in findings {
        if !finding.is_verified_xss() {
            debug!(
                url = %finding.data,
                finding_type = %finding.finding_type,
                "Skipping non-XSS finding"
            );
            results.push(skipped_entry(finding));
            continue;
        }

        let result = dispatcher
            .validate(&finding.data, finding.payload_or_evidence(), "revalidation")
            .await;
        if result.execution_detected {
            valid += 1;
        }
        results.push(entry_for(&finding.data, &result));
    }

    let report = ProofReport {
        timestamp: Utc::now(),
        total_tested: findings.len(),
        valid_executions: valid,
        invalid_executions: findings.len() - valid,
        results,
    };

    info!(
        total = report.total_tested,
        valid = report.valid_executions,
        invalid = report.invalid_executions,
        "Re-validation complete"
    );

    report
}

fn skipped_entry(finding: &FindingRecord) -> ReportEntry {
    ReportEntry {
        url: finding.data.clone(),
        is_vulnerable: false,
        execution_detected: false,
        execution_type: None,
        screenshot_path: None,
        error: Some(format!(
            "not re-validated: finding type {} is not a verified XSS record",
            finding.finding_type
        )),
    }
}

fn entry_for(url: &str, result: &ValidationResult) -> ReportEntry {
    let proof = result.execution_proofs.first();
    ReportEntry {
        url: url.to_string(),
        is_vulnerable: result.is_vulnerable,
        execution_detected: result.execution_detected,
        execution_type: proof.map(|p| p.execution_type),
        screenshot_path: proof.and_then(|p| p.screenshot_path.clone()),
        error: result.error.clone(),
    }
}
