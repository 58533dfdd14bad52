use console::style;

use crate::errors::XsProofError;
use crate::models::ValidationResult;

/// Print a validation result: machine-readable JSON on request, otherwise a
/// short human summary.
pub fn print_result(result: &ValidationResult, json: bool) -> Result<(), XsProofError> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if result.execution_detected {
        println!("{}", style("EXECUTION CONFIRMED").green().bold());
        for proof in &result.execution_proofs {
            println!("  type:     {}", proof.execution_type.as_str());
            println!("  evidence: {}", proof.evidence);
            if let Some(path) = &proof.screenshot_path {
                println!("  proof:    {}", path.display());
            }
        }
    } else if let Some(error) = &result.error {
        println!("{}: {}", style("validation failed").yellow(), error);
    } else {
        println!("{}", style("no execution detected").dim());
    }
    println!("  duration: {:.2}s", result.duration.as_secs_f64());

    Ok(())
}
