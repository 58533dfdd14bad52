use crate::errors::XsProofError;
use crate::models::FindingRecord;
use crate::reporting::revalidate_findings;
use super::commands::ReportArgs;
use super::validate::build_dispatcher;

pub async fn handle_report(args: ReportArgs) -> Result<(), XsProofError> {
    let content = tokio::fs::read_to_string(&args.input).await?;
    let findings: Vec<FindingRecord> = serde_json::from_str(&content)?;

    let (env, dispatcher) = build_dispatcher(args.config.as_deref()).await?;
    let report = revalidate_findings(&dispatcher, &findings).await;
    env.shutdown().await;

    let rendered = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => tokio::fs::write(path, rendered).await?,
        None => println!("{}", rendered),
    }

    Ok(())
}
