use std::path::Path;
use crate::errors::XsProofError;
use super::types::BrowserConfig;

/// Load a browser validation config from a YAML file.
pub async fn parse_config(path: &Path) -> Result<BrowserConfig, XsProofError> {
    if !path.exists() {
        return Err(XsProofError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(XsProofError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: BrowserConfig = serde_yaml::from_str(&content)?;

    Ok(config)
}
