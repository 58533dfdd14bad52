use thiserror::Error;

#[derive(Debug, Error)]
pub enum XsProofError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Proof storage error: {0}")]
    Storage(String),

    #[error("Backend process error: {0}")]
    Backend(String),

    #[error("Environment not ready: {0}")]
    NotReady(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
