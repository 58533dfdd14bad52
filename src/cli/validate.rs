use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::browser::Environment;
use crate::config::{parse_config, BackendKind, BrowserConfig};
use crate::errors::XsProofError;
use crate::validator::Dispatcher;
use super::commands::{StoredArgs, ValidateArgs};
use super::output::print_result;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), XsProofError> {
    let (env, dispatcher) = build_dispatcher(args.config.as_deref()).await?;

    let result = dispatcher
        .validate(&args.url, &args.payload, &args.context)
        .await;

    print_result(&result, args.json)?;
    env.shutdown().await;
    Ok(())
}

pub async fn handle_stored(args: StoredArgs) -> Result<(), XsProofError> {
    let (env, dispatcher) = build_dispatcher(args.config.as_deref()).await?;

    let session_id = args
        .session_id
        .unwrap_or_else(|| format!("session_{}", Uuid::new_v4().simple()));
    let result = dispatcher.verify_stored(&args.url, &session_id).await;

    print_result(&result, args.json)?;
    env.shutdown().await;
    Ok(())
}

pub(super) async fn build_dispatcher(
    config_path: Option<&str>,
) -> Result<(Arc<Environment>, Dispatcher), XsProofError> {
    let config = match config_path {
        Some(path) => parse_config(Path::new(path)).await?,
        None => BrowserConfig::default(),
    };

    let env = Environment::new(config);
    // The scripted backend runs its own browser out of process; only the
    // embedded driver needs a local chromium resolved up front.
    if matches!(env.config().backend, BackendKind::Embedded) {
        env.init().await?;
    }

    let dispatcher = Dispatcher::from_environment(env.clone());
    Ok((env, dispatcher))
}
