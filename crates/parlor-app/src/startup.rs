//! Startup wiring: config, completion client, transcript writer, controller.

use std::sync::Arc;

use parlor_ai::{
    AzureConfig, AzureOpenAiClient, CompletionOutcome, Presenter, SessionController,
    SessionSettings,
};
use parlor_common::{ParlorError, Result};
use parlor_config::ParlorConfig;
use parlor_platform::TranscriptWriter;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use crate::cli::Args;

/// Load the config file, falling back to defaults, then apply environment
/// overrides. Returns the config plus a notice for the user if the file
/// could not be used.
pub fn load_config(args: &Args) -> (ParlorConfig, Option<String>) {
    if let Some(ref path) = args.config {
        info!("Using config override: {}", path.display());
    }
    let (mut config, notice) = match parlor_config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => {
            warn!("Config load failed, using defaults: {e}");
            (
                ParlorConfig::default(),
                Some(format!("Config could not be loaded ({e}); using defaults.")),
            )
        }
    };
    parlor_config::env::apply_env_overrides(&mut config);
    (config, notice)
}

/// Notice listing settings still at their placeholder values, if any.
pub fn placeholder_notice(config: &ParlorConfig) -> Option<String> {
    let fields = config.api.placeholder_fields();
    if fields.is_empty() {
        return None;
    }
    warn!(?fields, "endpoint settings are placeholders");
    Some(format!(
        "Not configured: {}. Set them in the config file or via {}, {}, {}.",
        fields.join(", "),
        parlor_config::env::ENV_API_KEY,
        parlor_config::env::ENV_ENDPOINT,
        parlor_config::env::ENV_DEPLOYMENT,
    ))
}

pub fn session_settings(config: &ParlorConfig) -> SessionSettings {
    SessionSettings::new(config.api.deployment.clone())
        .with_max_output_tokens(config.generation.max_output_tokens)
        .with_system_prompt(config.generation.system_prompt.clone())
        .with_file_prefix(config.storage.file_prefix.clone())
}

pub fn transcript_writer(args: &Args, config: &ParlorConfig) -> Result<TranscriptWriter> {
    let override_dir = args
        .transcript_dir
        .as_deref()
        .or(config.storage.transcript_dir.as_deref());
    let dir = parlor_platform::transcript_dir(override_dir)?;
    info!("Transcripts in {}", dir.display());
    Ok(TranscriptWriter::new(
        dir,
        config.storage.latest_session_file.clone(),
    ))
}

pub fn completion_client(config: &ParlorConfig) -> Result<AzureOpenAiClient> {
    let azure = AzureConfig::new(config.api.api_key.clone(), config.api.endpoint.clone())
        .with_api_version(config.api.api_version.clone());
    AzureOpenAiClient::new(azure).map_err(|e| ParlorError::Ai(e.to_string()))
}

/// Build the session controller against the Azure endpoint.
pub fn build_session(
    args: &Args,
    config: &ParlorConfig,
    presenter: Box<dyn Presenter>,
    runtime: Handle,
) -> Result<(SessionController, UnboundedReceiver<CompletionOutcome>)> {
    let client = completion_client(config)?;
    let writer = transcript_writer(args, config)?;
    Ok(SessionController::new(
        session_settings(config),
        Arc::new(client),
        writer,
        presenter,
        runtime,
    ))
}
