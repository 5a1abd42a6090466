//! AI Automation Builder
//!
//! Main entry point: wires the generation selector, the optional Home
//! Assistant gateway and the HTTP API together from environment
//! configuration.

mod config;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ab_api::AppState;
use ab_generate::{GenerationSelector, StubLlmGenerator};
use ab_ha_client::HaClient;

use crate::config::{Config, LlmBackend};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting AI Automation Builder");

    let config = Config::from_env()?;

    let selector = Arc::new(build_selector(&config));

    let ha = match &config.ha_token {
        Some(token) => {
            info!(url = %config.ha_url, "Home Assistant token is available");
            Some(Arc::new(HaClient::new(&config.ha_url, token)?))
        }
        None => {
            warn!("Home Assistant token is not available, running in limited mode");
            None
        }
    };

    let state = AppState { selector, ha };
    let addr = format!("0.0.0.0:{}", config.port);
    ab_api::start_server(state, &addr).await?;

    Ok(())
}

/// Attach the configured generation backend. A backend that fails to load
/// degrades the service to template-only generation instead of aborting.
fn build_selector(config: &Config) -> GenerationSelector {
    match &config.llm_backend {
        LlmBackend::Disabled => {
            info!("LLM disabled by configuration");
            GenerationSelector::template_only()
        }
        LlmBackend::Stub {
            model_dir,
            model_name,
        } => match StubLlmGenerator::load(model_dir, model_name) {
            Ok(generator) => {
                info!(model = %model_name, "LLM backend initialized (stub, no inference)");
                GenerationSelector::with_backend(Box::new(generator))
            }
            Err(error) => {
                warn!(%error, "LLM initialization failed, using template-based generation");
                GenerationSelector::template_only()
            }
        },
    }
}
