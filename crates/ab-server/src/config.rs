//! Environment-variable configuration
//!
//! The service is configured the add-on way: everything comes from the
//! environment, with defaults suitable for running next to a Home
//! Assistant supervisor.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Which generation backend to attach
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    /// Keyword engine only
    Disabled,

    /// Placeholder backend: loads no real model, answers via the keyword
    /// engine. A real inference backend would be a third variant.
    Stub {
        model_dir: PathBuf,
        model_name: String,
    },
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the API server binds to
    pub port: u16,

    /// Base URL of the Home Assistant instance
    pub ha_url: String,

    /// Long-lived access token; `None` runs the service in demo mode
    pub ha_token: Option<String>,

    /// Generation backend selection
    pub llm_backend: LlmBackend,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `PORT` (default 5001), `HA_URL` (default "http://supervisor/core"),
    /// `HA_TOKEN` (blank counts as absent), `USE_LLM` (default "true"),
    /// `LLM_MODEL` (default "tinyllama.gguf"), `MODEL_DIR` (default
    /// "/data/models").
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("invalid PORT value: {value}"))?,
            Err(_) => 5001,
        };

        let ha_url =
            env::var("HA_URL").unwrap_or_else(|_| "http://supervisor/core".to_string());

        let ha_token = env::var("HA_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let use_llm = env::var("USE_LLM")
            .map(|value| value.to_lowercase() == "true")
            .unwrap_or(true);
        let llm_backend = if use_llm {
            LlmBackend::Stub {
                model_dir: env::var("MODEL_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/data/models")),
                model_name: env::var("LLM_MODEL")
                    .unwrap_or_else(|_| "tinyllama.gguf".to_string()),
            }
        } else {
            LlmBackend::Disabled
        };

        Ok(Self {
            port,
            ha_url,
            ha_token,
            llm_backend,
        })
    }
}
