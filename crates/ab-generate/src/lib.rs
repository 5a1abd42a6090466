//! Description-to-automation generation
//!
//! Two generation paths share one entry point: an optional LLM-backed
//! [`Generator`] and the deterministic keyword template engine. The
//! [`GenerationSelector`] prefers the backend when one is attached and
//! falls back to the template engine on any generation error, so callers
//! always receive a valid [`ab_automation::Automation`].

mod llm;
mod rules;
mod selector;
mod template;

use ab_automation::Automation;
use thiserror::Error;

pub use llm::StubLlmGenerator;
pub use rules::{apply_rules, keyword_automation};
pub use selector::GenerationSelector;
pub use template::base_automation;

/// Errors a generation backend can report
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The backend itself failed (model error, timeout, ...)
    #[error("generation backend error: {0}")]
    Backend(String),

    /// The backend produced output that does not parse as an automation
    #[error("backend produced malformed automation: {0}")]
    MalformedOutput(#[from] serde_yaml::Error),
}

/// A generation backend capability
///
/// Implementations turn a free-text description into an automation. A real
/// LLM integration slots in behind this trait without touching the selector
/// or the web layer.
pub trait Generator: Send + Sync {
    fn generate(&self, description: &str) -> Result<Automation, GenerateError>;
}
