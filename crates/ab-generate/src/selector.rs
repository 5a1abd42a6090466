//! Backend selection and fallback
//!
//! The selector owns an optional generation backend. Backend failures are
//! recovered per request by the keyword engine and never reach the caller,
//! so `generate` is infallible.

use ab_automation::Automation;
use tracing::warn;

use crate::rules::keyword_automation;
use crate::Generator;

/// Chooses between an attached generation backend and the keyword engine
pub struct GenerationSelector {
    backend: Option<Box<dyn Generator>>,
}

impl GenerationSelector {
    /// Selector with no backend: every request uses the keyword engine
    pub fn template_only() -> Self {
        Self { backend: None }
    }

    /// Selector that prefers `backend` and falls back on failure
    pub fn with_backend(backend: Box<dyn Generator>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Whether a generation backend is attached
    pub fn llm_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Generate an automation for a description. Always succeeds.
    pub fn generate(&self, description: &str) -> Automation {
        if let Some(backend) = &self.backend {
            match backend.generate(description) {
                Ok(automation) => return automation,
                Err(error) => {
                    warn!(%error, "backend generation failed, falling back to keyword engine");
                }
            }
        }
        keyword_automation(description)
    }
}
