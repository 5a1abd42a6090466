//! Stub LLM backend
//!
//! Stands in for a local-model integration. No inference happens: the stub
//! only reproduces the original model-loading ritual (model directory,
//! placeholder file) and then answers with the keyword engine. A real
//! integration replaces this type behind the [`Generator`] trait.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ab_automation::Automation;
use tracing::{debug, warn};

use crate::rules::keyword_automation;
use crate::{GenerateError, Generator};

const PLACEHOLDER_CONTENT: &str = "PLACEHOLDER MODEL FILE";

/// Generation backend that pretends to host a local model
pub struct StubLlmGenerator {
    model_path: PathBuf,
}

impl StubLlmGenerator {
    /// "Load" the named model from `model_dir`, creating the directory and
    /// a placeholder model file when missing.
    pub fn load(model_dir: impl AsRef<Path>, model_name: &str) -> io::Result<Self> {
        let model_dir = model_dir.as_ref();
        fs::create_dir_all(model_dir)?;

        let model_path = model_dir.join(model_name);
        if !model_path.exists() {
            fs::write(&model_path, PLACEHOLDER_CONTENT)?;
            warn!(
                model = %model_path.display(),
                "model file not found, created a placeholder; no inference will occur"
            );
        }

        debug!(model = %model_path.display(), "stub LLM backend ready");
        Ok(Self { model_path })
    }

    /// Path of the (placeholder) model file
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Generator for StubLlmGenerator {
    fn generate(&self, description: &str) -> Result<Automation, GenerateError> {
        // Real inference would prompt the model and parse its YAML output
        // here; the stub answers with the keyword engine instead.
        debug!(model = %self.model_path.display(), "generating via stub backend");
        Ok(keyword_automation(description))
    }
}
