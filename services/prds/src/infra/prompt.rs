use std::path::PathBuf;

use crate::domain::repository::PromptTemplateSource;
use crate::error::PrdServiceError;

/// Reads the prompt template from disk on every call, so edits apply without a restart.
#[derive(Clone)]
pub struct FilePromptTemplate {
    pub path: PathBuf,
}

impl PromptTemplateSource for FilePromptTemplate {
    async fn load(&self) -> Result<String, PrdServiceError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PrdServiceError::Configuration(format!(
                "prompt template {} is unreadable: {e}",
                self.path.display()
            ))
        })
    }
}
