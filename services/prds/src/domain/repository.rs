#![allow(async_fn_in_trait)]

use prdgen_domain::id::OwnerId;

use crate::domain::types::{NewPrd, Prd, PrdDetail, PrdSummary, User};
use crate::error::PrdServiceError;

/// Repository for PRD aggregates. Every read and write is scoped to an owner.
pub trait PrdRepository: Send + Sync {
    /// Insert the PRD, its pages and their functions atomically and return the stored aggregate.
    async fn create(&self, prd: &NewPrd) -> Result<PrdDetail, PrdServiceError>;

    async fn find(&self, id: &str, owner: &OwnerId) -> Result<Option<PrdDetail>, PrdServiceError>;

    /// Newest-updated first. `title_filter` is a case-insensitive substring match.
    async fn list(
        &self,
        owner: &OwnerId,
        title_filter: Option<&str>,
    ) -> Result<Vec<PrdSummary>, PrdServiceError>;

    /// Replace the content and bump `updated_at`. `None` if no such PRD for this owner.
    async fn update_content(
        &self,
        id: &str,
        owner: &OwnerId,
        content: &str,
    ) -> Result<Option<Prd>, PrdServiceError>;

    /// Remove the PRD with all its pages and functions. Returns the deleted record.
    async fn delete(&self, id: &str, owner: &OwnerId) -> Result<Option<Prd>, PrdServiceError>;
}

/// Repository for owner records synced from the identity provider.
pub trait UserRepository: Send + Sync {
    async fn upsert(&self, user: &User) -> Result<(), PrdServiceError>;

    /// Delete the user and everything they own. Returns `true` if a row was deleted.
    async fn delete(&self, id: &str) -> Result<bool, PrdServiceError>;
}

/// Source of the PRD prompt template.
pub trait PromptTemplateSource: Send + Sync {
    async fn load(&self) -> Result<String, PrdServiceError>;
}

/// Language-model completion port.
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, PrdServiceError>;
}
