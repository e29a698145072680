use prdgen_domain::id::OwnerId;
use prdgen_domain::project::{PageOutline, validate_title};
use prdgen_domain::tech_stack::{TechStack, TechStackInput};

use crate::domain::repository::PrdRepository;
use crate::domain::types::{CreatedPrd, NewPrd, Prd, PrdDetail, PrdSummary};
use crate::error::PrdServiceError;

// ── CreatePrd ────────────────────────────────────────────────────────────────

pub struct CreatePrdInput {
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Option<TechStackInput>,
    pub content: Option<String>,
    pub pages: Vec<PageOutline>,
}

pub struct CreatePrdUseCase<R: PrdRepository> {
    pub repo: R,
}

impl<R: PrdRepository> CreatePrdUseCase<R> {
    /// Persist a client-assembled PRD. Pages without a name are skipped, not rejected.
    pub async fn execute(
        &self,
        owner: &OwnerId,
        input: CreatePrdInput,
    ) -> Result<CreatedPrd, PrdServiceError> {
        let title = validate_title(&input.title)?;
        let description = input
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        let tech_stack = input.tech_stack.map(TechStack::from).unwrap_or_default();

        let mut pages = Vec::with_capacity(input.pages.len());
        let mut skipped_pages = Vec::new();
        for (index, page) in input.pages.into_iter().enumerate() {
            let name = page.name.trim();
            if name.is_empty() {
                tracing::warn!(title = %title, index, "skipping page without a name");
                skipped_pages.push(index);
                continue;
            }
            pages.push(PageOutline {
                name: name.to_owned(),
                functions: page
                    .functions
                    .into_iter()
                    .map(|f| f.trim().to_owned())
                    .filter(|f| !f.is_empty())
                    .collect(),
            });
        }

        let new = NewPrd::new(
            owner.clone(),
            title,
            description,
            tech_stack,
            input.content,
            pages,
        );
        let detail = self.repo.create(&new).await?;
        tracing::info!(
            prd_id = %detail.prd.id,
            owner_id = %owner,
            pages = detail.pages.len(),
            functions = new.function_count(),
            "prd created"
        );
        Ok(CreatedPrd {
            detail,
            skipped_pages,
        })
    }
}

// ── GetPrd ───────────────────────────────────────────────────────────────────

pub struct GetPrdUseCase<R: PrdRepository> {
    pub repo: R,
}

impl<R: PrdRepository> GetPrdUseCase<R> {
    pub async fn execute(&self, id: &str, owner: &OwnerId) -> Result<PrdDetail, PrdServiceError> {
        self.repo
            .find(id, owner)
            .await?
            .ok_or(PrdServiceError::PrdNotFound)
    }
}

// ── ListPrds ─────────────────────────────────────────────────────────────────

pub struct ListPrdsUseCase<R: PrdRepository> {
    pub repo: R,
}

impl<R: PrdRepository> ListPrdsUseCase<R> {
    pub async fn execute(
        &self,
        owner: &OwnerId,
        query: Option<&str>,
    ) -> Result<Vec<PrdSummary>, PrdServiceError> {
        let filter = query.map(str::trim).filter(|q| !q.is_empty());
        self.repo.list(owner, filter).await
    }
}

// ── UpdatePrdContent ─────────────────────────────────────────────────────────

pub struct UpdatePrdContentUseCase<R: PrdRepository> {
    pub repo: R,
}

impl<R: PrdRepository> UpdatePrdContentUseCase<R> {
    pub async fn execute(
        &self,
        id: &str,
        owner: &OwnerId,
        content: &str,
    ) -> Result<Prd, PrdServiceError> {
        self.repo
            .update_content(id, owner, content)
            .await?
            .ok_or(PrdServiceError::PrdNotFound)
    }
}

// ── DeletePrd ────────────────────────────────────────────────────────────────

pub struct DeletePrdUseCase<R: PrdRepository> {
    pub repo: R,
}

impl<R: PrdRepository> DeletePrdUseCase<R> {
    pub async fn execute(&self, id: &str, owner: &OwnerId) -> Result<Prd, PrdServiceError> {
        let deleted = self
            .repo
            .delete(id, owner)
            .await?
            .ok_or(PrdServiceError::PrdNotFound)?;
        tracing::info!(prd_id = %deleted.id, owner_id = %owner, "prd deleted");
        Ok(deleted)
    }
}
