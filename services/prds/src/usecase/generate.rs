use prdgen_domain::id::OwnerId;
use prdgen_domain::project::{ProjectBrief, RawBrief};

use crate::domain::prompt::{compile_prompt, missing_placeholders};
use crate::domain::repository::{PrdRepository, PromptTemplateSource, TextGenerator};
use crate::domain::types::{NewPrd, PrdDetail};
use crate::error::PrdServiceError;

/// Validate a raw brief and compile it against the current template.
async fn compile<T: PromptTemplateSource>(
    templates: &T,
    raw: RawBrief,
) -> Result<(ProjectBrief, String), PrdServiceError> {
    let brief = ProjectBrief::validate(raw)?;
    let template = templates.load().await?;
    let missing = missing_placeholders(&template);
    if !missing.is_empty() {
        tracing::warn!(?missing, "prompt template lacks placeholders");
    }
    let prompt = compile_prompt(&template, &brief);
    Ok((brief, prompt))
}

// ── GenerateContent ──────────────────────────────────────────────────────────

pub struct GenerateContentUseCase<T: PromptTemplateSource, G: TextGenerator> {
    pub templates: T,
    pub generator: G,
}

impl<T: PromptTemplateSource, G: TextGenerator> GenerateContentUseCase<T, G> {
    /// Produce PRD text for a brief without persisting anything.
    pub async fn execute(&self, raw: RawBrief) -> Result<String, PrdServiceError> {
        let (_, prompt) = compile(&self.templates, raw).await?;
        self.generator.generate(&prompt).await
    }
}

// ── GenerateAndCreatePrd ─────────────────────────────────────────────────────

pub struct GenerateAndCreatePrdUseCase<T, G, R>
where
    T: PromptTemplateSource,
    G: TextGenerator,
    R: PrdRepository,
{
    pub templates: T,
    pub generator: G,
    pub repo: R,
}

impl<T, G, R> GenerateAndCreatePrdUseCase<T, G, R>
where
    T: PromptTemplateSource,
    G: TextGenerator,
    R: PrdRepository,
{
    /// Generate content for a brief, then store the brief and content as one aggregate.
    ///
    /// Nothing is written unless generation succeeds. A store failure after generation
    /// discards the content and is reported to the caller.
    pub async fn execute(
        &self,
        owner: &OwnerId,
        raw: RawBrief,
    ) -> Result<PrdDetail, PrdServiceError> {
        let (brief, prompt) = compile(&self.templates, raw).await?;

        let content = self
            .generator
            .generate(&prompt)
            .await
            .inspect_err(|e| {
                tracing::warn!(owner_id = %owner, error = %e, "generation failed, nothing stored");
            })?;

        let new = NewPrd::new(
            owner.clone(),
            brief.title,
            Some(brief.description),
            brief.tech_stack,
            Some(content),
            brief.pages,
        );
        let detail = self.repo.create(&new).await.inspect_err(|e| {
            tracing::error!(
                owner_id = %owner,
                error = %e,
                content_len = new.content.as_ref().map_or(0, String::len),
                "storing generated prd failed, content discarded"
            );
        })?;

        tracing::info!(
            prd_id = %detail.prd.id,
            owner_id = %owner,
            pages = detail.pages.len(),
            functions = new.function_count(),
            "generated prd stored"
        );
        Ok(detail)
    }
}
