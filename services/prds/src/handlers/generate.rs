use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use prdgen_domain::project::RawBrief;
use prdgen_domain::tech_stack::TechStackInput;
use prdgen_identity::Identity;

use crate::error::PrdServiceError;
use crate::handlers::prd::{CreatedPrdResponse, PageRequest};
use crate::state::AppState;
use crate::usecase::generate::{GenerateAndCreatePrdUseCase, GenerateContentUseCase};

/// Project brief as submitted for generation. Every field is validated strictly.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Option<TechStackInput>,
    #[serde(default)]
    pub pages: Vec<PageRequest>,
}

impl From<GenerateRequest> for RawBrief {
    fn from(body: GenerateRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            tech_stack: body
                .tech_stack
                .unwrap_or(TechStackInput::List(Vec::new())),
            pages: body.pages.into_iter().map(Into::into).collect(),
        }
    }
}

// ── POST /generate ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct GeneratedContentResponse {
    pub content: String,
}

pub async fn generate_content(
    _identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GeneratedContentResponse>, PrdServiceError> {
    let usecase = GenerateContentUseCase {
        templates: state.prompt_templates(),
        generator: state.generator(),
    };
    let content = usecase.execute(body.into()).await?;
    Ok(Json(GeneratedContentResponse { content }))
}

// ── POST /prds/generate ──────────────────────────────────────────────────────

pub async fn generate_and_create_prd(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<CreatedPrdResponse>), PrdServiceError> {
    let usecase = GenerateAndCreatePrdUseCase {
        templates: state.prompt_templates(),
        generator: state.generator(),
        repo: state.prd_repo(),
    };
    let detail = usecase.execute(&identity.owner, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPrdResponse::new(detail, Vec::new())),
    ))
}
