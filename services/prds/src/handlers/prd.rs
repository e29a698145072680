use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prdgen_domain::id::OwnerId;
use prdgen_domain::project::PageOutline;
use prdgen_domain::tech_stack::TechStackInput;
use prdgen_identity::Identity;

use crate::domain::types::{Prd, PrdDetail, PrdSummary, StoredPage};
use crate::error::PrdServiceError;
use crate::state::AppState;
use crate::usecase::prd::{
    CreatePrdInput, CreatePrdUseCase, DeletePrdUseCase, GetPrdUseCase, ListPrdsUseCase,
    UpdatePrdContentUseCase,
};

/// A page as submitted by clients. A missing name is treated as blank.
#[derive(Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub functions: Vec<String>,
}

impl From<PageRequest> for PageOutline {
    fn from(page: PageRequest) -> Self {
        Self {
            name: page.name.unwrap_or_default(),
            functions: page.functions,
        }
    }
}

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrdRecordResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub content: Option<String>,
    pub published: bool,
    pub user_id: String,
    #[serde(serialize_with = "prdgen_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "prdgen_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Prd> for PrdRecordResponse {
    fn from(prd: Prd) -> Self {
        Self {
            id: prd.id,
            title: prd.title,
            description: prd.description,
            tech_stack: prd.tech_stack.into_vec(),
            content: prd.content,
            published: prd.published,
            user_id: prd.user_id,
            created_at: prd.created_at,
            updated_at: prd.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFunctionResponse {
    pub id: String,
    pub name: String,
    pub page_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPageResponse {
    pub id: String,
    pub name: String,
    pub prd_id: String,
    pub functions: Vec<CreatedFunctionResponse>,
}

impl From<StoredPage> for CreatedPageResponse {
    fn from(page: StoredPage) -> Self {
        Self {
            id: page.id,
            name: page.name,
            prd_id: page.prd_id,
            functions: page
                .functions
                .into_iter()
                .map(|f| CreatedFunctionResponse {
                    id: f.id,
                    name: f.name,
                    page_id: f.page_id,
                })
                .collect(),
        }
    }
}

/// Full aggregate as returned by the create endpoints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPrdResponse {
    #[serde(flatten)]
    pub prd: PrdRecordResponse,
    pub pages: Vec<CreatedPageResponse>,
    pub skipped_pages: Vec<usize>,
}

impl CreatedPrdResponse {
    pub fn new(detail: PrdDetail, skipped_pages: Vec<usize>) -> Self {
        Self {
            prd: detail.prd.into(),
            pages: detail.pages.into_iter().map(Into::into).collect(),
            skipped_pages,
        }
    }
}

#[derive(Serialize)]
pub struct FunctionResponse {
    pub id: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct PageResponse {
    pub id: String,
    pub name: String,
    pub functions: Vec<FunctionResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrdDetailResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    /// Empty string when no content was ever stored.
    pub content: String,
    pub published: bool,
    pub user_id: String,
    #[serde(serialize_with = "prdgen_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "prdgen_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    pub pages: Vec<PageResponse>,
}

impl From<PrdDetail> for PrdDetailResponse {
    fn from(detail: PrdDetail) -> Self {
        let prd = detail.prd;
        Self {
            id: prd.id,
            title: prd.title,
            description: prd.description,
            tech_stack: prd.tech_stack.into_vec(),
            content: prd.content.unwrap_or_default(),
            published: prd.published,
            user_id: prd.user_id,
            created_at: prd.created_at,
            updated_at: prd.updated_at,
            pages: detail
                .pages
                .into_iter()
                .map(|page| PageResponse {
                    id: page.id,
                    name: page.name,
                    functions: page
                        .functions
                        .into_iter()
                        .map(|f| FunctionResponse {
                            id: f.id,
                            name: f.name,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrdSummaryResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    #[serde(serialize_with = "prdgen_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "prdgen_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<PrdSummary> for PrdSummaryResponse {
    fn from(s: PrdSummary) -> Self {
        Self {
            id: s.id,
            title: s.title,
            description: s.description,
            tech_stack: s.tech_stack.into_vec(),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

// ── POST /prds ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrdRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<TechStackInput>,
    #[serde(default)]
    pub pages: Vec<PageRequest>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

pub async fn create_prd(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreatePrdRequest>,
) -> Result<(StatusCode, Json<CreatedPrdResponse>), PrdServiceError> {
    let owner = body
        .user_id
        .as_deref()
        .and_then(OwnerId::parse)
        .ok_or(PrdServiceError::MissingUserId)?;
    if owner != identity.owner {
        return Err(PrdServiceError::Forbidden);
    }
    let usecase = CreatePrdUseCase {
        repo: state.prd_repo(),
    };
    let created = usecase
        .execute(
            &owner,
            CreatePrdInput {
                title: body.title,
                description: body.description,
                tech_stack: body.tech_stack,
                content: body.content,
                pages: body.pages.into_iter().map(Into::into).collect(),
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPrdResponse::new(created.detail, created.skipped_pages)),
    ))
}

// ── GET /prds ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListPrdsQuery {
    pub q: Option<String>,
}

pub async fn list_prds(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ListPrdsQuery>,
) -> Result<Json<Vec<PrdSummaryResponse>>, PrdServiceError> {
    let usecase = ListPrdsUseCase {
        repo: state.prd_repo(),
    };
    let prds = usecase
        .execute(&identity.owner, query.q.as_deref())
        .await?;
    Ok(Json(prds.into_iter().map(Into::into).collect()))
}

// ── GET /prds/{id} ───────────────────────────────────────────────────────────

pub async fn get_prd(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PrdDetailResponse>, PrdServiceError> {
    let usecase = GetPrdUseCase {
        repo: state.prd_repo(),
    };
    let detail = usecase.execute(&id, &identity.owner).await?;
    Ok(Json(detail.into()))
}

// ── PATCH /prds/{id} ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePrdContentRequest {
    pub content: String,
}

pub async fn update_prd_content(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePrdContentRequest>,
) -> Result<Json<PrdRecordResponse>, PrdServiceError> {
    let usecase = UpdatePrdContentUseCase {
        repo: state.prd_repo(),
    };
    let prd = usecase.execute(&id, &identity.owner, &body.content).await?;
    Ok(Json(prd.into()))
}

// ── DELETE /prds/{id} ────────────────────────────────────────────────────────

pub async fn delete_prd(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PrdRecordResponse>, PrdServiceError> {
    let usecase = DeletePrdUseCase {
        repo: state.prd_repo(),
    };
    let prd = usecase.execute(&id, &identity.owner).await?;
    Ok(Json(prd.into()))
}
