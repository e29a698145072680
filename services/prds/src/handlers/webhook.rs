use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;

use crate::error::PrdServiceError;
use crate::infra::webhook::{SvixHeaders, parse_identity_event};
use crate::state::AppState;
use crate::usecase::identity::SyncIdentityUseCase;

// ── POST /webhooks/identity ──────────────────────────────────────────────────

pub async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, PrdServiceError> {
    let verifier = state.webhook_verifier()?;
    let svix = SvixHeaders::from_header_map(&headers).ok_or(PrdServiceError::InvalidSignature)?;
    if !verifier.verify(&svix, &body, Utc::now()) {
        tracing::warn!(message_id = %svix.id, "rejected identity webhook with bad signature");
        return Err(PrdServiceError::InvalidSignature);
    }

    let event = parse_identity_event(&body)?;
    let usecase = SyncIdentityUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(event).await?;
    Ok(StatusCode::NO_CONTENT)
}
