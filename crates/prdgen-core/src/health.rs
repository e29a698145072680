use axum::http::StatusCode;

/// `GET /healthz`: reports the process is up. Each service supplies its own readiness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
