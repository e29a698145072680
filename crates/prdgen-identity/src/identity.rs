//! Gateway-injected identity header extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use prdgen_domain::id::OwnerId;

/// Header carrying the identity-provider user id of the caller.
pub const IDENTITY_HEADER: &str = "x-prdgen-user-id";

/// Caller identity injected by the gateway via the `x-prdgen-user-id` header.
///
/// Returns 401 if the header is absent, not valid ASCII, or blank.
#[derive(Debug, Clone)]
pub struct Identity {
    pub owner: OwnerId,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Extract synchronously and return a 'static future; axum-core 0.5 declares this
    // as `fn -> impl Future + Send` and an `async fn` would capture `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let owner = parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(OwnerId::parse);

        async move {
            let owner = owner.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { owner })
        }
    }
}
