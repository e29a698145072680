//! Mock identity helpers for integration tests.
//!
//! Services behind the gateway receive the `x-prdgen-user-id` header injected by the
//! gateway. In tests, `MockAuth` produces that header directly so no identity
//! provider is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use prdgen_identity::IDENTITY_HEADER;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: String,
}

impl MockAuth {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn header_name() -> HeaderName {
        HeaderName::from_static(IDENTITY_HEADER)
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.user_id).unwrap()
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(Self::header_name(), self.header_value());
        map
    }
}
