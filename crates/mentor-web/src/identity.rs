use async_trait::async_trait;
use axum::http::HeaderMap;

/// Identity used whenever no provider is configured or resolution fails.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Header set by Hugging Face Spaces (and similar hosts) in front of the
/// service once the visitor has authenticated.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-forwarded-user";

// ---------------------------------------------------------------------------
// IdentityProvider
// ---------------------------------------------------------------------------

/// Optional host-auth capability. `None` from `resolve` means "could not
/// identify this request", not an error.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<String>;
}

/// Reads the username from a trusted proxy header.
pub struct HeaderIdentity {
    header: String,
}

impl HeaderIdentity {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl Default for HeaderIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_HEADER)
    }
}

#[async_trait]
impl IdentityProvider for HeaderIdentity {
    async fn resolve(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(self.header.as_str())?
            .to_str()
            .ok()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
    }
}

/// If an identity capability is configured and succeeds, use its result;
/// otherwise fall back to the fixed anonymous identity.
pub async fn resolve_username(
    provider: Option<&dyn IdentityProvider>,
    headers: &HeaderMap,
) -> String {
    match provider {
        Some(provider) => provider
            .resolve(headers)
            .await
            .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        None => ANONYMOUS_USER.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
