//! Authentication for remote repository access.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Authentication method for connecting to a remote.
///
/// Anonymous access sends no `Authorization` header; the embedding layer
/// decides whether to attempt unauthenticated listing or to hold off until
/// a token exists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AuthMethod {
    Bearer(String),
    Anonymous,
}

impl Default for AuthMethod {
    fn default() -> Self {
        Self::Anonymous
    }
}

impl AuthMethod {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "bearer-token",
            Self::Anonymous => "anonymous",
        }
    }
}

/// A bearer token with its optional expiry, as persisted across sessions.
///
/// This is the only state that survives a restart; every staged edit is
/// volatile. How the record reaches disk is the caller's concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenRecord {
    /// A token that never expires.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    /// A token valid for `expires_in` seconds from `now`.
    pub fn with_expiry(token: impl Into<String>, expires_in: i64, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: Some(now + Duration::seconds(expires_in)),
        }
    }

    /// Returns `true` if the token has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now,
            None => false,
        }
    }

    /// The auth method this record authorizes.
    pub fn auth_method(&self) -> AuthMethod {
        AuthMethod::Bearer(self.token.clone())
    }
}
