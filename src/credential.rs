//! Bearer-token credentials for the Graph API
//!
//! The transport asks a [`TokenCredential`] for a token before every
//! send, scoped to the Graph resource. How the token is obtained and
//! whether it is cached between sends is entirely up to the
//! implementation; the transport never stores one.

use async_trait::async_trait;

use crate::BoxError;

/// Default token type presented in the `Authorization` header.
pub const BEARER: &str = "Bearer";

/// An access token together with its token type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    access_token: String,
    token_type: Option<String>,
}

impl AccessToken {
    /// Creates a token of the default `Bearer` type.
    pub fn new<T: Into<String>>(access_token: T) -> Self {
        AccessToken {
            access_token: access_token.into(),
            token_type: None,
        }
    }

    /// Sets an explicit token type, overriding the `Bearer` default.
    pub fn token_type<T: Into<String>>(mut self, token_type: T) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    /// The opaque token string.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The `Authorization` header value for this token.
    pub fn authorization(&self) -> String {
        format!(
            "{} {}",
            self.token_type.as_deref().unwrap_or(BEARER),
            self.access_token
        )
    }
}

/// Supplies bearer tokens on demand
///
/// One operation: request a token for a named scope. Implementations
/// must be safe to share between concurrent sends.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Requests a token valid for `scope`.
    async fn token(&self, scope: &str) -> Result<AccessToken, BoxError>;
}

/// A credential wrapping a fixed, externally managed token
///
/// Useful for tests and for callers that refresh tokens themselves.
#[derive(Debug, Clone)]
pub struct StaticTokenCredential {
    token: AccessToken,
}

impl StaticTokenCredential {
    /// Creates a credential that always hands out a `Bearer` token with
    /// the given value.
    pub fn new<T: Into<String>>(access_token: T) -> Self {
        StaticTokenCredential {
            token: AccessToken::new(access_token),
        }
    }
}

impl From<AccessToken> for StaticTokenCredential {
    fn from(token: AccessToken) -> Self {
        StaticTokenCredential { token }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn token(&self, _scope: &str) -> Result<AccessToken, BoxError> {
        Ok(self.token.clone())
    }
}
