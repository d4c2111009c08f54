//! Static token identity provider.
//!
//! Maps opaque bearer tokens to callers. Suitable for tests, local
//! development and operator tooling; real session issuance happens
//! upstream.
//!
//! # Example
//!
//! ```ignore
//! let identity = StaticTokenIdentityProvider::new()
//!     .with_token("t-owner", Caller::owner(UserId::new("u1")?))
//!     .with_token("t-viewer", Caller::new(UserId::new("u1")?, [Role::View]));
//! ```

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::{AuthError, Caller, Credentials};
use crate::ports::IdentityProvider;

#[derive(Debug, Default)]
pub struct StaticTokenIdentityProvider {
    tokens: HashMap<String, Caller>,
    force_error: Option<AuthError>,
}

impl StaticTokenIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, caller: Caller) -> Self {
        self.tokens.insert(token.into(), caller);
        self
    }

    /// Makes every authentication fail with `error`.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentityProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Caller, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }
        self.tokens
            .get(credentials.expose())
            .cloned()
            .ok_or(AuthError::InvalidCredentials)
    }
}
