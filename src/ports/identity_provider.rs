//! Identity provider port.
//!
//! Session issuance lives outside this crate. The provider only turns
//! presented credentials into a [`Caller`] with an owner id and roles.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Caller, Credentials};

/// Resolves the current caller.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidCredentials` for unknown or expired credentials
/// - Return `AuthError::ServiceUnavailable` for transient failures
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Caller, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_provider_is_object_safe() {
        fn _accepts_dyn(_: &dyn IdentityProvider) {}
    }
}
