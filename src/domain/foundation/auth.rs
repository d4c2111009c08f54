//! Caller identity types for the domain layer.
//!
//! The identity provider is an external collaborator: it authenticates a
//! request and hands back a [`Caller`] (owner id + role set). Handlers
//! trust that value and only ask yes/no role questions of it.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashSet;
use thiserror::Error;

use super::UserId;

/// Capabilities a caller may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// May read their own content lists and counts.
    View,
    /// May create and delete their own content.
    Mutate,
}

/// Authenticated caller: the owner id that scopes every operation, plus roles.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: UserId,
    roles: HashSet<Role>,
}

impl Caller {
    /// Creates a caller with the given roles.
    pub fn new(user_id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
        }
    }

    /// Caller holding both view and mutate roles.
    pub fn owner(user_id: UserId) -> Self {
        Self::new(user_id, [Role::View, Role::Mutate])
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn can_mutate(&self) -> bool {
        self.has_role(Role::Mutate)
    }

    pub fn can_view(&self) -> bool {
        self.has_role(Role::View)
    }
}

/// Opaque credentials presented by the request layer (session token, API key).
#[derive(Clone)]
pub struct Credentials(SecretString);

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    /// Exposes the raw token to the identity adapter.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials([REDACTED])")
    }
}

/// Authentication errors returned by the identity provider.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No identity could be established for the request.
    #[error("Invalid or expired credentials")]
    InvalidCredentials,

    /// The identity service is unavailable.
    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[test]
    fn owner_caller_can_view_and_mutate() {
        let caller = Caller::owner(user());
        assert!(caller.can_view());
        assert!(caller.can_mutate());
    }

    #[test]
    fn viewer_cannot_mutate() {
        let caller = Caller::new(user(), [Role::View]);
        assert!(caller.can_view());
        assert!(!caller.can_mutate());
    }

    #[test]
    fn credentials_debug_redacts_token() {
        let creds = Credentials::new("super-secret");
        assert_eq!(format!("{:?}", creds), "Credentials([REDACTED])");
        assert_eq!(creds.expose(), "super-secret");
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(
            format!("{}", err),
            "Identity service unavailable: Connection refused"
        );
    }
}
