//! Signed-in user identity.

#[cfg(test)]
pub mod fake;

use crate::utils::Result;
use async_trait::async_trait;

/// The user as reported by the identity provider. Read-only for us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
}

/// A signed-in user and the token that authorizes document requests.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: AuthUser,
    pub id_token: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Runs the interactive sign-in flow.
    async fn sign_in_with_popup(&self) -> Result<Session>;

    async fn sign_out(&self) -> Result<()>;
}
