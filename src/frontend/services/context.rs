//! Authentication context and state management.

use crate::backend::identity::{AuthUser, IdentityProvider};
use crate::backend::store::DocumentStore;
use crate::frontend::services::username::load_username;
use crate::utils::Result;
use dioxus::prelude::*;
use std::sync::Arc;

/// Handles to the identity provider and the document store.
#[derive(Clone)]
pub struct Backend {
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn DocumentStore>,
}

/// A completed sign-in: the user, and their username if the profile could be read.
#[derive(Debug)]
pub struct SignedIn {
    pub user: AuthUser,
    pub username: Result<Option<String>>,
}

/// Runs the provider's sign-in flow, authorizes the store and reads the
/// user's profile. Only a failed sign-in is an error here.
pub async fn open_session(backend: &Backend) -> Result<SignedIn> {
    let session = backend.identity.sign_in_with_popup().await?;
    backend.store.set_auth_token(Some(session.id_token));
    let username = load_username(backend.store.as_ref(), &session.user.uid).await;
    Ok(SignedIn {
        user: session.user,
        username,
    })
}

/// Signs out with the provider and drops the store's token.
pub async fn close_session(backend: &Backend) -> Result<()> {
    backend.identity.sign_out().await?;
    backend.store.set_auth_token(None);
    Ok(())
}

#[derive(Clone, Copy)]
pub struct AuthState {
    pub user: Signal<Option<AuthUser>>,
    pub username: Signal<Option<String>>,
}

impl AuthState {
    /// Signs in and publishes the user together with their username.
    ///
    /// Both signals change only after every request finished, so the page
    /// never shows the username form for a user who already has one. A failed
    /// profile read still signs the user in and is returned as the error.
    pub async fn sign_in(&mut self, backend: &Backend) -> Result<()> {
        let SignedIn { user, username } = open_session(backend).await?;
        let (username, profile_error) = match username {
            Ok(username) => (username, None),
            Err(e) => (None, Some(e)),
        };
        self.username.set(username);
        self.user.set(Some(user));
        profile_error.map_or(Ok(()), Err)
    }

    /// Ends the session.
    pub async fn sign_out(&mut self, backend: &Backend) -> Result<()> {
        close_session(backend).await?;
        self.user.set(None);
        self.username.set(None);
        Ok(())
    }
}
