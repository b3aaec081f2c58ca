//! Scripted identity provider.

use super::{AuthUser, IdentityProvider, Session};
use crate::utils::{Error, Result};
use async_trait::async_trait;
use std::sync::Mutex;

pub struct FakeIdentity {
    session: Session,
    next_failure: Mutex<Option<String>>,
    sign_outs: Mutex<usize>,
}

impl FakeIdentity {
    pub fn new(uid: &str) -> Self {
        Self {
            session: Session {
                user: AuthUser {
                    uid: uid.to_string(),
                    display_name: Some("Bob Smith".to_string()),
                    photo_url: None,
                    email: Some("bob@example.com".to_string()),
                },
                id_token: format!("token-{uid}"),
            },
            next_failure: Mutex::new(None),
            sign_outs: Mutex::new(0),
        }
    }

    /// Makes the next sign-in fail with `message`.
    pub fn fail_next(&self, message: &str) {
        *self.next_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn sign_outs(&self) -> usize {
        *self.sign_outs.lock().unwrap()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_in_with_popup(&self) -> Result<Session> {
        match self.next_failure.lock().unwrap().take() {
            Some(message) => Err(Error::new(message)),
            None => Ok(self.session.clone()),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        *self.sign_outs.lock().unwrap() += 1;
        Ok(())
    }
}
