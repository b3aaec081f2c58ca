//! Document store used for profiles and username reservations.

#[cfg(test)]
pub mod memory;
pub mod models;

pub use models::{DocPath, UserProfile, UsernameReservation, WriteBatch};

use crate::utils::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A remote document database addressed by `collection/id` paths.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Whether a document exists at `path`.
    async fn exists(&self, path: &DocPath) -> Result<bool>;

    /// Reads the document at `path` as a JSON object.
    async fn get(&self, path: &DocPath) -> Result<Option<Value>>;

    /// Applies every write of the batch atomically.
    async fn commit(&self, batch: WriteBatch) -> Result<()>;

    /// Sets the bearer token attached to subsequent requests.
    fn set_auth_token(&self, token: Option<String>);
}
