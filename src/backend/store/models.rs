//! Document paths, batches and the two record shapes we write.

use crate::simple_error;
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const USERS: &str = "users";
pub const USERNAMES: &str = "usernames";

/// Address of a single document, `collection/id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    collection: &'static str,
    id: String,
}

impl DocPath {
    pub fn new(collection: &'static str, id: impl Into<String>) -> Self {
        Self {
            collection,
            id: id.into(),
        }
    }

    /// Profile record of a user.
    pub fn user(uid: &str) -> Self {
        Self::new(USERS, uid)
    }

    /// Reservation record of a username.
    pub fn username(name: &str) -> Self {
        Self::new(USERNAMES, name)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Profile stored under `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Reservation stored under `usernames/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameReservation {
    pub uid: String,
}

/// Ordered set of document writes that commit together or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    writes: Vec<(DocPath, Value)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or overwrites the document at `path`.
    pub fn set<T: Serialize>(&mut self, path: DocPath, document: &T) -> Result<&mut Self> {
        let value = serde_json::to_value(document)?;
        if !value.is_object() {
            return Err(simple_error!("Document {} must be an object", path));
        }
        self.writes.push((path, value));
        Ok(self)
    }

    pub fn into_writes(self) -> Vec<(DocPath, Value)> {
        self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_render_as_collection_and_id() {
        assert_eq!(DocPath::user("u-1").to_string(), "users/u-1");
        assert_eq!(DocPath::username("bob_smith").to_string(), "usernames/bob_smith");
    }

    #[test]
    fn test_profile_uses_stored_field_names() {
        let profile = UserProfile {
            username: "bob_smith".to_string(),
            display_name: Some("Bob Smith".to_string()),
            photo_url: None,
        };
        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({ "username": "bob_smith", "displayName": "Bob Smith", "photoURL": null })
        );
    }

    #[test]
    fn test_batch_keeps_write_order() {
        let mut batch = WriteBatch::new();
        batch
            .set(DocPath::user("u-1"), &json!({ "username": "bob" }))
            .unwrap()
            .set(DocPath::username("bob"), &UsernameReservation { uid: "u-1".into() })
            .unwrap();

        let paths: Vec<String> = batch.into_writes().iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(paths, ["users/u-1", "usernames/bob"]);
    }

    #[test]
    fn test_batch_rejects_non_object_documents() {
        let mut batch = WriteBatch::new();
        assert!(batch.set(DocPath::username("bob"), &"u-1").is_err());
        assert_eq!(batch, WriteBatch::new());
    }
}
