//! In-memory document store.

use super::{DocPath, DocumentStore, WriteBatch};
use crate::utils::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<DocPath, Value>>,
    reads: Mutex<Vec<DocPath>>,
    commits: Mutex<usize>,
    next_failure: Mutex<Option<String>>,
    token: Mutex<Option<String>>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every read by `latency`, like a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn insert(&self, path: DocPath, document: Value) {
        self.documents.lock().unwrap().insert(path, document);
    }

    pub fn document(&self, path: &DocPath) -> Option<Value> {
        self.documents.lock().unwrap().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    /// Every path read through `exists` or `get`, in order.
    pub fn reads(&self) -> Vec<DocPath> {
        self.reads.lock().unwrap().clone()
    }

    pub fn commits(&self) -> usize {
        *self.commits.lock().unwrap()
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    /// Makes the next read or commit fail with `message`.
    pub fn fail_next(&self, message: &str) {
        *self.next_failure.lock().unwrap() = Some(message.to_string());
    }

    fn take_failure(&self) -> Result<()> {
        match self.next_failure.lock().unwrap().take() {
            Some(message) => Err(Error::new(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn exists(&self, path: &DocPath) -> Result<bool> {
        Ok(self.get(path).await?.is_some())
    }

    async fn get(&self, path: &DocPath) -> Result<Option<Value>> {
        self.reads.lock().unwrap().push(path.clone());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.take_failure()?;
        Ok(self.document(path))
    }

    async fn commit(&self, batch: WriteBatch) -> Result<()> {
        *self.commits.lock().unwrap() += 1;
        self.take_failure()?;
        let mut documents = self.documents.lock().unwrap();
        for (path, document) in batch.into_writes() {
            documents.insert(path, document);
        }
        Ok(())
    }

    fn set_auth_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_commit_applies_all_writes() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch.set(DocPath::user("u-1"), &json!({ "username": "bob" })).unwrap();
        batch.set(DocPath::username("bob"), &json!({ "uid": "u-1" })).unwrap();

        store.commit(batch).await.unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.exists(&DocPath::username("bob")).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_commit_applies_nothing() {
        let store = MemoryStore::new();
        store.fail_next("unavailable");
        let mut batch = WriteBatch::new();
        batch.set(DocPath::user("u-1"), &json!({ "username": "bob" })).unwrap();
        batch.set(DocPath::username("bob"), &json!({ "uid": "u-1" })).unwrap();

        let err = store.commit(batch).await.unwrap_err();

        assert_eq!(err.message(), "unavailable");
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_token_is_stored() {
        let store = MemoryStore::new();
        store.set_auth_token(Some("id-token".to_string()));
        assert_eq!(store.token().as_deref(), Some("id-token"));

        store.set_auth_token(None);
        assert_eq!(store.token(), None);
    }
}
