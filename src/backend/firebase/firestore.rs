//! Cloud Firestore over its REST API.

use super::values::{decode_fields, encode_fields};
use crate::backend::store::{DocPath, DocumentStore, WriteBatch};
use crate::backend::utils::config::FirebaseConfig;
use crate::simple_error;
use crate::utils::{Error, Result};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::RwLock;

const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Deserialize)]
struct DocumentResponse {
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct FirestoreStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    token: RwLock<Option<String>>,
}

impl FirestoreStore {
    pub fn new(base_url: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            project_id: project_id.into(),
            token: RwLock::new(None),
        }
    }

    /// Talks to the emulator when one is configured, production otherwise.
    pub fn from_config(config: &FirebaseConfig) -> Self {
        let base_url = match &config.emulator_host {
            Some(host) => format!("http://{host}/v1"),
            None => FIRESTORE_URL.to_string(),
        };
        Self::new(base_url, &config.project_id)
    }

    fn documents_root(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    fn document_name(&self, path: &DocPath) -> String {
        format!("{}/{path}", self.documents_root())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().ok().and_then(|token| token.clone()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch(&self, path: &DocPath) -> Result<Option<Response>> {
        let url = format!("{}/{}", self.base_url, self.document_name(path));
        let response = self.authorize(self.client.get(&url)).send().await?;
        log::debug!("Firestore read executed for {path}");

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response)),
            _ => Err(error_from(response).await),
        }
    }
}

/// Turns a failed response into an error carrying the backend's own message.
async fn error_from(response: Response) -> Error {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => simple_error!("{}", body.error.message),
        Err(_) => simple_error!("Request failed with status {}", status),
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn exists(&self, path: &DocPath) -> Result<bool> {
        Ok(self.fetch(path).await?.is_some())
    }

    async fn get(&self, path: &DocPath) -> Result<Option<Value>> {
        match self.fetch(path).await? {
            Some(response) => {
                let document: DocumentResponse = response.json().await?;
                Ok(Some(decode_fields(&document.fields)))
            }
            None => Ok(None),
        }
    }

    async fn commit(&self, batch: WriteBatch) -> Result<()> {
        let writes = batch
            .into_writes()
            .into_iter()
            .map(|(path, document)| {
                Ok(json!({
                    "update": {
                        "name": self.document_name(&path),
                        "fields": encode_fields(&document)?,
                    }
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        let count = writes.len();
        let url = format!("{}/{}:commit", self.base_url, self.documents_root());
        let response = self
            .authorize(self.client.post(&url))
            .json(&json!({ "writes": writes }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }
        log::debug!("Firestore commit of {count} writes succeeded");
        Ok(())
    }

    fn set_auth_token(&self, token: Option<String>) {
        if let Ok(mut current) = self.token.write() {
            *current = token;
        }
    }
}
