//! Google sign-in federated through Firebase Authentication.

use super::oauth::{self, CallbackListener, Pkce};
use crate::backend::identity::{AuthUser, IdentityProvider, Session};
use crate::backend::utils::config::FirebaseConfig;
use crate::simple_error;
use crate::utils::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Endpoints used by the sign-in flow.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub authorize_url: String,
    pub token_url: String,
    pub identity_toolkit_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorize_url: oauth::AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            identity_toolkit_url: IDENTITY_TOOLKIT_URL.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct GoogleTokenResponse {
    id_token: String,
}

#[derive(Deserialize)]
struct GoogleTokenError {
    error: String,
    error_description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
    display_name: Option<String>,
    photo_url: Option<String>,
    email: Option<String>,
}

#[derive(Deserialize)]
struct FirebaseError {
    error: FirebaseErrorDetail,
}

#[derive(Deserialize)]
struct FirebaseErrorDetail {
    message: String,
}

pub struct GoogleAuth {
    client: reqwest::Client,
    api_key: String,
    client_id: String,
    client_secret: Option<String>,
    endpoints: Endpoints,
}

impl GoogleAuth {
    pub fn new(config: &FirebaseConfig) -> Self {
        Self::with_endpoints(config, Endpoints::default())
    }

    pub fn with_endpoints(config: &FirebaseConfig, endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            client_id: config.oauth_client_id.clone(),
            client_secret: config.oauth_client_secret.clone(),
            endpoints,
        }
    }

    /// Exchanges an authorization code for a Google ID token.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
        pkce: &Pkce,
    ) -> Result<String> {
        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("code_verifier", pkce.verifier.as_str()),
        ];
        if let Some(secret) = &self.client_secret {
            params.push(("client_secret", secret.as_str()));
        }

        let response = self
            .client
            .post(&self.endpoints.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(match response.json::<GoogleTokenError>().await {
                Ok(body) => simple_error!(
                    "Token exchange failed: {}",
                    body.error_description.unwrap_or(body.error)
                ),
                Err(_) => simple_error!("Token exchange failed with status {}", status),
            });
        }

        let token: GoogleTokenResponse = response.json().await?;
        Ok(token.id_token)
    }

    /// Signs in to Firebase with a Google ID token.
    pub async fn sign_in_with_idp(&self, google_id_token: &str) -> Result<Session> {
        let url = format!(
            "{}/accounts:signInWithIdp?key={}",
            self.endpoints.identity_toolkit_url, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "postBody": format!("id_token={google_id_token}&providerId=google.com"),
                "requestUri": "http://localhost",
                "returnIdpCredential": true,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(match response.json::<FirebaseError>().await {
                Ok(body) => simple_error!("{}", body.error.message),
                Err(_) => simple_error!("Sign-in failed with status {}", status),
            });
        }

        let body: SignInResponse = response.json().await?;
        Ok(Session {
            user: AuthUser {
                uid: body.local_id,
                display_name: body.display_name,
                photo_url: body.photo_url,
                email: body.email,
            },
            id_token: body.id_token,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleAuth {
    async fn sign_in_with_popup(&self) -> Result<Session> {
        let listener = CallbackListener::bind().await?;
        let redirect_uri = listener.redirect_uri();
        let pkce = Pkce::generate();
        let state = oauth::generate_state();
        let url = oauth::build_auth_url(
            &self.endpoints.authorize_url,
            &self.client_id,
            &redirect_uri,
            &pkce,
            &state,
        )?;

        webbrowser::open(&url).map_err(|e| simple_error!("Failed to open browser: {e}"))?;

        let code = listener.wait_for_code(&state).await?;
        let google_id_token = self.exchange_code(&code, &redirect_uri, &pkce).await?;
        let session = self.sign_in_with_idp(&google_id_token).await?;
        log::info!("Signed in as {}", session.user.uid);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        // Tokens only ever live in memory, nothing to revoke
        log::info!("Signed out");
        Ok(())
    }
}
