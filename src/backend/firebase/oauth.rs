//! Google OAuth pieces for installed apps: PKCE and the loopback redirect.

use crate::simple_error;
use crate::utils::Result;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use reqwest::Url;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const SCOPES: &str = "openid email profile";

/// How long we wait for the browser to come back.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

const CALLBACK_PATH: &str = "/callback";

/// PKCE code verifier and challenge.
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    pub fn generate() -> Self {
        let bytes: [u8; 32] = rand::rng().random();
        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }
}

/// Random value echoed back by the authorization server.
pub fn generate_state() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Builds the Google consent URL.
pub fn build_auth_url(
    authorize_url: &str,
    client_id: &str,
    redirect_uri: &str,
    pkce: &Pkce,
    state: &str,
) -> Result<String> {
    let url = Url::parse_with_params(
        authorize_url,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", SCOPES),
            ("code_challenge", &pkce.challenge),
            ("code_challenge_method", "S256"),
            ("state", state),
            ("prompt", "select_account"),
        ],
    )
    .map_err(|e| simple_error!("Invalid authorization URL: {e}"))?;
    Ok(url.into())
}

/// Local listener receiving the authorization redirect.
pub struct CallbackListener {
    listener: TcpListener,
    port: u16,
}

impl CallbackListener {
    pub async fn bind() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        Ok(Self { listener, port })
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}{CALLBACK_PATH}", self.port)
    }

    /// Waits for the redirect and returns the authorization code.
    pub async fn wait_for_code(self, state: &str) -> Result<String> {
        tokio::time::timeout(CALLBACK_TIMEOUT, self.accept_code(state))
            .await
            .map_err(|_| simple_error!("Timed out waiting for Google sign-in"))?
    }

    async fn accept_code(self, state: &str) -> Result<String> {
        loop {
            let (mut stream, _) = self.listener.accept().await?;
            let mut buffer = [0u8; 4096];
            let read = stream.read(&mut buffer).await?;
            let request = String::from_utf8_lossy(&buffer[..read]);
            let target = request
                .lines()
                .next()
                .and_then(|line| line.split_whitespace().nth(1))
                .unwrap_or("/");

            // Browsers may ask for a favicon before or after the redirect
            let Some(result) = parse_callback(target, state) else {
                let _ = stream.write_all(NOT_FOUND_RESPONSE.as_bytes()).await;
                continue;
            };

            let page = if result.is_ok() {
                SUCCESS_RESPONSE
            } else {
                ERROR_RESPONSE
            };
            let _ = stream.write_all(page.as_bytes()).await;
            let _ = stream.shutdown().await;
            return result;
        }
    }
}

/// Extracts the code from a request target. `None` when the target is not the callback.
pub fn parse_callback(target: &str, expected_state: &str) -> Option<Result<String>> {
    let url = Url::parse(&format!("http://127.0.0.1{target}")).ok()?;
    if url.path() != CALLBACK_PATH {
        return None;
    }

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if let Some(error) = param("error") {
        return Some(Err(simple_error!("Google sign-in failed: {error}")));
    }
    if param("state").as_deref() != Some(expected_state) {
        return Some(Err(simple_error!("Google sign-in returned an unexpected state")));
    }
    Some(param("code").ok_or_else(|| simple_error!("Google sign-in returned no code")))
}

const SUCCESS_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nConnection: close\r\n\r\n\
<html><body><h2>Signed in</h2><p>You can close this tab and return to Dream Enter.</p></body></html>";

const ERROR_RESPONSE: &str = "HTTP/1.1 400 Bad Request\r\nContent-Type: text/html; charset=utf-8\r\nConnection: close\r\n\r\n\
<html><body><h2>Sign-in failed</h2><p>Return to Dream Enter and try again.</p></body></html>";

const NOT_FOUND_RESPONSE: &str =
    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
