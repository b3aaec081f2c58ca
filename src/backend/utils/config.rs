//! Firebase project configuration.
//!
//! Values come from `firebase.json` in the application directory and can be
//! overridden one by one through environment variables.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the application directory.
const APP_DIR: &str = "DreamEnter";
const CONFIG_FILE: &str = "firebase.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    pub oauth_client_id: String,
    pub oauth_client_secret: Option<String>,
    /// `host:port` of a local Firestore emulator.
    pub emulator_host: Option<String>,
}

impl FirebaseConfig {
    /// Loads the config from the application directory and the process environment.
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path()?;
        Self::load_from(&path, |key| std::env::var(key).ok())
    }

    /// Gets the path to the config file.
    pub fn get_config_path() -> Result<PathBuf> {
        let base_dir = match std::env::consts::OS {
            "windows" => std::env::var_os("APPDATA")
                .map(PathBuf::from)
                .context("Could not determine AppData directory")?,
            "macos" => std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join("Library/Application Support"))
                .context("Could not determine home directory")?,
            _ => std::env::var_os("HOME")
                .map(PathBuf::from)
                .context("Could not determine home directory")?,
        };
        Ok(base_dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reads `path` if it exists, then applies overrides looked up through `env`.
    pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = if path.exists() {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            log::debug!("{} not found, using environment only", path.display());
            Self::default()
        };

        if let Some(value) = env("FIREBASE_API_KEY") {
            config.api_key = value;
        }
        if let Some(value) = env("FIREBASE_PROJECT_ID") {
            config.project_id = value;
        }
        if let Some(value) = env("GOOGLE_OAUTH_CLIENT_ID") {
            config.oauth_client_id = value;
        }
        if let Some(value) = env("GOOGLE_OAUTH_CLIENT_SECRET") {
            config.oauth_client_secret = Some(value);
        }
        if let Some(value) = env("FIRESTORE_EMULATOR_HOST") {
            config.emulator_host = Some(value);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("api_key", &self.api_key),
            ("project_id", &self.project_id),
            ("oauth_client_id", &self.oauth_client_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            bail!("Firebase config is missing: {}", missing.join(", "));
        }
        Ok(())
    }
}
