use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "https://api.leen.dev";

const CONFIG_FILE_NAME: &str = "leen-demo-config.json";
const CONFIG_DIR_ENV: &str = "ITSM_DEMO_CONFIG_DIR";
const APP_DIR_NAME: &str = "itsm-demo";

const API_KEY_ENV: &str = "LEEN_API_KEY";
const CONNECTION_ID_ENV: &str = "LEEN_CONNECTION_ID";
const API_BASE_URL_ENV: &str = "LEEN_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub connection_id: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            connection_id: String::new(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl Credentials {
    #[cfg(test)]
    pub fn new(
        api_key: impl Into<String>,
        connection_id: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            connection_id: connection_id.into(),
            api_base_url: api_base_url.into(),
        }
    }

    /// True when every field needed to talk to the API is filled in.
    pub fn is_complete(&self) -> bool {
        [&self.api_key, &self.connection_id, &self.api_base_url]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

/// Credentials kept as a single cleartext JSON blob on the local filesystem.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn open_default() -> AppResult<Self> {
        Ok(Self::at(config_file_path()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> AppResult<Option<Credentials>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AppError::Io(err)),
        };

        match serde_json::from_str::<Credentials>(&contents) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable stored credentials");
                Ok(None)
            }
        }
    }

    pub fn save(&self, credentials: &Credentials) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::Io(err)),
        }
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Some(dir) = non_empty_env(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
    }
    non_empty_env("HOME")
        .or_else(|| non_empty_env("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".config").join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "cannot locate a config directory; set {CONFIG_DIR_ENV}"
            ))
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Option<Credentials>,
    pub config_path: PathBuf,
}

impl AppConfig {
    /// Stored credentials with `LEEN_*` environment variables layered on top.
    pub fn load() -> AppResult<Self> {
        let store = CredentialStore::open_default()?;
        let stored = store.load()?;
        let credentials = apply_overrides(stored, non_empty_env);

        Ok(Self {
            credentials,
            config_path: store.path().to_path_buf(),
        })
    }
}

fn apply_overrides(
    stored: Option<Credentials>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<Credentials> {
    let api_key = lookup(API_KEY_ENV);
    let connection_id = lookup(CONNECTION_ID_ENV);
    let api_base_url = lookup(API_BASE_URL_ENV);

    if stored.is_none() && api_key.is_none() && connection_id.is_none() {
        return None;
    }

    let mut credentials = stored.unwrap_or_default();
    if let Some(value) = api_key {
        credentials.api_key = value;
    }
    if let Some(value) = connection_id {
        credentials.connection_id = value;
    }
    if let Some(value) = api_base_url {
        credentials.api_base_url = value;
    }
    Some(credentials)
}
