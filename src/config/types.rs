use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;
use crate::error::ConfigError;

/// Environment variables with this prefix override values from the YAML file.
/// Nested keys are separated by `__`, e.g. `AUTHFLOW_API__BASE_URL`.
pub const ENV_PREFIX: &str = "AUTHFLOW_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend endpoints, token storage, navigation and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load config from a YAML file, then apply `AUTHFLOW_*` environment overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, ConfigError> {
    let figment = Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract_config(figment)
}

/// Extract a versioned config from an already assembled figment.
pub fn extract_config(figment: Figment) -> Result<ConfigV1, ConfigError> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// The JSON schema for the configuration, pretty printed.
pub fn config_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}

/// Where the auth backend lives and which paths it serves.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    #[serde(default = "default_upload_image_path")]
    pub upload_image_path: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

impl ApiConfig {
    /// Config with default paths against the given base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login_path: default_login_path(),
            register_path: default_register_path(),
            upload_image_path: default_upload_image_path(),
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

/// Where to go once the user is authenticated.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct NavigationConfig {
    #[serde(default = "default_post_auth_route")]
    pub post_auth_route: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            post_auth_route: default_post_auth_route(),
        }
    }
}

fn default_login_path() -> String {
    "/api/auth/login".to_string()
}

fn default_register_path() -> String {
    "/api/auth/register".to_string()
}

fn default_upload_image_path() -> String {
    "/api/auth/upload-image".to_string()
}

fn default_timeout_in_ms() -> u64 {
    10_000
}

fn default_post_auth_route() -> String {
    crate::navigation::DASHBOARD_ROUTE.to_string()
}
