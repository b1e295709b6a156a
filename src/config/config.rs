use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend endpoint, token minting, sessions,
/// fallback store, preferences and logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub backend: BackendConfig,
    pub jwt: JWTConfig,
    pub session: SessionConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub preferences: PrefsConfig,
    pub logging: LoggingConfig,
}

/// Load config from a YAML file named "config.yaml" in the current directory.
/// Individual fields can be overridden from the environment with the
/// `TASKGATE_` prefix and `__` as the nesting separator
/// (e.g. `TASKGATE_JWT__SECRET`).
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed("TASKGATE_").split("__"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

/// Where the backend service lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct BackendConfig {
    /// Base URL of the backend API. `BACKEND_API_URL` and
    /// `NEXT_PUBLIC_API_URL` (in that order) take precedence over this value.
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Chat calls are LLM-backed and get a longer budget.
    #[serde(default = "default_chat_timeout_secs")]
    pub chat_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_chat_timeout_secs() -> u64 {
    60
}

impl BackendConfig {
    /// Resolves the effective backend base URL, honoring the environment
    /// aliases the deployment uses.
    pub fn resolve_base_url(&self) -> String {
        std::env::var("BACKEND_API_URL")
            .or_else(|_| std::env::var("NEXT_PUBLIC_API_URL"))
            .ok()
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| "http://localhost:8000".to_string())
    }
}

/// Signing parameters for the backend tokens minted per proxied call.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct JWTConfig {
    /// Symmetric signing secret. `JWT_SECRET` in the environment takes
    /// precedence. Absence is a configuration error surfaced as a 500 on
    /// any proxying call, not at startup.
    pub secret: Option<String>,
    #[serde(default = "default_token_exp")]
    pub exp: i64,
}

fn default_token_exp() -> i64 {
    86400
}

impl JWTConfig {
    pub fn resolve_secret(&self) -> Option<String> {
        std::env::var("JWT_SECRET").ok().or_else(|| self.secret.clone())
    }
}

/// Session cookie parameters and the users allowed to log in.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Secret used to verify signed session cookies.
    pub secret: String,
    #[serde(default = "default_session_exp")]
    pub exp: i64,
    #[serde(default)]
    pub users: Vec<SessionUser>,
}

fn default_cookie_name() -> String {
    "taskgate_session".to_string()
}

fn default_session_exp() -> i64 {
    604800
}

/// A user declared directly in the configuration file.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionUser {
    pub username: String,
    pub password: String,
}

/// Where per-user UI preferences are persisted. With no directory configured
/// they live in memory for the process lifetime.
#[derive(Deserialize, Serialize, Debug, Default, JsonSchema)]
pub struct PrefsConfig {
    pub dir: Option<String>,
}
