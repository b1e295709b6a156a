use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A wrapper for the fallback store configuration:
/// - enabled: if false, every resource is proxied to the backend (NoFallback).
/// - backend: the actual store backend (in-memory for now).
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct StoreConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub backend: Option<StoreBackend>,
}

/// The existing fallback backends. We differentiate them via a "type" tag
/// in the YAML.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreBackend {
    #[serde(rename = "memory")]
    Memory,
    // Add more variants here as needed, like:
    // #[serde(rename = "sqlite")]
    // Sqlite(SqliteConfig),
}
