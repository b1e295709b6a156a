use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};

use super::{memory_store::MemoryStore, no_store::NoFallback};
use crate::config::{StoreBackend, StoreConfig};

/// The FallbackStore trait abstracts local task/conversation storage.
/// Records are opaque JSON values; updates use shallow object merge.
#[async_trait]
pub trait FallbackStore: Send + Sync {
    async fn get_task(&self, id: i64) -> Result<Option<Value>, String>;
    async fn update_task(&self, id: i64, patch: &Value) -> Result<Option<Value>, String>;
    async fn delete_task(&self, id: i64) -> Result<bool, String>;
    async fn put_task(&self, id: i64, task: Value) -> Result<(), String>;

    async fn get_conversation(&self, id: &str) -> Result<Option<Value>, String>;
    async fn delete_conversation(&self, id: &str) -> Result<bool, String>;
    async fn conversation_messages(&self, id: &str) -> Result<Option<Vec<Value>>, String>;
    async fn put_conversation(
        &self,
        id: &str,
        conversation: Value,
        messages: Vec<Value>,
    ) -> Result<(), String>;

    fn is_enabled(&self) -> bool {
        // Real stores are always enabled.
        // NoFallback returns false, which sends every route to the backend.
        true
    }
}

/// Creates a concrete store implementation based on the StoreConfig.
/// If `store.enabled = false`, returns NoFallback. Otherwise, picks the
/// specified backend.
pub async fn create_store(config: &StoreConfig) -> Arc<dyn FallbackStore> {
    if !config.enabled {
        info!("Fallback store is disabled. All resources are proxied.");
        return Arc::new(NoFallback::new());
    }

    match &config.backend {
        Some(StoreBackend::Memory) => {
            info!("Using in-memory fallback store; data is lost on restart.");
            Arc::new(MemoryStore::new())
        }
        None => {
            error!("Fallback store is enabled, but no backend config is provided!");
            std::process::exit(1);
        }
    }
}
