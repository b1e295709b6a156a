use async_trait::async_trait;
use serde_json::Value;

use super::FallbackStore;

/// A no-op store that always returns an error if called,
/// indicating the fallback store is disabled.
pub struct NoFallback;

impl NoFallback {
    pub fn new() -> Self {
        NoFallback
    }
}

impl Default for NoFallback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FallbackStore for NoFallback {
    async fn get_task(&self, _id: i64) -> Result<Option<Value>, String> {
        Err("Fallback store is disabled".into())
    }

    async fn update_task(&self, _id: i64, _patch: &Value) -> Result<Option<Value>, String> {
        Err("Fallback store is disabled".into())
    }

    async fn delete_task(&self, _id: i64) -> Result<bool, String> {
        Err("Fallback store is disabled".into())
    }

    async fn put_task(&self, _id: i64, _task: Value) -> Result<(), String> {
        Err("Fallback store is disabled".into())
    }

    async fn get_conversation(&self, _id: &str) -> Result<Option<Value>, String> {
        Err("Fallback store is disabled".into())
    }

    async fn delete_conversation(&self, _id: &str) -> Result<bool, String> {
        Err("Fallback store is disabled".into())
    }

    async fn conversation_messages(&self, _id: &str) -> Result<Option<Vec<Value>>, String> {
        Err("Fallback store is disabled".into())
    }

    async fn put_conversation(
        &self,
        _id: &str,
        _conversation: Value,
        _messages: Vec<Value>,
    ) -> Result<(), String> {
        Err("Fallback store is disabled".into())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
