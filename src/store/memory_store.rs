use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::FallbackStore;

/// In-memory fallback store. Updates are applied in the order the runtime
/// processes requests; there is no persistence across restarts.
pub struct MemoryStore {
    tasks: RwLock<HashMap<i64, Value>>,
    conversations: RwLock<HashMap<String, (Value, Vec<Value>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tasks: RwLock::new(HashMap::new()),
            conversations: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shallow merge of a JSON object patch into a stored record.
fn merge_into(record: &mut Value, patch: &Value) {
    if let (Some(record_obj), Some(patch_obj)) = (record.as_object_mut(), patch.as_object()) {
        for (key, value) in patch_obj {
            record_obj.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait]
impl FallbackStore for MemoryStore {
    async fn get_task(&self, id: i64) -> Result<Option<Value>, String> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn update_task(&self, id: i64, patch: &Value) -> Result<Option<Value>, String> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&id) {
            Some(task) => {
                merge_into(task, patch);
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_task(&self, id: i64) -> Result<bool, String> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn put_task(&self, id: i64, task: Value) -> Result<(), String> {
        self.tasks.write().await.insert(id, task);
        Ok(())
    }

    async fn get_conversation(&self, id: &str) -> Result<Option<Value>, String> {
        Ok(self
            .conversations
            .read()
            .await
            .get(id)
            .map(|(conversation, _)| conversation.clone()))
    }

    async fn delete_conversation(&self, id: &str) -> Result<bool, String> {
        Ok(self.conversations.write().await.remove(id).is_some())
    }

    async fn conversation_messages(&self, id: &str) -> Result<Option<Vec<Value>>, String> {
        Ok(self
            .conversations
            .read()
            .await
            .get(id)
            .map(|(_, messages)| messages.clone()))
    }

    async fn put_conversation(
        &self,
        id: &str,
        conversation: Value,
        messages: Vec<Value>,
    ) -> Result<(), String> {
        self.conversations
            .write()
            .await
            .insert(id.to_string(), (conversation, messages));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Test that updates merge the patch into the stored task.
    #[tokio::test]
    async fn test_update_task_merges() {
        let store = MemoryStore::new();
        store
            .put_task(1, json!({"id": 1, "title": "buy milk", "done": false}))
            .await
            .unwrap();

        let updated = store
            .update_task(1, &json!({"done": true}))
            .await
            .unwrap()
            .expect("task should exist");

        assert_eq!(updated["title"], "buy milk");
        assert_eq!(updated["done"], true);
    }

    /// Test that updating a missing task reports None rather than creating it.
    #[tokio::test]
    async fn test_update_missing_task() {
        let store = MemoryStore::new();
        let result = store.update_task(9, &json!({"done": true})).await.unwrap();
        assert!(result.is_none());
        assert!(store.get_task(9).await.unwrap().is_none());
    }

    /// Test delete semantics for tasks.
    #[tokio::test]
    async fn test_delete_task() {
        let store = MemoryStore::new();
        store.put_task(1, json!({"id": 1})).await.unwrap();
        assert!(store.delete_task(1).await.unwrap());
        assert!(!store.delete_task(1).await.unwrap());
    }

    /// Test conversation retrieval and deletion with messages.
    #[tokio::test]
    async fn test_conversation_roundtrip() {
        let store = MemoryStore::new();
        store
            .put_conversation(
                "c1",
                json!({"id": "c1", "title": "groceries"}),
                vec![json!({"role": "user", "content": "hi"})],
            )
            .await
            .unwrap();

        let conversation = store.get_conversation("c1").await.unwrap().unwrap();
        assert_eq!(conversation["title"], "groceries");

        let messages = store.conversation_messages("c1").await.unwrap().unwrap();
        assert_eq!(messages.len(), 1);

        assert!(store.delete_conversation("c1").await.unwrap());
        assert!(store.get_conversation("c1").await.unwrap().is_none());
    }
}
