use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use super::Preferences;

/// Storage backend for preferences. Load failures are treated as "no saved
/// preferences"; save failures are surfaced to the caller.
pub trait PrefsStorage: Send + Sync {
    fn load(&self, user_id: &str) -> Option<Preferences>;
    fn save(&self, user_id: &str, prefs: &Preferences) -> Result<(), String>;
}

/// One JSON file per user under a configured directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        // User ids come from config-declared usernames; strip anything that
        // is not filename-safe.
        let safe: String = user_id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl PrefsStorage for FileStorage {
    fn load(&self, user_id: &str) -> Option<Preferences> {
        let bytes = std::fs::read(self.path_for(user_id)).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn save(&self, user_id: &str, prefs: &Preferences) -> Result<(), String> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| format!("failed to create preferences dir: {}", e))?;
        let bytes = serde_json::to_vec_pretty(prefs)
            .map_err(|e| format!("failed to serialize preferences: {}", e))?;
        std::fs::write(self.path_for(user_id), bytes)
            .map_err(|e| format!("failed to write preferences: {}", e))
    }
}

/// Process-lifetime storage, used when no directory is configured and in
/// tests.
pub struct MemoryStorage {
    prefs: RwLock<HashMap<String, Preferences>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            prefs: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefsStorage for MemoryStorage {
    fn load(&self, user_id: &str) -> Option<Preferences> {
        self.prefs.read().unwrap().get(user_id).cloned()
    }

    fn save(&self, user_id: &str, prefs: &Preferences) -> Result<(), String> {
        self.prefs
            .write()
            .unwrap()
            .insert(user_id.to_string(), prefs.clone());
        Ok(())
    }
}
