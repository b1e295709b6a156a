//! Per-user UI preferences.
//!
//! Theme, language and background mode, initialized from persisted values
//! (else defaults) and written through synchronously on every change.
//! Independent of the proxy layer.

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, PrefsStorage};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Defer to the client's system preference.
    System,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    Default,
    Gradient,
    Image,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    pub theme: Theme,
    pub language: String,
    pub background: BackgroundMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: Theme::System,
            language: "en".to_string(),
            background: BackgroundMode::Default,
        }
    }
}

/// A partial update; absent fields keep their current value.
#[derive(Deserialize, Debug, Default)]
pub struct PrefsPatch {
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub background: Option<BackgroundMode>,
}

/// Preference state container over a pluggable storage backend.
pub struct PrefsService {
    storage: Box<dyn PrefsStorage>,
}

impl PrefsService {
    pub fn new(storage: Box<dyn PrefsStorage>) -> Self {
        PrefsService { storage }
    }

    /// Initialization phase: persisted values if present, else defaults.
    pub fn load(&self, user_id: &str) -> Preferences {
        self.storage.load(user_id).unwrap_or_default()
    }

    /// Mutation phase: apply the patch and write through before returning.
    pub fn update(&self, user_id: &str, patch: &PrefsPatch) -> Result<Preferences, String> {
        let mut prefs = self.load(user_id);
        if let Some(theme) = patch.theme {
            prefs.theme = theme;
        }
        if let Some(language) = &patch.language {
            prefs.language = language.clone();
        }
        if let Some(background) = patch.background {
            prefs.background = background;
        }
        self.storage.save(user_id, &prefs)?;
        Ok(prefs)
    }
}
