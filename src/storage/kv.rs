//! Key-value persistence for small pieces of app state

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;

/// Flat string key-value storage.
///
/// Writes are best-effort: implementations log and swallow failures, since
/// nothing stored here is worth interrupting the user over.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

impl<T: KvStore + ?Sized> KvStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// `KvStore` backed by a single JSON object file in the platform config dir
pub struct FileKvStore {
    path: PathBuf,
}

impl FileKvStore {
    /// Open the default store under the platform config directory
    pub fn open_default() -> Option<Self> {
        ProjectDirs::from("com", "promptdesk", "Promptdesk")
            .map(|dirs| Self::open(dirs.config_dir().join("state.json")))
    }

    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> HashMap<String, String> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn write_map(&self, map: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        let content = match serde_json::to_string_pretty(map) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to serialize key-value state: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, content) {
            tracing::warn!("Failed to write {}: {}", self.path.display(), e);
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map);
    }
}

/// In-memory `KvStore` for tests and embedding
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}
