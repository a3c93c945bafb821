//! Bounded most-recently-used list of workspace paths

use crate::storage::kv::KvStore;

/// Storage key for the persisted list
const RECENT_KEY: &str = "recent_workspaces";

/// Maximum entries kept; older ones fall off the end
const MAX_RECENT: usize = 10;

/// Recently opened workspaces, most recent first, persisted as a flat JSON
/// string array. A missing or unreadable stored value degrades to an empty
/// list rather than failing startup.
pub struct RecentWorkspaces {
    entries: Vec<String>,
    store: Box<dyn KvStore>,
}

impl RecentWorkspaces {
    /// Load the list from storage, falling back to empty
    pub fn load(store: Box<dyn KvStore>) -> Self {
        let entries = store
            .get(RECENT_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();
        Self { entries, store }
    }

    /// Promote `path` to the front, deduplicated and capped
    pub fn add(&mut self, path: &str) {
        self.entries.retain(|p| p != path);
        self.entries.insert(0, path.to_string());
        self.entries.truncate(MAX_RECENT);
        self.persist();
    }

    /// Remove all occurrences of `path`
    pub fn remove(&mut self, path: &str) {
        self.entries.retain(|p| p != path);
        self.persist();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(raw) => self.store.set(RECENT_KEY, &raw),
            Err(e) => tracing::warn!("Failed to serialize recent workspaces: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKvStore;

    fn fresh() -> RecentWorkspaces {
        RecentWorkspaces::load(Box::new(MemoryKvStore::new()))
    }

    #[test]
    fn test_add_moves_existing_to_front() {
        let mut recent = fresh();
        recent.add("/a");
        recent.add("/b");
        recent.add("/a");
        assert_eq!(recent.entries(), ["/a", "/b"]);
    }

    #[test]
    fn test_capped_at_max() {
        let mut recent = fresh();
        for n in 0..15 {
            recent.add(&format!("/ws/{n}"));
        }
        assert_eq!(recent.entries().len(), MAX_RECENT);
        assert_eq!(recent.entries()[0], "/ws/14");
        assert_eq!(recent.entries()[MAX_RECENT - 1], "/ws/5");
    }

    #[test]
    fn test_remove() {
        let mut recent = fresh();
        recent.add("/a");
        recent.add("/b");
        recent.remove("/a");
        assert_eq!(recent.entries(), ["/b"]);
    }

    #[test]
    fn test_persists_and_reloads() {
        let store = std::sync::Arc::new(MemoryKvStore::new());

        let mut recent = RecentWorkspaces::load(Box::new(store.clone()));
        recent.add("/a");
        recent.add("/b");

        let reloaded = RecentWorkspaces::load(Box::new(store));
        assert_eq!(reloaded.entries(), ["/b", "/a"]);
    }

    #[test]
    fn test_corrupt_value_degrades_to_empty() {
        let store = MemoryKvStore::new();
        store.set(RECENT_KEY, "{{{not json");
        let recent = RecentWorkspaces::load(Box::new(store));
        assert!(recent.entries().is_empty());
    }
}
