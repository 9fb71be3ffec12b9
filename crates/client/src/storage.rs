//! Durable key-value storage for the client session.
//!
//! The keys are fixed strings shared with every frontend that talks to the
//! API, so renaming one silently logs everybody out.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

pub const SESSION_TOKEN_KEY: &str = "session-token";
pub const REFRESH_TOKEN_KEY: &str = "refresh-token";
pub const USER_PROFILE_KEY: &str = "user-profile-json";
pub const DARK_MODE_KEY: &str = "dark-mode-preference";

/// String key-value store backing a client session.
///
/// `set` and `remove` are infallible from the caller's point of view;
/// implementations log persistence failures rather than surfacing them,
/// since losing a cached token is recoverable (the user logs in again).
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store, mainly for tests and short-lived tooling.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// File-backed store: the whole map is serialized as one JSON object and
/// rewritten on every mutation. Session state is a handful of small strings,
/// so the rewrite cost is irrelevant.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading any existing contents. A missing or
    /// unreadable file starts empty; corrupt JSON is discarded, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "discarding corrupt session file");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string_pretty(entries) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize session state");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, raw) {
            tracing::warn!(path = %self.path.display(), %err, "failed to persist session state");
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(SESSION_TOKEN_KEY), None);

        store.set(SESSION_TOKEN_KEY, "abc");
        assert_eq!(store.get(SESSION_TOKEN_KEY), Some("abc".to_string()));

        store.remove(SESSION_TOKEN_KEY);
        assert_eq!(store.get(SESSION_TOKEN_KEY), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path);
        store.set(SESSION_TOKEN_KEY, "tok");
        store.set(DARK_MODE_KEY, "true");
        store.set(REFRESH_TOKEN_KEY, "ref");
        store.remove(REFRESH_TOKEN_KEY);
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(SESSION_TOKEN_KEY), Some("tok".to_string()));
        assert_eq!(reopened.get(DARK_MODE_KEY), Some("true".to_string()));
        assert_eq!(reopened.get(REFRESH_TOKEN_KEY), None);
    }

    #[test]
    fn file_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json {{").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get(SESSION_TOKEN_KEY), None);

        // A mutation rewrites the file cleanly.
        store.set(SESSION_TOKEN_KEY, "tok");
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(SESSION_TOKEN_KEY), Some("tok".to_string()));
    }

    #[test]
    fn file_store_starts_empty_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get(USER_PROFILE_KEY), None);
    }
}
