use std::collections::HashMap;

/// String key-value storage the session lives in.
///
/// Mirrors browser tab storage: values are plain strings and `clear` wipes
/// every key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn clear(&mut self);
}

/// Tab-scoped store: lives exactly as long as the process that owns it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basics() {
        let mut store = MemoryStore::new();
        assert!(store.get("user").is_none());

        store.set("user", "a".to_string());
        store.set("user", "b".to_string());
        store.set("lastActivity", "1".to_string());
        assert_eq!(store.get("user").as_deref(), Some("b"));
        assert_eq!(store.get("lastActivity").as_deref(), Some("1"));

        store.clear();
        assert!(store.is_empty());
    }
}
