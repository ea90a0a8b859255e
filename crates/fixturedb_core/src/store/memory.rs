//! In-memory backend for fixture seeding and tests.

use super::{StoreBackend, StoreResult};
use std::collections::HashMap;

/// HashMap-backed store. Never fails; contents die with the value.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored collections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StoreBackend for MemoryBackend {
    fn get(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(name).cloned())
    }

    fn set(&mut self, name: &str, payload: &str) -> StoreResult<()> {
        self.entries.insert(name.to_string(), payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryBackend, StoreBackend};

    #[test]
    fn get_returns_none_for_missing_key() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("absent").unwrap(), None);
    }

    #[test]
    fn set_overwrites_prior_payload() {
        let mut backend = MemoryBackend::new();
        backend.set("c", "[1]").unwrap();
        backend.set("c", "[1,2]").unwrap();
        assert_eq!(backend.get("c").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn clear_removes_every_key() {
        let mut backend = MemoryBackend::new();
        backend.set("a", "[]").unwrap();
        backend.set("b", "[]").unwrap();
        backend.clear().unwrap();
        assert!(backend.is_empty());
        assert_eq!(backend.get("a").unwrap(), None);
    }
}
