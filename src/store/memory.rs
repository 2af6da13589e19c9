use super::CompetitionStore;
use crate::models::CompetitionError;
use std::collections::HashMap;

/// In-memory store; contents are lost when dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompetitionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CompetitionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CompetitionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CompetitionError> {
        self.entries.remove(key);
        Ok(())
    }
}
