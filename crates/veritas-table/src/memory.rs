//! An in-memory [`Store`] keeping one JSON document per collection key.

use std::collections::HashMap;

use crate::error::TableResult;
use crate::ports::Store;

/// A key-value store held in memory, laid out like browser local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw document under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.documents.get(key).map(String::as_str)
    }

    /// Overwrite a raw document, bypassing record encoding.
    pub fn insert_raw(&mut self, key: impl Into<String>, document: impl Into<String>) {
        self.documents.insert(key.into(), document.into());
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> TableResult<Option<String>> {
        Ok(self.documents.get(key).cloned())
    }

    fn write(&mut self, key: &str, document: String) -> TableResult<()> {
        self.documents.insert(key.to_string(), document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::ports::Collection;
    use veritas_core::User;

    #[test]
    fn records_land_under_collection_keys() {
        let mut store = MemoryStore::new();
        store.save(&User::new("ana", "ana@example.com", "pw")).unwrap();
        let raw = store.raw(Collection::Users.key()).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"username\":\"ana\""));
        assert_eq!(store.raw(Collection::Characters.key()), None);
    }

    #[test]
    fn corrupt_documents_surface_as_errors() {
        let mut store = MemoryStore::new();
        store.insert_raw(Collection::Users.key(), "{not json");
        let err = store.get_all::<User>().unwrap_err();
        assert!(matches!(err, TableError::Serialization(_)));
    }
}
