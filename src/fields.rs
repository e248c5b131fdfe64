//! Operator-entered field values, looked up by name.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Source of operator-entered text, keyed by field name.
///
/// A field that does not exist reads as empty text.
pub trait FieldSource {
    fn field_text(&self, name: &str) -> String;
}

impl FieldSource for HashMap<String, String> {
    fn field_text(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field_text(&self, name: &str) -> String {
        (**self).field_text(name)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for std::sync::Arc<T> {
    fn field_text(&self, name: &str) -> String {
        (**self).field_text(name)
    }
}

/// Field store shared between whatever edits the fields and the commander.
#[derive(Debug, Default)]
pub struct FieldStore {
    fields: RwLock<HashMap<String, String>>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>, text: impl Into<String>) {
        self.fields.write().insert(name.into(), text.into());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.fields.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }
}

impl FieldSource for FieldStore {
    fn field_text(&self, name: &str) -> String {
        self.fields.read().get(name).cloned().unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let store = FieldStore::new();
        for (name, text) in iter {
            store.set(name, text);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn missing_field_reads_empty() {
        let store = FieldStore::new();
        assert_eq!(store.field_text("OWN_PERIOD"), "");
    }

    #[test]
    fn store_is_shared_across_handles() {
        let store = Arc::new(FieldStore::new());
        let editor = Arc::clone(&store);
        editor.set("OWN_MODE", "Euler");
        assert_eq!(store.field_text("OWN_MODE"), "Euler");

        editor.set("OWN_MODE", "Quaternion");
        assert_eq!(store.field_text("OWN_MODE"), "Quaternion");
        assert_eq!(store.remove("OWN_MODE").as_deref(), Some("Quaternion"));
        assert!(store.is_empty());
    }

    #[test]
    fn hash_map_source() {
        let mut map = HashMap::new();
        map.insert("TEST_PERIOD".to_string(), "250".to_string());
        assert_eq!(map.field_text("TEST_PERIOD"), "250");
        assert_eq!(map.field_text("TEST_MODE"), "");
    }
}
