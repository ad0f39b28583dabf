//! Last-known attributes of every object seen so far in a recording.

use std::collections::HashMap;

use acmi_core::models::Record;

/// Object identifier to latest [`Record`] mapping for one pass.
///
/// Entries are only ever inserted or replaced, never removed.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: HashMap<String, Record>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` as the current state of `id`.
    ///
    /// A later line for the same object replaces the whole record; attributes
    /// not repeated on the new line are forgotten.
    pub fn upsert(&mut self, id: &str, record: Record) {
        self.objects.insert(id.to_string(), record);
    }

    /// Current record for `id`, if the object has been seen.
    pub fn lookup(&self, id: &str) -> Option<&Record> {
        self.objects.get(id)
    }

    /// Number of distinct objects seen.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::parse_fields;

    #[test]
    fn test_lookup_missing_returns_none() {
        let registry = ObjectRegistry::new();
        assert!(registry.lookup("100").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_upsert_then_lookup() {
        let mut registry = ObjectRegistry::new();
        registry.upsert("100", parse_fields("Object=100,Pilot=Ace"));

        let rec = registry.lookup("100").unwrap();
        assert_eq!(rec["Pilot"], "Ace");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_upsert_replaces_instead_of_merging() {
        let mut registry = ObjectRegistry::new();
        registry.upsert("100", parse_fields("Object=100,Pilot=Ace,Group=Alpha"));
        registry.upsert("100", parse_fields("Object=100,Group=Bravo"));

        let rec = registry.lookup("100").unwrap();
        assert_eq!(rec["Group"], "Bravo");
        assert!(!rec.contains_key("Pilot"));
        assert_eq!(registry.len(), 1);
    }
}
