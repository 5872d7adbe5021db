use crate::error::RosterError;
use crate::import::catalog::{Catalog, CatalogError};
use crate::model::{CatalogEntry, FieldMap};
use crate::parsing::normalize::canonical_form;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog held in memory, optionally loaded from and saved to a JSON file.
///
/// Entries keep insertion order, which is the iteration order seen by the
/// match resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCatalog {
    entries: Vec<CatalogEntry>,
    #[serde(default)]
    next_id: u64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let next_id = entries.len() as u64;
        Self { entries, next_id }
    }

    /// Load a catalog file. A missing file yields an empty catalog.
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path).map_err(|e| RosterError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut catalog: MemoryCatalog =
            serde_json::from_str(&content).map_err(|e| RosterError::CatalogLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        catalog.next_id = catalog.next_id.max(catalog.entries.len() as u64);
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<(), RosterError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, code: &str) -> Option<usize> {
        let key = canonical_form(code);
        self.entries
            .iter()
            .position(|e| canonical_form(&e.code) == key)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("e{}", self.next_id);
            if !self.entries.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }
}

impl Catalog for MemoryCatalog {
    fn get_by_key(&mut self, code: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        Ok(self.position(code).map(|i| self.entries[i].clone()))
    }

    fn create(&mut self, code: &str, fields: FieldMap) -> Result<CatalogEntry, CatalogError> {
        if self.position(code).is_some() {
            return Err(CatalogError::Rejected(format!("code '{code}' already exists")));
        }
        let entry = CatalogEntry {
            id: self.fresh_id(),
            code: code.to_string(),
            fields,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn update(&mut self, id: &str, fields: FieldMap) -> Result<CatalogEntry, CatalogError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CatalogError::Rejected(format!("no entry with id '{id}'")))?;
        entry.fields.extend(fields);
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn title(t: &str) -> FieldMap {
        FieldMap::from([("title".to_string(), Value::from(t))])
    }

    #[test]
    fn test_create_then_lookup() {
        let mut cat = MemoryCatalog::new();
        let created = cat.create("MATH101", title("Calculus")).unwrap();
        let found = cat.get_by_key("MATH101").unwrap().unwrap();
        assert_eq!(created, found);
        assert_eq!(cat.get_by_key(" math101 ").unwrap(), Some(created));
        assert!(cat.get_by_key("MATH101-A").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let mut cat = MemoryCatalog::new();
        cat.create("MATH101", title("Calculus")).unwrap();
        assert!(matches!(
            cat.create("math101", title("Again")),
            Err(CatalogError::Rejected(_))
        ));
    }

    #[test]
    fn test_update_merges_fields() {
        let mut fields = title("Old");
        fields.insert("instructions".into(), Value::from("Bring a calculator"));
        let mut cat = MemoryCatalog::from_entries(vec![CatalogEntry {
            id: "e1".into(),
            code: "MATH101".into(),
            fields,
        }]);

        let updated = cat.update("e1", title("New")).unwrap();
        assert_eq!(updated.field_str("title"), Some("New"));
        assert_eq!(updated.field_str("instructions"), Some("Bring a calculator"));
    }

    #[test]
    fn test_fresh_ids_skip_existing() {
        let mut cat = MemoryCatalog::from_entries(vec![CatalogEntry {
            id: "e2".into(),
            code: "A".into(),
            fields: FieldMap::new(),
        }]);
        let created = cat.create("B", FieldMap::new()).unwrap();
        assert_ne!(created.id, "e2");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut cat = MemoryCatalog::new();
        cat.create("MATH101", title("Calculus")).unwrap();
        cat.save(&path).unwrap();

        let mut loaded = MemoryCatalog::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        let next = loaded.create("PHYS100", FieldMap::new()).unwrap();
        assert_ne!(next.id, loaded.entries()[0].id);
    }

    #[test]
    fn test_missing_file_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let cat = MemoryCatalog::load(&dir.path().join("absent.json")).unwrap();
        assert!(cat.is_empty());
    }
}
