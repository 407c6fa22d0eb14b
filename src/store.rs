//! Settings store access and the load path.
//!
//! Custom pages live in one settings document under `customPages`, next to
//! unrelated site settings. [`load_pages`] is the only reader:
//!
//! 1. `get()` the document. A missing or unreadable document, or a
//!    `customPages` value that is not an array, means "no custom pages".
//! 2. Normalize placements ([`crate::migrate::normalize`]).
//! 3. If anything was migrated, `save()` the document once with the normalized
//!    array, leaving every other field as it was. A failed save is logged and
//!    otherwise ignored; the normalized pages are returned either way and the
//!    next load will try again.

use crate::migrate;
use crate::types::Page;
use log::{info, warn};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CUSTOM_PAGES_KEY: &str = "customPages";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings document is not a JSON object")]
    NotAnObject,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The external document store holding site settings.
pub trait SettingsStore {
    /// The whole settings document, or `None` if none has been saved yet.
    fn get(&self) -> Result<Option<Value>, StoreError>;
    /// Replace the whole settings document.
    fn save(&self, document: &Value) -> Result<(), StoreError>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for &S {
    fn get(&self) -> Result<Option<Value>, StoreError> {
        (**self).get()
    }

    fn save(&self, document: &Value) -> Result<(), StoreError> {
        (**self).save(document)
    }
}

/// Settings document kept as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self) -> Result<Option<Value>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, document: &Value) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process store, used by tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<Value>>,
    fail_saves: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new(document: Value) -> Self {
        Self {
            document: RefCell::new(Some(document)),
            ..Default::default()
        }
    }

    /// Make every subsequent `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn document(&self) -> Option<Value> {
        self.document.borrow().clone()
    }

    /// Replace the document without counting a save, as another writer would.
    pub fn replace(&self, document: Value) {
        *self.document.borrow_mut() = Some(document);
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, document: &Value) -> Result<(), StoreError> {
        if self.fail_saves.get() {
            return Err(StoreError::Unavailable("saves disabled".into()));
        }
        *self.document.borrow_mut() = Some(document.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// What happened to the migrated array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Nothing was migrated, nothing written.
    NotNeeded,
    Saved,
    /// The save failed; pages were still returned.
    Failed(String),
}

/// Result of one load pass.
#[derive(Debug, Clone)]
pub struct LoadedPages {
    pub pages: Vec<Page>,
    pub did_migrate: bool,
    pub persist: PersistOutcome,
}

impl LoadedPages {
    fn empty() -> Self {
        Self {
            pages: Vec::new(),
            did_migrate: false,
            persist: PersistOutcome::NotNeeded,
        }
    }
}

/// Fetch, normalize and (when needed) persist the custom pages.
pub fn load_pages(store: &dyn SettingsStore) -> LoadedPages {
    let document = match store.get() {
        Ok(Some(document)) => document,
        Ok(None) => return LoadedPages::empty(),
        Err(e) => {
            warn!("could not read settings, rendering no custom pages: {e}");
            return LoadedPages::empty();
        }
    };

    let records = match document.get(CUSTOM_PAGES_KEY) {
        Some(Value::Array(records)) => records.clone(),
        None | Some(Value::Null) => return LoadedPages::empty(),
        Some(_) => {
            warn!("settings field {CUSTOM_PAGES_KEY} is not an array, ignoring it");
            return LoadedPages::empty();
        }
    };

    let normalized = migrate::normalize(records);
    let persist = if normalized.did_migrate {
        match write_pages(store, document, Value::Array(normalized.records)) {
            Ok(()) => {
                info!("normalized legacy page placements and saved settings");
                PersistOutcome::Saved
            }
            Err(e) => {
                warn!("normalized page placements but could not save them: {e}");
                PersistOutcome::Failed(e.to_string())
            }
        }
    } else {
        PersistOutcome::NotNeeded
    };

    LoadedPages {
        pages: normalized.pages,
        did_migrate: normalized.did_migrate,
        persist,
    }
}

/// Replace `customPages` in `document` and save it, keeping other fields.
fn write_pages(store: &dyn SettingsStore, mut document: Value, pages: Value) -> Result<(), StoreError> {
    let fields = document.as_object_mut().ok_or(StoreError::NotAnObject)?;
    fields.insert(CUSTOM_PAGES_KEY.to_string(), pages);
    store.save(&document)
}

/// Save `pages` as the new `customPages` array, as an admin edit does.
pub fn save_pages(store: &dyn SettingsStore, pages: &[Page]) -> Result<(), StoreError> {
    let document = store.get()?.unwrap_or_else(|| Value::Object(Default::default()));
    write_pages(store, document, serde_json::to_value(pages)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Placement;
    use serde_json::json;
    use tempfile::TempDir;

    fn legacy_document() -> Value {
        json!({
            "siteName": "Studio",
            "services": [{ "id": "s1" }],
            "customPages": [
                { "id": "a", "isVisible": true, "displayLocation": "before-packages" },
                { "id": "b", "isVisible": true, "placement": "after_header" }
            ]
        })
    }

    #[test]
    fn missing_document_is_empty() {
        let store = MemoryStore::default();
        let loaded = load_pages(&store);
        assert!(loaded.pages.is_empty());
        assert_eq!(loaded.persist, PersistOutcome::NotNeeded);
    }

    #[test]
    fn missing_or_malformed_custom_pages_is_empty() {
        for document in [json!({ "siteName": "x" }), json!({ "customPages": "oops" }), json!([1, 2])] {
            let store = MemoryStore::new(document);
            assert!(load_pages(&store).pages.is_empty());
            assert_eq!(store.save_count(), 0);
        }
    }

    #[test]
    fn migration_is_persisted_once_and_keeps_other_fields() {
        let store = MemoryStore::new(legacy_document());
        let loaded = load_pages(&store);
        assert!(loaded.did_migrate);
        assert_eq!(loaded.persist, PersistOutcome::Saved);
        assert_eq!(loaded.pages[0].placement, Some(Placement::BeforePackages));
        assert_eq!(store.save_count(), 1);

        let saved = store.document().unwrap();
        assert_eq!(saved["siteName"], "Studio");
        assert_eq!(saved["services"][0]["id"], "s1");
        assert_eq!(saved["customPages"][0]["placement"], "before_packages");

        let again = load_pages(&store);
        assert!(!again.did_migrate);
        assert_eq!(again.persist, PersistOutcome::NotNeeded);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn failed_persist_still_returns_pages() {
        let store = MemoryStore::new(legacy_document());
        store.fail_saves(true);
        let loaded = load_pages(&store);
        assert!(matches!(loaded.persist, PersistOutcome::Failed(_)));
        assert_eq!(loaded.pages.len(), 2);
        assert_eq!(loaded.pages[0].placement, Some(Placement::BeforePackages));

        store.fail_saves(false);
        assert_eq!(load_pages(&store).persist, PersistOutcome::Saved);
    }

    #[test]
    fn file_store_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nested/settings.json"));
        assert!(store.get().unwrap().is_none());
        store.save(&legacy_document()).unwrap();
        assert_eq!(store.get().unwrap().unwrap()["siteName"], "Studio");
    }

    #[test]
    fn file_store_invalid_json_loads_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(), Err(StoreError::Json(_))));
        assert!(load_pages(&store).pages.is_empty());
    }

    #[test]
    fn file_store_migrates_on_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, serde_json::to_string(&legacy_document()).unwrap()).unwrap();
        let store = JsonFileStore::new(&path);
        assert_eq!(load_pages(&store).persist, PersistOutcome::Saved);
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["customPages"][0]["placement"], "before_packages");
        assert!(on_disk["customPages"][0].get("displayLocation").is_none());
    }

    #[test]
    fn save_pages_replaces_array_only() {
        let store = MemoryStore::new(legacy_document());
        let mut pages = load_pages(&store).pages;
        pages.truncate(1);
        save_pages(&store, &pages).unwrap();
        let saved = store.document().unwrap();
        assert_eq!(saved["customPages"].as_array().unwrap().len(), 1);
        assert_eq!(saved["siteName"], "Studio");
    }

    #[test]
    fn save_pages_keeps_unknown_fields() {
        let store = MemoryStore::new(json!({
            "customPages": [{
                "id": "team",
                "isVisible": true,
                "createdAt": "2024-01-01",
                "displayLocation": "sidebar",
                "components": [{
                    "id": "i",
                    "type": "image",
                    "content": { "src": "/a.jpg", "caption": "Team" },
                    "lockedBy": "editor"
                }]
            }]
        }));
        let pages = load_pages(&store).pages;
        save_pages(&store, &pages).unwrap();
        let first = store.document().unwrap();
        let record = &first["customPages"][0];
        assert_eq!(record["createdAt"], "2024-01-01");
        assert_eq!(record["displayLocation"], "sidebar");
        assert_eq!(record["components"][0]["content"]["caption"], "Team");
        assert_eq!(record["components"][0]["lockedBy"], "editor");

        save_pages(&store, &load_pages(&store).pages).unwrap();
        assert_eq!(store.document().unwrap(), first);
    }

    #[test]
    fn save_pages_creates_document() {
        let store = MemoryStore::default();
        save_pages(&store, &[]).unwrap();
        assert_eq!(store.document().unwrap(), json!({ "customPages": [] }));
    }
}
