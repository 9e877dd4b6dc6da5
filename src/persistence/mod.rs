use std::{
    collections::HashMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};

use crate::core::VocabError;

const APP_NAME: &str = "quran-vocab";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join(APP_NAME)
    } else {
        PathBuf::from(".")
    }
}

/// Opaque string values addressed by key, the way browser local storage works.
pub trait KeyValueStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, VocabError>;
    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), VocabError>;
    fn remove(&mut self, key: &str) -> Result<(), VocabError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn in_app_data_dir() -> Self {
        Self::new(get_app_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, VocabError> {
        let file_path = self.path_for(key);
        if !file_path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&file_path)?))
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), VocabError> {
        fs::create_dir_all(&self.dir)?;
        let file_path = self.path_for(key);
        fs::write(&file_path, value)?;
        tracing::debug!(path = %file_path.display(), "saved");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), VocabError> {
        let file_path = self.path_for(key);
        if file_path.exists() {
            fs::remove_file(&file_path)?;
            tracing::debug!(path = %file_path.display(), "deleted");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, VocabError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), VocabError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), VocabError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn save_json<S, T>(store: &mut S, key: &str, data: &T) -> Result<(), VocabError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string_pretty(data)?;
    store.save_raw(key, &json)
}

pub fn load_json<S, T>(store: &S, key: &str) -> Result<T, VocabError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.load_raw(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(T::default()),
    }
}

pub fn load_json_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match load_json::<S, T>(store, key) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to load, using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("quran-vocab-test-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store_json_helpers() {
        let mut store = MemoryStore::new();
        let ids: BTreeSet<u32> = [3, 1, 2].into_iter().collect();

        save_json(&mut store, "learnedWords", &ids).unwrap();
        let loaded: BTreeSet<u32> = load_json(&store, "learnedWords").unwrap();
        assert_eq!(loaded, ids);

        let missing: Vec<u32> = load_json(&store, "bookmarkedWords").unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.save_raw("lastVisitedPage", "not json").unwrap();

        assert!(load_json::<_, Option<u32>>(&store, "lastVisitedPage").is_err());
        assert_eq!(load_json_or_default::<_, Option<u32>>(&store, "lastVisitedPage"), None);
    }

    #[test]
    fn test_file_store_roundtrip_and_remove() {
        let dir = temp_dir();
        let mut store = FileStore::new(&dir);

        assert_eq!(store.load_raw("wordNotes").unwrap(), None);
        store.save_raw("wordNotes", r#"{"7":"remember"}"#).unwrap();
        assert!(store.path_for("wordNotes").exists());
        assert_eq!(store.load_raw("wordNotes").unwrap().as_deref(), Some(r#"{"7":"remember"}"#));

        store.remove("wordNotes").unwrap();
        assert_eq!(store.load_raw("wordNotes").unwrap(), None);
        // removing twice is fine
        store.remove("wordNotes").unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_store_usable_as_trait_object() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        save_json(store.as_mut(), "lastVisitedPage", &Some(4u32)).unwrap();
        let page: Option<u32> = load_json_or_default(store.as_ref(), "lastVisitedPage");
        assert_eq!(page, Some(4));
    }
}
