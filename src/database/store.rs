//! In-memory datasets backed by the `app_state` table.
//!
//! The store owns the connection and is the only writer of the datasets blob. Every
//! mutation re-serializes the whole name -> words mapping and overwrites the stored value.

use super::db;
use crate::error::{Result, VocabError};
use crate::export::json::{parse_words, words_to_json};
use crate::models::{Dataset, Knowledge, WordEntity, WordId, WordPatch};
use crate::seed::{DEFAULT_DATASET_NAME, default_dataset};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::collections::BTreeMap;

pub struct DatasetStore {
    conn: Connection,
    key: String,
    datasets: BTreeMap<String, Dataset>,
    active: String,
}

fn seed_datasets() -> BTreeMap<String, Dataset> {
    let seed = default_dataset();
    BTreeMap::from([(seed.name.clone(), seed)])
}

fn decode(raw: &str) -> Result<BTreeMap<String, Dataset>> {
    let blob: BTreeMap<String, Vec<WordEntity>> = serde_json::from_str(raw)?;
    Ok(blob
        .into_iter()
        .map(|(name, words)| {
            let dataset = Dataset::new(&name, words);
            (name, dataset)
        })
        .collect())
}

fn encode(datasets: &BTreeMap<String, Dataset>) -> Result<String> {
    let blob: BTreeMap<&str, &[WordEntity]> = datasets
        .iter()
        .map(|(name, dataset)| (name.as_str(), dataset.words.as_slice()))
        .collect();
    Ok(serde_json::to_string(&blob)?)
}

/// Seed name if present, otherwise the first stored name.
fn initial_active(datasets: &BTreeMap<String, Dataset>) -> String {
    if datasets.contains_key(DEFAULT_DATASET_NAME) {
        DEFAULT_DATASET_NAME.to_string()
    } else {
        datasets.keys().next().cloned().unwrap_or_default()
    }
}

/// Reads the stored mapping. Missing, empty or unreadable data yields the seed dataset.
pub fn load(key: &str, conn: &Connection) -> Result<BTreeMap<String, Dataset>> {
    let Some(raw) = db::read_value(key, conn)? else {
        log::info!("No stored datasets, using '{}'", DEFAULT_DATASET_NAME);
        return Ok(seed_datasets());
    };

    match decode(&raw) {
        Ok(datasets) if !datasets.is_empty() => Ok(datasets),
        Ok(_) => {
            log::info!("Stored datasets are empty, using '{}'", DEFAULT_DATASET_NAME);
            Ok(seed_datasets())
        }
        Err(e) => {
            log::warn!("Stored datasets could not be read ({}), using '{}'", e, DEFAULT_DATASET_NAME);
            Ok(seed_datasets())
        }
    }
}

impl DatasetStore {
    /// Loads the datasets stored under `key` and writes them back so the store starts in sync
    pub fn open(conn: Connection, key: &str) -> Result<Self> {
        let datasets = load(key, &conn)?;
        let active = initial_active(&datasets);
        let store = Self {
            conn,
            key: key.to_string(),
            datasets,
            active,
        };
        store.save()?;

        log::info!("Loaded {} datasets", store.datasets.len());
        for dataset in store.datasets.values() {
            log::debug!("  - {} ({} words)", dataset.name, dataset.words.len());
        }
        Ok(store)
    }

    /// Overwrites the stored blob with the full in-memory mapping
    pub fn save(&self) -> Result<()> {
        self.write(&self.datasets)
    }

    fn write(&self, datasets: &BTreeMap<String, Dataset>) -> Result<()> {
        db::write_value(&self.key, &encode(datasets)?, &self.conn)?;
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        db::updated_at(&self.key, &self.conn).ok().flatten()
    }

    pub fn dataset_names(&self) -> Vec<&str> {
        self.datasets.keys().map(|name| name.as_str()).collect()
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    pub fn active_name(&self) -> &str {
        &self.active
    }

    pub fn active(&self) -> Option<&Dataset> {
        self.datasets.get(&self.active)
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.datasets.contains_key(name) {
            return Err(VocabError::DatasetNotFound(name.to_string()));
        }
        self.active = name.to_string();
        Ok(())
    }

    /// Validates `raw_json` and stores it under `name`, replacing any dataset with that name.
    /// On failure nothing changes, in memory or on disk.
    pub fn import_dataset(&mut self, name: &str, raw_json: &str) -> Result<&Dataset> {
        let words = parse_words(raw_json)?;
        let count = words.len();

        let mut next = self.datasets.clone();
        next.insert(name.to_string(), Dataset::new(name, words));
        self.write(&next)?;

        self.datasets = next;
        self.active = name.to_string();

        log::info!("Dataset '{}' imported with {} words", name, count);
        self.dataset(name)
            .ok_or_else(|| VocabError::DatasetNotFound(name.to_string()))
    }

    /// The named dataset's words as a JSON array, the same format `import_dataset` accepts
    pub fn export_dataset(&self, name: &str) -> Result<String> {
        let dataset = self
            .dataset(name)
            .ok_or_else(|| VocabError::DatasetNotFound(name.to_string()))?;
        words_to_json(&dataset.words)
    }

    /// Drops every stored value and keeps only the bundled dataset
    pub fn reset_to_default(&mut self) -> Result<()> {
        let datasets = seed_datasets();
        let blob = encode(&datasets)?;

        let tx = self.conn.transaction()?;
        db::clear_all(&tx)?;
        db::write_value(&self.key, &blob, &tx)?;
        tx.commit()?;

        self.datasets = datasets;
        self.active = DEFAULT_DATASET_NAME.to_string();
        log::info!("Data reset to '{}'", DEFAULT_DATASET_NAME);
        Ok(())
    }

    /// Applies `patch` to one word. The in-memory copy only changes once the write succeeded.
    pub fn update_word(&mut self, dataset: &str, id: &WordId, patch: &WordPatch) -> Result<()> {
        let mut next = self.datasets.clone();
        let target = next
            .get_mut(dataset)
            .ok_or_else(|| VocabError::DatasetNotFound(dataset.to_string()))?;
        let word = target
            .find_mut(id)
            .ok_or_else(|| VocabError::WordNotFound {
                dataset: dataset.to_string(),
                id: id.clone(),
            })?;

        patch.apply(word);
        self.write(&next)?;

        self.datasets = next;
        log::debug!("Word {} in '{}' updated", id, dataset);
        Ok(())
    }

    pub fn set_knowledge(&mut self, dataset: &str, id: &WordId, knowledge: Knowledge) -> Result<()> {
        self.update_word(dataset, id, &WordPatch::knowledge(knowledge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "wordDatasets";

    fn open_store() -> DatasetStore {
        DatasetStore::open(db::init_in_memory().unwrap(), KEY).unwrap()
    }

    fn stored_blob(store: &DatasetStore) -> Option<String> {
        db::read_value(KEY, store.connection()).unwrap()
    }

    const THREE_WORDS: &str = r#"[
        {"id": 1, "word": "red", "types": ["adjective"], "level": "A1", "translation": "แดง", "example": "A red car.", "knowledge": "Know"},
        {"id": 2, "word": "green", "types": ["adjective"], "level": "A1", "translation": "เขียว", "example": "Green grass.", "knowledge": "Don't Know"},
        {"id": 3, "word": "blue", "types": ["adjective", "noun"], "level": "A1", "translation": "น้ำเงิน", "example": "The blue sky.", "knowledge": "Don't Know"}
    ]"#;

    #[test]
    fn test_empty_storage_is_seeded() {
        let store = open_store();

        assert_eq!(store.active_name(), DEFAULT_DATASET_NAME);
        assert_eq!(store.dataset_names(), vec![DEFAULT_DATASET_NAME]);
        assert!(stored_blob(&store).is_some());
        assert!(store.last_saved().is_some());
    }

    #[test]
    fn test_unreadable_blob_falls_back_to_seed() {
        let conn = db::init_in_memory().unwrap();
        db::write_value(KEY, "{ broken", &conn).unwrap();

        let store = DatasetStore::open(conn, KEY).unwrap();
        assert_eq!(store.dataset_names(), vec![DEFAULT_DATASET_NAME]);
    }

    #[test]
    fn test_empty_mapping_is_reseeded() {
        let conn = db::init_in_memory().unwrap();
        db::write_value(KEY, "{}", &conn).unwrap();

        let store = DatasetStore::open(conn, KEY).unwrap();
        assert_eq!(store.dataset_names(), vec![DEFAULT_DATASET_NAME]);
        assert_eq!(store.active_name(), DEFAULT_DATASET_NAME);

        let reloaded = load(KEY, store.connection()).unwrap();
        assert!(reloaded.contains_key(DEFAULT_DATASET_NAME));
    }

    #[test]
    fn test_first_name_is_active_without_seed() {
        let conn = db::init_in_memory().unwrap();
        db::write_value(KEY, r#"{"Zoo": [], "Animals": [{"id": 1, "word": "cat"}]}"#, &conn)
            .unwrap();

        let store = DatasetStore::open(conn, KEY).unwrap();
        assert_eq!(store.active_name(), "Animals");
        assert_eq!(store.dataset_names(), vec!["Animals", "Zoo"]);
    }

    #[test]
    fn test_import_makes_dataset_active() {
        let mut store = open_store();
        let dataset = store.import_dataset("Colours", THREE_WORDS).unwrap();
        assert_eq!(dataset.words.len(), 3);

        assert_eq!(store.active_name(), "Colours");
        assert!(stored_blob(&store).unwrap().contains("Colours"));
    }

    #[test]
    fn test_malformed_import_changes_nothing() {
        let mut store = open_store();
        let before_words = store.active().unwrap().words.clone();
        let before_blob = stored_blob(&store);

        let result = store.import_dataset("Bad", r#"{"not": "an array"}"#);

        assert!(matches!(result, Err(VocabError::MalformedImport(_))));
        assert_eq!(store.active_name(), DEFAULT_DATASET_NAME);
        assert_eq!(store.active().unwrap().words, before_words);
        assert!(store.dataset("Bad").is_none());
        assert_eq!(stored_blob(&store), before_blob);
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut store = open_store();
        store.import_dataset("Colours", THREE_WORDS).unwrap();
        let original = store.dataset("Colours").unwrap().words.clone();

        let exported = store.export_dataset("Colours").unwrap();
        store.import_dataset("Colours", &exported).unwrap();

        assert_eq!(store.dataset("Colours").unwrap().words, original);
    }

    #[test]
    fn test_export_unknown_dataset() {
        let store = open_store();
        assert!(matches!(
            store.export_dataset("Nope"),
            Err(VocabError::DatasetNotFound(_))
        ));
    }

    #[test]
    fn test_update_missing_word_leaves_storage() {
        let mut store = open_store();
        let before = stored_blob(&store);

        let patch = WordPatch {
            translation: Some("x".to_string()),
            ..Default::default()
        };
        let result = store.update_word(DEFAULT_DATASET_NAME, &WordId::from("missing-id"), &patch);

        assert!(matches!(result, Err(VocabError::WordNotFound { .. })));
        assert_eq!(stored_blob(&store), before);
    }

    #[test]
    fn test_update_word_persists() {
        let conn = db::init_in_memory().unwrap();
        let mut store = DatasetStore::open(conn, KEY).unwrap();
        store.import_dataset("Colours", THREE_WORDS).unwrap();

        store
            .update_word("Colours", &WordId::from(2), &WordPatch::edit("สีเขียว", "Green apples."))
            .unwrap();
        store
            .set_knowledge("Colours", &WordId::from(3), Knowledge::Know)
            .unwrap();

        let reloaded = load(KEY, store.connection()).unwrap();
        let colours = &reloaded["Colours"];
        assert_eq!(colours.words[1].translation, "สีเขียว");
        assert_eq!(colours.words[1].example, "Green apples.");
        assert_eq!(colours.words[2].knowledge, Knowledge::Know);
    }

    #[test]
    fn test_reset_restores_only_seed() {
        let mut store = open_store();
        store.import_dataset("Colours", THREE_WORDS).unwrap();
        store.reset_to_default().unwrap();

        assert_eq!(store.active_name(), DEFAULT_DATASET_NAME);
        assert_eq!(store.dataset_names(), vec![DEFAULT_DATASET_NAME]);

        let reloaded = load(KEY, store.connection()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.contains_key(DEFAULT_DATASET_NAME));
    }

    #[test]
    fn test_set_active_unknown_dataset() {
        let mut store = open_store();
        assert!(store.set_active("Missing").is_err());
        assert_eq!(store.active_name(), DEFAULT_DATASET_NAME);
    }

    #[test]
    fn test_failed_write_keeps_memory_in_sync() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.sqlite3");
        let mut store = DatasetStore::open(db::init_database(&path).unwrap(), KEY).unwrap();
        let seed_words = store.active().unwrap().words.clone();
        let first_id = seed_words[0].id.clone();

        store
            .connection()
            .execute_batch("PRAGMA query_only = ON")
            .unwrap();

        let imported = store.import_dataset("Colours", THREE_WORDS);
        assert!(matches!(imported, Err(VocabError::Database(_))));
        assert_eq!(store.active_name(), DEFAULT_DATASET_NAME);
        assert!(store.dataset("Colours").is_none());

        let patch = WordPatch {
            translation: Some("CHANGED".to_string()),
            ..Default::default()
        };
        let updated = store.update_word(DEFAULT_DATASET_NAME, &first_id, &patch);
        assert!(matches!(updated, Err(VocabError::Database(_))));
        assert_eq!(store.active().unwrap().words, seed_words);

        let persisted = load(KEY, store.connection()).unwrap();
        assert!(!persisted.contains_key("Colours"));
        assert_eq!(persisted[DEFAULT_DATASET_NAME].words, seed_words);
    }

    #[test]
    fn test_datasets_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.sqlite3");

        {
            let mut store = DatasetStore::open(db::init_database(&path).unwrap(), KEY).unwrap();
            store.import_dataset("Colours", THREE_WORDS).unwrap();
        }

        let store = DatasetStore::open(db::init_database(&path).unwrap(), KEY).unwrap();
        assert_eq!(store.dataset("Colours").unwrap().words.len(), 3);
        assert_eq!(store.active_name(), DEFAULT_DATASET_NAME);
    }
}
