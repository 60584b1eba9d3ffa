//! Commands behind both screens: the filtered word table and the flashcard game.
//!
//! The controller receives the dataset store and keeps the state that is not persisted:
//! filter criteria, the table page and the current flashcard session. Switching datasets or
//! resetting the data throws the session away.

use crate::config::AppConfig;
use crate::database::store::DatasetStore;
use crate::error::{Result, VocabError};
use crate::export::json::{export_json_to_path, read_import_file};
use crate::models::filter::{self, FilterCriteria};
use crate::models::{Advance, Dataset, FlashcardSession, Knowledge, WordEntity, WordId, WordPatch};
use crate::models::sampler;
use rand::Rng;
use std::path::Path;

pub struct StudyController {
    store: DatasetStore,
    criteria: FilterCriteria,
    page: usize,
    rows_per_page: usize,
    default_rows_per_page: usize,
    sample_sizes: Vec<usize>,
    sample_size: usize,
    session: Option<FlashcardSession>,
}

impl StudyController {
    pub fn new(store: DatasetStore, config: &AppConfig) -> Self {
        // A zero page size would divide by zero in `page_count`.
        let rows_per_page = config.rows_per_page.max(1);
        Self {
            store,
            criteria: FilterCriteria::default(),
            page: 0,
            rows_per_page,
            default_rows_per_page: rows_per_page,
            sample_sizes: config.sample_sizes.clone(),
            sample_size: config.default_sample_size,
            session: None,
        }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn active_dataset(&self) -> Option<&Dataset> {
        self.store.active()
    }

    pub fn select_dataset(&mut self, name: &str) -> Result<()> {
        if name == self.store.active_name() {
            return Ok(());
        }
        self.store.set_active(name)?;
        self.session = None;
        self.page = 0;
        log::debug!("Active dataset is now '{}'", name);
        Ok(())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_name_filter(&mut self, text: &str) {
        if self.criteria.name_substring != text {
            self.criteria.name_substring = text.to_string();
            self.page = 0;
        }
    }

    pub fn toggle_type_filter(&mut self, tag: &str) {
        filter::toggle(&mut self.criteria.types, tag.to_string());
        self.page = 0;
    }

    pub fn toggle_level_filter(&mut self, level: &str) {
        filter::toggle(&mut self.criteria.levels, level.to_string());
        self.page = 0;
    }

    pub fn toggle_knowledge_filter(&mut self, knowledge: Knowledge) {
        filter::toggle(&mut self.criteria.knowledge, knowledge);
        self.page = 0;
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.page = 0;
    }

    /// Active dataset rows that pass the current criteria, in dataset order
    pub fn filtered_words(&self) -> Vec<&WordEntity> {
        match self.store.active() {
            Some(dataset) => filter::filter(&dataset.words, &self.criteria),
            None => Vec::new(),
        }
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Changes the page size and goes back to the first page
    pub fn set_rows_per_page(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(VocabError::InvalidPageSize(size));
        }
        if size != self.rows_per_page {
            self.rows_per_page = size;
            self.page = 0;
        }
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.filtered_words().len().div_ceil(self.rows_per_page).max(1)
    }

    /// Current page, clamped to the last page of the filtered rows
    pub fn page(&self) -> usize {
        self.page.min(self.page_count() - 1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    /// Rows on the current page, each with its position in the filtered list
    pub fn page_rows(&self) -> Vec<(usize, &WordEntity)> {
        let start = self.page() * self.rows_per_page;
        self.filtered_words()
            .into_iter()
            .enumerate()
            .skip(start)
            .take(self.rows_per_page)
            .collect()
    }

    pub fn edit_word(&mut self, id: &WordId, translation: &str, example: &str) -> Result<()> {
        let dataset = self.store.active_name().to_string();
        self.store
            .update_word(&dataset, id, &WordPatch::edit(translation, example))
    }

    pub fn set_knowledge(&mut self, id: &WordId, knowledge: Knowledge) -> Result<()> {
        let dataset = self.store.active_name().to_string();
        self.store.set_knowledge(&dataset, id, knowledge)
    }

    /// Imports raw JSON as dataset `name`; the previous dataset stays active on failure
    pub fn import(&mut self, name: &str, raw_json: &str) -> Result<usize> {
        let count = self.store.import_dataset(name, raw_json)?.words.len();
        self.session = None;
        self.page = 0;
        Ok(count)
    }

    /// Imports a file, naming the dataset after it. Returns the dataset name and word count.
    pub fn import_file(&mut self, path: &Path) -> Result<(String, usize)> {
        let (name, contents) = read_import_file(path)?;
        let count = self.import(&name, &contents)?;
        Ok((name, count))
    }

    pub fn export_active_to(&self, path: &Path) -> Result<()> {
        let name = self.store.active_name();
        let dataset = self
            .store
            .dataset(name)
            .ok_or_else(|| VocabError::DatasetNotFound(name.to_string()))?;
        export_json_to_path(dataset, path)
    }

    /// Restores the bundled dataset and forgets filters, paging and any game in progress
    pub fn reset_to_default(&mut self) -> Result<()> {
        self.store.reset_to_default()?;
        self.criteria.clear();
        self.page = 0;
        self.rows_per_page = self.default_rows_per_page;
        self.session = None;
        Ok(())
    }

    pub fn sample_sizes(&self) -> &[usize] {
        &self.sample_sizes
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn set_sample_size(&mut self, size: usize) -> Result<()> {
        if !self.sample_sizes.contains(&size) {
            return Err(VocabError::InvalidSampleSize(size));
        }
        self.sample_size = size;
        Ok(())
    }

    pub fn session(&self) -> Option<&FlashcardSession> {
        self.session.as_ref()
    }

    pub fn start_session(&mut self) -> Result<&FlashcardSession> {
        self.start_session_with(&mut rand::rng())
    }

    /// Samples the active dataset's unknown words and starts a game over them.
    /// With no unknown words there is no session at all.
    pub fn start_session_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&FlashcardSession> {
        let dataset = self
            .store
            .active()
            .ok_or_else(|| VocabError::DatasetNotFound(self.store.active_name().to_string()))?;

        let picked = sampler::sample(&dataset.unknown_words(), self.sample_size, rng);
        let mut session = FlashcardSession::new(&dataset.name, self.sample_size, picked);
        if let Err(e) = session.start() {
            log::warn!("No unknown words in '{}'", dataset.name);
            self.session = None;
            return Err(e);
        }

        Ok(&*self.session.insert(session))
    }

    pub fn reveal(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reveal();
        }
    }

    pub fn next_card(&mut self) -> Advance {
        self.session
            .as_mut()
            .map(|session| session.next())
            .unwrap_or(Advance::Ignored)
    }

    pub fn previous_card(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.previous();
        }
    }

    pub fn end_session(&mut self) {
        self.session = None;
    }
}
