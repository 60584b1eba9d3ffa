//! Dataset is a named, ordered list of words
use super::{Knowledge, WordEntity, WordId};

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub words: Vec<WordEntity>,
}

impl Dataset {
    pub fn new(name: &str, words: Vec<WordEntity>) -> Self {
        Self {
            name: name.to_string(),
            words,
        }
    }

    pub fn find(&self, id: &WordId) -> Option<&WordEntity> {
        self.words.iter().find(|w| &w.id == id)
    }

    pub fn find_mut(&mut self, id: &WordId) -> Option<&mut WordEntity> {
        self.words.iter_mut().find(|w| &w.id == id)
    }

    /// Every part-of-speech tag used in the dataset, in first-seen order.
    pub fn distinct_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for tag in self.words.iter().flat_map(|w| w.types.iter()) {
            if !types.contains(tag) {
                types.push(tag.clone());
            }
        }
        types
    }

    /// Every level label used in the dataset, in first-seen order.
    pub fn distinct_levels(&self) -> Vec<String> {
        let mut levels: Vec<String> = Vec::new();
        for word in &self.words {
            if !levels.contains(&word.level) {
                levels.push(word.level.clone());
            }
        }
        levels
    }

    /// Words the learner has not marked as known; the only candidates for a flashcard game.
    pub fn unknown_words(&self) -> Vec<WordEntity> {
        self.words
            .iter()
            .filter(|w| w.knowledge == Knowledge::DontKnow)
            .cloned()
            .collect()
    }
}
