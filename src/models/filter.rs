//! Word list filtering.
//!
//! A word passes when all four predicates hold:
//! - its lowercase text contains the lowercase name substring (empty matches everything)
//! - the type set is empty or shares at least one tag with the word
//! - the level set is empty or contains the word's level
//! - the knowledge set is empty or contains the word's knowledge tag
//!
//! Results keep the input order and are recomputed on every call.

use super::{Knowledge, WordEntity};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub name_substring: String,
    pub types: BTreeSet<String>,
    pub levels: BTreeSet<String>,
    pub knowledge: BTreeSet<Knowledge>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.name_substring.is_empty()
            && self.types.is_empty()
            && self.levels.is_empty()
            && self.knowledge.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, word: &WordEntity) -> bool {
        word.word
            .to_lowercase()
            .contains(&self.name_substring.to_lowercase())
            && (self.types.is_empty() || word.types.iter().any(|t| self.types.contains(t)))
            && (self.levels.is_empty() || self.levels.contains(&word.level))
            && (self.knowledge.is_empty() || self.knowledge.contains(&word.knowledge))
    }
}

pub fn filter<'a>(words: &'a [WordEntity], criteria: &FilterCriteria) -> Vec<&'a WordEntity> {
    words.iter().filter(|w| criteria.matches(w)).collect()
}

/// Adds `value` to the set if missing, removes it otherwise.
pub fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}
