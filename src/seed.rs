//! Bundled default word list, restored whenever the stored data is missing, unreadable or reset.
//!
//! `assets/oxford_3000.json` is an abridged stand-in: the first 40 entries of the Oxford 3000
//! list (`a` to `amazing`). Swap in the full list without code changes, since it is parsed at startup.
use crate::export::json::parse_words;
use crate::models::Dataset;

pub const DEFAULT_DATASET_NAME: &str = "Oxford 3000";

const OXFORD_3000_JSON: &str = include_str!("../assets/oxford_3000.json");

pub fn default_dataset() -> Dataset {
    let words = parse_words(OXFORD_3000_JSON).unwrap_or_else(|e| {
        log::error!("Bundled word list is invalid: {}", e);
        Vec::new()
    });
    Dataset::new(DEFAULT_DATASET_NAME, words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Knowledge;

    #[test]
    fn test_bundled_list_parses() {
        let dataset = default_dataset();
        assert_eq!(dataset.name, "Oxford 3000");
        assert_eq!(dataset.words.len(), 40);
        assert_eq!(dataset.words[0].word, "a");
        assert_eq!(dataset.words[39].word, "amazing");
        assert!(
            dataset
                .words
                .iter()
                .all(|w| w.knowledge == Knowledge::DontKnow)
        );
    }
}
