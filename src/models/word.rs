//! A vocabulary record: the word, its parts of speech, level, translation and example sentence,
//! plus the learner's knowledge tag.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a word inside a dataset. Imported files use either numbers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordId::Number(n) => write!(f, "{}", n),
            WordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for WordId {
    fn from(n: u64) -> Self {
        WordId::Number(n)
    }
}

impl From<&str> for WordId {
    fn from(s: &str) -> Self {
        WordId::Text(s.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Knowledge {
    #[serde(rename = "Know")]
    Know,
    #[default]
    #[serde(rename = "Don't Know")]
    DontKnow,
}

impl Knowledge {
    pub const ALL: [Knowledge; 2] = [Knowledge::Know, Knowledge::DontKnow];

    pub fn label(self) -> &'static str {
        match self {
            Knowledge::Know => "Know",
            Knowledge::DontKnow => "Don't Know",
        }
    }
}

impl fmt::Display for Knowledge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordEntity {
    pub id: WordId,
    pub word: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub knowledge: Knowledge,
}

impl WordEntity {
    pub fn new(id: impl Into<WordId>, word: &str) -> Self {
        Self {
            id: id.into(),
            word: word.to_string(),
            types: Vec::new(),
            level: String::new(),
            translation: String::new(),
            example: String::new(),
            knowledge: Knowledge::DontKnow,
        }
    }
}

/// Partial update of a word. Only the fields that are `Some` are replaced.
#[derive(Clone, Debug, Default)]
pub struct WordPatch {
    pub word: Option<String>,
    pub types: Option<Vec<String>>,
    pub level: Option<String>,
    pub translation: Option<String>,
    pub example: Option<String>,
    pub knowledge: Option<Knowledge>,
}

impl WordPatch {
    pub fn knowledge(knowledge: Knowledge) -> Self {
        Self {
            knowledge: Some(knowledge),
            ..Default::default()
        }
    }

    /// The edit form only touches the translation and the example sentence.
    pub fn edit(translation: &str, example: &str) -> Self {
        Self {
            translation: Some(translation.to_string()),
            example: Some(example.to_string()),
            ..Default::default()
        }
    }

    pub fn apply(&self, target: &mut WordEntity) {
        if let Some(word) = &self.word {
            target.word = word.clone();
        }
        if let Some(types) = &self.types {
            target.types = types.clone();
        }
        if let Some(level) = &self.level {
            target.level = level.clone();
        }
        if let Some(translation) = &self.translation {
            target.translation = translation.clone();
        }
        if let Some(example) = &self.example {
            target.example = example.clone();
        }
        if let Some(knowledge) = self.knowledge {
            target.knowledge = knowledge;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_defaults_to_dont_know() {
        let word: WordEntity =
            serde_json::from_str(r#"{"id": 7, "word": "apple", "types": ["noun"], "level": "A1"}"#)
                .unwrap();

        assert_eq!(word.id, WordId::Number(7));
        assert_eq!(word.knowledge, Knowledge::DontKnow);
        assert_eq!(word.translation, "");
    }

    #[test]
    fn test_knowledge_labels_match_stored_form() {
        let json = serde_json::to_string(&Knowledge::DontKnow).unwrap();
        assert_eq!(json, "\"Don't Know\"");

        let know: Knowledge = serde_json::from_str("\"Know\"").unwrap();
        assert_eq!(know, Knowledge::Know);
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let word: WordEntity = serde_json::from_str(r#"{"id": "w-1", "word": "about"}"#).unwrap();
        assert_eq!(word.id, WordId::from("w-1"));
        assert_eq!(word.id.to_string(), "w-1");
    }

    #[test]
    fn test_patch_only_replaces_given_fields() {
        let mut word = WordEntity::new(1, "book");
        word.translation = "old".to_string();
        word.example = "I read a book.".to_string();

        let patch = WordPatch {
            translation: Some("หนังสือ".to_string()),
            ..Default::default()
        };
        patch.apply(&mut word);

        assert_eq!(word.translation, "หนังสือ");
        assert_eq!(word.example, "I read a book.");
        assert_eq!(word.word, "book");
    }
}
