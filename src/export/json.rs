//! JSON import/export for word datasets.
//! An import file is a JSON array of words; the dataset takes its name from the file name.

use crate::error::{Result, VocabError};
use crate::models::{Dataset, WordEntity};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Validates raw JSON as a list of words.
/// The root must be an array, every entry must carry at least `id` and `word`, and ids must be unique.
pub fn parse_words(raw: &str) -> Result<Vec<WordEntity>> {
    let root: Value =
        serde_json::from_str(raw).map_err(|e| VocabError::MalformedImport(e.to_string()))?;

    let entries = match root {
        Value::Array(entries) => entries,
        other => {
            return Err(VocabError::MalformedImport(format!(
                "expected an array of words, found {}",
                json_kind(&other)
            )));
        }
    };

    let mut words = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let word: WordEntity = serde_json::from_value(entry)
            .map_err(|e| VocabError::MalformedImport(format!("entry {}: {}", i + 1, e)))?;
        words.push(word);
    }

    let mut seen = HashSet::new();
    for word in &words {
        if !seen.insert(&word.id) {
            return Err(VocabError::MalformedImport(format!(
                "duplicate word id {}",
                word.id
            )));
        }
    }

    Ok(words)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn words_to_json(words: &[WordEntity]) -> Result<String> {
    Ok(serde_json::to_string_pretty(words)?)
}

/// Writes the dataset's words to `path` as a JSON array
pub fn export_json_to_path(dataset: &Dataset, path: &Path) -> Result<()> {
    fs::write(path, words_to_json(&dataset.words)?)?;
    log::info!(
        "Dataset '{}' exported to '{}'",
        dataset.name,
        path.display()
    );
    Ok(())
}

/// "Oxford 5000.json" -> "Oxford 5000". Only the last extension is stripped.
pub fn dataset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(|stem| stem.to_string())
}

/// Reads an import file, returning the dataset name and the raw contents
pub fn read_import_file(path: &Path) -> Result<(String, String)> {
    let name = dataset_name_from_path(path).ok_or_else(|| {
        VocabError::MalformedImport(format!("cannot name a dataset after '{}'", path.display()))
    })?;
    let contents = fs::read_to_string(path)?;
    Ok((name, contents))
}
