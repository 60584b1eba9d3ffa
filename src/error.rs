//! Error type shared by the store, the import/export layer and the study controller.

use crate::models::WordId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("Malformed import: {0}")]
    MalformedImport(String),

    #[error("Word '{id}' not found in dataset '{dataset}'")]
    WordNotFound { dataset: String, id: WordId },

    #[error("No unknown words available in the selected dataset")]
    EmptySample,

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Unsupported sample size: {0}")]
    InvalidSampleSize(usize),

    #[error("Unsupported page size: {0}")]
    InvalidPageSize(usize),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VocabError>;
