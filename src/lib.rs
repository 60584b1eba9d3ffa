pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod seed;

pub use controller::StudyController;
pub use error::{Result, VocabError};
pub use models::{Dataset, FilterCriteria, FlashcardSession, Knowledge, WordEntity};
