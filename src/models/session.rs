//! Flashcard game over a sampled list of unknown words.
//! Cards are shown one at a time: word first, translation and example after a click.

use super::WordEntity;
use crate::error::{Result, VocabError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress {
        revealed: bool,
    },
    Completed,
}

/// Result of asking the session to move on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Completed,
    Ignored,
}

#[derive(Clone, Debug)]
pub struct FlashcardSession {
    pub source_dataset: String,
    pub sample_size: usize,
    sample: Vec<WordEntity>,
    current_index: usize,
    state: SessionState,
}

impl FlashcardSession {
    pub fn new(source_dataset: &str, sample_size: usize, sample: Vec<WordEntity>) -> Self {
        Self {
            source_dataset: source_dataset.to_string(),
            sample_size,
            sample,
            current_index: 0,
            state: SessionState::NotStarted,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn sample(&self) -> &[WordEntity] {
        &self.sample
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, SessionState::InProgress { revealed: true })
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Starts the game at the first card. An empty sample leaves the session not started.
    pub fn start(&mut self) -> Result<()> {
        if self.state != SessionState::NotStarted {
            return Ok(());
        }
        if self.sample.is_empty() {
            return Err(VocabError::EmptySample);
        }
        self.current_index = 0;
        self.state = SessionState::InProgress { revealed: false };
        log::info!(
            "Flashcard game started on '{}' with {} words",
            self.source_dataset,
            self.sample.len()
        );
        Ok(())
    }

    /// Flips the current card. Flipping a revealed card hides the answer again.
    pub fn reveal(&mut self) {
        if let SessionState::InProgress { revealed } = self.state {
            self.state = SessionState::InProgress {
                revealed: !revealed,
            };
        }
    }

    pub fn next(&mut self) -> Advance {
        if !matches!(self.state, SessionState::InProgress { .. }) {
            return Advance::Ignored;
        }
        if self.current_index + 1 < self.sample.len() {
            self.current_index += 1;
            self.state = SessionState::InProgress { revealed: false };
            Advance::Moved
        } else {
            self.state = SessionState::Completed;
            log::info!("Flashcard game on '{}' completed", self.source_dataset);
            Advance::Completed
        }
    }

    pub fn previous(&mut self) {
        if matches!(self.state, SessionState::InProgress { .. }) && self.current_index > 0 {
            self.current_index -= 1;
            self.state = SessionState::InProgress { revealed: false };
        }
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
        self.state = SessionState::NotStarted;
    }

    pub fn current_word(&self) -> Option<&WordEntity> {
        match self.state {
            SessionState::InProgress { .. } => self.sample.get(self.current_index),
            _ => None,
        }
    }

    pub fn progress_message(&self) -> String {
        format!("Word {} of {}", self.current_index + 1, self.sample.len())
    }
}
