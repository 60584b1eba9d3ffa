pub mod dataset;
pub mod filter;
pub mod sampler;
pub mod session;
pub mod word;

pub use dataset::Dataset;
pub use filter::FilterCriteria;
pub use session::{Advance, FlashcardSession, SessionState};
pub use word::{Knowledge, WordEntity, WordId, WordPatch};
