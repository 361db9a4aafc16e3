pub mod backend;
pub mod challenge;
pub mod exam_stats;
#[cfg(test)]
pub(crate) mod fake;
pub mod history_store;
pub mod llm_service;
pub mod local_storage;
pub mod vocabulary_store;

pub use backend::{ImageSearch, PracticeBackend, QuestionBackend};
pub use challenge::{ActionKind, ChallengeProgress, ChallengeTracker, DailyChallenge};
pub use exam_stats::{CategoryStats, ExamStats};
pub use history_store::{HistoryStore, JsonHistoryStore, MemoryHistoryStore};
pub use llm_service::LlmService;
pub use local_storage::LocalStorage;
pub use vocabulary_store::VocabularyStore;
