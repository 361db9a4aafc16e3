pub mod analysis;
pub mod history;
pub mod practice;
pub mod question;
pub mod quiz;
pub mod user;

pub use analysis::{AnalysisResult, VocabularyEntry};
pub use history::{HistoryItem, VocabularyItem};
pub use practice::{
    ComprehensionQuestion, DictionaryEntry, Difficulty, GrammarError, ListeningTask,
    ParagraphImprovementResult, ReadingAnalysisResult, WritingAnalysis,
};
pub use question::{ParsedQuestion, ParsedQuiz, QuizOption};
pub use quiz::{AnalysisWithQuestion, QuizScore, QuizState};
pub use user::{storage_key, AppUser};
