//! 阅读理解练习 - 流程层
//!
//! 分析一篇文章（摘要、词汇、理解题），作答、公布答案并记入考试统计

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{ComprehensionQuestion, QuizScore, ReadingAnalysisResult};
use crate::parser::parse_response;
use crate::services::{ActionKind, ChallengeTracker, ExamStats, PracticeBackend, VocabularyStore};
use crate::workflow::answer_sheet::AnswerSheet;

pub const READING_CATEGORY: &str = "Okuma Anlama Analizi";

fn analyzed_questions(result: &Option<ReadingAnalysisResult>) -> AppResult<&[ComprehensionQuestion]> {
    result
        .as_ref()
        .map(|r| r.questions.as_slice())
        .ok_or_else(|| AppError::invalid_input("还没有分析文章"))
}

pub struct ReadingPractice<B> {
    backend: Arc<B>,
    challenge: Arc<dyn ChallengeTracker>,
    stats: Arc<ExamStats>,
    vocabulary: Arc<VocabularyStore>,
    passage: String,
    result: Option<ReadingAnalysisResult>,
    sheet: AnswerSheet,
    error: Option<String>,
}

impl<B: PracticeBackend> ReadingPractice<B> {
    pub fn new(
        backend: Arc<B>,
        challenge: Arc<dyn ChallengeTracker>,
        stats: Arc<ExamStats>,
        vocabulary: Arc<VocabularyStore>,
    ) -> Self {
        Self {
            backend,
            challenge,
            stats,
            vocabulary,
            passage: String::new(),
            result: None,
            sheet: AnswerSheet::default(),
            error: None,
        }
    }

    /// 分析文章，之前的结果和作答全部清空
    pub async fn analyze(&mut self, passage: &str) -> AppResult<&ReadingAnalysisResult> {
        if passage.trim().is_empty() {
            let e = AppError::invalid_input("请输入要分析的文章");
            self.error = Some(e.to_string());
            return Err(e);
        }

        self.passage = passage.trim().to_string();
        self.result = None;
        self.sheet.reset();
        self.error = None;

        info!("📖 分析阅读文章，长度: {} 字符", self.passage.chars().count());
        let outcome = self
            .backend
            .analyze_reading_passage(&self.passage)
            .await
            .and_then(|raw| parse_response::<ReadingAnalysisResult>(&raw));

        match outcome {
            Ok(result) => {
                info!("✓ 阅读分析完成，{} 道理解题", result.questions.len());
                self.challenge.track_action(ActionKind::Reading);
                Ok(&*self.result.insert(result))
            }
            Err(e) => {
                warn!("⚠️ 阅读分析失败: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_answer(&mut self, index: usize, key: &str) -> AppResult<bool> {
        let questions = analyzed_questions(&self.result)?;
        self.sheet.select(questions, index, key)
    }

    pub fn reveal(&mut self) -> AppResult<QuizScore> {
        let questions = analyzed_questions(&self.result)?;
        Ok(self.sheet.reveal(questions, &self.stats, READING_CATEGORY))
    }

    /// 收藏或取消收藏一个生词，返回操作后是否已收藏
    pub fn toggle_save_word(&self, word: &str, meaning: &str) -> AppResult<bool> {
        self.vocabulary.toggle_word(word, meaning)
    }

    pub fn tutor_context(&self, index: usize) -> AppResult<String> {
        let questions = analyzed_questions(&self.result)?;
        self.sheet
            .tutor_context("reading question", ("PASSAGE", &self.passage), questions, index)
    }

    pub fn result(&self) -> Option<&ReadingAnalysisResult> {
        self.result.as_ref()
    }

    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake::{RecordingTracker, ScriptedBackend, READING_JSON};

    fn practice(
        responses: Vec<AppResult<String>>,
    ) -> (ReadingPractice<ScriptedBackend>, Arc<RecordingTracker>, Arc<ExamStats>) {
        let tracker = Arc::new(RecordingTracker::default());
        let stats = Arc::new(ExamStats::new());
        let practice = ReadingPractice::new(
            Arc::new(ScriptedBackend::new(responses)),
            tracker.clone(),
            stats.clone(),
            Arc::new(VocabularyStore::in_memory()),
        );
        (practice, tracker, stats)
    }

    #[tokio::test]
    async fn test_empty_passage_rejected_without_backend_call() {
        let (mut practice, tracker, _) = practice(vec![]);
        let err = practice.analyze("   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(practice.error().is_some());
        assert!(practice.backend.calls().is_empty());
        assert!(tracker.actions().is_empty());
    }

    #[tokio::test]
    async fn test_answer_reveal_and_stats() {
        let (mut practice, tracker, stats) = practice(vec![Ok(READING_JSON.to_string())]);
        let result = practice.analyze("Cats sleep a lot.").await.unwrap();
        assert_eq!(result.questions.len(), 2);
        assert_eq!(tracker.actions(), vec![ActionKind::Reading]);

        practice.set_answer(0, "B").unwrap();
        practice.set_answer(1, "a").unwrap();
        let score = practice.reveal().unwrap();
        assert_eq!(score, QuizScore { correct: 1, total: 2 });
        assert_eq!(stats.category("Okuma Anlama Analizi").total, 2);

        let context = practice.tutor_context(0).unwrap();
        assert!(context.contains("---PASSAGE---\nCats sleep a lot."));
        assert!(context.contains("My answer: B) fly"));
        assert!(context.contains("Correct answer: A) sleep"));
    }

    #[tokio::test]
    async fn test_malformed_response_surfaces_one_error() {
        let (mut practice, tracker, _) = practice(vec![Ok("not json".to_string())]);
        let err = practice.analyze("Some passage").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
        assert_eq!(practice.error(), Some(err.to_string().as_str()));
        assert!(practice.result().is_none());
        assert!(tracker.actions().is_empty());
        assert!(practice.set_answer(0, "A").is_err());
    }

    #[test]
    fn test_toggle_save_word() {
        let (practice, _, _) = practice(vec![]);
        assert!(practice.toggle_save_word("nap", "şekerleme").unwrap());
        assert!(!practice.toggle_save_word("nap", "şekerleme").unwrap());
    }
}
