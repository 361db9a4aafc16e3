//! 听力练习 - 流程层

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{ComprehensionQuestion, Difficulty, ListeningTask, QuizScore};
use crate::parser::parse_response;
use crate::services::{ActionKind, ChallengeTracker, ExamStats, PracticeBackend};
use crate::workflow::answer_sheet::AnswerSheet;

pub const LISTENING_CATEGORY: &str = "Dinleme Pratiği";

fn task_questions(task: &Option<ListeningTask>) -> AppResult<&[ComprehensionQuestion]> {
    task.as_ref()
        .map(|t| t.questions.as_slice())
        .ok_or_else(|| AppError::invalid_input("还没有生成听力任务"))
}

pub struct ListeningPractice<B> {
    backend: Arc<B>,
    challenge: Arc<dyn ChallengeTracker>,
    stats: Arc<ExamStats>,
    difficulty: Difficulty,
    task: Option<ListeningTask>,
    sheet: AnswerSheet,
    error: Option<String>,
}

impl<B: PracticeBackend> ListeningPractice<B> {
    pub fn new(backend: Arc<B>, challenge: Arc<dyn ChallengeTracker>, stats: Arc<ExamStats>) -> Self {
        Self {
            backend,
            challenge,
            stats,
            difficulty: Difficulty::default(),
            task: None,
            sheet: AnswerSheet::default(),
            error: None,
        }
    }

    /// 生成新的听力任务，之前的作答清空
    pub async fn generate(&mut self, difficulty: Difficulty) -> AppResult<&ListeningTask> {
        self.difficulty = difficulty;
        self.task = None;
        self.sheet.reset();
        self.error = None;

        info!("🎧 生成听力任务，难度: {}", difficulty.label());
        let outcome = self
            .backend
            .generate_listening_task(difficulty)
            .await
            .and_then(|raw| parse_response::<ListeningTask>(&raw));

        match outcome {
            Ok(task) => {
                info!("✓ 听力任务生成完成，{} 道题", task.questions.len());
                self.challenge.track_action(ActionKind::Listening);
                Ok(&*self.task.insert(task))
            }
            Err(e) => {
                warn!("⚠️ 听力任务生成失败: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_answer(&mut self, index: usize, key: &str) -> AppResult<bool> {
        let questions = task_questions(&self.task)?;
        self.sheet.select(questions, index, key)
    }

    pub fn reveal(&mut self) -> AppResult<QuizScore> {
        let questions = task_questions(&self.task)?;
        Ok(self.sheet.reveal(questions, &self.stats, LISTENING_CATEGORY))
    }

    pub fn tutor_context(&self, index: usize) -> AppResult<String> {
        let questions = task_questions(&self.task)?;
        let script = self.task.as_ref().map_or("", |t| t.script.as_str());
        self.sheet
            .tutor_context("listening question", ("LISTENING SCRIPT", script), questions, index)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn task(&self) -> Option<&ListeningTask> {
        self.task.as_ref()
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
    use crate::services::fake::{RecordingTracker, ScriptedBackend};

    const TASK: &str = r#"```json
{
    "title": "At the station",
    "script": "The train to Ankara leaves at nine.",
    "questions": [
        {"question": "When does the train leave?", "options": [{"key": "A", "value": "at eight"}, {"key": "B", "value": "at nine"}], "correctAnswer": "B"}
    ]
}
```"#;

    #[tokio::test]
    async fn test_generate_answer_and_reveal() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(TASK.to_string())]));
        let tracker = Arc::new(RecordingTracker::default());
        let stats = Arc::new(ExamStats::new());
        let mut practice = ListeningPractice::new(backend.clone(), tracker.clone(), stats.clone());

        let task = practice.generate(Difficulty::Hard).await.unwrap();
        assert_eq!(task.title.as_deref(), Some("At the station"));
        assert_eq!(backend.calls(), vec!["listening:Hard".to_string()]);
        assert_eq!(tracker.actions(), vec![ActionKind::Listening]);

        assert!(matches!(practice.set_answer(0, "E"), Err(AppError::InvalidInput(_))));
        practice.set_answer(0, "a").unwrap();
        assert_eq!(practice.reveal().unwrap(), QuizScore { correct: 0, total: 1 });
        assert_eq!(stats.category("Dinleme Pratiği").total, 1);

        let context = practice.tutor_context(0).unwrap();
        assert!(context.contains("---LISTENING SCRIPT---\nThe train to Ankara leaves at nine."));
        assert!(context.contains("My answer: A) at eight"));
    }

    #[tokio::test]
    async fn test_failure_clears_previous_task() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(TASK.to_string()),
            Ok(r#"{"script": ""}"#.to_string()),
        ]));
        let mut practice = ListeningPractice::new(
            backend,
            Arc::new(RecordingTracker::default()),
            Arc::new(ExamStats::new()),
        );

        practice.generate(Difficulty::Easy).await.unwrap();
        practice.set_answer(0, "B").unwrap();

        let err = practice.generate(Difficulty::Medium).await.unwrap_err();
        assert!(matches!(err, AppError::SchemaViolation { .. }));
        assert!(practice.task().is_none());
        assert!(practice.sheet().user_answers.is_empty());
        assert_eq!(practice.difficulty(), Difficulty::Medium);
    }
}
