//! 单元测试用的脚本化后端：按顺序返回预先放好的响应，并记录每次调用

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::error::{AppError, AppResult};
use crate::models::{AnalysisResult, Difficulty};
use crate::services::{ActionKind, ChallengeTracker, ImageSearch, PracticeBackend, QuestionBackend};

#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<AppResult<String>>>,
    calls: Mutex<Vec<String>>,
    image: Mutex<Option<AppResult<Option<String>>>>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<AppResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn with_image(self, image: AppResult<Option<String>>) -> Self {
        *self.image.lock().unwrap_or_else(PoisonError::into_inner) = Some(image);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn next(&self, call: String) -> AppResult<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(AppError::invalid_input("脚本已用完")))
    }
}

impl QuestionBackend for ScriptedBackend {
    async fn analyze_question(&self, question: &str) -> AppResult<String> {
        self.next(format!("analyze:{}", question))
    }

    async fn generate_similar_quiz(
        &self,
        _analysis: &AnalysisResult,
        question: &str,
        count: usize,
    ) -> AppResult<String> {
        self.next(format!("quiz:{}:{}", count, question))
    }
}

impl PracticeBackend for ScriptedBackend {
    async fn analyze_reading_passage(&self, text: &str) -> AppResult<String> {
        self.next(format!("reading:{}", text))
    }

    async fn get_dictionary_entry(&self, word: &str) -> AppResult<String> {
        self.next(format!("dictionary:{}", word))
    }

    async fn get_writing_topic(&self) -> AppResult<String> {
        self.next("topic".to_string())
    }

    async fn analyze_written_text(&self, _topic: &str, text: &str) -> AppResult<String> {
        self.next(format!("writing:{}", text))
    }

    async fn improve_paragraph(&self, paragraph: &str) -> AppResult<String> {
        self.next(format!("improve:{}", paragraph))
    }

    async fn generate_listening_task(&self, difficulty: Difficulty) -> AppResult<String> {
        self.next(format!("listening:{:?}", difficulty))
    }
}

impl ImageSearch for ScriptedBackend {
    async fn search_image(&self, query: &str) -> AppResult<Option<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("image:{}", query));
        self.image
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or(Ok(None))
    }
}

/// 记录收到的练习信号
#[derive(Default)]
pub struct RecordingTracker {
    actions: Mutex<Vec<ActionKind>>,
}

impl RecordingTracker {
    pub fn actions(&self) -> Vec<ActionKind> {
        self.actions.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ChallengeTracker for RecordingTracker {
    fn track_action(&self, kind: ActionKind) {
        self.actions.lock().unwrap_or_else(PoisonError::into_inner).push(kind);
    }
}

pub const ANALYSIS_JSON: &str = r#"{"questionType":"Vocabulary","difficulty":"Medium","correctAnswer":"B","explanation":"Ubiquitous means found everywhere."}"#;

pub const READING_JSON: &str = r#"{
    "summary": "A short text about cats.",
    "vocabulary": [{"word": "nap", "meaning": "şekerleme"}],
    "questions": [
        {"question": "What do cats do?", "options": [{"key": "A", "value": "sleep"}, {"key": "B", "value": "fly"}], "correctAnswer": "A"},
        {"question": "Where?", "options": [{"key": "A", "value": "home"}, {"key": "B", "value": "sky"}], "correctAnswer": "A"}
    ]
}"#;
