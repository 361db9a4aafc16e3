//! 写作练习 - 流程层
//!
//! 流程顺序：
//! 1. 获取题目（清空之前的作文和反馈）
//! 2. 提交作文，得到评分和反馈，并按段落拆分
//! 3. 可以逐段请求改写，结果按段落下标保存

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{ParagraphImprovementResult, WritingAnalysis};
use crate::parser::parse_response;
use crate::services::{ActionKind, ChallengeTracker, PracticeBackend};

/// 按行拆分段落，去掉空行
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

pub struct WritingPractice<B> {
    backend: Arc<B>,
    challenge: Arc<dyn ChallengeTracker>,
    topic: String,
    analysis: Option<WritingAnalysis>,
    paragraphs: Vec<String>,
    improvements: BTreeMap<usize, ParagraphImprovementResult>,
    error: Option<String>,
}

impl<B: PracticeBackend> WritingPractice<B> {
    pub fn new(backend: Arc<B>, challenge: Arc<dyn ChallengeTracker>) -> Self {
        Self {
            backend,
            challenge,
            topic: String::new(),
            analysis: None,
            paragraphs: Vec::new(),
            improvements: BTreeMap::new(),
            error: None,
        }
    }

    fn clear_feedback(&mut self) {
        self.analysis = None;
        self.paragraphs.clear();
        self.improvements.clear();
        self.error = None;
    }

    fn fail(&mut self, e: AppError) -> AppError {
        warn!("⚠️ {}", e);
        self.error = Some(e.to_string());
        e
    }

    /// 获取新的作文题目
    pub async fn new_topic(&mut self) -> AppResult<&str> {
        self.clear_feedback();
        match self.backend.get_writing_topic().await {
            Ok(topic) if !topic.trim().is_empty() => {
                self.topic = topic.trim().to_string();
                info!("✍️ 新题目: {}", self.topic);
                Ok(&self.topic)
            }
            Ok(_) => Err(self.fail(AppError::schema("写作题目", "题目为空"))),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// 提交作文
    pub async fn analyze(&mut self, text: &str) -> AppResult<&WritingAnalysis> {
        if self.topic.is_empty() || text.trim().is_empty() {
            return Err(self.fail(AppError::invalid_input("请先获取题目并写好作文")));
        }
        self.clear_feedback();

        info!("✍️ 提交作文，长度: {} 字符", text.chars().count());
        let outcome = self
            .backend
            .analyze_written_text(&self.topic, text)
            .await
            .and_then(|raw| parse_response::<WritingAnalysis>(&raw));

        match outcome {
            Ok(analysis) => {
                info!("✓ 作文评分: {}", analysis.overall_score);
                self.paragraphs = split_paragraphs(text);
                self.challenge.track_action(ActionKind::Writing);
                Ok(&*self.analysis.insert(analysis))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// 改写第 `index` 段
    pub async fn improve_paragraph(&mut self, index: usize) -> AppResult<&ParagraphImprovementResult> {
        let Some(paragraph) = self.paragraphs.get(index).cloned() else {
            return Err(self.fail(AppError::invalid_input(format!("第 {} 段不存在", index + 1))));
        };
        self.error = None;

        let outcome = self
            .backend
            .improve_paragraph(&paragraph)
            .await
            .and_then(|raw| parse_response::<ParagraphImprovementResult>(&raw));

        match outcome {
            Ok(improvement) => {
                self.improvements.remove(&index);
                Ok(&*self.improvements.entry(index).or_insert(improvement))
            }
            Err(e) => {
                let message = format!("无法改写第 {} 段: {}", index + 1, e);
                warn!("⚠️ {}", message);
                self.error = Some(message);
                Err(e)
            }
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn analysis(&self) -> Option<&WritingAnalysis> {
        self.analysis.as_ref()
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn improvement(&self, index: usize) -> Option<&ParagraphImprovementResult> {
        self.improvements.get(&index)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
