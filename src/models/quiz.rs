use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use crate::models::analysis::AnalysisResult;
use crate::models::question::ParsedQuestion;

/// 一次相似题测验的状态
///
/// 每条分析结果最多一个，互不共享
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
    pub questions: Vec<ParsedQuestion>,
    /// 题目下标（从 0 开始）→ 选项字母
    pub user_answers: BTreeMap<usize, String>,
    pub show_results: bool,
    pub is_loading: bool,
    pub error: String,
}

impl QuizState {
    /// 正在生成中的占位状态
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// 新生成的测验，答案和结果展示全部重置
    pub fn ready(questions: Vec<ParsedQuestion>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    /// 保留占位状态的形状，只记录错误
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.is_loading = false;
        self.error = error.into();
        self
    }

    pub fn is_ready(&self) -> bool {
        !self.is_loading && !self.questions.is_empty()
    }

    /// 答对的题数
    pub fn score(&self) -> QuizScore {
        let correct = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| q.is_correct(self.user_answers.get(i).map(String::as_str)))
            .count();
        QuizScore {
            correct,
            total: self.questions.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

/// 一条分析结果，也是界面上独立状态的单位
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisWithQuestion {
    pub id: String,
    pub question: String,
    pub analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizState>,
}

impl AnalysisWithQuestion {
    pub fn new(question: impl Into<String>, analysis: AnalysisResult) -> Self {
        Self {
            id: new_result_id(),
            question: question.into(),
            analysis,
            quiz: None,
        }
    }
}

/// 生成结果 ID：时间戳 + 随机后缀
pub fn new_result_id() -> String {
    let suffix: u64 = rand::thread_rng().gen();
    format!(
        "{}-{:016x}",
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuizOption;
    use std::collections::HashSet;

    fn question(correct: &str) -> ParsedQuestion {
        ParsedQuestion {
            number: 1,
            question_text: "Pick one".to_string(),
            options: vec![
                QuizOption { key: "A".to_string(), value: "one".to_string() },
                QuizOption { key: "B".to_string(), value: "two".to_string() },
            ],
            correct_answer: Some(correct.to_string()),
            full_text: "1) Pick one A) one B) two".to_string(),
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| new_result_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_failed_keeps_placeholder_shape() {
        let state = QuizState::loading().failed("boom");
        assert!(!state.is_loading);
        assert_eq!(state.error, "boom");
        assert!(state.questions.is_empty());
        assert!(state.user_answers.is_empty());
        assert!(!state.show_results);
    }

    #[test]
    fn test_score_counts_only_correct_answers() {
        let mut state = QuizState::ready(vec![question("A"), question("B"), question("A")]);
        state.user_answers.insert(0, "A".to_string());
        state.user_answers.insert(1, "A".to_string());
        assert_eq!(state.score(), QuizScore { correct: 1, total: 3 });
    }
}
