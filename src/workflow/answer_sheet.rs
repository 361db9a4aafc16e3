//! 答题卡：记录选项、公布答案
//!
//! 测验、阅读、听力三处共用同一套规则：
//! - 题目下标从 0 开始，每题只保留最后一次选择
//! - 选项字母必须是该题的选项之一（统一转为大写）
//! - 公布答案后不再接受修改

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{ComprehensionQuestion, QuizScore};
use crate::services::ExamStats;
use crate::workflow::tutor::TutorQuestion;

/// 记录一次选择
///
/// `option_keys` 为 `None` 表示题目不存在。
/// 返回是否真的写入（公布答案后返回 `false`）
pub fn record_answer(
    answers: &mut BTreeMap<usize, String>,
    show_results: bool,
    index: usize,
    key: &str,
    option_keys: Option<Vec<&str>>,
) -> AppResult<bool> {
    let Some(option_keys) = option_keys else {
        return Err(AppError::invalid_input(format!("第 {} 题不存在", index + 1)));
    };
    if show_results {
        debug!("答案已公布，忽略第 {} 题的修改", index + 1);
        return Ok(false);
    }

    let key = key.trim().to_ascii_uppercase();
    if !option_keys.is_empty() && !option_keys.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
        return Err(AppError::invalid_input(format!(
            "第 {} 题没有选项 {}",
            index + 1,
            key
        )));
    }

    answers.insert(index, key);
    Ok(true)
}

/// 阅读、听力使用的答题卡
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSheet {
    pub user_answers: BTreeMap<usize, String>,
    pub show_results: bool,
}

impl AnswerSheet {
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.user_answers.get(&index).map(String::as_str)
    }

    pub fn reset(&mut self) {
        self.user_answers.clear();
        self.show_results = false;
    }

    pub fn select(
        &mut self,
        questions: &[ComprehensionQuestion],
        index: usize,
        key: &str,
    ) -> AppResult<bool> {
        let option_keys = questions
            .get(index)
            .map(|q| q.options.iter().map(|o| o.key.as_str()).collect());
        record_answer(&mut self.user_answers, self.show_results, index, key, option_keys)
    }

    pub fn score(&self, questions: &[ComprehensionQuestion]) -> QuizScore {
        let correct = questions
            .iter()
            .enumerate()
            .filter(|(i, q)| {
                self.answer(*i)
                    .is_some_and(|a| a.eq_ignore_ascii_case(&q.correct_answer))
            })
            .count();
        QuizScore {
            correct,
            total: questions.len(),
        }
    }

    /// 公布答案，每道题记一次考试统计（重复公布不重复记录）
    pub fn reveal(
        &mut self,
        questions: &[ComprehensionQuestion],
        stats: &ExamStats,
        category: &str,
    ) -> QuizScore {
        if !self.show_results {
            self.show_results = true;
            for (i, q) in questions.iter().enumerate() {
                let correct = self
                    .answer(i)
                    .is_some_and(|a| a.eq_ignore_ascii_case(&q.correct_answer));
                stats.track_single_question_result(category, correct);
            }
        }
        self.score(questions)
    }

    /// 阅读、听力题的提问文本，材料原文放在题目前面
    pub fn tutor_context(
        &self,
        kind: &str,
        material: (&str, &str),
        questions: &[ComprehensionQuestion],
        index: usize,
    ) -> AppResult<String> {
        let q = questions
            .get(index)
            .ok_or_else(|| AppError::invalid_input(format!("第 {} 题不存在", index + 1)))?;
        let user_key = self.answer(index);
        let options = q.options_listing();
        let context = TutorQuestion {
            kind,
            material: Some(material),
            question: &q.question,
            options_listing: &options,
            user_answer: user_key.map(|k| (k, q.option_value(k))),
            correct_answer: Some((q.correct_answer.as_str(), q.option_value(&q.correct_answer))),
        }
        .render();
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut answers = BTreeMap::new();
        record_answer(&mut answers, false, 0, "a", Some(vec!["A", "B"])).unwrap();
        record_answer(&mut answers, false, 0, "B", Some(vec!["A", "B"])).unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[&0], "B");
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut answers = BTreeMap::new();
        let err = record_answer(&mut answers, false, 1, "E", Some(vec!["A", "B"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(answers.is_empty());
    }

    #[test]
    fn test_locked_after_reveal() {
        let mut answers = BTreeMap::new();
        assert!(!record_answer(&mut answers, true, 0, "A", Some(vec!["A"])).unwrap());
        assert!(answers.is_empty());
    }

    fn comprehension(correct: &str) -> ComprehensionQuestion {
        ComprehensionQuestion {
            question: "What is the main idea?".to_string(),
            options: vec![
                crate::models::QuizOption { key: "A".to_string(), value: "Cats".to_string() },
                crate::models::QuizOption { key: "B".to_string(), value: "Dogs".to_string() },
            ],
            correct_answer: correct.to_string(),
        }
    }

    #[test]
    fn test_reveal_tracks_stats_once() {
        let questions = vec![comprehension("A"), comprehension("B")];
        let stats = ExamStats::new();
        let mut sheet = AnswerSheet::default();
        sheet.select(&questions, 0, "A").unwrap();

        let score = sheet.reveal(&questions, &stats, "Dinleme Pratiği");
        assert_eq!(score, QuizScore { correct: 1, total: 2 });
        sheet.reveal(&questions, &stats, "Dinleme Pratiği");
        assert_eq!(stats.category("Dinleme Pratiği").total, 2);
        assert_eq!(stats.category("Dinleme Pratiği").correct, 1);

        assert!(!sheet.select(&questions, 1, "B").unwrap());
        sheet.reset();
        assert!(!sheet.show_results);
        assert!(sheet.user_answers.is_empty());
    }

    #[test]
    fn test_missing_question_rejected() {
        let mut answers = BTreeMap::new();
        let err = record_answer(&mut answers, false, 7, "A", None).unwrap_err();
        assert!(err.to_string().contains("第 8 题"));
    }
}
