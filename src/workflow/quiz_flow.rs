//! 相似题测验 - 流程层
//!
//! 流程顺序：
//! 1. 同步地把目标条目的测验置为"生成中"占位状态
//! 2. 调用后端生成题目文本，再用题目拆分器解析
//! 3. 成功：整体替换为新测验（答案、公布状态全部重置）
//! 4. 失败：保留占位状态的形状，记录错误信息，分析内容不受影响
//!
//! 所有修改都按 ID 定位，互不干扰。

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{AnalysisResult, AnalysisWithQuestion, ParsedQuestion, QuizScore, QuizState};
use crate::parser::{parse_generated_questions, strip_answer_marker};
use crate::services::QuestionBackend;
use crate::workflow::answer_sheet::record_answer;
use crate::workflow::result_list::ResultList;
use crate::workflow::run_cancellable;
use crate::workflow::tutor::TutorQuestion;

pub struct QuizFlow<B> {
    backend: Arc<B>,
    question_count: usize,
}

/// 已经生成完毕的测验
fn ready_quiz(item: &AnalysisWithQuestion) -> AppResult<&QuizState> {
    match &item.quiz {
        Some(quiz) if quiz.is_ready() => Ok(quiz),
        Some(quiz) if quiz.is_loading => Err(AppError::invalid_input("测验仍在生成中")),
        _ => Err(AppError::invalid_input("这条分析还没有可用的测验")),
    }
}

fn ready_quiz_mut(item: &mut AnalysisWithQuestion) -> AppResult<&mut QuizState> {
    ready_quiz(item)?;
    item.quiz
        .as_mut()
        .ok_or_else(|| AppError::invalid_input("这条分析还没有可用的测验"))
}

impl<B: QuestionBackend> QuizFlow<B> {
    pub fn new(backend: Arc<B>, question_count: usize) -> Self {
        Self {
            backend,
            question_count,
        }
    }

    /// 为某条分析生成相似题，返回题目数量
    pub async fn generate_quiz(
        &self,
        results: &ResultList,
        id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<usize> {
        let (question, analysis) = results
            .update(id, |item| {
                item.quiz = Some(QuizState::loading());
                (item.question.clone(), item.analysis.clone())
            })
            .ok_or_else(|| AppError::not_found(id))?;

        info!("📝 生成 {} 道相似题...", self.question_count);

        match self.fetch_questions(&question, &analysis, cancel).await {
            Ok(questions) => {
                let count = questions.len();
                results.update(id, |item| item.quiz = Some(QuizState::ready(questions)));
                info!("✓ 测验生成完成，共 {} 道题", count);
                Ok(count)
            }
            Err(e) => {
                warn!("⚠️ 测验生成失败: {}", e);
                let message = e.to_string();
                results.update(id, |item| {
                    item.quiz = Some(QuizState::loading().failed(message));
                });
                Err(e)
            }
        }
    }

    async fn fetch_questions(
        &self,
        question: &str,
        analysis: &AnalysisResult,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ParsedQuestion>> {
        let raw = run_cancellable(
            cancel,
            self.backend
                .generate_similar_quiz(analysis, question, self.question_count),
        )
        .await?;

        let quiz = parse_generated_questions(&raw);
        if quiz.is_empty() {
            return Err(AppError::schema("相似题测验", "模型生成的测验格式无法识别"));
        }
        Ok(quiz.questions)
    }
}

/// 记录某道测验题的选择，返回是否写入（公布答案后为 `false`）
pub fn set_answer(results: &ResultList, id: &str, index: usize, key: &str) -> AppResult<bool> {
    results
        .update(id, |item| {
            let quiz = ready_quiz_mut(item)?;
            let option_keys = quiz
                .questions
                .get(index)
                .map(|q| q.options.iter().map(|o| o.key.as_str()).collect());
            record_answer(&mut quiz.user_answers, quiz.show_results, index, key, option_keys)
        })
        .ok_or_else(|| AppError::not_found(id))?
}

/// 公布答案并返回得分
pub fn reveal(results: &ResultList, id: &str) -> AppResult<QuizScore> {
    results
        .update(id, |item| {
            let quiz = ready_quiz_mut(item)?;
            quiz.show_results = true;
            Ok(quiz.score())
        })
        .ok_or_else(|| AppError::not_found(id))?
}

/// 公布答案之后的得分
pub fn quiz_score(results: &ResultList, id: &str) -> AppResult<QuizScore> {
    let item = results.get(id).ok_or_else(|| AppError::not_found(id))?;
    let quiz = ready_quiz(&item)?;
    if !quiz.show_results {
        return Err(AppError::invalid_input("答案尚未公布"));
    }
    Ok(quiz.score())
}

/// 整理某道测验题的作答情况，用于向辅导老师提问
pub fn tutor_context(results: &ResultList, id: &str, index: usize) -> AppResult<String> {
    let item = results.get(id).ok_or_else(|| AppError::not_found(id))?;
    let quiz = ready_quiz(&item)?;
    let question = quiz
        .questions
        .get(index)
        .ok_or_else(|| AppError::invalid_input(format!("第 {} 题不存在", index + 1)))?;

    let user_key = quiz.user_answers.get(&index).map(String::as_str);
    let context = TutorQuestion {
        kind: "question",
        material: None,
        question: &strip_answer_marker(&question.full_text),
        options_listing: "",
        user_answer: user_key.map(|k| (k, question.option_value(k))),
        correct_answer: question
            .correct_answer
            .as_deref()
            .map(|k| (k, question.option_value(k))),
    }
    .render();
    Ok(context)
}
