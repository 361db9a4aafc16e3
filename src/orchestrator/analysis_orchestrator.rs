//! 题目分析编排器 - 编排层
//!
//! ## 职责
//!
//! 把一次提交的文本拆成若干道题，逐题调用后端分析。
//!
//! ## 核心规则
//!
//! 1. **严格顺序**：一次只分析一道题，上一道完成后才开始下一道
//! 2. **立即可见**：每道题分析成功后马上追加到结果列表，不等整批完成
//! 3. **首错即停**：任何一道题失败（调用失败或响应格式不对）都会终止本次运行，
//!    已追加的结果保留，后面的题目不再分析，不重试
//! 4. **兜底**：没有识别到题号时把整段文本当作一道题
//! 5. **副作用**：每道成功的题写一次历史记录、发一次练习信号；
//!    历史记录写入失败只记日志

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{AnalysisResult, AnalysisWithQuestion};
use crate::parser::{parse_generated_questions, parse_response};
use crate::services::{ActionKind, ChallengeTracker, HistoryStore, QuestionBackend};
use crate::utils::logging::{log_run_start, log_unit_start, print_final_stats};
use crate::workflow::{run_cancellable, ResultList};

/// 一次运行的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub planned: usize,
    pub done: usize,
}

/// 校验输入并拆分为待分析的题目文本
///
/// 空白输入直接拒绝，不会产生任何后端调用
pub fn plan_units(raw: &str) -> AppResult<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("请输入要分析的题目"));
    }

    let quiz = parse_generated_questions(raw);
    log_run_start(quiz.len(), trimmed.chars().count());

    if quiz.is_empty() {
        Ok(vec![trimmed.to_string()])
    } else {
        Ok(quiz.questions.into_iter().map(|q| q.full_text).collect())
    }
}

pub struct AnalysisOrchestrator<B> {
    backend: Arc<B>,
    history: Arc<dyn HistoryStore>,
    challenge: Arc<dyn ChallengeTracker>,
}

impl<B: QuestionBackend> AnalysisOrchestrator<B> {
    pub fn new(
        backend: Arc<B>,
        history: Arc<dyn HistoryStore>,
        challenge: Arc<dyn ChallengeTracker>,
    ) -> Self {
        Self {
            backend,
            history,
            challenge,
        }
    }

    /// 逐题分析并把结果追加到 `results`
    pub async fn run(
        &self,
        units: &[String],
        results: &ResultList,
        cancel: &CancellationToken,
    ) -> AppResult<RunStats> {
        let mut stats = RunStats {
            planned: units.len(),
            done: 0,
        };

        for (index, unit) in units.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!("会话已关闭，停止分析 ({}/{})", stats.done, stats.planned);
                return Err(AppError::Cancelled);
            }
            log_unit_start(index + 1, units.len(), unit);

            let analysis = match self.analyze_unit(unit, cancel).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    error!("❌ 第 {} 道题目分析失败，终止本次运行: {}", index + 1, e);
                    print_final_stats(stats.done, stats.planned);
                    return Err(e);
                }
            };

            results.push(AnalysisWithQuestion::new(unit.as_str(), analysis.clone()));
            stats.done += 1;
            info!("✓ 第 {} 道题目分析完成 ({})", index + 1, analysis.difficulty);

            if let Err(e) = self.history.add_history_item(unit, &analysis) {
                warn!("⚠️ 历史记录写入失败: {}", e);
            }
            self.challenge.track_action(ActionKind::Analyze);
        }

        print_final_stats(stats.done, stats.planned);
        Ok(stats)
    }

    async fn analyze_unit(&self, unit: &str, cancel: &CancellationToken) -> AppResult<AnalysisResult> {
        let raw = run_cancellable(cancel, self.backend.analyze_question(unit)).await?;
        debug!("收到分析响应，长度: {} 字符", raw.len());
        parse_response::<AnalysisResult>(&raw)
    }
}
