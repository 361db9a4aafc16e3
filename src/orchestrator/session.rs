//! 分析会话 - 编排层
//!
//! 持有一次使用过程中的全部状态：结果列表、最近一次错误、取消令牌。
//! 协作者（后端、历史记录、每日挑战）在创建时注入，结束时调用 [`AnalysisSession::dispose`]。

use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppResult;
use crate::models::{AnalysisWithQuestion, QuizScore};
use crate::orchestrator::analysis_orchestrator::{plan_units, AnalysisOrchestrator};
use crate::services::{ChallengeTracker, HistoryStore, QuestionBackend};
use crate::workflow::{quiz_flow, QuizFlow, ResultList};

pub struct AnalysisSession<B> {
    orchestrator: AnalysisOrchestrator<B>,
    quiz_flow: QuizFlow<B>,
    results: ResultList,
    last_error: Mutex<Option<String>>,
    cancel: CancellationToken,
}

impl<B: QuestionBackend> AnalysisSession<B> {
    pub fn new(
        backend: Arc<B>,
        history: Arc<dyn HistoryStore>,
        challenge: Arc<dyn ChallengeTracker>,
        quiz_question_count: usize,
    ) -> Self {
        Self {
            orchestrator: AnalysisOrchestrator::new(backend.clone(), history, challenge),
            quiz_flow: QuizFlow::new(backend, quiz_question_count),
            results: ResultList::new(),
            last_error: Mutex::new(None),
            cancel: CancellationToken::new(),
        }
    }

    fn set_error(&self, error: Option<String>) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }

    /// 分析一段粘贴的文本，返回本次运行的全部结果
    ///
    /// 运行过程中结果会逐条出现在 [`results`](Self::results) 返回的句柄里。
    /// 失败时已完成的结果保留，错误同时记录在 [`last_error`](Self::last_error)。
    pub async fn analyze(&self, raw: &str) -> AppResult<Vec<AnalysisWithQuestion>> {
        let units = match plan_units(raw) {
            Ok(units) => units,
            Err(e) => {
                self.set_error(Some(e.to_string()));
                return Err(e);
            }
        };

        self.results.clear();
        self.set_error(None);

        match self.orchestrator.run(&units, &self.results, &self.cancel).await {
            Ok(_) => Ok(self.results.snapshot()),
            Err(e) => {
                self.set_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// 为某条结果生成相似题测验，返回题目数量
    pub async fn generate_quiz(&self, id: &str) -> AppResult<usize> {
        self.quiz_flow.generate_quiz(&self.results, id, &self.cancel).await
    }

    pub fn set_answer(&self, id: &str, index: usize, key: &str) -> AppResult<bool> {
        quiz_flow::set_answer(&self.results, id, index, key)
    }

    pub fn reveal(&self, id: &str) -> AppResult<QuizScore> {
        quiz_flow::reveal(&self.results, id)
    }

    pub fn quiz_score(&self, id: &str) -> AppResult<QuizScore> {
        quiz_flow::quiz_score(&self.results, id)
    }

    pub fn tutor_context(&self, id: &str, index: usize) -> AppResult<String> {
        quiz_flow::tutor_context(&self.results, id, index)
    }

    /// 结果列表的共享句柄
    pub fn results(&self) -> ResultList {
        self.results.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// 取消进行中的调用，之后的分析和测验生成都会以取消结束
    pub fn dispose(&self) {
        if !self.cancel.is_cancelled() {
            info!("🛑 关闭分析会话");
            self.cancel.cancel();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::fake::{RecordingTracker, ScriptedBackend, ANALYSIS_JSON};
    use crate::services::MemoryHistoryStore;

    fn session(responses: Vec<AppResult<String>>) -> AnalysisSession<ScriptedBackend> {
        AnalysisSession::new(
            Arc::new(ScriptedBackend::new(responses)),
            Arc::new(MemoryHistoryStore::default()),
            Arc::new(RecordingTracker::default()),
            5,
        )
    }

    #[tokio::test]
    async fn test_empty_input_keeps_previous_results() {
        let session = session(vec![Ok(ANALYSIS_JSON.to_string())]);
        session.analyze("What is ubiquitous?").await.unwrap();

        assert!(matches!(session.analyze("   ").await, Err(AppError::InvalidInput(_))));
        assert_eq!(session.results().len(), 1);
        assert!(session.last_error().is_some());
    }

    #[tokio::test]
    async fn test_new_run_clears_error_and_results() {
        let session = session(vec![
            Err(AppError::invalid_input("boom")),
            Ok(ANALYSIS_JSON.to_string()),
        ]);
        assert!(session.analyze("q").await.is_err());
        assert!(session.last_error().is_some());

        let results = session.analyze("q").await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_disposed_session_does_not_call_backend() {
        let session = session(vec![Ok(ANALYSIS_JSON.to_string())]);
        session.dispose();
        assert!(session.is_disposed());
        assert!(matches!(session.analyze("q").await, Err(AppError::Cancelled)));
        assert!(session.results().is_empty());
    }
}
