//! 后端能力接口
//!
//! 编排层和流程层只依赖这些 trait，真实实现是 [`LlmService`](super::LlmService)，
//! 测试里用脚本化的假实现替换。所有方法都返回原始文本，解析在
//! [`parser::response`](crate::parser::response) 里完成。

use std::future::Future;

use crate::error::AppResult;
use crate::models::{AnalysisResult, Difficulty};

/// 题目分析与相似题生成
pub trait QuestionBackend: Send + Sync {
    /// 分析一道题，返回符合 `AnalysisResult` 结构的 JSON 文本
    fn analyze_question(&self, question: &str) -> impl Future<Output = AppResult<String>> + Send;

    /// 根据分析结果生成 `count` 道相似题，返回可被题目拆分器解析的文本
    fn generate_similar_quiz(
        &self,
        analysis: &AnalysisResult,
        question: &str,
        count: usize,
    ) -> impl Future<Output = AppResult<String>> + Send;
}

/// 阅读、词典、写作、听力练习
pub trait PracticeBackend: Send + Sync {
    fn analyze_reading_passage(&self, text: &str) -> impl Future<Output = AppResult<String>> + Send;

    fn get_dictionary_entry(&self, word: &str) -> impl Future<Output = AppResult<String>> + Send;

    /// 返回纯文本的写作题目
    fn get_writing_topic(&self) -> impl Future<Output = AppResult<String>> + Send;

    fn analyze_written_text(
        &self,
        topic: &str,
        text: &str,
    ) -> impl Future<Output = AppResult<String>> + Send;

    fn improve_paragraph(&self, paragraph: &str) -> impl Future<Output = AppResult<String>> + Send;

    fn generate_listening_task(
        &self,
        difficulty: Difficulty,
    ) -> impl Future<Output = AppResult<String>> + Send;
}

/// 图片搜索
pub trait ImageSearch: Send + Sync {
    fn search_image(&self, query: &str) -> impl Future<Output = AppResult<Option<String>>> + Send;
}

impl ImageSearch for crate::clients::ImageClient {
    async fn search_image(&self, query: &str) -> AppResult<Option<String>> {
        crate::clients::ImageClient::search_image(self, query).await
    }
}
