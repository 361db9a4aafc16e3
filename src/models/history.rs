use serde::{Deserialize, Serialize};

use crate::models::analysis::AnalysisResult;

/// 历史记录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub question: String,
    pub analysis: AnalysisResult,
    /// 本地时间，"日.月.年 时:分:秒"
    pub timestamp: String,
}

impl HistoryItem {
    pub fn new(question: &str, analysis: &AnalysisResult) -> Self {
        Self {
            id: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            question: question.to_string(),
            analysis: analysis.clone(),
            timestamp: chrono::Local::now().format("%d.%m.%Y %H:%M:%S").to_string(),
        }
    }
}

/// 生词本条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub word: String,
    pub meaning: String,
    pub added_at: String,
}
