use serde::{Deserialize, Serialize};

use crate::parser::response::ResponseSchema;

/// 单词 + 土耳其语释义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub meaning: String,
}

/// 题目分析结果（后端返回的结构化数据）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub question_type: String,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default)]
    pub key_vocabulary: Vec<VocabularyEntry>,
    #[serde(default)]
    pub grammar_points: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl ResponseSchema for AnalysisResult {
    const WHAT: &'static str = "题目分析";

    fn validate(&self) -> Result<(), String> {
        if self.explanation.trim().is_empty() {
            return Err("explanation 为空".to_string());
        }
        if self.difficulty.trim().is_empty() {
            return Err("difficulty 为空".to_string());
        }
        Ok(())
    }
}
