//! 阅读、词典、写作、听力练习的数据结构

use serde::{Deserialize, Serialize};

use crate::models::analysis::VocabularyEntry;
use crate::models::question::QuizOption;
use crate::parser::response::ResponseSchema;

/// 阅读/听力理解题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionQuestion {
    pub question: String,
    pub options: Vec<QuizOption>,
    pub correct_answer: String,
}

impl ComprehensionQuestion {
    pub fn option_value(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.key.eq_ignore_ascii_case(key))
            .map(|o| o.value.as_str())
    }

    /// 按 "A) ..." 的格式列出所有选项
    pub fn options_listing(&self) -> String {
        self.options
            .iter()
            .map(|o| format!("{}) {}", o.key, o.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn validate_questions(questions: &[ComprehensionQuestion]) -> Result<(), String> {
    for (i, q) in questions.iter().enumerate() {
        if q.options.is_empty() {
            return Err(format!("第 {} 题没有选项", i + 1));
        }
        if q.option_value(&q.correct_answer).is_none() {
            return Err(format!(
                "第 {} 题的正确答案 {} 不在选项中",
                i + 1,
                q.correct_answer
            ));
        }
    }
    Ok(())
}

/// 阅读理解分析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingAnalysisResult {
    pub summary: String,
    #[serde(default)]
    pub vocabulary: Vec<VocabularyEntry>,
    #[serde(default)]
    pub questions: Vec<ComprehensionQuestion>,
}

impl ResponseSchema for ReadingAnalysisResult {
    const WHAT: &'static str = "阅读理解分析";

    fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary 为空".to_string());
        }
        validate_questions(&self.questions)
    }
}

/// 词典词条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    pub turkish_meaning: String,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

impl ResponseSchema for DictionaryEntry {
    const WHAT: &'static str = "词典词条";

    fn validate(&self) -> Result<(), String> {
        if self.turkish_meaning.trim().is_empty() {
            return Err("turkishMeaning 为空".to_string());
        }
        Ok(())
    }
}

/// 语法错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarError {
    pub error: String,
    pub correction: String,
    #[serde(default)]
    pub explanation: String,
}

/// 写作分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingAnalysis {
    pub overall_score: f64,
    pub feedback: String,
    #[serde(default)]
    pub grammar_errors: Vec<GrammarError>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ResponseSchema for WritingAnalysis {
    const WHAT: &'static str = "写作分析";

    fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.overall_score) {
            return Err(format!("overallScore {} 超出范围 [0, 100]", self.overall_score));
        }
        if self.feedback.trim().is_empty() {
            return Err("feedback 为空".to_string());
        }
        Ok(())
    }
}

/// 段落改写结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphImprovementResult {
    pub improved_paragraph: String,
    #[serde(default)]
    pub explanation: String,
}

impl ResponseSchema for ParagraphImprovementResult {
    const WHAT: &'static str = "段落改写";

    fn validate(&self) -> Result<(), String> {
        if self.improved_paragraph.trim().is_empty() {
            return Err("improvedParagraph 为空".to_string());
        }
        Ok(())
    }
}

/// 听力任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub script: String,
    #[serde(default)]
    pub questions: Vec<ComprehensionQuestion>,
}

impl ResponseSchema for ListeningTask {
    const WHAT: &'static str = "听力任务";

    fn validate(&self) -> Result<(), String> {
        if self.script.trim().is_empty() {
            return Err("script 为空".to_string());
        }
        validate_questions(&self.questions)
    }
}

/// 听力难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 写进提示词里的描述
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (A2-B1)",
            Difficulty::Medium => "Medium (B2)",
            Difficulty::Hard => "Hard (C1)",
        }
    }
}
