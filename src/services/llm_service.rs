//! LLM 服务 - 业务能力层
//!
//! 只负责"构建提示词、调用 LLM"，不关心流程，也不解析结果。
//! 解释类内容要求模型用土耳其语输出。

use tracing::debug;

use crate::clients::llm_client::{LlmClient, ANALYSIS_TEMPERATURE, CREATIVE_TEMPERATURE};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{AnalysisResult, Difficulty};
use crate::services::backend::{PracticeBackend, QuestionBackend};

const TUTOR_SYSTEM: &str = "You are an expert English teacher preparing Turkish students for the \
YDS / YÖKDİL exams. You write explanations in Turkish and keep English examples in English.";

const JSON_ONLY: &str = "Return ONLY a valid JSON object, without markdown fences or any text \
before or after it.";

/// LLM 服务
///
/// 职责：
/// - 为每种练习构建提示词
/// - 只处理单个题目 / 单段文本
/// - 返回原始文本，不做解析
pub struct LlmService {
    client: LlmClient,
}

impl LlmService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: LlmClient::new(config),
        }
    }

    pub fn with_client(client: LlmClient) -> Self {
        Self { client }
    }

    async fn ask(&self, prompt: String, temperature: f32) -> AppResult<String> {
        self.client
            .send_to_llm(&prompt, Some(TUTOR_SYSTEM), temperature)
            .await
    }
}

impl QuestionBackend for LlmService {
    async fn analyze_question(&self, question: &str) -> AppResult<String> {
        debug!("构建题目分析提示词，题目长度: {} 字符", question.len());
        self.ask(analyze_question_prompt(question), ANALYSIS_TEMPERATURE)
            .await
    }

    async fn generate_similar_quiz(
        &self,
        analysis: &AnalysisResult,
        question: &str,
        count: usize,
    ) -> AppResult<String> {
        let analysis_json = analysis_context(analysis)?;
        self.ask(
            similar_quiz_prompt(&analysis_json, question, count),
            CREATIVE_TEMPERATURE,
        )
        .await
    }
}

impl PracticeBackend for LlmService {
    async fn analyze_reading_passage(&self, text: &str) -> AppResult<String> {
        let prompt = format!(
            r#"Analyze the following English reading passage.

Passage:
"""
{text}
"""

{JSON_ONLY}
Schema:
{{
  "summary": "Turkish summary of the passage (3-5 sentences)",
  "vocabulary": [{{"word": "key English word", "meaning": "Turkish meaning"}}],
  "questions": [
    {{
      "question": "comprehension question in English",
      "options": [{{"key": "A", "value": "..."}}, {{"key": "B", "value": "..."}}, {{"key": "C", "value": "..."}}, {{"key": "D", "value": "..."}}, {{"key": "E", "value": "..."}}],
      "correctAnswer": "A"
    }}
  ]
}}
Give 8-10 vocabulary items and 3-5 YDS-style questions."#
        );
        self.ask(prompt, ANALYSIS_TEMPERATURE).await
    }

    async fn get_dictionary_entry(&self, word: &str) -> AppResult<String> {
        let prompt = format!(
            r#"Create a learner's dictionary entry for the English word "{word}".

{JSON_ONLY}
Schema:
{{
  "word": "{word}",
  "phonetic": "IPA transcription",
  "partOfSpeech": "noun / verb / ...",
  "turkishMeaning": "main Turkish meaning(s)",
  "definitions": ["English definition"],
  "examples": ["example sentence"],
  "synonyms": ["..."],
  "antonyms": ["..."]
}}"#
        );
        self.ask(prompt, ANALYSIS_TEMPERATURE).await
    }

    async fn get_writing_topic(&self) -> AppResult<String> {
        self.ask(
            "Give one academic essay topic suitable for a B2-C1 English learner. \
             Reply with the topic sentence only."
                .to_string(),
            CREATIVE_TEMPERATURE,
        )
        .await
    }

    async fn analyze_written_text(&self, topic: &str, text: &str) -> AppResult<String> {
        let prompt = format!(
            r#"A student wrote the following text for the topic "{topic}".

Text:
"""
{text}
"""

Evaluate it. {JSON_ONLY}
Schema:
{{
  "overallScore": 0-100,
  "feedback": "overall feedback in Turkish",
  "grammarErrors": [{{"error": "wrong fragment", "correction": "corrected fragment", "explanation": "Turkish explanation"}}],
  "suggestions": ["Turkish suggestion"]
}}"#
        );
        self.ask(prompt, ANALYSIS_TEMPERATURE).await
    }

    async fn improve_paragraph(&self, paragraph: &str) -> AppResult<String> {
        let prompt = format!(
            r#"Rewrite the following paragraph in better academic English while keeping its meaning.

Paragraph:
"""
{paragraph}
"""

{JSON_ONLY}
Schema:
{{
  "improvedParagraph": "the rewritten paragraph",
  "explanation": "what was changed and why, in Turkish"
}}"#
        );
        self.ask(prompt, ANALYSIS_TEMPERATURE).await
    }

    async fn generate_listening_task(&self, difficulty: Difficulty) -> AppResult<String> {
        let prompt = format!(
            r#"Create a listening comprehension task at level {level}.
Write a natural monologue or dialogue of 120-200 words that will be read aloud by a speech synthesizer.

{JSON_ONLY}
Schema:
{{
  "title": "short title",
  "script": "the text to be read aloud",
  "questions": [
    {{
      "question": "question in English",
      "options": [{{"key": "A", "value": "..."}}, {{"key": "B", "value": "..."}}, {{"key": "C", "value": "..."}}, {{"key": "D", "value": "..."}}],
      "correctAnswer": "B"
    }}
  ]
}}
Give 3-5 questions."#,
            level = difficulty.label()
        );
        self.ask(prompt, CREATIVE_TEMPERATURE).await
    }
}

/// 构建题目分析提示词
fn analyze_question_prompt(question: &str) -> String {
    format!(
        r#"Analyze the following English exam question.

Question:
"""
{question}
"""

{JSON_ONLY}
Schema:
{{
  "questionType": "Vocabulary / Grammar / Cloze Test / Sentence Completion / Translation / Reading / Paragraph Completion / Irrelevant Sentence / Dialogue",
  "difficulty": "Easy / Medium / Hard",
  "correctAnswer": "option letter",
  "explanation": "step-by-step Turkish explanation of why the answer is correct and why the other options are wrong",
  "translation": "Turkish translation of the question sentence",
  "keyVocabulary": [{{"word": "English word", "meaning": "Turkish meaning"}}],
  "grammarPoints": ["grammar topic tested"],
  "tips": ["exam strategy tip in Turkish"]
}}"#
    )
}

/// 相似题提示词里附带的分析 JSON
fn analysis_context(analysis: &AnalysisResult) -> AppResult<String> {
    serde_json::to_string_pretty(analysis).map_err(|e| AppError::malformed("题目分析", e))
}

/// 构建相似题提示词
///
/// 输出格式必须能被 `parse_generated_questions` 拆分
fn similar_quiz_prompt(analysis_json: &str, question: &str, count: usize) -> String {
    format!(
        r#"Here is an English exam question and its analysis.

Question:
"""
{question}
"""

Analysis:
{analysis_json}

Write {count} NEW multiple-choice questions that test the same skill at the same difficulty.
Use exactly this plain-text format for every question, with no other text:

1) question text
A) option
B) option
C) option
D) option
E) option
Correct answer: X

Number the questions 1 to {count}."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_generated_questions;

    #[test]
    fn test_analyze_prompt_embeds_question() {
        let prompt = analyze_question_prompt("What is the synonym of ubiquitous?");
        assert!(prompt.contains("What is the synonym of ubiquitous?"));
        assert!(prompt.contains("\"explanation\""));
        assert!(prompt.contains(JSON_ONLY));
    }

    #[test]
    fn test_quiz_prompt_format_is_parseable() {
        let prompt = similar_quiz_prompt("{}", "q", 5);
        assert!(prompt.contains("Write 5 NEW"));

        // 提示词里给出的示例格式本身必须能被拆分器识别
        let example = "1) question text\nA) option\nB) option\nC) option\nD) option\nE) option\nCorrect answer: C";
        let quiz = parse_generated_questions(example);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions[0].options.len(), 5);
        assert_eq!(quiz.questions[0].correct_answer.as_deref(), Some("C"));
    }

    #[test]
    fn test_analysis_context_carries_analysis() {
        let analysis = AnalysisResult {
            difficulty: "Hard".to_string(),
            explanation: "Ubiquitous means found everywhere.".to_string(),
            ..AnalysisResult::default()
        };
        let context = analysis_context(&analysis).unwrap();
        assert!(context.contains("Ubiquitous means found everywhere."));
        assert!(context.contains("\"difficulty\": \"Hard\""));
    }
}
