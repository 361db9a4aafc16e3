//! 后端响应校验
//!
//! 后端只返回字符串，所有结构化数据都必须在这里解析并校验后才能进入业务层。
//! JSON 解析失败和结构不满足要求都视为错误，不会产生部分结果。

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 可以从后端响应解析出来的类型
pub trait ResponseSchema: DeserializeOwned {
    /// 用于错误信息的名称
    const WHAT: &'static str;

    /// 反序列化之后的额外约束检查
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// 解析并校验后端返回的 JSON 文本
pub fn parse_response<T: ResponseSchema>(raw: &str) -> AppResult<T> {
    let body = strip_code_fence(raw);
    debug!("解析{}响应，长度: {} 字符", T::WHAT, body.len());

    if body.is_empty() {
        return Err(AppError::schema(T::WHAT, "响应为空"));
    }

    let value: T = serde_json::from_str(body).map_err(|e| AppError::malformed(T::WHAT, e))?;
    value.validate().map_err(|reason| AppError::schema(T::WHAT, reason))?;
    Ok(value)
}

/// 去掉模型常加的 ```json ... ``` 包裹
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // 跳过语言标记所在的第一行
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;

    const VALID: &str = r#"{
        "questionType": "Vocabulary",
        "difficulty": "Medium",
        "correctAnswer": "B",
        "explanation": "Ubiquitous means found everywhere.",
        "keyVocabulary": [{"word": "ubiquitous", "meaning": "her yerde bulunan"}]
    }"#;

    #[test]
    fn test_parse_valid_analysis() {
        let result: AnalysisResult = parse_response(VALID).unwrap();
        assert_eq!(result.difficulty, "Medium");
        assert_eq!(result.correct_answer.as_deref(), Some("B"));
        assert_eq!(result.key_vocabulary.len(), 1);
        assert!(result.tips.is_empty());
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{}\n```", VALID);
        let result: AnalysisResult = parse_response(&fenced).unwrap();
        assert_eq!(result.question_type, "Vocabulary");
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_response::<AnalysisResult>("Sorry, I cannot help").unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let err = parse_response::<AnalysisResult>(r#"{"difficulty": "Easy"}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }

    #[test]
    fn test_empty_explanation_is_schema_violation() {
        let err = parse_response::<AnalysisResult>(r#"{"difficulty": "Easy", "explanation": "  "}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::SchemaViolation { .. }));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```json\n[1]```"), "[1]");
    }
}
