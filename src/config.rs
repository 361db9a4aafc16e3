use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_max_tokens: u32,
    // --- 图片搜索配置 ---
    pub pexels_api_key: String,
    pub pexels_api_base_url: String,
    // --- 本地存储 ---
    /// 历史记录和生词本的存放目录
    pub data_dir: String,
    /// 历史记录最多保留条数
    pub history_limit: usize,
    /// 当前登录用户（为空时使用访客存储）
    pub user_email: Option<String>,
    // --- 业务参数 ---
    /// 相似题测验的题目数量
    pub quiz_question_count: usize,
    /// 待分析文本文件（为空时读取标准输入）
    pub input_file: Option<String>,
    /// 分析完成后为第一条结果生成测验
    pub generate_quiz: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            llm_max_tokens: 4096,
            pexels_api_key: String::new(),
            pexels_api_base_url: "https://api.pexels.com/v1".to_string(),
            data_dir: "yds_data".to_string(),
            history_limit: 50,
            user_email: None,
            quiz_question_count: 5,
            input_file: None,
            generate_quiz: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 先读取 `YDS_CONFIG` 指向的 TOML 文件（如果有），再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("YDS_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("无法读取配置文件 {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| AppError::Config(format!("配置文件 {} 无效: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        Self {
            llm_api_key: env("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: env("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: env("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_max_tokens: env("LLM_MAX_TOKENS").and_then(|v| v.parse().ok()).unwrap_or(self.llm_max_tokens),
            pexels_api_key: env("PEXELS_API_KEY").unwrap_or(self.pexels_api_key),
            pexels_api_base_url: env("PEXELS_API_BASE_URL").unwrap_or(self.pexels_api_base_url),
            data_dir: env("DATA_DIR").unwrap_or(self.data_dir),
            history_limit: env("HISTORY_LIMIT").and_then(|v| v.parse().ok()).unwrap_or(self.history_limit),
            user_email: env("USER_EMAIL").or(self.user_email),
            quiz_question_count: env("QUIZ_QUESTION_COUNT").and_then(|v| v.parse().ok()).unwrap_or(self.quiz_question_count),
            input_file: env("INPUT_FILE").or(self.input_file),
            generate_quiz: env("GENERATE_QUIZ").and_then(|v| v.parse().ok()).unwrap_or(self.generate_quiz),
            verbose_logging: env("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            llm_model_name = "gpt-4o-mini"
            history_limit = 10
            user_email = "ayse@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.llm_model_name, "gpt-4o-mini");
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.user_email.as_deref(), Some("ayse@example.com"));
        assert_eq!(config.quiz_question_count, 5);
        assert_eq!(config.data_dir, "yds_data");
    }

    #[test]
    fn test_toml_wrong_type_is_error() {
        assert!(Config::from_toml_str("history_limit = \"many\"").is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
