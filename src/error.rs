use thiserror::Error;

/// 应用程序错误类型
///
/// 每个失败的操作只向上报告一个错误，`Display` 即为展示给用户的文本
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入为空或无效（在调用后端之前拒绝）
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),

    /// 后端返回的内容不是合法 JSON
    #[error("模型返回格式错误 ({what}): {source}")]
    MalformedResponse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// JSON 合法但不满足预期结构
    #[error("模型返回内容不完整 ({what}): {reason}")]
    SchemaViolation { what: &'static str, reason: String },

    /// 本地存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    /// 图片搜索错误
    #[error("图片搜索失败: {0}")]
    ImageSearch(#[from] reqwest::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 结果 ID 不存在
    #[error("找不到分析结果: {id}")]
    NotFound { id: String },

    /// 会话已被取消
    #[error("操作已取消")]
    Cancelled,
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 请求构建失败
    #[error("LLM 请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 文件内容损坏
    #[error("文件内容无法解析 ({path}): {source}")]
    Corrupted {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建输入无效错误
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建 JSON 解析错误
    pub fn malformed(what: &'static str, source: serde_json::Error) -> Self {
        AppError::MalformedResponse { what, source }
    }

    /// 创建结构校验错误
    pub fn schema(what: &'static str, reason: impl Into<String>) -> Self {
        AppError::SchemaViolation {
            what,
            reason: reason.into(),
        }
    }

    /// 创建 ID 不存在错误
    pub fn not_found(id: impl Into<String>) -> Self {
        AppError::NotFound { id: id.into() }
    }
}

impl From<async_openai::error::OpenAIError> for LlmError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        LlmError::RequestBuildFailed(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
