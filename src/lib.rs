//! # YDS Assistant
//!
//! YDS 英语考试练习助手的核心：题目拆分、逐题分析、相似题测验和各类练习
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 外部接口，只暴露能力
//! - `LlmClient` - OpenAI 兼容的对话接口
//! - `ImageClient` - 图片搜索接口
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `QuestionBackend` / `PracticeBackend` - 后端能力接口，`LlmService` 为真实实现
//! - `HistoryStore` / `VocabularyStore` / `DailyChallenge` / `ExamStats` - 协作者
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 测验、阅读、词典、写作、听力各自的完整流程
//! - `ResultList` - 按 ID 修改的共享结果列表
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/analysis_orchestrator` - 逐题顺序分析，首错即停
//! - `orchestrator/session` - 一次使用过程的全部状态
//!
//! 后端返回的字符串统一在 `parser/` 中解析和校验。
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnalysisResult, AnalysisWithQuestion, ParsedQuestion, ParsedQuiz, QuizState};
pub use orchestrator::AnalysisSession;
pub use parser::parse_generated_questions;
pub use services::{LlmService, QuestionBackend};
