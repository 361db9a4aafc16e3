//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `analysis_orchestrator` - 题目分析编排器
//! - 拆分提交的文本，逐题顺序分析
//! - 每道题完成后立即追加结果、写历史记录、发练习信号
//! - 首错即停，已完成的结果保留
//!
//! ### `session` - 分析会话
//! - 持有结果列表、最近一次错误和取消令牌
//! - 对外提供分析、生成测验、作答、公布答案
//!
//! ## 层次关系
//!
//! ```text
//! session (一次使用过程)
//!     ↓
//! analysis_orchestrator (处理一次提交的所有题目)
//!     ↓
//! workflow (测验 / 练习流程)
//!     ↓
//! services (能力层：后端 / 历史 / 挑战 / 生词本)
//!     ↓
//! clients (基础设施：LLM / 图片搜索)
//! ```

pub mod analysis_orchestrator;
pub mod session;

pub use analysis_orchestrator::{plan_units, AnalysisOrchestrator, RunStats};
pub use session::AnalysisSession;
