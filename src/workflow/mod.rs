//! 流程层：测验、阅读、词典、写作、听力各自的完整流程

pub mod answer_sheet;
pub mod dictionary;
pub mod listening;
pub mod quiz_flow;
pub mod reading;
pub mod result_list;
pub mod tutor;
pub mod writing;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};

pub use answer_sheet::AnswerSheet;
pub use dictionary::{DictionaryLookup, DictionaryPractice};
pub use listening::ListeningPractice;
pub use quiz_flow::QuizFlow;
pub use reading::ReadingPractice;
pub use result_list::ResultList;
pub use writing::WritingPractice;

/// 让一次后端调用可以被会话取消打断
pub(crate) async fn run_cancellable<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        result = call => result,
    }
}
