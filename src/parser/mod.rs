//! 文本解析：题目拆分和后端响应校验

pub mod response;
pub mod segmenter;

pub use response::{parse_response, strip_code_fence, ResponseSchema};
pub use segmenter::{parse_generated_questions, strip_answer_marker};
