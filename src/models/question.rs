use serde::{Deserialize, Serialize};

/// 选项（A-E）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub key: String,
    pub value: String,
}

/// 从粘贴文本中拆分出的一道题
///
/// 拆分后不可变，由编排层消费一次
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuestion {
    /// 原文中的题号
    pub number: u32,
    /// 题干（不含题号、选项和答案标记）
    pub question_text: String,
    pub options: Vec<QuizOption>,
    /// 原文中标注的正确答案字母
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    /// 发送给后端的完整文本
    pub full_text: String,
}

impl ParsedQuestion {
    /// 按选项字母查找选项内容
    pub fn option_value(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.key.eq_ignore_ascii_case(key))
            .map(|o| o.value.as_str())
    }

    pub fn is_correct(&self, answer: Option<&str>) -> bool {
        match (answer, self.correct_answer.as_deref()) {
            (Some(a), Some(c)) => a.eq_ignore_ascii_case(c),
            _ => false,
        }
    }
}

/// 拆分结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuiz {
    pub questions: Vec<ParsedQuestion>,
}

impl ParsedQuiz {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
