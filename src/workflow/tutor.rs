//! "为什么做错了" 的提问文本
//!
//! 测验、阅读、听力答错后都可以把题目和作答情况整理成一段话交给辅导老师。

/// 一道答错的题
pub struct TutorQuestion<'a> {
    /// 开场白里对题目的称呼，如 "question"、"reading question"
    pub kind: &'a str,
    /// 额外的材料（阅读原文、听力原文），带标题
    pub material: Option<(&'a str, &'a str)>,
    pub question: &'a str,
    /// 为空时不列出选项
    pub options_listing: &'a str,
    pub user_answer: Option<(&'a str, Option<&'a str>)>,
    pub correct_answer: Option<(&'a str, Option<&'a str>)>,
}

fn answer_line(answer: Option<(&str, Option<&str>)>, missing: &str) -> String {
    match answer {
        Some((key, Some(value))) => format!("{}) {}", key, value),
        Some((key, None)) => format!("{})", key),
        None => missing.to_string(),
    }
}

impl TutorQuestion<'_> {
    pub fn render(&self) -> String {
        let mut out = format!(
            "Hi, I got this {} wrong. Can you explain why?\n\n",
            self.kind
        );
        if let Some((title, text)) = self.material {
            out.push_str(&format!("---{}---\n{}\n\n", title, text.trim()));
        }
        out.push_str(&format!("---QUESTION---\n{}\n", self.question.trim()));
        if !self.options_listing.is_empty() {
            out.push_str(&format!("\nOptions:\n{}\n", self.options_listing));
        }
        out.push_str(&format!(
            "\n---MY ANSWERS---\nMy answer: {}\nCorrect answer: {}",
            answer_line(self.user_answer, "blank"),
            answer_line(self.correct_answer, "not given"),
        ));
        out
    }
}
