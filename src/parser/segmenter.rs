//! 题目拆分
//!
//! 把一段粘贴的文本拆成若干道独立的题目。纯函数，同样的输入总是得到同样的输出。
//!
//! 规则：
//! 1. 题号必须在行首：`1)`、`1.`、`(1)`、`Q1.`、`Question 2)`
//! 2. 题号必须连续（n, n+1, ...），打断序列的编号行视为正文
//! 3. 第一个题号之前的文本（完形填空文章、阅读段落、共用题干）会拼到每道题前面；
//!    只有一行简短的作答说明（"Choose the best answer."）时丢弃
//! 4. 答案标记只认行首的，或者出现在最后一个选项之后的；题干里的 "answer:" 不算
//! 5. 没有任何题号时返回空结果，由调用方整体分析

use std::sync::LazyLock;

use regex::Regex;

use crate::models::question::{ParsedQuestion, ParsedQuiz, QuizOption};

static QUESTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:(?i:question|q)[ \t]*)?\(?(\d{1,3})[ \t]*[.)]\s+")
        .expect("题号正则无效")
});

static OPTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^[ \t]*\(?([A-E])[.)]|(?:^|[ \t])\(([A-E])\)|(?:^|[ \t])([A-E])\))[ \t]*")
        .expect("选项正则无效")
});

static ANSWER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:correct[ \t]+answer|doğru[ \t]+cevap|answer)[ \t]*[:：][ \t]*\(?([A-E])\b")
        .expect("答案正则无效")
});

static BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{3,}|_{3,}").expect("空格正则无效"));

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:choose|select|pick|answer|fill|complete|read|find|mark|here[ \t]+(?:are|is)|for[ \t]+questions|questions|aşağıdaki|sorular)\b")
        .expect("说明正则无效")
});

/// 作答说明最多的词数，超过按共用材料处理
const INSTRUCTION_MAX_WORDS: usize = 15;

/// 题号匹配：题号所在位置、题号、正文起点
#[derive(Debug, Clone, Copy)]
struct Delimiter {
    start: usize,
    number: u32,
    body_start: usize,
}

/// 拆分文本为题目列表
pub fn parse_generated_questions(raw: &str) -> ParsedQuiz {
    let text = raw.replace("\r\n", "\n");
    let delimiters = find_delimiters(&text);

    let Some(first) = delimiters.first() else {
        return ParsedQuiz::default();
    };

    let preamble = text[..first.start].trim();
    let shared = is_shared_material(preamble).then_some(preamble);

    let questions = delimiters
        .iter()
        .enumerate()
        .map(|(i, delimiter)| {
            let end = delimiters.get(i + 1).map_or(text.len(), |next| next.start);
            let block = text[delimiter.start..end].trim();
            let body = &text[delimiter.body_start..end];

            let full_text = match shared {
                Some(passage) => format!("{}\n\n{}", passage, block),
                None => block.to_string(),
            };
            parse_block(delimiter.number, body, full_text)
        })
        .collect();

    ParsedQuiz { questions }
}

/// 题号前的文本是否要拼到每道题前面
///
/// 完形填空的文章总是保留；一行简短的作答说明丢弃；其余（阅读段落、共用题干）保留
fn is_shared_material(preamble: &str) -> bool {
    if preamble.is_empty() {
        return false;
    }
    if BLANK.is_match(preamble) {
        return true;
    }
    let single_line = !preamble.contains('\n');
    let short = preamble.split_whitespace().count() <= INSTRUCTION_MAX_WORDS;
    !(single_line && short && INSTRUCTION.is_match(preamble))
}

/// 找出连续编号的题号
fn find_delimiters(text: &str) -> Vec<Delimiter> {
    let mut accepted: Vec<Delimiter> = Vec::new();

    for caps in QUESTION_START.captures_iter(text) {
        let (Some(whole), Some(num)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Ok(number) = num.as_str().parse::<u32>() else {
            continue;
        };

        // "(1) ----" 是文章里的空格，不是题号
        if text[whole.end()..].starts_with("---") || text[whole.end()..].starts_with("___") {
            continue;
        }

        let in_sequence = accepted.last().map_or(true, |last| number == last.number + 1);
        if in_sequence {
            accepted.push(Delimiter {
                start: whole.start(),
                number,
                body_start: whole.end(),
            });
        }
    }

    accepted
}

/// 解析单道题：题干、选项、答案
fn parse_block(number: u32, body: &str, full_text: String) -> ParsedQuestion {
    let (main, correct_answer) = match find_answer_marker(body) {
        Some(marker) => (&body[..marker.start], Some(marker.answer)),
        None => (body, None),
    };

    let options_at = find_options(main);
    let question_end = options_at.first().map_or(main.len(), |(start, _, _)| *start);

    let options = options_at
        .iter()
        .enumerate()
        .map(|(i, (_, key, value_start))| {
            let value_end = options_at.get(i + 1).map_or(main.len(), |(next, _, _)| *next);
            QuizOption {
                key: key.to_string(),
                value: collapse_whitespace(&main[*value_start..value_end]),
            }
        })
        .collect();

    ParsedQuestion {
        number,
        question_text: main[..question_end].trim().to_string(),
        options,
        correct_answer,
        full_text,
    }
}

/// 找出按 A、B、C... 顺序出现的选项：（起点, 字母, 内容起点）
fn find_options(main: &str) -> Vec<(usize, char, usize)> {
    let mut found: Vec<(usize, char, usize)> = Vec::new();

    for caps in OPTION_START.captures_iter(main) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(key) = (1..=3)
            .find_map(|g| caps.get(g))
            .and_then(|m| m.as_str().chars().next())
        else {
            continue;
        };

        let expected = found
            .last()
            .map_or(Some('A'), |(_, prev, _)| char::from_u32(*prev as u32 + 1));
        if Some(key) == expected {
            found.push((whole.start(), key, whole.end()));
        }
    }

    found
}

/// 答案标记：位置和答案字母
#[derive(Debug)]
struct AnswerMarker {
    start: usize,
    end: usize,
    answer: String,
}

/// 找出真正的答案标记
///
/// 标记必须在行首，或者在最后一个选项之后；有多个时取最后一个
fn find_answer_marker(text: &str) -> Option<AnswerMarker> {
    let options = find_options(text);
    let last_option = options.last().map(|(start, _, _)| *start);

    ANSWER_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter = caps.get(1)?;
            let line_prefix = text[..whole.start()].rsplit('\n').next().unwrap_or("");
            let at_line_start = line_prefix.trim().is_empty();
            let after_options = last_option.is_some_and(|last| whole.start() > last);

            (at_line_start || after_options).then(|| AnswerMarker {
                start: whole.start(),
                end: whole.end(),
                answer: letter.as_str().to_ascii_uppercase(),
            })
        })
        .last()
}

/// 去掉题目中的答案标记（用于给老师看的题目原文）
pub fn strip_answer_marker(text: &str) -> String {
    match find_answer_marker(text) {
        Some(marker) => format!("{}{}", &text[..marker.start], &text[marker.end..])
            .trim()
            .to_string(),
        None => text.trim().to_string(),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
