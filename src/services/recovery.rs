//! 响应恢复 - 业务能力层
//!
//! 只负责"从松散格式的提取输出中恢复结构化题目记录"能力
//!
//! 上游服务的输出是对抗性的：可能带 markdown 代码块、前后缀闲话、
//! 混用的答案写法。这里逐层剥掉包装、解析、归一化；
//! 解析彻底失败时该分段贡献零条记录：记日志，不报错。

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{AnswerIndicator, RawQuestionRecord};
use crate::workflow::SegmentCtx;

/// 上游返回的单条题目记录（宽容反序列化）
#[derive(Debug, Deserialize)]
struct WireRecord {
    #[serde(alias = "questionText", alias = "stem")]
    question: String,

    #[serde(default)]
    options: Vec<String>,

    /// 答案字段可能是整数、字母、数字或一段文本，先按原样接住
    #[serde(default)]
    answer: Value,

    #[serde(default, alias = "explicitlyMarked")]
    explicit: bool,
}

/// 从原始提取输出中恢复题目记录
///
/// 步骤：
/// 1. 去掉首尾空白
/// 2. 去掉上游可能包上的代码块围栏
/// 3. 取第一个 `[` 到最后一个 `]` 之间的最长括号子串作为候选载荷
///    （抵御上游无视指令加的前后缀文字）
/// 4. 解析为记录序列，逐条归一化
///
/// 解析失败或结果不是序列时返回空列表，该分段贡献零条记录。
pub fn recover_records(raw: &str, ctx: &SegmentCtx) -> Vec<RawQuestionRecord> {
    let trimmed = strip_code_fences(raw.trim());

    let candidate = match extract_bracketed(trimmed) {
        Some(payload) => payload,
        None => {
            warn!("{} 输出中找不到 JSON 数组，该分段贡献零条记录", ctx);
            return Vec::new();
        }
    };

    let wire_records: Vec<WireRecord> = match serde_json::from_str(candidate) {
        Ok(records) => records,
        Err(e) => {
            warn!("{} 结构化载荷解析失败: {}，该分段贡献零条记录", ctx, e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for wire in wire_records {
        match normalize_record(wire) {
            Some(record) => records.push(record),
            None => {
                debug!("{} 丢弃一条不完整记录（题干为空或选项不足2个）", ctx);
            }
        }
    }

    debug!("{} 恢复出 {} 条题目记录", ctx, records.len());
    records
}

/// 去掉包裹载荷的代码块围栏（``` 或 ```json）
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }

    // 去掉第一行（``` 或 ```json）和结尾的 ```
    let without_open = match text.find('\n') {
        Some(pos) => &text[pos + 1..],
        None => return text,
    };
    without_open
        .trim_end()
        .trim_end_matches("```")
        .trim()
}

/// 取第一个 `[` 与最后一个 `]` 之间的最长括号子串
fn extract_bracketed(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// 归一化单条记录
///
/// 选项剥掉开头的编号前缀（保留内部内容原文），
/// 答案字段分类成四种标记之一。
fn normalize_record(wire: WireRecord) -> Option<RawQuestionRecord> {
    let question_text = wire.question.trim().to_string();
    if question_text.is_empty() {
        return None;
    }

    let options: Vec<String> = wire
        .options
        .iter()
        .map(|opt| strip_option_prefix(opt))
        .collect();
    if options.len() < 2 {
        return None;
    }

    let answer_indicator = classify_answer(&wire.answer, options.len());

    Some(RawQuestionRecord {
        question_text,
        options,
        answer_indicator,
        explicitly_marked: wire.explicit,
    })
}

/// 剥掉选项开头的编号前缀
///
/// 识别 "A."、"(b)"、"[2]"、"3、"、"c：" 以及 "-"/"*"/"•" 列表符号，
/// 前缀之后的内容保留原文。
fn strip_option_prefix(option: &str) -> String {
    let Ok(re) = Regex::new(
        r"^\s*(?:[\(\[（]?[A-Za-z0-9][\)\]）]?\s*[\.、。:：\)）]|[\(\[（][A-Za-z0-9][\)\]）]|[-*•])\s*",
    ) else {
        return option.trim().to_string();
    };
    re.replace(option.trim(), "").trim().to_string()
}

/// 把答案字段分类成四种标记之一
///
/// 分类优先级（与解析器的解析优先级一致）：
/// 1. 范围内的整数 → ExplicitIndex
/// 2. 单个字母 → Letter
/// 3. 单个数字字符 '1'-'4' → Digit
/// 4. 其余 → LiteralText
fn classify_answer(answer: &Value, option_count: usize) -> AnswerIndicator {
    match answer {
        Value::Number(n) => {
            if let Some(index) = n.as_u64() {
                let index = index as usize;
                if index < option_count {
                    return AnswerIndicator::ExplicitIndex(index);
                }
            }
            classify_answer_text(&answer.to_string(), option_count)
        }
        Value::String(s) => classify_answer_text(s, option_count),
        // null / 布尔 / 对象等：按字面文本处理，解析器会兜底
        other => AnswerIndicator::LiteralText(other.to_string()),
    }
}

fn classify_answer_text(text: &str, option_count: usize) -> AnswerIndicator {
    let trimmed = text.trim();

    // 文本形式的整数索引同样按明确索引处理
    if let Ok(index) = trimmed.parse::<usize>() {
        if index < option_count {
            return AnswerIndicator::ExplicitIndex(index);
        }
    }

    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return AnswerIndicator::Letter(c);
        }
        if ('1'..='4').contains(&c) {
            return AnswerIndicator::Digit(c);
        }
    }

    AnswerIndicator::LiteralText(trimmed.to_string())
}
