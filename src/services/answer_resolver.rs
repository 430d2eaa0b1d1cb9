//! 答案解析 - 业务能力层
//!
//! 只负责"把答案标记落实为确定的选项索引"能力
//!
//! 对标记做穷举匹配，按固定优先级解析；任何输入都能得出结果，
//! 不向外抛任何错误。解析失败的题目保留而不丢弃
//! （兜底索引0 + `verified = false`），留给人工复核修正。

use tracing::debug;

use crate::models::{AnswerIndicator, RawQuestionRecord, ResolvedQuestion};

/// 把原始题目记录解析为确定的题目
///
/// 解析优先级（命中即停）：
/// 1. 范围内的明确索引 → 直接采用，`verified` 取原文标注标志
/// 2. 字面文本 → 归一化后与各选项做 相等/包含/被包含 匹配
/// 3. 字母 → a/A→0, b/B→1, ...（不区分大小写），范围内才采用
/// 4. 数字 → '1'→0 ... '4'→3（1-based 转 0-based），范围内才采用
/// 5. 都不成立 → 索引0兜底，`verified = false`
pub fn resolve(record: RawQuestionRecord) -> ResolvedQuestion {
    let RawQuestionRecord {
        question_text,
        options,
        answer_indicator,
        explicitly_marked,
    } = record;

    let (correct_index, verified) = match &answer_indicator {
        AnswerIndicator::ExplicitIndex(index) if *index < options.len() => {
            (Some(*index), explicitly_marked)
        }
        AnswerIndicator::LiteralText(text) => {
            (match_literal_text(text, &options), explicitly_marked)
        }
        AnswerIndicator::Letter(c) => {
            let index = letter_to_index(*c).filter(|i| *i < options.len());
            (index, true)
        }
        AnswerIndicator::Digit(d) => {
            let index = digit_to_index(*d).filter(|i| *i < options.len());
            (index, true)
        }
        // 超出范围的明确索引走兜底
        AnswerIndicator::ExplicitIndex(_) => (None, false),
    };

    match correct_index {
        Some(index) => ResolvedQuestion {
            question_text,
            options,
            correct_index: index,
            verified,
        },
        None => {
            debug!("答案标记 {:?} 无法落实到选项，兜底为索引0", answer_indicator);
            ResolvedQuestion {
                question_text,
                options,
                correct_index: 0,
                verified: false,
            }
        }
    }
}

/// 归一化后匹配字面答案文本
///
/// 双方都做小写化并去掉非字母数字非空格字符，
/// 接受第一个 相等/包含答案/被答案包含 的选项索引。
fn match_literal_text(answer: &str, options: &[String]) -> Option<usize> {
    let normalized_answer = normalize(answer);
    if normalized_answer.is_empty() {
        return None;
    }

    options.iter().position(|option| {
        let normalized_option = normalize(option);
        !normalized_option.is_empty()
            && (normalized_option == normalized_answer
                || normalized_option.contains(&normalized_answer)
                || normalized_answer.contains(&normalized_option))
    })
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// a/A → 0, b/B → 1, ...
fn letter_to_index(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_lowercase() as u8 - b'a') as usize)
    } else {
        None
    }
}

/// '1' → 0, ..., '4' → 3
fn digit_to_index(d: char) -> Option<usize> {
    match d {
        '1'..='4' => Some(d as usize - '1' as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        options: &[&str],
        indicator: AnswerIndicator,
        explicitly_marked: bool,
    ) -> RawQuestionRecord {
        RawQuestionRecord {
            question_text: "测试题干".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer_indicator: indicator,
            explicitly_marked,
        }
    }

    #[test]
    fn test_explicit_index_in_range() {
        let resolved = resolve(record(
            &["甲", "乙", "丙", "丁"],
            AnswerIndicator::ExplicitIndex(2),
            true,
        ));
        assert_eq!(resolved.correct_index, 2);
        assert!(resolved.verified);
    }

    #[test]
    fn test_explicit_index_verified_follows_marking() {
        // 明确索引但原文未标注 → 低置信
        let resolved = resolve(record(
            &["甲", "乙"],
            AnswerIndicator::ExplicitIndex(1),
            false,
        ));
        assert_eq!(resolved.correct_index, 1);
        assert!(!resolved.verified);
    }

    #[test]
    fn test_lowercase_letter_resolves() {
        let resolved = resolve(record(
            &["甲", "乙", "丙", "丁"],
            AnswerIndicator::Letter('b'),
            false,
        ));
        assert_eq!(resolved.correct_index, 1);
        assert!(resolved.verified);
    }

    #[test]
    fn test_uppercase_letter_resolves_identically() {
        let resolved = resolve(record(
            &["甲", "乙", "丙", "丁"],
            AnswerIndicator::Letter('B'),
            false,
        ));
        assert_eq!(resolved.correct_index, 1);
        assert!(resolved.verified);
    }

    #[test]
    fn test_letter_out_of_range_falls_back() {
        let resolved = resolve(record(&["甲", "乙"], AnswerIndicator::Letter('e'), true));
        assert_eq!(resolved.correct_index, 0);
        assert!(!resolved.verified);
    }

    #[test]
    fn test_digit_resolves_one_based() {
        let resolved = resolve(record(
            &["甲", "乙", "丙", "丁"],
            AnswerIndicator::Digit('3'),
            false,
        ));
        assert_eq!(resolved.correct_index, 2);
        assert!(resolved.verified);
    }

    #[test]
    fn test_literal_text_exact_match() {
        let resolved = resolve(record(
            &["Photosynthesis", "Respiration"],
            AnswerIndicator::LiteralText("photosynthesis".to_string()),
            true,
        ));
        assert_eq!(resolved.correct_index, 0);
        assert!(resolved.verified);
    }

    #[test]
    fn test_literal_text_containment_match() {
        // 答案文本带标点和多余修饰，归一化 + 包含匹配仍能命中
        let resolved = resolve(record(
            &["水", "二氧化碳 (CO2)", "氧气"],
            AnswerIndicator::LiteralText("二氧化碳".to_string()),
            true,
        ));
        assert_eq!(resolved.correct_index, 1);
        assert!(resolved.verified);
    }

    #[test]
    fn test_fallback_is_deterministic_and_retained() {
        let resolved = resolve(record(
            &["甲", "乙", "丙"],
            AnswerIndicator::LiteralText("完全对不上的答案".to_string()),
            true,
        ));
        // 题目保留，索引0兜底，低置信
        assert_eq!(resolved.correct_index, 0);
        assert!(!resolved.verified);
        assert_eq!(resolved.options.len(), 3);
    }
}
