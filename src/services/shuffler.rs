//! 选项打乱 - 业务能力层
//!
//! 只负责"随机排列选项并追踪正确项新位置"能力
//!
//! Fisher–Yates 均匀洗牌，作用在 (选项, 是否正确) 配对上，
//! 洗完扫描配对找出正确项的新位置。这是展示用的打乱，
//! 不是安全边界，随机源用普通 `thread_rng` 即可。

use rand::Rng;

use crate::models::{ResolvedQuestion, ShuffledQuestion};

/// 打乱一道已解析题目的选项
///
/// `original_index` 先填0占位，由聚合器统一赋值。
pub fn shuffle_question(question: ResolvedQuestion) -> ShuffledQuestion {
    shuffle_question_with_rng(question, &mut rand::thread_rng())
}

/// 用指定随机源打乱（测试用种子随机源可得到确定结果）
pub fn shuffle_question_with_rng(
    question: ResolvedQuestion,
    rng: &mut impl Rng,
) -> ShuffledQuestion {
    let correct_answer_text = question.options[question.correct_index].clone();

    let (options, _new_correct_index) =
        shuffle_options_with_rng(question.options, question.correct_index, rng);

    ShuffledQuestion {
        question_text: question.question_text,
        options,
        correct_answer_text,
        original_index: 0,
        verified: question.verified,
    }
}

/// Fisher–Yates 打乱选项，返回 (打乱后的选项, 正确项新索引)
///
/// 不变量：打乱前后恰好一项被标记为正确；选项文本的多重集不变；
/// 单选项输入原样返回。
pub fn shuffle_options_with_rng(
    options: Vec<String>,
    correct_index: usize,
    rng: &mut impl Rng,
) -> (Vec<String>, usize) {
    let mut pairs: Vec<(String, bool)> = options
        .into_iter()
        .enumerate()
        .map(|(i, option)| (option, i == correct_index))
        .collect();

    // Fisher–Yates：i 从 len-1 递减到 1，与 0..=i 中均匀选出的位置交换
    for i in (1..pairs.len()).rev() {
        let j = rng.gen_range(0..=i);
        pairs.swap(i, j);
    }

    let new_correct_index = pairs
        .iter()
        .position(|(_, was_correct)| *was_correct)
        .unwrap_or(0);

    let shuffled: Vec<String> = pairs.into_iter().map(|(option, _)| option).collect();
    (shuffled, new_correct_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn options(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_multiset_unchanged_and_correct_tracked() {
        let mut rng = StdRng::seed_from_u64(42);

        for correct_index in 0..4 {
            for _ in 0..50 {
                let input = options(&["甲", "乙", "丙", "丁"]);
                let (shuffled, new_index) =
                    shuffle_options_with_rng(input.clone(), correct_index, &mut rng);

                let mut sorted_input = input.clone();
                let mut sorted_output = shuffled.clone();
                sorted_input.sort();
                sorted_output.sort();
                assert_eq!(sorted_input, sorted_output);

                assert_eq!(shuffled[new_index], input[correct_index]);
            }
        }
    }

    #[test]
    fn test_single_option_is_noop() {
        let mut rng = StdRng::seed_from_u64(7);
        let (shuffled, new_index) = shuffle_options_with_rng(options(&["唯一"]), 0, &mut rng);

        assert_eq!(shuffled, options(&["唯一"]));
        assert_eq!(new_index, 0);
    }

    #[test]
    fn test_duplicate_option_texts_keep_exactly_one_correct() {
        // 两个选项文本相同，靠配对标记（而不是文本比较）追踪正确项
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            let (shuffled, new_index) =
                shuffle_options_with_rng(options(&["相同", "相同", "不同"]), 1, &mut rng);
            assert_eq!(shuffled[new_index], "相同");
            assert!(new_index < shuffled.len());
        }
    }

    #[test]
    fn test_shuffle_actually_permutes() {
        // 200 次洗牌应当出现不止一种排列
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            let (shuffled, _) =
                shuffle_options_with_rng(options(&["a", "b", "c", "d"]), 0, &mut rng);
            seen.insert(shuffled);
        }

        assert!(seen.len() > 1);
    }

    #[test]
    fn test_shuffle_question_carries_correct_text() {
        let mut rng = StdRng::seed_from_u64(5);
        let question = ResolvedQuestion {
            question_text: "2+2=?".to_string(),
            options: options(&["3", "4", "5", "6"]),
            correct_index: 1,
            verified: true,
        };

        let shuffled = shuffle_question_with_rng(question, &mut rng);

        assert_eq!(shuffled.correct_answer_text, "4");
        assert!(shuffled.options.contains(&"4".to_string()));
        assert!(shuffled.verified);
    }
}
