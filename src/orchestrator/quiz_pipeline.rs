//! 试卷生成管线 - 编排层
//!
//! 管理一次完整的"文档文本 → 随机化试卷"调用：
//! 校验输入、分段、严格顺序地跑每个分段的流程、聚合产出。

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::ShuffledQuestion;
use crate::services::extractor::Extractor;
use crate::services::segmenter;
use crate::workflow::{SegmentCtx, SegmentFlow, SegmentOutcome};

/// 跨分段聚合器
///
/// 整条管线中唯一带跨分段状态的部件：一个累积列表，
/// 由单次调用独占持有，按分段顺序拼接并赋予连续的原始序号。
struct Aggregator {
    questions: Vec<ShuffledQuestion>,
    failed_segments: usize,
    total_segments: usize,
}

impl Aggregator {
    fn new(total_segments: usize) -> Self {
        Self {
            questions: Vec::new(),
            failed_segments: 0,
            total_segments,
        }
    }

    /// 收取一个分段的处理结果
    ///
    /// `original_index` 在入列时赋值：等于题目在拼接序列中的位置，
    /// 0-based 连续无缺口，与该题来自哪个分段无关。
    fn push_outcome(&mut self, outcome: SegmentOutcome) {
        match outcome {
            SegmentOutcome::Extracted(questions) => {
                for mut question in questions {
                    question.original_index = self.questions.len();
                    self.questions.push(question);
                }
            }
            SegmentOutcome::Failed => {
                self.failed_segments += 1;
            }
        }
    }

    /// 结束聚合
    ///
    /// 零题目时整体失败；只要有一道题存活，
    /// 个别分段的失败就只体现在运维日志里。
    fn finish(self) -> AppResult<Vec<ShuffledQuestion>> {
        if self.failed_segments > 0 {
            warn!(
                "⚠️ {}/{} 个分段提取失败",
                self.failed_segments, self.total_segments
            );
        }

        if self.questions.is_empty() {
            return Err(AppError::NoQuestionsFound {
                failed_segments: self.failed_segments,
                total_segments: self.total_segments,
            });
        }

        Ok(self.questions)
    }
}

/// 试卷生成管线
///
/// 对提取能力做泛型抽象（`E: Extractor`），
/// 测试注入固定输出的替身即可脱网验证整条管线。
pub struct QuizPipeline<E: Extractor> {
    extractor: E,
    flow: SegmentFlow,
    config: Config,
}

impl<E: Extractor> QuizPipeline<E> {
    /// 创建新的管线
    pub fn new(extractor: E, config: &Config) -> Self {
        Self {
            extractor,
            flow: SegmentFlow::new(config),
            config: config.clone(),
        }
    }

    /// 从文档文本生成随机化试卷
    ///
    /// 分段严格顺序处理：上一个分段的响应被完整消费之前，
    /// 不会发出下一个分段的请求。这保证诊断输出和原始序号
    /// 的赋值都是确定的、跟随文档顺序的。
    pub async fn generate(&self, text: &str) -> AppResult<Vec<ShuffledQuestion>> {
        // 输入校验在任何外部调用之前
        if text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let segments = segmenter::split_document(text, &self.config);
        info!("📄 文档切分为 {} 个分段", segments.len());

        let mut aggregator = Aggregator::new(segments.len());

        for segment in &segments {
            let ctx = SegmentCtx::new(segment.sequence_index, segments.len());
            let outcome = self.flow.run(&self.extractor, segment, &ctx).await;
            aggregator.push_outcome(outcome);
        }

        let questions = aggregator.finish()?;
        info!("✅ 共提取 {} 道题目", questions.len());

        Ok(questions)
    }
}
