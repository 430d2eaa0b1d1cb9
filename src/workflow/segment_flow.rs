//! 分段处理流程 - 流程层
//!
//! 核心职责：定义"一个分段"的完整处理流程
//!
//! 流程顺序：
//! 1. 提取调用（唯一的挂起点）
//! 2. 响应恢复 → 原始题目记录
//! 3. 答案解析 → 确定索引
//! 4. 选项打乱
//!
//! 分段失败以值的形式返回（`SegmentOutcome::Failed`），
//! 不向上抛错误：单个分段失败不会中止整条管线。

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{Segment, ShuffledQuestion};
use crate::services::extractor::{self, Extractor};
use crate::services::{answer_resolver, recovery, shuffler};
use crate::utils::logging::truncate_text;
use crate::workflow::segment_ctx::SegmentCtx;

/// 分段处理结果
#[derive(Debug, Clone)]
pub enum SegmentOutcome {
    /// 提取成功，携带该分段产出的题目
    /// （`original_index` 仍是占位值，由聚合器赋值）
    Extracted(Vec<ShuffledQuestion>),
    /// 提取调用失败（坏状态码或传输错误），该分段贡献零条题目
    Failed,
}

/// 分段处理流程
///
/// - 编排单个分段的完整处理
/// - 不持有提取客户端（按参数借用能力）
/// - 不出现跨分段状态
pub struct SegmentFlow {
    instruction: String,
    output_budget: u32,
    temperature: f32,
    verbose_logging: bool,
}

impl SegmentFlow {
    /// 创建新的分段处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            instruction: extractor::build_instruction(),
            output_budget: config.llm_max_output_tokens,
            temperature: config.llm_temperature,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理单个分段：提取 → 恢复 → 解析 → 打乱
    pub async fn run<E: Extractor>(
        &self,
        extractor: &E,
        segment: &Segment,
        ctx: &SegmentCtx,
    ) -> SegmentOutcome {
        info!("{} 🔍 正在提取题目...", ctx);

        // ========== 步骤 1: 提取调用 ==========
        let outcome = extractor
            .extract(
                &self.instruction,
                &segment.text,
                self.output_budget,
                self.temperature,
            )
            .await;

        if !outcome.success {
            warn!(
                "{} ⚠️ 提取调用失败 (状态码: {}): {}",
                ctx,
                outcome.status_code,
                outcome.error_detail.as_deref().unwrap_or("无详情")
            );
            return SegmentOutcome::Failed;
        }

        let body_text = match outcome.body_text {
            Some(text) => text,
            None => {
                warn!("{} ⚠️ 提取成功但响应体为空", ctx);
                return SegmentOutcome::Failed;
            }
        };

        // ========== 步骤 2: 响应恢复 ==========
        let records = recovery::recover_records(&body_text, ctx);

        info!("{} ✓ 恢复出 {} 条题目记录", ctx, records.len());

        // ========== 步骤 3+4: 答案解析 + 选项打乱 ==========
        let mut questions = Vec::with_capacity(records.len());
        for record in records {
            if self.verbose_logging {
                debug!("{} 题干: {}", ctx, truncate_text(&record.question_text, 80));
            }

            let resolved = answer_resolver::resolve(record);
            if !resolved.verified {
                debug!("{} 低置信答案，已兜底保留", ctx);
            }

            questions.push(shuffler::shuffle_question(resolved));
        }

        SegmentOutcome::Extracted(questions)
    }
}
