//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次完整调用的流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `quiz_pipeline` - 试卷生成管线
//! - 校验输入（空文本在任何外部调用之前拒绝）
//! - 调用分段器切分文档
//! - 严格顺序地遍历分段（分段 n+1 的请求在分段 n 被完整消费后才发出）
//! - 聚合各分段产出（Aggregator 独占持有累积列表，赋予连续原始序号）
//! - 零题目时上报整体失败
//!
//! ## 层次关系
//!
//! ```text
//! quiz_pipeline (处理整篇文档)
//!     ↓
//! workflow::SegmentFlow (处理单个 Segment)
//!     ↓
//! services (能力层：segmenter / extractor / recovery / resolver / shuffler)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：管线只做调度和聚合，不做具体业务判断
//! 2. **失败即值**：分段失败是 `SegmentOutcome::Failed`，不是异常
//! 3. **无共享状态**：累积列表由单次调用独占，跨调用零共享

pub mod quiz_pipeline;

pub use quiz_pipeline::QuizPipeline;
