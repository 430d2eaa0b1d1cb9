//! # Text To Quiz
//!
//! 一个把文档文本变成随机化选择题试卷的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 管线各阶段的数据实体
//! - `Segment` → `RawQuestionRecord` → `ResolvedQuestion` → `ShuffledQuestion`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个模块一种能力
//! - `segmenter` - 文档分段能力
//! - `extractor` - LLM 提取能力（`Extractor` trait 可替换）
//! - `recovery` - 松散输出的结构化恢复能力
//! - `answer_resolver` - 答案标记解析能力
//! - `shuffler` - 选项打乱能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个分段"的完整处理流程
//! - `SegmentCtx` - 上下文封装（第几段 / 共几段）
//! - `SegmentFlow` - 流程编排（提取 → 恢复 → 解析 → 打乱）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/quiz_pipeline` - 整篇文档的管线，严格顺序遍历分段并聚合
//!
//! 另有 `api/` 入站边界（对外部 HTTP 层的契约）和 `app` 批处理驱动。
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use api::{handle_generate, StatusClass};
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{QuizRequest, QuizResponse, ShuffledQuestion};
pub use orchestrator::QuizPipeline;
pub use services::{ExtractService, Extractor, RawOutcome};
pub use workflow::{SegmentCtx, SegmentFlow, SegmentOutcome};
