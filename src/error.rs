use thiserror::Error;

/// 应用程序错误类型
///
/// 错误分类（见各 variant 注释）：
/// - 输入错误：在任何外部调用之前拒绝，不可重试
/// - 能力不可用：整次调用致命，立即上报
/// - 全部提取失败：所有分段均未贡献题目，向调用方上报
///
/// 单个分段的提取/解析失败不在此处：它们被就地恢复为值
/// （`SegmentOutcome::Failed`），不会作为错误向外传播。
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入文本为空或仅含空白，在调用分段器之前拒绝
    #[error("输入文本为空")]
    EmptyInput,

    /// LLM API 密钥缺失，提取能力不可用
    #[error("LLM API 密钥未配置（请设置 LLM_API_KEY）")]
    MissingCredential,

    /// 所有分段都没有贡献任何题目
    #[error("未能从文档中提取到任何题目（{failed_segments}/{total_segments} 个分段失败）")]
    NoQuestionsFound {
        failed_segments: usize,
        total_segments: usize,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
