//! 分段处理上下文
//!
//! 封装"我正在处理全文档的第几个分段"这一信息

use std::fmt::Display;

/// 分段处理上下文
///
/// 只携带日志和诊断需要的定位信息
#[derive(Debug, Clone)]
pub struct SegmentCtx {
    /// 分段序号（从0开始）
    pub segment_index: usize,

    /// 分段总数
    pub total_segments: usize,
}

impl SegmentCtx {
    /// 创建新的分段上下文
    pub fn new(segment_index: usize, total_segments: usize) -> Self {
        Self {
            segment_index,
            total_segments,
        }
    }
}

impl Display for SegmentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[分段 {}/{}]",
            self.segment_index + 1,
            self.total_segments
        )
    }
}
