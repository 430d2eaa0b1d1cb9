//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认 info 级别，可用 RUST_LOG 环境变量覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `docs_folder`: 文档目录
/// - `model_name`: 提取模型名称
pub fn log_startup(docs_folder: &str, model_name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档试卷生成模式");
    info!("📁 文档目录: {}", docs_folder);
    info!("🤖 提取模型: {}", model_name);
    info!("{}", "=".repeat(60));
}

/// 记录文档加载信息
pub fn log_docs_loaded(total: usize) {
    info!("✓ 找到 {} 个待处理的文档\n", total);
}

/// 记录单个文档开始处理
pub fn log_doc_start(doc_index: usize, total: usize, name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📦 处理第 {}/{} 个文档: {}", doc_index, total, name);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `output_folder`: 输出目录
pub fn print_final_stats(success: usize, failed: usize, total: usize, output_folder: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n试卷已保存至: {}", output_folder);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
