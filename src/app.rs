//! 应用驱动
//!
//! 批量模式：扫描文档目录里的纯文本文件，逐个跑管线，
//! 把生成的试卷以 JSON 形式写入输出目录。
//! 二进制文档（PDF/DOCX）的解码由上游协作方完成，
//! 这里只消费 unicode 纯文本。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::{self, StatusClass};
use crate::config::Config;
use crate::models::QuizRequest;
use crate::orchestrator::QuizPipeline;
use crate::services::ExtractService;
use crate::utils::logging::{log_doc_start, log_docs_loaded, log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    pipeline: QuizPipeline<ExtractService>,
}

impl App {
    /// 初始化应用
    ///
    /// 提取能力不可用（API 密钥缺失）时在这里立即失败，
    /// 不会进入任何文档处理。
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config.docs_folder, &config.llm_model_name);

        let extractor = ExtractService::new(&config)?;
        let pipeline = QuizPipeline::new(extractor, &config);

        Ok(Self { config, pipeline })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let doc_paths = scan_documents(&self.config.docs_folder)?;

        if doc_paths.is_empty() {
            warn!("⚠️ 没有找到待处理的文本文档，程序结束");
            return Ok(());
        }

        log_docs_loaded(doc_paths.len());

        fs::create_dir_all(&self.config.output_folder)
            .with_context(|| format!("无法创建输出目录: {}", self.config.output_folder))?;

        let mut stats = ProcessingStats::default();
        stats.total = doc_paths.len();

        for (idx, path) in doc_paths.iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            log_doc_start(idx + 1, doc_paths.len(), &name);

            match self.process_document(path).await {
                Ok(question_count) => {
                    info!("✅ {} 生成 {} 道题目", name, question_count);
                    stats.success += 1;
                }
                Err(e) => {
                    error!("❌ {} 处理失败: {}", name, e);
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_folder,
        );

        Ok(())
    }

    /// 处理单个文档：读文本 → 跑管线 → 写试卷 JSON
    async fn process_document(&self, path: &Path) -> Result<usize> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("读取文档失败: {}", path.display()))?;

        let request = QuizRequest { text };
        let (status, response) = api::handle_generate(&self.pipeline, request).await;

        if status != StatusClass::Ok {
            anyhow::bail!(
                "生成失败 ({:?}): {}",
                status,
                response.error.as_deref().unwrap_or("未知原因")
            );
        }

        let output_path = self.output_path_for(path);
        let json = serde_json::to_string_pretty(&response)?;
        fs::write(&output_path, json)
            .with_context(|| format!("写入试卷失败: {}", output_path.display()))?;

        info!("📤 试卷已写入: {}", output_path.display());

        Ok(response.questions.len())
    }

    fn output_path_for(&self, doc_path: &Path) -> PathBuf {
        let stem = doc_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "quiz".to_string());
        Path::new(&self.config.output_folder).join(format!("{}.quiz.json", stem))
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

/// 扫描文档目录，收集 .txt 文件（按文件名排序，保证处理顺序稳定）
fn scan_documents(folder: &str) -> Result<Vec<PathBuf>> {
    let dir = Path::new(folder);
    if !dir.exists() {
        warn!("⚠️ 文档目录不存在: {}", folder);
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("无法读取文档目录: {}", folder))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        })
        .collect();

    paths.sort();
    Ok(paths)
}
