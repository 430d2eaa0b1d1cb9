//! 试卷生成入站边界
//!
//! 管线对外部 HTTP 层的唯一契约：`QuizRequest` 进，
//! `(StatusClass, QuizResponse)` 出。HTTP 层只需要把
//! `StatusClass` 映射成具体状态码，不需要理解管线内部。

use tracing::error;

use crate::error::AppError;
use crate::models::{QuizRequest, QuizResponse};
use crate::orchestrator::QuizPipeline;
use crate::services::extractor::Extractor;

/// 响应状态类别
///
/// - `Ok`: 成功，`questions` 非空
/// - `ClientError`: 输入问题（空文本 / 文档中无可识别题目）
/// - `ServerError`: 上游能力问题（所有分段的提取调用全部失败）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Ok,
    ClientError,
    ServerError,
}

/// 处理一次生成请求
///
/// 空白输入在调用分段器之前拒绝；全部失败时返回空题目列表
/// 加错误信息，绝不携带部分数据。
pub async fn handle_generate<E: Extractor>(
    pipeline: &QuizPipeline<E>,
    request: QuizRequest,
) -> (StatusClass, QuizResponse) {
    match pipeline.generate(&request.text).await {
        Ok(questions) => (StatusClass::Ok, QuizResponse::ok(questions)),
        Err(e) => {
            error!("试卷生成失败: {}", e);
            (classify_error(&e), QuizResponse::failure(e.to_string()))
        }
    }
}

/// 把错误落到状态类别
///
/// 零题目且所有分段都在提取调用阶段失败 → 上游问题（服务端错误）；
/// 零题目但至少有分段正常应答 → 文档内容问题（客户端错误）。
fn classify_error(error: &AppError) -> StatusClass {
    match error {
        AppError::EmptyInput => StatusClass::ClientError,
        AppError::NoQuestionsFound {
            failed_segments,
            total_segments,
        } if *total_segments > 0 && failed_segments == total_segments => StatusClass::ServerError,
        AppError::NoQuestionsFound { .. } => StatusClass::ClientError,
        AppError::MissingCredential => StatusClass::ServerError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_client_error() {
        assert_eq!(classify_error(&AppError::EmptyInput), StatusClass::ClientError);
    }

    #[test]
    fn test_all_segments_failed_is_server_error() {
        let error = AppError::NoQuestionsFound {
            failed_segments: 3,
            total_segments: 3,
        };
        assert_eq!(classify_error(&error), StatusClass::ServerError);
    }

    #[test]
    fn test_unrecognizable_content_is_client_error() {
        // 分段正常应答但没恢复出任何题目
        let error = AppError::NoQuestionsFound {
            failed_segments: 0,
            total_segments: 1,
        };
        assert_eq!(classify_error(&error), StatusClass::ClientError);
    }

    #[test]
    fn test_missing_credential_is_server_error() {
        assert_eq!(
            classify_error(&AppError::MissingCredential),
            StatusClass::ServerError
        );
    }
}
