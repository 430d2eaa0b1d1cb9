//! 提取服务 - 业务能力层
//!
//! 只负责"把一段文本交给 LLM 提取题目"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 提取调用的原始结果
///
/// 提取失败不是错误：管线把非成功结果记为该分段失败并继续，
/// `error_detail` 只用于日志，管线不做进一步检查。
#[derive(Debug, Clone)]
pub struct RawOutcome {
    /// 调用是否成功
    pub success: bool,
    /// 状态码（成功为200，传输/上游失败为502）
    pub status_code: u16,
    /// 成功时的原始文本输出
    pub body_text: Option<String>,
    /// 失败时的错误详情
    pub error_detail: Option<String>,
}

impl RawOutcome {
    /// 成功结果
    pub fn success(body_text: String) -> Self {
        Self {
            success: true,
            status_code: 200,
            body_text: Some(body_text),
            error_detail: None,
        }
    }

    /// 失败结果
    pub fn failure(status_code: u16, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code,
            body_text: None,
            error_detail: Some(detail.into()),
        }
    }
}

/// 提取能力接口
///
/// 把外部提取服务抽象成可替换的能力：
/// 管线只依赖这个 trait，测试用固定输出的替身即可脱网运行。
pub trait Extractor {
    /// 对一段文档文本执行一次提取调用
    ///
    /// # 参数
    /// - `instruction`: 指令内容（system 角色）
    /// - `payload`: 文档分段文本（user 角色）
    /// - `output_budget`: 输出 token 预算
    /// - `temperature`: 采样温度
    ///
    /// # 返回
    /// 永远返回 `RawOutcome`，失败以值的形式携带，不抛错误
    fn extract(
        &self,
        instruction: &str,
        payload: &str,
        output_budget: u32,
        temperature: f32,
    ) -> impl std::future::Future<Output = RawOutcome> + Send;
}

/// LLM 提取服务
///
/// 职责：
/// - 调用 LLM API 从文本中提取题目
/// - 只处理单个分段
/// - 不出现 Vec<Segment>
/// - 不关心流程顺序
pub struct ExtractService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl ExtractService {
    /// 创建新的提取服务
    ///
    /// API 密钥缺失时立即报错（能力不可用对整次调用致命，
    /// 必须在任何分段工作开始之前发现）。
    pub fn new(config: &Config) -> AppResult<Self> {
        if config.llm_api_key.trim().is_empty() {
            return Err(AppError::MissingCredential);
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Ok(Self {
            client,
            model_name: config.llm_model_name.clone(),
        })
    }
}

impl Extractor for ExtractService {
    async fn extract(
        &self,
        instruction: &str,
        payload: &str,
        output_budget: u32,
        temperature: f32,
    ) -> RawOutcome {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("分段文本长度: {} 字符", payload.chars().count());

        let system_msg = match ChatCompletionRequestSystemMessageArgs::default()
            .content(instruction)
            .build()
        {
            Ok(msg) => msg,
            Err(e) => return RawOutcome::failure(502, format!("构建系统消息失败: {}", e)),
        };

        let user_msg = match ChatCompletionRequestUserMessageArgs::default()
            .content(payload)
            .build()
        {
            Ok(msg) => msg,
            Err(e) => return RawOutcome::failure(502, format!("构建用户消息失败: {}", e)),
        };

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        let request = match CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(temperature)
            .max_tokens(output_budget)
            .build()
        {
            Ok(req) => req,
            Err(e) => return RawOutcome::failure(502, format!("构建请求失败: {}", e)),
        };

        // 调用 API，不重试
        let response = match self.client.chat().create(request).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("LLM API 调用失败: {}", e);
                return RawOutcome::failure(502, e.to_string());
            }
        };

        debug!("LLM API 调用成功");

        // 提取响应内容
        match response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
        {
            Some(content) => RawOutcome::success(content),
            None => RawOutcome::failure(502, "LLM 返回内容为空"),
        }
    }
}

/// 构建提取指令（system 角色）
///
/// 指令做两件事：
/// 1. 规定精确的输出格式（JSON 数组，零基 answer 索引，explicit 布尔）
/// 2. 枚举所有需要识别的原文答案标注写法，让提取服务不必靠猜
pub fn build_instruction() -> String {
    r#"你是一个专业的题目提取助手，负责从文档文本中提取所有选择题。

【输出格式】
只返回一个 JSON 数组，数组中每道题是一个对象：
  {
    "question": "题干文本",
    "options": ["选项文本", "选项文本", ...],
    "answer": 正确选项的索引（0-based 整数，第一个选项是 0）,
    "explicit": 原文中是否明确标出了答案（true/false）
  }

【答案标注的识别】
原文中正确答案可能以多种写法标出，都要识别：
- 标签写法："Answer: B"、"Ans: B"、"Ans.= b"、"Correct: B"、"答案：B"、"正确答案：B"
- 括号写法：题干或选项后的 "(B)"、"（B）"
- 字母/数字写法：单独一行的 "B"、"b"、"2" 等
找到任何一种明确标注时，answer 填对应选项的 0-based 索引，explicit 填 true。
原文完全没有标注时，根据题目内容判断最可能的正确选项，explicit 填 false。

【注意事项】
- 选项文本不要带 "A."、"(1)"、"a)" 之类的编号前缀
- 题干和选项保留原文内容，不要翻译、不要改写
- 文档里没有选择题时返回 []
- 只返回 JSON 数组，不要返回任何其他内容，不要用代码块包裹"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_enumerates_marking_conventions() {
        let instruction = build_instruction();

        // 所有识别的标注写法都必须向提取服务枚举出来
        assert!(instruction.contains("Answer:"));
        assert!(instruction.contains("Ans:"));
        assert!(instruction.contains("Correct:"));
        assert!(instruction.contains("答案："));
        assert!(instruction.contains("0-based"));
        assert!(instruction.contains("explicit"));
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let config = Config {
            llm_api_key: "   ".to_string(),
            ..Config::default()
        };

        let result = ExtractService::new(&config);
        assert!(matches!(result, Err(AppError::MissingCredential)));
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = RawOutcome::success("[]".to_string());
        assert!(ok.success);
        assert_eq!(ok.status_code, 200);
        assert_eq!(ok.body_text.as_deref(), Some("[]"));

        let bad = RawOutcome::failure(502, "连接超时");
        assert!(!bad.success);
        assert!(bad.body_text.is_none());
        assert_eq!(bad.error_detail.as_deref(), Some("连接超时"));
    }
}
