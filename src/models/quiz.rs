use serde::{Deserialize, Serialize};

/// 文档分段
///
/// 由分段器切出的一段连续文本。所有分段按 `sequence_index` 顺序
/// 拼接后必须精确还原原始文档（无缺口、无重叠、无乱序）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 分段文本
    pub text: String,
    /// 分段在文档中的序号（从0开始）
    pub sequence_index: usize,
}

impl Segment {
    pub fn new(text: String, sequence_index: usize) -> Self {
        Self {
            text,
            sequence_index,
        }
    }
}

/// 答案标记
///
/// 上游提取服务返回的"哪个选项是正确答案"的原始表示。
/// 在响应恢复阶段一次性分类完成，之后的解析器只做穷举匹配，
/// 不再做任何字符串嗅探。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerIndicator {
    /// 明确的0-based选项索引
    ExplicitIndex(usize),
    /// 单个字母（a/A → 0, b/B → 1, ...）
    Letter(char),
    /// 单个数字字符 '1'-'4'（1-based）
    Digit(char),
    /// 其余情况：答案的字面文本
    LiteralText(String),
}

/// 原始题目记录
///
/// 由响应恢复器从不可信的上游文本中产出。
/// `answer_indicator` 尚未对照选项范围校验，校验在答案解析器中完成。
#[derive(Debug, Clone)]
pub struct RawQuestionRecord {
    /// 题干文本
    pub question_text: String,
    /// 选项列表（长度 ≥ 2）
    pub options: Vec<String>,
    /// 答案标记
    pub answer_indicator: AnswerIndicator,
    /// 答案是否在原文中被明确标出
    pub explicitly_marked: bool,
}

/// 已解析题目
///
/// `correct_index` 保证是 `options` 中的合法位置
/// （解析全部失败时兜底为0，同时 `verified = false`）。
#[derive(Debug, Clone)]
pub struct ResolvedQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub verified: bool,
}

/// 打乱后的题目：管线的最终对外产物
///
/// `correct_answer_text` 携带正确选项的字面文本，
/// 下游消费方不需要再推导任何索引。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffledQuestion {
    #[serde(rename = "questionText")]
    pub question_text: String,

    /// 随机排列后的选项
    pub options: Vec<String>,

    #[serde(rename = "correctAnswerText")]
    pub correct_answer_text: String,

    /// 题目在全文档提取结果中的原始序号（0-based，连续无缺口）
    #[serde(rename = "originalIndex")]
    pub original_index: usize,

    /// 答案是否来自原文的明确标注（高置信）而非兜底猜测（低置信）
    pub verified: bool,
}

/// 生成请求（入站边界，来自外部的 HTTP 层）
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    pub text: String,
}

/// 生成响应
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<ShuffledQuestion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuizResponse {
    /// 成功响应
    pub fn ok(questions: Vec<ShuffledQuestion>) -> Self {
        Self {
            questions,
            error: None,
        }
    }

    /// 失败响应（空题目列表 + 错误信息）
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            questions: Vec::new(),
            error: Some(error.into()),
        }
    }
}
