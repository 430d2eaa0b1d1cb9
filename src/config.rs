/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 触发分段的字符数阈值，同时也是每个分段的长度
    pub chunk_threshold: usize,
    /// 估算题目密度用的"每题字符数"启发值（只用于决定是否分段）
    pub chars_per_question: usize,
    /// 估算题目数超过该值时触发分段
    pub density_threshold: usize,
    /// 待处理文档存放目录
    pub docs_folder: String,
    /// 试卷输出目录
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 提取调用的采样温度
    pub llm_temperature: f32,
    /// 提取调用的输出 token 预算
    pub llm_max_output_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_threshold: 4000,
            chars_per_question: 200,
            density_threshold: 20,
            docs_folder: "input_docs".to_string(),
            output_folder: "output_quiz".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_temperature: 0.3,
            llm_max_output_tokens: 4096,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            chunk_threshold: std::env::var("CHUNK_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.chunk_threshold),
            chars_per_question: std::env::var("CHARS_PER_QUESTION").ok().and_then(|v| v.parse().ok()).unwrap_or(default.chars_per_question),
            density_threshold: std::env::var("DENSITY_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.density_threshold),
            docs_folder: std::env::var("DOCS_FOLDER").unwrap_or(default.docs_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_temperature),
            llm_max_output_tokens: std::env::var("LLM_MAX_OUTPUT_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_max_output_tokens),
        }
    }
}
