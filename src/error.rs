use std::fmt;

/// 扫描级错误
///
/// 整场扫描只报告一次，报告后扫描终止。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// 未配置 API Key，扫描开始前即中止
    MissingCredential,
    /// 页面上没有找到任何题目
    NoQuestionsFound,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::MissingCredential => write!(f, "未配置 API Key，无法开始扫描"),
            ScanError::NoQuestionsFound => write!(f, "页面上没有找到题目"),
        }
    }
}

impl std::error::Error for ScanError {}

/// 单题分析错误
///
/// 在单个题目的边界被捕获，转换成页面上的错误标注后继续处理下一题，
/// 永远不会让整场扫描中断。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// 模型接口调用失败（网络 / HTTP / 接口自身报错）
    Provider { message: String },
    /// 模型接口调用超时
    Timeout { secs: u64 },
    /// 模型返回了空内容
    EmptyResponse,
    /// 选择题响应中找不到 Answer: 标记
    ParseFailure { raw: String },
    /// 解析出的答案文本匹配不到任何选项
    UnmatchedAnswer { answer: String },
}

impl AnalyzeError {
    /// 创建模型接口调用错误
    pub fn provider(message: impl Into<String>) -> Self {
        AnalyzeError::Provider {
            message: message.into(),
        }
    }

    /// 页面标注使用的用户可见文案
    ///
    /// 每种错误的文案各不相同，调用方据此渲染对应的提示框。
    pub fn user_message(&self) -> String {
        match self {
            AnalyzeError::Provider { .. } => {
                "Rate limit or API error - try again in a moment".to_string()
            }
            AnalyzeError::Timeout { secs } => {
                format!("Request timed out after {}s - try again in a moment", secs)
            }
            AnalyzeError::EmptyResponse => {
                "AI returned an empty response. Try a different model.".to_string()
            }
            AnalyzeError::ParseFailure { raw } => {
                format!("Could not parse answer from: \"{}\"", raw)
            }
            AnalyzeError::UnmatchedAnswer { answer } => {
                format!("Could not match answer: \"{}\"", answer)
            }
        }
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::Provider { message } => {
                write!(f, "调用模型接口失败: {}", message)
            }
            AnalyzeError::Timeout { secs } => {
                write!(f, "模型接口调用超时 ({} 秒)", secs)
            }
            AnalyzeError::EmptyResponse => write!(f, "模型返回内容为空"),
            AnalyzeError::ParseFailure { raw } => {
                write!(
                    f,
                    "无法从响应中解析出答案: {}",
                    crate::utils::logging::truncate_text(raw, 80)
                )
            }
            AnalyzeError::UnmatchedAnswer { answer } => {
                write!(f, "答案无法匹配任何选项: {}", answer)
            }
        }
    }
}

impl std::error::Error for AnalyzeError {}

/// 单题分析结果类型
pub type AnalyzeResult<T> = Result<T, AnalyzeError>;
