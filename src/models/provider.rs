//! 模型服务商
//!
//! 两个可互换的绑定，都走 OpenAI 兼容的 chat-completion 接口，
//! 区别只在端点和默认模型。

use serde::Deserialize;

/// 模型服务商
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Groq,
    OpenAi,
}

impl Provider {
    /// 从配置字符串解析服务商，无法识别时返回 None
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Some(Provider::Groq),
            "openai" => Some(Provider::OpenAi),
            _ => None,
        }
    }

    /// OpenAI 兼容接口的基础地址
    pub fn api_base(&self) -> &'static str {
        match self {
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// 未显式配置模型名时的默认模型
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Groq => "llama-3.3-70b-versatile",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_known_providers() {
        assert_eq!(Provider::from_str("groq"), Some(Provider::Groq));
        assert_eq!(Provider::from_str(" OpenAI "), Some(Provider::OpenAi));
        assert_eq!(Provider::from_str("claude"), None);
    }

    #[test]
    fn test_groq_uses_openai_compatible_endpoint() {
        assert!(Provider::Groq.api_base().contains("/openai/"));
    }
}
