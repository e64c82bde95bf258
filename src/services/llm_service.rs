//! LLM 服务 - 业务能力层
//!
//! 只负责"一段提示词换一段补全"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 通过 api_base 切换 OpenAI 兼容的服务商（Groq / OpenAI）
//! - 请求和响应走原始 JSON（byot），部分服务商把推理类模型的
//!   输出放在非标准的 reasoning 字段里，类型化结构读不到

use async_openai::{config::OpenAIConfig, Client};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AnalyzeError, AnalyzeResult};

/// 限制输出长度：两行 Answer / Explanation 用不了多少 token
const MAX_COMPLETION_TOKENS: u32 = 200;
/// 低温度，答案尽量确定
const TEMPERATURE: f64 = 0.05;

/// LLM 服务
///
/// 职责：
/// - 调用补全接口，取回助手的文本内容
/// - 只处理单个提示词
/// - 不认识 Question，不做解析
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    request_timeout: Duration,
}

impl LlmService {
    /// 按配置创建 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(config.provider.api_base());

        Self {
            client: Client::with_config(openai_config),
            model_name: config.model_name(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// 发送单条 user 消息，返回助手的文本内容
    ///
    /// 优先取 message.content，content 缺失或为空时退到
    /// message.reasoning。两者都没有时返回空串，由解析器
    /// 归类为空响应。
    pub async fn complete(&self, prompt: &str) -> AnalyzeResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        let request = json!({
            "model": self.model_name,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let chat = self.client.chat();
        let call = chat.create_byot(request);

        let response: Value = match timeout(self.request_timeout, call).await {
            Err(_) => {
                warn!("LLM API 调用超时 ({} 秒)", self.request_timeout.as_secs());
                return Err(AnalyzeError::Timeout {
                    secs: self.request_timeout.as_secs(),
                });
            }
            Ok(Err(e)) => {
                warn!("LLM API 调用失败: {}", e);
                return Err(AnalyzeError::provider(e.to_string()));
            }
            Ok(Ok(value)) => value,
        };

        debug!("LLM API 调用成功");

        Ok(extract_completion_text(&response))
    }
}

/// 从原始响应中提取助手文本，content 为空时退到 reasoning
fn extract_completion_text(response: &Value) -> String {
    let message = response.pointer("/choices/0/message");

    let content = message
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let text = content.or_else(|| {
        message
            .and_then(|m| m.get("reasoning"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    });

    text.unwrap_or_default().to_string()
}
