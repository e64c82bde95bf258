//! 程序配置
//!
//! 每次扫描调用读取一次：config.toml 打底，环境变量覆盖。
//! 配置以显式结构体传给各层，没有全局单例。

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::models::provider::Provider;

/// 默认配置文件路径
pub const CONFIG_FILE: &str = "config.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 模型服务商的 API Key
    pub api_key: String,
    /// 模型服务商（groq / openai）
    pub provider: Provider,
    /// 模型名，空串表示用服务商默认模型
    pub model_name: String,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标页面标题片段，空表示取第一个已打开的页面
    pub target_title: Option<String>,
    /// 相邻两次模型调用之间的最小间隔
    pub scan_delay_ms: u64,
    /// 单次模型调用的超时
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 分析失败题目的警告文件
    pub warn_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            provider: Provider::Groq,
            model_name: String::new(),
            browser_debug_port: 9222,
            target_title: None,
            scan_delay_ms: 1500,
            request_timeout_secs: 30,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            warn_file: "warn.txt".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：config.toml（存在时）打底，环境变量覆盖
    pub async fn load() -> Result<Self> {
        let base = if Path::new(CONFIG_FILE).exists() {
            Self::from_toml_file(Path::new(CONFIG_FILE)).await?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件加载配置
    pub async fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;

        Ok(config)
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Self {
        Self {
            api_key: std::env::var("LLM_API_KEY").unwrap_or(self.api_key),
            provider: std::env::var("LLM_PROVIDER").ok().and_then(|v| Provider::from_str(&v)).unwrap_or(self.provider),
            model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.model_name),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.browser_debug_port),
            target_title: std::env::var("TARGET_TITLE").ok().or(self.target_title),
            scan_delay_ms: std::env::var("SCAN_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.scan_delay_ms),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            warn_file: std::env::var("WARN_FILE").unwrap_or(self.warn_file),
        }
    }

    /// 实际使用的模型名：显式配置优先，否则取服务商默认
    pub fn model_name(&self) -> String {
        if self.model_name.trim().is_empty() {
            self.provider.default_model().to_string()
        } else {
            self.model_name.clone()
        }
    }
}
