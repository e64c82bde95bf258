//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::orchestrator::ScanSummary;

/// 初始化 tracing 日志
///
/// RUST_LOG 未设置时默认 info 级别；重复调用不报错，测试里也能用。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// 初始化扫描日志文件
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n页面扫描日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(provider: &str, model: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 页面题目扫描模式");
    info!("📊 服务商: {} | 模型: {}", provider, model);
    info!("{}", "=".repeat(60));
}

/// 输出并落盘最终统计信息
pub fn log_scan_complete(summary: &ScanSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 扫描完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.analyzed, summary.located);
    info!("❌ 失败: {}", summary.failed);
    if summary.skipped > 0 {
        info!("💡 重复跳过: {}", summary.skipped);
    }
    info!("{}", "=".repeat(60));

    let record = format!(
        "{} | 共 {} 题 | 成功 {} | 失败 {} | 跳过 {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        summary.located,
        summary.analyzed,
        summary.failed,
        summary.skipped
    );
    if let Err(e) = append_to_file(log_file_path, &record) {
        tracing::warn!("写入日志文件失败: {}", e);
    } else {
        info!("\n日志已保存至: {}", log_file_path);
    }
}

fn append_to_file(path: &str, content: &str) -> Result<()> {
    use std::io::Write;
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a".repeat(12).as_str(), 10), format!("{}...", "a".repeat(10)));
    }
}
