use anyhow::Result;
use tracing::info;

use scan_question_answer::config::Config;
use scan_question_answer::error::ScanError;
use scan_question_answer::orchestrator::App;
use scan_question_answer::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load().await?;

    // 缺少凭证时不必连接浏览器，直接中止
    if config.api_key.trim().is_empty() {
        return Err(ScanError::MissingCredential.into());
    }

    // 初始化并执行一场扫描
    let app = App::initialize(config).await?;
    let summary = app.run_scan().await?;

    info!(
        "✅ 扫描结束: 共 {} 题，成功 {}，失败 {}",
        summary.located, summary.analyzed, summary.failed
    );

    Ok(())
}
