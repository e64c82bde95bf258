//! 扫描处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一场扫描从头到尾的调度。
//!
//! ## 核心流程
//!
//! 1. **清场**：清掉上一场扫描留下的标注和高亮
//! 2. **快照**：一次 JS 求值捕获整棵文档树
//! 3. **定位**：检测引擎产出去重、有序的题目序列
//! 4. **逐题处理**：提示词 → 模型 → 解析 → 标注，失败转错误标注
//! 5. **节流**：相邻模型调用之间保持固定间隔
//! 6. **收尾**：隐藏进度、弹完成提示、输出统计

use anyhow::Result;
use chromiumoxide::Browser;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::detect::QuestionLocator;
use crate::error::ScanError;
use crate::infrastructure::JsExecutor;
use crate::models::ScanSession;
use crate::services::{AnnotateService, WarnWriter};
use crate::utils::logging::{init_log_file, log_scan_complete, log_startup};
use crate::workflow::{QuestionCtx, QuestionFlow};

/// 一场扫描的统计
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanSummary {
    /// 定位到的题目总数
    pub located: usize,
    /// 成功分析并标注的题目数
    pub analyzed: usize,
    /// 分析失败（已落错误标注）的题目数
    pub failed: usize,
    /// 指纹重复被跳过的题目数
    pub skipped: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    executor: JsExecutor,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(config.provider.as_str(), &config.model_name());

        let (browser, page) = browser::connect_to_browser_and_page(
            config.browser_debug_port,
            config.target_title.as_deref(),
        )
        .await?;

        let executor = JsExecutor::new(page);

        Ok(Self {
            config,
            _browser: browser,
            executor,
        })
    }

    /// 对当前页面执行一场扫描
    pub async fn run_scan(&self) -> Result<ScanSummary> {
        let summary = scan_page(&self.executor, &self.config).await?;
        log_scan_complete(&summary, &self.config.output_log_file);
        Ok(summary)
    }
}

/// 扫描一个页面：定位 → 提问 → 解析 → 标注
///
/// 扫描级错误（缺 Key / 没有题目）以 Err 返回；单题错误在题目
/// 边界内消化成页面标注，循环继续。
pub async fn scan_page(executor: &JsExecutor, config: &Config) -> Result<ScanSummary> {
    let annotate = AnnotateService::new();

    // 没有凭证时在一切扫描动作之前中止
    if config.api_key.trim().is_empty() {
        if let Err(e) = annotate
            .show_alert(executor, "Please set your API key before scanning")
            .await
        {
            warn!("⚠️ 页面提示失败: {}", e);
        }
        return Err(ScanError::MissingCredential.into());
    }

    // 清掉上一场扫描的痕迹
    if let Err(e) = annotate.clear_previous_results(executor).await {
        warn!("⚠️ 清除旧标注失败: {}", e);
    }

    info!("📷 正在捕获页面快照...");
    let snapshot = executor.capture_snapshot().await?;
    let doc = snapshot.into_document();

    let questions = QuestionLocator::new(&doc).find_questions();
    info!("🔍 定位到 {} 道题目", questions.len());

    if questions.is_empty() {
        if let Err(e) = annotate
            .show_alert(executor, "No questions found on this page")
            .await
        {
            warn!("⚠️ 页面提示失败: {}", e);
        }
        return Err(ScanError::NoQuestionsFound.into());
    }

    let total = questions.len();
    if let Err(e) = annotate
        .show_loading(
            executor,
            &format!("Found {} question(s). Analyzing...", total),
        )
        .await
    {
        warn!("⚠️ 显示进度指示失败: {}", e);
    }

    let flow = QuestionFlow::new(config);
    let warn_writer = WarnWriter::new(config.warn_file.clone());
    // 本场扫描的去重状态，扫描结束即丢弃
    let mut session = ScanSession::new();
    let mut summary = ScanSummary {
        located: total,
        ..Default::default()
    };

    for (index, question) in questions.iter().enumerate() {
        let ctx = QuestionCtx::new(index + 1, total);

        if !session.mark_processed(&question.fingerprint) {
            info!("{} 💡 指纹重复，跳过", ctx);
            summary.skipped += 1;
            continue;
        }

        if let Err(e) = annotate
            .update_loading(
                executor,
                &format!("Analyzing question {} of {}...", index + 1, total),
            )
            .await
        {
            warn!("{} ⚠️ 更新进度指示失败: {}", ctx, e);
        }

        match flow.run(executor, &doc, question, &ctx).await {
            Ok(_) => {
                summary.analyzed += 1;
            }
            Err(e) => {
                warn!("{} ❌ {}", ctx, e);
                if let Err(annotate_err) = annotate
                    .add_error(executor, &doc, question.anchor, &e.user_message())
                    .await
                {
                    warn!("{} ⚠️ 错误标注失败: {}", ctx, annotate_err);
                }
                if let Err(warn_err) = warn_writer
                    .write(index + 1, &question.text, &e.to_string())
                    .await
                {
                    warn!("{} ⚠️ 写入警告文件失败: {}", ctx, warn_err);
                }
                summary.failed += 1;
            }
        }

        // 固定节流间隔，避免触发服务商限流
        sleep(Duration::from_millis(config.scan_delay_ms)).await;
    }

    if let Err(e) = annotate.hide_loading(executor).await {
        warn!("⚠️ 隐藏进度指示失败: {}", e);
    }
    if let Err(e) = annotate
        .show_completion(executor, &format!("Analyzed {} question(s)!", total))
        .await
    {
        warn!("⚠️ 显示完成提示失败: {}", e);
    }

    Ok(summary)
}
