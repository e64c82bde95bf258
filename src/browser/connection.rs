use anyhow::Result;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 连接到浏览器并获取要扫描的页面
///
/// 指定了目标标题时返回标题包含该文本的页面，否则取第一个已
/// 打开的页面。浏览器里一个页面都没有时报错，不自己开新页面。
pub async fn connect_to_browser_and_page(
    port: u16,
    target_title: Option<&str>,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);
    debug!("目标标题: {:?}", target_title);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        e
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    // 如果指定了目标标题，尝试查找匹配的页面
    if let Some(title) = target_title {
        debug!("正在查找标题包含 '{}' 的页面", title);
        for p in pages.iter() {
            if let Ok(Some(page_title)) = p.get_title().await {
                debug!("检查页面标题: {}", page_title);
                if page_title.contains(title) {
                    info!("✓ 找到目标页面: {}", page_title);
                    return Ok((browser, p.clone()));
                }
            }
        }
        anyhow::bail!("没有找到标题包含 '{}' 的页面", title);
    }

    // 没有指定标题就取第一个已打开的页面
    match pages.first() {
        Some(page) => {
            if let Ok(Some(page_title)) = page.get_title().await {
                info!("✓ 使用当前页面: {}", page_title);
            }
            Ok((browser, page.clone()))
        }
        None => anyhow::bail!("浏览器里没有打开的页面"),
    }
}
