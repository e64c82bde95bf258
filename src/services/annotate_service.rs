//! 页面标注 - 业务能力层
//!
//! 把分析结果画回真实页面：高亮选项、插入解释框 / 错误框、填写
//! 填空输入、维护进度指示器。全部通过 JsExecutor 执行脚本实现，
//! 脚本按 data-sqa-node 标记定位快照捕获时的元素。
//!
//! 这些都是纯副作用出口，核心流程不依赖它们的返回值；固定树
//! 测试环境里节点没有页面标记，对应的标注调用直接跳过。

use anyhow::Result;
use tracing::debug;

use crate::dom::{DomDocument, NodeId};
use crate::infrastructure::JsExecutor;
use crate::models::question::Choice;

/// 页面标注服务
pub struct AnnotateService;

impl AnnotateService {
    pub fn new() -> Self {
        Self
    }

    /// 清除上一场扫描留下的所有标注和高亮
    pub async fn clear_previous_results(&self, executor: &JsExecutor) -> Result<()> {
        let js = r#"
        (() => {
            document.querySelectorAll('.ai-answer-overlay, .ai-explanation, .ai-error-box').forEach(el => el.remove());
            document.querySelectorAll('[data-ai-checkmark="true"]').forEach(el => el.remove());
            document.querySelectorAll('[data-ai-highlighted="true"]').forEach(el => {
                el.style.border = '';
                el.style.borderRadius = '';
                el.style.padding = '';
                el.style.backgroundColor = '';
                el.style.animation = '';
                el.removeAttribute('data-ai-highlighted');
            });
            return true;
        })()
        "#;
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 把一个选项标成高亮答案（箭头 + 底色，不代点 radio）
    pub async fn highlight_choice(
        &self,
        executor: &JsExecutor,
        doc: &DomDocument,
        choice: &Choice,
    ) -> Result<()> {
        let selector = match node_selector(doc, choice.anchor) {
            Some(s) => s,
            None => return Ok(()),
        };
        let js = format!(
            r#"
            (() => {{
                const target = document.querySelector({selector});
                if (!target) return false;
                target.setAttribute('data-ai-highlighted', 'true');
                const arrow = document.createElement('div');
                arrow.className = 'ai-answer-arrow';
                arrow.textContent = '➜';
                arrow.setAttribute('data-ai-checkmark', 'true');
                arrow.style.cssText = 'position: absolute; left: -40px; top: 50%; transform: translateY(-50%); color: #4CAF50; font-size: 2em; font-weight: bold; pointer-events: none; z-index: 1000;';
                target.style.position = 'relative';
                target.appendChild(arrow);
                const glow = document.createElement('div');
                glow.className = 'ai-answer-glow';
                glow.setAttribute('data-ai-checkmark', 'true');
                glow.style.cssText = 'position: absolute; top: 0; left: 0; right: 0; bottom: 0; background: rgba(76, 175, 80, 0.1); border-radius: 8px; pointer-events: none; z-index: -1;';
                target.appendChild(glow);
                return true;
            }})()
            "#,
            selector = js_string(&selector)?,
        );
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 在题干后面插入解释框，已存在时不重复插入
    pub async fn add_explanation(
        &self,
        executor: &JsExecutor,
        doc: &DomDocument,
        anchor: NodeId,
        explanation: &str,
    ) -> Result<()> {
        let selector = match node_selector(doc, anchor) {
            Some(s) => s,
            None => return Ok(()),
        };
        let js = format!(
            r#"
            (() => {{
                const anchor = document.querySelector({selector});
                if (!anchor || !anchor.parentNode) return false;
                let sibling = anchor.nextSibling;
                while (sibling) {{
                    if (sibling.classList && sibling.classList.contains('ai-explanation')) return false;
                    sibling = sibling.nextSibling;
                }}
                const box = document.createElement('div');
                box.className = 'ai-explanation';
                box.innerHTML = '<strong style="color: #2196F3;">💡 Explanation:</strong><br>';
                box.appendChild(document.createTextNode({text}));
                box.style.cssText = 'position: relative; background: #f0f7ff; border-left: 4px solid #2196F3; padding: 12px; margin: 10px 0; border-radius: 4px; font-size: 0.95em; line-height: 1.5;';
                anchor.parentNode.insertBefore(box, anchor.nextSibling);
                return true;
            }})()
            "#,
            selector = js_string(&selector)?,
            text = js_string(explanation)?,
        );
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 在题干后面插入错误提示框
    pub async fn add_error(
        &self,
        executor: &JsExecutor,
        doc: &DomDocument,
        anchor: NodeId,
        message: &str,
    ) -> Result<()> {
        let selector = match node_selector(doc, anchor) {
            Some(s) => s,
            None => return Ok(()),
        };
        let js = format!(
            r#"
            (() => {{
                const anchor = document.querySelector({selector});
                if (!anchor || !anchor.parentNode) return false;
                const box = document.createElement('div');
                box.className = 'ai-error-box';
                box.textContent = '⚠️ ' + {message};
                box.style.cssText = 'background: #ffebee; color: #c62828; padding: 8px; margin: 5px 0; border-radius: 4px;';
                anchor.parentNode.insertBefore(box, anchor.nextSibling);
                return true;
            }})()
            "#,
            selector = js_string(&selector)?,
            message = js_string(message)?,
        );
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 填空题：写入答案、标绿输入框，并在题干后插入答案浮层
    pub async fn fill_in_answer(
        &self,
        executor: &JsExecutor,
        doc: &DomDocument,
        anchor: NodeId,
        input: NodeId,
        answer: &str,
    ) -> Result<()> {
        let anchor_selector = node_selector(doc, anchor);
        let input_selector = node_selector(doc, input);
        if anchor_selector.is_none() && input_selector.is_none() {
            return Ok(());
        }
        let js = format!(
            r#"
            (() => {{
                const anchor = document.querySelector({anchor});
                const input = document.querySelector({input});
                if (anchor && anchor.parentNode) {{
                    const overlay = document.createElement('div');
                    overlay.className = 'ai-answer-overlay';
                    overlay.innerHTML = '<strong>Answer:</strong> ';
                    overlay.appendChild(document.createTextNode({answer}));
                    overlay.style.cssText = 'position: relative; background: rgba(76, 175, 80, 0.2); border-left: 4px solid #4CAF50; padding: 10px; margin: 10px 0; border-radius: 4px; font-weight: 500;';
                    anchor.parentNode.insertBefore(overlay, anchor.nextSibling);
                }}
                if (input) {{
                    input.value = {answer};
                    input.style.border = '2px solid #4CAF50';
                }}
                return true;
            }})()
            "#,
            anchor = js_string(anchor_selector.as_deref().unwrap_or(""))?,
            input = js_string(input_selector.as_deref().unwrap_or(""))?,
            answer = js_string(answer)?,
        );
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 显示进度指示器
    pub async fn show_loading(&self, executor: &JsExecutor, message: &str) -> Result<()> {
        let js = format!(
            r#"
            (() => {{
                const existing = document.getElementById('ai-loading-indicator');
                if (existing) existing.remove();
                const loading = document.createElement('div');
                loading.id = 'ai-loading-indicator';
                const span = document.createElement('span');
                span.textContent = {message};
                loading.appendChild(span);
                loading.style.cssText = 'position: fixed; top: 20px; right: 20px; background: white; border: 2px solid #4CAF50; border-radius: 8px; padding: 15px 20px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); z-index: 999999; font-family: Arial, sans-serif;';
                document.body.appendChild(loading);
                return true;
            }})()
            "#,
            message = js_string(message)?,
        );
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 更新进度指示器文案
    pub async fn update_loading(&self, executor: &JsExecutor, message: &str) -> Result<()> {
        let js = format!(
            r#"
            (() => {{
                const loading = document.getElementById('ai-loading-indicator');
                if (!loading) return false;
                const span = loading.querySelector('span');
                if (span) span.textContent = {message};
                return true;
            }})()
            "#,
            message = js_string(message)?,
        );
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 隐藏进度指示器
    pub async fn hide_loading(&self, executor: &JsExecutor) -> Result<()> {
        let js = r#"
        (() => {
            const loading = document.getElementById('ai-loading-indicator');
            if (loading) loading.remove();
            return true;
        })()
        "#;
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 显示完成提示，3 秒后自动淡出
    pub async fn show_completion(&self, executor: &JsExecutor, message: &str) -> Result<()> {
        let js = format!(
            r#"
            (() => {{
                const completion = document.createElement('div');
                completion.textContent = '✓ ' + {message};
                completion.style.cssText = 'position: fixed; top: 20px; right: 20px; background: #4CAF50; color: white; border-radius: 8px; padding: 15px 20px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); z-index: 999999; font-family: Arial, sans-serif; font-weight: bold;';
                document.body.appendChild(completion);
                setTimeout(() => {{
                    completion.style.transition = 'opacity 0.5s';
                    completion.style.opacity = '0';
                    setTimeout(() => completion.remove(), 500);
                }}, 3000);
                return true;
            }})()
            "#,
            message = js_string(message)?,
        );
        let _ = executor.eval(js).await?;
        Ok(())
    }

    /// 页面弹窗，扫描级条件（缺 Key / 没有题目）用
    pub async fn show_alert(&self, executor: &JsExecutor, message: &str) -> Result<()> {
        let js = format!("alert({})", js_string(message)?);
        let _ = executor.eval(js).await?;
        Ok(())
    }
}

impl Default for AnnotateService {
    fn default() -> Self {
        Self::new()
    }
}

/// 节点的页面端选择器；固定树测试里没有页面标记，返回 None
fn node_selector(doc: &DomDocument, node: NodeId) -> Option<String> {
    match doc.page_ref(node) {
        Some(page_ref) => Some(format!("[data-sqa-node=\"{}\"]", page_ref)),
        None => {
            debug!("节点 {} 没有页面标记，跳过标注", node);
            None
        }
    }
}

/// 把任意文本编码成 JS 字符串字面量
fn js_string(text: &str) -> Result<String> {
    Ok(serde_json::to_string(text)?)
}
