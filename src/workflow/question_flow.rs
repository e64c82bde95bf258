//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 构建提示词 → 调用 LLM → 解析响应
//! 2. 按题目类型落标注（高亮选项 / 填写输入）
//!
//! 任何一步失败都以 AnalyzeError 返回给编排层，由编排层转成
//! 页面上的错误标注；本层不吞错误，也不中断别的题目。

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::dom::DomDocument;
use crate::error::AnalyzeResult;
use crate::infrastructure::JsExecutor;
use crate::models::question::{ParsedAnswer, Question, QuestionKind};
use crate::services::{AnnotateService, AnswerReconciler, LlmService, PromptBuilder};
use crate::workflow::question_ctx::QuestionCtx;

/// 题目处理流程
///
/// - 编排单个题目的提问与标注
/// - 不持有任何资源（page）
/// - 只依赖业务能力（services）
pub struct QuestionFlow {
    prompt_builder: PromptBuilder,
    llm_service: LlmService,
    reconciler: AnswerReconciler,
    annotate: AnnotateService,
    verbose_logging: bool,
}

impl QuestionFlow {
    /// 创建新的题目处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            prompt_builder: PromptBuilder::new(),
            llm_service: LlmService::new(config),
            reconciler: AnswerReconciler::new(),
            annotate: AnnotateService::new(),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(
        &self,
        executor: &JsExecutor,
        doc: &DomDocument,
        question: &Question,
        ctx: &QuestionCtx,
    ) -> AnalyzeResult<ParsedAnswer> {
        info!("{} {}", ctx, question);

        let prompt = self.prompt_builder.build(question);
        if self.verbose_logging {
            debug!("{} 完整提示词:\n{}", ctx, prompt);
        }

        let completion = self.llm_service.complete(&prompt).await?;
        if self.verbose_logging {
            debug!("{} 模型原始响应: {}", ctx, completion);
        }

        let parsed = self.reconciler.parse(&completion, question)?;

        match question.kind {
            QuestionKind::MultipleChoice => {
                // 解析器保证选择题成功时必有匹配选项
                if let Some(index) = parsed.matched_choice {
                    let choice = &question.choices[index];
                    info!(
                        "{} ✓ 匹配到第 {} 个选项: {}",
                        ctx,
                        index + 1,
                        choice.label_text
                    );
                    self.apply_annotation(
                        self.annotate.highlight_choice(executor, doc, choice).await,
                        ctx,
                    );
                    self.apply_annotation(
                        self.annotate
                            .add_explanation(executor, doc, question.anchor, &parsed.explanation)
                            .await,
                        ctx,
                    );
                }
            }
            QuestionKind::FillIn => {
                info!("{} ✓ 填空答案: {}", ctx, parsed.answer_text);
                if let Some(input) = question.input {
                    self.apply_annotation(
                        self.annotate
                            .fill_in_answer(
                                executor,
                                doc,
                                question.anchor,
                                input,
                                &parsed.answer_text,
                            )
                            .await,
                        ctx,
                    );
                }
                if !parsed.explanation.is_empty() {
                    self.apply_annotation(
                        self.annotate
                            .add_explanation(executor, doc, question.anchor, &parsed.explanation)
                            .await,
                        ctx,
                    );
                }
            }
        }

        Ok(parsed)
    }

    /// 标注是纯副作用出口，失败只记日志，不影响流程结果
    fn apply_annotation(&self, result: anyhow::Result<()>, ctx: &QuestionCtx) {
        if let Err(e) = result {
            warn!("{} ⚠️ 标注失败: {}", ctx, e);
        }
    }
}
