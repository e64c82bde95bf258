//! 提示词构建 - 业务能力层
//!
//! 只负责"Question → 提示词"的转换，不关心流程。
//! 两行 `Answer:` / `Explanation:` 的响应格式是和答案解析器之间的
//! 严格契约，动这里必须同步动 answer_reconciler。

use crate::models::question::{Question, QuestionKind};

/// 提示词构建器
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 按题目类型构建完整的提示词
    pub fn build(&self, question: &Question) -> String {
        match question.kind {
            QuestionKind::MultipleChoice => self.build_multiple_choice(question),
            QuestionKind::FillIn => self.build_fill_in(question),
        }
    }

    /// 选择题：题干 + 选项清单（保持原始顺序）+ 固定的响应格式指令
    fn build_multiple_choice(&self, question: &Question) -> String {
        let choices = question
            .choices
            .iter()
            .map(|c| c.label_text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nGroup of answer choices:\n{}\n\nRespond with only:\nAnswer: [the exact text of the correct answer choice]\nExplanation: [correct answer] because [brief reason]",
            question.text, choices
        )
    }

    /// 填空题：题干 + 固定的响应格式指令
    fn build_fill_in(&self, question: &Question) -> String {
        format!(
            "{}\n\nAnswer: [your answer]\nExplanation: [brief reason]",
            question.text
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
