//! 题目数据模型
//!
//! Question / Choice 只持有文档树的节点句柄，不拥有节点；
//! 文档在整场扫描期间不可变，句柄因此保持有效。

use crate::dom::NodeId;

/// 指纹里保留的题干锚点标记前缀长度
///
/// 前缀太短会误合并不同题目，太长会让同一题目因无关属性变化
/// 被重复处理。这是个可调参数，不保证唯一。
const FINGERPRINT_MARKUP_PREFIX: usize = 50;

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// 选择题（radio 组）
    MultipleChoice,
    /// 填空题（自由文本输入）
    FillIn,
}

/// 一个可选选项
#[derive(Debug, Clone)]
pub struct Choice {
    /// 人类可读的标签文本，永远不是占位值 "on"
    pub label_text: String,
    /// 可点击的 label / 容器节点，标注时高亮它
    pub anchor: NodeId,
    /// radio 控件本身
    pub input: NodeId,
}

/// 一道检测出的题目
#[derive(Debug, Clone)]
pub struct Question {
    /// 题干 + 锚点标记前缀派生的去重键
    pub fingerprint: String,
    /// 题干文本（已 trim）
    pub text: String,
    pub kind: QuestionKind,
    /// 选择题的选项，填空题为空
    pub choices: Vec<Choice>,
    /// 题干文本块节点，标注插在它后面
    pub anchor: NodeId,
    /// 填空题的输入控件
    pub input: Option<NodeId>,
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            QuestionKind::MultipleChoice => "选择题",
            QuestionKind::FillIn => "填空题",
        };
        let preview = if self.text.chars().count() > 80 {
            self.text.chars().take(80).collect::<String>() + "..."
        } else {
            self.text.clone()
        };
        write!(f, "[{}] {}", kind, preview)
    }
}

/// 模型响应解析出的结构化答案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswer {
    /// Answer: 后面的原始答案文本
    pub answer_text: String,
    /// 解释文本，可能为空
    pub explanation: String,
    /// 选择题匹配到的选项下标
    pub matched_choice: Option<usize>,
}

/// 计算题目指纹：题干 + 锚点开标签标记的有界前缀
pub fn question_fingerprint(text: &str, anchor_markup: &str) -> String {
    let prefix: String = anchor_markup
        .chars()
        .take(FINGERPRINT_MARKUP_PREFIX)
        .collect();
    format!("{}{}", text, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_bounds_markup_prefix() {
        let long_markup = format!("<div {}>", "a".repeat(200));
        let fp = question_fingerprint("What is 2 + 2?", &long_markup);
        assert!(fp.starts_with("What is 2 + 2?"));
        assert_eq!(fp.chars().count(), "What is 2 + 2?".chars().count() + 50);
    }

    #[test]
    fn test_fingerprint_distinguishes_same_text_different_anchor() {
        let a = question_fingerprint("Same text", "<p class=\"left\">");
        let b = question_fingerprint("Same text", "<p class=\"right\">");
        assert_ne!(a, b);
    }
}
