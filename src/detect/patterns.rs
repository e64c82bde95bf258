//! 文本判定谓词
//!
//! 题干识别依赖的全部正则都集中在这里，编译一次、整场扫描复用。
//! 各谓词故意保持宽松：真实页面的题干几乎不会有语义化标记。

use regex::Regex;

/// 编译好的文本判定谓词集合
pub struct TextPatterns {
    /// 行首编号：`12.` / `12)` / `12:`
    enumerated: Regex,
    /// 行首 `Question 12`（区分大小写）
    question_header: Regex,
    /// 行首 `Question 12`（忽略大小写）
    question_header_ci: Regex,
    /// 行首 ASCII 大写字母
    uppercase_start: Regex,
}

impl TextPatterns {
    pub fn new() -> Self {
        Self {
            enumerated: Regex::new(r"^\d+[).:]").expect("编号前缀正则非法"),
            question_header: Regex::new(r"^Question \d+").expect("题号前缀正则非法"),
            question_header_ci: Regex::new(r"(?i)^Question \d+").expect("题号前缀正则非法"),
            uppercase_start: Regex::new(r"^[A-Z]").expect("大写开头正则非法"),
        }
    }

    /// 文本以编号前缀开头（`12.` / `12)` / `12:`）
    pub fn is_enumerated(&self, text: &str) -> bool {
        self.enumerated.is_match(text)
    }

    /// 填空题的"像一道题"判定
    ///
    /// 含问号、下划线占位、编号前缀或 Question N 题头（忽略大小写）
    /// 任意其一即通过。
    pub fn looks_like_question(&self, text: &str) -> bool {
        text.contains('?')
            || text.contains("___")
            || self.is_enumerated(text)
            || self.question_header_ci.is_match(text)
    }

    /// 游走器兄弟节点阶段的候选判定
    ///
    /// 这一阶段离输入控件最近，判定最宽：大写开头的普通陈述句也收。
    pub fn is_sibling_candidate(&self, text: &str) -> bool {
        text.contains('?')
            || self.is_enumerated(text)
            || self.uppercase_start.is_match(text)
            || text.contains("Question")
    }

    /// 游走器祖先扫描阶段的文本块判定
    ///
    /// 离控件越远误报代价越高，这一阶段收紧：题头匹配区分大小写，
    /// 不再接受单纯大写开头。
    pub fn is_block_candidate(&self, text: &str) -> bool {
        text.contains('?') || self.is_enumerated(text) || self.question_header.is_match(text)
    }
}

impl Default for TextPatterns {
    fn default() -> Self {
        Self::new()
    }
}
