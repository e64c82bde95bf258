//! 结构游走器
//!
//! 给定一个答案输入控件，向外搜索最近的题干文本块。真实页面的
//! 测验标记很少用 label 语义关联题干，这里用一套按优先级排列的
//! 启发式级联换取召回率，同时用深度上限约束开销。

use crate::detect::patterns::TextPatterns;
use crate::dom::{DomDocument, NodeId};

/// 阶段 2：向前检查的输入控件兄弟节点上限
const MAX_PRECEDING_SIBLINGS: usize = 10;
/// 阶段 3：向上检查的祖先层数上限
const MAX_ANCESTOR_LEVELS: usize = 5;
/// 阶段 3：每层祖先向前检查的兄弟节点上限
const MAX_ANCESTOR_SIBLINGS: usize = 5;

/// 结构游走器
///
/// 职责：
/// - 只回答"这个输入控件附近的题干文本块是哪个节点"
/// - 不产出 Question，不做去重
pub struct StructureWalker<'a> {
    doc: &'a DomDocument,
    patterns: &'a TextPatterns,
}

impl<'a> StructureWalker<'a> {
    pub fn new(doc: &'a DomDocument, patterns: &'a TextPatterns) -> Self {
        Self { doc, patterns }
    }

    /// 搜索输入控件附近的题干文本块，按优先级取第一个命中
    ///
    /// 1. 包裹控件的 label，文本长度 > 10
    /// 2. 控件自身的前序兄弟元素（最近优先，最多 10 个）
    /// 3. 逐层祖先的前序兄弟与直接子元素（最里层优先，最多 5 层）
    pub fn find_question_text_near(&self, input: NodeId) -> Option<NodeId> {
        if let Some(label) = self.enclosing_label(input) {
            return Some(label);
        }
        if let Some(sibling) = self.preceding_sibling_block(input) {
            return Some(sibling);
        }
        self.ancestor_block(input)
    }

    /// 阶段 1：包裹控件的 label
    fn enclosing_label(&self, input: NodeId) -> Option<NodeId> {
        let label = self.doc.enclosing(input, "label")?;
        let text = self.doc.text_content(label);
        if text.trim().chars().count() > 10 {
            Some(label)
        } else {
            None
        }
    }

    /// 阶段 2：输入控件的前序兄弟元素，最近的优先
    fn preceding_sibling_block(&self, input: NodeId) -> Option<NodeId> {
        let mut sibling = self.doc.prev_element_sibling(input);
        let mut depth = 0;
        while let Some(node) = sibling {
            if depth >= MAX_PRECEDING_SIBLINGS {
                break;
            }
            let text = self.doc.text_content(node);
            let text = text.trim();
            let len = text.chars().count();
            if len > 10 && len < 1000 && self.patterns.is_sibling_candidate(text) {
                return Some(node);
            }
            sibling = self.doc.prev_element_sibling(node);
            depth += 1;
        }
        None
    }

    /// 阶段 3：逐层祖先扫描，最里层优先
    ///
    /// 每层先看祖先的前序兄弟（题干和答案分属不同容器的常见布局），
    /// 再看祖先的直接子元素，排除输入控件本身和它的直接容器。
    fn ancestor_block(&self, input: NodeId) -> Option<NodeId> {
        let input_parent = self.doc.parent(input);
        let mut ancestor = input_parent;
        let mut depth = 0;

        while let Some(node) = ancestor {
            if depth >= MAX_ANCESTOR_LEVELS {
                break;
            }

            let mut sibling = self.doc.prev_element_sibling(node);
            let mut sibling_depth = 0;
            while let Some(candidate) = sibling {
                if sibling_depth >= MAX_ANCESTOR_SIBLINGS {
                    break;
                }
                if self.accepts_block(candidate) {
                    return Some(candidate);
                }
                sibling = self.doc.prev_element_sibling(candidate);
                sibling_depth += 1;
            }

            for &child in self.doc.children(node) {
                if !self.doc.is_element(child) {
                    continue;
                }
                if child == input || Some(child) == input_parent {
                    continue;
                }
                if self.accepts_block(child) {
                    return Some(child);
                }
            }

            ancestor = self.doc.parent(node);
            depth += 1;
        }
        None
    }

    fn accepts_block(&self, node: NodeId) -> bool {
        let text = self.doc.text_content(node);
        let text = text.trim();
        let len = text.chars().count();
        len > 10 && len < 1000 && self.patterns.is_block_candidate(text)
    }
}
