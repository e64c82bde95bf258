//! 选项文本提取器
//!
//! 给定一个可选控件（radio），级联回退推断它的人类可读标签。
//! 没有 value 属性的 radio 在浏览器里读出的值是字面量 "on"，
//! 这个占位值在级联的每一个阶段都按"没有结果"处理。

use crate::dom::{DomDocument, NodeId};

/// 浏览器对无 value 属性控件返回的占位值
pub const PLACEHOLDER_VALUE: &str = "on";

/// 选项文本提取器
///
/// 职责：
/// - 只回答"这个控件的标签文本是什么"
/// - 不产出 Choice，不做选项有效性判断
pub struct ChoiceTextExtractor<'a> {
    doc: &'a DomDocument,
}

impl<'a> ChoiceTextExtractor<'a> {
    pub fn new(doc: &'a DomDocument) -> Self {
        Self { doc }
    }

    /// 提取控件的标签文本，级联回退，第一个可用结果生效
    ///
    /// 1. 包裹控件的 label 文本
    /// 2. for 属性指向控件 id 的 label 文本
    /// 3. 控件后面最近的文本兄弟节点，其次最近的元素兄弟节点
    /// 4. 父节点的直接文本子节点（排除题干自身），再退父节点全文
    /// 5. 控件的 value 属性
    ///
    /// 所有阶段都提不出可用文本时返回空串。
    pub fn extract_choice_text(&self, control: NodeId, question_text: &str) -> String {
        if let Some(text) = self.enclosing_label_text(control) {
            return text;
        }
        if let Some(text) = self.for_label_text(control) {
            return text;
        }
        if let Some(text) = self.following_sibling_text(control) {
            return text;
        }
        if let Some(text) = self.parent_text(control, question_text) {
            return text;
        }
        if let Some(value) = self.doc.attr(control, "value") {
            if let Some(text) = usable(value) {
                return text;
            }
        }
        String::new()
    }

    /// 阶段 1：包裹控件的 label
    fn enclosing_label_text(&self, control: NodeId) -> Option<String> {
        let label = self.doc.enclosing(control, "label")?;
        usable(&self.doc.text_content(label))
    }

    /// 阶段 2：for 属性指向控件 id 的 label（文档顺序第一个）
    fn for_label_text(&self, control: NodeId) -> Option<String> {
        let id = self.doc.attr(control, "id").filter(|v| !v.is_empty())?;
        let label = self
            .doc
            .elements()
            .into_iter()
            .find(|&el| self.doc.tag(el) == Some("label") && self.doc.attr(el, "for") == Some(id))?;
        usable(&self.doc.text_content(label))
    }

    /// 阶段 3：控件后面的文本兄弟节点，遇到元素节点即停；
    /// 没有可用文本时退到最近的元素兄弟节点
    fn following_sibling_text(&self, control: NodeId) -> Option<String> {
        let mut sibling = self.doc.next_sibling(control);
        while let Some(node) = sibling {
            if self.doc.is_element(node) {
                break;
            }
            if let Some(text) = self.doc.text(node).and_then(usable) {
                return Some(text);
            }
            sibling = self.doc.next_sibling(node);
        }

        let next = self.doc.next_element_sibling(control)?;
        usable(&self.doc.text_content(next))
    }

    /// 阶段 4：父节点的直接文本子节点，再退父节点全文
    ///
    /// 全文回退时排除与题干逐字相同的文本，避免把题干当成选项。
    fn parent_text(&self, control: NodeId, question_text: &str) -> Option<String> {
        let parent = self.doc.parent(control)?;

        if let Some(text) = usable(&self.doc.direct_text(parent)) {
            return Some(text);
        }

        let all = self.doc.text_content(parent);
        let all = all.trim();
        if all == question_text {
            return None;
        }
        usable(all)
    }
}

fn usable(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER_VALUE {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::SnapshotNode;
    use serde_json::{json, Value};

    fn doc_from(value: Value) -> DomDocument {
        let snapshot: SnapshotNode = serde_json::from_value(value).unwrap();
        snapshot.into_document()
    }

    fn first_radio(doc: &DomDocument) -> NodeId {
        doc.elements()
            .into_iter()
            .find(|&id| doc.attr(id, "type") == Some("radio"))
            .unwrap()
    }

    #[test]
    fn test_enclosing_label_text() {
        let doc = doc_from(json!({
            "tag": "label", "attrs": [], "children": [
                { "tag": "input", "attrs": [["type", "radio"], ["name", "q"], ["value", "on"]], "children": [] },
                { "text": " Paris " }
            ]
        }));
        let extractor = ChoiceTextExtractor::new(&doc);
        assert_eq!(extractor.extract_choice_text(first_radio(&doc), ""), "Paris");
    }

    #[test]
    fn test_label_for_attribute() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "input", "attrs": [["type", "radio"], ["name", "q"], ["id", "opt-a"], ["value", "on"]], "children": [] },
                { "tag": "label", "attrs": [["for", "opt-a"]], "children": [ { "text": "Berlin" } ] }
            ]
        }));
        let extractor = ChoiceTextExtractor::new(&doc);
        assert_eq!(extractor.extract_choice_text(first_radio(&doc), ""), "Berlin");
    }

    #[test]
    fn test_following_text_sibling() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "input", "attrs": [["type", "radio"], ["name", "q"], ["value", "on"]], "children": [] },
                { "text": "  " },
                { "text": " Madrid " },
                { "tag": "br", "attrs": [], "children": [] }
            ]
        }));
        let extractor = ChoiceTextExtractor::new(&doc);
        assert_eq!(extractor.extract_choice_text(first_radio(&doc), ""), "Madrid");
    }

    #[test]
    fn test_parent_full_text_excludes_question() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "span", "attrs": [], "children": [ { "text": "Which city is the capital?" } ] },
                { "tag": "input", "attrs": [["type", "radio"], ["name", "q"], ["value", "on"]], "children": [] }
            ]
        }));
        let extractor = ChoiceTextExtractor::new(&doc);
        // 父节点全文与题干逐字相同时不可用，最终退到 value，而 value
        // 是占位值，于是什么也提不出来
        assert_eq!(
            extractor.extract_choice_text(first_radio(&doc), "Which city is the capital?"),
            ""
        );
    }

    #[test]
    fn test_value_attribute_fallback() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "input", "attrs": [["type", "radio"], ["name", "q"], ["value", "42"]], "children": [] }
            ]
        }));
        let extractor = ChoiceTextExtractor::new(&doc);
        assert_eq!(extractor.extract_choice_text(first_radio(&doc), ""), "42");
    }

    #[test]
    fn test_placeholder_never_returned_when_alternative_exists() {
        let doc = doc_from(json!({
            "tag": "label", "attrs": [], "children": [
                { "text": "on" },
                { "tag": "input", "attrs": [["type", "radio"], ["name", "q"], ["value", "real answer"]], "children": [] }
            ]
        }));
        let extractor = ChoiceTextExtractor::new(&doc);
        // label 文本恰好是占位值时按"没有结果"处理，继续级联
        assert_eq!(
            extractor.extract_choice_text(first_radio(&doc), ""),
            "real answer"
        );
    }
}
