//! 题目定位器
//!
//! 扫描整棵文档树，产出去重、有序的结构化 Question 序列。
//! 策略是从答案输入控件出发反向找题干，而不是先找"像题目的文本"，
//! 这样可以避免把页面上的无关文字误判成题目。

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::detect::choice_text::{ChoiceTextExtractor, PLACEHOLDER_VALUE};
use crate::detect::patterns::TextPatterns;
use crate::detect::walker::StructureWalker;
use crate::dom::{DomDocument, NodeId};
use crate::models::question::{question_fingerprint, Choice, Question, QuestionKind};

/// 选择题题干长度下限（含）
const CHOICE_TEXT_MIN: usize = 10;
/// 填空题题干长度下限（含）
const FILL_IN_TEXT_MIN: usize = 15;
/// 题干长度上限（含）
const TEXT_MAX: usize = 1000;

/// 填空输入的排除关键字，命中即认为不是测验字段
const EXCLUDED_INPUT_HINTS: [&str; 3] = ["search", "email", "name"];

/// 题目定位器
///
/// 职责：
/// - 找出 radio 组（选择题）和自由文本输入（填空题）
/// - 套用过滤 / 校验 / 去重规则
/// - 产出选择题在前、填空题在后，组内按文档顺序的 Question 序列
pub struct QuestionLocator<'a> {
    doc: &'a DomDocument,
    patterns: TextPatterns,
}

impl<'a> QuestionLocator<'a> {
    pub fn new(doc: &'a DomDocument) -> Self {
        Self {
            doc,
            patterns: TextPatterns::new(),
        }
    }

    /// 扫描整棵树，返回去重后的题目序列
    pub fn find_questions(&self) -> Vec<Question> {
        let walker = StructureWalker::new(self.doc, &self.patterns);
        let extractor = ChoiceTextExtractor::new(self.doc);

        // 两条路径共享同一个题干去重集合
        let mut seen_texts: HashSet<String> = HashSet::new();
        let mut questions = Vec::new();

        self.collect_multiple_choice(&walker, &extractor, &mut seen_texts, &mut questions);
        self.collect_fill_in(&walker, &mut seen_texts, &mut questions);

        debug!("定位完成，共 {} 道题目", questions.len());
        questions
    }

    /// 选择题路径：按 name 分组 radio，反向找题干
    fn collect_multiple_choice(
        &self,
        walker: &StructureWalker<'_>,
        extractor: &ChoiceTextExtractor<'_>,
        seen_texts: &mut HashSet<String>,
        questions: &mut Vec<Question>,
    ) {
        let groups = self.radio_groups();
        // 防御重复的组名（正常的分组不会产生，但页面什么都可能有）
        let mut processed_groups: HashSet<String> = HashSet::new();

        for (group_name, radios) in groups {
            // 少于 2 个选项不构成一道选择题
            if radios.len() < 2 {
                continue;
            }
            if !processed_groups.insert(group_name.clone()) {
                continue;
            }

            let first_radio = radios[0];
            let anchor = match walker.find_question_text_near(first_radio) {
                Some(node) => node,
                None => {
                    debug!("radio 组 {} 附近找不到题干，跳过", group_name);
                    continue;
                }
            };

            let text = self.doc.text_content(anchor).trim().to_string();
            if seen_texts.contains(&text) {
                debug!("题干重复，跳过: {}", text);
                continue;
            }
            let len = text.chars().count();
            if len < CHOICE_TEXT_MIN || len > TEXT_MAX {
                debug!("题干长度 {} 超出范围，跳过", len);
                continue;
            }
            seen_texts.insert(text.clone());

            let choices: Vec<Choice> = radios
                .iter()
                .map(|&radio| {
                    let label_text = extractor.extract_choice_text(radio, &text);
                    debug!(
                        "radio: value={:?}, text={:?}",
                        self.doc.attr(radio, "value"),
                        label_text
                    );
                    Choice {
                        label_text,
                        anchor: self
                            .doc
                            .enclosing(radio, "label")
                            .or_else(|| self.doc.parent(radio))
                            .unwrap_or(radio),
                        input: radio,
                    }
                })
                .collect();

            // 一个可用选项文本都提不出来的题目整体丢弃
            if choices
                .iter()
                .all(|c| c.label_text.is_empty() || c.label_text == PLACEHOLDER_VALUE)
            {
                debug!("radio 组 {} 的选项全部不可用，跳过", group_name);
                continue;
            }

            questions.push(Question {
                fingerprint: question_fingerprint(&text, &self.doc.opening_tag_markup(anchor)),
                text,
                kind: QuestionKind::MultipleChoice,
                choices,
                anchor,
                input: None,
            });
        }
    }

    /// 填空题路径：扫描自由文本输入
    fn collect_fill_in(
        &self,
        walker: &StructureWalker<'_>,
        seen_texts: &mut HashSet<String>,
        questions: &mut Vec<Question>,
    ) {
        for input in self.text_inputs() {
            if self.is_excluded_input(input) {
                continue;
            }

            let anchor = match walker.find_question_text_near(input) {
                Some(node) => node,
                None => continue,
            };

            let text = self.doc.text_content(anchor).trim().to_string();
            if seen_texts.contains(&text) {
                continue;
            }
            if !self.patterns.looks_like_question(&text) {
                continue;
            }
            let len = text.chars().count();
            if len < FILL_IN_TEXT_MIN || len > TEXT_MAX {
                continue;
            }
            seen_texts.insert(text.clone());

            questions.push(Question {
                fingerprint: question_fingerprint(&text, &self.doc.opening_tag_markup(anchor)),
                text,
                kind: QuestionKind::FillIn,
                choices: Vec::new(),
                anchor,
                input: Some(input),
            });
        }
    }

    /// 按 name 属性分组的 radio 控件，保持首次出现的文档顺序
    fn radio_groups(&self) -> Vec<(String, Vec<NodeId>)> {
        let mut order: Vec<(String, Vec<NodeId>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for el in self.doc.elements() {
            if self.doc.tag(el) != Some("input") {
                continue;
            }
            let is_radio = self
                .doc
                .attr(el, "type")
                .map(|t| t.eq_ignore_ascii_case("radio"))
                .unwrap_or(false);
            if !is_radio {
                continue;
            }
            let name = match self.doc.attr(el, "name") {
                Some(n) if !n.is_empty() => n.to_string(),
                _ => continue,
            };
            match index.get(&name).copied() {
                Some(i) => order[i].1.push(el),
                None => {
                    index.insert(name.clone(), order.len());
                    order.push((name, vec![el]));
                }
            }
        }
        order
    }

    /// 自由文本输入：input[type=text] 与 textarea，按文档顺序
    fn text_inputs(&self) -> Vec<NodeId> {
        self.doc
            .elements()
            .into_iter()
            .filter(|&el| match self.doc.tag(el) {
                Some("textarea") => true,
                Some("input") => self
                    .doc
                    .attr(el, "type")
                    .map(|t| t.eq_ignore_ascii_case("text"))
                    .unwrap_or(false),
                _ => false,
            })
            .collect()
    }

    /// 排除搜索框 / 邮箱 / 姓名等一眼就不是测验的字段
    fn is_excluded_input(&self, input: NodeId) -> bool {
        for attr_name in ["placeholder", "name"] {
            if let Some(value) = self.doc.attr(input, attr_name) {
                let value = value.to_lowercase();
                if EXCLUDED_INPUT_HINTS.iter().any(|hint| value.contains(hint)) {
                    return true;
                }
            }
        }
        false
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

    fn radio(name: &str, value: &str, label: &str) -> Value {
        json!({
            "tag": "label", "attrs": [], "children": [
                { "tag": "input", "attrs": [["type", "radio"], ["name", name], ["value", value]], "children": [] },
                { "text": label }
            ]
        })
    }

    #[test]
    fn test_radio_group_becomes_multiple_choice() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "Which city is the capital of France?" } ] },
                radio("q1", "a", " Paris"),
                radio("q1", "b", " Berlin"),
                radio("q1", "c", " Madrid")
            ]
        }));

        let questions = QuestionLocator::new(&doc).find_questions();
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.kind, QuestionKind::MultipleChoice);
        assert_eq!(q.text, "Which city is the capital of France?");
        assert_eq!(q.choices.len(), 3);
        assert_eq!(q.choices[0].label_text, "Paris");
        assert_eq!(q.choices[2].label_text, "Madrid");
    }

    #[test]
    fn test_single_radio_is_not_a_question() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "Is one option enough for this?" } ] },
                radio("solo", "a", " Only choice")
            ]
        }));
        assert!(QuestionLocator::new(&doc).find_questions().is_empty());
    }

    #[test]
    fn test_duplicate_question_text_keeps_first_group() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "div", "attrs": [], "children": [
                    { "tag": "p", "attrs": [], "children": [ { "text": "Which number is even, would you say?" } ] },
                    radio("qa", "2", " 2"),
                    radio("qa", "3", " 3")
                ] },
                { "tag": "div", "attrs": [], "children": [
                    { "tag": "p", "attrs": [], "children": [ { "text": "Which number is even, would you say?" } ] },
                    radio("qb", "4", " 4"),
                    radio("qb", "5", " 5")
                ] }
            ]
        }));

        let questions = QuestionLocator::new(&doc).find_questions();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].choices[0].label_text, "2");
    }

    #[test]
    fn test_all_placeholder_choices_reject_question() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "A question with broken choices?" } ] },
                { "tag": "input", "attrs": [["type", "radio"], ["name", "qx"], ["value", "on"]], "children": [] },
                { "tag": "input", "attrs": [["type", "radio"], ["name", "qx"], ["value", "on"]], "children": [] }
            ]
        }));
        assert!(QuestionLocator::new(&doc).find_questions().is_empty());
    }

    #[test]
    fn test_fill_in_detection_and_exclusions() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "3. The capital of Italy is ___" } ] },
                { "tag": "input", "attrs": [["type", "text"], ["name", "answer3"]], "children": [] },
                { "tag": "input", "attrs": [["type", "text"], ["placeholder", "Search the site"]], "children": [] }
            ]
        }));

        let questions = QuestionLocator::new(&doc).find_questions();
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.kind, QuestionKind::FillIn);
        assert!(q.choices.is_empty());
        assert!(q.input.is_some());
    }

    #[test]
    fn test_fill_in_requires_question_likeness() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "Plain prose with no question markers here" } ] },
                { "tag": "input", "attrs": [["type", "text"]], "children": [] }
            ]
        }));
        assert!(QuestionLocator::new(&doc).find_questions().is_empty());
    }

    #[test]
    fn test_multiple_choice_ordered_before_fill_in() {
        let doc = doc_from(json!({
            "tag": "div", "attrs": [], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "1. Fill in the missing word: sky is ___" } ] },
                { "tag": "input", "attrs": [["type", "text"]], "children": [] },
                { "tag": "div", "attrs": [], "children": [
                    { "tag": "p", "attrs": [], "children": [ { "text": "2. Which color is the sky usually?" } ] },
                    radio("q2", "blue", " Blue"),
                    radio("q2", "green", " Green")
                ] }
            ]
        }));

        let questions = QuestionLocator::new(&doc).find_questions();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(questions[1].kind, QuestionKind::FillIn);
    }
}
