//! 检测与解析链路的端到端测试
//!
//! 全部跑在内存里的固定文档树上：定位 → 提示词 → 用预设的模型
//! 响应走解析。不碰浏览器，不发网络请求。

use serde_json::{json, Value};

use scan_question_answer::detect::QuestionLocator;
use scan_question_answer::dom::{DomDocument, SnapshotNode};
use scan_question_answer::error::AnalyzeError;
use scan_question_answer::models::{QuestionKind, ScanSession};
use scan_question_answer::services::{AnswerReconciler, PromptBuilder};

fn doc_from(value: Value) -> DomDocument {
    let snapshot: SnapshotNode = serde_json::from_value(value).unwrap();
    snapshot.into_document()
}

/// 一个典型的测验页面：题干在前，radio 组在后，选项文本在 label 里
fn math_quiz_doc() -> DomDocument {
    doc_from(json!({
        "tag": "body", "attrs": [], "children": [
            { "tag": "div", "attrs": [["class", "quiz"]], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "What is 2 + 2?" } ] },
                { "tag": "label", "attrs": [], "children": [
                    { "tag": "input", "attrs": [["type", "radio"], ["name", "q1"], ["value", "4"]], "children": [] },
                    { "text": " 4" }
                ] },
                { "tag": "label", "attrs": [], "children": [
                    { "tag": "input", "attrs": [["type", "radio"], ["name", "q1"], ["value", "5"]], "children": [] },
                    { "text": " 5" }
                ] },
                { "tag": "label", "attrs": [], "children": [
                    { "tag": "input", "attrs": [["type", "radio"], ["name", "q1"], ["value", "6"]], "children": [] },
                    { "text": " 6" }
                ] }
            ] }
        ]
    }))
}

#[test]
fn test_math_quiz_end_to_end_with_canned_completion() {
    let doc = math_quiz_doc();
    let questions = QuestionLocator::new(&doc).find_questions();

    // 一个 radio 组 → 恰好一道选择题，选项数等于组大小
    assert_eq!(questions.len(), 1);
    let question = &questions[0];
    assert_eq!(question.kind, QuestionKind::MultipleChoice);
    assert_eq!(question.text, "What is 2 + 2?");
    assert_eq!(question.choices.len(), 3);
    let labels: Vec<&str> = question
        .choices
        .iter()
        .map(|c| c.label_text.as_str())
        .collect();
    assert_eq!(labels, vec!["4", "5", "6"]);

    // 提示词包含题干和每个选项独立的一行
    let prompt = PromptBuilder::new().build(question);
    assert!(prompt.starts_with("What is 2 + 2?"));
    assert!(prompt.contains("Group of answer choices:\n4\n5\n6"));

    // 预设响应走完解析：匹配到 "4"，解释原样保留
    let parsed = AnswerReconciler::new()
        .parse("Answer: 4\nExplanation: 4 because 2+2=4", question)
        .unwrap();
    assert_eq!(parsed.matched_choice, Some(0));
    assert_eq!(parsed.answer_text, "4");
    assert_eq!(parsed.explanation, "4 because 2+2=4");
}

#[test]
fn test_document_without_inputs_yields_no_questions() {
    // 没有任何输入控件的页面：定位结果为空，编排层据此报
    // NoQuestionsFound，不会发起任何模型调用
    let doc = doc_from(json!({
        "tag": "body", "attrs": [], "children": [
            { "tag": "h1", "attrs": [], "children": [ { "text": "Just an article" } ] },
            { "tag": "p", "attrs": [], "children": [ { "text": "Plain prose, no quiz here at all." } ] }
        ]
    }));
    assert!(QuestionLocator::new(&doc).find_questions().is_empty());
}

#[test]
fn test_mixed_document_orders_and_dedupes() {
    let doc = doc_from(json!({
        "tag": "body", "attrs": [], "children": [
            { "tag": "p", "attrs": [], "children": [ { "text": "1. The boiling point of water is ___ degrees." } ] },
            { "tag": "input", "attrs": [["type", "text"], ["name", "blank1"]], "children": [] },
            { "tag": "div", "attrs": [], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "Which gas do plants absorb from the air?" } ] },
                { "tag": "label", "attrs": [], "children": [
                    { "tag": "input", "attrs": [["type", "radio"], ["name", "g1"], ["value", "co2"]], "children": [] },
                    { "text": " CO2" }
                ] },
                { "tag": "label", "attrs": [], "children": [
                    { "tag": "input", "attrs": [["type", "radio"], ["name", "g1"], ["value", "o2"]], "children": [] },
                    { "text": " Oxygen" }
                ] }
            ] },
            { "tag": "div", "attrs": [], "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "Which gas do plants absorb from the air?" } ] },
                { "tag": "label", "attrs": [], "children": [
                    { "tag": "input", "attrs": [["type", "radio"], ["name", "g2"], ["value", "co2"]], "children": [] },
                    { "text": " CO2" }
                ] },
                { "tag": "label", "attrs": [], "children": [
                    { "tag": "input", "attrs": [["type", "radio"], ["name", "g2"], ["value", "n2"]], "children": [] },
                    { "text": " Nitrogen" }
                ] }
            ] },
            { "tag": "input", "attrs": [["type", "text"], ["placeholder", "Search articles"]], "children": [] }
        ]
    }));

    let questions = QuestionLocator::new(&doc).find_questions();

    // 题干相同的第二个 radio 组被去重，搜索框被排除
    assert_eq!(questions.len(), 2);
    // 选择题排在填空题前面
    assert_eq!(questions[0].kind, QuestionKind::MultipleChoice);
    assert_eq!(
        questions[0].text,
        "Which gas do plants absorb from the air?"
    );
    assert_eq!(questions[1].kind, QuestionKind::FillIn);
    assert!(questions[1].text.contains("boiling point"));
}

#[test]
fn test_reconciler_error_kinds_are_distinguishable() {
    let doc = math_quiz_doc();
    let questions = QuestionLocator::new(&doc).find_questions();
    let question = &questions[0];
    let reconciler = AnswerReconciler::new();

    // 空响应、解析失败、匹配失败是三种不同的错误
    assert_eq!(
        reconciler.parse("", question).unwrap_err(),
        AnalyzeError::EmptyResponse
    );
    assert!(matches!(
        reconciler.parse("The answer is four.", question).unwrap_err(),
        AnalyzeError::ParseFailure { .. }
    ));
    assert!(matches!(
        reconciler
            .parse("Answer: seven\nExplanation: nope", question)
            .unwrap_err(),
        AnalyzeError::UnmatchedAnswer { .. }
    ));
}

#[test]
fn test_containment_fallback_against_located_question() {
    let doc = doc_from(json!({
        "tag": "body", "attrs": [], "children": [
            { "tag": "p", "attrs": [], "children": [ { "text": "Which city is the capital of France?" } ] },
            { "tag": "label", "attrs": [], "children": [
                { "tag": "input", "attrs": [["type", "radio"], ["name", "c1"], ["value", "a"]], "children": [] },
                { "text": " Paris" }
            ] },
            { "tag": "label", "attrs": [], "children": [
                { "tag": "input", "attrs": [["type", "radio"], ["name", "c1"], ["value", "b"]], "children": [] },
                { "text": " Lyon" }
            ] }
        ]
    }));

    let questions = QuestionLocator::new(&doc).find_questions();
    let parsed = AnswerReconciler::new()
        .parse("Answer: Paris, France\nExplanation: it is the capital", &questions[0])
        .unwrap();
    assert_eq!(parsed.matched_choice, Some(0));
}

#[test]
fn test_session_fingerprint_skips_reprocessing() {
    let doc = math_quiz_doc();
    let questions = QuestionLocator::new(&doc).find_questions();

    let mut session = ScanSession::new();
    assert!(session.mark_processed(&questions[0].fingerprint));
    // 同一场扫描里同一道题不会被处理第二次
    assert!(!session.mark_processed(&questions[0].fingerprint));
}
