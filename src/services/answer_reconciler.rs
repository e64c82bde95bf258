//! 答案解析 - 业务能力层
//!
//! 把模型的自由文本响应还原成结构化答案，选择题再把答案文本
//! 落到某个具体选项上。解析的是 prompt_builder 约定的两行格式，
//! 但模型不总是守约，所以匹配带模糊回退。

use regex::Regex;

use crate::error::{AnalyzeError, AnalyzeResult};
use crate::models::question::{Choice, ParsedAnswer, Question, QuestionKind};

/// 答案解析器
///
/// 职责：
/// - 从响应中提取 Answer / Explanation 两段文本
/// - 选择题按"先精确后包含"匹配到选项
/// - 只处理单个响应，不关心流程
pub struct AnswerReconciler {
    answer_pattern: Regex,
    explanation_pattern: Regex,
}

impl AnswerReconciler {
    pub fn new() -> Self {
        Self {
            // 取 Answer: 之后到换行 / Explanation: / 结尾之间的文本
            answer_pattern: Regex::new(r"(?is)Answer:\s*(.+?)(?:\n|Explanation:|$)")
                .expect("答案提取正则非法"),
            explanation_pattern: Regex::new(r"(?is)Explanation:\s*(.+)")
                .expect("解释提取正则非法"),
        }
    }

    /// 解析一条完整的模型响应
    ///
    /// 空响应是独立的错误类别（EmptyResponse），和解析不出答案
    /// （ParseFailure）、匹配不到选项（UnmatchedAnswer）都要区分开，
    /// 调用方靠这个区别渲染不同的提示文案。
    pub fn parse(&self, completion: &str, question: &Question) -> AnalyzeResult<ParsedAnswer> {
        let raw = completion.trim();
        if raw.is_empty() {
            return Err(AnalyzeError::EmptyResponse);
        }

        let answer = self
            .answer_pattern
            .captures(raw)
            .map(|caps| caps[1].trim().to_string());
        let explanation = self
            .explanation_pattern
            .captures(raw)
            .map(|caps| caps[1].trim().to_string());

        match question.kind {
            QuestionKind::MultipleChoice => {
                // 选择题没有 Answer: 标记就无从匹配选项，不可恢复
                let answer_text = answer.ok_or_else(|| AnalyzeError::ParseFailure {
                    raw: raw.to_string(),
                })?;

                match match_choice(&answer_text, &question.choices) {
                    Some(index) => Ok(ParsedAnswer {
                        explanation: explanation.unwrap_or_else(|| {
                            format!("{} because it is the correct answer.", answer_text)
                        }),
                        answer_text,
                        matched_choice: Some(index),
                    }),
                    None => Err(AnalyzeError::UnmatchedAnswer {
                        answer: answer_text,
                    }),
                }
            }
            QuestionKind::FillIn => {
                // 填空题没有标记时退而取响应的第一行
                let answer_text = answer.unwrap_or_else(|| {
                    raw.lines().next().unwrap_or_default().trim().to_string()
                });
                Ok(ParsedAnswer {
                    answer_text,
                    explanation: explanation.unwrap_or_default(),
                    matched_choice: None,
                })
            }
        }
    }
}

impl Default for AnswerReconciler {
    fn default() -> Self {
        Self::new()
    }
}

/// 答案文本到选项的匹配，先精确后包含，声明顺序第一个命中生效
///
/// 包含匹配在一个选项文本是另一个的子串时可能选错（"Paris" 与
/// "Paris, Texas"），目前的仲裁就是声明顺序。
fn match_choice(answer_text: &str, choices: &[Choice]) -> Option<usize> {
    if let Some(index) = choices
        .iter()
        .position(|c| c.label_text.trim() == answer_text)
    {
        return Some(index);
    }

    let answer_lower = answer_text.to_lowercase();
    choices.iter().position(|c| {
        let choice_lower = c.label_text.trim().to_lowercase();
        !choice_lower.is_empty()
            && (choice_lower.contains(&answer_lower) || answer_lower.contains(&choice_lower))
    })
}
