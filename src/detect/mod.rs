//! 检测层（Detection）
//!
//! ## 职责
//!
//! 本层是系统的核心：在只读文档树上定位题目并提取答案界面。
//!
//! ### `patterns` - 文本判定谓词
//! - 编号前缀 / 问句特征等正则谓词，编译一次复用
//!
//! ### `walker` - 结构游走器
//! - 给定一个答案输入控件，向外搜索最近的题干文本块
//!
//! ### `choice_text` - 选项文本提取器
//! - 给定一个可选控件，级联回退策略推断它的人类可读标签
//!
//! ### `locator` - 题目定位器
//! - 扫描整棵树，产出去重、有序的结构化 Question 序列
//!
//! ## 设计原则
//!
//! 1. **纯函数**：本层不做任何 IO，只读快照进、Question 出
//! 2. **宁可多召回**：真实页面很少语义化标注题目，谓词偏宽松
//! 3. **代价有界**：所有游走都有深度上限，避免整页遍历

pub mod choice_text;
pub mod locator;
pub mod patterns;
pub mod walker;

pub use choice_text::{ChoiceTextExtractor, PLACEHOLDER_VALUE};
pub use locator::QuestionLocator;
pub use patterns::TextPatterns;
pub use walker::StructureWalker;
