//! # Scan Question Answer
//!
//! 扫描页面上的测验题目、询问 LLM 并把答案标注回页面的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 与快照捕获能力
//! - `browser/` - 通过调试端口附着到用户的浏览器
//!
//! ### ② 文档结构层（Dom）
//! - `dom/` - 扫描期间不可变的只读文档树
//! - 快照一次捕获，检测引擎全程离线工作
//!
//! ### ③ 检测层（Detect）
//! - `detect/` - 系统核心：题目定位与答案界面提取
//! - `StructureWalker` - 从输入控件反向找题干
//! - `ChoiceTextExtractor` - 级联推断选项标签
//! - `QuestionLocator` - 产出去重、有序的 Question 序列
//!
//! ### ④ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Question
//! - `PromptBuilder` / `LlmService` / `AnswerReconciler` - 提问与解析
//! - `AnnotateService` - 把结果画回页面
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ⑤ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `QuestionCtx` - 上下文封装（第几题 / 共几题）
//! - `QuestionFlow` - 流程编排（prompt → LLM → 解析 → 标注）
//!
//! ### ⑥ 编排层（Orchestration）
//! - `orchestrator/scan_processor` - 整场扫描的调度、节流和统计

pub mod browser;
pub mod config;
pub mod detect;
pub mod dom;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::Config;
pub use error::{AnalyzeError, AnalyzeResult, ScanError};
pub use infrastructure::JsExecutor;
pub use models::{Choice, ParsedAnswer, Provider, Question, QuestionKind, ScanSession};
pub use orchestrator::{scan_page, App, ScanSummary};
pub use workflow::{QuestionCtx, QuestionFlow};
