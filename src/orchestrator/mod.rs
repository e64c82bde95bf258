//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整场扫描的调度，是系统的"指挥中心"。
//!
//! ### `scan_processor` - 扫描处理器
//! - 管理应用生命周期（连接浏览器、创建 JsExecutor）
//! - 捕获快照、定位题目、按序处理
//! - 控制节流（相邻模型调用之间的固定间隔）
//! - 把单题失败转成页面错误标注，绝不中断整场扫描
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! scan_processor (处理整场扫描)
//!     ↓
//! workflow::QuestionFlow (处理单个 Question)
//!     ↓
//! services (能力层：llm / prompt / reconcile / annotate / warn)
//!     ↓
//! detect (检测引擎) + dom (只读文档树)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```
//!
//! ## 设计原则
//!
//! 1. **严格串行**：同一时刻只有一个模型调用在途，绝不并发扇出
//! 2. **资源隔离**：只有编排层持有 Browser 和 JsExecutor
//! 3. **失败隔离**：单题错误落在该题边界，循环永远继续

pub mod scan_processor;

pub use scan_processor::{scan_page, App, ScanSummary};
