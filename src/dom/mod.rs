//! 文档结构层（DOM）
//!
//! ## 职责
//!
//! - 持有一次扫描期间不可变的页面结构快照
//! - 只暴露只读查询能力：父节点 / 子节点 / 兄弟节点 / 文本 / 属性
//! - 不认识 Question / Choice
//! - 不触碰浏览器（快照由 infrastructure 层捕获后交给本层）

pub mod node;
pub mod snapshot;

pub use node::{DomDocument, DomNode, NodeData, NodeId};
pub use snapshot::{SnapshotNode, CAPTURE_SNAPSHOT_JS};
