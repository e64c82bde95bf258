//! 扫描会话
//!
//! 一场扫描内已处理题目指纹的集合。编排器创建、编排器独占修改，
//! 扫描返回时整个丢弃，不跨扫描存活。

use std::collections::HashSet;

/// 单场扫描的去重状态
#[derive(Debug, Default)]
pub struct ScanSession {
    processed: HashSet<String>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 标记一个指纹已处理；此前已经处理过则返回 false
    pub fn mark_processed(&mut self, fingerprint: &str) -> bool {
        self.processed.insert(fingerprint.to_string())
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}
