//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程。完成提示在页面上几秒
//! 就消失了，分析失败的题目落一份到文件里，方便用户事后排查。

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 把分析失败的题目追加到警告文件
/// - 只处理单个题目
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 追加一条警告记录
    ///
    /// # 参数
    /// - `question_index`: 题目在本场扫描中的序号（从 1 开始）
    /// - `stem`: 题干内容
    /// - `reason`: 失败原因
    pub async fn write(&self, question_index: usize, stem: &str, reason: &str) -> Result<()> {
        debug!(
            "写入警告: 题目 {} | 原因: {} | 题干长度: {}",
            question_index,
            reason,
            stem.chars().count()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!("题目 {} | {} | 题干: {}\n", question_index, reason, stem);

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}
