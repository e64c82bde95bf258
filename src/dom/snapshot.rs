//! 页面快照
//!
//! 一次 JS 求值把整个 body 序列化为 JSON 树，反序列化后构建只读 arena。
//! 捕获脚本同时给每个元素打上 data-sqa-node 标记，后续标注脚本用它
//! 定位真实页面里的节点。

use serde::Deserialize;

use crate::dom::node::{DomDocument, DomNode, NodeData, NodeId};

/// 捕获脚本
///
/// - 跳过 script / style / noscript 子树
/// - 输入类控件额外记录实时 value（无 value 属性的 radio 在这里读出 "on"）
/// - 属性以 [name, value] 数组形式输出，保持文档顺序
pub const CAPTURE_SNAPSHOT_JS: &str = r#"
(() => {
    let counter = 0;
    const IGNORED = new Set(['SCRIPT', 'STYLE', 'NOSCRIPT']);
    const INPUT_LIKE = new Set(['INPUT', 'TEXTAREA', 'SELECT']);
    function walk(el) {
        el.setAttribute('data-sqa-node', String(counter++));
        const attrs = [];
        for (const a of el.attributes) {
            attrs.push([a.name, a.value]);
        }
        if (INPUT_LIKE.has(el.tagName)) {
            const live = el.value == null ? '' : String(el.value);
            const existing = attrs.find(pair => pair[0] === 'value');
            if (existing) {
                existing[1] = live;
            } else {
                attrs.push(['value', live]);
            }
        }
        const node = { tag: el.tagName.toLowerCase(), attrs: attrs, children: [] };
        for (const child of el.childNodes) {
            if (child.nodeType === Node.TEXT_NODE) {
                node.children.push({ text: child.textContent });
            } else if (child.nodeType === Node.ELEMENT_NODE && !IGNORED.has(child.tagName)) {
                node.children.push(walk(child));
            }
        }
        return node;
    }
    return walk(document.body);
})()
"#;

/// 快照树的序列化形式
///
/// 元素节点带 tag / attrs / children，文本节点只有 text。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SnapshotNode {
    Element {
        tag: String,
        #[serde(default)]
        attrs: Vec<(String, String)>,
        #[serde(default)]
        children: Vec<SnapshotNode>,
    },
    Text { text: String },
}

impl SnapshotNode {
    /// 把快照树转换为只读 arena 文档
    pub fn into_document(self) -> DomDocument {
        let mut nodes = Vec::new();
        let root = build(&mut nodes, self, None);
        DomDocument::new(nodes, root)
    }
}

fn build(nodes: &mut Vec<DomNode>, snapshot: SnapshotNode, parent: Option<NodeId>) -> NodeId {
    let id = nodes.len();
    match snapshot {
        SnapshotNode::Text { text } => {
            nodes.push(DomNode {
                parent,
                children: Vec::new(),
                data: NodeData::Text { content: text },
            });
        }
        SnapshotNode::Element { tag, attrs, children } => {
            nodes.push(DomNode {
                parent,
                children: Vec::new(),
                data: NodeData::Element { tag, attrs },
            });
            let mut child_ids = Vec::with_capacity(children.len());
            for child in children {
                child_ids.push(build(nodes, child, Some(id)));
            }
            nodes[id].children = child_ids;
        }
    }
    id
}
