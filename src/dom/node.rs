//! 只读 DOM 树
//!
//! 以 arena 方式存储节点，`NodeId` 是 arena 下标。检测引擎只通过这里的
//! 查询接口访问页面结构，因此可以直接用内存中的固定树做测试。

/// 节点句柄（arena 下标）
pub type NodeId = usize;

/// 扫描时注入的节点标记属性，指纹计算时忽略
pub const PAGE_REF_ATTR: &str = "data-sqa-node";

/// 节点内容
#[derive(Debug, Clone)]
pub enum NodeData {
    /// 元素节点：标签名（小写）+ 按文档顺序排列的属性
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// 文本节点
    Text { content: String },
}

/// 单个节点
#[derive(Debug, Clone)]
pub struct DomNode {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// 只读文档树
///
/// 职责：
/// - 持有整棵快照树
/// - 暴露 parent / children / sibling / text / attr 查询
/// - 扫描期间不可变
#[derive(Debug, Clone)]
pub struct DomDocument {
    nodes: Vec<DomNode>,
    root: NodeId,
}

impl DomDocument {
    pub(crate) fn new(nodes: Vec<DomNode>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// 根节点（快照捕获时的 body）
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &DomNode {
        &self.nodes[id]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// 元素的标签名，文本节点返回 None
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].data {
            NodeData::Element { tag, .. } => Some(tag.as_str()),
            NodeData::Text { .. } => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].data, NodeData::Element { .. })
    }

    /// 读取属性值（第一个同名属性生效）
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id].data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeData::Text { .. } => None,
        }
    }

    /// 页面端的节点标记（注入的 data-sqa-node 属性值）
    ///
    /// 固定树测试里通常没有这个属性，标注层需要容忍 None。
    pub fn page_ref(&self, id: NodeId) -> Option<&str> {
        self.attr(id, PAGE_REF_ATTR)
    }

    /// 文本节点的原始内容
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].data {
            NodeData::Text { content } => Some(content.as_str()),
            NodeData::Element { .. } => None,
        }
    }

    /// 递归拼接子树文本（等价于 textContent）
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].data {
            NodeData::Text { content } => out.push_str(content),
            NodeData::Element { .. } => {
                for &child in &self.nodes[id].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// 直接文本子节点（不含嵌套元素），各自 trim 后以空格连接
    pub fn direct_text(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .filter_map(|&c| self.text(c))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// 任意类型的下一个兄弟节点（含文本节点）
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// 上一个元素兄弟节点
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|&c| self.is_element(c))
    }

    /// 下一个元素兄弟节点
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|&c| self.is_element(c))
    }

    /// 最近的指定标签祖先（等价于 closest()，不含自身）
    pub fn enclosing(&self, id: NodeId, tag_name: &str) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.tag(node) == Some(tag_name) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// 按文档顺序（先序）遍历所有元素节点
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.is_element(id) {
                out.push(id);
                for &child in self.children(id).iter().rev() {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// 重建元素开标签的标记文本，用于指纹前缀
    ///
    /// 注入的 data-sqa-node 属性随扫描变化，必须排除，否则同一题目
    /// 在两次扫描之间指纹不稳定。
    pub fn opening_tag_markup(&self, id: NodeId) -> String {
        match &self.nodes[id].data {
            NodeData::Text { content } => content.clone(),
            NodeData::Element { tag, attrs } => {
                let mut out = format!("<{}", tag);
                for (name, value) in attrs {
                    if name == PAGE_REF_ATTR {
                        continue;
                    }
                    out.push_str(&format!(" {}=\"{}\"", name, value));
                }
                out.push('>');
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::snapshot::SnapshotNode;
    use serde_json::json;

    fn fixture() -> DomDocument {
        let snapshot: SnapshotNode = serde_json::from_value(json!({
            "tag": "div",
            "attrs": [["class", "quiz"]],
            "children": [
                { "tag": "p", "attrs": [], "children": [ { "text": "What is 2 + 2?" } ] },
                { "text": "  loose text  " },
                { "tag": "label", "attrs": [], "children": [
                    { "tag": "input", "attrs": [["type", "radio"], ["name", "q1"], ["value", "4"]], "children": [] },
                    { "text": " 4" }
                ] }
            ]
        }))
        .unwrap();
        snapshot.into_document()
    }

    #[test]
    fn test_text_content_concatenates_subtree() {
        let doc = fixture();
        let root = doc.root();
        assert!(doc.text_content(root).contains("What is 2 + 2?"));
        assert!(doc.text_content(root).contains("4"));
    }

    #[test]
    fn test_sibling_queries_skip_text_nodes() {
        let doc = fixture();
        let root = doc.root();
        let p = doc.children(root)[0];
        let label = doc.next_element_sibling(p).unwrap();
        assert_eq!(doc.tag(label), Some("label"));
        assert_eq!(doc.prev_element_sibling(label), Some(p));
    }

    #[test]
    fn test_enclosing_finds_label_ancestor() {
        let doc = fixture();
        let input = doc
            .elements()
            .into_iter()
            .find(|&id| doc.tag(id) == Some("input"))
            .unwrap();
        let label = doc.enclosing(input, "label").unwrap();
        assert_eq!(doc.tag(label), Some("label"));
        assert!(doc.enclosing(input, "form").is_none());
    }

    #[test]
    fn test_opening_tag_markup_excludes_page_ref() {
        let snapshot: SnapshotNode = serde_json::from_value(json!({
            "tag": "input",
            "attrs": [["data-sqa-node", "7"], ["type", "radio"], ["name", "q1"]],
            "children": []
        }))
        .unwrap();
        let doc = snapshot.into_document();
        let markup = doc.opening_tag_markup(doc.root());
        assert_eq!(markup, "<input type=\"radio\" name=\"q1\">");
        assert_eq!(doc.page_ref(doc.root()), Some("7"));
    }
}
