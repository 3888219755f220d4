//! 内存文档模型
//!
//! 节点保存在 arena 中，`NodeId` 为下标。节点被移除后仍留在 arena 里，
//! 只是与父节点断开，因此 `NodeId` 永远有效。

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dom::Selector;
use crate::error::{AppError, AppResult};

/// 节点标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    value: String,
    text: String,
    checked: bool,
    display: Option<String>,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

/// 一次表单提交的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    /// 表单的 id 属性
    pub form_id: Option<String>,
    /// 按文档顺序收集的 (name, value)
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// 按 name 查找提交值
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// 文档
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    submissions: Vec<FormSubmission>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// 创建只有根节点的空文档
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            submissions: Vec::new(),
        };
        doc.root = doc.create_element("#document");
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn element(&self, id: NodeId) -> &Element {
        &self.node(id).element
    }

    fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.node_mut(id).element
    }

    // ========== 树结构 ==========

    /// 创建游离元素
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            element: Element {
                tag: tag.to_ascii_lowercase(),
                attrs: BTreeMap::new(),
                classes: Vec::new(),
                value: String::new(),
                text: String::new(),
                checked: false,
                display: None,
            },
        });
        id
    }

    /// 追加子节点，若已有父节点则先断开
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// 从文档中移除节点（连同子树）
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != node);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// 节点自身及其全部祖先，从近到远
    pub fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut cursor = self.parent(node);
        while let Some(id) = cursor {
            path.push(id);
            cursor = self.parent(id);
        }
        path
    }

    /// 节点是否仍挂在文档树上
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.ancestors_inclusive(node).last() == Some(&self.root)
    }

    /// 先序遍历 scope 的后代（不含 scope 自身）
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // ========== 属性 ==========

    pub fn tag(&self, node: NodeId) -> &str {
        &self.element(node).tag
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        if name == "class" {
            return None;
        }
        self.element(node).attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.element(node).attrs.contains_key(name)
    }

    /// 设置属性；`class` 会被拆分写入 class 列表，`value` 同时作为初始值
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        match name {
            "class" => {
                let element = self.element_mut(node);
                element.classes.clear();
                for class in value.split_whitespace() {
                    if !element.classes.iter().any(|c| c == class) {
                        element.classes.push(class.to_string());
                    }
                }
            }
            _ => {
                let element = self.element_mut(node);
                if name == "value" {
                    element.value = value.to_string();
                }
                if name == "checked" {
                    element.checked = true;
                }
                element.attrs.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        self.element_mut(node).attrs.remove(name);
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    // ========== class ==========

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.element_mut(node).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.element_mut(node).classes.retain(|c| c != class);
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.element(node).classes
    }

    // ========== 表单值 / 文本 / 样式 ==========

    pub fn value(&self, node: NodeId) -> &str {
        &self.element(node).value
    }

    /// 设置当前值（不影响 value 属性）。`select` 的值直接保存在自身上
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.element_mut(node).value = value.to_string();
    }

    pub fn checked(&self, node: NodeId) -> bool {
        self.element(node).checked
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        self.element_mut(node).checked = checked;
    }

    /// 自身文本与全部后代文本按文档顺序拼接
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = self.element(node).text.clone();
        for id in self.descendants(node) {
            text.push_str(&self.element(id).text);
        }
        text
    }

    /// 替换文本，同时移除全部子节点
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        for child in self.children(node).to_vec() {
            self.node_mut(child).parent = None;
        }
        let node = self.node_mut(node);
        node.children.clear();
        node.element.text = text.to_string();
    }

    /// 内联 display 样式
    pub fn display(&self, node: NodeId) -> Option<&str> {
        self.element(node).display.as_deref()
    }

    pub fn set_display(&mut self, node: NodeId, display: &str) {
        self.element_mut(node).display = Some(display.to_string());
    }

    /// 已连接且自身及祖先都没有 `display: none`
    pub fn is_visible(&self, node: NodeId) -> bool {
        self.is_connected(node)
            && self
                .ancestors_inclusive(node)
                .iter()
                .all(|id| self.display(*id) != Some("none"))
    }

    // ========== 查询 ==========

    /// scope 后代中匹配的全部元素（文档顺序）
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| selector.matches(self, *id))
            .collect()
    }

    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| selector.matches(self, *id))
    }

    /// 解析选择器字符串后在整个文档中查询
    pub fn select_all(&self, selector: &str) -> AppResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_selector_all(self.root, &selector))
    }

    /// 解析选择器字符串并要求至少匹配一个元素
    pub fn select_one(&self, selector: &str) -> AppResult<NodeId> {
        let parsed = Selector::parse(selector)?;
        self.query_selector(self.root, &parsed)
            .ok_or_else(|| AppError::node_not_found(selector))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.id(*node) == Some(id))
    }

    /// 用于日志和错误信息的简短描述，如 `div#quiz-timer.badge`
    pub fn describe(&self, node: NodeId) -> String {
        let mut out = self.tag(node).to_string();
        if let Some(id) = self.id(node) {
            out.push('#');
            out.push_str(id);
        }
        for class in self.classes(node) {
            out.push('.');
            out.push_str(class);
        }
        out
    }

    // ========== 表单提交 ==========

    /// 表单中参与提交的控件：有 name、未禁用；复选框/单选框需选中
    pub fn form_controls(&self, form: NodeId) -> Vec<NodeId> {
        self.descendants(form)
            .into_iter()
            .filter(|id| matches!(self.tag(*id), "input" | "select" | "textarea"))
            .filter(|id| self.attr(*id, "name").is_some_and(|n| !n.is_empty()))
            .filter(|id| !self.has_attr(*id, "disabled"))
            .collect()
    }

    /// 直接提交表单（不触发 submit 事件，不做校验）并记录提交内容
    pub fn submit_form(&mut self, form: NodeId) -> FormSubmission {
        let fields: Vec<(String, String)> = self
            .form_controls(form)
            .into_iter()
            .filter(|id| {
                let kind = self.attr(*id, "type").unwrap_or_default();
                !matches!(kind, "checkbox" | "radio") || self.checked(*id)
            })
            .filter_map(|id| {
                let name = self.attr(id, "name")?.to_string();
                Some((name, self.value(id).to_string()))
            })
            .collect();
        let submission = FormSubmission {
            form_id: self.id(form).map(str::to_string),
            fields,
        };
        self.submissions.push(submission.clone());
        submission
    }

    /// 迄今为止的全部提交记录
    pub fn submissions(&self) -> &[FormSubmission] {
        &self.submissions
    }
}
