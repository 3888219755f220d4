//! 页面夹具
//!
//! 用 TOML 描述一棵元素树和一串要回放的用户操作

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::dom::{Document, NodeId};

fn default_tag() -> String {
    "div".to_string()
}

/// 元素描述
#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "class")]
    pub classes: Vec<String>,
    /// 其余属性，包括 data-*、name、type、required 等
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

/// 回放操作，目标用选择器指定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Click { target: String },
    Input { target: String, text: String },
    Select { target: String, value: String },
    Submit { target: String },
    Wait { ms: u64 },
}

/// 页面夹具
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// 夹具文件路径（加载后设置）
    #[serde(skip)]
    pub file_path: Option<String>,
}

impl PageFixture {
    /// 按描述构建文档
    pub fn build_document(&self) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        for spec in &self.elements {
            build_element(&mut doc, root, spec);
        }
        doc
    }
}

fn build_element(doc: &mut Document, parent: NodeId, spec: &ElementSpec) {
    let node = doc.create_element(&spec.tag);
    if let Some(id) = &spec.id {
        doc.set_attr(node, "id", id);
    }
    if !spec.classes.is_empty() {
        doc.set_attr(node, "class", &spec.classes.join(" "));
    }
    for (name, value) in &spec.attrs {
        doc.set_attr(node, name, value);
    }
    if let Some(text) = &spec.text {
        doc.set_text_content(node, text);
    }
    if let Some(value) = &spec.value {
        doc.set_value(node, value);
    }
    if spec.checked {
        doc.set_checked(node, true);
    }
    doc.append_child(parent, node);
    for child in &spec.children {
        build_element(doc, node, child);
    }
}
