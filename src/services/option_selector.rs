//! 选项选择 - 业务能力层
//!
//! 同一题目内只保留一个选中项，并把选中的选项 ID 写入隐藏输入框

use tracing::{debug, warn};

use crate::dom::selector::{AttrCondition, Compound};
use crate::dom::{Document, NodeId, Selector};
use crate::markup;
use crate::models::OptionBinding;

/// 选项选择器
#[derive(Debug, Default)]
pub struct OptionSelector {
    options: Vec<OptionBinding>,
}

impl OptionSelector {
    /// 绑定初始化时已存在的全部选项，属性不完整的选项被跳过
    pub fn bind(doc: &Document) -> Self {
        let selector = Selector::class(markup::OPTION_CONTAINER_CLASS);
        let options = doc
            .query_selector_all(doc.root(), &selector)
            .into_iter()
            .filter_map(|node| match OptionBinding::parse(doc, node) {
                Ok(binding) => Some(binding),
                Err(e) => {
                    warn!("⚠️ 跳过选项: {}", e);
                    None
                }
            })
            .collect::<Vec<_>>();
        debug!("绑定 {} 个选项", options.len());
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// 点击路径（目标及其祖先）上最近的已绑定选项
    pub fn binding_for(&self, path: &[NodeId]) -> Option<&OptionBinding> {
        path.iter()
            .find_map(|node| self.options.iter().find(|o| o.node == *node))
    }

    /// 处理点击，返回是否命中某个选项
    pub fn handle_click(&self, doc: &mut Document, path: &[NodeId]) -> bool {
        let Some(binding) = self.binding_for(path) else {
            return false;
        };
        select(doc, binding);
        true
    }
}

/// 取消同题其它选项、选中当前项并同步隐藏输入框
pub fn select(doc: &mut Document, binding: &OptionBinding) {
    let siblings = Selector::from(Compound {
        classes: vec![markup::OPTION_CONTAINER_CLASS.to_string()],
        attrs: vec![AttrCondition {
            name: markup::DATA_QUESTION_ID.to_string(),
            value: Some(binding.question_id.clone()),
        }],
        ..Default::default()
    });
    for option in doc.query_selector_all(doc.root(), &siblings) {
        doc.remove_class(option, markup::SELECTED_CLASS);
    }
    doc.add_class(binding.node, markup::SELECTED_CLASS);

    let input_name = binding.hidden_input_name();
    let input = Selector::tag_with_attr("input", "name", &input_name);
    match doc.query_selector(doc.root(), &input) {
        Some(input) => doc.set_value(input, &binding.option_id),
        None => debug!("未找到隐藏输入框 {}，跳过", input_name),
    }
}
