//! 表单校验 - 业务能力层
//!
//! 拦截带 `needs-validation` 的表单的提交：校验失败时阻止提交并停止传播，
//! 无论结果如何都加上 `was-validated`

use tracing::debug;

use crate::dom::{Document, NodeId, Selector};
use crate::markup;

/// 一次拦截的结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
}

impl ValidationVerdict {
    pub fn prevent_default(&self) -> bool {
        !self.valid
    }

    pub fn stop_propagation(&self) -> bool {
        !self.valid
    }
}

/// 表单校验器
#[derive(Debug, Default)]
pub struct FormValidator {
    forms: Vec<NodeId>,
}

impl FormValidator {
    pub fn bind(doc: &Document) -> Self {
        let selector = Selector::class(markup::NEEDS_VALIDATION_CLASS);
        let forms = doc
            .query_selector_all(doc.root(), &selector)
            .into_iter()
            .filter(|node| doc.tag(*node) == "form")
            .collect::<Vec<_>>();
        debug!("绑定 {} 个需要校验的表单", forms.len());
        Self { forms }
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// 处理提交事件，表单未绑定时返回 `None`
    pub fn handle_submit(&self, doc: &mut Document, form: NodeId) -> Option<ValidationVerdict> {
        if !self.forms.contains(&form) {
            return None;
        }
        let valid = doc.check_validity(form);
        if !valid {
            debug!("表单 {} 校验未通过，阻止提交", doc.describe(form));
        }
        doc.add_class(form, markup::WAS_VALIDATED_CLASS);
        Some(ValidationVerdict { valid })
    }
}
