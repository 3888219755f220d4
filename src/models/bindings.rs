//! 元素绑定
//!
//! 初始化时从标记中一次性读取 data 属性并解析成强类型结构，
//! 解析失败的元素会被跳过

use crate::dom::{Document, NodeId, Selector};
use crate::error::BindingError;
use crate::markup;

fn required_attr<'a>(
    doc: &'a Document,
    node: NodeId,
    attribute: &str,
) -> Result<&'a str, BindingError> {
    match doc.attr(node, attribute) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BindingError::MissingAttribute {
            element: doc.describe(node),
            attribute: attribute.to_string(),
        }),
    }
}

fn parsed_attr<T: std::str::FromStr>(
    doc: &Document,
    node: NodeId,
    attribute: &str,
    expected: &str,
) -> Result<T, BindingError> {
    let raw = required_attr(doc, node, attribute)?;
    raw.trim().parse().map_err(|_| BindingError::InvalidAttribute {
        element: doc.describe(node),
        attribute: attribute.to_string(),
        value: raw.to_string(),
        expected: expected.to_string(),
    })
}

/// 一个答案选项
///
/// ID 保留标记中的原值，同题选项和隐藏输入框都按原值匹配
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionBinding {
    pub node: NodeId,
    pub question_id: String,
    pub option_id: String,
}

impl OptionBinding {
    pub fn parse(doc: &Document, node: NodeId) -> Result<Self, BindingError> {
        Ok(Self {
            node,
            question_id: required_attr(doc, node, markup::DATA_QUESTION_ID)?.to_string(),
            option_id: required_attr(doc, node, markup::DATA_OPTION_ID)?.to_string(),
        })
    }

    /// 对应隐藏输入框的 name
    pub fn hidden_input_name(&self) -> String {
        format!("{}{}", markup::HIDDEN_INPUT_PREFIX, self.question_id)
    }
}

/// 倒计时元素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerBinding {
    pub node: NodeId,
    pub time_limit_minutes: u32,
}

impl TimerBinding {
    pub fn parse(doc: &Document, node: NodeId) -> Result<Self, BindingError> {
        Ok(Self {
            node,
            time_limit_minutes: parsed_attr(doc, node, markup::DATA_TIME_LIMIT, "非负整数分钟")?,
        })
    }
}

/// 收藏按钮及其图标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkBinding {
    pub node: NodeId,
    pub quiz_id: u64,
    pub icon: NodeId,
}

impl BookmarkBinding {
    pub fn parse(doc: &Document, node: NodeId) -> Result<Self, BindingError> {
        let quiz_id = parsed_attr(doc, node, markup::DATA_QUIZ_ID, "测验ID")?;
        let icon = doc
            .query_selector(node, &Selector::tag(markup::BOOKMARK_ICON_TAG))
            .ok_or_else(|| BindingError::MissingChild {
                element: doc.describe(node),
                selector: markup::BOOKMARK_ICON_TAG.to_string(),
            })?;
        Ok(Self {
            node,
            quiz_id,
            icon,
        })
    }
}

/// 搜索表单：文本框 + 分类下拉框
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBinding {
    pub form: NodeId,
    pub input: NodeId,
    pub category: NodeId,
}

impl SearchBinding {
    pub fn parse(doc: &Document, form: NodeId) -> Result<Self, BindingError> {
        let child = |tag: &str, name: &str| {
            let selector = Selector::tag_with_attr(tag, "name", name);
            doc.query_selector(form, &selector)
                .ok_or_else(|| BindingError::MissingChild {
                    element: doc.describe(form),
                    selector: selector.to_string(),
                })
        };
        Ok(Self {
            form,
            input: child("input", markup::SEARCH_INPUT_NAME)?,
            category: child("select", markup::CATEGORY_SELECT_NAME)?,
        })
    }
}

/// 测验卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCard {
    pub node: NodeId,
    pub category: Option<String>,
    pub title: String,
}

impl QuizCard {
    /// 卡片在每次过滤时重新读取，标题缺失时返回错误
    pub fn parse(doc: &Document, node: NodeId) -> Result<Self, BindingError> {
        let title = doc
            .query_selector(node, &Selector::class(markup::CARD_TITLE_CLASS))
            .ok_or_else(|| BindingError::MissingChild {
                element: doc.describe(node),
                selector: format!(".{}", markup::CARD_TITLE_CLASS),
            })?;
        Ok(Self {
            node,
            category: doc.attr(node, markup::DATA_CATEGORY).map(str::to_string),
            title: doc.text_content(title),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_requires_both_identifiers() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        doc.set_attr(node, markup::DATA_QUESTION_ID, "4");
        let err = OptionBinding::parse(&doc, node).unwrap_err();
        assert!(matches!(err, BindingError::MissingAttribute { ref attribute, .. } if attribute == markup::DATA_OPTION_ID));

        doc.set_attr(node, markup::DATA_OPTION_ID, "17");
        let binding = OptionBinding::parse(&doc, node).unwrap();
        assert_eq!(binding.hidden_input_name(), "question_4");

        doc.set_attr(node, markup::DATA_OPTION_ID, "  ");
        assert!(OptionBinding::parse(&doc, node).is_err());
    }

    #[test]
    fn option_identifiers_keep_surrounding_whitespace() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        doc.set_attr(node, markup::DATA_QUESTION_ID, " 1");
        doc.set_attr(node, markup::DATA_OPTION_ID, "10 ");
        let binding = OptionBinding::parse(&doc, node).unwrap();
        assert_eq!(binding.question_id, " 1");
        assert_eq!(binding.option_id, "10 ");
        assert_eq!(binding.hidden_input_name(), "question_ 1");
    }

    #[test]
    fn card_without_title_is_rejected() {
        let mut doc = Document::new();
        let card = doc.create_element("div");
        doc.set_attr(card, markup::DATA_CATEGORY, "math");
        assert!(matches!(
            QuizCard::parse(&doc, card),
            Err(BindingError::MissingChild { .. })
        ));
    }

    #[test]
    fn timer_rejects_non_numeric_limit() {
        let mut doc = Document::new();
        let node = doc.create_element("span");
        doc.set_attr(node, markup::DATA_TIME_LIMIT, "ten");
        assert!(matches!(
            TimerBinding::parse(&doc, node),
            Err(BindingError::InvalidAttribute { .. })
        ));
        doc.set_attr(node, markup::DATA_TIME_LIMIT, " 15 ");
        assert_eq!(TimerBinding::parse(&doc, node).unwrap().time_limit_minutes, 15);
    }

    #[test]
    fn bookmark_needs_icon_child() {
        let mut doc = Document::new();
        let button = doc.create_element("a");
        doc.set_attr(button, markup::DATA_QUIZ_ID, "9");
        assert!(matches!(
            BookmarkBinding::parse(&doc, button),
            Err(BindingError::MissingChild { .. })
        ));
        let icon = doc.create_element("i");
        doc.append_child(button, icon);
        let binding = BookmarkBinding::parse(&doc, button).unwrap();
        assert_eq!(binding.quiz_id, 9);
        assert_eq!(binding.icon, icon);
    }
}
