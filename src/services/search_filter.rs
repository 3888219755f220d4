//! 搜索过滤 - 业务能力层
//!
//! 搜索框输入或分类变化时，从头重新计算每张测验卡片的显示状态

use tracing::debug;

use crate::dom::{Document, NodeId, Selector};
use crate::markup;
use crate::models::{QuizCard, SearchBinding};

/// 当前过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// 已转小写的搜索文本
    text: String,
    /// 空字符串视为未选分类
    category: Option<String>,
}

impl SearchQuery {
    pub fn new(text: &str, category: &str) -> Self {
        Self {
            text: text.to_lowercase(),
            category: (!category.is_empty()).then(|| category.to_string()),
        }
    }

    /// 标题包含搜索文本（不区分大小写），且未选分类或分类相同
    pub fn matches(&self, title: &str, category: Option<&str>) -> bool {
        let matches_text = title.to_lowercase().contains(&self.text);
        let matches_category = match &self.category {
            None => true,
            Some(selected) => category == Some(selected.as_str()),
        };
        matches_text && matches_category
    }
}

/// 搜索过滤器
#[derive(Debug)]
pub struct SearchFilter {
    binding: SearchBinding,
}

impl SearchFilter {
    /// 页面上有搜索表单且其中有搜索框和分类下拉框时才启用
    pub fn bind(doc: &Document) -> Option<Self> {
        let form = doc.get_element_by_id(markup::SEARCH_FORM_ID)?;
        match SearchBinding::parse(doc, form) {
            Ok(binding) => Some(Self { binding }),
            Err(e) => {
                debug!("搜索过滤未启用: {}", e);
                None
            }
        }
    }

    pub fn binding(&self) -> SearchBinding {
        self.binding
    }

    /// `input` 事件：目标是搜索框时重新过滤，返回可见卡片数
    pub fn handle_input(&self, doc: &mut Document, target: NodeId) -> Option<usize> {
        (target == self.binding.input).then(|| self.apply(doc))
    }

    /// `change` 事件：目标是分类下拉框时重新过滤，返回可见卡片数
    pub fn handle_change(&self, doc: &mut Document, target: NodeId) -> Option<usize> {
        (target == self.binding.category).then(|| self.apply(doc))
    }

    /// 按当前输入重新计算全部卡片
    pub fn apply(&self, doc: &mut Document) -> usize {
        let query = SearchQuery::new(
            doc.value(self.binding.input),
            doc.value(self.binding.category),
        );
        let cards = doc.query_selector_all(doc.root(), &Selector::class(markup::QUIZ_CARD_CLASS));

        let mut visible = 0;
        for node in cards {
            let card = match QuizCard::parse(doc, node) {
                Ok(card) => card,
                Err(e) => {
                    debug!("跳过卡片: {}", e);
                    continue;
                }
            };
            let shown = query.matches(&card.title, card.category.as_deref());
            let display = if shown {
                visible += 1;
                markup::DISPLAY_SHOWN
            } else {
                markup::DISPLAY_HIDDEN
            };
            doc.set_display(card.node, display);
        }
        debug!("过滤条件 {:?}: 显示 {} 张卡片", query, visible);
        visible
    }
}
