//! 页面状态摘要，回放结束后输出

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dom::{Document, FormSubmission, Selector};
use crate::markup;
use crate::models::{BookmarkBinding, OptionBinding, QuizCard};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// 倒计时当前显示
    pub timer: Option<String>,
    /// 题目 ID → 选中的选项 ID
    pub selections: BTreeMap<String, String>,
    /// 当前为已收藏图标的测验
    pub bookmarked: Vec<u64>,
    /// 可见卡片标题
    pub visible_cards: Vec<String>,
    pub hidden_cards: usize,
    /// 仍在文档中的提示框数量
    pub alerts_remaining: usize,
    pub submissions: Vec<FormSubmission>,
}

impl PageSummary {
    pub fn collect(doc: &Document) -> Self {
        let root = doc.root();
        let mut summary = Self {
            timer: doc
                .get_element_by_id(markup::TIMER_ID)
                .map(|timer| doc.text_content(timer)),
            submissions: doc.submissions().to_vec(),
            ..Default::default()
        };

        for node in doc.query_selector_all(root, &Selector::class(markup::OPTION_CONTAINER_CLASS)) {
            if !doc.has_class(node, markup::SELECTED_CLASS) {
                continue;
            }
            if let Ok(option) = OptionBinding::parse(doc, node) {
                summary.selections.insert(option.question_id, option.option_id);
            }
        }

        for node in doc.query_selector_all(root, &Selector::class(markup::BOOKMARK_BUTTON_CLASS)) {
            if let Ok(button) = BookmarkBinding::parse(doc, node) {
                if doc.has_class(button.icon, markup::ICON_BOOKMARKED) {
                    summary.bookmarked.push(button.quiz_id);
                }
            }
        }

        for node in doc.query_selector_all(root, &Selector::class(markup::QUIZ_CARD_CLASS)) {
            let Ok(card) = QuizCard::parse(doc, node) else {
                continue;
            };
            if doc.is_visible(card.node) {
                summary.visible_cards.push(card.title.trim().to_string());
            } else {
                summary.hidden_cards += 1;
            }
        }

        summary.alerts_remaining = doc
            .query_selector_all(root, &Selector::class(markup::ALERT_CLASS))
            .len();
        summary
    }
}
