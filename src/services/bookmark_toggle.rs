//! 收藏切换 - 业务能力层
//!
//! 点击收藏按钮后发起一次请求，按服务端返回的状态切换图标。
//! 请求进行中按钮带 `disabled` 属性，期间的点击被忽略

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::clients::BookmarkApi;
use crate::dom::{Document, DocumentHandle, NodeId, Selector};
use crate::markup;
use crate::models::{BookmarkBinding, BookmarkStatus};

const IN_FLIGHT_ATTR: &str = "disabled";

/// 一次命中收藏按钮的点击结果
#[derive(Debug)]
pub enum BookmarkClick {
    /// 已发起请求
    Started(JoinHandle<()>),
    /// 已有请求在途，本次点击被忽略
    InFlight,
}

/// 收藏切换
pub struct BookmarkToggle {
    buttons: Vec<BookmarkBinding>,
    api: Arc<dyn BookmarkApi>,
}

impl BookmarkToggle {
    pub fn bind(doc: &Document, api: Arc<dyn BookmarkApi>) -> Self {
        let buttons = doc
            .query_selector_all(doc.root(), &Selector::class(markup::BOOKMARK_BUTTON_CLASS))
            .into_iter()
            .filter_map(|node| match BookmarkBinding::parse(doc, node) {
                Ok(binding) => Some(binding),
                Err(e) => {
                    warn!("⚠️ 跳过收藏按钮: {}", e);
                    None
                }
            })
            .collect::<Vec<_>>();
        debug!("绑定 {} 个收藏按钮", buttons.len());
        Self { buttons, api }
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn binding_for(&self, path: &[NodeId]) -> Option<BookmarkBinding> {
        path.iter()
            .find_map(|node| self.buttons.iter().find(|b| b.node == *node))
            .copied()
    }

    /// 处理点击，点击不在收藏按钮上时返回 `None`
    pub fn handle_click(&self, document: &DocumentHandle, path: &[NodeId]) -> Option<BookmarkClick> {
        let binding = self.binding_for(path)?;

        let claimed = document.write(|doc| {
            if doc.has_attr(binding.node, IN_FLIGHT_ATTR) {
                false
            } else {
                doc.set_attr(binding.node, IN_FLIGHT_ATTR, "");
                true
            }
        });
        if !claimed {
            debug!("测验 {} 的收藏请求仍在进行，忽略本次点击", binding.quiz_id);
            return Some(BookmarkClick::InFlight);
        }

        let api = Arc::clone(&self.api);
        let document = document.clone();
        Some(BookmarkClick::Started(tokio::spawn(async move {
            let result = api.toggle_bookmark(binding.quiz_id).await;
            document.write(|doc| {
                match result {
                    Ok(status) => {
                        apply_status(doc, binding.icon, status);
                        info!("🔖 测验 {} 收藏状态: {:?}", binding.quiz_id, status);
                    }
                    Err(e) => error!("❌ 测验 {} 收藏切换失败: {}", binding.quiz_id, e),
                }
                doc.remove_attr(binding.node, IN_FLIGHT_ATTR);
            });
        })))
    }
}

/// 切换图标 class，保证两者恰有其一
pub fn apply_status(doc: &mut Document, icon: NodeId, status: BookmarkStatus) {
    let (add, remove) = status.icon_classes();
    doc.remove_class(icon, remove);
    doc.add_class(icon, add);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, AppError, AppResult};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// 按顺序返回预设结果的假接口，可设置响应延迟
    struct ScriptedApi {
        replies: Mutex<VecDeque<AppResult<BookmarkStatus>>>,
        calls: Mutex<Vec<u64>>,
        delay: Duration,
    }

    impl ScriptedApi {
        fn new(replies: Vec<AppResult<BookmarkStatus>>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
                delay,
            })
        }
    }

    #[async_trait]
    impl BookmarkApi for ScriptedApi {
        async fn toggle_bookmark(&self, quiz_id: u64) -> AppResult<BookmarkStatus> {
            self.calls.lock().unwrap().push(quiz_id);
            tokio::time::sleep(self.delay).await;
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra request")
        }
    }

    fn page() -> (DocumentHandle, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let button = doc.create_element("a");
        doc.set_attr(button, "class", markup::BOOKMARK_BUTTON_CLASS);
        doc.set_attr(button, markup::DATA_QUIZ_ID, "3");
        let icon = doc.create_element("i");
        doc.set_attr(icon, "class", "bi bi-bookmark");
        doc.append_child(root, button);
        doc.append_child(button, icon);
        (DocumentHandle::new(doc), button, icon)
    }

    fn started(click: Option<BookmarkClick>) -> JoinHandle<()> {
        match click {
            Some(BookmarkClick::Started(handle)) => handle,
            other => panic!("expected a request, got {other:?}"),
        }
    }

    fn icon_state(document: &DocumentHandle, icon: NodeId) -> (bool, bool) {
        document.read(|doc| {
            (
                doc.has_class(icon, markup::ICON_BOOKMARKED),
                doc.has_class(icon, markup::ICON_NOT_BOOKMARKED),
            )
        })
    }

    #[tokio::test]
    async fn added_then_removed_flips_icon() {
        let (document, button, icon) = page();
        let api = ScriptedApi::new(
            vec![Ok(BookmarkStatus::Added), Ok(BookmarkStatus::Removed)],
            Duration::ZERO,
        );
        let toggle = document.read(|doc| BookmarkToggle::bind(doc, api.clone()));

        let task = started(toggle.handle_click(&document, &[icon, button]));
        task.await.unwrap();
        assert_eq!(icon_state(&document, icon), (true, false));

        let task = started(toggle.handle_click(&document, &[button]));
        task.await.unwrap();
        assert_eq!(icon_state(&document, icon), (false, true));
        assert_eq!(*api.calls.lock().unwrap(), vec![3, 3]);
        assert!(!document.read(|doc| doc.has_attr(button, IN_FLIGHT_ATTR)));
    }

    #[tokio::test]
    async fn failure_leaves_icon_unchanged_and_releases_guard() {
        let (document, button, icon) = page();
        let api = ScriptedApi::new(
            vec![Err(AppError::Api(ApiError::BadResponse {
                endpoint: "/quiz/3/bookmark".to_string(),
                code: 500,
                message: None,
            }))],
            Duration::ZERO,
        );
        let toggle = document.read(|doc| BookmarkToggle::bind(doc, api));

        started(toggle.handle_click(&document, &[button])).await.unwrap();
        assert_eq!(icon_state(&document, icon), (false, true));
        assert!(!document.read(|doc| doc.has_attr(button, IN_FLIGHT_ATTR)));
    }

    #[tokio::test(start_paused = true)]
    async fn double_click_sends_one_request() {
        let (document, button, icon) = page();
        let api = ScriptedApi::new(vec![Ok(BookmarkStatus::Added)], Duration::from_millis(300));
        let toggle = document.read(|doc| BookmarkToggle::bind(doc, api.clone()));

        let first = started(toggle.handle_click(&document, &[button]));
        let second = toggle.handle_click(&document, &[button]);
        assert!(matches!(second, Some(BookmarkClick::InFlight)));
        assert!(document.read(|doc| doc.has_attr(button, IN_FLIGHT_ATTR)));

        first.await.unwrap();
        assert_eq!(api.calls.lock().unwrap().len(), 1);
        assert_eq!(icon_state(&document, icon), (true, false));
    }

    #[tokio::test]
    async fn clicks_elsewhere_are_ignored() {
        let (document, _, _) = page();
        let api = ScriptedApi::new(vec![], Duration::ZERO);
        let toggle = document.read(|doc| BookmarkToggle::bind(doc, api));
        let root = document.read(|doc| doc.root());
        assert!(toggle.handle_click(&document, &[root]).is_none());
    }
}
