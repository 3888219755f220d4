//! 测验页面 - 编排层
//!
//! ## 职责
//!
//! `QuizPage::init` 是唯一的初始化入口：在给定文档上绑定六个互不依赖的行为，
//! 启动倒计时和提示框关闭任务，之后通过 `dispatch` 接收用户事件。
//!
//! 页面被 drop 或调用 `shutdown` 时，所有后台任务被中止。

use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clients::{BookmarkApi, HttpBookmarkClient};
use crate::config::Config;
use crate::dom::{DocumentHandle, NodeId};
use crate::error::AppResult;
use crate::orchestrator::events::{DispatchOutcome, Event, EventKind};
use crate::orchestrator::summary::PageSummary;
use crate::services::{
    AlertDismisser, BookmarkClick, BookmarkToggle, CountdownTimer, Dismissible, FormValidator,
    OptionSelector, RemoveOnDismiss, SearchFilter,
};

/// 页面依赖的外部能力
#[derive(Clone)]
pub struct Collaborators {
    pub bookmark_api: Arc<dyn BookmarkApi>,
    pub dismisser: Arc<dyn Dismissible>,
}

impl Collaborators {
    pub fn new(bookmark_api: Arc<dyn BookmarkApi>, dismisser: Arc<dyn Dismissible>) -> Self {
        Self {
            bookmark_api,
            dismisser,
        }
    }

    /// 真实 HTTP 客户端 + 默认的移除式关闭
    pub fn http(config: &Config) -> AppResult<Self> {
        Ok(Self::new(
            Arc::new(HttpBookmarkClient::new(config)?),
            Arc::new(RemoveOnDismiss),
        ))
    }
}

/// 测验页面
pub struct QuizPage {
    document: DocumentHandle,
    option_selector: OptionSelector,
    bookmark_toggle: BookmarkToggle,
    form_validator: FormValidator,
    search_filter: Option<SearchFilter>,
    timer_task: Option<JoinHandle<()>>,
    alert_tasks: Vec<JoinHandle<()>>,
    bookmark_tasks: Vec<JoinHandle<()>>,
}

impl QuizPage {
    /// 绑定全部行为
    ///
    /// 会启动后台任务，必须在 tokio 运行时内调用
    pub fn init(document: DocumentHandle, config: &Config, collaborators: Collaborators) -> Self {
        let Collaborators {
            bookmark_api,
            dismisser,
        } = collaborators;

        let (option_selector, bookmark_toggle, form_validator, search_filter, timer, alerts) =
            document.read(|doc| {
                (
                    OptionSelector::bind(doc),
                    BookmarkToggle::bind(doc, bookmark_api),
                    FormValidator::bind(doc),
                    SearchFilter::bind(doc),
                    CountdownTimer::bind(doc, config.timer_tick()),
                    AlertDismisser::bind(doc, config.alert_dismiss_delay()),
                )
            });

        info!(
            "✓ 页面初始化: {} 个选项, {} 个收藏按钮, {} 个校验表单, {} 个提示框, 倒计时{}, 搜索{}",
            option_selector.len(),
            bookmark_toggle.len(),
            form_validator.len(),
            alerts.alerts().len(),
            if timer.is_some() { "已启用" } else { "未启用" },
            if search_filter.is_some() { "已启用" } else { "未启用" },
        );

        let timer_task = timer.map(|timer| timer.spawn(document.clone()));
        let alert_tasks = alerts.schedule(&document, dismisser);

        Self {
            document,
            option_selector,
            bookmark_toggle,
            form_validator,
            search_filter,
            timer_task,
            alert_tasks,
            bookmark_tasks: Vec::new(),
        }
    }

    pub fn document(&self) -> &DocumentHandle {
        &self.document
    }

    /// 派发事件
    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        debug!("派发事件 {:?}", event);
        match event.kind {
            EventKind::Click => self.on_click(event.target),
            EventKind::Input => self.on_value_event(event.target, false),
            EventKind::Change => self.on_value_event(event.target, true),
            EventKind::Submit => self.on_submit(event.target),
        }
    }

    pub fn click(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(Event::click(target))
    }

    /// 写入文本后派发 `input`
    pub fn type_text(&mut self, target: NodeId, text: &str) -> DispatchOutcome {
        self.document.write(|doc| doc.set_value(target, text));
        self.dispatch(Event::input(target))
    }

    /// 设置下拉框的值后派发 `change`
    pub fn select_option(&mut self, target: NodeId, value: &str) -> DispatchOutcome {
        self.document.write(|doc| doc.set_value(target, value));
        self.dispatch(Event::change(target))
    }

    /// 对表单（或表单内的元素）派发 `submit`
    pub fn submit(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(Event::submit(target))
    }

    fn on_click(&mut self, target: NodeId) -> DispatchOutcome {
        let path = self.document.read(|doc| doc.ancestors_inclusive(target));
        let mut outcome = DispatchOutcome::default();

        let selector = &self.option_selector;
        if self
            .document
            .write(|doc| selector.handle_click(doc, &path))
        {
            outcome.handled = true;
        }

        if let Some(click) = self.bookmark_toggle.handle_click(&self.document, &path) {
            outcome.handled = true;
            outcome.default_prevented = true;
            self.bookmark_tasks.retain(|task| !task.is_finished());
            if let BookmarkClick::Started(task) = click {
                self.bookmark_tasks.push(task);
            }
        }
        outcome
    }

    fn on_value_event(&mut self, target: NodeId, is_change: bool) -> DispatchOutcome {
        let Some(filter) = &self.search_filter else {
            return DispatchOutcome::default();
        };
        let visible = self.document.write(|doc| {
            if is_change {
                filter.handle_change(doc, target)
            } else {
                filter.handle_input(doc, target)
            }
        });
        DispatchOutcome {
            handled: visible.is_some(),
            ..Default::default()
        }
    }

    fn on_submit(&mut self, target: NodeId) -> DispatchOutcome {
        let validator = &self.form_validator;
        self.document.write(|doc| {
            let form = doc
                .ancestors_inclusive(target)
                .into_iter()
                .find(|node| doc.tag(*node) == "form");
            let Some(form) = form else {
                debug!("{} 不在表单内，忽略提交", doc.describe(target));
                return DispatchOutcome::default();
            };

            let mut outcome = DispatchOutcome::default();
            if let Some(verdict) = validator.handle_submit(doc, form) {
                outcome.handled = true;
                outcome.default_prevented = verdict.prevent_default();
                outcome.propagation_stopped = verdict.stop_propagation();
            }
            if !outcome.default_prevented {
                outcome.submission = Some(doc.submit_form(form));
            }
            outcome
        })
    }

    /// 等待所有在途的收藏请求结束
    pub async fn settle(&mut self) {
        let tasks: Vec<_> = self.bookmark_tasks.drain(..).collect();
        for result in join_all(tasks).await {
            if let Err(e) = result {
                warn!("⚠️ 收藏任务异常结束: {}", e);
            }
        }
    }

    pub fn timer_running(&self) -> bool {
        self.timer_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// 等待倒计时结束（自动提交之后返回），没有倒计时时立即返回
    pub async fn wait_for_timer(&mut self) {
        if let Some(task) = self.timer_task.take() {
            if let Err(e) = task.await {
                warn!("⚠️ 倒计时任务异常结束: {}", e);
            }
        }
    }

    pub fn summary(&self) -> PageSummary {
        self.document.read(PageSummary::collect)
    }

    /// 中止全部后台任务
    pub fn shutdown(&mut self) {
        if let Some(task) = self.timer_task.take() {
            task.abort();
        }
        for task in self.alert_tasks.drain(..).chain(self.bookmark_tasks.drain(..)) {
            task.abort();
        }
    }
}

impl Drop for QuizPage {
    fn drop(&mut self) {
        self.shutdown();
    }
}
