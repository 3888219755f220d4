//! # Quiz Page
//!
//! 测验网站前端交互的 Rust 实现，运行在一个内存文档模型之上
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `dom/` - arena 文档模型、选择器、原生约束校验、共享句柄
//! - `clients/` - 收藏接口的 HTTP 客户端（`BookmarkApi`）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 六个互不依赖的页面行为
//! - `OptionSelector` - 选项选择
//! - `CountdownTimer` - 倒计时与自动提交
//! - `BookmarkToggle` - 收藏切换
//! - `FormValidator` - 表单校验
//! - `AlertDismisser` - 提示框自动关闭
//! - `SearchFilter` - 卡片搜索过滤
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/quiz_page` - 初始化入口、事件分发、后台任务管理
//! - `app` - 从 TOML 夹具加载页面并回放操作
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod dom;
pub mod error;
pub mod markup;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::{BookmarkApi, HttpBookmarkClient};
pub use config::Config;
pub use dom::{Document, DocumentHandle, NodeId};
pub use error::{AppError, AppResult};
pub use models::{BookmarkStatus, PageFixture};
pub use orchestrator::{Collaborators, DispatchOutcome, Event, PageSummary, QuizPage};
pub use services::{Dismissible, RemoveOnDismiss};
