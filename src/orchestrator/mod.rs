//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 把各个行为绑定到同一个文档上，接收事件并分发，管理后台任务的生命周期。
//!
//! ## 模块划分
//!
//! ### `quiz_page` - 页面控制器
//! - 唯一的初始化入口 `QuizPage::init`
//! - 事件冒泡与分发
//! - 持有倒计时、提示框、收藏请求的 `JoinHandle`
//!
//! ### `events` - 事件与派发结果
//!
//! ### `summary` - 页面状态摘要
//!
//! ## 层次关系
//!
//! ```text
//! app (回放夹具)
//!     ↓
//! orchestrator::QuizPage (事件分发 / 任务管理)
//!     ↓
//! services (六个行为)
//!     ↓
//! dom + clients (文档模型 / HTTP)
//! ```

pub mod events;
pub mod quiz_page;
pub mod summary;

pub use events::{DispatchOutcome, Event, EventKind};
pub use quiz_page::{Collaborators, QuizPage};
pub use summary::PageSummary;
