//! 页面事件
//!
//! 事件从目标元素开始沿祖先链冒泡，各行为按自己绑定的元素认领

use crate::dom::{FormSubmission, NodeId};

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Input,
    Change,
    Submit,
}

/// 派发给页面的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self { kind, target }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn input(target: NodeId) -> Self {
        Self::new(EventKind::Input, target)
    }

    pub fn change(target: NodeId) -> Self {
        Self::new(EventKind::Change, target)
    }

    pub fn submit(target: NodeId) -> Self {
        Self::new(EventKind::Submit, target)
    }
}

/// 派发结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// 是否有行为认领了该事件
    pub handled: bool,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
    /// submit 事件未被阻止时产生的提交
    pub submission: Option<FormSubmission>,
}
