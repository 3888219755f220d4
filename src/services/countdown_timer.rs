//! 倒计时 - 业务能力层
//!
//! 每个 tick 渲染 `MM:SS`，耗尽时停止并提交答题表单（只提交一次）

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

use crate::dom::{Document, DocumentHandle};
use crate::markup;
use crate::models::{Countdown, TimerBinding};

/// 倒计时器
#[derive(Debug)]
pub struct CountdownTimer {
    binding: TimerBinding,
    countdown: Countdown,
    tick: Duration,
}

impl CountdownTimer {
    /// 页面上有 `#quiz-timer` 且时限可解析时才启用
    pub fn bind(doc: &Document, tick: Duration) -> Option<Self> {
        let node = doc.get_element_by_id(markup::TIMER_ID)?;
        match TimerBinding::parse(doc, node) {
            Ok(binding) => Some(Self {
                binding,
                countdown: Countdown::from_minutes(binding.time_limit_minutes),
                tick,
            }),
            Err(e) => {
                warn!("⚠️ 倒计时未启用: {}", e);
                None
            }
        }
    }

    pub fn binding(&self) -> TimerBinding {
        self.binding
    }

    /// 在后台运行，第一次 tick 发生在一个间隔之后
    pub fn spawn(self, document: DocumentHandle) -> JoinHandle<()> {
        info!(
            "⏱️ 倒计时启动: {} 分钟",
            self.binding.time_limit_minutes
        );
        tokio::spawn(self.run(document))
    }

    async fn run(mut self, document: DocumentHandle) {
        let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
        loop {
            ticker.tick().await;
            let tick = self.countdown.tick();
            let node = self.binding.node;
            document.write(|doc| {
                doc.set_text_content(node, &tick.display);
                if tick.expired {
                    submit_quiz_form(doc);
                }
            });
            if tick.expired {
                break;
            }
        }
    }
}

fn submit_quiz_form(doc: &mut Document) {
    match doc.get_element_by_id(markup::QUIZ_FORM_ID) {
        Some(form) => {
            let submission = doc.submit_form(form);
            info!("⏰ 时间到，已自动提交 {} 个字段", submission.fields.len());
        }
        None => debug!("未找到 #{}，跳过自动提交", markup::QUIZ_FORM_ID),
    }
}
