use crate::config::Config;
use crate::dom::{DocumentHandle, NodeId};
use crate::error::AppResult;
use crate::models::{load_page_fixture, Action, PageFixture};
use crate::orchestrator::{Collaborators, PageSummary, QuizPage};
use crate::utils::logging;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 应用主结构：加载夹具、初始化页面、回放操作
pub struct App {
    config: Config,
    fixture: PageFixture,
    page: QuizPage,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config, fixture_path: &Path) -> AppResult<Self> {
        logging::log_startup(&config, &fixture_path.display().to_string());

        let fixture = load_page_fixture(fixture_path).await?;
        let collaborators = Collaborators::http(&config)?;
        Ok(Self::with_fixture(config, fixture, collaborators))
    }

    /// 使用已加载的夹具和给定依赖初始化
    pub fn with_fixture(config: Config, fixture: PageFixture, collaborators: Collaborators) -> Self {
        if let Some(title) = &fixture.title {
            info!("📄 页面: {}", title);
        }
        if let Some(path) = &fixture.file_path {
            debug!("夹具来源: {}", path);
        }
        let document = DocumentHandle::new(fixture.build_document());
        let page = QuizPage::init(document, &config, collaborators);
        Self {
            config,
            fixture,
            page,
        }
    }

    /// 依次回放全部操作，结束后等待在途请求并返回摘要
    pub async fn run(&mut self) -> AppResult<PageSummary> {
        let actions = self.fixture.actions.clone();
        info!("▶️ 开始回放 {} 个操作", actions.len());

        for (index, action) in actions.iter().enumerate() {
            self.perform(index + 1, action).await?;
        }

        self.page.settle().await;
        let summary = self.page.summary();
        log_summary(&summary);
        if self.config.verbose_logging {
            info!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Ok(summary)
    }

    fn resolve(&self, selector: &str) -> AppResult<NodeId> {
        self.page.document().read(|doc| doc.select_one(selector))
    }

    async fn perform(&mut self, step: usize, action: &Action) -> AppResult<()> {
        match action {
            Action::Click { target } => {
                let node = self.resolve(target)?;
                let outcome = self.page.click(node);
                info!("[{}] 点击 {} (handled={})", step, target, outcome.handled);
            }
            Action::Input { target, text } => {
                let node = self.resolve(target)?;
                self.page.type_text(node, text);
                info!(
                    "[{}] 在 {} 输入 '{}'",
                    step,
                    target,
                    logging::truncate_text(text, 40)
                );
            }
            Action::Select { target, value } => {
                let node = self.resolve(target)?;
                self.page.select_option(node, value);
                info!("[{}] 在 {} 选择 '{}'", step, target, value);
            }
            Action::Submit { target } => {
                let node = self.resolve(target)?;
                let outcome = self.page.submit(node);
                if outcome.submission.is_some() {
                    info!("[{}] 提交 {} 成功", step, target);
                } else {
                    warn!("[{}] 提交 {} 被阻止", step, target);
                }
            }
            Action::Wait { ms } => {
                info!("[{}] 等待 {} 毫秒", step, ms);
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
        }
        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_summary(summary: &PageSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 回放结束");
    if let Some(timer) = &summary.timer {
        info!("⏱️ 倒计时: {}", timer);
    }
    info!("✅ 已作答: {} 题", summary.selections.len());
    info!("🔖 已收藏: {:?}", summary.bookmarked);
    info!(
        "🗂️ 卡片: 显示 {} / 隐藏 {}",
        summary.visible_cards.len(),
        summary.hidden_cards
    );
    info!("📨 表单提交: {} 次", summary.submissions.len());
    info!("💬 剩余提示框: {}", summary.alerts_remaining);
    info!("{}", "=".repeat(60));
}
