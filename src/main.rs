use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quiz_page::utils::logging;
use quiz_page::{App, Config};

/// 在无头文档上回放测验页面夹具
#[derive(Debug, Parser)]
#[command(name = "quiz-page", version)]
struct Cli {
    /// 页面夹具 (TOML)
    fixture: PathBuf,

    /// 配置文件 (TOML)，环境变量会覆盖其中的值
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 输出详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref()).context("加载配置失败")?;
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    match &config.log_file {
        Some(path) => logging::init_with_file(config.verbose_logging, path)
            .with_context(|| format!("无法创建日志文件: {}", path))?,
        None => logging::init(config.verbose_logging),
    }

    // 初始化并运行应用
    let mut app = App::initialize(config, &cli.fixture)
        .await
        .with_context(|| format!("无法加载页面夹具: {}", cli.fixture.display()))?;
    let summary = app.run().await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
