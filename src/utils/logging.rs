/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use std::fs::{self, File, OpenOptions};
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 初始化 tracing，`RUST_LOG` 优先，否则按 verbose 选择 debug / info
///
/// 重复调用是安全的（测试里会多次调用）
pub fn init(verbose: bool) {
    install(verbose, None);
}

/// 同 `init`，另外把日志（无颜色）追加到 `log_file_path`，文件开头写入时间戳抬头
pub fn init_with_file(verbose: bool, log_file_path: &str) -> AppResult<()> {
    let file = init_log_file(log_file_path)?;
    install(verbose, Some(file));
    Ok(())
}

fn install(verbose: bool, file: Option<File>) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
    });
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init();
}

/// 初始化日志文件：覆盖写入抬头，返回追加模式的句柄
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> AppResult<File> {
    let log_header = format!(
        "{}\n测验页面回放日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|e| AppError::file_write_failed(log_file_path, e))?;
    OpenOptions::new()
        .append(true)
        .open(log_file_path)
        .map_err(|e| AppError::file_write_failed(log_file_path, e))
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, fixture: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 测验页面回放模式");
    info!("📄 页面夹具: {}", fixture);
    info!("🌐 服务端地址: {}", config.base_url);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
