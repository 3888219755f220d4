use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 服务端地址，收藏接口拼接在其后
    pub base_url: String,
    /// 提示框自动关闭延迟（毫秒）
    pub alert_dismiss_delay_ms: u64,
    /// 倒计时 tick 间隔（毫秒）
    pub timer_tick_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 日志文件，设置后终端日志同时追加写入该文件，为空时不写
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            alert_dismiss_delay_ms: 5000,
            timer_tick_ms: 1000,
            verbose_logging: false,
            log_file: None,
        }
    }
}

impl Config {
    /// 默认值 → 可选的 TOML 文件 → 环境变量
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.merge_env(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件读取，缺省字段取默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(&display, e))?;
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&display, e))
    }

    /// 用环境变量覆盖；变量存在但无法解析时报错
    pub fn merge_env(self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            base_url: lookup("QUIZ_BASE_URL").unwrap_or(self.base_url),
            alert_dismiss_delay_ms: parse_var(&lookup, "ALERT_DISMISS_DELAY_MS", "u64")?
                .unwrap_or(self.alert_dismiss_delay_ms),
            timer_tick_ms: parse_var(&lookup, "TIMER_TICK_MS", "u64")?
                .unwrap_or(self.timer_tick_ms),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
            log_file: lookup("LOG_FILE").or(self.log_file),
        })
    }

    pub fn alert_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_delay_ms)
    }

    /// tick 间隔，0 会被当作 1 毫秒
    pub fn timer_tick(&self) -> Duration {
        Duration::from_millis(self.timer_tick_ms.max(1))
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> AppResult<Option<T>> {
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
    }
}
