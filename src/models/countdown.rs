//! 倒计时状态

/// 一次 tick 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// 本次应显示的 `MM:SS`
    pub display: String,
    /// 本次 tick 后应停止计时并提交表单
    pub expired: bool,
}

/// 剩余秒数
///
/// 先渲染、再判断是否耗尽、最后递减：耗尽判断使用递减前的值，
/// 所以 `00:00` 会在提交的那一拍显示出来
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: i64,
}

impl Countdown {
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            remaining: i64::from(minutes) * 60,
        }
    }

    pub fn tick(&mut self) -> Tick {
        let tick = Tick {
            display: format_clock(self.remaining),
            expired: self.remaining <= 0,
        };
        self.remaining -= 1;
        tick
    }
}

/// 格式化为零填充的 `MM:SS`，超过 99 分钟时分钟位会变宽
pub fn format_clock(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(100 * 60 + 1), "100:01");
    }

    #[test]
    fn one_minute_runs_sixty_one_ticks() {
        let mut countdown = Countdown::from_minutes(1);
        let ticks: Vec<Tick> = (0..61).map(|_| countdown.tick()).collect();

        assert_eq!(ticks[0].display, "01:00");
        assert_eq!(ticks[1].display, "00:59");
        assert_eq!(ticks[59].display, "00:01");
        assert_eq!(ticks[60].display, "00:00");
        assert!(ticks[..60].iter().all(|t| !t.expired));
        assert!(ticks[60].expired);
    }

    #[test]
    fn zero_limit_expires_on_first_tick() {
        let mut countdown = Countdown::from_minutes(0);
        let tick = countdown.tick();
        assert_eq!(tick.display, "00:00");
        assert!(tick.expired);
    }
}
