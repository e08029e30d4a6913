/*!
* 文件名: poll.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: None
* 描述: 固定间隔轮询计划 / Fixed-interval polling plan
*/

use std::time::Duration;

/// 默认轮询间隔（秒）/ Default polling interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

/// 轮询计划 / Polling plan
///
/// 等待时间不超过一个间隔时只尝试一次，否则尝试
/// `floor(max_wait / interval)` 次，每次之间间隔固定时长。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPlan {
    attempts: u32,
    interval: Duration,
}

impl PollPlan {
    /// 使用默认间隔创建 / Create with the default interval
    pub fn for_wait(max_wait_secs: u64) -> Self {
        Self::with_interval(max_wait_secs, Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS))
    }

    /// 使用指定间隔创建 / Create with an explicit interval
    ///
    /// 间隔按整秒计算，最小为1秒。Intervals count in whole seconds, at least one.
    pub fn with_interval(max_wait_secs: u64, interval: Duration) -> Self {
        let step = interval.as_secs().max(1);
        let attempts = if max_wait_secs <= step {
            1
        } else {
            u32::try_from(max_wait_secs / step).unwrap_or(u32::MAX)
        };
        Self {
            attempts,
            interval: Duration::from_secs(step),
        }
    }

    /// 尝试次数 / Number of attempts
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// 尝试间隔 / Pause between attempts
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 是否为最后一次尝试（从1开始计数）/ Whether `attempt` (1-based) is the last
    pub fn is_last(&self, attempt: u32) -> bool {
        attempt >= self.attempts
    }

    /// 最坏情况下的等待时长 / Worst-case time spent sleeping
    pub fn worst_case(&self) -> Duration {
        self.interval * self.attempts.saturating_sub(1)
    }
}
