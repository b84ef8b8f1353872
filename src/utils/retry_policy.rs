// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 重试策略配置
///
/// 固定间隔、有限次数的重试，用于启动时等待数据库就绪
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大尝试次数（包含第一次）
    pub max_attempts: u32,
    /// 两次尝试之间的间隔
    pub delay: Duration,
}

impl RetryPolicy {
    /// 创建固定间隔的重试策略
    ///
    /// `max_attempts` 至少为 1
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// 下次重试前的等待时间
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 第 `attempt` 次尝试失败后是否还应继续
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
