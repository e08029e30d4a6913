/*!
* 文件名: config
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: serde, serde_json
* 描述: 消息模块配置 / Messaging configuration
*/

use crate::error::{MessagingError, Result};
use serde::{Deserialize, Serialize};
use smart_core::DEFAULT_POLL_INTERVAL_SECS;
use std::path::Path;
use std::time::Duration;

/// 内存处理器配置 / In-memory handler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryHandlerConfig {
    /// 处理器名称 / Handler name
    pub name: String,
    /// 投递延迟（毫秒）/ Delivery delay in milliseconds
    #[serde(default)]
    pub delivery_delay_ms: u64,
}

/// 消息处理器配置枚举 / Message handler configuration enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HandlerConfig {
    /// 内存回环 / In-memory loopback
    #[serde(rename = "memory")]
    Memory(MemoryHandlerConfig),
}

impl HandlerConfig {
    /// 获取处理器名称 / Get handler name
    pub fn name(&self) -> &str {
        match self {
            HandlerConfig::Memory(config) => &config.name,
        }
    }
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

/// 消息模块配置 / Messaging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// 轮询间隔（秒）/ Polling interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// 处理器列表 / Handlers
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            handlers: Vec::new(),
        }
    }
}

impl MessagingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    pub fn with_handler(mut self, handler: HandlerConfig) -> Self {
        self.handlers.push(handler);
        self
    }

    /// 添加内存处理器 / Add an in-memory handler
    pub fn with_memory_handler(self, name: impl Into<String>, delivery_delay_ms: u64) -> Self {
        self.with_handler(HandlerConfig::Memory(MemoryHandlerConfig {
            name: name.into(),
            delivery_delay_ms,
        }))
    }

    /// 轮询间隔 / Polling interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// 从JSON文本解析 / Parse from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载 / Load from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 校验配置 / Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(MessagingError::InvalidConfiguration(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for handler in &self.handlers {
            if handler.name().is_empty() {
                return Err(MessagingError::InvalidConfiguration(
                    "handler name must not be empty".to_string(),
                ));
            }
            if !seen.insert(handler.name()) {
                return Err(MessagingError::InvalidConfiguration(format!(
                    "handler {} is configured twice",
                    handler.name()
                )));
            }
        }
        Ok(())
    }
}
