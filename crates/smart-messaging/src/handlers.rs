/*!
* 文件名: handlers
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: dashmap
* 描述: 消息处理器注册表与工厂 / Message handler registry and factory
*/

use crate::config::{HandlerConfig, MessagingConfig};
use crate::error::{MessagingError, Result};
use crate::handler::MessageHandler;
use crate::memory::InMemoryMessageHandler;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 根据配置创建处理器 / Create a handler from its configuration
///
/// 必须在Tokio运行时内调用。Must run inside a Tokio runtime.
pub fn handler_factory(config: &HandlerConfig) -> Arc<dyn MessageHandler> {
    match config {
        HandlerConfig::Memory(config) => Arc::new(InMemoryMessageHandler::with_delivery_delay(
            config.name.clone(),
            Duration::from_millis(config.delivery_delay_ms),
        )),
    }
}

/// 消息处理器注册表 / Message handler registry
///
/// 显式的名称到实例映射。Explicit name to instance map.
#[derive(Default)]
pub struct MessageHandlerRegistry {
    handlers: DashMap<String, Arc<dyn MessageHandler>>,
}

impl MessageHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 根据配置创建所有处理器 / Build every configured handler
    pub fn from_config(config: &MessagingConfig) -> Result<Self> {
        config.validate()?;
        let registry = Self::new();
        for handler in &config.handlers {
            registry.register(handler_factory(handler));
        }
        info!("Registered {} message handler(s)", registry.len());
        Ok(registry)
    }

    /// 注册处理器，同名处理器会被替换 / Register a handler, replacing any namesake
    pub fn register(&self, handler: Arc<dyn MessageHandler>) {
        let name = handler.name().to_string();
        if self.handlers.insert(name.clone(), handler).is_some() {
            warn!("Replaced message handler {}", name);
        }
    }

    /// 获取处理器 / Get a handler
    pub fn get(&self, name: &str) -> Result<Arc<dyn MessageHandler>> {
        self.handlers
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| MessagingError::handler_not_found(name))
    }

    /// 移除处理器 / Remove a handler
    pub fn remove(&self, name: &str) -> Option<Arc<dyn MessageHandler>> {
        self.handlers.remove(name).map(|(_, handler)| handler)
    }

    /// 所有处理器名称（已排序）/ Sorted handler names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for MessageHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageHandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config() {
        let config = MessagingConfig::new()
            .with_memory_handler("orders", 0)
            .with_memory_handler("audit", 5);
        let registry = MessageHandlerRegistry::from_config(&config).unwrap();
        assert_eq!(registry.names(), vec!["audit".to_string(), "orders".to_string()]);
        assert_eq!(registry.get("orders").unwrap().name(), "orders");
    }

    #[tokio::test]
    async fn test_missing_handler() {
        let registry = MessageHandlerRegistry::new();
        assert!(registry.is_empty());
        let err = registry.get("ghost").err().unwrap();
        assert!(matches!(err, MessagingError::HandlerNotFound { ref name } if name == "ghost"));
    }

    #[tokio::test]
    async fn test_register_replaces_and_remove() {
        let registry = MessageHandlerRegistry::new();
        registry.register(Arc::new(InMemoryMessageHandler::new("q")));
        registry.register(Arc::new(InMemoryMessageHandler::new("q")));
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("q").is_some());
        assert!(registry.get("q").is_err());
    }
}
