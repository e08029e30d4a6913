/*!
* 文件名: lib
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: None
* 描述: 消息桶录制与轮询验证 / Message bucket recording and polling verification
*/

pub mod bucket;
pub mod config;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod manager;
pub mod memory;
pub mod verifier;

// 重新导出主要类型
pub use bucket::{Bucket, BucketId, BucketRegistry};
pub use config::{HandlerConfig, MemoryHandlerConfig, MessagingConfig};
pub use error::{MessagingError, Result};
pub use handler::{MessageHandler, RecordedMessage};
pub use handlers::{handler_factory, MessageHandlerRegistry};
pub use manager::MessagingManager;
pub use memory::InMemoryMessageHandler;
pub use verifier::{Expectation, PollingVerifier, Verification};
