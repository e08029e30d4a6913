/*!
* 文件名: error.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: thiserror
* 描述: 消息模块错误类型定义 / Messaging error type definitions
*/

use smart_core::CoreError;
use thiserror::Error;

/// 消息模块错误类型 / Messaging error type
#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Bucket variable '{variable}' was never started")]
    /// 桶未启动 / Bucket never started
    BucketNotStarted { variable: String },

    #[error("Verification of bucket '{bucket}' failed after {attempts} attempt(s): {reason}")]
    /// 验证超时 / Verification timed out
    VerificationTimeout {
        bucket: String,
        attempts: u32,
        reason: String,
    },

    #[error("Delivery via handler '{handler}' failed: {reason}")]
    /// 消息投递失败 / Message delivery failed
    Delivery { handler: String, reason: String },

    #[error("Message handler not found: {name}")]
    /// 消息处理器未找到 / Handler not found
    HandlerNotFound { name: String },

    #[error("Bucket '{bucket}' is not recording on handler '{handler}'")]
    /// 未知的桶 / Unknown bucket
    UnknownBucket { handler: String, bucket: String },

    #[error("Invalid configuration: {0}")]
    /// 无效配置 / Invalid configuration
    InvalidConfiguration(String),

    #[error(transparent)]
    /// 核心错误 / Core error
    Core(#[from] CoreError),

    #[error("Serialization error: {0}")]
    /// 序列化错误 / Serialization error
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    /// IO错误 / IO error
    Io(#[from] std::io::Error),
}

impl MessagingError {
    pub fn bucket_not_started(variable: impl Into<String>) -> Self {
        Self::BucketNotStarted {
            variable: variable.into(),
        }
    }

    pub fn delivery(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Delivery {
            handler: handler.into(),
            reason: reason.into(),
        }
    }

    pub fn handler_not_found(name: impl Into<String>) -> Self {
        Self::HandlerNotFound { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, MessagingError>;
