/*!
* 文件名: error.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: thiserror
* 描述: 步骤错误类型定义 / Step error type definitions
*/

use crate::ui::UiError;
use smart_core::CoreError;
use smart_messaging::MessagingError;
use smart_system::SystemError;
use thiserror::Error;

/// 步骤错误类型，每个错误都会成为步骤失败 / Step error; each one fails the step
#[derive(Error, Debug)]
pub enum StepError {
    #[error(transparent)]
    /// 消息错误 / Messaging error
    Messaging(#[from] MessagingError),

    #[error(transparent)]
    /// 系统错误 / System error
    System(#[from] SystemError),

    #[error(transparent)]
    /// 核心错误 / Core error
    Core(#[from] CoreError),

    #[error(transparent)]
    /// UI错误 / UI error
    Ui(#[from] UiError),

    #[error("Assertion failed: {0}")]
    /// 断言失败 / Assertion failed
    AssertionFailed(String),

    #[error("No {0} is configured for this scenario")]
    /// 缺少协作者 / Collaborator missing
    MissingCollaborator(&'static str),

    #[error("Invalid table: {0}")]
    /// 表格格式错误 / Malformed table
    InvalidTable(String),

    #[error("No command has been run in this scenario")]
    /// 尚未执行命令 / No command run yet
    NoCommandRun,
}

impl StepError {
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }
}

/// 步骤结果类型 / Step result type
pub type Result<T> = std::result::Result<T, StepError>;
