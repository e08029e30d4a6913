/*!
* 文件名: error.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: thiserror
* 描述: 本地与远程机器错误类型定义 / Local and remote machine error type definitions
*/

use std::path::{Path, PathBuf};
use thiserror::Error;

/// 系统模块错误类型 / System error type
#[derive(Error, Debug)]
pub enum SystemError {
    #[error("IO error: {0}")]
    /// IO错误 / IO error
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    /// 文件不存在 / File not found
    FileNotFound(PathBuf),

    #[error("Invalid file pattern '{pattern}': {reason}")]
    /// 无效的匹配模式 / Invalid pattern
    InvalidPattern { pattern: String, reason: String },

    #[error("Command '{command}' timed out after {secs}s")]
    /// 命令超时 / Command timed out
    CommandTimeout { command: String, secs: u64 },

    #[error("Command '{command}' failed: {reason}")]
    /// 命令执行失败 / Command failed
    CommandFailed { command: String, reason: String },

    #[error("Remote machine not found: {0}")]
    /// 远程机器未找到 / Remote machine not found
    RemoteMachineNotFound(String),

    #[error("Remote machine '{machine}' error: {reason}")]
    /// 远程操作错误 / Remote operation error
    Remote { machine: String, reason: String },

    #[error("Path '{path}' escapes root '{}'", root.display())]
    /// 路径越界 / Path escapes the root directory
    PathOutsideRoot { path: String, root: PathBuf },
}

impl SystemError {
    pub fn file_not_found(path: &Path) -> Self {
        Self::FileNotFound(path.to_path_buf())
    }

    pub fn invalid_pattern(pattern: &str, err: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn remote(machine: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Remote {
            machine: machine.into(),
            reason: reason.into(),
        }
    }
}

/// 系统模块结果类型 / System result type
pub type Result<T> = std::result::Result<T, SystemError>;
