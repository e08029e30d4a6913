/*!
* 文件名: shell
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: tokio::process, regex
* 描述: 本地Shell命令执行 / Local shell command runner
*/

use crate::error::{Result, SystemError};
use crate::local_fs::compile_pattern;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

/// 默认命令超时（秒）/ Default command timeout in seconds
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;

/// 命令输出 / Command output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// 退出码，被信号终止时为None / Exit code, None when killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// 是否以0退出 / Whether the command exited with 0
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// 标准输出是否匹配正则 / Whether stdout matches `pattern`
    pub fn output_matches(&self, pattern: &str) -> Result<bool> {
        Ok(compile_pattern(pattern)?.is_match(&self.stdout))
    }
}

/// 本地命令执行器 / Local command runner
///
/// 命令行交给平台Shell执行（`sh -c` 或 `cmd /C`）。
/// The command line goes through the platform shell (`sh -c` or `cmd /C`).
#[derive(Debug, Clone)]
pub struct LocalCommandRunner {
    timeout: Duration,
    working_dir: Option<PathBuf>,
}

impl LocalCommandRunner {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            working_dir: None,
        }
    }

    /// 设置超时时间 / Set timeout duration
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 设置工作目录 / Set working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn shell_command(command_line: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command_line);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command_line);
            cmd
        }
    }

    /// 执行命令行 / Run a command line
    ///
    /// 非零退出码不是错误，由调用方通过 `succeeded` 判断。
    /// A non-zero exit is not an error; callers check `succeeded`.
    pub async fn run(&self, command_line: &str) -> Result<CommandOutput> {
        let mut cmd = Self::shell_command(command_line);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!("Running command: {}", command_line);
        let child = cmd.spawn().map_err(|e| SystemError::CommandFailed {
            command: command_line.to_string(),
            reason: e.to_string(),
        })?;

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| SystemError::CommandTimeout {
                command: command_line.to_string(),
                secs: self.timeout.as_secs(),
            })??;

        let output = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        info!(
            "Command '{}' exited with {:?}",
            command_line, output.exit_code
        );
        Ok(output)
    }
}

impl Default for LocalCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_echo() {
        let output = LocalCommandRunner::new().run("echo hello").await.unwrap();
        assert!(output.succeeded());
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.output_matches("^hel+o").unwrap());
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported_not_raised() {
        let output = LocalCommandRunner::new()
            .run("echo oops >&2; exit 3")
            .await
            .unwrap();
        assert!(!output.succeeded());
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[tokio::test]
    async fn test_working_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let output = LocalCommandRunner::new()
            .with_working_dir(dir.path())
            .run("ls")
            .await
            .unwrap();
        assert!(output.stdout.contains("marker.txt"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let err = LocalCommandRunner::new()
            .with_timeout(Duration::from_millis(100))
            .run("sleep 5")
            .await
            .unwrap_err();
        assert!(matches!(err, SystemError::CommandTimeout { .. }));
    }
}
