/*!
* 文件名: local_fs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: tokio::fs, regex
* 描述: 本地文件系统操作 / Local file system operations
*/

use crate::error::{Result, SystemError};
use regex::Regex;
use smart_core::{PollPlan, DEFAULT_POLL_INTERVAL_SECS};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

/// 编译文件名匹配模式 / Compile a file name pattern
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| SystemError::invalid_pattern(pattern, e))
}

/// 把NotFound映射为FileNotFound / Map NotFound onto FileNotFound
fn not_found(path: &Path) -> impl FnOnce(std::io::Error) -> SystemError + '_ {
    move |err| {
        if err.kind() == ErrorKind::NotFound {
            SystemError::file_not_found(path)
        } else {
            SystemError::Io(err)
        }
    }
}

/// 本地文件系统 / Local machine file system
#[derive(Debug, Clone, Copy)]
pub struct LocalMachineFileSystem {
    poll_interval: Duration,
}

impl LocalMachineFileSystem {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    /// 设置等待文件时的轮询间隔 / Set the poll interval used by `wait_for_file`
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// 写入文件，必要时创建父目录 / Write a file, creating parent directories
    pub async fn write_file(&self, path: impl AsRef<Path>, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    /// 读取文件内容 / Read a file to a string
    pub async fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).await.map_err(not_found(path))
    }

    /// 删除文件 / Delete a file
    pub async fn delete_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::remove_file(path).await.map_err(not_found(path))?;
        info!("Deleted {}", path.display());
        Ok(())
    }

    /// 查找目录下文件名匹配的文件（不递归，已排序）
    /// Files directly under `dir` whose name matches `pattern`, sorted
    pub async fn find_files(&self, dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let regex = compile_pattern(pattern)?;
        let mut entries = fs::read_dir(dir).await.map_err(not_found(dir))?;
        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if regex.is_match(&entry.file_name().to_string_lossy()) {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }

    /// 删除匹配的文件并返回数量 / Delete matching files, returning how many went
    pub async fn delete_files_matching(
        &self,
        dir: impl AsRef<Path>,
        pattern: &str,
    ) -> Result<usize> {
        let dir = dir.as_ref();
        let files = self.find_files(dir, pattern).await?;
        for file in &files {
            fs::remove_file(file).await?;
        }
        info!(
            "Deleted {} file(s) matching '{}' in {}",
            files.len(),
            pattern,
            dir.display()
        );
        Ok(files.len())
    }

    /// 文件是否存在 / Whether a file exists
    pub async fn file_exists(&self, path: impl AsRef<Path>) -> Result<bool> {
        Ok(fs::try_exists(path.as_ref()).await?)
    }

    /// 文件内容是否包含文本 / Whether a file contains `text`
    pub async fn file_contains(&self, path: impl AsRef<Path>, text: &str) -> Result<bool> {
        Ok(self.read_file(path).await?.contains(text))
    }

    /// 等待文件出现 / Wait for a file to appear
    ///
    /// 与消息桶验证使用相同的轮询节奏。Uses the same cadence as bucket verification.
    pub async fn wait_for_file(&self, path: impl AsRef<Path>, max_wait_secs: u64) -> Result<u32> {
        let path = path.as_ref();
        let plan = PollPlan::with_interval(max_wait_secs, self.poll_interval);
        for attempt in 1..=plan.attempts() {
            if self.file_exists(path).await? {
                debug!("Found {} on attempt {}", path.display(), attempt);
                return Ok(attempt);
            }
            if !plan.is_last(attempt) {
                tokio::time::sleep(plan.interval()).await;
            }
        }
        Err(SystemError::file_not_found(path))
    }
}

impl Default for LocalMachineFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_read_delete() {
        let dir = TempDir::new().unwrap();
        let fs = LocalMachineFileSystem::new();
        let path = dir.path().join("nested/out.txt");

        fs.write_file(&path, "hello file").await.unwrap();
        assert_eq!(fs.read_file(&path).await.unwrap(), "hello file");
        assert!(fs.file_contains(&path, "file").await.unwrap());
        assert!(!fs.file_contains(&path, "nope").await.unwrap());

        fs.delete_file(&path).await.unwrap();
        assert!(!fs.file_exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let fs = LocalMachineFileSystem::new();
        let path = dir.path().join("ghost.txt");
        assert!(matches!(
            fs.delete_file(&path).await,
            Err(SystemError::FileNotFound(_))
        ));
        assert!(matches!(
            fs.read_file(&path).await,
            Err(SystemError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_and_delete_matching() {
        let dir = TempDir::new().unwrap();
        let fs = LocalMachineFileSystem::new();
        for name in ["a.log", "b.log", "keep.txt"] {
            fs.write_file(dir.path().join(name), name).await.unwrap();
        }
        fs.write_file(dir.path().join("sub/c.log"), "c").await.unwrap();

        let found = fs.find_files(dir.path(), r"\.log$").await.unwrap();
        assert_eq!(found, vec![dir.path().join("a.log"), dir.path().join("b.log")]);

        let deleted = fs.delete_files_matching(dir.path(), r"\.log$").await.unwrap();
        assert_eq!(deleted, 2);
        assert!(fs.file_exists(dir.path().join("keep.txt")).await.unwrap());
        assert!(fs.file_exists(dir.path().join("sub/c.log")).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let err = LocalMachineFileSystem::new()
            .find_files(dir.path(), "(")
            .await
            .unwrap_err();
        assert!(matches!(err, SystemError::InvalidPattern { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_missing_file_polls_plan() {
        let dir = TempDir::new().unwrap();
        let start = tokio::time::Instant::now();
        let err = LocalMachineFileSystem::new()
            .wait_for_file(dir.path().join("late.txt"), 6)
            .await
            .unwrap_err();
        assert!(matches!(err, SystemError::FileNotFound(_)));
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_wait_for_existing_file() {
        let dir = TempDir::new().unwrap();
        let fs = LocalMachineFileSystem::new();
        let path = dir.path().join("ready.txt");
        fs.write_file(&path, "").await.unwrap();
        assert_eq!(fs.wait_for_file(&path, 10).await.unwrap(), 1);
    }
}
