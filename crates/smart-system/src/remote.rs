/*!
* 文件名: remote
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: async-trait, dashmap, tokio::fs
* 描述: 远程机器抽象、注册表与挂载目录实现 / Remote machine trait, registry and mounted-directory implementation
*/

use crate::error::{Result, SystemError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// 远程机器 / Remote machine
///
/// 远程路径使用 `/` 分隔。Remote paths are `/`-separated.
#[async_trait]
pub trait RemoteMachine: Send + Sync {
    /// 机器名称 / Machine name
    fn name(&self) -> &str;

    /// 上传本地文件 / Upload a local file
    async fn upload(&self, local: &Path, remote: &str) -> Result<()>;

    /// 下载远程文件 / Download a remote file
    async fn download(&self, remote: &str, local: &Path) -> Result<()>;

    /// 删除远程文件 / Delete a remote file
    async fn delete(&self, remote: &str) -> Result<()>;

    /// 远程文件是否存在 / Whether a remote file exists
    async fn exists(&self, remote: &str) -> Result<bool>;

    /// 列出远程目录下的条目名称（已排序）/ Sorted entry names of a remote directory
    async fn list(&self, remote_dir: &str) -> Result<Vec<String>>;
}

/// 远程机器注册表 / Remote machine registry
#[derive(Default)]
pub struct RemoteMachineManager {
    machines: DashMap<String, Arc<dyn RemoteMachine>>,
}

impl RemoteMachineManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册远程机器 / Register a machine, replacing any namesake
    pub fn register(&self, machine: Arc<dyn RemoteMachine>) {
        let name = machine.name().to_string();
        if self.machines.insert(name.clone(), machine).is_some() {
            warn!("Replaced remote machine {}", name);
        } else {
            info!("Registered remote machine {}", name);
        }
    }

    /// 获取远程机器 / Get a machine by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn RemoteMachine>> {
        self.machines
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| SystemError::RemoteMachineNotFound(name.to_string()))
    }

    pub fn remove(&self, name: &str) -> Option<Arc<dyn RemoteMachine>> {
        self.machines.remove(name).map(|(_, machine)| machine)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.machines.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

impl std::fmt::Debug for RemoteMachineManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteMachineManager")
            .field("machines", &self.names())
            .finish()
    }
}

/// 挂载目录形式的远程机器 / Remote machine backed by a locally mounted directory
///
/// 所有路径都限制在根目录内。Every path stays inside the root.
#[derive(Debug, Clone)]
pub struct MountedRemoteMachine {
    name: String,
    root: PathBuf,
}

impl MountedRemoteMachine {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 把远程路径解析到根目录下 / Resolve a remote path under the root
    pub fn resolve(&self, remote: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        for component in Path::new(remote.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(SystemError::PathOutsideRoot {
                        path: remote.to_string(),
                        root: self.root.clone(),
                    })
                }
            }
        }
        Ok(resolved)
    }

    fn missing(&self, remote: &str) -> impl FnOnce(std::io::Error) -> SystemError + '_ {
        let remote = remote.to_string();
        move |err| {
            if err.kind() == ErrorKind::NotFound {
                SystemError::remote(&self.name, format!("'{}' does not exist", remote))
            } else {
                SystemError::Io(err)
            }
        }
    }
}

#[async_trait]
impl RemoteMachine for MountedRemoteMachine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upload(&self, local: &Path, remote: &str) -> Result<()> {
        let target = self.resolve(remote)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(local, &target).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                SystemError::file_not_found(local)
            } else {
                SystemError::Io(err)
            }
        })?;
        info!("Uploaded {} to {}:{}", local.display(), self.name, remote);
        Ok(())
    }

    async fn download(&self, remote: &str, local: &Path) -> Result<()> {
        let source = self.resolve(remote)?;
        if let Some(parent) = local.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(&source, local).await.map_err(self.missing(remote))?;
        info!("Downloaded {}:{} to {}", self.name, remote, local.display());
        Ok(())
    }

    async fn delete(&self, remote: &str) -> Result<()> {
        let target = self.resolve(remote)?;
        fs::remove_file(&target).await.map_err(self.missing(remote))?;
        debug!("Deleted {}:{}", self.name, remote);
        Ok(())
    }

    async fn exists(&self, remote: &str) -> Result<bool> {
        Ok(fs::try_exists(self.resolve(remote)?).await?)
    }

    async fn list(&self, remote_dir: &str) -> Result<Vec<String>> {
        let dir = self.resolve(remote_dir)?;
        let mut entries = fs::read_dir(&dir).await.map_err(self.missing(remote_dir))?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
