/*!
* 文件名: lib
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: None
* 描述: 本地与远程机器操作 / Local and remote machine operations
*/

pub mod error;
pub mod local_fs;
pub mod remote;
pub mod shell;

// 重新导出主要类型
pub use error::{Result, SystemError};
pub use local_fs::LocalMachineFileSystem;
pub use remote::{MountedRemoteMachine, RemoteMachine, RemoteMachineManager};
pub use shell::{CommandOutput, LocalCommandRunner, DEFAULT_COMMAND_TIMEOUT_SECS};
