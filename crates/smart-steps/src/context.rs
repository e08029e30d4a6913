/*!
* 文件名: context
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: smart-messaging, smart-system
* 描述: 步骤上下文，持有注入的协作者 / Step context holding injected collaborators
*/

use crate::error::{Result, StepError};
use crate::ui::UiDriver;
use smart_core::{ScenarioVariables, VariableStore};
use smart_messaging::MessagingManager;
use smart_system::{LocalCommandRunner, LocalMachineFileSystem, RemoteMachineManager};
use std::sync::Arc;

/// 步骤上下文 / Step context
///
/// 每个场景一个。One per scenario.
pub struct StepContext {
    messaging: Option<Arc<MessagingManager>>,
    file_system: LocalMachineFileSystem,
    runner: LocalCommandRunner,
    remotes: Arc<RemoteMachineManager>,
    ui: Option<Arc<dyn UiDriver>>,
    variables: Arc<dyn VariableStore>,
}

impl StepContext {
    /// 创建只有本地协作者的上下文 / Context with local collaborators only
    pub fn new() -> Self {
        Self {
            messaging: None,
            file_system: LocalMachineFileSystem::new(),
            runner: LocalCommandRunner::new(),
            remotes: Arc::new(RemoteMachineManager::new()),
            ui: None,
            variables: Arc::new(ScenarioVariables::new()),
        }
    }

    pub fn with_messaging(mut self, messaging: Arc<MessagingManager>) -> Self {
        self.messaging = Some(messaging);
        self
    }

    pub fn with_file_system(mut self, file_system: LocalMachineFileSystem) -> Self {
        self.file_system = file_system;
        self
    }

    pub fn with_runner(mut self, runner: LocalCommandRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_remotes(mut self, remotes: Arc<RemoteMachineManager>) -> Self {
        self.remotes = remotes;
        self
    }

    pub fn with_ui(mut self, ui: Arc<dyn UiDriver>) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn with_variables(mut self, variables: Arc<dyn VariableStore>) -> Self {
        self.variables = variables;
        self
    }

    /// 消息管理器 / Messaging manager
    pub fn messaging(&self) -> Result<&MessagingManager> {
        self.messaging
            .as_deref()
            .ok_or(StepError::MissingCollaborator("messaging manager"))
    }

    pub fn file_system(&self) -> &LocalMachineFileSystem {
        &self.file_system
    }

    pub fn runner(&self) -> &LocalCommandRunner {
        &self.runner
    }

    pub fn remotes(&self) -> &RemoteMachineManager {
        &self.remotes
    }

    /// UI驱动 / UI driver
    pub fn ui(&self) -> Result<&dyn UiDriver> {
        self.ui
            .as_deref()
            .ok_or(StepError::MissingCollaborator("UI driver"))
    }

    pub fn variables(&self) -> &dyn VariableStore {
        &*self.variables
    }
}

impl Default for StepContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StepContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepContext")
            .field("messaging", &self.messaging)
            .field("file_system", &self.file_system)
            .field("runner", &self.runner)
            .field("remotes", &self.remotes)
            .field("ui", &self.ui.is_some())
            .finish()
    }
}
