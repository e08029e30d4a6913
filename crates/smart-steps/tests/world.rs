//! 特性测试的场景状态 / Scenario state for the feature suite

use async_trait::async_trait;
use cucumber::World;
use smart_messaging::{BucketRegistry, MessagingConfig, MessagingManager};
use smart_steps::{SmartSteps, StepContext, UiDriver, UiError, UiResult};
use smart_system::{LocalCommandRunner, MountedRemoteMachine, RemoteMachineManager};
use std::sync::{Arc, Mutex, OnceLock};
use tempfile::TempDir;

/// 所有场景共享一个桶序列 / Every scenario shares one bucket sequence
fn shared_buckets() -> Arc<BucketRegistry> {
    static BUCKETS: OnceLock<Arc<BucketRegistry>> = OnceLock::new();
    Arc::clone(BUCKETS.get_or_init(|| Arc::new(BucketRegistry::new())))
}

/// 记录动作的假浏览器 / Fake browser that records actions
#[derive(Debug, Default)]
pub struct FakeBrowser {
    pub actions: Mutex<Vec<String>>,
    title: Mutex<String>,
}

impl FakeBrowser {
    fn record(&self, action: String) {
        self.actions.lock().unwrap().push(action);
    }
}

#[async_trait]
impl UiDriver for FakeBrowser {
    async fn click(&self, locator: &str) -> UiResult<()> {
        if !locator.starts_with('#') {
            return Err(UiError::ElementNotFound(locator.to_string()));
        }
        self.record(format!("click {}", locator));
        Ok(())
    }

    async fn type_text(&self, locator: &str, text: &str) -> UiResult<()> {
        self.record(format!("type {} {}", locator, text));
        Ok(())
    }

    async fn press_key(&self, key: &str) -> UiResult<()> {
        self.record(format!("key {}", key));
        Ok(())
    }

    async fn switch_to_window(&self, window: &str) -> UiResult<()> {
        *self.title.lock().unwrap() = window.to_string();
        self.record(format!("window {}", window));
        Ok(())
    }

    async fn switch_to_frame(&self, frame: &str) -> UiResult<()> {
        self.record(format!("frame {}", frame));
        Ok(())
    }

    async fn switch_to_default_content(&self) -> UiResult<()> {
        self.record("default content".to_string());
        Ok(())
    }

    async fn window_title(&self) -> UiResult<String> {
        Ok(self.title.lock().unwrap().clone())
    }
}

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct SmartWorld {
    pub steps: SmartSteps,
    pub browser: Arc<FakeBrowser>,
    pub workdir: TempDir,
    pub last_error: Option<String>,
}

impl SmartWorld {
    fn new() -> Self {
        let workdir = TempDir::new().expect("temp dir");
        let config = MessagingConfig::new()
            .with_memory_handler("memory", 0)
            .with_memory_handler("slow", 1500);
        let messaging = MessagingManager::from_config(&config, shared_buckets())
            .expect("messaging manager");

        let remotes = RemoteMachineManager::new();
        remotes.register(Arc::new(MountedRemoteMachine::new(
            "staging",
            workdir.path().join("staging"),
        )));

        let browser = Arc::new(FakeBrowser::default());
        let context = StepContext::new()
            .with_messaging(Arc::new(messaging))
            .with_runner(LocalCommandRunner::new().with_working_dir(workdir.path()))
            .with_remotes(Arc::new(remotes))
            .with_ui(browser.clone());

        let steps = SmartSteps::new(context);
        steps.set_variable("workdir", &workdir.path().display().to_string());

        Self {
            steps,
            browser,
            workdir,
            last_error: None,
        }
    }

    /// 记录预期中的失败 / Keep a failure the scenario expects
    pub fn capture<T>(&mut self, result: smart_steps::Result<T>) {
        self.last_error = result.err().map(|e| e.to_string());
    }
}
