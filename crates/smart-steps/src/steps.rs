/*!
* 文件名: steps
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: smart-core, smart-messaging, smart-system
* 描述: 步骤胶水，每个句式对应一个方法 / Step glue, one method per sentence pattern
*/

use crate::context::StepContext;
use crate::error::{Result, StepError};
use crate::table::{parse_criteria_table, parse_key_value_table};
use serde_json::Value;
use smart_core::document::value_text;
use smart_core::{Criterion, Outcome, ValueMatchOperator, VariableRender, VariableStore};
use smart_messaging::{BucketId, Verification};
use smart_system::CommandOutput;
use std::path::PathBuf;
use tracing::{debug, info};

/// 用操作符比较文本 / Compare text with an operator
fn check_text(
    subject: &str,
    actual: &str,
    operator: ValueMatchOperator,
    expected: &str,
) -> Result<()> {
    let criterion = Criterion::new("$", operator, expected);
    match criterion.evaluate(&Value::String(actual.to_string()))? {
        Outcome::Passed => Ok(()),
        Outcome::Failed { .. } => Err(StepError::assertion(format!(
            "{} should {} '{}' but was '{}'",
            subject,
            operator.phrase(),
            expected,
            actual
        ))),
    }
}

/// 步骤胶水 / Step glue
///
/// 所有文本参数在使用前都会渲染 `${var}` 占位符。
/// Every textual argument has its `${var}` placeholders rendered first.
#[derive(Debug)]
pub struct SmartSteps {
    context: StepContext,
    render: VariableRender,
    last_output: Option<CommandOutput>,
}

impl SmartSteps {
    pub fn new(context: StepContext) -> Self {
        Self {
            context,
            render: VariableRender::new(),
            last_output: None,
        }
    }

    pub fn context(&self) -> &StepContext {
        &self.context
    }

    fn render(&self, text: &str) -> String {
        self.render.render(text, self.context.variables())
    }

    fn render_path(&self, path: &str) -> PathBuf {
        PathBuf::from(self.render(path))
    }

    // ---------------------------------------------------------------
    // 消息 / Messaging
    // ---------------------------------------------------------------

    /// "I start recording messages from {handler} into {variable}"
    pub async fn start_recording(&self, handler: &str, variable: &str) -> Result<BucketId> {
        let bucket = self
            .context
            .messaging()?
            .start_recording(&self.render(handler), variable, self.context.variables())
            .await?;
        Ok(bucket.id)
    }

    /// "I send {content} as {content_type} via {handler}"
    pub async fn send_message(
        &self,
        handler: &str,
        content: &str,
        content_type: &str,
        aux_type: Option<&str>,
    ) -> Result<()> {
        let aux_type = aux_type.map(|aux| self.render(aux));
        self.context
            .messaging()?
            .send_message(
                &self.render(handler),
                content,
                &self.render(content_type),
                aux_type.as_deref(),
                self.context.variables(),
            )
            .await?;
        Ok(())
    }

    /// "bucket {variable} should contain {operator} {expected} messages within {secs} seconds"
    pub async fn assert_bucket_size(
        &self,
        variable: &str,
        operator: &str,
        expected: i64,
        max_wait_secs: u64,
    ) -> Result<Verification> {
        let operator = ValueMatchOperator::parse_numeric(operator)?;
        Ok(self
            .context
            .messaging()?
            .assert_size(variable, operator, expected, max_wait_secs, self.context.variables())
            .await?)
    }

    /// "bucket {variable} should match within {secs} seconds:" + criteria table
    pub async fn assert_bucket_criteria(
        &self,
        variable: &str,
        rows: &[Vec<String>],
        max_wait_secs: u64,
    ) -> Result<Verification> {
        let criteria = parse_criteria_table(rows)?;
        Ok(self
            .context
            .messaging()?
            .assert_criteria(variable, criteria, max_wait_secs, self.context.variables())
            .await?)
    }

    /// "I store {path} of bucket {variable} as {target}"
    pub async fn store_bucket_value(
        &self,
        variable: &str,
        path: &str,
        target: &str,
    ) -> Result<String> {
        let path = self.render(path);
        let value = self
            .context
            .messaging()?
            .select_from_bucket(variable, &path, self.context.variables())
            .await?;
        if value.is_null() {
            return Err(StepError::assertion(format!(
                "nothing at '{}' in bucket '{}'",
                path, variable
            )));
        }
        let text = value_text(&value);
        self.context.variables().set(target, text.clone());
        debug!("Stored {} = {}", target, text);
        Ok(text)
    }

    /// 停止所有录制 / Stop every recording
    pub async fn stop_recordings(&self) -> Result<()> {
        Ok(self.context.messaging()?.stop_all().await?)
    }

    // ---------------------------------------------------------------
    // 本地机器 / Local machine
    // ---------------------------------------------------------------

    /// "I write {content} to file {path}"
    pub async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        Ok(self
            .context
            .file_system()
            .write_file(self.render_path(path), &self.render(content))
            .await?)
    }

    /// "I delete file {path}"
    pub async fn delete_file(&self, path: &str) -> Result<()> {
        Ok(self
            .context
            .file_system()
            .delete_file(self.render_path(path))
            .await?)
    }

    /// "I delete files matching {pattern} in {dir}"
    pub async fn delete_files_matching(&self, dir: &str, pattern: &str) -> Result<usize> {
        Ok(self
            .context
            .file_system()
            .delete_files_matching(self.render_path(dir), &self.render(pattern))
            .await?)
    }

    /// "file {path} should exist within {secs} seconds"
    pub async fn assert_file_exists(&self, path: &str, max_wait_secs: u64) -> Result<()> {
        self.context
            .file_system()
            .wait_for_file(self.render_path(path), max_wait_secs)
            .await?;
        Ok(())
    }

    /// "file {path} should not exist"
    pub async fn assert_file_absent(&self, path: &str) -> Result<()> {
        let path = self.render_path(path);
        if self.context.file_system().file_exists(&path).await? {
            return Err(StepError::assertion(format!(
                "file '{}' should not exist",
                path.display()
            )));
        }
        Ok(())
    }

    /// "file {path} should contain {text}"
    pub async fn assert_file_contains(&self, path: &str, text: &str) -> Result<()> {
        let path = self.render_path(path);
        let text = self.render(text);
        if !self.context.file_system().file_contains(&path, &text).await? {
            return Err(StepError::assertion(format!(
                "file '{}' should contain '{}'",
                path.display(),
                text
            )));
        }
        Ok(())
    }

    /// "{dir} should hold {expected} files matching {pattern}"
    pub async fn assert_file_count(&self, dir: &str, pattern: &str, expected: usize) -> Result<()> {
        let found = self
            .context
            .file_system()
            .find_files(self.render_path(dir), &self.render(pattern))
            .await?;
        if found.len() != expected {
            return Err(StepError::assertion(format!(
                "expected {} file(s) matching '{}' but found {}",
                expected,
                pattern,
                found.len()
            )));
        }
        Ok(())
    }

    /// "I run {command}"
    pub async fn run_command(&mut self, command_line: &str) -> Result<&CommandOutput> {
        let command_line = self.render(command_line);
        let output = self.context.runner().run(&command_line).await?;
        Ok(&*self.last_output.insert(output))
    }

    fn last_output(&self) -> Result<&CommandOutput> {
        self.last_output.as_ref().ok_or(StepError::NoCommandRun)
    }

    /// "the command should succeed"
    pub fn assert_command_succeeded(&self) -> Result<()> {
        let output = self.last_output()?;
        if !output.succeeded() {
            return Err(StepError::assertion(format!(
                "command exited with {:?}: {}",
                output.exit_code,
                output.stderr.trim()
            )));
        }
        Ok(())
    }

    /// "the command output should {operator} {expected}"
    pub fn assert_command_output(&self, operator: &str, expected: &str) -> Result<()> {
        let output = self.last_output()?;
        check_text(
            "command output",
            output.stdout.trim(),
            ValueMatchOperator::parse(operator)?,
            &self.render(expected),
        )
    }

    /// "I store the command output as {variable}"
    pub fn store_command_output(&self, variable: &str) -> Result<()> {
        let stdout = self.last_output()?.stdout.trim().to_string();
        self.context.variables().set(variable, stdout);
        Ok(())
    }

    // ---------------------------------------------------------------
    // 远程机器 / Remote machine
    // ---------------------------------------------------------------

    /// "I upload {local} to {remote} on {machine}"
    pub async fn upload_to_remote(&self, machine: &str, local: &str, remote: &str) -> Result<()> {
        let machine = self.context.remotes().get(&self.render(machine))?;
        machine
            .upload(&self.render_path(local), &self.render(remote))
            .await?;
        Ok(())
    }

    /// "I download {remote} from {machine} to {local}"
    pub async fn download_from_remote(
        &self,
        machine: &str,
        remote: &str,
        local: &str,
    ) -> Result<()> {
        let machine = self.context.remotes().get(&self.render(machine))?;
        machine
            .download(&self.render(remote), &self.render_path(local))
            .await?;
        Ok(())
    }

    /// "I delete {remote} on {machine}"
    pub async fn delete_on_remote(&self, machine: &str, remote: &str) -> Result<()> {
        let machine = self.context.remotes().get(&self.render(machine))?;
        machine.delete(&self.render(remote)).await?;
        Ok(())
    }

    /// "{remote} should (not) exist on {machine}"
    pub async fn assert_remote_file(
        &self,
        machine: &str,
        remote: &str,
        should_exist: bool,
    ) -> Result<()> {
        let machine = self.context.remotes().get(&self.render(machine))?;
        let remote = self.render(remote);
        if machine.exists(&remote).await? != should_exist {
            return Err(StepError::assertion(format!(
                "'{}' on {} should {}exist",
                remote,
                machine.name(),
                if should_exist { "" } else { "not " }
            )));
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // UI
    // ---------------------------------------------------------------

    pub async fn click(&self, locator: &str) -> Result<()> {
        Ok(self.context.ui()?.click(&self.render(locator)).await?)
    }

    pub async fn type_text(&self, locator: &str, text: &str) -> Result<()> {
        Ok(self
            .context
            .ui()?
            .type_text(&self.render(locator), &self.render(text))
            .await?)
    }

    pub async fn press_key(&self, key: &str) -> Result<()> {
        Ok(self.context.ui()?.press_key(&self.render(key)).await?)
    }

    pub async fn switch_to_window(&self, window: &str) -> Result<()> {
        Ok(self
            .context
            .ui()?
            .switch_to_window(&self.render(window))
            .await?)
    }

    pub async fn switch_to_frame(&self, frame: &str) -> Result<()> {
        Ok(self
            .context
            .ui()?
            .switch_to_frame(&self.render(frame))
            .await?)
    }

    pub async fn switch_to_default_content(&self) -> Result<()> {
        Ok(self.context.ui()?.switch_to_default_content().await?)
    }

    /// "the window title should {operator} {expected}"
    pub async fn assert_window_title(&self, operator: &str, expected: &str) -> Result<()> {
        let title = self.context.ui()?.window_title().await?;
        check_text(
            "window title",
            &title,
            ValueMatchOperator::parse(operator)?,
            &self.render(expected),
        )
    }

    // ---------------------------------------------------------------
    // 变量 / Variables
    // ---------------------------------------------------------------

    /// "I set variable {name} to {value}"
    pub fn set_variable(&self, name: &str, value: &str) {
        let value = self.render(value);
        info!("Set variable {} = {}", name, value);
        self.context.variables().set(name, value);
    }

    /// "I set the variables:" + `name | value` table
    pub fn set_variables(&self, rows: &[Vec<String>]) -> Result<()> {
        for (name, value) in parse_key_value_table(rows)? {
            self.set_variable(&name, &value);
        }
        Ok(())
    }

    /// "variable {name} should {operator} {expected}"
    pub fn assert_variable(&self, name: &str, operator: &str, expected: &str) -> Result<()> {
        let actual = self
            .context
            .variables()
            .get(name)
            .ok_or_else(|| StepError::assertion(format!("variable '{}' is not set", name)))?;
        check_text(
            &format!("variable '{}'", name),
            &actual,
            ValueMatchOperator::parse(operator)?,
            &self.render(expected),
        )
    }
}
