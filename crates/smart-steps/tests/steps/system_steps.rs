//! 本地与远程机器步骤绑定 / Local and remote machine step bindings

use cucumber::{given, then, when};
use smart_steps::Result;

use crate::world::SmartWorld;

#[given(expr = "I write {string} to file {string}")]
async fn write_file(world: &mut SmartWorld, content: String, path: String) -> Result<()> {
    world.steps.write_file(&path, &content).await
}

#[when(expr = "I delete file {string}")]
async fn delete_file(world: &mut SmartWorld, path: String) -> Result<()> {
    world.steps.delete_file(&path).await
}

#[when(expr = "I delete files matching {string} in {string}")]
async fn delete_matching(world: &mut SmartWorld, pattern: String, dir: String) -> Result<()> {
    world.steps.delete_files_matching(&dir, &pattern).await?;
    Ok(())
}

#[then(expr = "file {string} should exist within {int} seconds")]
async fn file_exists(world: &mut SmartWorld, path: String, max_wait: u64) -> Result<()> {
    world.steps.assert_file_exists(&path, max_wait).await
}

#[then(expr = "file {string} should not exist")]
async fn file_absent(world: &mut SmartWorld, path: String) -> Result<()> {
    world.steps.assert_file_absent(&path).await
}

#[then(expr = "file {string} should contain {string}")]
async fn file_contains(world: &mut SmartWorld, path: String, text: String) -> Result<()> {
    world.steps.assert_file_contains(&path, &text).await
}

#[then(expr = "{string} should hold {int} files matching {string}")]
async fn file_count(
    world: &mut SmartWorld,
    dir: String,
    expected: usize,
    pattern: String,
) -> Result<()> {
    world.steps.assert_file_count(&dir, &pattern, expected).await
}

#[when(expr = "I run {string}")]
async fn run_command(world: &mut SmartWorld, command: String) -> Result<()> {
    world.steps.run_command(&command).await?;
    Ok(())
}

#[then("the command should succeed")]
async fn command_succeeded(world: &mut SmartWorld) -> Result<()> {
    world.steps.assert_command_succeeded()
}

#[then(expr = "the command output should {string} {string}")]
async fn command_output(world: &mut SmartWorld, operator: String, expected: String) -> Result<()> {
    world.steps.assert_command_output(&operator, &expected)
}

#[when(expr = "I store the command output as {string}")]
async fn store_output(world: &mut SmartWorld, variable: String) -> Result<()> {
    world.steps.store_command_output(&variable)
}

#[when(expr = "I upload {string} to {string} on {string}")]
async fn upload(
    world: &mut SmartWorld,
    local: String,
    remote: String,
    machine: String,
) -> Result<()> {
    world.steps.upload_to_remote(&machine, &local, &remote).await
}

#[when(expr = "I download {string} from {string} to {string}")]
async fn download(
    world: &mut SmartWorld,
    remote: String,
    machine: String,
    local: String,
) -> Result<()> {
    world.steps.download_from_remote(&machine, &remote, &local).await
}

#[when(expr = "I delete {string} on {string}")]
async fn delete_remote(world: &mut SmartWorld, remote: String, machine: String) -> Result<()> {
    world.steps.delete_on_remote(&machine, &remote).await
}

#[then(expr = "{string} should exist on {string}")]
async fn remote_exists(world: &mut SmartWorld, remote: String, machine: String) -> Result<()> {
    world.steps.assert_remote_file(&machine, &remote, true).await
}

#[then(expr = "{string} should not exist on {string}")]
async fn remote_absent(world: &mut SmartWorld, remote: String, machine: String) -> Result<()> {
    world.steps.assert_remote_file(&machine, &remote, false).await
}
