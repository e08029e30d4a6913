//! 消息桶步骤绑定 / Message bucket step bindings

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use smart_steps::{Result, StepError};

use crate::world::SmartWorld;

fn table_rows(step: &Step) -> Result<Vec<Vec<String>>> {
    step.table
        .as_ref()
        .map(|table| table.rows.clone())
        .ok_or_else(|| StepError::InvalidTable("step has no data table".to_string()))
}

#[given(expr = "I start recording messages from {string} into {string}")]
async fn start_recording(world: &mut SmartWorld, handler: String, variable: String) -> Result<()> {
    world.steps.start_recording(&handler, &variable).await?;
    Ok(())
}

#[when(expr = "I send {string} as {string} via {string}")]
async fn send_message(
    world: &mut SmartWorld,
    content: String,
    content_type: String,
    handler: String,
) -> Result<()> {
    world
        .steps
        .send_message(&handler, &content, &content_type, None)
        .await
}

#[when(expr = "I send {string} as {string} with type {string} via {string}")]
async fn send_typed_message(
    world: &mut SmartWorld,
    content: String,
    content_type: String,
    aux_type: String,
    handler: String,
) -> Result<()> {
    world
        .steps
        .send_message(&handler, &content, &content_type, Some(&aux_type))
        .await
}

#[then(expr = "bucket {string} should contain {string} {int} messages within {int} seconds")]
async fn bucket_size(
    world: &mut SmartWorld,
    variable: String,
    operator: String,
    expected: i64,
    max_wait: u64,
) -> Result<()> {
    world
        .steps
        .assert_bucket_size(&variable, &operator, expected, max_wait)
        .await?;
    Ok(())
}

#[then(expr = "bucket {string} should match within {int} seconds:")]
async fn bucket_criteria(
    world: &mut SmartWorld,
    step: &Step,
    variable: String,
    max_wait: u64,
) -> Result<()> {
    let rows = table_rows(step)?;
    world
        .steps
        .assert_bucket_criteria(&variable, &rows, max_wait)
        .await?;
    Ok(())
}

#[when(expr = "I check that bucket {string} contains {string} {int} messages within {int} seconds")]
async fn check_bucket_size(
    world: &mut SmartWorld,
    variable: String,
    operator: String,
    expected: i64,
    max_wait: u64,
) {
    let result = world
        .steps
        .assert_bucket_size(&variable, &operator, expected, max_wait)
        .await;
    world.capture(result);
}

#[when(expr = "I store {string} of bucket {string} as {string}")]
async fn store_bucket_value(
    world: &mut SmartWorld,
    path: String,
    variable: String,
    target: String,
) -> Result<()> {
    world
        .steps
        .store_bucket_value(&variable, &path, &target)
        .await?;
    Ok(())
}

#[then(expr = "the check should fail with {string}")]
async fn check_failed(world: &mut SmartWorld, fragment: String) -> Result<()> {
    match world.last_error.as_deref() {
        Some(message) if message.contains(&fragment) => Ok(()),
        Some(message) => Err(StepError::assertion(format!(
            "error '{}' does not mention '{}'",
            message, fragment
        ))),
        None => Err(StepError::assertion("the check passed")),
    }
}

#[then("I stop all recordings")]
async fn stop_recordings(world: &mut SmartWorld) -> Result<()> {
    world.steps.stop_recordings().await
}
