//! UI步骤绑定 / UI step bindings

use cucumber::{given, then, when};
use smart_steps::{Result, StepError};

use crate::world::SmartWorld;

#[given(expr = "I switch to window {string}")]
async fn switch_window(world: &mut SmartWorld, window: String) -> Result<()> {
    world.steps.switch_to_window(&window).await
}

#[when(expr = "I switch to frame {string}")]
async fn switch_frame(world: &mut SmartWorld, frame: String) -> Result<()> {
    world.steps.switch_to_frame(&frame).await
}

#[when("I switch back to the main content")]
async fn switch_default(world: &mut SmartWorld) -> Result<()> {
    world.steps.switch_to_default_content().await
}

#[when(expr = "I type {string} into {string}")]
async fn type_text(world: &mut SmartWorld, text: String, locator: String) -> Result<()> {
    world.steps.type_text(&locator, &text).await
}

#[when(expr = "I press {string}")]
async fn press_key(world: &mut SmartWorld, key: String) -> Result<()> {
    world.steps.press_key(&key).await
}

#[when(expr = "I click {string}")]
async fn click(world: &mut SmartWorld, locator: String) -> Result<()> {
    world.steps.click(&locator).await
}

#[when(expr = "I try to click {string}")]
async fn try_click(world: &mut SmartWorld, locator: String) {
    let result = world.steps.click(&locator).await;
    world.capture(result);
}

#[then(expr = "the window title should {string} {string}")]
async fn window_title(world: &mut SmartWorld, operator: String, expected: String) -> Result<()> {
    world.steps.assert_window_title(&operator, &expected).await
}

#[then(expr = "the browser should have done {int} actions")]
async fn action_count(world: &mut SmartWorld, expected: usize) -> Result<()> {
    let actual = world.browser.actions.lock().unwrap().len();
    if actual != expected {
        return Err(StepError::assertion(format!(
            "expected {} browser actions, recorded {}",
            expected, actual
        )));
    }
    Ok(())
}
