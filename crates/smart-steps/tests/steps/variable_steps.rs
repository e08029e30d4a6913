//! 变量步骤绑定 / Variable step bindings

use cucumber::gherkin::Step;
use cucumber::{given, then};
use smart_steps::{Result, StepError};

use crate::world::SmartWorld;

#[given(expr = "I set variable {string} to {string}")]
async fn set_variable(world: &mut SmartWorld, name: String, value: String) {
    world.steps.set_variable(&name, &value);
}

#[given("I set the variables:")]
async fn set_variables(world: &mut SmartWorld, step: &Step) -> Result<()> {
    let table = step
        .table
        .as_ref()
        .ok_or_else(|| StepError::InvalidTable("step has no data table".to_string()))?;
    world.steps.set_variables(&table.rows)
}

#[then(expr = "variable {string} should {string} {string}")]
async fn assert_variable(
    world: &mut SmartWorld,
    name: String,
    operator: String,
    expected: String,
) -> Result<()> {
    world.steps.assert_variable(&name, &operator, &expected)
}
