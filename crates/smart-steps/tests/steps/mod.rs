//! 步骤绑定 / Step bindings

mod messaging_steps;
mod system_steps;
mod ui_steps;
mod variable_steps;
