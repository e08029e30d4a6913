/*!
* 文件名: lib
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: None
* 描述: BDD步骤胶水 / BDD step glue
*/

pub mod context;
pub mod error;
pub mod steps;
pub mod table;
pub mod ui;

// 重新导出主要类型
pub use context::StepContext;
pub use error::{Result, StepError};
pub use steps::SmartSteps;
pub use table::{parse_criteria_table, parse_key_value_table};
pub use ui::{UiDriver, UiError, UiResult};
