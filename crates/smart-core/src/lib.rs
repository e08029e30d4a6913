/*!
* 文件名: lib.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: None
* 描述: Smart BDD核心数据模型 / Smart BDD core data model
*/

pub mod criteria;
pub mod document;
pub mod errors;
pub mod operator;
pub mod path;
pub mod poll;
pub mod variables;

pub use criteria::{evaluate_all, Criterion, Outcome, SizeCheck};
pub use document::Document;
pub use errors::{CoreError, CoreResult};
pub use operator::ValueMatchOperator;
pub use path::{evaluate_path, JsonPath, Selection};
pub use poll::{PollPlan, DEFAULT_POLL_INTERVAL_SECS};
pub use variables::{ScenarioVariables, VariableRender, VariableStore};
