/*!
* 文件名: errors.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: thiserror
* 描述: 核心模块的错误定义 / Error definitions for the core module
*/

use thiserror::Error;

/// 核心模块的Result类型别名 / Result type alias for the core module
pub type CoreResult<T> = Result<T, CoreError>;

/// 核心模块的错误类型 / Error type for the core module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Unsupported operator: {operator}")]
    /// 不支持的操作符 / Unsupported operator
    UnsupportedOperator { operator: String },

    #[error("Criteria evaluation failed for path '{path}': {reason}")]
    /// 条件求值错误 / Criteria evaluation error
    CriteriaEvaluation { path: String, reason: String },
}

impl CoreError {
    pub fn unsupported_operator(operator: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            operator: operator.into(),
        }
    }

    pub fn evaluation(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CriteriaEvaluation {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
