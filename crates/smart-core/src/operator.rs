/*!
* 文件名: operator.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: serde
* 描述: 值匹配操作符 / Value match operators
*/

use crate::errors::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 值匹配操作符 / Value match operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMatchOperator {
    /// 等于 / Equals
    Equals,
    /// 不等于 / Not equals
    NotEquals,
    /// 包含 / Contains
    Contains,
    /// 不包含 / Does not contain
    NotContains,
    /// 大于 / Greater than
    GreaterThan,
    /// 大于等于 / Greater than or equal
    GreaterThanOrEqual,
    /// 小于 / Less than
    LessThan,
    /// 小于等于 / Less than or equal
    LessThanOrEqual,
    /// 正则匹配 / Regular expression match
    Matches,
    /// 前缀匹配 / Starts with
    StartsWith,
    /// 后缀匹配 / Ends with
    EndsWith,
}

impl ValueMatchOperator {
    /// 所有操作符 / Every operator
    pub const ALL: [ValueMatchOperator; 11] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::NotContains,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::Matches,
        Self::StartsWith,
        Self::EndsWith,
    ];

    /// 解析操作符记号 / Parse an operator token
    pub fn parse(token: &str) -> CoreResult<Self> {
        let normalized = token
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let operator = match normalized.as_str() {
            "=" | "==" | "equals" | "eq" => Self::Equals,
            "!=" | "not equals" | "ne" => Self::NotEquals,
            "contains" => Self::Contains,
            "not contains" | "!contains" | "does not contain" => Self::NotContains,
            ">" | "gt" => Self::GreaterThan,
            ">=" | "ge" => Self::GreaterThanOrEqual,
            "<" | "lt" => Self::LessThan,
            "<=" | "le" => Self::LessThanOrEqual,
            "matches" | "~=" => Self::Matches,
            "starts with" => Self::StartsWith,
            "ends with" => Self::EndsWith,
            _ => return Err(CoreError::unsupported_operator(token.trim())),
        };
        Ok(operator)
    }

    /// 解析数值比较操作符 / Parse a numeric-comparison operator
    ///
    /// 仅接受 `= != > >= < <=` 子集。
    pub fn parse_numeric(token: &str) -> CoreResult<Self> {
        let operator = Self::parse(token)?;
        if !operator.is_numeric_comparison() {
            return Err(CoreError::unsupported_operator(token.trim()));
        }
        Ok(operator)
    }

    /// 规范记号 / Canonical token
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::Contains => "contains",
            Self::NotContains => "not contains",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Matches => "matches",
            Self::StartsWith => "starts with",
            Self::EndsWith => "ends with",
        }
    }

    /// 用于失败信息的描述 / Phrase used in failure messages
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Equals => "equal",
            Self::NotEquals => "not equal",
            Self::Contains => "contain",
            Self::NotContains => "not contain",
            Self::GreaterThan => "be greater than",
            Self::GreaterThanOrEqual => "be greater than or equal to",
            Self::LessThan => "be less than",
            Self::LessThanOrEqual => "be less than or equal to",
            Self::Matches => "match",
            Self::StartsWith => "start with",
            Self::EndsWith => "end with",
        }
    }

    /// 是否属于数值比较子集 / Whether this belongs to the numeric subset
    pub fn is_numeric_comparison(&self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::NotEquals
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
                | Self::LessThan
                | Self::LessThanOrEqual
        )
    }

    /// 是否为否定操作符 / Whether this is a negated operator
    pub fn is_negated(&self) -> bool {
        matches!(self, Self::NotEquals | Self::NotContains)
    }

    /// 比较两个数值 / Compare two numbers
    ///
    /// 非数值操作符返回 `None`。
    pub fn compare_numbers(&self, actual: f64, expected: f64) -> Option<bool> {
        let result = match self {
            Self::Equals => actual == expected,
            Self::NotEquals => actual != expected,
            Self::GreaterThan => actual > expected,
            Self::GreaterThanOrEqual => actual >= expected,
            Self::LessThan => actual < expected,
            Self::LessThanOrEqual => actual <= expected,
            _ => return None,
        };
        Some(result)
    }
}

impl fmt::Display for ValueMatchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ValueMatchOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
