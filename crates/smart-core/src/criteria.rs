/*!
* 文件名: criteria.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: regex, serde_json
* 描述: 条件求值器 / Criteria evaluator
*/

use crate::document::{text_number, value_number, value_text};
use crate::errors::{CoreError, CoreResult};
use crate::operator::ValueMatchOperator;
use crate::path::{JsonPath, Selection};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 单次求值结果 / Outcome of a single evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 通过 / Passed
    Passed,
    /// 未通过 / Failed with the concrete mismatch
    Failed { reason: String },
}

impl Outcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// 验证条件 / Verification criterion
///
/// 一行 `path | operator | expected`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// 查询路径 / Query path
    pub path: String,
    /// 操作符 / Operator
    pub operator: ValueMatchOperator,
    /// 期望值文本 / Expected value text
    pub expected: String,
}

impl Criterion {
    pub fn new(
        path: impl Into<String>,
        operator: ValueMatchOperator,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            operator,
            expected: expected.into(),
        }
    }

    /// 从文本三元组解析 / Parse from a textual triple
    pub fn parse(path: &str, operator: &str, expected: &str) -> CoreResult<Self> {
        Ok(Self::new(
            path.trim(),
            ValueMatchOperator::parse(operator)?,
            expected,
        ))
    }

    /// 在文档快照上求值 / Evaluate against a document snapshot
    ///
    /// 数值比较跳过非数值元素；只有没有任何元素匹配且存在非数值元素时才报错，
    /// 因此结果与元素顺序无关。
    /// Numeric comparisons skip non-numeric values and only error when nothing
    /// matched and at least one value was not numeric, so the result does not
    /// depend on the order of the selected values.
    pub fn evaluate(&self, document: &Value) -> CoreResult<Outcome> {
        let selection = JsonPath::parse(&self.path)?.select(document);
        let matcher = Matcher::new(&self.path, self.operator, &self.expected)?;

        let mut any = false;
        let mut mismatch = None;
        for value in &selection.values {
            match matcher.test(value) {
                Ok(true) => {
                    any = true;
                    break;
                }
                Ok(false) => {}
                Err(err) => {
                    mismatch.get_or_insert(err);
                }
            }
        }
        if let (false, Some(err)) = (any, mismatch) {
            return Err(err);
        }

        let passed = if self.operator.is_negated() { !any } else { any };
        if passed {
            Ok(Outcome::Passed)
        } else {
            Ok(Outcome::failed(format!(
                "value at '{}' should {} '{}' but found {}",
                self.path,
                self.operator.phrase(),
                self.expected,
                describe_selection(&selection)
            )))
        }
    }
}

/// 数量检查 / Size check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCheck {
    /// 计数路径，默认根 / Path to count, the root by default
    pub path: String,
    /// 数值比较操作符 / Numeric comparison operator
    pub operator: ValueMatchOperator,
    /// 期望数量 / Expected count
    pub expected: i64,
}

impl SizeCheck {
    /// 创建数量检查，非数值操作符返回错误 / Create a size check
    pub fn new(
        path: impl Into<String>,
        operator: ValueMatchOperator,
        expected: i64,
    ) -> CoreResult<Self> {
        if !operator.is_numeric_comparison() {
            return Err(CoreError::unsupported_operator(operator.symbol()));
        }
        Ok(Self {
            path: path.into(),
            operator,
            expected,
        })
    }

    /// 根数组长度检查 / Check on the root array length
    pub fn root(operator: ValueMatchOperator, expected: i64) -> CoreResult<Self> {
        Self::new("$", operator, expected)
    }

    /// 计算实际数量 / Compute the actual count
    pub fn actual(&self, document: &Value) -> CoreResult<usize> {
        Ok(JsonPath::parse(&self.path)?.select(document).count())
    }

    /// 在文档快照上求值 / Evaluate against a document snapshot
    pub fn evaluate(&self, document: &Value) -> CoreResult<Outcome> {
        let actual = self.actual(document)?;
        let passed = self
            .operator
            .compare_numbers(actual as f64, self.expected as f64)
            .ok_or_else(|| CoreError::unsupported_operator(self.operator.symbol()))?;
        if passed {
            Ok(Outcome::Passed)
        } else {
            Ok(Outcome::failed(format!(
                "actual size {} should {} expected size {}",
                actual,
                self.operator.phrase(),
                self.expected
            )))
        }
    }
}

/// 按顺序在同一快照上求值所有条件 / Evaluate every criterion, in order, on one snapshot
///
/// 空列表视为通过。An empty list passes.
pub fn evaluate_all(document: &Value, criteria: &[Criterion]) -> CoreResult<Outcome> {
    for criterion in criteria {
        match criterion.evaluate(document)? {
            Outcome::Passed => continue,
            failed => return Ok(failed),
        }
    }
    Ok(Outcome::Passed)
}

/// 单个值匹配器 / Matcher for single values
struct Matcher<'a> {
    path: &'a str,
    operator: ValueMatchOperator,
    expected: &'a str,
    expected_number: Option<f64>,
    pattern: Option<Regex>,
}

impl<'a> Matcher<'a> {
    fn new(path: &'a str, operator: ValueMatchOperator, expected: &'a str) -> CoreResult<Self> {
        let pattern = match operator {
            ValueMatchOperator::Matches => Some(Regex::new(expected).map_err(|e| {
                CoreError::evaluation(path, format!("invalid pattern '{}': {}", expected, e))
            })?),
            _ => None,
        };

        let expected_number = text_number(expected);
        let ordering = matches!(
            operator,
            ValueMatchOperator::GreaterThan
                | ValueMatchOperator::GreaterThanOrEqual
                | ValueMatchOperator::LessThan
                | ValueMatchOperator::LessThanOrEqual
        );
        if ordering && expected_number.is_none() {
            return Err(CoreError::evaluation(
                path,
                format!("expected value '{}' is not numeric", expected),
            ));
        }

        Ok(Self {
            path,
            operator,
            expected,
            expected_number,
            pattern,
        })
    }

    /// 对否定操作符测试其肯定形式 / Negated operators test their positive form
    fn test(&self, value: &Value) -> CoreResult<bool> {
        let text = value_text(value);
        let result = match self.operator {
            ValueMatchOperator::Equals | ValueMatchOperator::NotEquals => self.equals(value, &text),
            ValueMatchOperator::Contains | ValueMatchOperator::NotContains => {
                text.contains(self.expected)
            }
            ValueMatchOperator::StartsWith => text.starts_with(self.expected),
            ValueMatchOperator::EndsWith => text.ends_with(self.expected),
            ValueMatchOperator::Matches => self
                .pattern
                .as_ref()
                .map(|p| p.is_match(&text))
                .unwrap_or(false),
            ordering => {
                let actual = value_number(value).ok_or_else(|| {
                    CoreError::evaluation(self.path, format!("value {} is not numeric", value))
                })?;
                let expected = self.expected_number.unwrap_or_default();
                ordering
                    .compare_numbers(actual, expected)
                    .unwrap_or(false)
            }
        };
        Ok(result)
    }

    fn equals(&self, value: &Value, text: &str) -> bool {
        if let (Value::Number(n), Some(expected)) = (value, self.expected_number) {
            if n.as_f64() == Some(expected) {
                return true;
            }
        }
        if text == self.expected {
            return true;
        }
        serde_json::from_str::<Value>(self.expected)
            .map(|parsed| &parsed == value)
            .unwrap_or(false)
    }
}

fn describe_selection(selection: &Selection) -> String {
    if selection.is_empty() {
        return "nothing".to_string();
    }
    Value::Array(selection.values.clone()).to_string()
}
