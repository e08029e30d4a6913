/*!
* 文件名: table
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: None
* 描述: Gherkin数据表解析 / Gherkin data table parsing
*/

use crate::error::{Result, StepError};
use smart_core::Criterion;

/// 可选表头 / Optional header row
const CRITERIA_HEADER: [&str; 3] = ["path", "operator", "expected"];

fn is_header(row: &[String], header: &[&str]) -> bool {
    row.len() == header.len()
        && row
            .iter()
            .zip(header)
            .all(|(cell, name)| cell.trim().eq_ignore_ascii_case(name))
}

/// 解析条件表 `path | operator | expected` / Parse a criteria table
///
/// 首行若为表头则跳过。A leading header row is skipped.
pub fn parse_criteria_table(rows: &[Vec<String>]) -> Result<Vec<Criterion>> {
    let body = match rows.first() {
        Some(first) if is_header(first, &CRITERIA_HEADER) => &rows[1..],
        _ => rows,
    };
    body.iter()
        .enumerate()
        .map(|(i, row)| match row.as_slice() {
            [path, operator, expected] => Ok(Criterion::parse(path, operator, expected.trim())?),
            _ => Err(StepError::InvalidTable(format!(
                "criteria row {} has {} cell(s), expected 3",
                i + 1,
                row.len()
            ))),
        })
        .collect()
}

/// 解析两列的键值表 / Parse a two-column `name | value` table
pub fn parse_key_value_table(rows: &[Vec<String>]) -> Result<Vec<(String, String)>> {
    let body = match rows.first() {
        Some(first) if is_header(first, &["name", "value"]) => &rows[1..],
        _ => rows,
    };
    body.iter()
        .map(|row| match row.as_slice() {
            [name, value] if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(StepError::InvalidTable(format!(
                "expected 'name | value', got {:?}",
                row
            ))),
        })
        .collect()
}
