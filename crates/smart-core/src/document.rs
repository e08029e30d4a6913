/*!
* 文件名: document.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: serde_json
* 描述: 结构化文档辅助函数 / Structured document helpers
*/

use serde_json::Value;

/// 可查询的结构化文档 / Queryable structured document
pub type Document = Value;

/// 值的文本形式 / Textual form of a value
///
/// 字符串返回原始内容，其余类型返回紧凑JSON。
/// Strings yield their raw content, everything else compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 值的数字形式 / Numeric form of a value
///
/// 数字字符串也会被解析。Numeric strings are parsed as well.
pub fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// 解析文本为数字 / Parse text into a number
pub fn text_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}
