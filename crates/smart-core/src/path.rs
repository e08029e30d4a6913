/*!
* 文件名: path.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: serde_json
* 描述: 结构化查询路径的解析与求值 / Parsing and evaluation of structured-query paths
*/

use crate::errors::{CoreError, CoreResult};
use serde_json::Value;
use std::fmt;

/// 路径片段 / Path segment
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// 子成员 / Child member
    Child(String),
    /// 数组下标，负数从末尾计算 / Array index, negative counts from the end
    Index(i64),
    /// 通配符 / Wildcard
    Wildcard,
    /// 递归下降，`None` 表示 `..*` / Recursive descent, `None` means `..*`
    Descendant(Option<String>),
    /// 长度函数 / Length function
    Length,
}

/// 结构化查询路径 / Structured-query path
///
/// Supported syntax:
///
/// - `$` root
/// - `.name`, `['name']`, `["name"]` members
/// - `[n]` indices, negative counting from the end
/// - `[*]` and `.*` wildcards
/// - `..name` and `..*` recursive descent
/// - a trailing `.length()`
///
/// `$.[*].message` is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    segments: Vec<Segment>,
}

/// 路径求值结果 / Result of evaluating a path
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// 选中的值 / Selected values
    pub values: Vec<Value>,
    /// 是否为确定路径 / Whether the path was definite
    pub definite: bool,
    /// 是否以 length() 结尾 / Whether the path ended in length()
    pub length: bool,
}

impl Selection {
    /// 是否为空 / Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 元素数量 / Element count
    ///
    /// `length()` 直接返回计算值；确定路径返回所选节点的长度；
    /// 非确定路径返回选中节点的数量。
    pub fn count(&self) -> usize {
        if self.length {
            return self
                .values
                .first()
                .and_then(Value::as_u64)
                .unwrap_or_default() as usize;
        }
        if !self.definite {
            return self.values.len();
        }
        match self.values.first() {
            None => 0,
            Some(Value::Array(items)) => items.len(),
            Some(Value::Object(map)) => map.len(),
            Some(_) => 1,
        }
    }

    /// 转为单个文档 / Collapse into a single document
    ///
    /// 确定路径返回唯一值（未选中时为 null），否则返回数组。
    pub fn into_value(self) -> Value {
        if self.definite || self.length {
            self.values.into_iter().next().unwrap_or(Value::Null)
        } else {
            Value::Array(self.values)
        }
    }
}

impl JsonPath {
    /// 解析路径 / Parse a path
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        let mut parser = Parser {
            raw: trimmed,
            chars: trimmed.char_indices().collect(),
            pos: 0,
        };
        let segments = parser.parse()?;
        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// 原始路径 / Raw path text
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 是否为确定路径 / Whether the path selects at most one node
    pub fn is_definite(&self) -> bool {
        !self
            .segments
            .iter()
            .any(|s| matches!(s, Segment::Wildcard | Segment::Descendant(_)))
    }

    /// 在文档上求值 / Evaluate against a document
    pub fn select(&self, document: &Value) -> Selection {
        let mut current: Vec<&Value> = vec![document];
        let mut computed: Option<Vec<Value>> = None;

        for segment in &self.segments {
            let mut next = Vec::new();
            match segment {
                Segment::Child(name) => {
                    for value in &current {
                        if let Some(child) = value.as_object().and_then(|m| m.get(name)) {
                            next.push(child);
                        }
                    }
                }
                Segment::Index(index) => {
                    for value in &current {
                        if let Some(items) = value.as_array() {
                            let resolved = if *index < 0 {
                                items.len() as i64 + index
                            } else {
                                *index
                            };
                            if resolved >= 0 {
                                if let Some(item) = items.get(resolved as usize) {
                                    next.push(item);
                                }
                            }
                        }
                    }
                }
                Segment::Wildcard => {
                    for value in &current {
                        push_children(value, &mut next);
                    }
                }
                Segment::Descendant(name) => {
                    for value in &current {
                        descend(value, name.as_deref(), &mut next);
                    }
                }
                Segment::Length => {
                    // length() 只能是最后一个片段 / length() is always the last segment
                    computed = Some(
                        current
                            .iter()
                            .filter_map(|value| match value {
                                Value::Array(items) => Some(items.len()),
                                Value::Object(map) => Some(map.len()),
                                Value::String(s) => Some(s.chars().count()),
                                _ => None,
                            })
                            .map(Value::from)
                            .collect(),
                    );
                    break;
                }
            }
            current = next;
        }

        let length = computed.is_some();
        let values = computed.unwrap_or_else(|| current.into_iter().cloned().collect());
        Selection {
            values,
            definite: self.is_definite(),
            length,
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for JsonPath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// 解析并求值路径 / Parse and evaluate a path in one go
pub fn evaluate_path(document: &Value, path: &str) -> CoreResult<Selection> {
    Ok(JsonPath::parse(path)?.select(document))
}

fn push_children<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => out.extend(items.iter()),
        Value::Object(map) => out.extend(map.values()),
        _ => {}
    }
}

fn descend<'a>(value: &'a Value, name: Option<&str>, out: &mut Vec<&'a Value>) {
    match name {
        Some(name) => {
            if let Some(found) = value.as_object().and_then(|m| m.get(name)) {
                out.push(found);
            }
        }
        None => push_children(value, out),
    }

    let mut children = Vec::new();
    push_children(value, &mut children);
    for child in children {
        descend(child, name, out);
    }
}

struct Parser<'a> {
    raw: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser<'_> {
    fn parse(&mut self) -> CoreResult<Vec<Segment>> {
        if self.peek() != Some('$') {
            return Err(self.error("path must start with '$'"));
        }
        self.pos += 1;

        let mut segments = Vec::new();
        while let Some(c) = self.peek() {
            if segments.last() == Some(&Segment::Length) {
                return Err(self.error("length() must be the last segment"));
            }
            match c {
                '.' => {
                    self.pos += 1;
                    match self.peek() {
                        Some('.') => {
                            self.pos += 1;
                            if self.peek() == Some('*') {
                                self.pos += 1;
                                segments.push(Segment::Descendant(None));
                            } else {
                                let name = self.identifier()?;
                                segments.push(Segment::Descendant(Some(name)));
                            }
                        }
                        // `$.[*]` 形式 / the `$.[*]` form
                        Some('[') => {}
                        Some('*') => {
                            self.pos += 1;
                            segments.push(Segment::Wildcard);
                        }
                        _ => {
                            let name = self.identifier()?;
                            if name == "length()" {
                                segments.push(Segment::Length);
                            } else {
                                segments.push(Segment::Child(name));
                            }
                        }
                    }
                }
                '[' => {
                    self.pos += 1;
                    segments.push(self.bracket()?);
                }
                other => {
                    return Err(self.error(&format!("unexpected character '{}'", other)));
                }
            }
        }
        Ok(segments)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn identifier(&mut self) -> CoreResult<String> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '.' || c == '[' {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        if name.is_empty() {
            return Err(self.error("empty member name"));
        }
        Ok(name)
    }

    fn bracket(&mut self) -> CoreResult<Segment> {
        let segment = match self.peek() {
            Some('*') => {
                self.pos += 1;
                Segment::Wildcard
            }
            Some(quote @ ('\'' | '"')) => {
                self.pos += 1;
                let mut name = String::new();
                loop {
                    match self.peek() {
                        Some(c) if c == quote => {
                            self.pos += 1;
                            break;
                        }
                        Some(c) => {
                            name.push(c);
                            self.pos += 1;
                        }
                        None => return Err(self.error("unterminated quoted member")),
                    }
                }
                Segment::Child(name)
            }
            _ => {
                let mut digits = String::new();
                while let Some(c) = self.peek() {
                    if c == ']' {
                        break;
                    }
                    digits.push(c);
                    self.pos += 1;
                }
                let index = digits
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| self.error(&format!("invalid index '{}'", digits)))?;
                Segment::Index(index)
            }
        };

        if self.peek() != Some(']') {
            return Err(self.error("expected ']'"));
        }
        self.pos += 1;
        Ok(segment)
    }

    fn error(&self, reason: &str) -> CoreError {
        let offset = self
            .chars
            .get(self.pos)
            .map(|(i, _)| *i)
            .unwrap_or(self.raw.len());
        CoreError::evaluation(self.raw, format!("{} at offset {}", reason, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages() -> Value {
        json!([
            {"message": "Hello World!!", "contentType": "text/plain", "meta": {"seq": 1}},
            {"message": "Bye", "contentType": "text/plain", "meta": {"seq": 2}},
            {"message": {"orderId": 7, "items": [1, 2, 3]}, "contentType": "application/json"}
        ])
    }

    #[test]
    fn test_root_is_definite() {
        let selection = evaluate_path(&messages(), "$").unwrap();
        assert!(selection.definite);
        assert_eq!(selection.count(), 3);
    }

    #[test]
    fn test_wildcard_member() {
        let selection = evaluate_path(&messages(), "$.[*].message").unwrap();
        assert!(!selection.definite);
        assert_eq!(selection.values.len(), 3);
        assert_eq!(selection.values[0], json!("Hello World!!"));
    }

    #[test]
    fn test_bracket_wildcard_without_dot() {
        let a = evaluate_path(&messages(), "$[*].contentType").unwrap();
        let b = evaluate_path(&messages(), "$.*.contentType").unwrap();
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn test_index_and_negative_index() {
        let first = evaluate_path(&messages(), "$[0].message").unwrap();
        assert_eq!(first.values, vec![json!("Hello World!!")]);
        let last = evaluate_path(&messages(), "$[-1].message.orderId").unwrap();
        assert_eq!(last.values, vec![json!(7)]);
        let missing = evaluate_path(&messages(), "$[10].message").unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_quoted_member() {
        let selection = evaluate_path(&messages(), "$[2]['message'][\"items\"]").unwrap();
        assert_eq!(selection.count(), 3);
    }

    #[test]
    fn test_descendant() {
        let selection = evaluate_path(&messages(), "$..seq").unwrap();
        assert_eq!(selection.values, vec![json!(1), json!(2)]);
        let all = evaluate_path(&json!({"a": {"b": 1}}), "$..*").unwrap();
        assert_eq!(all.values, vec![json!({"b": 1}), json!(1)]);
    }

    #[test]
    fn test_length_function() {
        let selection = evaluate_path(&messages(), "$.length()").unwrap();
        assert!(selection.length);
        assert_eq!(selection.count(), 3);
        let items = evaluate_path(&messages(), "$[2].message.items.length()").unwrap();
        assert_eq!(items.count(), 3);
    }

    #[test]
    fn test_missing_member_is_empty() {
        let selection = evaluate_path(&messages(), "$[0].nothing").unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection.count(), 0);
        assert_eq!(selection.into_value(), Value::Null);
    }

    #[test]
    fn test_malformed_paths() {
        for bad in ["message", "$.", "$[abc]", "$['open", "$[0", "$.length().x", "$ x"] {
            let err = JsonPath::parse(bad).unwrap_err();
            assert!(
                matches!(err, CoreError::CriteriaEvaluation { .. }),
                "expected error for {}",
                bad
            );
        }
    }

    #[test]
    fn test_error_carries_path() {
        match JsonPath::parse("$[x]").unwrap_err() {
            CoreError::CriteriaEvaluation { path, reason } => {
                assert_eq!(path, "$[x]");
                assert!(reason.contains("invalid index"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
