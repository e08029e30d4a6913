/*!
* 文件名: variables.rs
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: dashmap, regex, lazy_static
* 描述: 场景变量存储与占位符渲染 / Scenario variable store and placeholder rendering
*/

use dashmap::DashMap;
use regex::{Captures, Regex};
use std::sync::Arc;
use tracing::warn;

lazy_static::lazy_static! {
    /// 占位符模式正则 / Placeholder pattern regex
    static ref PLACEHOLDER_PATTERN: Regex =
        Regex::new(r"\$\{([^}]+)}").expect("valid placeholder pattern");
}

/// 场景变量存储trait / Scenario variable store trait
pub trait VariableStore: Send + Sync {
    /// 获取变量 / Get a variable
    fn get(&self, name: &str) -> Option<String>;

    /// 设置变量 / Set a variable
    fn set(&self, name: &str, value: String);

    /// 删除变量 / Remove a variable
    fn remove(&self, name: &str) -> Option<String>;
}

impl<T: VariableStore + ?Sized> VariableStore for Arc<T> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: String) {
        (**self).set(name, value)
    }

    fn remove(&self, name: &str) -> Option<String> {
        (**self).remove(name)
    }
}

/// 内存场景变量 / In-memory scenario variables
#[derive(Debug, Default)]
pub struct ScenarioVariables {
    values: DashMap<String, String>,
}

impl ScenarioVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// 变量数量 / Number of variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 清空所有变量 / Clear every variable
    pub fn clear(&self) {
        self.values.clear();
    }
}

impl VariableStore for ScenarioVariables {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).map(|v| v.value().clone())
    }

    fn set(&self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    fn remove(&self, name: &str) -> Option<String> {
        self.values.remove(name).map(|(_, v)| v)
    }
}

/// 变量渲染器 / Variable renderer
///
/// 将 `${name}` 占位符替换为变量值，未知变量保持原样。
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableRender;

impl VariableRender {
    pub fn new() -> Self {
        Self
    }

    /// 渲染文本 / Render text
    pub fn render<S>(&self, text: &str, store: &S) -> String
    where
        S: VariableStore + ?Sized,
    {
        if !text.contains("${") {
            return text.to_string();
        }
        PLACEHOLDER_PATTERN
            .replace_all(text, |caps: &Captures<'_>| {
                let name = caps[1].trim();
                match store.get(name) {
                    Some(value) => value,
                    None => {
                        warn!("未找到变量 / Variable not found: {}", name);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}
