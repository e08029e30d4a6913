/*!
* 文件名: ui
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: async-trait, thiserror
* 描述: UI驱动抽象 / UI driver abstraction
*/

use async_trait::async_trait;
use thiserror::Error;

/// UI驱动错误 / UI driver error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("Element not found: {0}")]
    /// 元素未找到 / Element not found
    ElementNotFound(String),

    #[error("Window not found: {0}")]
    /// 窗口未找到 / Window not found
    WindowNotFound(String),

    #[error("Frame not found: {0}")]
    /// 框架未找到 / Frame not found
    FrameNotFound(String),

    #[error("UI driver error: {0}")]
    /// 驱动内部错误 / Driver failure
    Driver(String),
}

/// UI驱动结果类型 / UI driver result type
pub type UiResult<T> = std::result::Result<T, UiError>;

/// UI驱动 / UI driver
///
/// 由浏览器或桌面自动化绑定实现。Implemented by browser or desktop automation bindings.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// 点击元素 / Click an element
    async fn click(&self, locator: &str) -> UiResult<()>;

    /// 在元素中输入文本 / Type text into an element
    async fn type_text(&self, locator: &str, text: &str) -> UiResult<()>;

    /// 按键 / Press a key
    async fn press_key(&self, key: &str) -> UiResult<()>;

    /// 切换窗口 / Switch to a window by title or handle
    async fn switch_to_window(&self, window: &str) -> UiResult<()>;

    /// 切换到框架 / Switch into a frame
    async fn switch_to_frame(&self, frame: &str) -> UiResult<()>;

    /// 回到顶层文档 / Back to the top-level document
    async fn switch_to_default_content(&self) -> UiResult<()>;

    /// 当前窗口标题 / Current window title
    async fn window_title(&self) -> UiResult<String>;
}
