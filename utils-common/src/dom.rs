use serde::{Deserialize, Serialize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

/// 元素的 CSS display 取值
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    /// 弹性布局显示
    Flex,
    /// 块级显示
    Block,
    /// 隐藏
    None,
}

impl Display {
    /// CSS display 属性值
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Flex => "flex",
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

/// 获取全局 window 对象
pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "无法获取 window 对象".to_string())
}

/// 获取全局 document 对象
pub fn document() -> Result<Document, String> {
    window()?
        .document()
        .ok_or_else(|| "无法获取 document 对象".to_string())
}

/// 注册一次性定时器，回调执行后自动释放
pub fn set_timeout_once<F>(delay_ms: i32, callback: F) -> Result<(), String>
where
    F: FnOnce() + 'static,
{
    let cb = Closure::once_into_js(callback);
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)
        .map_err(|_| "注册定时器失败".to_string())?;
    Ok(())
}
