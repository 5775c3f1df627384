//! 页面浮动消息提示
//!
//! 两种形态：内联样式的右上角提示条（编辑页使用）与交给样式表
//! 控制外观的类名消息（文章页使用）。都在 3 秒后自动消失。

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;

/// 提示停留时长（毫秒）
pub const TOAST_DWELL_MS: i32 = 3000;

/// 淡出动画时长（毫秒）
pub const TOAST_FADE_MS: i32 = 300;

/// 提示类型
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// 操作成功
    Success,
    /// 操作失败
    Error,
    /// 一般信息
    Info,
}

impl ToastKind {
    /// 提示条背景色
    pub fn color(&self) -> &'static str {
        match self {
            ToastKind::Success => "#48bb78",
            ToastKind::Error => "#f56565",
            ToastKind::Info => "#5296d5",
        }
    }

    /// 样式类名后缀
    pub fn class_name(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

/// 显示内联样式的浮动提示条，停留 3 秒后淡出移除
pub fn show_toast(text: &str, kind: ToastKind) -> Result<(), String> {
    let document = dom::document()?;
    let body = document.body().ok_or("页面缺少 body 元素")?;

    let element: HtmlElement = document
        .create_element("div")
        .map_err(|_| "创建提示元素失败")?
        .dyn_into()
        .map_err(|_| "提示元素类型转换失败")?;
    element.set_text_content(Some(text));
    element
        .set_attribute(
            "style",
            &format!(
                "position: fixed; top: 100px; right: 20px; padding: 12px 16px; \
                 border-radius: 6px; color: white; font-weight: 500; z-index: 1000; \
                 transition: all 0.3s ease; max-width: 300px; word-wrap: break-word; \
                 box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2); background: {};",
                kind.color()
            ),
        )
        .map_err(|_| "设置提示样式失败")?;

    body.append_child(&element)
        .map_err(|_| "插入提示元素失败")?;

    // 先淡出再移除，两段定时器衔接
    dom::set_timeout_once(TOAST_DWELL_MS, move || {
        let style = element.style();
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transform", "translateX(100%)");
        let _ = dom::set_timeout_once(TOAST_FADE_MS, move || {
            element.remove();
        });
    })?;

    Ok(())
}

/// 显示类名消息，外观由页面样式表决定，3 秒后直接移除
pub fn show_classed_message(text: &str, kind: ToastKind) -> Result<(), String> {
    let document = dom::document()?;
    let body = document.body().ok_or("页面缺少 body 元素")?;

    let element: HtmlElement = document
        .create_element("div")
        .map_err(|_| "创建消息元素失败")?
        .dyn_into()
        .map_err(|_| "消息元素类型转换失败")?;
    element.set_class_name(&format!("success-message {}", kind.class_name()));
    element.set_text_content(Some(text));

    body.append_child(&element)
        .map_err(|_| "插入消息元素失败")?;

    dom::set_timeout_once(TOAST_DWELL_MS, move || {
        element.remove();
    })?;

    Ok(())
}


#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn toast_is_appended_to_body() {
        show_toast("测试提示", ToastKind::Info).unwrap();

        let document = crate::dom::document().unwrap();
        let body = document.body().unwrap();
        let last = body.last_element_child().unwrap();
        assert_eq!(last.text_content().unwrap(), "测试提示");
        assert!(last.get_attribute("style").unwrap().contains("#5296d5"));
        last.remove();
    }

    #[wasm_bindgen_test]
    fn classed_message_carries_kind_class() {
        show_classed_message("保存成功", ToastKind::Success).unwrap();

        let document = crate::dom::document().unwrap();
        let body = document.body().unwrap();
        let last = body.last_element_child().unwrap();
        assert_eq!(last.class_name(), "success-message success");
        last.remove();
    }
}
