use wasm_bindgen::prelude::*;
use web_sys::{console, HtmlElement};

use utils_common::dom::{document, set_timeout_once};
use utils_common::storage::take_new_post_title;

/// 横幅入场动画延迟（毫秒）
pub const ENTER_DELAY_MS: i32 = 100;

/// 横幅停留时长（毫秒）
pub const NOTICE_DWELL_MS: i32 = 3000;

/// 淡出动画时长（毫秒）
pub const NOTICE_FADE_MS: i32 = 500;

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    "1.0.0".to_string()
}

/// 发布提示文案
pub fn banner_text(title: &str) -> String {
    format!("🎉 新文章已发布：《{}》", title)
}

/// 读取发布交接标题并播报一次
///
/// 键不存在或存储不可用时静默返回。读取即清除，刷新页面不会
/// 重复提示。
pub fn show_notice_banner() -> Result<(), String> {
    let Some(title) = take_new_post_title() else {
        return Ok(());
    };

    let document = document()?;
    let body = document.body().ok_or("页面缺少 body 元素")?;

    let banner: HtmlElement = document
        .create_element("div")
        .map_err(|_| "创建横幅元素失败")?
        .dyn_into()
        .map_err(|_| "横幅元素类型转换失败")?;
    banner.set_text_content(Some(&banner_text(&title)));
    banner
        .set_attribute(
            "style",
            "position: fixed; top: 80px; left: 50%; transform: translateX(-50%); \
             background: linear-gradient(90deg,#cf8dff,#4affb4); color: #fff; \
             padding: 16px 32px; border-radius: 30px; font-size: 20px; \
             box-shadow: 0 4px 16px rgba(0,0,0,0.12); z-index: 9999; opacity: 0; \
             transition: opacity 0.5s, top 0.5s;",
        )
        .map_err(|_| "设置横幅样式失败")?;

    body.append_child(&banner)
        .map_err(|_| "插入横幅元素失败")?;

    // 入场：淡入并下移
    let entering = banner.clone();
    set_timeout_once(ENTER_DELAY_MS, move || {
        let style = entering.style();
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("top", "120px");
    })?;

    // 停留后淡出回弹，动画结束再移除
    set_timeout_once(NOTICE_DWELL_MS, move || {
        let style = banner.style();
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("top", "80px");
        let _ = set_timeout_once(NOTICE_FADE_MS, move || {
            banner.remove();
        });
    })?;

    Ok(())
}

//===== JS 接口 部分 =====

/// 站点提示JS接口 - 提供给页面脚本使用的API
#[wasm_bindgen]
pub struct SiteNoticeJS;

#[wasm_bindgen]
impl SiteNoticeJS {
    /// 初始化：发布交接存在时播报新文章横幅
    #[wasm_bindgen]
    pub fn init() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        show_notice_banner().map_err(|e| {
            console::log_1(&JsValue::from_str(&format!("初始化站点提示失败: {}", e)));
            JsValue::from_str(&e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_text_wraps_title_in_book_quotes() {
        assert_eq!(banner_text("春日随笔"), "🎉 新文章已发布：《春日随笔》");
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn stored_title_shows_banner_once() {
        utils_common::storage::remember_new_post_title("新的一篇");
        show_notice_banner().unwrap();

        let document = utils_common::dom::document().unwrap();
        let body = document.body().unwrap();
        let banner = body.last_element_child().unwrap();
        assert_eq!(
            banner.text_content().unwrap(),
            "🎉 新文章已发布：《新的一篇》"
        );
        assert!(banner.get_attribute("style").unwrap().contains("opacity: 0"));
        banner.remove();

        // 键读取后即清除，再次进入页面不再播报
        let before = body.child_element_count();
        show_notice_banner().unwrap();
        assert_eq!(body.child_element_count(), before);
    }

    #[wasm_bindgen_test]
    fn absent_key_is_a_quiet_no_op() {
        let _ = utils_common::storage::take_new_post_title();

        let document = utils_common::dom::document().unwrap();
        let body = document.body().unwrap();
        let before = body.child_element_count();
        show_notice_banner().unwrap();
        assert_eq!(body.child_element_count(), before);
    }
}
