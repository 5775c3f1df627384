//! 编辑器实时预览
//!
//! Markdown 渲染交给页面通过 script 标签引入的 marked.js，这里
//! 负责空内容与解析失败时的占位，并把相对图片路径改写到图片
//! 服务器、给图片注入展示样式。

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::http;

/// 没有内容时的预览占位
pub const PREVIEW_EMPTY_HTML: &str =
    "<div class=\"preview-empty\">开始编写内容，这里将显示实时预览...</div>";

/// 解析失败时的预览占位
pub const PREVIEW_ERROR_HTML: &str =
    "<div class=\"preview-empty\">Markdown 解析错误，请检查语法...</div>";

/// 注入到预览图片上的内联样式
const PREVIEW_IMG_STYLE: &str = "max-width: 100%; height: auto; border-radius: 6px; \
     margin: 1em 0; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = marked, js_name = parse)]
    fn marked_parse(markdown: &str) -> Result<JsValue, JsValue>;
}

/// 渲染编辑预览
pub fn render_preview(markdown: &str) -> String {
    let markdown = markdown.trim();
    if markdown.is_empty() {
        return PREVIEW_EMPTY_HTML.to_string();
    }
    match marked_parse(markdown) {
        Ok(html) => decorate_preview_html(&html.as_string().unwrap_or_default()),
        Err(error) => {
            console::error_2(&JsValue::from_str("Markdown 解析错误:"), &error);
            PREVIEW_ERROR_HTML.to_string()
        }
    }
}

/// 相对图片路径指向图片服务器，所有图片加上统一的展示样式
pub fn decorate_preview_html(html: &str) -> String {
    let html = html.replace(
        "src=\"/images/",
        &format!("src=\"{}/images/", http::IMAGE_SERVER_URL),
    );
    html.replace("<img ", &format!("<img style=\"{}\" ", PREVIEW_IMG_STYLE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_image_src_points_at_image_server() {
        let html = "<p><img src=\"/images/post/1.png\" alt=\"one\"></p>";
        assert_eq!(
            decorate_preview_html(html),
            format!(
                "<p><img style=\"{}\" src=\"http://localhost:3000/images/post/1.png\" alt=\"one\"></p>",
                PREVIEW_IMG_STYLE
            )
        );
    }

    #[test]
    fn external_image_src_is_left_alone() {
        let html = "<img src=\"https://example.com/pic.png\">";
        assert_eq!(
            decorate_preview_html(html),
            format!(
                "<img style=\"{}\" src=\"https://example.com/pic.png\">",
                PREVIEW_IMG_STYLE
            )
        );
    }

    #[test]
    fn every_image_in_the_document_is_decorated() {
        let html = "<img src=\"/images/a.png\"><p>中间</p><img src=\"/images/b.png\">";
        let decorated = decorate_preview_html(html);
        assert_eq!(decorated.matches("http://localhost:3000/images/").count(), 2);
        assert_eq!(decorated.matches("<img style=").count(), 2);
    }

    #[test]
    fn html_without_images_is_unchanged() {
        let html = "<h1>标题</h1><p>正文</p>";
        assert_eq!(decorate_preview_html(html), html);
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn blank_content_shows_placeholder() {
        assert_eq!(render_preview(""), PREVIEW_EMPTY_HTML);
        assert_eq!(render_preview("  \n\t "), PREVIEW_EMPTY_HTML);
    }

    #[wasm_bindgen_test]
    fn missing_renderer_falls_back_to_error_panel() {
        // 测试页面没有引入 marked.js，解析调用抛出的异常走失败占位
        assert_eq!(render_preview("# 标题"), PREVIEW_ERROR_HTML);
    }
}
