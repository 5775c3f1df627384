//! 图片上传流程
//!
//! 上传期间在光标处插入占位文本，成功后把占位替换成图片语法并
//! 提示文件大小，失败则清掉占位并提示原因。

use std::sync::OnceLock;

use regex::Regex;
use wasm_bindgen::JsValue;
use web_sys::{console, File, FormData};

use utils_common::files::MAX_UPLOAD_IMAGE_BYTES;
use utils_common::toast::{show_toast, ToastKind};

use crate::dom;
use crate::http::{self, FetchOutcome};
use crate::models::UploadResponse;

/// 上传中占位文本，时间戳让同时上传的多张图片互不干扰
pub fn uploading_placeholder(timestamp_ms: f64) -> String {
    format!("![上传中...](uploading-{})", timestamp_ms as u64)
}

/// 清洗原始文件名作图片描述
///
/// 字母数字、中文与 .- 之外的字符换成下划线，最长保留 20 个
/// UTF-16 单位，没有文件名时用 image 兜底。
pub fn sanitize_image_desc(original_name: &str) -> String {
    if original_name.is_empty() {
        return "image".to_string();
    }
    static RE_UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = RE_UNSAFE.get_or_init(|| Regex::new(r"[^0-9A-Za-z_\u{4e00}-\u{9fa5}.-]").unwrap());
    let cleaned = re.replace_all(original_name, "_");
    let units: Vec<u16> = cleaned.encode_utf16().take(20).collect();
    String::from_utf16_lossy(&units)
}

/// 占位文本替换成最终内容，只换第一处
pub fn swap_placeholder(content: &str, placeholder: &str, replacement: &str) -> String {
    content.replacen(placeholder, replacement, 1)
}

/// 校验大小后上传图片文件，文件类型由调用方过滤
pub fn upload_image(file: &File) -> Result<(), String> {
    if file.size() > MAX_UPLOAD_IMAGE_BYTES {
        return show_toast("图片文件太大，最大支持10MB", ToastKind::Error);
    }

    let placeholder = uploading_placeholder(js_sys::Date::now());
    dom::insert_block_into_editor(&placeholder)?;
    dom::refresh_preview()?;

    let form = FormData::new().map_err(|_| "创建表单数据失败")?;
    form.append_with_blob("image", file)
        .map_err(|_| "附加图片文件失败")?;
    form.append_with_str("blogTitle", &dom::blog_title())
        .map_err(|_| "附加文章标题失败")?;

    http::post_form_data(&http::upload_endpoint(), &form, move |outcome| {
        finish_upload(&placeholder, outcome);
    })
}

/// 上传结束的收尾：替换占位文本并提示结果
fn finish_upload(placeholder: &str, outcome: Result<FetchOutcome, String>) {
    match resolve_upload(outcome) {
        Ok(response) => {
            let desc = sanitize_image_desc(&response.original_name);
            let markdown = format!("![{}]({})", desc, response.url);
            if let Err(e) = dom::swap_editor_text(placeholder, &markdown) {
                console::log_1(&JsValue::from_str(&format!("替换上传占位失败: {}", e)));
            }
            let _ = show_toast(
                &format!("图片上传成功！文件大小: {:.1}KB", response.size / 1024.0),
                ToastKind::Success,
            );
        }
        Err(message) => {
            console::error_1(&JsValue::from_str(&format!("图片上传失败: {}", message)));
            if let Err(e) = dom::swap_editor_text(placeholder, "") {
                console::log_1(&JsValue::from_str(&format!("移除上传占位失败: {}", e)));
            }
            let _ = show_toast(&format!("图片上传失败: {}", message), ToastKind::Error);
        }
    }
}

/// 解读上传响应，非 2xx 时取响应体里的错误描述
fn resolve_upload(outcome: Result<FetchOutcome, String>) -> Result<UploadResponse, String> {
    let outcome = outcome?;
    let response: UploadResponse =
        serde_wasm_bindgen::from_value(outcome.body).map_err(|_| "解析上传响应失败")?;
    if !outcome.ok {
        if response.error.is_empty() {
            return Err(format!("上传失败: {}", outcome.status_text));
        }
        return Err(response.error);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_embeds_timestamp() {
        assert_eq!(
            uploading_placeholder(1700000000000.0),
            "![上传中...](uploading-1700000000000)"
        );
    }

    #[test]
    fn swap_replaces_first_occurrence_only() {
        let text = "开头\n![上传中...](uploading-7)\n中间\n![上传中...](uploading-7)";
        let swapped = swap_placeholder(text, "![上传中...](uploading-7)", "![图](u)");
        assert_eq!(swapped, "开头\n![图](u)\n中间\n![上传中...](uploading-7)");
    }

    #[test]
    fn swap_without_match_keeps_text() {
        assert_eq!(swap_placeholder("正文", "![上传中...](uploading-1)", ""), "正文");
    }

    #[test]
    fn desc_keeps_word_chars_chinese_and_dots() {
        assert_eq!(sanitize_image_desc("新年 快乐.jpg"), "新年_快乐.jpg");
        assert_eq!(sanitize_image_desc("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_image_desc("shot-2024_01.png"), "shot-2024_01.png");
    }

    #[test]
    fn desc_is_capped_at_twenty_units() {
        assert_eq!(
            sanitize_image_desc("abcdefghijklmnopqrstuvwxyz.png"),
            "abcdefghijklmnopqrst"
        );
        // 中文同样按 UTF-16 单位截断
        assert_eq!(
            sanitize_image_desc("一二三四五六七八九十一二三四五六七八九十零.png"),
            "一二三四五六七八九十一二三四五六七八九十"
        );
    }

    #[test]
    fn missing_name_falls_back_to_image() {
        assert_eq!(sanitize_image_desc(""), "image");
    }

    #[test]
    fn other_symbols_become_underscores() {
        assert_eq!(sanitize_image_desc("a😀b.png"), "a_b.png");
        assert_eq!(sanitize_image_desc("截图@2x!.png"), "截图_2x_.png");
    }
}
