//! 编辑页 DOM 适配层
//!
//! 组装编辑面板工具栏与图片插入对话框，绑定实时预览、粘贴与
//! 拖拽上传以及表单发布。事件回调内的错误只记录日志，不向页面
//! 抛出。

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, ClipboardEvent, Document, DragEvent, Event, FileList, HtmlButtonElement, HtmlElement,
    HtmlInputElement, HtmlTextAreaElement, KeyboardEvent,
};

use utils_common::dom::{document, set_timeout_once, window};
use utils_common::files::is_image;
use utils_common::storage::remember_new_post_title;
use utils_common::text::insert_block_at_cursor;
use utils_common::toast::{show_toast, ToastKind};

use crate::http::{self, FetchOutcome};
use crate::models::{self, ApiError};
use crate::preview;
use crate::upload;

/// 插入对话框的内容结构
const DIALOG_HTML: &str = "<h3 style=\"margin: 0 0 16px 0; color: #2d3748;\">插入图片</h3>\
    <div style=\"margin-bottom: 16px;\">\
    <label style=\"display: block; margin-bottom: 6px; font-weight: 500; color: #4a5568;\">图片描述：</label>\
    <input type=\"text\" id=\"imageAlt\" placeholder=\"输入图片描述\" style=\"width: 100%; padding: 8px 12px; border: 1px solid #e1e8f0; border-radius: 4px; box-sizing: border-box;\">\
    </div>\
    <div style=\"margin-bottom: 20px;\">\
    <label style=\"display: block; margin-bottom: 6px; font-weight: 500; color: #4a5568;\">图片路径：</label>\
    <input type=\"text\" id=\"imageSrc\" placeholder=\"/images/文件名.jpg 或 https://...\" style=\"width: 100%; padding: 8px 12px; border: 1px solid #e1e8f0; border-radius: 4px; box-sizing: border-box;\">\
    <div style=\"margin-top: 8px; font-size: 12px; color: #718096;\">\
    <div>📁 本地图片：/images/your-image.jpg</div>\
    <div>🌐 外部图片：https://example.com/image.jpg</div>\
    </div>\
    </div>\
    <div style=\"display: flex; gap: 8px; justify-content: flex-end;\">\
    <button type=\"button\" id=\"cancelBtn\" style=\"padding: 8px 16px; border: 1px solid #e1e8f0; background: white; border-radius: 4px; cursor: pointer;\">取消</button>\
    <button type=\"button\" id=\"insertBtn\" style=\"padding: 8px 16px; background: #5296d5; color: white; border: none; border-radius: 4px; cursor: pointer;\">插入</button>\
    </div>";

/// 初始化编辑页：默认日期、表单发布、工具栏、上传入口与实时预览
pub fn init_page() -> Result<(), String> {
    let document = document()?;

    set_default_date(&document);
    bind_submit(&document)?;

    // 预览相关的功能都依赖编辑器与预览面板同时存在
    if editor_textarea(&document).is_none()
        || document.get_element_by_id("previewContent").is_none()
    {
        return Ok(());
    }

    bind_editor_input(&document)?;
    build_toolbar(&document)?;
    bind_paste(&document)?;
    bind_drag(&document)?;
    update_preview(&document)
}

/// 把编辑器内容渲染到预览面板
fn update_preview(document: &Document) -> Result<(), String> {
    let Some(editor) = editor_textarea(document) else {
        return Ok(());
    };
    let Some(panel) = document.get_element_by_id("previewContent") else {
        return Ok(());
    };
    panel.set_inner_html(&preview::render_preview(&editor.value()));
    Ok(())
}

/// 供上传流程使用的预览刷新入口
pub fn refresh_preview() -> Result<(), String> {
    update_preview(&document()?)
}

/// 在光标处块级插入文本并聚焦编辑器
pub fn insert_block_into_editor(text: &str) -> Result<(), String> {
    let document = document()?;
    let Some(editor) = editor_textarea(&document) else {
        return Ok(());
    };
    let start = editor.selection_start().ok().flatten().unwrap_or(0) as usize;
    let end = editor.selection_end().ok().flatten().unwrap_or(0) as usize;
    let edit = insert_block_at_cursor(&editor.value(), start, end, text);
    editor.set_value(&edit.text);
    let _ = editor.set_selection_range(edit.cursor as u32, edit.cursor as u32);
    let _ = editor.focus();
    Ok(())
}

/// 替换编辑器里的占位文本并刷新预览
pub fn swap_editor_text(placeholder: &str, replacement: &str) -> Result<(), String> {
    let document = document()?;
    let Some(editor) = editor_textarea(&document) else {
        return Ok(());
    };
    let value = upload::swap_placeholder(&editor.value(), placeholder, replacement);
    editor.set_value(&value);
    update_preview(&document)
}

/// 上传时随图片提交的文章标题，空标题用 untitled 兜底
pub fn blog_title() -> String {
    let Ok(document) = document() else {
        return "untitled".to_string();
    };
    let value = named_value(&document, "title");
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

fn editor_textarea(document: &Document) -> Option<HtmlTextAreaElement> {
    document
        .get_element_by_id("markdownEditor")?
        .dyn_into::<HtmlTextAreaElement>()
        .ok()
}

/// 日期输入框填入今天的日期
fn set_default_date(document: &Document) {
    let Some(input) = named_input(document, "date") else {
        return;
    };
    let today = js_sys::Date::new_0();
    input.set_value(&format!(
        "{}-{:02}-{:02}",
        today.get_full_year(),
        today.get_month() + 1,
        today.get_date()
    ));
}

fn named_input(document: &Document, name: &str) -> Option<HtmlInputElement> {
    document
        .query_selector(&format!("input[name=\"{}\"]", name))
        .ok()
        .flatten()?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

fn named_value(document: &Document, name: &str) -> String {
    named_input(document, name)
        .map(|input| input.value())
        .unwrap_or_default()
}

/// 编辑器输入时刷新预览
fn bind_editor_input(document: &Document) -> Result<(), String> {
    let Some(editor) = editor_textarea(document) else {
        return Ok(());
    };
    let doc = document.clone();
    let on_input = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = update_preview(&doc) {
            console::log_1(&JsValue::from_str(&format!("刷新预览失败: {}", e)));
        }
    });
    editor
        .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
        .map_err(|_| "绑定编辑器输入失败")?;
    on_input.forget();
    Ok(())
}

/// 编辑面板头部改造成 标题 + 工具栏，挂上三个图片操作按钮
fn build_toolbar(document: &Document) -> Result<(), String> {
    let Some(panel) = document
        .query_selector(".editor-panel .panel-header")
        .map_err(|_| "查询编辑面板失败")?
    else {
        return Ok(());
    };
    let panel: HtmlElement = panel.dyn_into().map_err(|_| "编辑面板类型转换失败")?;

    let upload_btn = styled_button(document, "📷 上传", "上传图片文件", "#5296d5")?;
    let refresh_btn = styled_button(document, "🔄 刷新预览", "刷新图片预览", "#48bb78")?;
    let insert_btn = styled_button(document, "🖼️ 插入", "插入图片语法", "#ed8936")?;
    let file_input = hidden_file_input(document)?;

    let picker = file_input.clone();
    let onclick = Closure::<dyn FnMut()>::new(move || {
        picker.click();
    });
    upload_btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();

    let doc = document.clone();
    let onclick = Closure::<dyn FnMut()>::new(move || {
        let result =
            update_preview(&doc).and_then(|_| show_toast("预览已刷新", ToastKind::Success));
        if let Err(e) = result {
            console::log_1(&JsValue::from_str(&format!("刷新预览失败: {}", e)));
        }
    });
    refresh_btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();

    let doc = document.clone();
    let onclick = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = show_insert_dialog(&doc) {
            console::log_1(&JsValue::from_str(&format!("打开插入对话框失败: {}", e)));
        }
    });
    insert_btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();

    // 面板原有标题挪进 span，右侧放工具栏
    let original_title = panel.text_content().unwrap_or_default();
    panel.set_inner_html("");
    panel
        .set_attribute(
            "style",
            "background: #f8fafc; border-bottom: 1px solid #e1e8f0; padding: 12px 20px; \
             display: flex; justify-content: space-between; align-items: center;",
        )
        .map_err(|_| "设置面板样式失败")?;

    let title_span = create_element(document, "span")?;
    title_span.set_text_content(Some(&original_title));
    title_span
        .set_attribute("style", "color: #2d3748; font-weight: 600; font-size: 14px;")
        .map_err(|_| "设置标题样式失败")?;

    let toolbar = create_element(document, "div")?;
    toolbar
        .set_attribute("style", "display: flex; align-items: center; gap: 8px;")
        .map_err(|_| "设置工具栏样式失败")?;

    toolbar
        .append_child(&upload_btn)
        .map_err(|_| "组装工具栏失败")?;
    toolbar
        .append_child(&refresh_btn)
        .map_err(|_| "组装工具栏失败")?;
    toolbar
        .append_child(&insert_btn)
        .map_err(|_| "组装工具栏失败")?;

    panel.append_child(&title_span).map_err(|_| "组装面板失败")?;
    panel.append_child(&toolbar).map_err(|_| "组装面板失败")?;

    let body = document.body().ok_or("页面缺少 body 元素")?;
    body.append_child(&file_input)
        .map_err(|_| "插入文件控件失败")?;
    Ok(())
}

fn create_element(document: &Document, tag: &str) -> Result<HtmlElement, String> {
    let element = document
        .create_element(tag)
        .map_err(|_| "创建元素失败")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "元素类型转换失败")?;
    Ok(element)
}

fn styled_button(
    document: &Document,
    label: &str,
    tooltip: &str,
    background: &str,
) -> Result<HtmlElement, String> {
    let button = create_element(document, "button")?;
    button
        .set_attribute("type", "button")
        .map_err(|_| "设置按钮类型失败")?;
    button.set_inner_html(label);
    button
        .set_attribute("title", tooltip)
        .map_err(|_| "设置按钮提示失败")?;
    button
        .set_attribute(
            "style",
            &format!(
                "background: {}; color: white; border: none; padding: 6px 12px; \
                 border-radius: 4px; cursor: pointer; font-size: 12px; transition: all 0.2s;",
                background
            ),
        )
        .map_err(|_| "设置按钮样式失败")?;
    bind_hover(&button)?;
    Ok(button)
}

/// 悬停时按钮轻微上浮
fn bind_hover(button: &HtmlElement) -> Result<(), String> {
    let target = button.clone();
    let on_enter = Closure::<dyn FnMut()>::new(move || {
        let style = target.style();
        let _ = style.set_property("opacity", "0.8");
        let _ = style.set_property("transform", "translateY(-1px)");
    });
    button
        .add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())
        .map_err(|_| "绑定悬停事件失败")?;
    on_enter.forget();

    let target = button.clone();
    let on_leave = Closure::<dyn FnMut()>::new(move || {
        let style = target.style();
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("transform", "translateY(0)");
    });
    button
        .add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())
        .map_err(|_| "绑定悬停事件失败")?;
    on_leave.forget();
    Ok(())
}

/// 隐藏的文件选择框，选中的图片逐个上传后清空选择
fn hidden_file_input(document: &Document) -> Result<HtmlInputElement, String> {
    let input: HtmlInputElement = document
        .create_element("input")
        .map_err(|_| "创建文件控件失败")?
        .dyn_into()
        .map_err(|_| "文件控件类型转换失败")?;
    input.set_type("file");
    input.set_accept("image/*");
    input.set_multiple(true);
    let _ = input.style().set_property("display", "none");

    let picker = input.clone();
    let on_change = Closure::<dyn FnMut()>::new(move || {
        if let Some(files) = picker.files() {
            upload_image_files(&files);
        }
        picker.set_value("");
    });
    input
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(|_| "绑定文件选择失败")?;
    on_change.forget();
    Ok(input)
}

/// 逐个上传文件列表里的图片，其余类型忽略
fn upload_image_files(files: &FileList) {
    for i in 0..files.length() {
        let Some(file) = files.item(i) else {
            continue;
        };
        if !is_image(&file.type_()) {
            continue;
        }
        if let Err(e) = upload::upload_image(&file) {
            console::log_1(&JsValue::from_str(&format!("上传图片失败: {}", e)));
        }
    }
}

/// 打开图片语法插入对话框并聚焦描述输入框
fn show_insert_dialog(document: &Document) -> Result<(), String> {
    let body = document.body().ok_or("页面缺少 body 元素")?;

    let overlay = create_element(document, "div")?;
    overlay
        .set_attribute(
            "style",
            "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
             background: rgba(0, 0, 0, 0.5); display: flex; align-items: center; \
             justify-content: center; z-index: 2000;",
        )
        .map_err(|_| "设置对话框样式失败")?;

    let content = create_element(document, "div")?;
    content
        .set_attribute(
            "style",
            "background: white; padding: 24px; border-radius: 8px; \
             box-shadow: 0 8px 24px rgba(0, 0, 0, 0.3); width: 90%; max-width: 500px;",
        )
        .map_err(|_| "设置对话框样式失败")?;
    content.set_inner_html(DIALOG_HTML);

    overlay.append_child(&content).map_err(|_| "组装对话框失败")?;
    body.append_child(&overlay).map_err(|_| "插入对话框失败")?;

    if let Some(alt) = document.get_element_by_id("imageAlt") {
        if let Ok(alt) = alt.dyn_into::<HtmlElement>() {
            let _ = alt.focus();
        }
    }

    bind_dialog_actions(document, &overlay)
}

/// 对话框的取消、插入、遮罩点击与 Esc 关闭
fn bind_dialog_actions(document: &Document, overlay: &HtmlElement) -> Result<(), String> {
    if let Some(cancel) = document.get_element_by_id("cancelBtn") {
        let cancel: HtmlElement = cancel.dyn_into().map_err(|_| "取消按钮类型转换失败")?;
        let dialog = overlay.clone();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            dialog.remove();
        });
        cancel.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(insert) = document.get_element_by_id("insertBtn") {
        let insert: HtmlElement = insert.dyn_into().map_err(|_| "插入按钮类型转换失败")?;
        let doc = document.clone();
        let dialog = overlay.clone();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = insert_from_dialog(&doc, &dialog) {
                console::log_1(&JsValue::from_str(&format!("插入图片语法失败: {}", e)));
            }
        });
        insert.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    let dialog = overlay.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let hit_backdrop = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlElement>().ok())
            .map(|target| target == dialog)
            .unwrap_or(false);
        if hit_backdrop {
            dialog.remove();
        }
    });
    overlay
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|_| "绑定遮罩点击失败")?;
    on_click.forget();

    // 对话框移除后监听保留但不再生效
    let dialog = overlay.clone();
    let on_esc = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if event.key() == "Escape" && dialog.is_connected() {
            dialog.remove();
        }
    });
    document
        .add_event_listener_with_callback("keydown", on_esc.as_ref().unchecked_ref())
        .map_err(|_| "绑定快捷键失败")?;
    on_esc.forget();
    Ok(())
}

/// 读取对话框输入，插入图片语法后关闭对话框
fn insert_from_dialog(document: &Document, dialog: &HtmlElement) -> Result<(), String> {
    let alt_value = input_value(document, "imageAlt");
    let src_value = input_value(document, "imageSrc");

    let alt = alt_value.trim();
    let alt = if alt.is_empty() { "图片" } else { alt };
    let src = src_value.trim();
    if src.is_empty() {
        window()?
            .alert_with_message("请输入图片路径")
            .map_err(|_| "弹出提示失败")?;
        return Ok(());
    }

    insert_block_into_editor(&format!("![{}]({})", alt, src))?;
    update_preview(document)?;
    dialog.remove();
    Ok(())
}

fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// 粘贴板里的第一张图片直接走上传
fn bind_paste(document: &Document) -> Result<(), String> {
    let Some(editor) = editor_textarea(document) else {
        return Ok(());
    };
    let on_paste = Closure::<dyn FnMut(ClipboardEvent)>::new(move |event: ClipboardEvent| {
        let Some(data) = event.clipboard_data() else {
            return;
        };
        let items = data.items();
        for i in 0..items.length() {
            let Some(item) = items.get(i) else {
                continue;
            };
            if !is_image(&item.type_()) {
                continue;
            }
            event.prevent_default();
            if let Ok(Some(file)) = item.get_as_file() {
                if let Err(e) = upload::upload_image(&file) {
                    console::log_1(&JsValue::from_str(&format!("上传粘贴图片失败: {}", e)));
                }
            }
            break;
        }
    });
    editor
        .add_event_listener_with_callback("paste", on_paste.as_ref().unchecked_ref())
        .map_err(|_| "绑定粘贴事件失败")?;
    on_paste.forget();
    Ok(())
}

/// 拖拽图片到编辑器上传，悬停时高亮编辑区
fn bind_drag(document: &Document) -> Result<(), String> {
    let Some(editor) = editor_textarea(document) else {
        return Ok(());
    };

    let target = editor.clone();
    let on_over = Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
        event.prevent_default();
        if let Some(transfer) = event.data_transfer() {
            transfer.set_drop_effect("copy");
        }
        let style = target.style();
        let _ = style.set_property("background", "#f0f8ff");
        let _ = style.set_property("border-color", "#5296d5");
    });
    editor
        .add_event_listener_with_callback("dragover", on_over.as_ref().unchecked_ref())
        .map_err(|_| "绑定拖拽事件失败")?;
    on_over.forget();

    let target = editor.clone();
    let on_drop = Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
        event.prevent_default();
        let style = target.style();
        let _ = style.set_property("background", "");
        let _ = style.set_property("border-color", "");
        if let Some(files) = event.data_transfer().and_then(|transfer| transfer.files()) {
            upload_image_files(&files);
        }
    });
    editor
        .add_event_listener_with_callback("drop", on_drop.as_ref().unchecked_ref())
        .map_err(|_| "绑定拖拽事件失败")?;
    on_drop.forget();
    Ok(())
}

/// 表单提交改走接口发布
fn bind_submit(document: &Document) -> Result<(), String> {
    let Some(form) = document.get_element_by_id("postForm") else {
        return Ok(());
    };
    let form: HtmlElement = form.dyn_into().map_err(|_| "表单类型转换失败")?;
    let doc = document.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        if let Err(e) = publish_post(&doc) {
            console::log_1(&JsValue::from_str(&format!("发布文章失败: {}", e)));
        }
    });
    form.set_onsubmit(Some(on_submit.as_ref().unchecked_ref()));
    on_submit.forget();
    Ok(())
}

/// 采集表单发布文章，请求期间按钮进入发布中状态
fn publish_post(document: &Document) -> Result<(), String> {
    let Some(button) = document
        .query_selector(".submit-btn")
        .map_err(|_| "查询提交按钮失败")?
    else {
        return Ok(());
    };
    let button: HtmlButtonElement = button.dyn_into().map_err(|_| "提交按钮类型转换失败")?;
    let original_label = button.text_content().unwrap_or_default();

    button.set_text_content(Some("⏳ 发布中..."));
    button.set_disabled(true);
    let _ = button.style().set_property("opacity", "0.7");

    let payload = match collect_payload(document) {
        Ok(payload) => payload,
        Err(error) => {
            console::error_1(&JsValue::from_str(&format!("提交失败: {}", error)));
            return mark_publish_failed(&button, original_label);
        }
    };
    let json = match serde_json::to_string(&payload) {
        Ok(json) => json,
        Err(_) => {
            console::error_1(&JsValue::from_str("提交失败: 序列化发布数据失败"));
            return mark_publish_failed(&button, original_label);
        }
    };

    http::post_json(&http::posts_endpoint(), &json, move |outcome| {
        finish_publish(&button, original_label, &payload.title, outcome);
    })
}

/// 从表单字段采集发布数据
fn collect_payload(document: &Document) -> Result<models::PostPayload, String> {
    let body = document
        .query_selector("textarea[name=\"body\"]")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|textarea| textarea.value())
        .unwrap_or_default();

    models::build_payload(
        &named_value(document, "title"),
        &named_value(document, "date"),
        &named_value(document, "tags"),
        &named_value(document, "categories"),
        &body,
    )
}

/// 发布结束：成功时展示横幅并跳转首页，失败恢复按钮
fn finish_publish(
    button: &HtmlButtonElement,
    original_label: String,
    title: &str,
    outcome: Result<FetchOutcome, String>,
) {
    match resolve_publish(outcome) {
        Ok(()) => {
            button.set_text_content(Some("✅ 发布成功！"));
            let _ = button.style().set_property("background", "#48bb78");
            let _ = button.style().set_property("opacity", "1");
            if let Err(e) = celebrate_publish(title) {
                console::log_1(&JsValue::from_str(&format!("展示发布横幅失败: {}", e)));
            }
        }
        Err(message) => {
            console::error_1(&JsValue::from_str(&format!("提交失败: {}", message)));
            let _ = mark_publish_failed(button, original_label);
        }
    }
}

/// 非 2xx 响应取响应体里的错误描述
fn resolve_publish(outcome: Result<FetchOutcome, String>) -> Result<(), String> {
    let outcome = outcome?;
    if outcome.ok {
        return Ok(());
    }
    let error: ApiError = serde_wasm_bindgen::from_value(outcome.body).unwrap_or_default();
    if error.error.is_empty() {
        Err("发布失败".to_string())
    } else {
        Err(error.error)
    }
}

/// 按钮进入失败状态，3 秒后恢复原样
fn mark_publish_failed(button: &HtmlButtonElement, original_label: String) -> Result<(), String> {
    button.set_text_content(Some("❌ 发布失败"));
    let _ = button.style().set_property("background", "#f56565");
    let _ = button.style().set_property("opacity", "1");

    let button = button.clone();
    set_timeout_once(3000, move || {
        button.set_text_content(Some(&original_label));
        let _ = button.style().set_property("background", "");
        let _ = button.style().set_property("opacity", "1");
        button.set_disabled(false);
    })
}

/// 居中横幅提示发布成功，记下标题供首页播报，3 秒后回首页
fn celebrate_publish(title: &str) -> Result<(), String> {
    let document = document()?;
    let body = document.body().ok_or("页面缺少 body 元素")?;

    let banner = create_element(&document, "div")?;
    banner.set_inner_html(
        "<div style=\"text-align: center;\">\
         <div style=\"font-size: 18px; margin-bottom: 10px;\">🎉 文章发布成功！</div>\
         <div style=\"font-size: 14px; opacity: 0.9;\">图片预览已修复，正在跳转...</div>\
         </div>",
    );
    banner
        .set_attribute(
            "style",
            "position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%); \
             background: #48bb78; color: white; padding: 24px 32px; border-radius: 8px; \
             box-shadow: 0 8px 24px rgba(0, 0, 0, 0.3); z-index: 2000; font-weight: 500;",
        )
        .map_err(|_| "设置横幅样式失败")?;
    body.append_child(&banner).map_err(|_| "插入横幅失败")?;

    remember_new_post_title(title);

    set_timeout_once(3000, || {
        if let Ok(win) = window() {
            let _ = win.location().set_href("/");
        }
    })
}
