//! 文章页 DOM 适配层
//!
//! 绑定编辑切换、工具栏、图片上传、对话框与键盘快捷键，并把
//! 状态机输出的面板显示表同步到页面。事件回调内的错误只记录
//! 日志，不向页面抛出。

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, Document, DragEvent, Element, Event, File, FileList, FileReader, HtmlElement,
    HtmlInputElement, HtmlTextAreaElement, KeyboardEvent,
};

use utils_common::dom::{document, set_timeout_once, window, Display};
use utils_common::files::{check_image_file, ImageFileError, MAX_PREVIEW_IMAGE_BYTES};
use utils_common::text::{insert_at_cursor, selection, utf16_len, word_count};
use utils_common::toast::{show_classed_message, ToastKind};

use crate::markdown;
use crate::models::{shortcut_for, PostDraft, ShortcutCommand, ToolbarAction};
use crate::toc;
use crate::PostPage;

/// 初始化文章页：目录联动、编辑控件、上传区与键盘快捷键
pub fn init_page() -> Result<(), String> {
    let document = document()?;
    PostPage::reset()?;

    toc::init_toc(&document)?;
    bind_edit_buttons(&document)?;
    bind_editor_input(&document)?;
    bind_toolbar(&document)?;
    bind_upload_zone(&document)?;
    bind_modal_tabs(&document)?;
    bind_shortcuts(&document)?;
    update_stats(&document)?;

    console::log_1(&JsValue::from_str("文章页面加载完成，编辑功能已启用"));
    Ok(())
}

/// 切换编辑模式并同步各面板显示
///
/// 进入编辑模式时若编辑器为空则用正文填充，并在面板展开后聚焦。
pub fn apply_toggle_edit() -> Result<(), String> {
    let document = document()?;
    let panels = PostPage::toggle_edit()?;

    if let Some(body) = document.body() {
        if panels.editing {
            let _ = body.class_list().add_1("edit-mode");
        } else {
            let _ = body.class_list().remove_1("edit-mode");
        }
    }

    if let Some(button) = document.get_element_by_id("toggle-edit") {
        if panels.editing {
            let _ = button.class_list().add_1("active");
        } else {
            let _ = button.class_list().remove_1("active");
        }
        if let Ok(Some(label)) = button.query_selector(".edit-text") {
            label.set_text_content(Some(panels.edit_label));
        }
    }

    set_display(&document, "save-post", panels.save_button);
    set_display(&document, "post-meta-edit", panels.meta_panel);
    set_display(&document, "edit-toolbar", panels.toolbar);
    set_display(&document, "post-content", panels.content);
    set_display(&document, "post-editor", panels.editor);
    if let Some(preview) = panels.preview {
        set_display(&document, "post-preview", preview);
    }

    if panels.editing {
        seed_editor(&document);
        focus_editor_later(&document)?;
    }
    Ok(())
}

/// 切换预览模式，未处于编辑模式时不生效
pub fn apply_toggle_preview() -> Result<(), String> {
    let document = document()?;
    let Some(panels) = PostPage::toggle_preview()? else {
        return Ok(());
    };

    set_display(&document, "post-editor", panels.editor);
    set_display(&document, "post-preview", panels.preview);
    if panels.previewing {
        update_preview(&document)?;
    }

    if let Ok(Some(button)) = document.query_selector("[data-action=\"preview\"]") {
        if panels.previewing {
            let _ = button.class_list().add_1("active");
        } else {
            let _ = button.class_list().remove_1("active");
        }
    }
    Ok(())
}

/// 把编辑器内容渲染进预览面板
pub fn update_preview(document: &Document) -> Result<(), String> {
    let Some(editor) = editor_textarea(document) else {
        return Ok(());
    };
    let Some(preview) = document.get_element_by_id("preview-content") else {
        return Ok(());
    };
    preview.set_inner_html(&markdown::preview_html(&editor.value()));
    Ok(())
}

/// 更新字符数与词数统计
pub fn update_stats(document: &Document) -> Result<(), String> {
    let Some(editor) = editor_textarea(document) else {
        return Ok(());
    };
    let text = editor.value();
    if let Some(el) = document.get_element_by_id("char-count") {
        el.set_text_content(Some(&utf16_len(&text).to_string()));
    }
    if let Some(el) = document.get_element_by_id("word-count") {
        el.set_text_content(Some(&word_count(&text).to_string()));
    }
    Ok(())
}

/// 分发工具栏动作：文本动作插入编辑器，其余打开对话框或切换预览
pub fn run_toolbar_action(action: &str) -> Result<(), String> {
    let document = document()?;
    let Some(editor) = editor_textarea(&document) else {
        return Ok(());
    };
    let Some(action) = ToolbarAction::from_attr(action) else {
        return Ok(());
    };

    match action {
        ToolbarAction::Link => show_link_modal(&document),
        ToolbarAction::Image => show_image_modal(&document),
        ToolbarAction::Preview => apply_toggle_preview(),
        _ => {
            let selected = selected_text(&editor);
            if let Some((text, offset)) = action.replacement(&selected) {
                insert_into_editor(&document, &editor, &text, offset)?;
            }
            Ok(())
        }
    }
}

/// 采集编辑数据并模拟保存，保存期间页面进入 saving 状态
pub fn apply_save() -> Result<(), String> {
    if !PostPage::is_editing()? {
        return Ok(());
    }
    let document = document()?;
    let draft = collect_draft(&document);

    if let Some(body) = document.body() {
        let _ = body.class_list().add_1("saving");
    }
    set_save_label(&document, "保存中...");

    set_timeout_once(1000, move || {
        finish_save(&draft);
    })
}

/// 链接对话框确认：校验地址后把链接插入编辑器
pub fn insert_link_from_modal() -> Result<(), String> {
    let document = document()?;
    let url = input_value(&document, "link-url");
    if url.is_empty() {
        return show_classed_message("请输入链接地址", ToastKind::Error);
    }
    let text = input_value(&document, "link-text");
    let label = if text.is_empty() { url.clone() } else { text };

    let Some(editor) = editor_textarea(&document) else {
        return Ok(());
    };
    let markdown = format!("[{}]({})", label, url);
    insert_into_editor(&document, &editor, &markdown, 0)?;
    apply_close_link_modal()
}

/// 图片对话框确认：校验地址后把图片插入编辑器
pub fn insert_image_from_modal() -> Result<(), String> {
    let document = document()?;
    let url = input_value(&document, "image-url");
    if url.is_empty() {
        return show_classed_message("请输入图片链接", ToastKind::Error);
    }
    let alt = input_value(&document, "image-alt");
    insert_image_markdown(&url, &alt)
}

/// 关闭图片对话框
pub fn apply_close_image_modal() -> Result<(), String> {
    let document = document()?;
    if let Some(modal) = modal_element(&document, "image-modal") {
        let _ = modal.style().set_property("display", "none");
    }
    Ok(())
}

/// 关闭链接对话框并清空输入
pub fn apply_close_link_modal() -> Result<(), String> {
    let document = document()?;
    if let Some(modal) = modal_element(&document, "link-modal") {
        let _ = modal.style().set_property("display", "none");
        set_input_value(&document, "link-text", "");
        set_input_value(&document, "link-url", "");
    }
    Ok(())
}

fn set_display(document: &Document, id: &str, display: Display) {
    if let Some(el) = document.get_element_by_id(id) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property("display", display.as_css());
        }
    }
}

fn editor_textarea(document: &Document) -> Option<HtmlTextAreaElement> {
    document
        .get_element_by_id("markdown-editor")?
        .dyn_into::<HtmlTextAreaElement>()
        .ok()
}

/// 编辑器为空时用正文 HTML 填充
fn seed_editor(document: &Document) {
    let Some(editor) = editor_textarea(document) else {
        return;
    };
    if !editor.value().trim().is_empty() {
        return;
    }
    if let Some(content) = document.get_element_by_id("post-content") {
        editor.set_value(&content.inner_html());
    }
}

/// 等面板展开后再聚焦编辑器
fn focus_editor_later(document: &Document) -> Result<(), String> {
    let Some(editor) = editor_textarea(document) else {
        return Ok(());
    };
    set_timeout_once(100, move || {
        let _ = editor.focus();
    })
}

fn selected_text(editor: &HtmlTextAreaElement) -> String {
    let start = editor.selection_start().ok().flatten().unwrap_or(0);
    let end = editor.selection_end().ok().flatten().unwrap_or(0);
    selection(&editor.value(), start as usize, end as usize)
}

/// 在光标处插入文本，光标落点由编辑结果决定，插入后刷新统计
fn insert_into_editor(
    document: &Document,
    editor: &HtmlTextAreaElement,
    text: &str,
    cursor_offset: i32,
) -> Result<(), String> {
    let start = editor.selection_start().ok().flatten().unwrap_or(0);
    let end = editor.selection_end().ok().flatten().unwrap_or(0);

    let edit = insert_at_cursor(&editor.value(), start as usize, end as usize, text, cursor_offset);
    editor.set_value(&edit.text);
    let _ = editor.set_selection_range(edit.cursor as u32, edit.cursor as u32);
    let _ = editor.focus();

    update_stats(document)
}

/// 把图片 Markdown 插入编辑器并关闭图片对话框
fn insert_image_markdown(src: &str, alt: &str) -> Result<(), String> {
    let document = document()?;
    let Some(editor) = editor_textarea(&document) else {
        return Ok(());
    };
    let markdown = format!("![{}]({})", alt, src);
    insert_into_editor(&document, &editor, &markdown, 0)?;
    apply_close_image_modal()
}

fn bind_edit_buttons(document: &Document) -> Result<(), String> {
    if let Some(button) = document.get_element_by_id("toggle-edit") {
        let button: HtmlElement = button.dyn_into().map_err(|_| "编辑按钮类型转换失败")?;
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = apply_toggle_edit() {
                console::log_1(&JsValue::from_str(&format!("切换编辑模式失败: {}", e)));
            }
        });
        button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(button) = document.get_element_by_id("save-post") {
        let button: HtmlElement = button.dyn_into().map_err(|_| "保存按钮类型转换失败")?;
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = apply_save() {
                console::log_1(&JsValue::from_str(&format!("保存文章失败: {}", e)));
            }
        });
        button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(button) = document.get_element_by_id("refresh-preview") {
        let button: HtmlElement = button.dyn_into().map_err(|_| "刷新按钮类型转换失败")?;
        let doc = document.clone();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = update_preview(&doc) {
                console::log_1(&JsValue::from_str(&format!("刷新预览失败: {}", e)));
            }
        });
        button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

/// 编辑器输入时同步统计与预览
fn bind_editor_input(document: &Document) -> Result<(), String> {
    let Some(editor) = editor_textarea(document) else {
        return Ok(());
    };
    let doc = document.clone();
    let on_input = Closure::<dyn FnMut()>::new(move || {
        let result = update_stats(&doc).and_then(|_| update_preview(&doc));
        if let Err(e) = result {
            console::log_1(&JsValue::from_str(&format!("同步编辑内容失败: {}", e)));
        }
    });
    editor
        .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
        .map_err(|_| "绑定编辑器输入失败")?;
    on_input.forget();
    Ok(())
}

fn bind_toolbar(document: &Document) -> Result<(), String> {
    let buttons = document
        .query_selector_all(".toolbar-btn")
        .map_err(|_| "查询工具栏按钮失败")?;

    for i in 0..buttons.length() {
        let node = match buttons.item(i) {
            Some(node) => node,
            None => continue,
        };
        let button: HtmlElement = match node.dyn_into() {
            Ok(el) => el,
            Err(_) => continue,
        };

        let clicked = button.clone();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            let action = clicked.get_attribute("data-action").unwrap_or_default();
            if let Err(e) = run_toolbar_action(&action) {
                console::log_1(&JsValue::from_str(&format!("工具栏操作失败: {}", e)));
            }
        });
        button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

/// 上传区：点击选择文件，拖拽投放，文件走本地预览
fn bind_upload_zone(document: &Document) -> Result<(), String> {
    let Some(input) = document.get_element_by_id("image-upload") else {
        return Ok(());
    };
    let Some(zone) = document.get_element_by_id("upload-zone") else {
        return Ok(());
    };
    let input: HtmlInputElement = input.dyn_into().map_err(|_| "上传控件类型转换失败")?;
    let zone: HtmlElement = zone.dyn_into().map_err(|_| "上传区类型转换失败")?;

    // 点击上传区域触发文件选择
    let file_input = input.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        file_input.click();
    });
    zone.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|_| "绑定上传区点击失败")?;
    on_click.forget();

    let file_input = input.clone();
    let on_change = Closure::<dyn FnMut()>::new(move || {
        if let Some(files) = file_input.files() {
            if let Err(e) = preview_files(&files) {
                console::log_1(&JsValue::from_str(&format!("处理图片失败: {}", e)));
            }
        }
    });
    input
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(|_| "绑定文件选择失败")?;
    on_change.forget();

    let on_over = Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
        event.prevent_default();
        if let Some(target) = current_target_element(&event) {
            let _ = target.class_list().add_1("dragover");
        }
    });
    zone.add_event_listener_with_callback("dragover", on_over.as_ref().unchecked_ref())
        .map_err(|_| "绑定拖拽事件失败")?;
    on_over.forget();

    let on_leave = Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
        event.prevent_default();
        if let Some(target) = current_target_element(&event) {
            let _ = target.class_list().remove_1("dragover");
        }
    });
    zone.add_event_listener_with_callback("dragleave", on_leave.as_ref().unchecked_ref())
        .map_err(|_| "绑定拖拽事件失败")?;
    on_leave.forget();

    let on_drop = Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
        event.prevent_default();
        if let Some(target) = current_target_element(&event) {
            let _ = target.class_list().remove_1("dragover");
        }
        if let Some(files) = event.data_transfer().and_then(|dt| dt.files()) {
            if let Err(e) = preview_files(&files) {
                console::log_1(&JsValue::from_str(&format!("处理图片失败: {}", e)));
            }
        }
    });
    zone.add_event_listener_with_callback("drop", on_drop.as_ref().unchecked_ref())
        .map_err(|_| "绑定拖拽事件失败")?;
    on_drop.forget();

    Ok(())
}

fn current_target_element(event: &Event) -> Option<Element> {
    event.current_target()?.dyn_into::<Element>().ok()
}

/// 校验图片文件并逐个生成本地预览，单张上限 5MB
fn preview_files(files: &FileList) -> Result<(), String> {
    for i in 0..files.length() {
        let Some(file) = files.item(i) else {
            continue;
        };
        match check_image_file(&file.type_(), file.size(), MAX_PREVIEW_IMAGE_BYTES) {
            Err(ImageFileError::NotImage) => {
                show_classed_message("只能上传图片文件", ToastKind::Error)?;
                continue;
            }
            Err(ImageFileError::TooLarge) => {
                show_classed_message("图片大小不能超过5MB", ToastKind::Error)?;
                continue;
            }
            Ok(()) => {}
        }
        read_file_preview(&file)?;
    }
    Ok(())
}

/// 异步读取文件内容，读完追加到已上传列表
fn read_file_preview(file: &File) -> Result<(), String> {
    let reader = FileReader::new().map_err(|_| "创建文件读取器失败")?;
    let name = file.name();
    let reader_ref = reader.clone();
    let onload = Closure::once_into_js(move || {
        let Some(src) = reader_ref.result().ok().and_then(|v| v.as_string()) else {
            return;
        };
        let result = document().and_then(|doc| append_image_preview(&doc, &src, &name));
        if let Err(e) = result {
            console::log_1(&JsValue::from_str(&format!("生成图片预览失败: {}", e)));
        }
    });
    reader.set_onload(Some(onload.unchecked_ref()));
    reader
        .read_as_data_url(file)
        .map_err(|_| "读取图片内容失败")?;
    Ok(())
}

/// 把图片预览追加到已上传列表，带插入与复制按钮
fn append_image_preview(document: &Document, src: &str, name: &str) -> Result<(), String> {
    let Some(list) = document.get_element_by_id("uploaded-images") else {
        return Ok(());
    };

    let item = document.create_element("div").map_err(|_| "创建预览元素失败")?;
    item.set_class_name("uploaded-image");

    let image = document.create_element("img").map_err(|_| "创建预览元素失败")?;
    image.set_attribute("src", src).map_err(|_| "设置预览属性失败")?;
    image.set_attribute("alt", name).map_err(|_| "设置预览属性失败")?;

    let label = document.create_element("div").map_err(|_| "创建预览元素失败")?;
    label.set_class_name("image-name");
    label.set_text_content(Some(name));

    let actions = document.create_element("div").map_err(|_| "创建预览元素失败")?;
    actions.set_class_name("image-actions");

    let insert_btn: HtmlElement = document
        .create_element("button")
        .map_err(|_| "创建预览元素失败")?
        .dyn_into()
        .map_err(|_| "预览按钮类型转换失败")?;
    insert_btn
        .set_attribute("type", "button")
        .map_err(|_| "设置预览属性失败")?;
    insert_btn.set_class_name("btn-insert");
    insert_btn.set_text_content(Some("插入"));
    {
        let src = src.to_string();
        let name = name.to_string();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = insert_image_markdown(&src, &name) {
                console::log_1(&JsValue::from_str(&format!("插入图片失败: {}", e)));
            }
        });
        insert_btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    let copy_btn: HtmlElement = document
        .create_element("button")
        .map_err(|_| "创建预览元素失败")?
        .dyn_into()
        .map_err(|_| "预览按钮类型转换失败")?;
    copy_btn
        .set_attribute("type", "button")
        .map_err(|_| "设置预览属性失败")?;
    copy_btn.set_class_name("btn-copy");
    copy_btn.set_text_content(Some("复制"));
    {
        let src = src.to_string();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            copy_image_url(&src);
        });
        copy_btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    item.append_child(&image).map_err(|_| "组装预览元素失败")?;
    item.append_child(&label).map_err(|_| "组装预览元素失败")?;
    actions
        .append_child(&insert_btn)
        .map_err(|_| "组装预览元素失败")?;
    actions
        .append_child(&copy_btn)
        .map_err(|_| "组装预览元素失败")?;
    item.append_child(&actions).map_err(|_| "组装预览元素失败")?;
    list.append_child(&item).map_err(|_| "插入预览元素失败")?;
    Ok(())
}

/// 复制图片链接到剪贴板，成功后提示
fn copy_image_url(src: &str) {
    let Ok(win) = window() else {
        return;
    };
    let promise = win.navigator().clipboard().write_text(src);
    let on_copied = Closure::<dyn FnMut(JsValue)>::new(move |_| {
        if let Err(e) = show_classed_message("图片链接已复制到剪贴板", ToastKind::Success) {
            console::log_1(&JsValue::from_str(&format!("提示复制结果失败: {}", e)));
        }
    });
    let _ = promise.then(&on_copied);
    on_copied.forget();
}

/// 打开图片对话框
fn show_image_modal(document: &Document) -> Result<(), String> {
    if let Some(modal) = modal_element(document, "image-modal") {
        let _ = modal.style().set_property("display", "flex");
    }
    Ok(())
}

/// 打开链接对话框，有选中文本时预填链接文字
fn show_link_modal(document: &Document) -> Result<(), String> {
    if let Some(modal) = modal_element(document, "link-modal") {
        let _ = modal.style().set_property("display", "flex");
        if let Some(editor) = editor_textarea(document) {
            let selected = selected_text(&editor);
            if !selected.is_empty() {
                set_input_value(document, "link-text", &selected);
            }
        }
    }
    Ok(())
}

fn modal_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

/// 对话框是否打开，以内联 display 是否为 flex 判断
fn modal_open(document: &Document, id: &str) -> bool {
    modal_element(document, id)
        .map(|modal| {
            matches!(
                modal.style().get_property_value("display").as_deref(),
                Ok("flex")
            )
        })
        .unwrap_or(false)
}

/// 图片对话框的标签页切换，显示与 data-tab 匹配的内容
fn bind_modal_tabs(document: &Document) -> Result<(), String> {
    let buttons = document
        .query_selector_all(".tab-btn")
        .map_err(|_| "查询标签页按钮失败")?;

    for i in 0..buttons.length() {
        let node = match buttons.item(i) {
            Some(node) => node,
            None => continue,
        };
        let button: HtmlElement = match node.dyn_into() {
            Ok(el) => el,
            Err(_) => continue,
        };

        let clicked = button.clone();
        let doc = document.clone();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            let target = clicked.get_attribute("data-tab").unwrap_or_default();
            if let Err(e) = activate_tab(&doc, &clicked, &target) {
                console::log_1(&JsValue::from_str(&format!("切换标签页失败: {}", e)));
            }
        });
        button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

fn activate_tab(document: &Document, clicked: &Element, target: &str) -> Result<(), String> {
    let buttons = document
        .query_selector_all(".tab-btn")
        .map_err(|_| "查询标签页按钮失败")?;
    for i in 0..buttons.length() {
        if let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            let _ = el.class_list().remove_1("active");
        }
    }
    let _ = clicked.class_list().add_1("active");

    let contents = document
        .query_selector_all(".tab-content")
        .map_err(|_| "查询标签页内容失败")?;
    let target_id = format!("{}-tab", target);
    for i in 0..contents.length() {
        if let Some(content) = contents.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            let display = if content.id() == target_id { "block" } else { "none" };
            let _ = content.style().set_property("display", display);
        }
    }
    Ok(())
}

fn collect_draft(document: &Document) -> PostDraft {
    let content = editor_textarea(document)
        .map(|editor| editor.value())
        .unwrap_or_default();
    PostDraft {
        title: input_value(document, "edit-title"),
        content,
        categories: input_value(document, "edit-categories"),
        tags: input_value(document, "edit-tags"),
        thumbnail: input_value(document, "edit-thumbnail"),
        date: input_value(document, "edit-date"),
    }
}

/// 模拟的保存完成回调：输出数据、恢复按钮并提示
fn finish_save(draft: &PostDraft) {
    match serde_wasm_bindgen::to_value(draft) {
        Ok(value) => console::log_2(&JsValue::from_str("保存文章数据:"), &value),
        Err(_) => console::log_1(&JsValue::from_str("保存文章数据序列化失败")),
    }

    let result = document().and_then(|doc| {
        if let Some(body) = doc.body() {
            let _ = body.class_list().remove_1("saving");
        }
        set_save_label(&doc, "保存");
        show_classed_message("文章保存成功！", ToastKind::Success)
    });
    if let Err(e) = result {
        console::log_1(&JsValue::from_str(&format!("结束保存状态失败: {}", e)));
    }
}

fn set_save_label(document: &Document, label: &str) {
    if let Some(button) = document.get_element_by_id("save-post") {
        if let Ok(Some(text)) = button.query_selector(".save-text") {
            text.set_text_content(Some(label));
        }
    }
}

fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn set_input_value(document: &Document, id: &str, value: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

/// 编辑模式下的键盘快捷键
fn bind_shortcuts(document: &Document) -> Result<(), String> {
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if let Err(e) = handle_shortcut(&event) {
            console::log_1(&JsValue::from_str(&format!("处理快捷键失败: {}", e)));
        }
    });
    document
        .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
        .map_err(|_| "绑定键盘快捷键失败")?;
    on_keydown.forget();
    Ok(())
}

fn handle_shortcut(event: &KeyboardEvent) -> Result<(), String> {
    if !PostPage::is_editing()? {
        return Ok(());
    }
    let document = document()?;
    let command = shortcut_for(
        &event.key(),
        event.ctrl_key(),
        modal_open(&document, "image-modal"),
        modal_open(&document, "link-modal"),
    );
    let Some(command) = command else {
        return Ok(());
    };

    match command {
        ShortcutCommand::Save => {
            event.prevent_default();
            apply_save()
        }
        ShortcutCommand::Bold => {
            event.prevent_default();
            run_toolbar_action("bold")
        }
        ShortcutCommand::Italic => {
            event.prevent_default();
            run_toolbar_action("italic")
        }
        ShortcutCommand::CloseImageModal => apply_close_image_modal(),
        ShortcutCommand::CloseLinkModal => apply_close_link_modal(),
        ShortcutCommand::ExitEdit => apply_toggle_edit(),
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    fn build_page(document: &Document) {
        let body = document.body().unwrap();
        body.set_class_name("");
        body.set_inner_html(
            "<button id=\"toggle-edit\"><span class=\"edit-text\">编辑</span></button>\
             <button id=\"save-post\" style=\"display: none;\">\
               <span class=\"save-text\">保存</span>\
             </button>\
             <div id=\"post-meta-edit\" style=\"display: none;\"></div>\
             <div id=\"edit-toolbar\" style=\"display: none;\">\
               <button class=\"toolbar-btn\" data-action=\"bold\">B</button>\
               <button class=\"toolbar-btn\" data-action=\"preview\">预览</button>\
             </div>\
             <div id=\"post-content\"></div>\
             <div id=\"post-editor\" style=\"display: none;\">\
               <textarea id=\"markdown-editor\"></textarea>\
             </div>\
             <div id=\"post-preview\" style=\"display: none;\">\
               <div id=\"preview-content\"></div>\
             </div>\
             <span id=\"char-count\"></span>\
             <span id=\"word-count\"></span>",
        );
    }

    fn editor(document: &Document) -> HtmlTextAreaElement {
        editor_textarea(document).unwrap()
    }

    #[wasm_bindgen_test]
    fn toggle_edit_updates_panels_and_stats() {
        let document = utils_common::dom::document().unwrap();
        build_page(&document);
        init_page().unwrap();

        apply_toggle_edit().unwrap();

        let body = document.body().unwrap();
        assert!(body.class_list().contains("edit-mode"));
        let label = document
            .query_selector("#toggle-edit .edit-text")
            .unwrap()
            .unwrap();
        assert_eq!(label.text_content().unwrap(), "取消");

        editor(&document).set_value("# 标题\n\n你好 world");
        update_stats(&document).unwrap();
        let chars = document.get_element_by_id("char-count").unwrap();
        assert_eq!(chars.text_content().unwrap(), "14");
        let words = document.get_element_by_id("word-count").unwrap();
        assert_eq!(words.text_content().unwrap(), "4");

        apply_toggle_edit().unwrap();
        assert!(!body.class_list().contains("edit-mode"));
        assert_eq!(label.text_content().unwrap(), "编辑");
    }

    #[wasm_bindgen_test]
    fn toolbar_inserts_placeholder_and_renders_preview() {
        let document = utils_common::dom::document().unwrap();
        build_page(&document);
        init_page().unwrap();
        apply_toggle_edit().unwrap();

        run_toolbar_action("bold").unwrap();
        let editor = editor(&document);
        assert_eq!(editor.value(), "**粗体文本**");
        assert_eq!(editor.selection_start().unwrap(), Some(6));

        editor.set_value("# 标题");
        update_preview(&document).unwrap();
        let preview = document.get_element_by_id("preview-content").unwrap();
        assert_eq!(preview.inner_html(), "<h1>标题</h1>");
    }
}
