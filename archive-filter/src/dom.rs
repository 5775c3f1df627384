//! 归档页 DOM 适配层
//!
//! 采集文章卡片、渲染维度菜单、把状态机输出的效果同步到页面。
//! 事件回调内的错误只记录日志，不向页面抛出。

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, Element, HtmlElement};

use utils_common::dom::{document, window};

use crate::builder::parse_facet_tokens;
use crate::models::{FacetKind, LayoutMode, PostRecord, ViewEffects};
use crate::thumbs;
use crate::ArchiveFilter;

/// 初始化归档页：采集文章、构建索引、填充菜单并绑定事件
///
/// 初始化本身不改动卡片的 display，首次筛选或布局变化才会写入。
pub fn init_page() -> Result<(), String> {
    let document = document()?;

    let posts = harvest_posts(&document)?;
    let post_count = posts.len();
    ArchiveFilter::init_state(posts, current_layout())?;

    // 缩略图回退链
    thumbs::handle_post_images(&document)?;

    // 维度菜单
    fill_menu(&document, "category-submenu", FacetKind::Category)?;
    fill_menu(&document, "tag-submenu", FacetKind::Tag)?;

    bind_show_all(&document)?;
    bind_group_toggles(&document)?;
    bind_resize()?;

    let categories = ArchiveFilter::menu_items(FacetKind::Category)?.len();
    let tags = ArchiveFilter::menu_items(FacetKind::Tag)?.len();
    console::log_1(&JsValue::from_str(&format!(
        "归档页加载完成: 文章 {}, 分类 {}, 标签 {}",
        post_count, categories, tags
    )));

    Ok(())
}

/// 应用筛选并同步页面，菜单高亮移到对应条目
pub fn apply_select(kind: FacetKind, value: &str) -> Result<ViewEffects, String> {
    let document = document()?;
    let effects = ArchiveFilter::select(kind, value)?;
    set_active_item(&document, Some((kind, value.trim())))?;
    apply_effects(&document, &effects)?;
    Ok(effects)
}

/// 显示全部文章并同步页面，高亮移到"显示全部"
pub fn apply_show_all() -> Result<ViewEffects, String> {
    let document = document()?;
    let effects = ArchiveFilter::show_all()?;
    set_active_item(&document, None)?;
    apply_effects(&document, &effects)?;
    Ok(effects)
}

/// 按当前视口宽度重新推导布局并同步页面
pub fn apply_resize() -> Result<ViewEffects, String> {
    let document = document()?;
    let effects = ArchiveFilter::resize(viewport_width())?;
    apply_effects(&document, &effects)?;
    Ok(effects)
}

/// 采集 .post-card 卡片上的标题与维度数据
fn harvest_posts(document: &Document) -> Result<Vec<PostRecord>, String> {
    let cards = document
        .query_selector_all(".post-card")
        .map_err(|_| "查询文章卡片失败")?;

    let mut posts = Vec::with_capacity(cards.length() as usize);
    for i in 0..cards.length() {
        let node = match cards.item(i) {
            Some(node) => node,
            None => continue,
        };
        let card = match node.dyn_ref::<Element>() {
            Some(card) => card,
            None => continue,
        };

        let title = card
            .query_selector(".post-title")
            .ok()
            .flatten()
            .and_then(|el| el.text_content())
            .map(|text| text.trim().to_string())
            .unwrap_or_else(|| format!("文章{}", i + 1));

        let categories = card
            .get_attribute("data-category")
            .map(|raw| parse_facet_tokens(&raw))
            .unwrap_or_default();
        let tags = card
            .get_attribute("data-tag")
            .map(|raw| parse_facet_tokens(&raw))
            .unwrap_or_default();

        posts.push(PostRecord {
            title,
            categories,
            tags,
        });
    }

    Ok(posts)
}

/// 读取视口宽度，读取失败时为 None（按桌面端处理）
fn viewport_width() -> Option<f64> {
    window().ok()?.inner_width().ok()?.as_f64()
}

fn current_layout() -> LayoutMode {
    LayoutMode::from_width(viewport_width())
}

/// 清空并重新填充维度菜单，条目带计数并绑定点击筛选
fn fill_menu(document: &Document, menu_id: &str, kind: FacetKind) -> Result<(), String> {
    let menu = match document.get_element_by_id(menu_id) {
        Some(menu) => menu,
        None => return Ok(()),
    };
    menu.set_inner_html("");

    for item in ArchiveFilter::menu_items(kind)? {
        let entry: HtmlElement = document
            .create_element("div")
            .map_err(|_| "创建菜单项失败")?
            .dyn_into()
            .map_err(|_| "菜单项类型转换失败")?;
        entry.set_class_name("archive-submenu-item");

        let label = document.create_element("span").map_err(|_| "创建菜单项失败")?;
        label
            .set_attribute("title", &item.label)
            .map_err(|_| "设置菜单项属性失败")?;
        label.set_text_content(Some(&item.label));

        let count = document.create_element("span").map_err(|_| "创建菜单项失败")?;
        count.set_class_name("archive-submenu-count");
        count.set_text_content(Some(&item.count.to_string()));

        entry.append_child(&label).map_err(|_| "组装菜单项失败")?;
        entry.append_child(&count).map_err(|_| "组装菜单项失败")?;
        entry
            .set_attribute("data-value", &item.label)
            .map_err(|_| "设置菜单项属性失败")?;
        entry
            .set_attribute("data-type", kind.as_str())
            .map_err(|_| "设置菜单项属性失败")?;

        let value = item.label.clone();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = apply_select(kind, &value) {
                console::log_1(&JsValue::from_str(&format!("应用筛选失败: {}", e)));
            }
        });
        entry.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();

        menu.append_child(&entry).map_err(|_| "插入菜单项失败")?;
    }

    Ok(())
}

/// 维持菜单中唯一的 active 条目
///
/// target 为 None 时高亮"显示全部"。
fn set_active_item(document: &Document, target: Option<(FacetKind, &str)>) -> Result<(), String> {
    let items = document
        .query_selector_all(".archive-submenu-item, .show-all-item")
        .map_err(|_| "查询菜单项失败")?;

    for i in 0..items.length() {
        if let Some(node) = items.item(i) {
            if let Some(el) = node.dyn_ref::<Element>() {
                let _ = el.class_list().remove_1("active");
            }
        }
    }

    match target {
        Some((kind, value)) => {
            for i in 0..items.length() {
                if let Some(node) = items.item(i) {
                    if let Some(el) = node.dyn_ref::<Element>() {
                        if el.get_attribute("data-type").as_deref() == Some(kind.as_str())
                            && el.get_attribute("data-value").as_deref() == Some(value)
                        {
                            let _ = el.class_list().add_1("active");
                            break;
                        }
                    }
                }
            }
        }
        None => {
            if let Some(show_all) = document.get_element_by_id("show-all") {
                let _ = show_all.class_list().add_1("active");
            }
        }
    }

    Ok(())
}

/// 把状态机输出的效果同步到页面
fn apply_effects(document: &Document, effects: &ViewEffects) -> Result<(), String> {
    let cards = document
        .query_selector_all(".post-card")
        .map_err(|_| "查询文章卡片失败")?;

    for (i, display) in effects.displays.iter().enumerate() {
        if let Some(node) = cards.item(i as u32) {
            if let Some(card) = node.dyn_ref::<HtmlElement>() {
                let _ = card.style().set_property("display", display.as_css());
            }
        }
    }

    // 筛选状态提示
    if let Some(filter_el) = document.get_element_by_id("current-filter") {
        if let Some(filter_el) = filter_el.dyn_ref::<HtmlElement>() {
            match &effects.status_text {
                Some(text) => {
                    filter_el.set_text_content(Some(text));
                    let _ = filter_el.style().set_property("display", "block");
                }
                None => {
                    let _ = filter_el.style().set_property("display", "none");
                }
            }
        }
    }

    // 空状态提示
    if effects.show_empty {
        if let Some(notice) = ensure_empty_notice(document) {
            let _ = notice.style().set_property("display", "block");
        }
    } else if let Some(notice) = find_empty_notice(document) {
        let _ = notice.style().set_property("display", "none");
    }

    Ok(())
}

fn find_empty_notice(document: &Document) -> Option<HtmlElement> {
    document
        .query_selector(".archive-empty")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// 空状态元素懒创建：首次需要时挂到 #archive-list 下，之后复用
fn ensure_empty_notice(document: &Document) -> Option<HtmlElement> {
    if let Some(existing) = find_empty_notice(document) {
        return Some(existing);
    }

    let archive_list = document.get_element_by_id("archive-list")?;
    let notice = document.create_element("div").ok()?;
    notice.set_class_name("archive-empty");
    notice.set_inner_html(
        "<div style=\"text-align: center; padding: 60px 20px; color: #666;\">\
           <div style=\"font-size: 48px; margin-bottom: 16px;\">📝</div>\
           <h3 style=\"margin: 0 0 8px 0; color: #333;\">没有找到匹配的文章</h3>\
           <p style=\"margin: 0; font-size: 14px;\">试试其他筛选条件吧</p>\
         </div>",
    );
    archive_list.append_child(&notice).ok()?;
    notice.dyn_into::<HtmlElement>().ok()
}

fn bind_show_all(document: &Document) -> Result<(), String> {
    let show_all = match document.get_element_by_id("show-all") {
        Some(el) => el,
        None => return Ok(()),
    };
    let show_all: HtmlElement = show_all
        .dyn_into()
        .map_err(|_| "显示全部按钮类型转换失败")?;

    let onclick = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = apply_show_all() {
            console::log_1(&JsValue::from_str(&format!("恢复全部文章失败: {}", e)));
        }
    });
    show_all.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
    Ok(())
}

/// 二级菜单折叠/展开
fn bind_group_toggles(document: &Document) -> Result<(), String> {
    let titles = document
        .query_selector_all(".archive-group-title")
        .map_err(|_| "查询菜单分组失败")?;

    for i in 0..titles.length() {
        let node = match titles.item(i) {
            Some(node) => node,
            None => continue,
        };
        let title: HtmlElement = match node.dyn_into() {
            Ok(el) => el,
            Err(_) => continue,
        };

        let toggle_target = title.clone();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Some(group) = toggle_target.parent_element() {
                let _ = group.class_list().toggle("open");
            }
        });
        title.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

/// 窗口尺寸变化时重新推导布局
fn bind_resize() -> Result<(), String> {
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = apply_resize() {
            console::log_1(&JsValue::from_str(&format!("响应布局变化失败: {}", e)));
        }
    });
    window()?
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|_| "绑定 resize 事件失败")?;
    on_resize.forget();
    Ok(())
}
