use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::console;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

/// 初始化目录联动：点击跳转、滚动高亮与初始高亮
pub fn init_toc(document: &Document) -> Result<(), String> {
    let links = document
        .query_selector_all(".toc a")
        .map_err(|_| "查询目录链接失败")?;
    let headers = document
        .query_selector_all(".content h1[id], .content h2[id]")
        .map_err(|_| "查询正文标题失败")?;

    bind_link_clicks(document, &links)?;
    observe_headers(document, &headers)?;

    // 初始高亮第一个目录项
    if links.length() > 0 && headers.length() > 0 {
        if let Some(first) = links.item(0).and_then(|n| n.dyn_into::<Element>().ok()) {
            let _ = first.class_list().add_1("active");
        }
    }
    Ok(())
}

fn bind_link_clicks(document: &Document, links: &NodeList) -> Result<(), String> {
    for i in 0..links.length() {
        let Some(link) = links.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let doc = document.clone();
        let clicked = link.clone();
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Err(e) = jump_to_target(&doc, &clicked, &event) {
                console::log_1(&JsValue::from_str(&format!("目录跳转失败: {}", e)));
            }
        });
        link.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
            .map_err(|_| "绑定目录点击失败")?;
        handler.forget();
    }
    Ok(())
}

/// 平滑滚动到链接指向的标题并高亮该目录项
fn jump_to_target(document: &Document, link: &Element, event: &Event) -> Result<(), String> {
    let Some(target_id) = link.get_attribute("href") else {
        return Ok(());
    };
    if !target_id.starts_with('#') || target_id == "#" {
        return Ok(());
    }
    let Some(target) = document
        .query_selector(&target_id)
        .map_err(|_| "查询跳转目标失败")?
    else {
        return Ok(());
    };
    event.prevent_default();

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);

    clear_active_links(document)?;
    let _ = link.class_list().add_1("active");
    Ok(())
}

/// 用 IntersectionObserver 监听标题可见性，滚动时同步目录高亮
fn observe_headers(document: &Document, headers: &NodeList) -> Result<(), String> {
    if headers.length() == 0 {
        return Ok(());
    }

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px 0px -80% 0px");
    options.set_threshold(&JsValue::from_f64(0.1));

    let doc = document.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            if let Err(e) = highlight_current(&doc, &entry.target()) {
                console::log_1(&JsValue::from_str(&format!("目录高亮失败: {}", e)));
            }
        }
    });
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|_| "创建目录观察器失败")?;
    callback.forget();

    for i in 0..headers.length() {
        if let Some(header) = headers.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&header);
        }
    }
    Ok(())
}

fn highlight_current(document: &Document, target: &Element) -> Result<(), String> {
    let Some(current_id) = target.get_attribute("id") else {
        return Ok(());
    };
    clear_active_links(document)?;

    let selector = format!(".toc a[href=\"#{}\"]", current_id);
    let Some(active) = document
        .query_selector(&selector)
        .map_err(|_| "查询目录项失败")?
    else {
        return Ok(());
    };
    let _ = active.class_list().add_1("active");

    // 保证高亮的目录项在目录视口内可见
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    active.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

fn clear_active_links(document: &Document) -> Result<(), String> {
    let links = document
        .query_selector_all(".toc a")
        .map_err(|_| "查询目录链接失败")?;
    for i in 0..links.length() {
        if let Some(link) = links.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            let _ = link.class_list().remove_1("active");
        }
    }
    Ok(())
}
