//! 与博客服务端的 HTTP 交互
//!
//! 基于 fetch 与 Promise 回调，请求结束后把 HTTP 状态和解析好的
//! JSON 响应体一并交给调用方闭包，网络错误与解析错误走同一条
//! 失败路径。

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{FormData, Headers, Request, RequestInit, Response};

use utils_common::dom::window;

/// 图片服务器地址
pub const IMAGE_SERVER_URL: &str = "http://localhost:3000";

/// 接口鉴权令牌
pub const AUTH_TOKEN: &str = "your-secret-token";

/// 图片上传接口
pub fn upload_endpoint() -> String {
    format!("{}/api/upload-image", IMAGE_SERVER_URL)
}

/// 文章发布接口
pub fn posts_endpoint() -> String {
    format!("{}/api/posts", IMAGE_SERVER_URL)
}

/// 一次请求的结果：HTTP 状态与解析后的 JSON 响应体
pub struct FetchOutcome {
    /// 状态码是否在 2xx 范围
    pub ok: bool,
    /// 状态描述文本
    pub status_text: String,
    /// 响应体
    pub body: JsValue,
}

type DoneCallback = Box<dyn FnOnce(Result<FetchOutcome, String>)>;

/// POST JSON 请求体
pub fn post_json<F>(url: &str, json: &str, on_done: F) -> Result<(), String>
where
    F: FnOnce(Result<FetchOutcome, String>) + 'static,
{
    let headers = auth_headers()?;
    headers
        .append("Content-Type", "application/json")
        .map_err(|_| "设置请求头失败")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(json));

    dispatch(url, &init, on_done)
}

/// POST 表单数据
pub fn post_form_data<F>(url: &str, form: &FormData, on_done: F) -> Result<(), String>
where
    F: FnOnce(Result<FetchOutcome, String>) + 'static,
{
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(auth_headers()?.as_ref());
    init.set_body(form.as_ref());

    dispatch(url, &init, on_done)
}

fn auth_headers() -> Result<Headers, String> {
    let headers = Headers::new().map_err(|_| "创建请求头失败")?;
    headers
        .append("Authorization", &format!("Bearer {}", AUTH_TOKEN))
        .map_err(|_| "设置鉴权头失败")?;
    Ok(headers)
}

/// 发出请求，响应体解析完成后调用回调
fn dispatch<F>(url: &str, init: &RequestInit, on_done: F) -> Result<(), String>
where
    F: FnOnce(Result<FetchOutcome, String>) + 'static,
{
    let request = Request::new_with_str_and_init(url, init).map_err(|_| "构建请求失败")?;
    let promise = window()?.fetch_with_request(&request);

    // 成功与失败分支共用同一个一次性回调
    let done = Rc::new(RefCell::new(Some(Box::new(on_done) as DoneCallback)));

    let resolve_done = done.clone();
    let on_resolve = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        if let Some(done) = resolve_done.borrow_mut().take() {
            read_json_body(value, done);
        }
    });
    let reject_done = done;
    let on_reject = Closure::<dyn FnMut(JsValue)>::new(move |error: JsValue| {
        if let Some(done) = reject_done.borrow_mut().take() {
            done(Err(error_message(&error)));
        }
    });

    let _ = promise.then2(&on_resolve, &on_reject);
    on_resolve.forget();
    on_reject.forget();
    Ok(())
}

/// 读取响应体 JSON，完成后移交给回调
fn read_json_body(value: JsValue, done: DoneCallback) {
    let Ok(response) = value.dyn_into::<Response>() else {
        done(Err("响应对象类型不符".to_string()));
        return;
    };
    let ok = response.ok();
    let status_text = response.status_text();
    let json_promise = match response.json() {
        Ok(promise) => promise,
        Err(_) => {
            done(Err("读取响应失败".to_string()));
            return;
        }
    };

    let slot = Rc::new(RefCell::new(Some(done)));
    let resolve_slot = slot.clone();
    let on_body = Closure::<dyn FnMut(JsValue)>::new(move |body: JsValue| {
        if let Some(done) = resolve_slot.borrow_mut().take() {
            done(Ok(FetchOutcome {
                ok,
                status_text: status_text.clone(),
                body,
            }));
        }
    });
    let reject_slot = slot;
    let on_error = Closure::<dyn FnMut(JsValue)>::new(move |error: JsValue| {
        if let Some(done) = reject_slot.borrow_mut().take() {
            done(Err(error_message(&error)));
        }
    });

    let _ = json_promise.then2(&on_body, &on_error);
    on_body.forget();
    on_error.forget();
}

/// 从 JS 异常对象提取描述文本
fn error_message(error: &JsValue) -> String {
    if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    error
        .as_string()
        .unwrap_or_else(|| "网络请求失败".to_string())
}
