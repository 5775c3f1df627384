use wasm_bindgen::prelude::*;
use web_sys::console;

// 导出模块
pub mod dom;
pub mod http;
pub mod models;
pub mod preview;
pub mod upload;

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

//===== JS 接口 部分 =====

/// 编辑页JS接口 - 提供给页面脚本使用的API
#[wasm_bindgen]
pub struct EditorJS;

#[wasm_bindgen]
impl EditorJS {
    /// 初始化：默认日期、工具栏、上传入口、实时预览与表单发布
    #[wasm_bindgen]
    pub fn init() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        dom::init_page().map_err(|e| {
            console::log_1(&JsValue::from_str(&format!("初始化编辑页失败: {}", e)));
            JsValue::from_str(&e)
        })
    }

    /// 渲染 Markdown 预览片段
    #[wasm_bindgen]
    pub fn render_preview(markdown: &str) -> String {
        preview::render_preview(markdown)
    }
}
