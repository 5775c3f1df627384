use once_cell::sync::OnceCell;
use std::sync::Mutex;
use wasm_bindgen::prelude::*;
use web_sys::console;

// 导出模块
pub mod dom;
pub mod markdown;
pub mod models;
pub mod toc;

use models::{PanelVisibility, PreviewVisibility};

// 全局编辑状态
static STATE: OnceCell<Mutex<EditState>> = OnceCell::new();

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

//===== 状态机 部分 =====

/// 文章页编辑状态
///
/// 预览模式从属于编辑模式：未进入编辑时无法预览，退出编辑时
/// 预览一并退出。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditState {
    /// 是否处于编辑模式
    pub editing: bool,
    /// 是否处于预览模式
    pub previewing: bool,
}

impl EditState {
    /// 切换编辑模式，返回面板显示表
    pub fn toggle_edit(&mut self) -> PanelVisibility {
        self.editing = !self.editing;
        if !self.editing {
            self.previewing = false;
        }
        PanelVisibility::for_edit_mode(self.editing)
    }

    /// 切换预览模式，未处于编辑模式时不生效
    pub fn toggle_preview(&mut self) -> Option<PreviewVisibility> {
        if !self.editing {
            return None;
        }
        self.previewing = !self.previewing;
        Some(PreviewVisibility::for_preview_mode(self.previewing))
    }
}

//===== 全局操作 部分 =====

/// 文章页编辑器 - 基于全局状态的编辑与预览操作
pub struct PostPage;

impl PostPage {
    fn state() -> &'static Mutex<EditState> {
        STATE.get_or_init(|| Mutex::new(EditState::default()))
    }

    /// 重置为阅读状态，页面初始化时调用
    pub fn reset() -> Result<(), String> {
        let mut guard = Self::state().lock().map_err(|_| "获取状态锁失败")?;
        *guard = EditState::default();
        Ok(())
    }

    /// 切换编辑模式
    pub fn toggle_edit() -> Result<PanelVisibility, String> {
        let mut guard = Self::state().lock().map_err(|_| "获取状态锁失败")?;
        Ok(guard.toggle_edit())
    }

    /// 切换预览模式，未处于编辑模式时返回 None
    pub fn toggle_preview() -> Result<Option<PreviewVisibility>, String> {
        let mut guard = Self::state().lock().map_err(|_| "获取状态锁失败")?;
        Ok(guard.toggle_preview())
    }

    /// 当前是否处于编辑模式
    pub fn is_editing() -> Result<bool, String> {
        let guard = Self::state().lock().map_err(|_| "获取状态锁失败")?;
        Ok(guard.editing)
    }

    /// 当前是否处于预览模式
    pub fn is_previewing() -> Result<bool, String> {
        let guard = Self::state().lock().map_err(|_| "获取状态锁失败")?;
        Ok(guard.previewing)
    }
}

//===== JS 接口 部分 =====

/// 文章页JS接口 - 提供给页面脚本使用的API
#[wasm_bindgen]
pub struct PostPageJS;

#[wasm_bindgen]
impl PostPageJS {
    /// 初始化：绑定目录、工具栏、上传区与键盘快捷键
    #[wasm_bindgen]
    pub fn init() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        dom::init_page().map_err(|e| {
            console::log_1(&JsValue::from_str(&format!("初始化文章页失败: {}", e)));
            JsValue::from_str(&e)
        })
    }

    /// 切换编辑模式
    #[wasm_bindgen]
    pub fn toggle_edit() -> Result<(), JsValue> {
        dom::apply_toggle_edit().map_err(|e| JsValue::from_str(&e))
    }

    /// 切换预览模式
    #[wasm_bindgen]
    pub fn toggle_preview() -> Result<(), JsValue> {
        dom::apply_toggle_preview().map_err(|e| JsValue::from_str(&e))
    }

    /// 保存当前编辑的文章
    #[wasm_bindgen]
    pub fn save() -> Result<(), JsValue> {
        dom::apply_save().map_err(|e| JsValue::from_str(&e))
    }

    /// 渲染 Markdown 预览片段
    #[wasm_bindgen]
    pub fn preview_html(markdown: &str) -> String {
        markdown::preview_html(markdown)
    }

    /// 链接对话框确认：把链接插入编辑器
    #[wasm_bindgen]
    pub fn insert_link() -> Result<(), JsValue> {
        dom::insert_link_from_modal().map_err(|e| JsValue::from_str(&e))
    }

    /// 图片对话框确认：把图片链接插入编辑器
    #[wasm_bindgen]
    pub fn insert_image_url() -> Result<(), JsValue> {
        dom::insert_image_from_modal().map_err(|e| JsValue::from_str(&e))
    }

    /// 关闭图片对话框
    #[wasm_bindgen]
    pub fn close_image_modal() -> Result<(), JsValue> {
        dom::apply_close_image_modal().map_err(|e| JsValue::from_str(&e))
    }

    /// 关闭链接对话框
    #[wasm_bindgen]
    pub fn close_link_modal() -> Result<(), JsValue> {
        dom::apply_close_link_modal().map_err(|e| JsValue::from_str(&e))
    }

    /// 当前是否处于编辑模式
    #[wasm_bindgen]
    pub fn is_editing() -> Result<bool, JsValue> {
        PostPage::is_editing().map_err(|e| JsValue::from_str(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Display;

    #[test]
    fn toggle_edit_flips_mode_and_labels() {
        let mut state = EditState::default();

        let entering = state.toggle_edit();
        assert!(state.editing);
        assert_eq!(entering.edit_label, "取消");
        assert_eq!(entering.editor, Display::Block);

        let leaving = state.toggle_edit();
        assert!(!state.editing);
        assert_eq!(leaving.edit_label, "编辑");
        assert_eq!(leaving.content, Display::Block);
    }

    #[test]
    fn preview_requires_edit_mode() {
        let mut state = EditState::default();
        assert_eq!(state.toggle_preview(), None);
        assert!(!state.previewing);

        state.toggle_edit();
        let on = state.toggle_preview().map(|v| v.previewing);
        assert_eq!(on, Some(true));
        let off = state.toggle_preview().map(|v| v.previewing);
        assert_eq!(off, Some(false));
    }

    #[test]
    fn leaving_edit_mode_also_leaves_preview() {
        let mut state = EditState::default();
        state.toggle_edit();
        state.toggle_preview();
        assert!(state.previewing);

        let leaving = state.toggle_edit();
        assert!(!state.previewing);
        assert_eq!(leaving.preview, Some(Display::None));

        // 重新进入编辑模式时预览保持关闭
        state.toggle_edit();
        assert!(!state.previewing);
    }
}
