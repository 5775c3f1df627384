use wasm_bindgen::prelude::*;
use once_cell::sync::OnceCell;
use std::sync::Mutex;
use serde_json;
use web_sys::console;

// 导出模块
pub mod builder;
pub mod dom;
pub mod models;
pub mod thumbs;

use models::{
    FacetKind, FilterState, LayoutMode, MenuItem, PostRecord, SelectParams, ViewEffects,
};

// 全局页面状态
static STATE: OnceCell<Mutex<Option<ArchiveState>>> = OnceCell::new();

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

/// 归档页状态 - 文章、维度索引与当前筛选
///
/// 所有状态变更都返回 ViewEffects，由适配层统一同步到页面，
/// 卡片的显示方式永远重新推导，不在原值上翻转。
#[derive(Debug, Clone)]
pub struct ArchiveState {
    /// 采集到的文章卡片记录
    pub posts: Vec<PostRecord>,
    /// 维度索引
    pub index: models::FacetIndex,
    /// 当前筛选状态
    pub filter: FilterState,
    /// 当前布局模式
    pub layout: LayoutMode,
    /// 每张卡片的可见性，顺序与 posts 一致
    visible: Vec<bool>,
    /// 空状态提示元素是否已创建
    notice_created: bool,
}

impl ArchiveState {
    /// 由文章列表构建初始状态，所有文章可见
    pub fn new(posts: Vec<PostRecord>, layout: LayoutMode) -> Self {
        let index = builder::build_facet_index(&posts);
        let visible = vec![true; posts.len()];
        ArchiveState {
            posts,
            index,
            filter: FilterState::All,
            layout,
            visible,
            notice_created: false,
        }
    }

    /// 应用筛选条件：可见性为对应维度集合的精确成员判断
    ///
    /// 任意状态下都可调用，新的筛选直接替换旧的。
    pub fn select(&mut self, kind: FacetKind, value: &str) -> ViewEffects {
        let value = value.trim();
        for (i, post) in self.posts.iter().enumerate() {
            let tokens = match kind {
                FacetKind::Category => &post.categories,
                FacetKind::Tag => &post.tags,
            };
            self.visible[i] = tokens.iter().any(|token| token == value);
        }
        self.filter = FilterState::Facet {
            kind,
            value: value.to_string(),
        };
        self.effects()
    }

    /// 取消筛选，显示全部文章
    pub fn show_all(&mut self) -> ViewEffects {
        for slot in self.visible.iter_mut() {
            *slot = true;
        }
        self.filter = FilterState::All;
        self.effects()
    }

    /// 视口宽度变化后重新推导布局
    ///
    /// 不改动筛选结果，与筛选操作先后可交换。
    pub fn resize(&mut self, width: Option<f64>) -> ViewEffects {
        self.layout = LayoutMode::from_width(width);
        self.effects()
    }

    /// 可见文章数
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|visible| **visible).count()
    }

    /// 当前是否应显示空状态提示
    ///
    /// 仅在筛选状态下零结果时显示，未筛选时即使没有文章也不显示。
    pub fn empty_state_visible(&self) -> bool {
        matches!(self.filter, FilterState::Facet { .. }) && self.visible_count() == 0
    }

    /// 汇总当前状态对应的页面效果
    fn effects(&mut self) -> ViewEffects {
        let displays = self
            .visible
            .iter()
            .map(|&visible| self.layout.display_for(visible))
            .collect();
        let visible_count = self.visible_count();
        let show_empty = self.empty_state_visible();
        let create_notice = show_empty && !self.notice_created;
        if create_notice {
            self.notice_created = true;
        }
        let status_text = match &self.filter {
            FilterState::All => None,
            FilterState::Facet { kind, value } => {
                Some(format!("当前筛选：{} - {}", kind.label(), value))
            }
        };
        ViewEffects {
            displays,
            visible_count,
            show_empty,
            create_notice,
            status_text,
        }
    }
}

//===== 全局操作 部分 =====

/// 归档页过滤器 - 基于全局状态的筛选与布局操作
pub struct ArchiveFilter;

impl ArchiveFilter {
    /// 用采集到的文章初始化全局状态，重复调用会整体替换
    pub fn init_state(posts: Vec<PostRecord>, layout: LayoutMode) -> Result<(), String> {
        let cell = STATE.get_or_init(|| Mutex::new(None));
        let mut guard = cell.lock().map_err(|_| "获取状态锁失败")?;
        *guard = Some(ArchiveState::new(posts, layout));
        Ok(())
    }

    /// 应用筛选条件
    pub fn select(kind: FacetKind, value: &str) -> Result<ViewEffects, String> {
        let mutex = STATE.get().ok_or("状态未初始化")?;
        let mut guard = mutex.lock().map_err(|_| "获取状态锁失败")?;
        let state = guard.as_mut().ok_or("状态为空")?;
        Ok(state.select(kind, value))
    }

    /// 取消筛选，显示全部文章
    pub fn show_all() -> Result<ViewEffects, String> {
        let mutex = STATE.get().ok_or("状态未初始化")?;
        let mut guard = mutex.lock().map_err(|_| "获取状态锁失败")?;
        let state = guard.as_mut().ok_or("状态为空")?;
        Ok(state.show_all())
    }

    /// 根据当前视口宽度重新推导布局
    pub fn resize(width: Option<f64>) -> Result<ViewEffects, String> {
        let mutex = STATE.get().ok_or("状态未初始化")?;
        let mut guard = mutex.lock().map_err(|_| "获取状态锁失败")?;
        let state = guard.as_mut().ok_or("状态为空")?;
        Ok(state.resize(width))
    }

    /// 指定维度的菜单项，按维度值字典序升序
    pub fn menu_items(kind: FacetKind) -> Result<Vec<MenuItem>, String> {
        let mutex = STATE.get().ok_or("状态未初始化")?;
        let guard = mutex.lock().map_err(|_| "获取状态锁失败")?;
        let state = guard.as_ref().ok_or("状态为空")?;
        Ok(builder::menu_items(&state.index, kind))
    }

    /// 当前筛选状态
    pub fn filter_state() -> Result<FilterState, String> {
        let mutex = STATE.get().ok_or("状态未初始化")?;
        let guard = mutex.lock().map_err(|_| "获取状态锁失败")?;
        let state = guard.as_ref().ok_or("状态为空")?;
        Ok(state.filter.clone())
    }

    /// 当前可见文章数
    pub fn visible_count() -> Result<usize, String> {
        let mutex = STATE.get().ok_or("状态未初始化")?;
        let guard = mutex.lock().map_err(|_| "获取状态锁失败")?;
        let state = guard.as_ref().ok_or("状态为空")?;
        Ok(state.visible_count())
    }
}

//===== JS 接口 部分 =====

/// 归档页过滤器JS接口 - 提供给页面脚本使用的API
#[wasm_bindgen]
pub struct ArchiveFilterJS;

#[wasm_bindgen]
impl ArchiveFilterJS {
    /// 初始化：采集页面文章、填充菜单并绑定事件
    #[wasm_bindgen]
    pub fn init() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        dom::init_page().map_err(|e| {
            console::log_1(&JsValue::from_str(&format!("初始化归档页失败: {}", e)));
            JsValue::from_str(&e)
        })
    }

    /// 应用筛选条件，参数为 {"kind":"category|tag","value":"..."} 形式的JSON
    #[wasm_bindgen]
    pub fn select(params_json: &str) -> Result<JsValue, JsValue> {
        // 解析参数
        let params: SelectParams = serde_json::from_str(params_json)
            .map_err(|e| JsValue::from_str(&format!("解析参数失败: {}", e)))?;

        let effects = dom::apply_select(params.kind, &params.value)
            .map_err(|e| JsValue::from_str(&e))?;

        // 序列化结果
        serde_wasm_bindgen::to_value(&effects)
            .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
    }

    /// 取消筛选，显示全部文章
    #[wasm_bindgen]
    pub fn show_all() -> Result<JsValue, JsValue> {
        let effects = dom::apply_show_all().map_err(|e| JsValue::from_str(&e))?;

        serde_wasm_bindgen::to_value(&effects)
            .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
    }

    /// 获取指定维度的菜单项
    #[wasm_bindgen]
    pub fn menu_items(kind: &str) -> Result<JsValue, JsValue> {
        let kind = FacetKind::from_attr(kind)
            .ok_or_else(|| JsValue::from_str(&format!("未知的维度类型: {}", kind)))?;

        let items = ArchiveFilter::menu_items(kind).map_err(|e| JsValue::from_str(&e))?;

        serde_wasm_bindgen::to_value(&items)
            .map_err(|e| JsValue::from_str(&format!("序列化菜单失败: {}", e)))
    }

    /// 当前筛选状态
    #[wasm_bindgen]
    pub fn filter_state() -> Result<JsValue, JsValue> {
        let state = ArchiveFilter::filter_state().map_err(|e| JsValue::from_str(&e))?;

        serde_wasm_bindgen::to_value(&state)
            .map_err(|e| JsValue::from_str(&format!("序列化状态失败: {}", e)))
    }

    /// 当前可见文章数
    #[wasm_bindgen]
    pub fn visible_count() -> Result<usize, JsValue> {
        ArchiveFilter::visible_count().map_err(|e| JsValue::from_str(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse_facet_tokens;
    use crate::models::Display;

    fn post(title: &str, categories: &str, tags: &str) -> PostRecord {
        PostRecord {
            title: title.to_string(),
            categories: parse_facet_tokens(categories),
            tags: parse_facet_tokens(tags),
        }
    }

    fn sample_state() -> ArchiveState {
        ArchiveState::new(
            vec![
                post("文章一", "go,rust", ""),
                post("文章二", "go", ""),
                post("文章三", "", "infra"),
            ],
            LayoutMode::Desktop,
        )
    }

    #[test]
    fn select_keeps_exact_matches_visible() {
        let mut state = sample_state();
        let effects = state.select(FacetKind::Category, "go");

        assert_eq!(effects.visible_count, 2);
        assert_eq!(
            effects.displays,
            vec![Display::Flex, Display::Flex, Display::None]
        );
        assert!(!effects.show_empty);
        assert_eq!(
            effects.status_text.as_deref(),
            Some("当前筛选：分类 - go")
        );
        assert_eq!(
            state.filter,
            FilterState::Facet {
                kind: FacetKind::Category,
                value: "go".to_string()
            }
        );
    }

    #[test]
    fn select_value_is_trimmed() {
        let mut state = sample_state();
        let padded = state.select(FacetKind::Category, " go ");
        let mut state2 = sample_state();
        let clean = state2.select(FacetKind::Category, "go");
        assert_eq!(padded, clean);
    }

    #[test]
    fn select_replaces_previous_filter() {
        let mut state = sample_state();
        state.select(FacetKind::Category, "go");
        let effects = state.select(FacetKind::Tag, "infra");

        assert_eq!(effects.visible_count, 1);
        assert_eq!(
            effects.displays,
            vec![Display::None, Display::None, Display::Flex]
        );
        assert_eq!(
            effects.status_text.as_deref(),
            Some("当前筛选：标签 - infra")
        );
    }

    #[test]
    fn select_is_idempotent() {
        let mut state = sample_state();
        let first = state.select(FacetKind::Category, "rust");
        let second = state.select(FacetKind::Category, "rust");

        // 空状态元素只会创建一次，其余效果完全一致
        assert_eq!(first.displays, second.displays);
        assert_eq!(first.visible_count, second.visible_count);
        assert_eq!(first.status_text, second.status_text);
    }

    #[test]
    fn show_all_restores_every_post() {
        let mut state = sample_state();
        state.select(FacetKind::Tag, "infra");
        let effects = state.show_all();

        assert_eq!(effects.visible_count, 3);
        assert!(effects.displays.iter().all(|d| *d == Display::Flex));
        assert!(!effects.show_empty);
        assert_eq!(effects.status_text, None);
        assert_eq!(state.filter, FilterState::All);
    }

    #[test]
    fn zero_match_shows_empty_notice_once() {
        let mut state = sample_state();
        let first = state.select(FacetKind::Tag, "不存在的标签");

        assert_eq!(first.visible_count, 0);
        assert!(first.show_empty);
        assert!(first.create_notice);

        // 再次零结果时复用已有元素
        let second = state.select(FacetKind::Category, "也不存在");
        assert!(second.show_empty);
        assert!(!second.create_notice);

        // 恢复后提示隐藏，元素保留
        let restored = state.show_all();
        assert!(!restored.show_empty);
        assert!(!restored.create_notice);
    }

    #[test]
    fn resize_commutes_with_select() {
        let mut filtered_first = sample_state();
        filtered_first.select(FacetKind::Category, "go");
        let a = filtered_first.resize(Some(600.0));

        let mut resized_first = sample_state();
        resized_first.resize(Some(600.0));
        let b = resized_first.select(FacetKind::Category, "go");

        assert_eq!(a.displays, b.displays);
        assert_eq!(a.visible_count, b.visible_count);
        assert_eq!(
            a.displays,
            vec![Display::Block, Display::Block, Display::None]
        );
    }

    #[test]
    fn resize_is_idempotent() {
        let mut state = sample_state();
        let first = state.resize(Some(480.0));
        let second = state.resize(Some(480.0));
        assert_eq!(first, second);
    }

    #[test]
    fn resize_keeps_filter_and_status() {
        let mut state = sample_state();
        state.select(FacetKind::Category, "go");
        let effects = state.resize(Some(900.0));

        assert_eq!(effects.visible_count, 2);
        assert_eq!(
            effects.status_text.as_deref(),
            Some("当前筛选：分类 - go")
        );
        assert_eq!(
            effects.displays,
            vec![Display::Block, Display::Block, Display::None]
        );
    }

    #[test]
    fn empty_post_list_never_fails() {
        let mut state = ArchiveState::new(Vec::new(), LayoutMode::Desktop);
        let effects = state.select(FacetKind::Category, "go");

        assert_eq!(effects.visible_count, 0);
        assert!(effects.displays.is_empty());
        assert!(effects.show_empty);

        let restored = state.show_all();
        assert_eq!(restored.visible_count, 0);
        assert!(!restored.show_empty);
    }

    #[test]
    fn unfiltered_empty_list_hides_notice() {
        let mut state = ArchiveState::new(Vec::new(), LayoutMode::Desktop);
        let effects = state.resize(Some(1200.0));
        assert!(!effects.show_empty);
    }

    #[test]
    fn end_to_end_walkthrough() {
        let mut state = ArchiveState::new(
            vec![
                post("甲", "go,rust", ""),
                post("乙", "go", ""),
                post("丙", "", "infra"),
            ],
            LayoutMode::Desktop,
        );

        // 分类菜单：go(2)、rust(1)，字典序
        let menu = builder::menu_items(&state.index, FacetKind::Category);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].label, "go");
        assert_eq!(menu[0].count, 2);
        assert_eq!(menu[1].label, "rust");
        assert_eq!(menu[1].count, 1);

        assert_eq!(state.select(FacetKind::Category, "go").visible_count, 2);
        assert_eq!(state.select(FacetKind::Category, "rust").visible_count, 1);
        assert_eq!(state.select(FacetKind::Tag, "infra").visible_count, 1);

        let none = state.select(FacetKind::Tag, "missing");
        assert_eq!(none.visible_count, 0);
        assert!(none.show_empty);

        assert_eq!(state.show_all().visible_count, 3);
    }
}
