use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use utils_common::dom::Display;

/// 移动端布局的视口宽度阈值（像素）
pub const MOBILE_BREAKPOINT: f64 = 900.0;

/// 文章卡片记录 - 页面采集后不再变化
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PostRecord {
    /// 文章标题
    pub title: String,
    /// 所属分类集合（已去重排序）
    pub categories: Vec<String>,
    /// 标签集合（已去重排序）
    pub tags: Vec<String>,
}

/// 筛选维度 - 分类或标签
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    /// 分类维度
    Category,
    /// 标签维度
    Tag,
}

impl FacetKind {
    /// 中文名，用于筛选状态提示
    pub fn label(&self) -> &'static str {
        match self {
            FacetKind::Category => "分类",
            FacetKind::Tag => "标签",
        }
    }

    /// data-type 属性值
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetKind::Category => "category",
            FacetKind::Tag => "tag",
        }
    }

    /// 从 data-type 属性值解析
    pub fn from_attr(value: &str) -> Option<FacetKind> {
        match value {
            "category" => Some(FacetKind::Category),
            "tag" => Some(FacetKind::Tag),
            _ => None,
        }
    }
}

/// 维度索引 - 维度值到文章数的映射
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FacetIndex {
    /// 分类名 -> 含该分类的文章数
    pub categories: HashMap<String, usize>,
    /// 标签名 -> 含该标签的文章数
    pub tags: HashMap<String, usize>,
}

impl FacetIndex {
    /// 指定维度的计数表
    pub fn counts(&self, kind: FacetKind) -> &HashMap<String, usize> {
        match kind {
            FacetKind::Category => &self.categories,
            FacetKind::Tag => &self.tags,
        }
    }
}

/// 筛选状态 - 至多一个激活的筛选条件
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterState {
    /// 未筛选，全部文章可见
    #[default]
    All,
    /// 按单个维度值筛选
    Facet {
        /// 筛选维度
        kind: FacetKind,
        /// 维度值（已去除首尾空白）
        value: String,
    },
}

/// 布局模式 - 由视口宽度推导
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// 桌面端，可见卡片使用 flex
    Desktop,
    /// 移动端（宽度不超过 900px），可见卡片使用 block
    Mobile,
}

impl LayoutMode {
    /// 根据视口宽度推导布局，宽度未知时按桌面端处理
    pub fn from_width(width: Option<f64>) -> LayoutMode {
        match width {
            Some(w) if w <= MOBILE_BREAKPOINT => LayoutMode::Mobile,
            _ => LayoutMode::Desktop,
        }
    }

    /// 卡片显示方式始终由布局与可见性共同推导，不做就地翻转
    pub fn display_for(&self, visible: bool) -> Display {
        if !visible {
            return Display::None;
        }
        match self {
            LayoutMode::Desktop => Display::Flex,
            LayoutMode::Mobile => Display::Block,
        }
    }
}

/// 菜单项 - 维度值与文章数
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    /// 维度值
    pub label: String,
    /// 含该值的文章数
    pub count: usize,
}

/// 筛选参数 - 客户端传递的筛选条件
#[derive(Deserialize, Debug)]
pub struct SelectParams {
    /// 筛选维度
    pub kind: FacetKind,
    /// 维度值
    pub value: String,
}

/// 状态变更后需要同步到页面的效果
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewEffects {
    /// 每张卡片的 display 值，顺序与采集顺序一致
    pub displays: Vec<Display>,
    /// 可见文章数
    pub visible_count: usize,
    /// 是否显示空状态提示
    pub show_empty: bool,
    /// 是否需要创建空状态元素（首次出现零结果时为 true）
    pub create_notice: bool,
    /// 筛选状态提示文本，None 表示隐藏提示
    pub status_text: Option<String>,
}
