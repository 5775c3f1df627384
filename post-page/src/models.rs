use serde::{Deserialize, Serialize};

pub use utils_common::dom::Display;

/// 编辑中的文章数据 - 保存时从各输入框采集
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// 文章标题
    pub title: String,
    /// Markdown 正文
    pub content: String,
    /// 分类，逗号分隔
    pub categories: String,
    /// 标签，逗号分隔
    pub tags: String,
    /// 缩略图地址
    pub thumbnail: String,
    /// 发布日期
    pub date: String,
}

/// 编辑模式切换后各面板的显示方式
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelVisibility {
    /// 是否处于编辑模式
    pub editing: bool,
    /// 编辑按钮文字
    pub edit_label: &'static str,
    /// 保存按钮
    pub save_button: Display,
    /// 元信息编辑面板
    pub meta_panel: Display,
    /// 编辑工具栏
    pub toolbar: Display,
    /// 文章正文
    pub content: Display,
    /// Markdown 编辑器
    pub editor: Display,
    /// 预览面板，None 表示保持原样
    pub preview: Option<Display>,
}

impl PanelVisibility {
    /// 编辑模式对应的面板显示表
    ///
    /// 进入编辑模式时预览面板保持原样，退出时强制隐藏。
    pub fn for_edit_mode(editing: bool) -> PanelVisibility {
        if editing {
            PanelVisibility {
                editing: true,
                edit_label: "取消",
                save_button: Display::Flex,
                meta_panel: Display::Block,
                toolbar: Display::Flex,
                content: Display::None,
                editor: Display::Block,
                preview: None,
            }
        } else {
            PanelVisibility {
                editing: false,
                edit_label: "编辑",
                save_button: Display::None,
                meta_panel: Display::None,
                toolbar: Display::None,
                content: Display::Block,
                editor: Display::None,
                preview: Some(Display::None),
            }
        }
    }
}

/// 预览切换后编辑器与预览面板的显示方式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewVisibility {
    /// 是否处于预览模式
    pub previewing: bool,
    /// Markdown 编辑器
    pub editor: Display,
    /// 预览面板
    pub preview: Display,
}

impl PreviewVisibility {
    /// 预览模式对应的面板显示表
    pub fn for_preview_mode(previewing: bool) -> PreviewVisibility {
        if previewing {
            PreviewVisibility {
                previewing: true,
                editor: Display::None,
                preview: Display::Block,
            }
        } else {
            PreviewVisibility {
                previewing: false,
                editor: Display::Block,
                preview: Display::None,
            }
        }
    }
}

/// 工具栏动作 - 与按钮的 data-action 属性对应
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarAction {
    /// 粗体
    Bold,
    /// 斜体
    Italic,
    /// 行内代码
    Code,
    /// 一级标题
    Heading1,
    /// 二级标题
    Heading2,
    /// 三级标题
    Heading3,
    /// 插入链接，打开链接对话框
    Link,
    /// 插入图片，打开图片对话框
    Image,
    /// 引用
    Quote,
    /// 列表项
    List,
    /// 代码块
    CodeBlock,
    /// 切换预览
    Preview,
}

impl ToolbarAction {
    /// 从 data-action 属性值解析
    pub fn from_attr(value: &str) -> Option<ToolbarAction> {
        match value {
            "bold" => Some(ToolbarAction::Bold),
            "italic" => Some(ToolbarAction::Italic),
            "code" => Some(ToolbarAction::Code),
            "heading1" => Some(ToolbarAction::Heading1),
            "heading2" => Some(ToolbarAction::Heading2),
            "heading3" => Some(ToolbarAction::Heading3),
            "link" => Some(ToolbarAction::Link),
            "image" => Some(ToolbarAction::Image),
            "quote" => Some(ToolbarAction::Quote),
            "list" => Some(ToolbarAction::List),
            "codeblock" => Some(ToolbarAction::CodeBlock),
            "preview" => Some(ToolbarAction::Preview),
            _ => None,
        }
    }

    /// 动作对应的插入文本与光标偏移
    ///
    /// 有选中文本时包裹选中内容且光标不偏移，没有时插入占位文本，
    /// 光标回退到包裹符号内侧。Link、Image、Preview 不走文本插入，
    /// 返回 None。
    pub fn replacement(&self, selected: &str) -> Option<(String, i32)> {
        let has_selection = !selected.is_empty();
        let (text, placeholder_offset) = match self {
            ToolbarAction::Bold => (format!("**{}**", pick(selected, "粗体文本")), -2),
            ToolbarAction::Italic => (format!("*{}*", pick(selected, "斜体文本")), -1),
            ToolbarAction::Code => (format!("`{}`", pick(selected, "代码")), -1),
            ToolbarAction::Heading1 => (format!("# {}", pick(selected, "标题1")), 0),
            ToolbarAction::Heading2 => (format!("## {}", pick(selected, "标题2")), 0),
            ToolbarAction::Heading3 => (format!("### {}", pick(selected, "标题3")), 0),
            ToolbarAction::Quote => (format!("> {}", pick(selected, "引用文本")), 0),
            ToolbarAction::List => (format!("- {}", pick(selected, "列表项")), 0),
            ToolbarAction::CodeBlock => {
                (format!("```\n{}\n```", pick(selected, "代码块")), -4)
            }
            ToolbarAction::Link | ToolbarAction::Image | ToolbarAction::Preview => return None,
        };
        let offset = if has_selection { 0 } else { placeholder_offset };
        Some((text, offset))
    }
}

/// 空选中时使用占位文本
fn pick<'a>(selected: &'a str, placeholder: &'a str) -> &'a str {
    if selected.is_empty() {
        placeholder
    } else {
        selected
    }
}

/// 键盘快捷键对应的命令
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortcutCommand {
    /// Ctrl+S 保存
    Save,
    /// Ctrl+B 粗体
    Bold,
    /// Ctrl+I 斜体
    Italic,
    /// Esc 关闭图片对话框
    CloseImageModal,
    /// Esc 关闭链接对话框
    CloseLinkModal,
    /// Esc 退出编辑模式
    ExitEdit,
}

/// 解析编辑模式下的键盘快捷键
///
/// Esc 优先关闭打开中的对话框，图片对话框先于链接对话框，
/// 两者都未打开时退出编辑模式。
pub fn shortcut_for(
    key: &str,
    ctrl: bool,
    image_modal_open: bool,
    link_modal_open: bool,
) -> Option<ShortcutCommand> {
    if ctrl && key == "s" {
        return Some(ShortcutCommand::Save);
    }
    if ctrl && key == "b" {
        return Some(ShortcutCommand::Bold);
    }
    if ctrl && key == "i" {
        return Some(ShortcutCommand::Italic);
    }
    if key == "Escape" {
        if image_modal_open {
            return Some(ShortcutCommand::CloseImageModal);
        }
        if link_modal_open {
            return Some(ShortcutCommand::CloseLinkModal);
        }
        return Some(ShortcutCommand::ExitEdit);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolbar_action_parses_attr_values() {
        assert_eq!(ToolbarAction::from_attr("bold"), Some(ToolbarAction::Bold));
        assert_eq!(
            ToolbarAction::from_attr("codeblock"),
            Some(ToolbarAction::CodeBlock)
        );
        assert_eq!(
            ToolbarAction::from_attr("preview"),
            Some(ToolbarAction::Preview)
        );
        assert_eq!(ToolbarAction::from_attr("undo"), None);
    }

    #[test]
    fn toolbar_replacement_wraps_selection_without_offset() {
        assert_eq!(
            ToolbarAction::Bold.replacement("重点"),
            Some(("**重点**".to_string(), 0))
        );
        assert_eq!(
            ToolbarAction::CodeBlock.replacement("let x = 1;"),
            Some(("```\nlet x = 1;\n```".to_string(), 0))
        );
        assert_eq!(
            ToolbarAction::Heading2.replacement("章节"),
            Some(("## 章节".to_string(), 0))
        );
    }

    #[test]
    fn toolbar_replacement_uses_placeholder_and_backs_into_wrapper() {
        assert_eq!(
            ToolbarAction::Bold.replacement(""),
            Some(("**粗体文本**".to_string(), -2))
        );
        assert_eq!(
            ToolbarAction::Italic.replacement(""),
            Some(("*斜体文本*".to_string(), -1))
        );
        assert_eq!(
            ToolbarAction::Code.replacement(""),
            Some(("`代码`".to_string(), -1))
        );
        assert_eq!(
            ToolbarAction::CodeBlock.replacement(""),
            Some(("```\n代码块\n```".to_string(), -4))
        );
        assert_eq!(
            ToolbarAction::Quote.replacement(""),
            Some(("> 引用文本".to_string(), 0))
        );
    }

    #[test]
    fn modal_actions_have_no_replacement() {
        assert_eq!(ToolbarAction::Link.replacement("文字"), None);
        assert_eq!(ToolbarAction::Image.replacement(""), None);
        assert_eq!(ToolbarAction::Preview.replacement(""), None);
    }

    #[test]
    fn shortcuts_require_ctrl_for_letters() {
        assert_eq!(shortcut_for("s", true, false, false), Some(ShortcutCommand::Save));
        assert_eq!(shortcut_for("b", true, false, false), Some(ShortcutCommand::Bold));
        assert_eq!(shortcut_for("i", true, false, false), Some(ShortcutCommand::Italic));
        assert_eq!(shortcut_for("s", false, false, false), None);
        assert_eq!(shortcut_for("x", true, false, false), None);
    }

    #[test]
    fn escape_prefers_open_modals_over_exiting() {
        assert_eq!(
            shortcut_for("Escape", false, true, true),
            Some(ShortcutCommand::CloseImageModal)
        );
        assert_eq!(
            shortcut_for("Escape", false, false, true),
            Some(ShortcutCommand::CloseLinkModal)
        );
        assert_eq!(
            shortcut_for("Escape", false, false, false),
            Some(ShortcutCommand::ExitEdit)
        );
    }

    #[test]
    fn edit_mode_visibility_table() {
        let entering = PanelVisibility::for_edit_mode(true);
        assert_eq!(entering.edit_label, "取消");
        assert_eq!(entering.save_button, Display::Flex);
        assert_eq!(entering.meta_panel, Display::Block);
        assert_eq!(entering.toolbar, Display::Flex);
        assert_eq!(entering.content, Display::None);
        assert_eq!(entering.editor, Display::Block);
        assert_eq!(entering.preview, None);

        let leaving = PanelVisibility::for_edit_mode(false);
        assert_eq!(leaving.edit_label, "编辑");
        assert_eq!(leaving.save_button, Display::None);
        assert_eq!(leaving.content, Display::Block);
        assert_eq!(leaving.editor, Display::None);
        assert_eq!(leaving.preview, Some(Display::None));
    }

    #[test]
    fn preview_mode_visibility_table() {
        let on = PreviewVisibility::for_preview_mode(true);
        assert_eq!(on.editor, Display::None);
        assert_eq!(on.preview, Display::Block);

        let off = PreviewVisibility::for_preview_mode(false);
        assert_eq!(off.editor, Display::Block);
        assert_eq!(off.preview, Display::None);
    }

    #[test]
    fn post_draft_serializes_field_names() {
        let draft = PostDraft {
            title: "标题".to_string(),
            content: "# 正文".to_string(),
            categories: "技术".to_string(),
            tags: "rust, wasm".to_string(),
            thumbnail: "/images/1.gif".to_string(),
            date: "2024-01-01".to_string(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["title"], "标题");
        assert_eq!(value["content"], "# 正文");
        assert_eq!(value["thumbnail"], "/images/1.gif");
    }
}
