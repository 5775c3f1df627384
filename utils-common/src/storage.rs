//! 发布成功提示的 localStorage 交接

use crate::dom;

/// 编辑页发布成功后写入、首页读取的键名
pub const NEW_POST_TITLE_KEY: &str = "newPostTitle";

/// 记录最新发布的文章标题，存储不可用时静默跳过
pub fn remember_new_post_title(title: &str) {
    if let Ok(window) = dom::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(NEW_POST_TITLE_KEY, title);
        }
    }
}

/// 读取并清除最新发布的文章标题
///
/// 读后即删，保证提示只出现一次。空标题视同不存在且不清除。
pub fn take_new_post_title() -> Option<String> {
    let window = dom::window().ok()?;
    let storage = window.local_storage().ok()??;
    let title = storage.get_item(NEW_POST_TITLE_KEY).ok()??;
    if title.is_empty() {
        return None;
    }
    let _ = storage.remove_item(NEW_POST_TITLE_KEY);
    Some(title)
}
