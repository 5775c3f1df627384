pub mod dom;
pub mod files;
pub mod storage;
pub mod text;
pub mod toast;

// 重新导出常用模块和函数，方便直接使用
pub use dom::Display;
pub use files::{check_image_file, is_image, ImageFileError, MAX_PREVIEW_IMAGE_BYTES, MAX_UPLOAD_IMAGE_BYTES};
pub use storage::{remember_new_post_title, take_new_post_title, NEW_POST_TITLE_KEY};
pub use text::{insert_at_cursor, insert_block_at_cursor, selection, utf16_len, word_count, CursorEdit};
pub use toast::{show_classed_message, show_toast, ToastKind};
