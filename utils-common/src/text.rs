//! 光标文本编辑与字数统计
//!
//! 所有位置参数均按 UTF-16 单位计，与浏览器文本框的
//! selectionStart/selectionEnd 保持一致。

/// 光标编辑结果 - 新文本与新的光标位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorEdit {
    /// 编辑后的完整文本
    pub text: String,
    /// 新的光标位置（UTF-16 单位）
    pub cursor: usize,
}

/// 字符串的 UTF-16 单位长度，等同于 JS 的 string.length
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// 统计词数：去除首尾空白后按空白切分，空文本计 0
pub fn word_count(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        0
    } else {
        trimmed.split_whitespace().count()
    }
}

/// 取选区内的文本
pub fn selection(value: &str, sel_start: usize, sel_end: usize) -> String {
    let units: Vec<u16> = value.encode_utf16().collect();
    let start = sel_start.min(units.len());
    let end = sel_end.clamp(start, units.len());
    String::from_utf16_lossy(&units[start..end])
}

/// 在选区位置插入文本，替换当前选区内容
///
/// 光标落在插入内容之后，可用 cursor_offset 回退（例如包裹语法
/// 插入占位文本后把光标移回结尾标记之前）。
pub fn insert_at_cursor(
    value: &str,
    sel_start: usize,
    sel_end: usize,
    insert: &str,
    cursor_offset: i32,
) -> CursorEdit {
    let units: Vec<u16> = value.encode_utf16().collect();
    let start = sel_start.min(units.len());
    let end = sel_end.clamp(start, units.len());
    let insert_units: Vec<u16> = insert.encode_utf16().collect();

    let mut merged = Vec::with_capacity(units.len() - (end - start) + insert_units.len());
    merged.extend_from_slice(&units[..start]);
    merged.extend_from_slice(&insert_units);
    merged.extend_from_slice(&units[end..]);

    let base = start + insert_units.len();
    let cursor = if cursor_offset < 0 {
        base.saturating_sub(cursor_offset.unsigned_abs() as usize)
    } else {
        (base + cursor_offset as usize).min(merged.len())
    };

    CursorEdit {
        text: String::from_utf16_lossy(&merged),
        cursor,
    }
}

/// 块级插入：光标前有内容且不以换行结尾则先补换行，光标后同理
///
/// 光标落在补齐后的整段文本末尾。
pub fn insert_block_at_cursor(
    value: &str,
    sel_start: usize,
    sel_end: usize,
    insert: &str,
) -> CursorEdit {
    const NEWLINE: u16 = b'\n' as u16;

    let units: Vec<u16> = value.encode_utf16().collect();
    let start = sel_start.min(units.len());
    let end = sel_end.clamp(start, units.len());

    let before = &units[..start];
    let after = &units[end..];
    let need_newline_before = !before.is_empty() && before.last() != Some(&NEWLINE);
    let need_newline_after = !after.is_empty() && after.first() != Some(&NEWLINE);

    let mut padded = String::new();
    if need_newline_before {
        padded.push('\n');
    }
    padded.push_str(insert);
    if need_newline_after {
        padded.push('\n');
    }

    insert_at_cursor(value, start, end, &padded, 0)
}
