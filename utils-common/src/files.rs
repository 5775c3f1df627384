//! 图片文件校验规则

/// 文章页本地预览图片的大小上限（5MB）
pub const MAX_PREVIEW_IMAGE_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

/// 编辑器上传图片的大小上限（10MB）
pub const MAX_UPLOAD_IMAGE_BYTES: f64 = 10.0 * 1024.0 * 1024.0;

/// 图片文件校验不通过的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFileError {
    /// MIME 类型不是 image/*
    NotImage,
    /// 文件超过大小上限
    TooLarge,
}

/// 判断 MIME 类型是否为图片
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// 校验图片文件的类型与大小
pub fn check_image_file(mime: &str, size: f64, max_bytes: f64) -> Result<(), ImageFileError> {
    if !is_image(mime) {
        return Err(ImageFileError::NotImage);
    }
    if size > max_bytes {
        return Err(ImageFileError::TooLarge);
    }
    Ok(())
}
