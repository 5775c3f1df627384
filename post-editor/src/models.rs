//! 发布数据模型与表单值处理

use chrono::{NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// 发布文章接口的请求体
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostPayload {
    /// 文章标题
    pub title: String,
    /// ISO 8601 格式的发布时间
    pub date: String,
    /// 标签列表
    pub tags: Vec<String>,
    /// 分类
    pub categories: String,
    /// Markdown 正文
    pub body: String,
}

/// 上传接口的响应体，错误响应复用 error 字段
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UploadResponse {
    /// 图片的访问地址
    pub url: String,
    /// 上传时的原始文件名
    #[serde(rename = "originalName")]
    pub original_name: String,
    /// 文件字节数
    pub size: f64,
    /// 失败原因
    pub error: String,
}

/// 发布接口的错误响应体
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ApiError {
    /// 失败原因
    pub error: String,
}

/// 从表单原始值构建发布请求体，日期无法解析时报错
pub fn build_payload(
    title: &str,
    date: &str,
    tags: &str,
    categories: &str,
    body: &str,
) -> Result<PostPayload, String> {
    Ok(PostPayload {
        title: title.trim().to_string(),
        date: iso_date(date)?,
        tags: split_tags(tags),
        categories: categories.trim().to_string(),
        body: body.trim().to_string(),
    })
}

/// 逗号分隔的标签值拆成列表，空白项直接丢弃
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// 日期输入框的值转成 UTC 零点的 ISO 8601 时间戳
pub fn iso_date(value: &str) -> Result<String, String> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("无效的日期: {}", value))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("无效的日期: {}", value))?;
    Ok(Utc
        .from_utc_datetime(&midnight)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_split_on_commas_and_drop_blanks() {
        assert_eq!(split_tags("rust, wasm, 前端"), vec!["rust", "wasm", "前端"]);
        assert_eq!(split_tags(" rust ,, , "), vec!["rust"]);
        assert_eq!(split_tags(""), Vec::<String>::new());
        assert_eq!(split_tags("   "), Vec::<String>::new());
    }

    #[test]
    fn date_becomes_utc_midnight_iso() {
        assert_eq!(iso_date("2024-03-05").unwrap(), "2024-03-05T00:00:00.000Z");
        assert_eq!(iso_date("2025-12-31").unwrap(), "2025-12-31T00:00:00.000Z");
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(iso_date("").is_err());
        assert!(iso_date("2024-13-01").is_err());
        assert!(iso_date("昨天").is_err());
    }

    #[test]
    fn payload_trims_free_text_fields() {
        let payload = build_payload(
            "  新文章  ",
            "2024-03-05",
            "rust, wasm",
            " 技术 ",
            "\n正文内容\n",
        )
        .unwrap();
        assert_eq!(payload.title, "新文章");
        assert_eq!(payload.date, "2024-03-05T00:00:00.000Z");
        assert_eq!(payload.tags, vec!["rust", "wasm"]);
        assert_eq!(payload.categories, "技术");
        assert_eq!(payload.body, "正文内容");
    }

    #[test]
    fn payload_serializes_expected_field_names() {
        let payload = build_payload("题", "2024-01-01", "", "", "体").unwrap();
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            "{\"title\":\"题\",\"date\":\"2024-01-01T00:00:00.000Z\",\"tags\":[],\"categories\":\"\",\"body\":\"体\"}"
        );
    }

    #[test]
    fn upload_response_reads_camel_case_name() {
        let response: UploadResponse = serde_json::from_str(
            "{\"url\":\"/images/a/1.png\",\"originalName\":\"截图 1.png\",\"size\":2048}",
        )
        .unwrap();
        assert_eq!(response.url, "/images/a/1.png");
        assert_eq!(response.original_name, "截图 1.png");
        assert_eq!(response.size, 2048.0);
        assert_eq!(response.error, "");
    }

    #[test]
    fn error_body_fills_error_field_only() {
        let response: UploadResponse = serde_json::from_str("{\"error\":\"磁盘已满\"}").unwrap();
        assert_eq!(response.error, "磁盘已满");
        assert_eq!(response.url, "");
    }
}
