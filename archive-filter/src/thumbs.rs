//! 文章卡片缩略图回退链
//!
//! 原始图片加载失败后按文章序号换用随机图库，随机图连续两次失败
//! 则落到内联 SVG 占位图并摘除事件处理器，链条就此终止。

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, Element, HtmlImageElement};

use utils_common::dom::set_timeout_once;

/// 随机图库，按文章序号轮转取用
pub const RANDOM_IMAGES: [&str; 9] = [
    "/images/1.gif",
    "/images/2.gif",
    "/images/3.gif",
    "/images/4.gif",
    "/images/5.gif",
    "/images/6.gif",
    "/images/7.gif",
    "/images/8.gif",
    "/images/9.gif",
];

/// 占位 SVG，全部图源失败后的终点
const PLACEHOLDER_SVG: &str = "<svg width=\"300\" height=\"200\" xmlns=\"http://www.w3.org/2000/svg\">\
     <rect width=\"300\" height=\"200\" fill=\"#f0f0f0\"/>\
     <text x=\"150\" y=\"100\" text-anchor=\"middle\" dominant-baseline=\"middle\" \
     font-family=\"Arial\" font-size=\"16\" fill=\"#999\">图片加载中...</text></svg>";

/// 原始图片的延迟复查等待时长（毫秒）
const ORIGINAL_CHECK_DELAY_MS: i32 = 3000;

/// 全部缩略图兜底复查的等待时长（毫秒）
const SWEEP_CHECK_DELAY_MS: i32 = 5000;

/// 缩略图当前来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbSource {
    /// 文章自带的原始图片
    Original(String),
    /// 随机图库中的一张
    Random {
        /// 由文章序号决定的基准下标
        base: usize,
        /// 第几次随机尝试（0 或 1）
        attempt: u8,
    },
    /// 内联占位图，链条终点
    Placeholder,
}

impl ThumbSource {
    /// 首个来源：有原始图片用原始图片，否则直接进入随机图
    pub fn first(original: Option<String>, post_index: usize) -> ThumbSource {
        match original {
            Some(src) if !src.is_empty() => ThumbSource::Original(src),
            _ => ThumbSource::Random {
                base: post_index % RANDOM_IMAGES.len(),
                attempt: 0,
            },
        }
    }

    /// 加载失败后的下一个来源
    pub fn next(&self, post_index: usize) -> ThumbSource {
        match self {
            ThumbSource::Original(_) => ThumbSource::Random {
                base: post_index % RANDOM_IMAGES.len(),
                attempt: 0,
            },
            ThumbSource::Random { base, attempt: 0 } => ThumbSource::Random {
                base: *base,
                attempt: 1,
            },
            _ => ThumbSource::Placeholder,
        }
    }

    /// 当前来源对应的图片地址，占位图由适配层生成
    pub fn url(&self) -> Option<String> {
        match self {
            ThumbSource::Original(src) => Some(src.clone()),
            ThumbSource::Random { base, attempt } => Some(
                RANDOM_IMAGES[(base + *attempt as usize) % RANDOM_IMAGES.len()].to_string(),
            ),
            ThumbSource::Placeholder => None,
        }
    }
}

/// 处理所有文章卡片的缩略图，并注册兜底复查
pub fn handle_post_images(document: &Document) -> Result<(), String> {
    let cards = document
        .query_selector_all(".post-card")
        .map_err(|_| "查询文章卡片失败")?;

    for i in 0..cards.length() {
        if let Some(node) = cards.item(i) {
            if let Some(card) = node.dyn_ref::<Element>() {
                handle_card_image(card, i as usize);
            }
        }
    }

    schedule_sweep_check(document.clone())?;
    Ok(())
}

/// 单张卡片：绑定加载回调并进入回退链的首个来源
fn handle_card_image(card: &Element, post_index: usize) {
    let img = match card
        .query_selector(".post-thumbnail img")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
    {
        Some(img) => img,
        None => return,
    };

    let title = post_title(card, post_index);
    let has_thumbnail = img.get_attribute("data-has-thumbnail").as_deref() == Some("true");
    let original_src = img.get_attribute("data-original-src").unwrap_or_default();

    bind_load_handlers(&img, post_index, &title);

    if has_thumbnail && !original_src.is_empty() {
        if img.src() != original_src {
            img.set_src(&original_src);
        }
        schedule_original_check(&img, post_index, &title);
    } else {
        console::log_1(&JsValue::from_str(&format!(
            "文章 \"{}\" 没有原始图片，使用随机图片",
            title
        )));
        apply_source(&img, &ThumbSource::first(None, post_index), &title);
    }
}

/// 卡片标题，取不到时用序号占位
fn post_title(card: &Element, post_index: usize) -> String {
    card.query_selector(".post-title")
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| format!("文章{}", post_index + 1))
}

/// 绑定加载成功与失败的回调
fn bind_load_handlers(img: &HtmlImageElement, post_index: usize, title: &str) {
    let loaded_img = img.clone();
    let loaded_title = title.to_string();
    let onload = Closure::<dyn FnMut()>::new(move || {
        console::log_1(&JsValue::from_str(&format!(
            "✅ 文章 \"{}\" 的图片加载成功: {}",
            loaded_title,
            loaded_img.src()
        )));
    });
    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    let failed_img = img.clone();
    let failed_title = title.to_string();
    let onerror = Closure::<dyn FnMut()>::new(move || {
        advance_thumbnail(&failed_img, post_index, &failed_title);
    });
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();
}

/// 根据图片元素上的标记推断当前来源
fn current_source(img: &HtmlImageElement, post_index: usize) -> ThumbSource {
    if img.get_attribute("data-has-thumbnail").as_deref() == Some("true") {
        return ThumbSource::Original(img.get_attribute("data-original-src").unwrap_or_default());
    }
    let attempt = img
        .get_attribute("data-fallback-attempt")
        .and_then(|value| value.parse::<u8>().ok())
        .unwrap_or(0);
    ThumbSource::Random {
        base: post_index % RANDOM_IMAGES.len(),
        attempt,
    }
}

/// 加载失败：沿回退链前进一步
fn advance_thumbnail(img: &HtmlImageElement, post_index: usize, title: &str) {
    let next = current_source(img, post_index).next(post_index);
    console::warn_1(&JsValue::from_str(&format!(
        "❌ 文章 \"{}\" 的图片加载失败: {}",
        title,
        img.src()
    )));
    apply_source(img, &next, title);
}

/// 把指定来源写到图片元素上
fn apply_source(img: &HtmlImageElement, source: &ThumbSource, title: &str) {
    match source {
        ThumbSource::Original(src) => {
            img.set_src(src);
        }
        ThumbSource::Random { base, attempt } => {
            let url = RANDOM_IMAGES[(base + *attempt as usize) % RANDOM_IMAGES.len()];
            let _ = img.class_list().add_1("random-image");
            let _ = img.set_attribute("data-has-thumbnail", "false");
            let _ = img.set_attribute("data-fallback-attempt", &attempt.to_string());
            console::log_1(&JsValue::from_str(&format!(
                "🎲 为文章 \"{}\" 设置随机图片: {}",
                title, url
            )));
            img.set_src(url);
        }
        ThumbSource::Placeholder => {
            console::log_1(&JsValue::from_str(&format!(
                "文章 \"{}\" 改用占位图",
                title
            )));
            // 摘除回调，回退链到此为止
            img.set_onload(None);
            img.set_onerror(None);
            img.set_src(&placeholder_data_url());
        }
    }
}

/// 内联 SVG 的 data URL
fn placeholder_data_url() -> String {
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        String::from(js_sys::encode_uri_component(PLACEHOLDER_SVG))
    )
}

/// 原始图片的延迟复查：仍未加载成功则进入随机图
fn schedule_original_check(img: &HtmlImageElement, post_index: usize, title: &str) {
    let img = img.clone();
    let title = title.to_string();
    let _ = set_timeout_once(ORIGINAL_CHECK_DELAY_MS, move || {
        if !img.complete() || img.natural_width() == 0 {
            console::log_1(&JsValue::from_str(&format!(
                "文章 \"{}\" 的图片未能正确加载，使用随机图片",
                title
            )));
            apply_source(
                &img,
                &ThumbSource::Random {
                    base: post_index % RANDOM_IMAGES.len(),
                    attempt: 0,
                },
                &title,
            );
        }
    });
}

/// 兜底复查：对仍未成功的缩略图重走随机图
fn schedule_sweep_check(document: Document) -> Result<(), String> {
    set_timeout_once(SWEEP_CHECK_DELAY_MS, move || {
        let cards = match document.query_selector_all(".post-card") {
            Ok(cards) => cards,
            Err(_) => return,
        };

        for i in 0..cards.length() {
            let card = match cards.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                Some(card) => card,
                None => continue,
            };
            let img = match card
                .query_selector(".post-thumbnail img")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            {
                Some(img) => img,
                None => continue,
            };

            let incomplete = !img.complete() || img.natural_height() == 0;
            if !incomplete {
                continue;
            }

            let title = post_title(&card, i as usize);
            let has_thumbnail = img.get_attribute("data-has-thumbnail").as_deref() == Some("true");
            if has_thumbnail || img.class_list().contains("random-image") {
                console::log_1(&JsValue::from_str(&format!(
                    "延迟检查: 重新设置文章 \"{}\" 的缩略图",
                    title
                )));
                apply_source(
                    &img,
                    &ThumbSource::Random {
                        base: i as usize % RANDOM_IMAGES.len(),
                        attempt: 0,
                    },
                    &title,
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_starts_from_original_when_present() {
        let source = ThumbSource::first(Some("/images/cover.png".to_string()), 3);
        assert_eq!(source, ThumbSource::Original("/images/cover.png".to_string()));

        assert_eq!(
            ThumbSource::first(None, 3),
            ThumbSource::Random { base: 3, attempt: 0 }
        );
        assert_eq!(
            ThumbSource::first(Some(String::new()), 3),
            ThumbSource::Random { base: 3, attempt: 0 }
        );
    }

    #[test]
    fn chain_terminates_after_three_failures() {
        let original = ThumbSource::Original("/images/cover.png".to_string());
        let first = original.next(4);
        assert_eq!(first, ThumbSource::Random { base: 4, attempt: 0 });

        let second = first.next(4);
        assert_eq!(second, ThumbSource::Random { base: 4, attempt: 1 });

        let third = second.next(4);
        assert_eq!(third, ThumbSource::Placeholder);

        // 终点状态保持不变
        assert_eq!(third.next(4), ThumbSource::Placeholder);
    }

    #[test]
    fn random_urls_rotate_through_the_pool() {
        let base = ThumbSource::Random { base: 2, attempt: 0 };
        assert_eq!(base.url().as_deref(), Some("/images/3.gif"));

        let retry = ThumbSource::Random { base: 2, attempt: 1 };
        assert_eq!(retry.url().as_deref(), Some("/images/4.gif"));

        // 末尾回绕到图库开头
        let wrapped = ThumbSource::Random { base: 8, attempt: 1 };
        assert_eq!(wrapped.url().as_deref(), Some("/images/1.gif"));
    }

    #[test]
    fn base_index_wraps_by_pool_size() {
        assert_eq!(
            ThumbSource::first(None, 13),
            ThumbSource::Random { base: 4, attempt: 0 }
        );
        assert_eq!(
            ThumbSource::Original("x".to_string()).next(9),
            ThumbSource::Random { base: 0, attempt: 0 }
        );
    }

    #[test]
    fn placeholder_has_no_static_url() {
        assert_eq!(ThumbSource::Placeholder.url(), None);
    }
}
