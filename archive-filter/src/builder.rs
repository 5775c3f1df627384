use std::collections::HashMap;

use crate::models::{FacetIndex, FacetKind, MenuItem, PostRecord};

/// 解析逗号分隔的维度字段
///
/// 切分后去除每项首尾空白并丢弃空项，再排序去重，
/// 使每篇文章对同一维度值至多贡献一次计数。
pub fn parse_facet_tokens(raw: &str) -> Vec<String> {
    let mut tokens: Vec<String> = raw.split(',').map(|token| token.trim().to_string()).collect();
    tokens.retain(|token| !token.is_empty());
    tokens.sort();
    tokens.dedup();
    tokens
}

/// 构建维度索引：统计每个分类与标签覆盖的文章数
///
/// 纯函数，缺失或为空的字段不产生任何计数。
pub fn build_facet_index(posts: &[PostRecord]) -> FacetIndex {
    let mut categories: HashMap<String, usize> = HashMap::new();
    let mut tags: HashMap<String, usize> = HashMap::new();

    for post in posts {
        for category in &post.categories {
            *categories.entry(category.clone()).or_insert(0) += 1;
        }
        for tag in &post.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    FacetIndex { categories, tags }
}

/// 指定维度的菜单项列表，按维度值字典序升序
pub fn menu_items(index: &FacetIndex, kind: FacetKind) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = index
        .counts(kind)
        .iter()
        .map(|(label, count)| MenuItem {
            label: label.clone(),
            count: *count,
        })
        .collect();
    items.sort_by(|a, b| a.label.cmp(&b.label));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, categories: &str, tags: &str) -> PostRecord {
        PostRecord {
            title: title.to_string(),
            categories: parse_facet_tokens(categories),
            tags: parse_facet_tokens(tags),
        }
    }

    #[test]
    fn tokens_are_trimmed_and_empties_dropped() {
        assert_eq!(parse_facet_tokens(" go , rust "), vec!["go", "rust"]);
        assert_eq!(parse_facet_tokens("go,,rust,"), vec!["go", "rust"]);
        assert_eq!(parse_facet_tokens("  ,  ,"), Vec::<String>::new());
        assert_eq!(parse_facet_tokens(""), Vec::<String>::new());
    }

    #[test]
    fn duplicate_tokens_collapse_per_post() {
        assert_eq!(parse_facet_tokens("go,go, go "), vec!["go"]);

        // 重复出现的值对同一篇文章只计一次
        let posts = vec![post("a", "go,go", "")];
        let index = build_facet_index(&posts);
        assert_eq!(index.categories.get("go"), Some(&1));
    }

    #[test]
    fn index_counts_posts_per_value() {
        let posts = vec![
            post("a", "go,rust", "infra"),
            post("b", "go", ""),
            post("c", "", "infra, web"),
        ];
        let index = build_facet_index(&posts);

        assert_eq!(index.categories.get("go"), Some(&2));
        assert_eq!(index.categories.get("rust"), Some(&1));
        assert_eq!(index.tags.get("infra"), Some(&2));
        assert_eq!(index.tags.get("web"), Some(&1));
        assert_eq!(index.categories.len(), 2);
        assert_eq!(index.tags.len(), 2);
    }

    #[test]
    fn counts_sum_equals_facet_set_sizes() {
        let posts = vec![
            post("a", "go,rust,go", "infra"),
            post("b", "go", "infra,web"),
            post("c", " , ", ""),
        ];
        let index = build_facet_index(&posts);

        let category_sum: usize = index.categories.values().sum();
        let expected: usize = posts.iter().map(|p| p.categories.len()).sum();
        assert_eq!(category_sum, expected);

        let tag_sum: usize = index.tags.values().sum();
        let expected: usize = posts.iter().map(|p| p.tags.len()).sum();
        assert_eq!(tag_sum, expected);
    }

    #[test]
    fn menu_is_sorted_lexicographically() {
        let posts = vec![
            post("a", "web,api,go", ""),
            post("b", "go", ""),
        ];
        let index = build_facet_index(&posts);
        let items = menu_items(&index, FacetKind::Category);

        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["api", "go", "web"]);
        assert_eq!(items[1].count, 2);
    }

    #[test]
    fn menu_items_are_idempotent() {
        let posts = vec![post("a", "go", "infra")];
        let index = build_facet_index(&posts);
        assert_eq!(
            menu_items(&index, FacetKind::Tag),
            menu_items(&index, FacetKind::Tag)
        );
    }

    #[test]
    fn empty_post_list_yields_empty_menus() {
        let index = build_facet_index(&[]);
        assert!(menu_items(&index, FacetKind::Category).is_empty());
        assert!(menu_items(&index, FacetKind::Tag).is_empty());
    }
}
