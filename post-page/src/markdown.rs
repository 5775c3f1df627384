use regex::Regex;
use std::sync::OnceLock;

/// 预览区空内容时的占位段落
pub const PREVIEW_PLACEHOLDER: &str =
    "<p class=\"preview-placeholder\">预览将显示在这里...</p>";

/// 渲染编辑预览，空结果返回占位段落
pub fn preview_html(markdown: &str) -> String {
    let html = render_markdown(markdown);
    if html.is_empty() {
        PREVIEW_PLACEHOLDER.to_string()
    } else {
        html
    }
}

/// 逐条规则替换的简易 Markdown 渲染
///
/// 只服务编辑模式的即时预览，页面正式内容由构建管线渲染。
/// 按固定顺序整体替换：标题由深到浅，粗体先于斜体，行内代码
/// 先于代码块，链接先于图片，最后把空行转成段落边界、换行转成
/// <br />。非块级开头的结果包裹成段落。
pub fn render_markdown(markdown: &str) -> String {
    static RE_H3: OnceLock<Regex> = OnceLock::new();
    static RE_H2: OnceLock<Regex> = OnceLock::new();
    static RE_H1: OnceLock<Regex> = OnceLock::new();
    static RE_BOLD: OnceLock<Regex> = OnceLock::new();
    static RE_ITALIC: OnceLock<Regex> = OnceLock::new();
    static RE_INLINE_CODE: OnceLock<Regex> = OnceLock::new();
    static RE_CODE_BLOCK: OnceLock<Regex> = OnceLock::new();
    static RE_LINK: OnceLock<Regex> = OnceLock::new();
    static RE_IMAGE: OnceLock<Regex> = OnceLock::new();
    static RE_QUOTE: OnceLock<Regex> = OnceLock::new();

    let re_h3 = RE_H3.get_or_init(|| Regex::new(r"(?m)^### (.*)$").unwrap());
    let re_h2 = RE_H2.get_or_init(|| Regex::new(r"(?m)^## (.*)$").unwrap());
    let re_h1 = RE_H1.get_or_init(|| Regex::new(r"(?m)^# (.*)$").unwrap());
    let re_bold = RE_BOLD.get_or_init(|| Regex::new(r"\*\*(.*)\*\*").unwrap());
    let re_italic = RE_ITALIC.get_or_init(|| Regex::new(r"\*(.*)\*").unwrap());
    let re_inline_code = RE_INLINE_CODE.get_or_init(|| Regex::new(r"`(.*?)`").unwrap());
    let re_code_block = RE_CODE_BLOCK.get_or_init(|| Regex::new(r"```([\s\S]*?)```").unwrap());
    let re_link = RE_LINK.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
    let re_image = RE_IMAGE.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
    let re_quote = RE_QUOTE.get_or_init(|| Regex::new(r"(?m)^> (.*)$").unwrap());

    let mut html = markdown.to_string();
    html = re_h3.replace_all(&html, "<h3>$1</h3>").into_owned();
    html = re_h2.replace_all(&html, "<h2>$1</h2>").into_owned();
    html = re_h1.replace_all(&html, "<h1>$1</h1>").into_owned();
    html = re_bold.replace_all(&html, "<strong>$1</strong>").into_owned();
    html = re_italic.replace_all(&html, "<em>$1</em>").into_owned();
    html = re_inline_code.replace_all(&html, "<code>$1</code>").into_owned();
    html = re_code_block
        .replace_all(&html, "<pre><code>$1</code></pre>")
        .into_owned();
    html = re_link.replace_all(&html, "<a href=\"$2\">$1</a>").into_owned();
    html = re_image
        .replace_all(&html, "<img src=\"$2\" alt=\"$1\" />")
        .into_owned();
    html = re_quote
        .replace_all(&html, "<blockquote>$1</blockquote>")
        .into_owned();
    html = html.replace("\n\n", "</p><p>");
    html = html.replace('\n', "<br />");

    if !html.is_empty() && !html.starts_with('<') {
        html = format!("<p>{}</p>", html);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_by_depth() {
        assert_eq!(render_markdown("# 大标题"), "<h1>大标题</h1>");
        assert_eq!(render_markdown("## 章节"), "<h2>章节</h2>");
        assert_eq!(render_markdown("### 小节"), "<h3>小节</h3>");
    }

    #[test]
    fn renders_bold_before_italic() {
        assert_eq!(
            render_markdown("**重点** 和 *强调*"),
            "<strong>重点</strong> 和 <em>强调</em>"
        );
        assert_eq!(
            render_markdown("说明 *强调* 文本"),
            "<p>说明 <em>强调</em> 文本</p>"
        );
    }

    #[test]
    fn renders_inline_code_lazily() {
        assert_eq!(
            render_markdown("调用 `foo()` 和 `bar()`"),
            "<p>调用 <code>foo()</code> 和 <code>bar()</code></p>"
        );
    }

    #[test]
    fn renders_links_and_blank_alt_images() {
        assert_eq!(
            render_markdown("[首页](/index.html)"),
            "<a href=\"/index.html\">首页</a>"
        );
        assert_eq!(
            render_markdown("![](/images/1.gif)"),
            "<img src=\"/images/1.gif\" alt=\"\" />"
        );
    }

    #[test]
    fn link_rule_claims_images_with_alt_text() {
        // 链接规则先执行，带替代文本的图片只剩感叹号加链接
        assert_eq!(
            render_markdown("![示意图](/images/2.gif)"),
            "<p>!<a href=\"/images/2.gif\">示意图</a></p>"
        );
    }

    #[test]
    fn renders_blockquote_lines() {
        assert_eq!(render_markdown("> 引用一行"), "<blockquote>引用一行</blockquote>");
    }

    #[test]
    fn blank_lines_split_paragraphs() {
        assert_eq!(
            render_markdown("第一段\n\n第二段"),
            "<p>第一段</p><p>第二段</p>"
        );
        assert_eq!(render_markdown("第一行\n第二行"), "<p>第一行<br />第二行</p>");
    }

    #[test]
    fn block_level_output_is_not_wrapped() {
        assert_eq!(
            render_markdown("# 标题\n\n正文内容"),
            "<h1>标题</h1></p><p>正文内容"
        );
    }

    #[test]
    fn empty_input_falls_back_to_placeholder() {
        assert_eq!(render_markdown(""), "");
        assert_eq!(preview_html(""), PREVIEW_PLACEHOLDER);
        assert_eq!(preview_html("正文"), "<p>正文</p>");
    }
}
