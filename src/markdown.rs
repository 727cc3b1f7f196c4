//! Markdown rendering utilities.
//!
//! Entry bodies are markdown with embedded HTML. The builder renders them with
//! `pulldown-cmark`; bare text inside already-tagged cells is rendered on its
//! own through [`render_inline`] so its markup is not left as literal text.

use pulldown_cmark::{html, Options, Parser};

/// Render a markdown document to HTML.
///
/// Only CommonMark is enabled; raw HTML blocks and inline HTML pass through
/// untouched.
///
/// # Examples
///
/// ```
/// use rs_spellbook::markdown::render;
///
/// assert_eq!(render("**Range** 30 feet"), "<p><strong>Range</strong> 30 feet</p>\n");
/// ```
#[must_use]
pub fn render(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::with_capacity(markdown.len() + markdown.len() / 4);
    html::push_html(&mut out, parser);
    out
}

/// Render a text fragment as inline markdown.
///
/// Paragraph wrappers are removed so the result can be substituted back into
/// its parent element. Leading and trailing whitespace of the fragment is kept
/// as a single space, since the renderer would otherwise glue the fragment to
/// its neighbours.
///
/// # Examples
///
/// ```
/// use rs_spellbook::markdown::render_inline;
///
/// assert_eq!(render_inline(" *1d6* damage"), " <em>1d6</em> damage");
/// ```
#[must_use]
pub fn render_inline(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let rendered = render(text);
    let mut inner = String::with_capacity(rendered.len());
    for (i, paragraph) in rendered
        .split("</p>")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        if i > 0 {
            inner.push(' ');
        }
        inner.push_str(paragraph.strip_prefix("<p>").unwrap_or(paragraph));
    }

    let mut out = String::with_capacity(inner.len() + 2);
    if text.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&inner);
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out
}
