//! Markdown to HTML rendering via `pulldown-cmark`.
//!
//! GitHub-flavoured extensions are enabled (tables, strikethrough, task
//! lists, footnotes). Heading attributes stay off, so headings never get
//! generated `id`s and existing links into articles keep working.

use pulldown_cmark::{Options, Parser, html};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render a Markdown body to an HTML fragment.
pub fn render(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
