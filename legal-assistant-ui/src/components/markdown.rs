//! Markdown Component
//!
//! Renders assistant replies. Element styling lives in `index.html` under
//! the `.markdown` class, with `.dark .markdown` overrides.

use leptos::*;
use pulldown_cmark::{html, Event, Options, Parser};

/// Markdown rendered to HTML
#[component]
pub fn Markdown(#[prop(into)] content: String) -> impl IntoView {
    let html = render_html(&content);

    view! {
        <div class="markdown" inner_html=html />
    }
}

/// Convert Markdown to HTML.
///
/// Raw HTML in the source is escaped rather than passed through, since the
/// text comes from the network.
pub fn render_html(md: &str) -> String {
    let parser = Parser::new_ext(md, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(md.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
