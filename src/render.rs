//! Terminal Markdown Rendering
//!
//! Renders assistant replies for the interactive chat. Supports the subset
//! of Markdown replies use: headings, paragraphs, lists, emphasis, block
//! quotes, inline and block code, and horizontal rules.

use crossterm::style::{Attribute, Color, ContentStyle, Stylize};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::models::{Message, Role};
use crate::theme::Theme;

/// Colors used for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub heading: Color,
    pub code: Color,
    pub quote: Color,
    pub rule: Color,
    pub label: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                heading: Color::DarkBlue,
                code: Color::DarkMagenta,
                quote: Color::DarkGrey,
                rule: Color::Grey,
                label: Color::DarkBlue,
            },
            Theme::Dark => Self {
                heading: Color::Cyan,
                code: Color::Yellow,
                quote: Color::Grey,
                rule: Color::DarkGrey,
                label: Color::Blue,
            },
        }
    }
}

/// Render a message with its "You" / "Legal Assistant" header.
///
/// User text is printed as typed; assistant text is rendered as Markdown.
pub fn render_message(message: &Message, width: usize, theme: Theme) -> String {
    let palette = Palette::for_theme(theme);
    let label = message.role.label().with(palette.label).bold();
    let body = match message.role {
        Role::User => format!("{}\n", message.content),
        Role::Assistant => render_markdown(&message.content, width, theme),
    };
    format!("{}\n{}", label, body)
}

/// Render Markdown to ANSI-styled text wrapped at `width` columns
pub fn render_markdown(md: &str, width: usize, theme: Theme) -> String {
    let width = if width == 0 { 80 } else { width };
    let palette = Palette::for_theme(theme);

    let mut out = String::new();
    let mut line = String::new();
    let mut col = 0usize;
    let mut styles: Vec<ContentStyle> = vec![ContentStyle::new()];
    let mut list_depth = 0usize;
    let mut quote_depth = 0usize;
    let mut in_code_block = false;

    let flush = |out: &mut String, line: &mut String, col: &mut usize| {
        out.push_str(line.trim_end());
        out.push('\n');
        line.clear();
        *col = 0;
    };

    // Every line inside a block quote carries the bar, including wrapped ones.
    let start_line = |line: &mut String, col: &mut usize, quote_depth: usize| {
        if line.is_empty() && quote_depth > 0 {
            line.push_str(&"│ ".repeat(quote_depth));
            *col = 2 * quote_depth;
        }
    };

    for event in Parser::new(md) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let mut style = ContentStyle::new().with(palette.heading);
                style.attributes.set(Attribute::Bold);
                if level == HeadingLevel::H1 {
                    style.attributes.set(Attribute::Underlined);
                }
                styles.push(style);
            }
            Event::End(TagEnd::Heading(_)) => {
                styles.pop();
                flush(&mut out, &mut line, &mut col);
            }
            Event::Start(Tag::Strong) => {
                let mut style = current(&styles);
                style.attributes.set(Attribute::Bold);
                styles.push(style);
            }
            Event::Start(Tag::Emphasis) => {
                let mut style = current(&styles);
                style.attributes.set(Attribute::Italic);
                styles.push(style);
            }
            Event::End(TagEnd::Strong) | Event::End(TagEnd::Emphasis) => {
                styles.pop();
            }
            Event::Start(Tag::BlockQuote(_)) => {
                let mut style = current(&styles);
                style.foreground_color = Some(palette.quote);
                style.attributes.set(Attribute::Italic);
                styles.push(style);
                quote_depth += 1;
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                styles.pop();
                quote_depth = quote_depth.saturating_sub(1);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                styles.push(ContentStyle::new().with(palette.code));
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                styles.pop();
                out.push('\n');
            }
            Event::Start(Tag::List(_)) => {
                if list_depth > 0 && !line.is_empty() {
                    flush(&mut out, &mut line, &mut col);
                }
                list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                start_line(&mut line, &mut col, quote_depth);
                let bullet = format!("{}• ", "  ".repeat(list_depth.saturating_sub(1)));
                col += bullet.chars().count();
                line.push_str(&bullet);
            }
            Event::End(TagEnd::Item) => {
                if !line.is_empty() {
                    flush(&mut out, &mut line, &mut col);
                }
            }
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => {
                flush(&mut out, &mut line, &mut col);
                if list_depth == 0 {
                    out.push('\n');
                }
            }
            Event::Text(text) if in_code_block => {
                let style = current(&styles);
                for code_line in text.lines() {
                    out.push_str(&format!("    {}\n", style.apply(code_line)));
                }
            }
            Event::Text(text) => {
                let style = current(&styles);
                for word in text.split_inclusive(' ') {
                    let len = word.chars().count();
                    if col + len > width && col > 2 * quote_depth {
                        flush(&mut out, &mut line, &mut col);
                    }
                    start_line(&mut line, &mut col, quote_depth);
                    line.push_str(&style.apply(word).to_string());
                    col += len;
                }
            }
            Event::Code(code) => {
                start_line(&mut line, &mut col, quote_depth);
                let style = ContentStyle::new().with(palette.code);
                line.push_str(&style.apply(&*code).to_string());
                col += code.chars().count();
            }
            Event::SoftBreak => {
                line.push(' ');
                col += 1;
            }
            Event::HardBreak => {
                flush(&mut out, &mut line, &mut col);
            }
            Event::Rule => {
                if !line.is_empty() {
                    flush(&mut out, &mut line, &mut col);
                }
                out.push_str(&"─".repeat(width).with(palette.rule).to_string());
                out.push_str("\n\n");
            }
            _ => {}
        }
    }

    if !line.is_empty() {
        flush(&mut out, &mut line, &mut col);
    }

    out
}

fn current(styles: &[ContentStyle]) -> ContentStyle {
    styles.last().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_results;
    use crate::models::LegalResult;

    /// Drop ANSI escape sequences so assertions can look at plain text
    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn article(number: &str, name: &str) -> LegalResult {
        LegalResult {
            book_roman: "I".to_string(),
            book_name: "General".to_string(),
            chapter_roman: "1".to_string(),
            chapter_name: "Definitions".to_string(),
            article_number: number.to_string(),
            article_name: name.to_string(),
            content: "This law applies to...".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_renders_formatted_results() {
        let md = format_results(&[article("1", "Scope"), article("2", "Terms")]);
        let text = strip_ansi(&render_markdown(&md, 60, Theme::Light));

        assert!(text.contains("Article 1: Scope"));
        assert!(text.contains("Book I: General > Chapter 1: Definitions"));
        assert!(text.contains("This law applies to..."));
        assert!(!text.contains("**"));
        assert!(!text.contains("## "));
        assert_eq!(text.matches(&"─".repeat(60)).count(), 1);
        assert!(text.find("Scope").unwrap() < text.find("Terms").unwrap());
    }

    #[test]
    fn test_wraps_long_paragraphs() {
        let md = "word ".repeat(40);
        let text = strip_ansi(&render_markdown(&md, 20, Theme::Dark));

        assert!(text.lines().all(|line| line.chars().count() <= 20));
        assert_eq!(text.matches("word").count(), 40);
    }

    #[test]
    fn test_lists_quotes_and_code() {
        let md = "- first\n- second\n\n> quoted\n\nuse `inline` here\n\n```\nblock code\n```\n";
        let text = strip_ansi(&render_markdown(md, 80, Theme::Light));

        assert!(text.contains("• first"));
        assert!(text.contains("• second"));
        assert!(text.contains("│ quoted"));
        assert!(text.contains("use inline here"));
        assert!(text.contains("    block code"));
    }

    #[test]
    fn test_quote_bar_on_every_line() {
        let md = format!("> {}\n>\n> second paragraph", "quoted ".repeat(12));
        let text = strip_ansi(&render_markdown(&md, 20, Theme::Light));

        let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        assert!(lines.len() > 3);
        assert!(lines.iter().all(|line| line.starts_with("│ ")));
        assert!(lines.iter().all(|line| line.chars().count() <= 20));
        assert_eq!(text.matches("quoted").count(), 12);
        assert!(lines.last().unwrap().contains("paragraph"));
    }

    #[test]
    fn test_empty_reply_renders_nothing() {
        assert_eq!(render_markdown("", 80, Theme::Light), "");
    }

    #[test]
    fn test_render_message_labels() {
        let text = strip_ansi(&render_message(&Message::user("What is theft?"), 80, Theme::Light));
        assert_eq!(text, "You\nWhat is theft?\n");

        let text = strip_ansi(&render_message(&Message::assistant("hello"), 80, Theme::Dark));
        assert!(text.starts_with("Legal Assistant\nhello"));
    }
}
