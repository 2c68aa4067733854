//! Result Formatter
//!
//! Turns the citation records returned by the search service into one
//! Markdown block for the renderers.

use crate::models::LegalResult;

/// Separator placed between two result blocks
pub const RESULT_SEPARATOR: &str = "\n\n---\n\n";

/// Format results as Markdown, in input order.
///
/// Each block is a level-2 heading with the article, a bold locator line,
/// a blank line and the article body. An empty slice gives an empty string.
pub fn format_results(results: &[LegalResult]) -> String {
    results
        .iter()
        .map(format_result)
        .collect::<Vec<_>>()
        .join(RESULT_SEPARATOR)
}

fn format_result(result: &LegalResult) -> String {
    format!(
        "## Article {}: {}\n**{}**\n\n{}\n",
        result.article_number,
        result.article_name,
        locator_line(result),
        result.content
    )
}

/// `Book <roman>: <name> > Chapter <roman>: <name>[ > Section <n>: <name>]`
///
/// The section clause only appears when the section has a name.
pub fn locator_line(result: &LegalResult) -> String {
    let mut line = format!(
        "Book {}: {} > Chapter {}: {}",
        result.book_roman, result.book_name, result.chapter_roman, result.chapter_name
    );
    if !result.section_name.is_empty() {
        line.push_str(&format!(
            " > Section {}: {}",
            result.section_roman_or_arabic, result.section_name
        ));
    }
    line
}
