use std::path::Path;

use anyhow::Result;
use scribe_search::{SearchConfig, SearchMatch};

use crate::commands::{engine_for, read_document};

pub fn run(query: &str, file: &Path, config: SearchConfig) -> Result<()> {
    let text = read_document(file)?;
    let engine = engine_for(query, config)?;
    let matches = engine.find_all(&text);

    for m in &matches {
        let (line, column) = line_column(&text, m.start);
        println!(
            "{}:{}\t{}..{}\t{}",
            line,
            column,
            m.start,
            m.end,
            line_text(&text, m)
        );
    }

    match matches.len() {
        0 => println!("No matches"),
        1 => println!("1 match"),
        n => println!("{} matches", n),
    }
    Ok(())
}

/// One-based line and column (in chars) of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = text[line_start..offset].chars().count() + 1;
    (line, column)
}

/// The line containing the start of `m`, without its line break.
fn line_text<'a>(text: &'a str, m: &SearchMatch) -> &'a str {
    let line_start = text[..m.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[m.start..]
        .find('\n')
        .map(|i| m.start + i)
        .unwrap_or(text.len());
    &text[line_start..line_end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_column_counts_chars_from_line_start() {
        let text = "first\nsecond caf\u{e9} x";
        assert_eq!(line_column(text, 0), (1, 1));
        assert_eq!(line_column(text, 6), (2, 1));
        assert_eq!(line_column(text, 19), (2, 13));
    }

    #[test]
    fn line_text_returns_the_matching_line() {
        let text = "alpha\nbeta gamma\ndelta";
        let m = SearchMatch::new(11, 16);
        assert_eq!(line_text(text, &m), "beta gamma");
        assert_eq!(line_text(text, &SearchMatch::new(18, 20)), "delta");
    }
}
