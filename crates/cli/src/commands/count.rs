use std::path::Path;

use anyhow::Result;

use crate::commands::read_document;

pub fn run(file: &Path) -> Result<()> {
    let text = read_document(file)?;
    println!("{} characters", char_count(&text));
    Ok(())
}

fn char_count(text: &str) -> usize {
    text.chars().filter(|&c| c != '\n' && c != '\r').count()
}

#[cfg(test)]
mod tests {
    use super::char_count;

    #[test]
    fn line_breaks_are_not_counted() {
        assert_eq!(char_count("ab\ncd\r\n"), 4);
        assert_eq!(char_count("\u{1F600}!"), 2);
        assert_eq!(char_count(""), 0);
    }
}
