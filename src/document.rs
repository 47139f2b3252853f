use std::ops::Range;

use anyhow::{Result, bail};
use scribe_search::TextBuffer;

/// Plain-text document edited by the host.
///
/// Line endings are normalized to `\n` on the way in. Every mutation bumps `revision`, which
/// the editor compares against the last saved revision to decide when to persist.
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    revision: u64,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            text: normalize_line_endings(text),
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Characters in the document, not counting line breaks.
    pub fn char_count(&self) -> usize {
        self.text.chars().filter(|&c| c != '\n').count()
    }

    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.text.lines().count()
        }
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check_offset(offset)?;
        if text.is_empty() {
            return Ok(());
        }

        self.text.insert_str(offset, &normalize_line_endings(text));
        self.revision += 1;
        Ok(())
    }

    pub fn append(&mut self, text: &str) {
        let end = self.text.len();
        self.text.push_str(&normalize_line_endings(text));
        if self.text.len() != end {
            self.revision += 1;
        }
    }

    pub fn delete(&mut self, range: Range<usize>) -> Result<()> {
        if range.start > range.end {
            bail!("invalid range {}..{}", range.start, range.end);
        }
        self.check_offset(range.start)?;
        self.check_offset(range.end)?;
        if range.is_empty() {
            return Ok(());
        }

        self.text.replace_range(range, "");
        self.revision += 1;
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.text.is_empty() {
            self.text.clear();
            self.revision += 1;
        }
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.text.len() {
            bail!(
                "offset {} is past the end of the document ({} bytes)",
                offset,
                self.text.len()
            );
        }
        if !self.text.is_char_boundary(offset) {
            bail!("offset {} falls inside a character", offset);
        }
        Ok(())
    }
}

impl TextBuffer for Document {
    fn text(&self) -> &str {
        &self.text
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        self.text.replace_range(range, &normalize_line_endings(replacement));
        self.revision += 1;
    }
}

/// Converts `\r\n` and lone `\r` to `\n`, the way pasted text is inserted.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_count_skips_newlines_and_counts_chars() {
        let document = Document::new("h\u{e9}llo\nw\u{f6}rld\n");
        assert_eq!(document.char_count(), 10);
        assert_eq!(document.line_count(), 2);
        assert_eq!(Document::default().char_count(), 0);
    }

    #[test]
    fn pasted_line_endings_are_normalized() {
        let mut document = Document::new("a\r\nb");
        assert_eq!(document.text(), "a\nb");

        document.insert(1, "x\ry\r\nz").unwrap();
        assert_eq!(document.text(), "ax\ny\nz\nb");

        document.splice(0..1, "p\rq");
        assert_eq!(document.text(), "p\nqx\ny\nz\nb");
    }

    #[test]
    fn insert_rejects_bad_offsets() {
        let mut document = Document::new("caf\u{e9}");

        assert!(document.insert(4, "x").is_err());
        assert!(document.insert(9, "x").is_err());
        assert_eq!(document.revision(), 0);

        document.insert(5, "!").unwrap();
        assert_eq!(document.text(), "caf\u{e9}!");
        assert_eq!(document.revision(), 1);
    }

    #[test]
    fn delete_validates_range() {
        let mut document = Document::new("hello world");

        assert!(document.delete(6..3).is_err());
        assert!(document.delete(6..30).is_err());

        document.delete(5..11).unwrap();
        assert_eq!(document.text(), "hello");
    }

    #[test]
    fn revision_tracks_mutations() {
        let mut document = Document::new("abc");

        document.append("");
        document.delete(1..1).unwrap();
        assert_eq!(document.revision(), 0);

        document.splice(0..1, "z");
        document.append("d");
        document.clear();
        assert_eq!(document.revision(), 3);
        assert!(document.text().is_empty());
    }
}
