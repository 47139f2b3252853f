use std::ops::Range;

/// Half-open byte range of a search hit within the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub start: usize,
    pub end: usize,
}

impl SearchMatch {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether this range can still be sliced out of `text`.
    pub fn is_valid_in(&self, text: &str) -> bool {
        !self.is_empty()
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }

    fn shift(&mut self, delta: isize) {
        self.start = self.start.saturating_add_signed(delta);
        self.end = self.end.saturating_add_signed(delta);
    }
}

/// Ordered, non-overlapping matches plus the index of the current one.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    matches: Vec<SearchMatch>,
    current_index: Option<usize>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_matches(matches: Vec<SearchMatch>) -> Self {
        let current_index = if matches.is_empty() { None } else { Some(0) };
        Self {
            matches,
            current_index,
        }
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.current_index = None;
    }

    pub fn count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current(&self) -> Option<&SearchMatch> {
        self.current_index.and_then(|i| self.matches.get(i))
    }

    /// One-based position of the current match and the total, for "2 of 5" labels.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current_index.map(|i| (i + 1, self.matches.len()))
    }

    pub fn next(&mut self) -> Option<&SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        let next_index = match self.current_index {
            Some(i) => (i + 1) % self.matches.len(),
            None => 0,
        };
        self.current_index = Some(next_index);
        self.matches.get(next_index)
    }

    pub fn previous(&mut self) -> Option<&SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        let prev_index = match self.current_index {
            Some(0) | None => self.matches.len() - 1,
            Some(i) => i - 1,
        };
        self.current_index = Some(prev_index);
        self.matches.get(prev_index)
    }

    /// Drops the current match after its text was replaced.
    ///
    /// Every later match moves by `length_diff` (replacement length minus the replaced
    /// length). Earlier matches keep their offsets. The current index stays put, so it
    /// now points at the match that followed the replaced one, clamped to the last match.
    pub fn remove_current(&mut self, length_diff: isize) -> Option<SearchMatch> {
        let index = self.current_index?;
        let removed = self.matches.remove(index);

        for m in &mut self.matches[index..] {
            m.shift(length_diff);
        }

        self.current_index = if self.matches.is_empty() {
            None
        } else {
            Some(index.min(self.matches.len() - 1))
        };

        Some(removed)
    }
}
