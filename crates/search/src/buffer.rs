use std::ops::Range;

use crate::matcher::SearchMatch;
use crate::status::SearchStatus;

/// Read and splice access to the document being searched.
///
/// Offsets are UTF-8 byte offsets and always fall on `char` boundaries.
pub trait TextBuffer {
    fn text(&self) -> &str;

    /// Replaces `range` with `replacement`.
    fn splice(&mut self, range: Range<usize>, replacement: &str);

    fn len(&self) -> usize {
        self.text().len()
    }

    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

/// Everything a search session needs from its embedding UI.
///
/// `highlight` and `report_status` default to no-ops, so any `TextBuffer` can opt in with an
/// empty impl.
pub trait SearchHost: TextBuffer {
    /// Move the visible selection to `m`.
    fn highlight(&mut self, _m: &SearchMatch) {}

    /// Show `status` to the user.
    fn report_status(&mut self, _status: &SearchStatus) {}
}

impl TextBuffer for String {
    fn text(&self) -> &str {
        self
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        self.replace_range(range, replacement);
    }
}

impl SearchHost for String {}

impl<T: TextBuffer + ?Sized> TextBuffer for &mut T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        (**self).splice(range, replacement);
    }
}

impl<T: SearchHost + ?Sized> SearchHost for &mut T {
    fn highlight(&mut self, m: &SearchMatch) {
        (**self).highlight(m);
    }

    fn report_status(&mut self, status: &SearchStatus) {
        (**self).report_status(status);
    }
}
