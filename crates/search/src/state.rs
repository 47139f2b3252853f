use log::{debug, warn};

use crate::buffer::SearchHost;
use crate::engine::{SearchConfig, SearchEngine, SearchMode};
use crate::matcher::{SearchMatch, SearchResults};
use crate::status::{ReplaceOutcome, SearchStatus};

/// A find/replace session bound to one document.
///
/// The session owns the host (buffer plus highlight and status callbacks) for its lifetime.
/// Matches are byte offsets into the host's text as of the last `find`. Any edit that does not
/// go through `replace_one` or `replace_all` must be followed by [`SearchSession::invalidate`];
/// [`SearchSession::edit`] does that automatically.
pub struct SearchSession<H: SearchHost> {
    host: H,
    engine: SearchEngine,
    results: SearchResults,
    query: String,
    error: Option<String>,
}

impl<H: SearchHost> SearchSession<H> {
    pub fn new(host: H, config: SearchConfig) -> Self {
        Self {
            host,
            engine: SearchEngine::new(config),
            results: SearchResults::new(),
            query: String::new(),
            error: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host for non-buffer state.
    ///
    /// Buffer edits made through this reference desynchronize the matches; use
    /// [`SearchSession::edit`] for those.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Last query passed to `find` or `replace_all`.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    /// Pattern compilation error from the last search, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn config(&self) -> SearchConfig {
        self.engine.config()
    }

    /// Switches matching options. Existing matches were computed under the old options and
    /// are dropped.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.error = self.engine.set_config(config).err();
        self.invalidate();
    }

    pub fn toggle_case_sensitive(&mut self) {
        let mut config = self.config();
        config.case_sensitive = !config.case_sensitive;
        self.set_config(config);
    }

    pub fn toggle_regex_mode(&mut self) {
        let mut config = self.config();
        config.mode = match config.mode {
            SearchMode::Literal => SearchMode::Regex,
            SearchMode::Regex => SearchMode::Literal,
        };
        self.set_config(config);
    }

    /// Discards match data after the buffer changed outside the session.
    pub fn invalidate(&mut self) {
        if !self.results.is_empty() {
            debug!("invalidating {} stale matches", self.results.count());
        }
        self.results.clear();
    }

    /// Runs an external edit against the host and invalidates afterwards.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut H) -> R) -> R {
        let result = f(&mut self.host);
        self.invalidate();
        result
    }

    /// Recomputes every match of `query` from the current buffer contents.
    pub fn find(&mut self, query: &str) -> SearchStatus {
        if query.is_empty() {
            return self.report(SearchStatus::EmptyQuery);
        }

        self.query = query.to_string();
        if let Err(error) = self.engine.set_pattern(query) {
            self.error = Some(error.clone());
            self.results.clear();
            return self.report(SearchStatus::InvalidPattern(error));
        }
        self.error = None;

        self.results = SearchResults::from_matches(self.engine.find_all(self.host.text()));
        debug!("find {:?}: {} matches", query, self.results.count());

        if let Some(first) = self.results.current().copied() {
            self.host.highlight(&first);
            self.report(SearchStatus::Found(self.results.count()))
        } else {
            self.report(SearchStatus::NotFound)
        }
    }

    /// Advances to the next match, wrapping after the last.
    ///
    /// With no matches (never searched, or invalidated by an edit) this re-runs `find` with the
    /// remembered query and lands on the first hit.
    pub fn find_next(&mut self) -> Result<SearchMatch, SearchStatus> {
        if self.results.is_empty() {
            return self.refind();
        }

        self.results.next();
        self.land_on_current()
    }

    /// Steps back to the previous match, wrapping before the first.
    pub fn find_previous(&mut self) -> Result<SearchMatch, SearchStatus> {
        if self.results.is_empty() {
            return self.refind();
        }

        self.results.previous();
        self.land_on_current()
    }

    /// Replaces the current match with `replacement` and repairs the offsets of later matches.
    ///
    /// Without a current match nothing is replaced: the session searches again so the next
    /// call has a target, and reports `NoCurrentMatch`.
    pub fn replace_one(&mut self, replacement: &str) -> ReplaceOutcome {
        let Some(current) = self.results.current().copied() else {
            return self.search_without_replacing();
        };

        if !self.still_matches(&current) {
            warn!(
                "match {}..{} no longer matches {:?}; searching again",
                current.start, current.end, self.query
            );
            self.invalidate();
            return self.search_without_replacing();
        }

        // Measured on the buffer, since a host may rewrite the replacement as it splices.
        let before = self.host.text().len();
        self.host.splice(current.range(), replacement);
        let length_diff = self.host.text().len() as isize - before as isize;
        self.results.remove_current(length_diff);

        let remaining = self.results.count();
        let next = self.results.current().copied();
        if let Some(m) = &next {
            self.host.highlight(m);
        }

        ReplaceOutcome {
            status: self.report(SearchStatus::Replaced { remaining }),
            remaining,
            current: next,
        }
    }

    /// Replaces every occurrence of `query` in one pass and returns how many were replaced.
    ///
    /// Independent of the stepped match list, which is cleared afterwards.
    pub fn replace_all(&mut self, query: &str, replacement: &str) -> usize {
        if query.is_empty() {
            self.report(SearchStatus::EmptyQuery);
            return 0;
        }

        self.query = query.to_string();
        if let Err(error) = self.engine.set_pattern(query) {
            self.error = Some(error.clone());
            self.results.clear();
            self.report(SearchStatus::InvalidPattern(error));
            return 0;
        }
        self.error = None;

        let matches = self.engine.find_all(self.host.text());
        // Back to front so earlier offsets stay valid while splicing.
        for m in matches.iter().rev() {
            self.host.splice(m.range(), replacement);
        }
        self.results.clear();

        let count = matches.len();
        debug!("replace all {:?}: {} replacements", query, count);
        if count == 0 {
            self.report(SearchStatus::NotFound);
        } else {
            self.report(SearchStatus::ReplacedAll(count));
        }
        count
    }

    fn refind(&mut self) -> Result<SearchMatch, SearchStatus> {
        let query = self.query.clone();
        match self.find(&query) {
            SearchStatus::Found(_) => self.results.current().copied().ok_or(SearchStatus::NotFound),
            status => Err(status),
        }
    }

    fn land_on_current(&mut self) -> Result<SearchMatch, SearchStatus> {
        let (Some(current), Some((position, total))) =
            (self.results.current().copied(), self.results.position())
        else {
            return Err(self.report(SearchStatus::NotFound));
        };

        self.host.highlight(&current);
        self.report(SearchStatus::Current { position, total });
        Ok(current)
    }

    fn still_matches(&self, m: &SearchMatch) -> bool {
        self.engine.matches_at(self.host.text(), m)
    }

    fn search_without_replacing(&mut self) -> ReplaceOutcome {
        if !self.query.is_empty() {
            let query = self.query.clone();
            self.find(&query);
        }

        ReplaceOutcome {
            status: self.report(SearchStatus::NoCurrentMatch),
            remaining: self.results.count(),
            current: self.results.current().copied(),
        }
    }

    fn report(&mut self, status: SearchStatus) -> SearchStatus {
        self.host.report_status(&status);
        status
    }
}
