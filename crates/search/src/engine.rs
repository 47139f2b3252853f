use log::debug;
use regex::{Regex, RegexBuilder};

use crate::matcher::SearchMatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// The query is a plain substring; metacharacters carry no meaning.
    #[default]
    Literal,
    Regex,
}

impl SearchMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "literal" | "plain" | "text" => Some(Self::Literal),
            "regex" | "regexp" | "pattern" => Some(Self::Regex),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Regex => "regex",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub case_sensitive: bool,
    pub mode: SearchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            mode: SearchMode::Literal,
        }
    }
}

/// Compiles a query and scans text for non-overlapping, left-to-right hits.
pub struct SearchEngine {
    config: SearchConfig,
    compiled_regex: Option<Regex>,
    pattern: String,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            compiled_regex: None,
            pattern: String::new(),
        }
    }

    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), String> {
        if pattern == self.pattern && (pattern.is_empty() || self.compiled_regex.is_some()) {
            return Ok(());
        }

        self.pattern = pattern.to_string();
        self.compile()
    }

    fn compile(&mut self) -> Result<(), String> {
        if self.pattern.is_empty() {
            self.compiled_regex = None;
            return Ok(());
        }

        let regex_pattern = match self.config.mode {
            SearchMode::Literal => regex::escape(&self.pattern),
            SearchMode::Regex => self.pattern.clone(),
        };

        match RegexBuilder::new(&regex_pattern)
            .case_insensitive(!self.config.case_sensitive)
            .build()
        {
            Ok(regex) => {
                debug!(
                    "compiled {} pattern {:?} (case_sensitive={})",
                    self.config.mode.as_str(),
                    self.pattern,
                    self.config.case_sensitive
                );
                self.compiled_regex = Some(regex);
                Ok(())
            }
            Err(e) => {
                self.compiled_regex = None;
                Err(e.to_string())
            }
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) -> Result<(), String> {
        if self.config == config {
            return Ok(());
        }

        self.config = config;
        self.compile()
    }

    /// Every non-empty hit in `text`. After a hit at `i` scanning resumes at its end.
    pub fn find_all(&self, text: &str) -> Vec<SearchMatch> {
        let Some(regex) = &self.compiled_regex else {
            return Vec::new();
        };

        regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| SearchMatch::new(m.start(), m.end()))
            .collect()
    }

    /// Whether scanning `text` from `m.start` yields exactly `m`.
    ///
    /// Runs against the whole text so assertions such as `\b` still see the surrounding
    /// characters.
    pub fn matches_at(&self, text: &str, m: &SearchMatch) -> bool {
        let Some(regex) = &self.compiled_regex else {
            return false;
        };

        !m.is_empty()
            && m.is_valid_in(text)
            && regex
                .find_at(text, m.start)
                .is_some_and(|hit| hit.start() == m.start && hit.end() == m.end)
    }

    /// Rewrites every hit in `text` with `replacement`, inserted verbatim.
    pub fn replace_all(&self, text: &str, replacement: &str) -> (String, usize) {
        let matches = self.find_all(text);
        if matches.is_empty() {
            return (text.to_string(), 0);
        }

        let mut output = String::with_capacity(text.len());
        let mut last_end = 0;
        for m in &matches {
            output.push_str(&text[last_end..m.start]);
            output.push_str(replacement);
            last_end = m.end;
        }
        output.push_str(&text[last_end..]);

        (output, matches.len())
    }
}
