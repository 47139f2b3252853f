use std::{io::Write, ops::Range};

use anyhow::Result;
use log::{debug, info, warn};
use scribe_search::{SearchHost, SearchMatch, SearchSession, SearchStatus, TextBuffer};

use crate::{
    commands::{Command, help_text},
    config::AppConfig,
    document::Document,
    persistence::PersistenceStore,
};

/// Adapts a [`Document`] and an output stream to the search host contract.
pub struct ConsoleHost<W: Write> {
    document: Document,
    out: W,
    preview_width: usize,
}

impl<W: Write> ConsoleHost<W> {
    pub fn new(document: Document, out: W, preview_width: usize) -> Self {
        Self {
            document,
            out,
            preview_width,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn print(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{message}") {
            warn!("failed to write output: {}", e);
        }
    }
}

impl<W: Write> TextBuffer for ConsoleHost<W> {
    fn text(&self) -> &str {
        self.document.text()
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        self.document.splice(range, replacement);
    }
}

impl<W: Write> SearchHost for ConsoleHost<W> {
    fn highlight(&mut self, m: &SearchMatch) {
        let line = format!(
            "[{}..{}] {}",
            m.start,
            m.end,
            preview(self.document.text(), m, self.preview_width)
        );
        self.print(&line);
    }

    fn report_status(&mut self, status: &SearchStatus) {
        self.print(&status.to_string());
    }
}

/// Text around `m` with the hit wrapped in guillemets, on a single line.
pub fn preview(text: &str, m: &SearchMatch, width: usize) -> String {
    let before: String = {
        let mut chars: Vec<char> = text[..m.start].chars().rev().take(width).collect();
        chars.reverse();
        chars.into_iter().collect()
    };
    let after: String = text[m.end..].chars().take(width).collect();

    format!("{}\u{ab}{}\u{bb}{}", before, &text[m.range()], after)
        .replace('\n', "\u{23ce}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive editing session: one document, one search session, one store.
pub struct Editor<W: Write> {
    session: SearchSession<ConsoleHost<W>>,
    store: Box<dyn PersistenceStore>,
    autosave: bool,
    saved_revision: u64,
}

impl<W: Write> Editor<W> {
    pub fn new(
        document: Document,
        store: Box<dyn PersistenceStore>,
        config: &AppConfig,
        out: W,
    ) -> Self {
        let saved_revision = document.revision();
        let host = ConsoleHost::new(document, out, config.preview_width);
        Self {
            session: SearchSession::new(host, config.search_config()),
            store,
            autosave: config.autosave,
            saved_revision,
        }
    }

    /// Restores the stored document, or starts empty when nothing was saved.
    pub fn open(
        store: Box<dyn PersistenceStore>,
        config: &AppConfig,
        out: W,
    ) -> Result<Self> {
        let content = store.load()?.unwrap_or_default();
        info!(
            "opened {} ({} bytes)",
            store.describe(),
            content.len()
        );
        Ok(Self::new(Document::new(&content), store, config, out))
    }

    pub fn document(&self) -> &Document {
        self.session.host().document()
    }

    pub fn session(&self) -> &SearchSession<ConsoleHost<W>> {
        &self.session
    }

    pub fn is_dirty(&self) -> bool {
        self.document().revision() != self.saved_revision
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!("executing {:?}", command);
        match command {
            Command::Find(query) => {
                self.session.find(&query);
            }
            Command::Next => {
                let _ = self.session.find_next();
            }
            Command::Previous => {
                let _ = self.session.find_previous();
            }
            Command::Replace(replacement) => {
                self.session.replace_one(&replacement);
            }
            Command::ReplaceAll { query, replacement } => {
                self.session.replace_all(&query, &replacement);
            }
            Command::Insert { offset, text } => {
                self.session
                    .edit(|host| host.document_mut().insert(offset, &text))?;
            }
            Command::Append(text) => {
                self.session.edit(|host| host.document_mut().append(&text));
            }
            Command::Delete { start, end } => {
                self.session
                    .edit(|host| host.document_mut().delete(start..end))?;
            }
            Command::Clear => {
                self.session.edit(|host| host.document_mut().clear());
                self.store.clear()?;
                self.saved_revision = self.document().revision();
                self.print("Document cleared");
            }
            Command::Show => {
                let text = self.document().text().to_string();
                self.print(&text);
            }
            Command::Count => {
                let document = self.document();
                let message = format!(
                    "{} characters, {} lines",
                    document.char_count(),
                    document.line_count()
                );
                self.print(&message);
            }
            Command::Save => {
                self.save()?;
                let message = format!("Saved to {}", self.store.describe());
                self.print(&message);
            }
            Command::ToggleCase => {
                self.session.toggle_case_sensitive();
                let message = if self.session.config().case_sensitive {
                    "Case-sensitive matching on"
                } else {
                    "Case-sensitive matching off"
                };
                self.print(message);
            }
            Command::ToggleRegex => {
                self.session.toggle_regex_mode();
                let message = format!("Search mode: {}", self.session.config().mode.as_str());
                self.print(&message);
            }
            Command::Help => {
                self.print(help_text().trim_end());
            }
            Command::Quit => {
                self.autosave_if_dirty()?;
                self.warn_if_unsaved();
                return Ok(Flow::Quit);
            }
        }

        self.autosave_if_dirty()?;
        Ok(Flow::Continue)
    }

    pub fn save(&mut self) -> Result<()> {
        self.store.save(self.document().text())?;
        self.saved_revision = self.document().revision();
        debug!("saved revision {}", self.saved_revision);
        Ok(())
    }

    fn autosave_if_dirty(&mut self) -> Result<()> {
        if self.autosave && self.is_dirty() {
            self.save()?;
        }
        Ok(())
    }

    /// Tells the user that edits are about to be dropped. Only reachable with autosave off.
    pub fn warn_if_unsaved(&mut self) {
        if self.is_dirty() {
            warn!("leaving with unsaved changes");
            self.print("Unsaved changes were discarded (autosave is off, use 'save').");
        }
    }

    pub fn print(&mut self, message: &str) {
        self.session.host_mut().print(message);
    }

    pub fn into_output(self) -> W {
        self.session.into_host().out
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// Store that keeps saves in memory and shares them with the test.
    #[derive(Clone, Default)]
    struct MemoryStore {
        saved: Rc<RefCell<Option<String>>>,
        saves: Rc<RefCell<usize>>,
    }

    impl PersistenceStore for MemoryStore {
        fn load(&self) -> Result<Option<String>> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, content: &str) -> Result<()> {
            *self.saved.borrow_mut() = Some(content.to_string());
            *self.saves.borrow_mut() += 1;
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.saved.borrow_mut() = None;
            Ok(())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    fn editor(text: &str, config: &AppConfig) -> (Editor<Vec<u8>>, MemoryStore) {
        let store = MemoryStore::default();
        *store.saved.borrow_mut() = Some(text.to_string());
        let editor = Editor::open(Box::new(store.clone()), config, Vec::new()).unwrap();
        (editor, store)
    }

    fn run(editor: &mut Editor<Vec<u8>>, lines: &[&str]) {
        for line in lines {
            editor.execute(Command::parse(line).unwrap()).unwrap();
        }
    }

    fn output(editor: Editor<Vec<u8>>) -> String {
        String::from_utf8(editor.into_output()).unwrap()
    }

    #[test]
    fn find_prints_status_and_highlight() {
        let (mut editor, _) = editor("one two one", &AppConfig::default());

        run(&mut editor, &["find one", "next"]);

        let out = output(editor);
        assert_eq!(
            out,
            "[0..3] \u{ab}one\u{bb} two one\n\
             Found 2 matches\n\
             [8..11] one two \u{ab}one\u{bb}\n\
             2 of 2\n"
        );
    }

    #[test]
    fn replace_autosaves_the_document() {
        let (mut editor, store) = editor("aXbXc", &AppConfig::default());

        run(&mut editor, &["find X", "replace YY"]);

        assert_eq!(editor.document().text(), "aYYbXc");
        assert_eq!(
            editor.session().results().matches(),
            &[SearchMatch::new(4, 5)]
        );
        assert_eq!(store.saved.borrow().as_deref(), Some("aYYbXc"));
        assert_eq!(*store.saves.borrow(), 1);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn autosave_off_waits_for_explicit_save() {
        let config = AppConfig {
            autosave: false,
            ..AppConfig::default()
        };
        let (mut editor, store) = editor("banana", &config);

        run(&mut editor, &["replace-all an => X"]);
        assert!(editor.is_dirty());
        assert_eq!(store.saved.borrow().as_deref(), Some("banana"));

        run(&mut editor, &["save"]);
        assert_eq!(store.saved.borrow().as_deref(), Some("bXXa"));
    }

    #[test]
    fn external_edit_invalidates_and_next_searches_again() {
        let (mut editor, _) = editor("cat hat", &AppConfig::default());

        run(&mut editor, &["find at", "insert 0 bat "]);
        assert!(editor.session().results().is_empty());

        run(&mut editor, &["next"]);
        assert_eq!(editor.session().results().count(), 3);
        assert_eq!(
            editor.session().results().current(),
            Some(&SearchMatch::new(1, 3))
        );
    }

    #[test]
    fn rejected_edit_leaves_document_untouched() {
        let (mut editor, store) = editor("caf\u{e9}", &AppConfig::default());

        let result = editor.execute(Command::Insert {
            offset: 4,
            text: "x".to_string(),
        });

        assert!(result.is_err());
        assert_eq!(editor.document().text(), "caf\u{e9}");
        assert_eq!(*store.saves.borrow(), 0);
    }

    #[test]
    fn clear_empties_document_and_store() {
        let (mut editor, store) = editor("some text", &AppConfig::default());

        run(&mut editor, &["clear", "count"]);

        assert!(editor.document().text().is_empty());
        assert_eq!(*store.saved.borrow(), None);
        assert!(output(editor).ends_with("Document cleared\n0 characters, 0 lines\n"));
    }

    #[test]
    fn toggles_change_matching() {
        let (mut editor, _) = editor("Word word w.rd", &AppConfig::default());

        run(&mut editor, &["case", "find word"]);
        assert_eq!(editor.session().results().count(), 2);

        run(&mut editor, &["regex", "find w.rd"]);
        assert_eq!(editor.session().results().count(), 3);
    }

    #[test]
    fn quit_with_autosave_off_reports_unsaved_changes() {
        let config = AppConfig {
            autosave: false,
            ..AppConfig::default()
        };
        let (mut editor, store) = editor("draft", &config);

        run(&mut editor, &["append  notes"]);
        assert_eq!(editor.execute(Command::Quit).unwrap(), Flow::Quit);

        assert_eq!(store.saved.borrow().as_deref(), Some("draft"));
        assert!(
            output(editor)
                .ends_with("Unsaved changes were discarded (autosave is off, use 'save').\n")
        );
    }

    #[test]
    fn quit_after_save_is_silent() {
        let config = AppConfig {
            autosave: false,
            ..AppConfig::default()
        };
        let (mut editor, store) = editor("draft", &config);

        run(&mut editor, &["append !", "save", "quit"]);

        assert_eq!(store.saved.borrow().as_deref(), Some("draft!"));
        assert!(!output(editor).contains("Unsaved"));
    }

    #[test]
    fn replacement_line_endings_are_normalized() {
        let (mut editor, _) = editor("xAyAz", &AppConfig::default());

        run(&mut editor, &["find A", "replace 1\\r\\n2"]);

        assert_eq!(editor.document().text(), "x1\n2yAz");
        assert_eq!(
            editor.session().results().matches(),
            &[SearchMatch::new(5, 6)]
        );

        run(&mut editor, &["replace -"]);
        assert_eq!(editor.document().text(), "x1\n2y-z");
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut editor, _) = editor("", &AppConfig::default());
        assert_eq!(editor.execute(Command::Quit).unwrap(), Flow::Quit);
        assert_eq!(editor.execute(Command::Count).unwrap(), Flow::Continue);
    }

    #[test]
    fn preview_trims_context_and_flattens_newlines() {
        let text = "first line\nsecond line";
        let m = SearchMatch::new(11, 17);
        assert_eq!(preview(text, &m, 3), "ne\u{23ce}\u{ab}second\u{bb} li");
        assert_eq!(preview(text, &m, 0), "\u{ab}second\u{bb}");
    }
}
