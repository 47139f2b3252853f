use anyhow::{Context, Result, anyhow, bail};

/// One line of input to the interactive editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Find(String),
    Next,
    Previous,
    Replace(String),
    ReplaceAll { query: String, replacement: String },
    Insert { offset: usize, text: String },
    Append(String),
    Delete { start: usize, end: usize },
    Clear,
    Show,
    Count,
    Save,
    ToggleCase,
    ToggleRegex,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub summary: &'static str,
}

impl CommandSpec {
    fn answers_to(&self, word: &str) -> bool {
        self.name == word || self.aliases.iter().any(|alias| *alias == word)
    }
}

const fn command(
    name: &'static str,
    aliases: &'static [&'static str],
    usage: &'static str,
    summary: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        aliases,
        usage,
        summary,
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    command("find", &["f"], "find <query>", "Search the document"),
    command("next", &["n"], "next", "Move to the next match"),
    command("prev", &["previous", "p"], "prev", "Move to the previous match"),
    command("replace", &["r"], "replace <text>", "Replace the current match"),
    command(
        "replace-all",
        &["ra"],
        "replace-all <query> => <text>",
        "Replace every occurrence",
    ),
    command(
        "insert",
        &["i"],
        "insert <offset> <text>",
        "Insert text at a byte offset",
    ),
    command("append", &["a"], "append <text>", "Add text at the end"),
    command("delete", &["d"], "delete <start> <end>", "Delete a byte range"),
    command("clear", &[], "clear", "Empty the document"),
    command("show", &["s"], "show", "Print the document"),
    command("count", &["c"], "count", "Print the character count"),
    command("save", &["w"], "save", "Save the document now"),
    command("case", &[], "case", "Toggle case-sensitive matching"),
    command("regex", &[], "regex", "Toggle regex mode"),
    command("help", &["?"], "help", "List commands"),
    command("quit", &["q", "exit"], "quit", "Leave the editor"),
];

const REPLACE_ALL_SEPARATOR: &str = " =>";

pub fn lookup(word: &str) -> Option<&'static CommandSpec> {
    let word = word.to_ascii_lowercase();
    COMMANDS.iter().find(|spec| spec.answers_to(&word))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };
        if word.is_empty() {
            bail!("empty command");
        }
        let spec =
            lookup(word).ok_or_else(|| anyhow!("unknown command '{}', try 'help'", word))?;

        let command = match spec.name {
            "find" => Self::Find(unescape(rest)),
            "next" => Self::Next,
            "prev" => Self::Previous,
            "replace" => Self::Replace(unescape(rest)),
            "replace-all" => {
                let (query, replacement) = rest
                    .split_once(REPLACE_ALL_SEPARATOR)
                    .ok_or_else(|| anyhow!("usage: {}", spec.usage))?;
                let replacement = replacement.strip_prefix(' ').unwrap_or(replacement);
                Self::ReplaceAll {
                    query: unescape(query),
                    replacement: unescape(replacement),
                }
            }
            "insert" => {
                let (offset, text) = rest.split_once(' ').unwrap_or((rest, ""));
                Self::Insert {
                    offset: parse_offset(offset)?,
                    text: unescape(text),
                }
            }
            "append" => Self::Append(unescape(rest)),
            "delete" => {
                let mut parts = rest.split_whitespace();
                let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next())
                else {
                    bail!("usage: {}", spec.usage);
                };
                Self::Delete {
                    start: parse_offset(start)?,
                    end: parse_offset(end)?,
                }
            }
            "clear" => Self::Clear,
            "show" => Self::Show,
            "count" => Self::Count,
            "save" => Self::Save,
            "case" => Self::ToggleCase,
            "regex" => Self::ToggleRegex,
            "help" => Self::Help,
            "quit" => Self::Quit,
            other => bail!("command '{}' has no parser", other),
        };

        Ok(command)
    }
}

fn parse_offset(value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .with_context(|| format!("'{}' is not a byte offset", value.trim()))
}

/// Decodes `\n`, `\t`, `\r` and `\\`; any other escape is kept as written.
pub fn unescape(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => output.push('\n'),
            Some('t') => output.push('\t'),
            Some('r') => output.push('\r'),
            Some('\\') => output.push('\\'),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}

pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|c| c.usage.len()).max().unwrap_or(0);
    let mut text = String::from("Available commands:\n");
    for spec in COMMANDS {
        text.push_str(&format!("  {:width$}  {}\n", spec.usage, spec.summary));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_commands() {
        assert_eq!(
            Command::parse("find hello world").unwrap(),
            Command::Find("hello world".to_string())
        );
        assert_eq!(Command::parse("next").unwrap(), Command::Next);
        assert_eq!(Command::parse("  prev  ").unwrap(), Command::Previous);
        assert_eq!(
            Command::parse("replace ").unwrap(),
            Command::Replace(String::new())
        );
    }

    #[test]
    fn find_keeps_inner_and_trailing_spaces() {
        assert_eq!(
            Command::parse("find  a ").unwrap(),
            Command::Find(" a ".to_string())
        );
    }

    #[test]
    fn parses_replace_all() {
        assert_eq!(
            Command::parse("replace-all an => X").unwrap(),
            Command::ReplaceAll {
                query: "an".to_string(),
                replacement: "X".to_string(),
            }
        );
        assert_eq!(
            Command::parse("ra foo =>").unwrap(),
            Command::ReplaceAll {
                query: "foo".to_string(),
                replacement: String::new(),
            }
        );
        assert!(Command::parse("replace-all foo").is_err());
    }

    #[test]
    fn parses_edit_commands() {
        assert_eq!(
            Command::parse("insert 3 a\\nb").unwrap(),
            Command::Insert {
                offset: 3,
                text: "a\nb".to_string(),
            }
        );
        assert_eq!(
            Command::parse("delete 1 4").unwrap(),
            Command::Delete { start: 1, end: 4 }
        );
        assert!(Command::parse("delete 1").is_err());
        assert!(Command::parse("insert x hi").is_err());
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(Command::parse("bold").is_err());
        assert!(Command::parse("   ").is_err());
    }

    #[test]
    fn unescape_handles_known_and_unknown_escapes() {
        assert_eq!(unescape(r"a\tb\\c"), "a\tb\\c");
        assert_eq!(unescape(r"\d+"), r"\d+");
        assert_eq!(unescape("end\\"), "end\\");
    }

    #[test]
    fn aliases_resolve_through_the_table() {
        assert_eq!(Command::parse("F word").unwrap(), Command::Find("word".to_string()));
        assert_eq!(Command::parse("previous").unwrap(), Command::Previous);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert_eq!(lookup("ra").map(|spec| spec.name), Some("replace-all"));
    }

    #[test]
    fn every_table_entry_parses() {
        for spec in COMMANDS {
            let line = match spec.name {
                "replace-all" => "replace-all a => b".to_string(),
                "insert" => "insert 0 x".to_string(),
                "delete" => "delete 0 1".to_string(),
                name => format!("{name} x"),
            };
            assert!(Command::parse(&line).is_ok(), "{} did not parse", spec.name);
            for alias in spec.aliases {
                assert_eq!(lookup(alias), Some(spec));
            }
        }
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();
        for spec in COMMANDS {
            assert!(help.contains(spec.usage));
        }
    }
}
