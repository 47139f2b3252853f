use std::{env, fs, path::PathBuf};

use log::warn;
use scribe_search::{SearchConfig, SearchMode};

/// Contents written when the config file is first created. Kept in step with the editor's.
pub const DEFAULT_CONFIG: &str = "# Search settings\n\
# Match letter case exactly when searching (true|false)\n\
case_sensitive = true\n\
# How queries are interpreted: literal (plain text) or regex\n\
search_mode = literal\n\
\n\
# Document settings\n\
# Save the document after every change\n\
autosave = true\n\
# Where the scratch document is kept when no file is given (~ supported)\n\
# state_file = ~/.local/share/scribe/document.json\n\
\n\
# Display settings\n\
# Characters of context shown on each side of a highlighted match\n\
# preview_width = 24\n";

/// Returns the path to the config file shared with the editor
pub fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir().map(|p| p.join("scribe").join("config.txt"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.trim().is_empty()
        {
            return Some(PathBuf::from(xdg_config_home).join("scribe").join("config.txt"));
        }
        dirs::home_dir().map(|p| p.join(".config").join("scribe").join("config.txt"))
    }
}

/// Yields `(line_number, key, value)` for every `key = value` line, skipping comments.
pub fn entries(contents: &str) -> impl Iterator<Item = (usize, &str, Option<&str>)> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let entry = match trimmed.split_once('=') {
                Some((key, value)) => (index + 1, key.trim(), Some(value.trim())),
                None => (index + 1, trimmed, None),
            };
            Some(entry)
        })
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Matching options from the config file, or the built-in defaults where a key is absent or
/// malformed.
pub fn search_defaults(contents: &str) -> SearchConfig {
    let mut config = SearchConfig::default();
    for (_, key, value) in entries(contents) {
        let Some(value) = value else {
            continue;
        };

        if key.eq_ignore_ascii_case("case_sensitive") {
            if let Some(case_sensitive) = parse_bool(value) {
                config.case_sensitive = case_sensitive;
            }
        } else if key.eq_ignore_ascii_case("search_mode")
            && let Some(mode) = SearchMode::parse(value)
        {
            config.mode = mode;
        }
    }
    config
}

/// Reads the matching defaults without creating the config file.
pub fn load_search_defaults() -> SearchConfig {
    let Some(path) = config_path() else {
        return SearchConfig::default();
    };
    if !path.exists() {
        return SearchConfig::default();
    }

    match fs::read_to_string(&path) {
        Ok(contents) => search_defaults(&contents),
        Err(e) => {
            warn!("could not read {}: {}", path.display(), e);
            SearchConfig::default()
        }
    }
}
