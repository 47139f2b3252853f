use std::{
    env, fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use scribe_search::{SearchConfig, SearchMode};

const DEFAULT_PREVIEW_WIDTH: usize = 24;
const MAX_PREVIEW_WIDTH: usize = 200;
const DEFAULT_AUTOSAVE: bool = true;
const STATE_FILE_NAME: &str = "document.json";

const DEFAULT_CONFIG: &str = "# Search settings\n\
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

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub case_sensitive: bool,
    pub search_mode: SearchMode,
    pub autosave: bool,
    pub state_file: Option<PathBuf>,
    pub preview_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            case_sensitive: SearchConfig::default().case_sensitive,
            search_mode: SearchMode::default(),
            autosave: DEFAULT_AUTOSAVE,
            state_file: None,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }
}

impl AppConfig {
    pub fn load_or_create() -> Self {
        let mut config = Self::default();
        let Some(path) = ensure_config_file() else {
            warn!("could not determine a config directory, using defaults");
            return config;
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!("loaded config from {}", path.display());
                config = Self::from_contents(&contents);
            }
            Err(e) => warn!("failed to read {}: {}", path.display(), e),
        }

        config
    }

    pub fn from_contents(contents: &str) -> Self {
        let mut config = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.splitn(2, '=');
            let key = parts.next().unwrap_or("").trim();
            let value = parts.next().unwrap_or("").trim();

            if key.eq_ignore_ascii_case("case_sensitive") {
                if let Some(case_sensitive) = parse_bool(value) {
                    config.case_sensitive = case_sensitive;
                }
            }

            if key.eq_ignore_ascii_case("search_mode") {
                if let Some(mode) = SearchMode::parse(value) {
                    config.search_mode = mode;
                }
            }

            if key.eq_ignore_ascii_case("autosave") {
                if let Some(autosave) = parse_bool(value) {
                    config.autosave = autosave;
                }
            }

            if key.eq_ignore_ascii_case("state_file") {
                config.state_file = parse_optional_string_value(value).map(|p| expand_home(&p));
            }

            if key.eq_ignore_ascii_case("preview_width") {
                if let Ok(width) = value.parse::<usize>() {
                    config.preview_width = width.min(MAX_PREVIEW_WIDTH);
                }
            }
        }

        config
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            case_sensitive: self.case_sensitive,
            mode: self.search_mode,
        }
    }

    /// Explicit `state_file`, or `document.json` in the platform data directory.
    pub fn state_file_path(&self) -> Option<PathBuf> {
        self.state_file.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join("scribe").join(STATE_FILE_NAME))
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_string_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unquoted = if (trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() > 1)
        || (trimmed.starts_with('\'') && trimmed.ends_with('\'') && trimmed.len() > 1)
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    let unquoted = unquoted.trim();
    if unquoted.is_empty() {
        return None;
    }

    Some(unquoted.to_string())
}

fn parse_optional_string_value(value: &str) -> Option<String> {
    let parsed = parse_string_value(value)?;
    let normalized = parsed.trim().to_ascii_lowercase();
    if matches!(normalized.as_str(), "none" | "unset" | "default" | "auto") {
        return None;
    }
    Some(parsed)
}

fn expand_home(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(value)
}

pub fn ensure_config_file() -> Option<PathBuf> {
    let path = config_path()?;
    if !path.exists() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(&path, DEFAULT_CONFIG) {
            warn!("could not create {}: {}", path.display(), e);
        }
    }
    Some(path)
}

fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(dir) = dirs::config_dir() {
            return Some(dir.join("scribe").join("config.txt"));
        }
    }

    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.trim().is_empty()
    {
        return Some(Path::new(&xdg_config_home).join("scribe/config.txt"));
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".config/scribe/config.txt"));
    }

    env::current_dir()
        .ok()
        .map(|dir| dir.join(".config/scribe/config.txt"))
}
