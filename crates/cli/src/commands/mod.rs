pub mod count;
pub mod edit_config;
pub mod find;
pub mod help;
pub mod replace_all;
pub mod show_config;
pub mod validate_config;
pub mod version;

use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use scribe_search::{SearchConfig, SearchEngine};

pub(crate) fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub(crate) fn engine_for(query: &str, config: SearchConfig) -> Result<SearchEngine> {
    if query.is_empty() {
        return Err(anyhow!("Nothing to search: the query is empty"));
    }

    let mut engine = SearchEngine::new(config);
    engine
        .set_pattern(query)
        .map_err(|e| anyhow!("Invalid pattern: {}", e))?;
    Ok(engine)
}
