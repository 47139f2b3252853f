use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use scribe_search::SearchConfig;

use crate::commands::{engine_for, read_document};

pub fn run(
    query: &str,
    replacement: &str,
    file: &Path,
    write: bool,
    config: SearchConfig,
) -> Result<()> {
    let text = read_document(file)?;
    let engine = engine_for(query, config)?;
    let (output, count) = engine.replace_all(&text, replacement);

    if !write {
        print!("{}", output);
        eprintln!("Replaced {} occurrence(s)", count);
        return Ok(());
    }

    if count > 0 {
        fs::write(file, &output).with_context(|| format!("failed to write {}", file.display()))?;
        info!("rewrote {} ({} replacements)", file.display(), count);
    }
    println!("Replaced {} occurrence(s) in {}", count, file.display());
    Ok(())
}
