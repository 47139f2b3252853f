use std::{
    env, fs,
    path::Path,
    process::{Command, ExitStatus},
};

use anyhow::{Context, Result, anyhow, bail};
use log::debug;

use crate::config::{DEFAULT_CONFIG, config_path};

pub fn run() -> Result<()> {
    let path = config_path().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    if create_with_defaults(&path)? {
        println!("Created {} with default settings", path.display());
    }

    println!("Opening {}", path.display());
    open_in_editor(&path)
}

/// Writes the commented defaults if `path` is missing. Returns whether a file was created.
fn create_with_defaults(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(true)
}

fn open_in_editor(path: &Path) -> Result<()> {
    let mut candidates: Vec<String> = Vec::new();
    for var in ["VISUAL", "EDITOR"] {
        if let Ok(editor) = env::var(var)
            && !editor.trim().is_empty()
        {
            candidates.push(editor);
        }
    }
    candidates.extend(platform_editors().iter().map(|s| s.to_string()));

    for editor in &candidates {
        match launch(editor, path) {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => eprintln!("{} exited with {}", editor, status),
            Err(e) => debug!("could not start {}: {}", editor, e),
        }
    }

    bail!("No editor could be started; set $EDITOR or open {} by hand", path.display())
}

fn launch(editor: &str, path: &Path) -> std::io::Result<ExitStatus> {
    // Editors such as "code --wait" carry their own arguments.
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(editor);
    Command::new(program).args(parts).arg(path).status()
}

#[cfg(target_os = "macos")]
fn platform_editors() -> &'static [&'static str] {
    &["open -t -W"]
}

#[cfg(target_os = "windows")]
fn platform_editors() -> &'static [&'static str] {
    &["notepad"]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_editors() -> &'static [&'static str] {
    &["xdg-open", "nano", "vim", "vi"]
}
