mod commands;
mod config;
mod document;
mod editor;
mod persistence;

use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use commands::Command;
use config::AppConfig;
use editor::{Editor, Flow};
use persistence::{JsonFileStore, PersistenceStore, PlainFileStore};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Plain-text editor session with find and replace", long_about = None)]
#[command(version)]
struct Args {
    /// Text file to edit. Without one, a scratch document is restored from the data directory.
    file: Option<PathBuf>,

    /// Match regardless of letter case
    #[arg(long)]
    ignore_case: bool,

    /// Treat queries as regular expressions
    #[arg(long)]
    regex: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("scribe: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = AppConfig::load_or_create();
    if args.ignore_case {
        config.case_sensitive = false;
    }
    if args.regex {
        config.search_mode = scribe_search::SearchMode::Regex;
    }

    let store: Box<dyn PersistenceStore> = match args.file {
        Some(path) => Box::new(PlainFileStore::new(path)),
        None => {
            let path = config
                .state_file_path()
                .context("could not determine a data directory; set state_file in the config")?;
            Box::new(JsonFileStore::new(path))
        }
    };

    let interactive = io::stdin().is_terminal();
    let mut editor = Editor::open(store, &config, io::stdout())?;
    if interactive {
        editor.print("Type 'help' for commands.");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                editor.print(&format!("error: {e:#}"));
                continue;
            }
        };

        match editor.execute(command) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => {
                error!("command failed: {:#}", e);
                editor.print(&format!("error: {e:#}"));
            }
        }
    }

    editor.warn_if_unsaved();
    Ok(())
}
