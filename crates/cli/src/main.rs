use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scribe_search::{SearchConfig, SearchMode};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe find/replace CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    action: Option<Action>,
}

/// Matching flags. Each one overrides the config file's `case_sensitive` or `search_mode`.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Match regardless of letter case
    #[arg(long, conflicts_with = "match_case")]
    pub ignore_case: bool,

    /// Match letter case exactly
    #[arg(long)]
    pub match_case: bool,

    /// Treat the query as a regular expression
    #[arg(long, conflicts_with = "literal")]
    pub regex: bool,

    /// Treat the query as plain text
    #[arg(long)]
    pub literal: bool,
}

impl MatchOptions {
    pub fn apply(self, defaults: SearchConfig) -> SearchConfig {
        let mut config = defaults;
        if self.ignore_case {
            config.case_sensitive = false;
        } else if self.match_case {
            config.case_sensitive = true;
        }
        if self.regex {
            config.mode = SearchMode::Regex;
        } else if self.literal {
            config.mode = SearchMode::Literal;
        }
        config
    }
}

#[derive(Subcommand)]
enum Action {
    /// Show version information
    #[command(name = "-version")]
    Version,

    /// Show help and available actions
    #[command(name = "-help")]
    Help,

    /// List every match of a query in a file
    #[command(name = "-find")]
    Find {
        query: String,
        file: PathBuf,
        #[command(flatten)]
        options: MatchOptions,
    },

    /// Replace every occurrence of a query in a file
    #[command(name = "-replace-all")]
    ReplaceAll {
        query: String,
        replacement: String,
        file: PathBuf,
        /// Rewrite the file instead of printing the result
        #[arg(long)]
        write: bool,
        #[command(flatten)]
        options: MatchOptions,
    },

    /// Count characters in a file, line breaks excluded
    #[command(name = "-count")]
    Count { file: PathBuf },

    /// Open config file in editor
    #[command(name = "-edit-config")]
    EditConfig,

    /// Display current configuration
    #[command(name = "-show-config")]
    ShowConfig,

    /// Validate configuration file
    #[command(name = "-validate-config")]
    ValidateConfig,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.action {
        Some(Action::Version) => {
            commands::version::run();
            Ok(())
        }
        Some(Action::Help) | None => {
            commands::help::run();
            Ok(())
        }
        Some(Action::Find {
            query,
            file,
            options,
        }) => commands::find::run(
            &query,
            &file,
            options.apply(config::load_search_defaults()),
        ),
        Some(Action::ReplaceAll {
            query,
            replacement,
            file,
            write,
            options,
        }) => commands::replace_all::run(
            &query,
            &replacement,
            &file,
            write,
            options.apply(config::load_search_defaults()),
        ),
        Some(Action::Count { file }) => commands::count::run(&file),
        Some(Action::EditConfig) => commands::edit_config::run(),
        Some(Action::ShowConfig) => commands::show_config::run(),
        Some(Action::ValidateConfig) => commands::validate_config::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_defaults() {
        let defaults = SearchConfig {
            case_sensitive: false,
            mode: SearchMode::Regex,
        };

        assert_eq!(MatchOptions::default().apply(defaults), defaults);

        let options = MatchOptions {
            match_case: true,
            literal: true,
            ..MatchOptions::default()
        };
        assert_eq!(options.apply(defaults), SearchConfig::default());

        let options = MatchOptions {
            ignore_case: true,
            regex: true,
            ..MatchOptions::default()
        };
        assert_eq!(options.apply(SearchConfig::default()), defaults);
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        let conflicting = ["scribe", "-find", "q", "f.txt", "--regex", "--literal"];
        assert!(Cli::try_parse_from(conflicting).is_err());

        let single = ["scribe", "-find", "q", "f.txt", "--ignore-case"];
        assert!(Cli::try_parse_from(single).is_ok());
    }
}
