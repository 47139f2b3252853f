use anyhow::{Context, Result, anyhow};
use scribe_search::SearchMode;

use crate::config::{config_path, entries, parse_bool};

const VALID_KEYS: &[&str] = &[
    "case_sensitive",
    "search_mode",
    "autosave",
    "state_file",
    "preview_width",
];

const BOOL_KEYS: &[&str] = &["case_sensitive", "autosave"];

const MAX_PREVIEW_WIDTH: usize = 200;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn run() -> Result<()> {
    let path = config_path().ok_or_else(|| anyhow!("Could not determine config directory"))?;

    println!("Config file: {}", path.display());

    if !path.exists() {
        println!("Status: File does not exist (using defaults)");
        println!("Result: Valid");
        return Ok(());
    }

    let contents = std::fs::read_to_string(&path).context("Failed to read config file")?;
    let report = validate(&contents);

    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("Status: Valid");
        return Ok(());
    }

    if !report.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &report.errors {
            println!("  {}", error);
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }

    println!();
    if report.errors.is_empty() {
        println!("Result: Valid (with warnings)");
    } else {
        println!("Result: Invalid");
        std::process::exit(1);
    }
    Ok(())
}

pub fn validate(contents: &str) -> Report {
    let mut report = Report::default();

    for (line_num, key, value) in entries(contents) {
        let Some(value) = value else {
            report.errors.push(format!(
                "Line {}: Invalid syntax. Expected 'key = value'",
                line_num
            ));
            continue;
        };

        let key = key.to_ascii_lowercase();
        if !VALID_KEYS.contains(&key.as_str()) {
            report
                .warnings
                .push(format!("Line {}: Unknown key '{}'", line_num, key));
            continue;
        }

        match key.as_str() {
            "search_mode" => {
                if SearchMode::parse(value).is_none() {
                    report.errors.push(format!(
                        "Line {}: search_mode must be 'literal' or 'regex'",
                        line_num
                    ));
                }
            }
            "preview_width" => match value.parse::<usize>() {
                Ok(width) if width > MAX_PREVIEW_WIDTH => report.warnings.push(format!(
                    "Line {}: preview_width is capped at {}",
                    line_num, MAX_PREVIEW_WIDTH
                )),
                Ok(_) => {}
                Err(_) => report.errors.push(format!(
                    "Line {}: preview_width must be a positive integer",
                    line_num
                )),
            },
            "state_file" => {
                if value.is_empty() {
                    report
                        .warnings
                        .push(format!("Line {}: state_file is empty", line_num));
                }
            }
            key if BOOL_KEYS.contains(&key) => {
                if parse_bool(value).is_none() {
                    report.errors.push(format!(
                        "Line {}: {} must be 'true' or 'false'",
                        line_num, key
                    ));
                }
            }
            _ => {}
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::DEFAULT_CONFIG;

    #[test]
    fn default_config_is_clean() {
        assert_eq!(validate(DEFAULT_CONFIG), Default::default());
    }

    #[test]
    fn clean_config_has_no_findings() {
        let report = validate(
            "# settings\n\
             case_sensitive = false\n\
             search_mode = regex\n\
             autosave = on\n\
             preview_width = 40\n",
        );

        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn bad_values_are_errors_and_unknown_keys_warnings() {
        let report = validate(
            "search_mode = fuzzy\n\
             autosave = sometimes\n\
             theme = dark\n\
             preview_width = -3\n\
             just some words\n",
        );

        assert_eq!(
            report.errors,
            vec![
                "Line 1: search_mode must be 'literal' or 'regex'".to_string(),
                "Line 2: autosave must be 'true' or 'false'".to_string(),
                "Line 4: preview_width must be a positive integer".to_string(),
                "Line 5: Invalid syntax. Expected 'key = value'".to_string(),
            ]
        );
        assert_eq!(report.warnings, vec!["Line 3: Unknown key 'theme'".to_string()]);
    }

    #[test]
    fn oversized_preview_width_is_a_warning() {
        let report = validate("preview_width = 999\n");
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }
}
