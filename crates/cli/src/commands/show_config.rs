use anyhow::{Context, Result, anyhow};

use crate::config::{DEFAULT_CONFIG, config_path};

pub fn run() -> Result<()> {
    let path = config_path().ok_or_else(|| anyhow!("Could not determine config directory"))?;

    if !path.exists() {
        println!("# Config file: {} (not created yet)", path.display());
        println!("# Using default configuration");
        println!();
        print_defaults();
        return Ok(());
    }

    println!("# Config file: {}", path.display());
    println!();

    let contents = std::fs::read_to_string(&path).context("Failed to read config file")?;
    if contents.trim().is_empty() {
        println!("# (empty file - using defaults)");
        println!();
        print_defaults();
    } else {
        print!("{}", contents);
        if !contents.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn print_defaults() {
    print!("{}", DEFAULT_CONFIG);
}
