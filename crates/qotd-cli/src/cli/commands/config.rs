//! Config inspection commands.

use std::fs;

use anyhow::{Context, Result};
use qotd_core::config::{default_config_template, paths};

/// Prints the config file path.
pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

/// Creates a default config file if none exists.
pub fn init() -> Result<()> {
    let path = paths::config_path();
    if path.exists() {
        anyhow::bail!("Config already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, default_config_template())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created config at {}", path.display());
    Ok(())
}
