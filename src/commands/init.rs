use crate::config::{EhsConfig, CONFIG_FILE};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Write a starter configuration file with the documented defaults.
pub fn run(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    let toml = toml::to_string_pretty(&EhsConfig::default())
        .context("serializing default configuration")?;
    fs::write(path, toml)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("{} wrote {}", "✓".green(), path.display());
    Ok(())
}
