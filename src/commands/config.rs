//! Config subcommands handler

use std::path::{Path, PathBuf};

use anyhow::Result;

use subplay::theme::current_theme;
use subplay::Config;

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Show the effective configuration as TOML.
pub fn handle_show(path: Option<&Path>) -> Result<()> {
    let config = super::load_config(path)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(config.to_toml_pretty()?.trim_end()));
    Ok(())
}

/// Print where the config file lives.
pub fn handle_path(path: Option<&Path>) -> Result<()> {
    println!("{}", resolve_path(path)?.display());
    Ok(())
}

/// Write the default config unless a file already exists.
pub fn handle_init(path: Option<&Path>) -> Result<()> {
    let path = resolve_path(path)?;
    let theme = current_theme();

    if path.exists() {
        println!(
            "{}",
            theme.secondary_text(&format!("Config already exists: {}", path.display()))
        );
        return Ok(());
    }

    Config::default().save_to(&path)?;
    println!(
        "{}",
        theme.success_text(&format!("Wrote default config to {}", path.display()))
    );
    Ok(())
}
