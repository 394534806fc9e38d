//! Write a parameter file holding the built-in defaults.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config;

pub fn run(path: &Path, quiet: bool) -> Result<()> {
    if path.exists() {
        if !quiet {
            println!("  {} {} already exists", "•".yellow(), path.display());
        }
        return Ok(());
    }

    config::save_default(path)
        .with_context(|| format!("Failed to write default parameters to {}", path.display()))?;

    if !quiet {
        println!("  {} Created {}", "✓".green(), path.display());
        println!();
        println!("Next steps:");
        println!("  {} edit {}", "1.".blue(), path.display());
        println!("  {} synsim {}", "2.".blue(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;

    #[test]
    fn writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synsim.toml");
        run(&path, true).unwrap();
        assert_eq!(RunConfig::load(&path).unwrap(), RunConfig::default());
    }

    #[test]
    fn existing_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synsim.toml");
        std::fs::write(&path, "dt = 0.5\n").unwrap();
        run(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dt = 0.5\n");
    }
}
