//! `omnibox tlds`: inspect and edit remembered suffixes in the config file.

use std::path::Path;

use anyhow::{bail, Result};

use super::TldCommands;
use crate::config::Config;

pub fn run_tlds(config_path: &Path, action: TldCommands) -> Result<()> {
    let mut config = if config_path.exists() {
        Config::load_from(config_path)?
    } else {
        Config::default()
    };

    match action {
        TldCommands::List => {
            let tlds = config.tld_table();
            if tlds.is_empty() {
                println!("No suffixes remembered yet.");
                return Ok(());
            }
            let best = tlds.best().map(str::to_string);
            for suffix in tlds.suffixes() {
                let score = tlds.score(&suffix).unwrap_or(0);
                let marker = if best.as_deref() == Some(suffix.as_str()) { "*" } else { " " };
                println!("{} {:<12} {}", marker, suffix, score);
            }
        }
        TldCommands::Add { suffix, weight } => {
            if suffix.is_empty() {
                bail!("Suffix must not be empty");
            }
            let mut tlds = config.tld_table();
            tlds.record_suggestion(&suffix, weight);
            config.suggested_tlds = tlds.iter().map(|(s, n)| (s.to_string(), n)).collect();
            config.save_to(config_path)?;
            tracing::info!(suffix = %suffix, "suffix recorded");
        }
        TldCommands::Remove { suffix } => {
            if config.suggested_tlds.remove(&suffix).is_none() {
                bail!("Unknown suffix: {}", suffix);
            }
            config.save_to(config_path)?;
        }
    }
    Ok(())
}
