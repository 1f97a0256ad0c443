//! `omnibox suggest`: one full query cycle against a history file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::core::controller::AcController;
use crate::services::history::MemoryProfile;

pub fn run_suggest(config: &Config, text: &str, history: Option<&Path>, json: bool) -> Result<()> {
    let profile = match history {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read history file: {}", path.display()))?;
            MemoryProfile::from_toml_str(&content)
                .with_context(|| format!("Invalid history file: {}", path.display()))?
        }
        None => MemoryProfile::new(),
    };

    let mut controller = AcController::from_config(profile, config);
    controller.initialize()?;
    controller.set_search_text(text);
    controller.fire_timer();
    for event in controller.profile_mut().drain_events() {
        controller.handle_event(event);
    }

    if json {
        println!("{}", controller.snapshot_json()?);
        return Ok(());
    }

    for (index, entry) in controller.buffer().visible().iter().enumerate() {
        let matched = entry.matched_text().unwrap_or("");
        println!("{:>2}  {:<10} {}", index, format!("{:?}", entry.row_kind).to_lowercase(), entry.label);
        if matched.is_empty() {
            println!("    {}", entry.url);
        } else {
            println!("    {}  [{}]", entry.url, matched);
        }
    }

    let hidden = controller.entry_count() - controller.visible_entry_count();
    if hidden > 0 {
        println!("({} more not shown)", hidden);
    }

    controller.uninitialize();
    Ok(())
}
