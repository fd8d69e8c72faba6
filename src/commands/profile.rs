//! Profile command - upsert a user's preference document

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use vidrec::Recommender;

pub fn execute(db: &Path, user_id: &str, preferences: &str) -> Result<()> {
    let preferences: serde_json::Value =
        serde_json::from_str(preferences).context("Preferences must be valid JSON")?;
    if !preferences.is_object() {
        anyhow::bail!("Preferences must be a JSON object");
    }

    let mut engine = Recommender::open(db)?;
    engine.upsert_profile(user_id, preferences)?;

    println!("{} Saved profile for {}", "✓".green(), user_id.cyan());
    Ok(())
}
