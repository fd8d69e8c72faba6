//! Effectiveness command - how served recommendations performed

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use vidrec::Recommender;

pub fn execute(db: &Path, user_id: Option<&str>, json: bool) -> Result<()> {
    let engine = Recommender::open(db)?;
    let report = engine.effectiveness(user_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match user_id {
        Some(user) => println!("Recommendation effectiveness for {}:\n", user.cyan()),
        None => println!("{}", "Overall recommendation effectiveness:\n".bold()),
    }
    println!("  Total recommendations: {}", report.total_recommendations);
    println!("  Clicked:               {}", report.clicked_recommendations);
    println!(
        "  Click-through rate:    {:.2}%",
        report.click_through_rate * 100.0
    );
    println!("  Average rating:        {:.2}", report.avg_rating);

    Ok(())
}
