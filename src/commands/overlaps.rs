//! Overlaps command - cross-user watch overlap report

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use vidrec::Recommender;

pub fn execute(db: &Path, json: bool) -> Result<()> {
    let engine = Recommender::open(db)?;
    let reports = engine.find_overlaps()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("No overlapping users found");
        return Ok(());
    }

    for report in &reports {
        println!(
            "{} and {} share {} video(s): {}",
            report.user_a.cyan(),
            report.user_b.cyan(),
            report.common_video_ids.len(),
            report.common_video_ids.join(", ")
        );
        if !report.transferable_recommendations.is_empty() {
            println!(
                "  transferable from {}: {}",
                report.user_a,
                report.transferable_recommendations.join(", ")
            );
        }
    }

    Ok(())
}
