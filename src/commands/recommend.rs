//! Recommend command - serve and log ranked recommendations

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use vidrec::Recommender;

#[derive(Debug, Serialize)]
struct RecommendationRow {
    video_id: String,
    title: String,
    category: String,
    views: i64,
    score: f32,
}

pub fn execute(
    db: &Path,
    user_id: &str,
    limit: usize,
    rec_type: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut engine = Recommender::open(db)?;
    let served = engine.serve_recommendations(user_id, limit, rec_type)?;

    let rows: Vec<RecommendationRow> = served
        .iter()
        .map(|(video, score)| RecommendationRow {
            video_id: video.id.clone(),
            title: video.title.clone(),
            category: video.category.clone(),
            views: video.views,
            score: *score,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No recommendations available for {}", user_id.cyan());
        return Ok(());
    }

    println!("Recommendations for {}:\n", user_id.cyan());
    for (i, row) in rows.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            row.title.bold(),
            format!("(score {:.3})", row.score).dimmed()
        );
        println!(
            "     {} · {} views · id {}",
            row.category, row.views, row.video_id
        );
    }

    Ok(())
}
