//! Ingest command - add videos to the catalog from JSON

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use vidrec::{Recommender, Video};

/// Add one video or an array of videos to the catalog
pub fn execute(db: &Path, file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    // Accept either a single object or an array
    let videos: Vec<Video> = match serde_json::from_str::<Vec<Video>>(&raw) {
        Ok(videos) => videos,
        Err(_) => vec![serde_json::from_str::<Video>(&raw)
            .with_context(|| format!("{} is not a video object or array", file.display()))?],
    };

    let mut engine = Recommender::open(db)?;
    for video in &videos {
        engine.ingest_video(video.clone())?;
    }

    println!(
        "{} Ingested {} video(s) into {}",
        "✓".green(),
        videos.len(),
        db.display()
    );

    Ok(())
}
