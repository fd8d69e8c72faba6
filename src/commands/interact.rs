//! Watch and like commands - record user interactions

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use vidrec::Recommender;

pub fn watch(db: &Path, user_id: &str, video_id: &str, rating: Option<f64>) -> Result<()> {
    let mut engine = Recommender::open(db)?;
    engine.record_watch(user_id, video_id, rating)?;

    match rating {
        Some(rating) => println!(
            "{} {} watched {} (rated {:.1})",
            "✓".green(),
            user_id.cyan(),
            video_id,
            rating
        ),
        None => println!("{} {} watched {}", "✓".green(), user_id.cyan(), video_id),
    }

    Ok(())
}

pub fn like(db: &Path, user_id: &str, video_id: &str) -> Result<()> {
    let mut engine = Recommender::open(db)?;
    engine.record_like(user_id, video_id)?;

    println!("{} {} liked {}", "✓".green(), user_id.cyan(), video_id);
    Ok(())
}
