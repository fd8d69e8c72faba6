//! Demo command - seed sample data and run the interaction simulation
//!
//! Shows the whole loop: ingest a catalog, register users, replay a batch
//! of rated watches, then serve recommendations and report how they land.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::Path;
use vidrec::{Recommender, Video};

fn sample_video(
    id: &str,
    title: &str,
    description: &str,
    tags: &[&str],
    category: &str,
    duration_secs: i64,
    upload_date: &str,
    views: i64,
    likes: i64,
    creator: &str,
) -> Video {
    Video {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category: category.to_string(),
        duration_secs,
        upload_date: upload_date.to_string(),
        views,
        likes,
        creator: creator.to_string(),
        embedding: None,
    }
}

fn sample_catalog() -> Vec<Video> {
    vec![
        sample_video(
            "ml1",
            "Introduction to Machine Learning",
            "Beginner's guide to machine learning concepts",
            &["machine learning", "ai", "beginner", "tutorial"],
            "Education",
            1800,
            "2023-01-15",
            150_000,
            5_000,
            "AI Academy",
        ),
        sample_video(
            "ml2",
            "Deep Learning with TensorFlow",
            "Advanced deep learning techniques using TensorFlow",
            &["deep learning", "tensorflow", "neural networks", "advanced"],
            "Education",
            2700,
            "2023-02-20",
            95_000,
            3_200,
            "AI Academy",
        ),
        sample_video(
            "py1",
            "Python for Data Science",
            "Using Python for data analysis and visualization",
            &["python", "data science", "pandas", "matplotlib"],
            "Education",
            2400,
            "2023-03-10",
            210_000,
            8_500,
            "Data University",
        ),
        sample_video(
            "web1",
            "Building Modern Web Applications",
            "Creating responsive web apps with modern frameworks",
            &["web development", "javascript", "react", "frontend"],
            "Technology",
            3000,
            "2023-01-30",
            320_000,
            12_000,
            "Web Masters",
        ),
        sample_video(
            "mob1",
            "Mobile App Development Guide",
            "Developing cross-platform mobile applications",
            &["mobile", "flutter", "ios", "android"],
            "Technology",
            2200,
            "2023-02-05",
            78_000,
            2_800,
            "App Developers",
        ),
        sample_video(
            "ds1",
            "Data Structures and Algorithms",
            "Understanding core computer science concepts",
            &["algorithms", "data structures", "computer science", "coding"],
            "Education",
            3600,
            "2023-03-01",
            180_000,
            7_500,
            "CS University",
        ),
        sample_video(
            "devops1",
            "DevOps Essentials",
            "Introduction to DevOps practices and tools",
            &["devops", "docker", "kubernetes", "ci/cd"],
            "Technology",
            2000,
            "2023-01-20",
            110_000,
            4_200,
            "DevOps Pro",
        ),
    ]
}

pub fn execute(db: &Path) -> Result<()> {
    let mut engine = Recommender::open(db)?;

    println!("{}", "Seeding sample catalog and users...".bold());

    for video in sample_catalog() {
        engine.ingest_video(video)?;
    }

    engine.upsert_profile(
        "data_scientist",
        json!({
            "interests": ["python", "data science", "machine learning"],
            "preferred_categories": ["Education", "Technology"],
            "experience_level": "intermediate",
        }),
    )?;
    engine.upsert_profile(
        "web_dev",
        json!({
            "interests": ["javascript", "react", "web development"],
            "preferred_categories": ["Technology"],
            "experience_level": "advanced",
        }),
    )?;
    engine.upsert_profile(
        "student",
        json!({
            "interests": ["algorithms", "computer science", "beginner tutorials"],
            "preferred_categories": ["Education"],
            "experience_level": "beginner",
        }),
    )?;

    // Rated watch script; ratings at or above 4.0 also register a like
    let interactions: &[(&str, &str, f64)] = &[
        ("data_scientist", "py1", 5.0),
        ("data_scientist", "ml1", 4.5),
        ("data_scientist", "ds1", 3.0),
        ("data_scientist", "web1", 2.0),
        ("data_scientist", "ml2", 5.0),
        ("web_dev", "web1", 5.0),
        ("web_dev", "devops1", 4.0),
        ("web_dev", "mob1", 2.5),
        ("web_dev", "py1", 3.5),
        ("student", "ml1", 4.8),
        ("student", "ds1", 4.5),
        ("student", "ml2", 2.0),
        ("student", "py1", 4.0),
    ];

    for &(user_id, video_id, rating) in interactions {
        engine.record_watch(user_id, video_id, Some(rating))?;
        if rating >= 4.0 {
            engine.record_like(user_id, video_id)?;
        }
    }

    println!(
        "Seeded {} videos, 3 users, {} interactions\n",
        engine.catalog().len(),
        interactions.len()
    );

    for user_id in ["data_scientist", "web_dev", "student"] {
        println!("Recommendations for {}:", user_id.cyan());
        let served = engine.serve_recommendations(user_id, 3, None)?;
        for (i, (video, score)) in served.iter().enumerate() {
            println!(
                "  {}. {} {}",
                i + 1,
                video.title.bold(),
                format!("(score {:.3})", score).dimmed()
            );
            println!("     {} · {} views", video.category, video.views);
        }

        let report = engine.effectiveness(Some(user_id))?;
        println!(
            "  served {} · CTR {:.0}% · avg rating {:.2}\n",
            report.total_recommendations,
            report.click_through_rate * 100.0,
            report.avg_rating
        );
    }

    let overall = engine.effectiveness(None)?;
    println!("{}", "Overall system performance:".bold());
    println!("  Total recommendations: {}", overall.total_recommendations);
    println!(
        "  Click-through rate:    {:.2}%",
        overall.click_through_rate * 100.0
    );
    println!("  Average rating:        {:.2}", overall.avg_rating);

    println!("\n{}", "Top videos by views:".bold());
    for (i, (title, views, likes)) in engine.store().top_videos_by_views(3)?.iter().enumerate() {
        println!("  {}. {} ({} views, {} likes)", i + 1, title, views, likes);
    }

    println!("\n{}", "Most watched videos:".bold());
    for (i, (title, count)) in engine.store().most_watched(3)?.iter().enumerate() {
        println!("  {}. {} (watched {} times)", i + 1, title, count);
    }

    println!("\n{}", "User overlap analysis:".bold());
    let overlaps = engine.find_overlaps()?;
    if overlaps.is_empty() {
        println!("  none found");
    }
    for report in &overlaps {
        println!(
            "  {} and {} share {} video(s)",
            report.user_a,
            report.user_b,
            report.common_video_ids.len()
        );
        if !report.transferable_recommendations.is_empty() {
            println!(
                "    transferable from {}: {}",
                report.user_a,
                report.transferable_recommendations.join(", ")
            );
        }
    }

    Ok(())
}
