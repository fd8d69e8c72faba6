use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Content-based video recommendations with feedback learning", long_about = None)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, default_value = "video_recommendations.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add videos to the catalog from a JSON file
    Ingest {
        /// JSON file holding one video object or an array of them
        file: PathBuf,
    },

    /// Create or replace a user's preference document
    Profile {
        /// User id
        user_id: String,

        /// Preferences as a JSON object
        #[arg(long)]
        preferences: String,
    },

    /// Record that a user watched a video
    Watch {
        /// User id
        user_id: String,

        /// Video id
        video_id: String,

        /// Rating, 1.0-5.0 by convention
        #[arg(long)]
        rating: Option<f64>,
    },

    /// Record that a user liked a video
    Like {
        /// User id
        user_id: String,

        /// Video id
        video_id: String,
    },

    /// Serve ranked recommendations for a user (logs what it returns)
    Recommend {
        /// User id
        user_id: String,

        /// Maximum number of recommendations
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Tag written to the recommendation log
        #[arg(long = "type")]
        rec_type: Option<String>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Analyze how served recommendations performed
    Effectiveness {
        /// Restrict the analysis to one user
        #[arg(long)]
        user: Option<String>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Find users with overlapping watch history
    Overlaps {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Seed sample data and run the interaction simulation
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { file } => commands::ingest::execute(&cli.db, &file),
        Commands::Profile {
            user_id,
            preferences,
        } => commands::profile::execute(&cli.db, &user_id, &preferences),
        Commands::Watch {
            user_id,
            video_id,
            rating,
        } => commands::interact::watch(&cli.db, &user_id, &video_id, rating),
        Commands::Like { user_id, video_id } => {
            commands::interact::like(&cli.db, &user_id, &video_id)
        }
        Commands::Recommend {
            user_id,
            limit,
            rec_type,
            json,
        } => commands::recommend::execute(&cli.db, &user_id, limit, rec_type.as_deref(), json),
        Commands::Effectiveness { user, json } => {
            commands::report::execute(&cli.db, user.as_deref(), json)
        }
        Commands::Overlaps { json } => commands::overlaps::execute(&cli.db, json),
        Commands::Demo => commands::demo::execute(&cli.db),
    }
}
