//! vidrec - content-based video recommendation with feedback learning
//!
//! A single-process engine that ranks unseen videos for a user by blending
//! TF-IDF content similarity with behavioral signals (ratings, likes), all
//! persisted in SQLite. Served recommendations are logged and later joined
//! against watch events to measure how well the ranking works.

pub mod config;
pub mod db;
pub mod engine;
pub mod model;
pub mod similarity;
pub mod store;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{EffectivenessReport, OverlapReport, Recommender};
pub use model::Video;
pub use store::Store;
