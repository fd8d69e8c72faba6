//! Domain types for the recommendation engine
//!
//! These types are storage-agnostic - they don't know about SQLite.
//! The store layer handles serialization/deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A video in the catalog
///
/// `views` and `likes` are increment-only counters driven by watch and like
/// events. `embedding` is derived from the text fields over the current
/// catalog vocabulary and is absent until vectors are computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub duration_secs: i64,
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub creator: String,
    #[serde(skip)]
    pub embedding: Option<Vec<f32>>,
}

impl Video {
    /// Text document used for content vectorization
    ///
    /// Order is fixed: title, description, then tags joined by whitespace.
    pub fn document(&self) -> String {
        let mut doc = String::with_capacity(
            self.title.len() + self.description.len() + self.tags.len() * 8 + 2,
        );
        doc.push_str(&self.title);
        doc.push(' ');
        doc.push_str(&self.description);
        for tag in &self.tags {
            doc.push(' ');
            doc.push_str(tag);
        }
        doc
    }
}

/// A user's stored preference document
///
/// Preferences are an open JSON object - interests list, preferred
/// categories, duration bounds, arbitrary weighted-topic maps. The schema
/// is caller-defined; the engine only reads the keys it understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub preferences: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One watch action, append-only
///
/// A user may watch the same video many times; each watch is its own row.
/// Ratings are optional and not range-validated by the store (1.0-5.0 is
/// the convention the ranker assumes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchEvent {
    pub user_id: String,
    pub video_id: String,
    pub timestamp: DateTime<Utc>,
    pub rating: Option<f64>,
}

/// One like action, append-only at the durable log
///
/// The derived per-user liked set stays duplicate-free; the log does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeEvent {
    pub user_id: String,
    pub video_id: String,
    pub timestamp: DateTime<Utc>,
}

/// One served recommendation, written when a ranking call returns
///
/// Never mutated; consumed only by the effectiveness analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationEvent {
    pub user_id: String,
    pub video_id: String,
    pub score: f32,
    pub timestamp: DateTime<Utc>,
    pub rec_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_document_order() {
        let video = Video {
            id: "v1".to_string(),
            title: "Intro to Rust".to_string(),
            description: "A systems language".to_string(),
            tags: vec!["rust".to_string(), "systems".to_string()],
            category: "Education".to_string(),
            duration_secs: 600,
            upload_date: "2023-01-01".to_string(),
            views: 0,
            likes: 0,
            creator: "tester".to_string(),
            embedding: None,
        };

        assert_eq!(video.document(), "Intro to Rust A systems language rust systems");
    }

    #[test]
    fn test_video_deserialize_defaults() {
        let video: Video =
            serde_json::from_str(r#"{"id": "v1", "title": "Minimal"}"#).unwrap();
        assert_eq!(video.id, "v1");
        assert!(video.tags.is_empty());
        assert_eq!(video.views, 0);
        assert!(video.embedding.is_none());
    }
}
