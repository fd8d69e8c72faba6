//! Content similarity engine
//!
//! Derives a TF-IDF vector per video from its text fields (title,
//! description, tags) and scores video pairs with cosine similarity.
//! Vectors are corpus-relative: any change to catalog membership or text
//! requires a full recompute, and ranking must never observe a
//! partially-updated vocabulary.

pub mod metrics;
pub mod tfidf;

pub use metrics::cosine_similarity;
pub use tfidf::{tokenize, TfidfModel};

use crate::model::Video;
use std::collections::HashMap;

/// Fit a TF-IDF model over the catalog and compute one vector per video
///
/// Videos with no text content get a zero vector rather than failing the
/// batch. Returns the fitted model alongside the per-video vectors so
/// callers can transform further texts (e.g. preference keywords) into the
/// same space.
pub fn compute_vectors(videos: &[Video]) -> (TfidfModel, HashMap<String, Vec<f32>>) {
    let docs: Vec<String> = videos.iter().map(|v| v.document()).collect();
    let model = TfidfModel::fit(&docs);

    let vectors = model.transform_batch(&docs);
    let by_id = videos
        .iter()
        .zip(vectors)
        .map(|(video, vector)| (video.id.clone(), vector))
        .collect();

    (model, by_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn video(id: &str, title: &str, tags: &[&str]) -> Video {
        Video {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: String::new(),
            duration_secs: 0,
            upload_date: String::new(),
            views: 0,
            likes: 0,
            creator: String::new(),
            embedding: None,
        }
    }

    #[test]
    fn test_compute_vectors_covers_all_videos() {
        let videos = vec![
            video("a", "Python ML tutorial", &["python", "ml"]),
            video("b", "Cooking pasta", &["cooking", "pasta"]),
        ];

        let (model, vectors) = compute_vectors(&videos);
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors["a"].len(), model.dimension());
    }

    #[test]
    fn test_textless_video_gets_zero_vector() {
        let videos = vec![
            video("a", "Python ML tutorial", &["python"]),
            video("empty", "", &[]),
        ];

        let (_, vectors) = compute_vectors(&videos);
        assert!(vectors["empty"].iter().all(|&v| v == 0.0));
        assert_relative_eq!(
            cosine_similarity(&vectors["empty"], &vectors["a"]),
            0.0,
            epsilon = 1e-6
        );
    }
}
