//! Ranking: score unseen videos for a user
//!
//! Base policy: average content similarity against the user's liked history
//! (watched videos rated at or above the liked threshold). Users with no
//! liked history fall back to similarity against their stated preference
//! keywords; users with no state at all get a popularity ranking. Watched
//! videos are never re-recommended.

use super::UserState;
use crate::config::EngineConfig;
use crate::model::Video;
use crate::similarity::{cosine_similarity, TfidfModel};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Rank candidates for a user, descending, truncated to `limit`
///
/// Ties are broken by view count descending, then id ascending, so repeated
/// calls with unchanged state return identical output.
pub(crate) fn rank(
    catalog: &BTreeMap<String, Video>,
    user: Option<&UserState>,
    model: &TfidfModel,
    config: &EngineConfig,
    limit: usize,
) -> Vec<(Video, f32)> {
    let Some(state) = user else {
        return cold_start(catalog, limit);
    };

    let watched: HashSet<&str> = state
        .watch_history
        .iter()
        .map(|record| record.video_id.as_str())
        .collect();

    // Liked history: watched videos rated at or above the threshold that
    // still resolve in the catalog (dangling ids are skipped).
    let liked_ids: BTreeSet<&str> = state
        .watch_history
        .iter()
        .filter(|record| record.rating.is_some_and(|r| r >= config.liked_threshold))
        .map(|record| record.video_id.as_str())
        .collect();
    let liked_vectors: Vec<&[f32]> = liked_ids
        .iter()
        .filter_map(|id| catalog.get(*id))
        .filter_map(|video| video.embedding.as_deref())
        .collect();

    // Content-only fallback for users with no liked history
    let preference_vector = if liked_vectors.is_empty() {
        preference_keywords(state)
            .filter(|keywords| !keywords.is_empty())
            .map(|keywords| model.transform(&keywords))
    } else {
        None
    };

    let mut ranked: Vec<(Video, f32)> = catalog
        .values()
        .filter(|video| !watched.contains(video.id.as_str()))
        .map(|video| {
            let score = match video.embedding.as_deref() {
                Some(embedding) if !liked_vectors.is_empty() => {
                    let total: f32 = liked_vectors
                        .iter()
                        .map(|liked| cosine_similarity(embedding, liked))
                        .sum();
                    total / liked_vectors.len() as f32
                }
                Some(embedding) => preference_vector
                    .as_deref()
                    .map(|prefs| cosine_similarity(embedding, prefs))
                    .unwrap_or(0.0),
                None => 0.0,
            };
            (video.clone(), score)
        })
        .collect();

    sort_and_truncate(&mut ranked, limit);
    ranked
}

/// Popularity ranking for users with no usable state
///
/// Scores are view counts normalized into [0, 1] against the catalog
/// maximum; an unviewed catalog scores everything 0.0.
pub(crate) fn cold_start(catalog: &BTreeMap<String, Video>, limit: usize) -> Vec<(Video, f32)> {
    let max_views = catalog.values().map(|video| video.views).max().unwrap_or(0);

    let mut ranked: Vec<(Video, f32)> = catalog
        .values()
        .map(|video| {
            let score = if max_views > 0 {
                video.views as f32 / max_views as f32
            } else {
                0.0
            };
            (video.clone(), score)
        })
        .collect();

    sort_and_truncate(&mut ranked, limit);
    ranked
}

/// Keywords from the stated preference document: interests plus preferred
/// categories, joined for vocabulary transform
fn preference_keywords(state: &UserState) -> Option<String> {
    let preferences = state.preferences.as_ref()?;

    let mut keywords: Vec<&str> = Vec::new();
    for key in ["interests", "preferred_categories"] {
        if let Some(values) = preferences.get(key).and_then(|v| v.as_array()) {
            keywords.extend(values.iter().filter_map(|v| v.as_str()));
        }
    }

    Some(keywords.join(" "))
}

fn sort_and_truncate(ranked: &mut Vec<(Video, f32)>, limit: usize) {
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.0.views.cmp(&a.0.views))
            .then_with(|| a.0.id.cmp(&b.0.id))
    });
    ranked.truncate(limit);
}
