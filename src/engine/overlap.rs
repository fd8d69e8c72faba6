//! Cross-user overlap analysis
//!
//! A simple collaborative-filtering signal: for users whose watch sets
//! intersect, surface the videos one rated highly that the other has not
//! seen. The pairwise scan is O(U^2 * V) over users and per-user watch
//! sets; at larger user counts an inverted index from video id to watching
//! users would replace the pair enumeration.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Overlap between one unordered pair of users
///
/// `transferable_recommendations` are videos `user_a` rated at or above the
/// liked threshold that `user_b` has not watched.
#[derive(Debug, Clone, Serialize)]
pub struct OverlapReport {
    pub user_a: String,
    pub user_b: String,
    pub common_video_ids: Vec<String>,
    pub transferable_recommendations: Vec<String>,
}

/// Find overlapping user pairs from raw interaction rows
///
/// `rated` holds (user, video, rating) rows; `watched` holds every
/// (user, video) watch pair. Only users with at least one rated watch are
/// paired. Users are processed in sorted order and video lists come out
/// sorted, so the output is deterministic.
pub(crate) fn find_overlaps(
    rated: &[(String, String, f64)],
    watched: &[(String, String)],
    liked_threshold: f64,
) -> Vec<OverlapReport> {
    let mut watched_sets: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for (user_id, video_id) in watched {
        watched_sets
            .entry(user_id.as_str())
            .or_default()
            .insert(video_id.as_str());
    }

    // Best rating per (user, video); repeated watches keep the max
    let mut best_ratings: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
    for (user_id, video_id, rating) in rated {
        let entry = best_ratings
            .entry(user_id.as_str())
            .or_default()
            .entry(video_id.as_str())
            .or_insert(*rating);
        if *rating > *entry {
            *entry = *rating;
        }
    }

    let users: Vec<&str> = best_ratings.keys().copied().collect();
    let mut reports = Vec::new();

    for (i, &user_a) in users.iter().enumerate() {
        for &user_b in &users[i + 1..] {
            let set_a = watched_sets.get(user_a);
            let set_b = watched_sets.get(user_b);
            let (Some(set_a), Some(set_b)) = (set_a, set_b) else {
                continue;
            };

            let common: Vec<String> =
                set_a.intersection(set_b).map(|id| id.to_string()).collect();
            if common.is_empty() {
                continue;
            }

            let transferable: Vec<String> = best_ratings[user_a]
                .iter()
                .filter(|(video_id, rating)| {
                    **rating >= liked_threshold && !set_b.contains(**video_id)
                })
                .map(|(video_id, _)| video_id.to_string())
                .collect();

            reports.push(OverlapReport {
                user_a: user_a.to_string(),
                user_b: user_b.to_string(),
                common_video_ids: common,
                transferable_recommendations: transferable,
            });
        }
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_with_transferable() {
        let rated = vec![
            ("u1".to_string(), "x".to_string(), 4.5),
            ("u1".to_string(), "y".to_string(), 4.8),
            ("u2".to_string(), "x".to_string(), 3.0),
        ];
        let watched = vec![
            ("u1".to_string(), "x".to_string()),
            ("u1".to_string(), "y".to_string()),
            ("u2".to_string(), "x".to_string()),
        ];

        let reports = find_overlaps(&rated, &watched, 4.0);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].user_a, "u1");
        assert_eq!(reports[0].user_b, "u2");
        assert_eq!(reports[0].common_video_ids, vec!["x"]);
        assert_eq!(reports[0].transferable_recommendations, vec!["y"]);
    }

    #[test]
    fn test_disjoint_watch_sets_skipped() {
        let rated = vec![
            ("u1".to_string(), "a".to_string(), 5.0),
            ("u2".to_string(), "b".to_string(), 5.0),
        ];
        let watched = vec![
            ("u1".to_string(), "a".to_string()),
            ("u2".to_string(), "b".to_string()),
        ];

        assert!(find_overlaps(&rated, &watched, 4.0).is_empty());
    }

    #[test]
    fn test_unrated_watches_widen_common_set() {
        // u2 watched y without rating it: y still shows up as common,
        // and is no longer transferable from u1.
        let rated = vec![
            ("u1".to_string(), "x".to_string(), 4.5),
            ("u1".to_string(), "y".to_string(), 4.8),
            ("u2".to_string(), "x".to_string(), 2.0),
        ];
        let watched = vec![
            ("u1".to_string(), "x".to_string()),
            ("u1".to_string(), "y".to_string()),
            ("u2".to_string(), "x".to_string()),
            ("u2".to_string(), "y".to_string()),
        ];

        let reports = find_overlaps(&rated, &watched, 4.0);
        assert_eq!(reports[0].common_video_ids, vec!["x", "y"]);
        assert!(reports[0].transferable_recommendations.is_empty());
    }

    #[test]
    fn test_repeated_watches_keep_max_rating() {
        let rated = vec![
            ("u1".to_string(), "x".to_string(), 2.0),
            ("u1".to_string(), "x".to_string(), 4.5),
            ("u2".to_string(), "x".to_string(), 3.0),
        ];
        let watched = vec![
            ("u1".to_string(), "x".to_string()),
            ("u2".to_string(), "x".to_string()),
        ];

        let reports = find_overlaps(&rated, &watched, 4.0);
        // x is common, so nothing transfers; the max rating still counts
        assert_eq!(reports.len(), 1);
        assert!(reports[0].transferable_recommendations.is_empty());
    }

    #[test]
    fn test_users_without_ratings_not_paired() {
        let rated = vec![("u1".to_string(), "x".to_string(), 4.5)];
        let watched = vec![
            ("u1".to_string(), "x".to_string()),
            ("u3".to_string(), "x".to_string()),
        ];

        // u3 watched x but never rated anything, so no pair forms
        assert!(find_overlaps(&rated, &watched, 4.0).is_empty());
    }

    #[test]
    fn test_output_is_sorted_and_deterministic() {
        let rated = vec![
            ("zeta".to_string(), "x".to_string(), 4.5),
            ("alpha".to_string(), "x".to_string(), 4.5),
        ];
        let watched = vec![
            ("zeta".to_string(), "x".to_string()),
            ("alpha".to_string(), "x".to_string()),
        ];

        let reports = find_overlaps(&rated, &watched, 4.0);
        assert_eq!(reports[0].user_a, "alpha");
        assert_eq!(reports[0].user_b, "zeta");
    }
}
