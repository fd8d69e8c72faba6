//! Effectiveness metrics for served recommendations

use serde::Serialize;

/// Recommendation effectiveness over the trailing analysis window
///
/// A recommendation counts as clicked when its (user, video) pair has at
/// least one watch event, regardless of when the watch happened relative to
/// the recommendation. This matches "recommended and eventually watched",
/// not a causal click metric.
#[derive(Debug, Clone, Serialize)]
pub struct EffectivenessReport {
    pub total_recommendations: i64,
    pub clicked_recommendations: i64,
    pub click_through_rate: f64,
    pub avg_rating: f64,
}

impl EffectivenessReport {
    /// Build a report from raw counters
    ///
    /// An empty window yields an all-zero report, never a division error.
    pub(crate) fn from_counts(total: i64, clicked: i64, avg_rating: f64) -> Self {
        let click_through_rate = if total > 0 {
            clicked as f64 / total as f64
        } else {
            0.0
        };

        Self {
            total_recommendations: total,
            clicked_recommendations: clicked,
            click_through_rate,
            avg_rating,
        }
    }
}
