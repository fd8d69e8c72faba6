//! Engine configuration

/// Tunable policy for the recommendation engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum rating for a watched video to count as liked history
    pub liked_threshold: f64,
    /// Trailing window for effectiveness analysis, in days
    pub effectiveness_window_days: i64,
    /// Tag written to recommendation logs when the caller gives none
    pub default_rec_type: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            liked_threshold: 4.0,
            effectiveness_window_days: 30,
            default_rec_type: "personalized".to_string(),
        }
    }
}
