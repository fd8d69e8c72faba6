//! Recommendation engine
//!
//! `Recommender` owns the durable store and the in-memory views derived
//! from it. Every mutation writes through to SQLite before touching memory;
//! `reload` is the only path that populates the derived views from durable
//! state, and it fully replaces them. Single-threaded by design - one
//! logical writer, no background work.

mod effectiveness;
mod overlap;
mod ranker;

pub use effectiveness::EffectivenessReport;
pub use overlap::OverlapReport;

use crate::config::EngineConfig;
use crate::model::Video;
use crate::similarity::{self, TfidfModel};
use crate::store::Store;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One entry in a user's derived watch-history view
#[derive(Debug, Clone)]
pub struct WatchRecord {
    pub video_id: String,
    pub timestamp: DateTime<Utc>,
    pub rating: Option<f64>,
}

/// Derived per-user state: stored preferences plus views materialized from
/// the interaction logs
///
/// `watch_history` is most-recent-first; `liked` is insertion-ordered and
/// duplicate-free. Entries can exist without a preferences document - a
/// watch or like for a user with no profile creates the in-memory entry
/// lazily without ever writing a phantom profile row.
#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub preferences: Option<serde_json::Value>,
    pub watch_history: Vec<WatchRecord>,
    pub liked: Vec<String>,
}

/// The recommendation engine: catalog, profiles, feedback loop
pub struct Recommender {
    store: Store,
    config: EngineConfig,
    catalog: BTreeMap<String, Video>,
    users: HashMap<String, UserState>,
    model: Option<TfidfModel>,
    vectors_stale: bool,
}

impl Recommender {
    /// Create an engine over an already-open store with default policy
    pub fn new(store: Store) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with explicit policy
    pub fn with_config(store: Store, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            catalog: BTreeMap::new(),
            users: HashMap::new(),
            model: None,
            vectors_stale: true,
        }
    }

    /// Open the store at `path` and hydrate the in-memory views
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Store::open(path)?;
        let mut engine = Self::new(store);
        engine.reload()?;
        Ok(engine)
    }

    /// Get reference to the underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get the active policy
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The in-memory catalog, keyed by video id
    pub fn catalog(&self) -> &BTreeMap<String, Video> {
        &self.catalog
    }

    /// A user's derived state, if any interaction or profile created one
    pub fn user_state(&self, user_id: &str) -> Option<&UserState> {
        self.users.get(user_id)
    }

    /// Rehydrate all in-memory views from durable storage
    ///
    /// Fully replaces prior in-memory state - never merges - so calling it
    /// twice with no intervening writes is a no-op. History and likes attach
    /// only to users with a profile row; event rows referencing unknown
    /// users or videos are tolerated and skipped.
    pub fn reload(&mut self) -> Result<()> {
        let videos = self.store.load_videos().context("Failed to load catalog")?;
        let profiles = self
            .store
            .load_profiles()
            .context("Failed to load user profiles")?;

        let mut catalog = BTreeMap::new();
        for video in videos {
            catalog.insert(video.id.clone(), video);
        }

        let mut users: HashMap<String, UserState> = HashMap::new();
        for profile in profiles {
            users.insert(
                profile.user_id,
                UserState {
                    preferences: Some(profile.preferences),
                    ..Default::default()
                },
            );
        }

        // Watch events come back most-recent-first; appending preserves that
        for event in self.store.load_watch_events()? {
            if let Some(state) = users.get_mut(&event.user_id) {
                state.watch_history.push(WatchRecord {
                    video_id: event.video_id,
                    timestamp: event.timestamp,
                    rating: event.rating,
                });
            }
        }

        for event in self.store.load_like_events()? {
            if let Some(state) = users.get_mut(&event.user_id) {
                if !state.liked.contains(&event.video_id) {
                    state.liked.push(event.video_id);
                }
            }
        }

        self.catalog = catalog;
        self.users = users;
        self.model = None;
        self.vectors_stale = true;
        Ok(())
    }

    /// Add a video to the catalog, writing through to the store
    ///
    /// Replaces any existing video with the same id. Invalidates the content
    /// vectors: the corpus vocabulary changed.
    pub fn ingest_video(&mut self, video: Video) -> Result<()> {
        self.store
            .upsert_video(&video)
            .with_context(|| format!("Failed to persist video {}", video.id))?;
        self.catalog.insert(video.id.clone(), video);
        self.vectors_stale = true;
        Ok(())
    }

    /// Create or replace a user's preference document
    ///
    /// Write-through; replaces preferences wholesale and leaves the derived
    /// history/likes views untouched.
    pub fn upsert_profile(&mut self, user_id: &str, preferences: serde_json::Value) -> Result<()> {
        self.store
            .upsert_profile(user_id, &preferences)
            .with_context(|| format!("Failed to persist profile {}", user_id))?;
        self.users.entry(user_id.to_string()).or_default().preferences = Some(preferences);
        Ok(())
    }

    /// Record a watch event, with an optional rating (1.0-5.0 by convention)
    ///
    /// Appends to the durable log, bumps the video's view counter, and
    /// prepends to the user's in-memory history.
    pub fn record_watch(
        &mut self,
        user_id: &str,
        video_id: &str,
        rating: Option<f64>,
    ) -> Result<()> {
        let timestamp = Utc::now();
        self.store
            .append_watch(user_id, video_id, rating, timestamp)
            .with_context(|| format!("Failed to record watch of {} by {}", video_id, user_id))?;

        if let Some(video) = self.catalog.get_mut(video_id) {
            video.views += 1;
        }

        let state = self.users.entry(user_id.to_string()).or_default();
        state.watch_history.insert(
            0,
            WatchRecord {
                video_id: video_id.to_string(),
                timestamp,
                rating,
            },
        );

        Ok(())
    }

    /// Record a like event
    ///
    /// The durable log grows on every call; the in-memory liked set only
    /// gains ids it does not already hold.
    pub fn record_like(&mut self, user_id: &str, video_id: &str) -> Result<()> {
        self.store
            .append_like(user_id, video_id, Utc::now())
            .with_context(|| format!("Failed to record like of {} by {}", video_id, user_id))?;

        if let Some(video) = self.catalog.get_mut(video_id) {
            video.likes += 1;
        }

        let state = self.users.entry(user_id.to_string()).or_default();
        if !state.liked.iter().any(|id| id == video_id) {
            state.liked.push(video_id.to_string());
        }

        Ok(())
    }

    /// Recompute content vectors over the full current catalog
    ///
    /// Fits the TF-IDF model, caches a vector onto every video, and persists
    /// the embeddings in one transaction. Ranking never sees a
    /// partially-updated vocabulary: the swap happens only after the whole
    /// batch is computed.
    pub fn rebuild_vectors(&mut self) -> Result<()> {
        let videos: Vec<Video> = self.catalog.values().cloned().collect();
        let (model, vectors) = similarity::compute_vectors(&videos);

        self.store
            .save_embeddings(
                vectors
                    .iter()
                    .map(|(id, vector)| (id.as_str(), vector.as_slice())),
            )
            .context("Failed to persist embeddings")?;

        for (id, vector) in vectors {
            if let Some(video) = self.catalog.get_mut(&id) {
                video.embedding = Some(vector);
            }
        }

        self.model = Some(model);
        self.vectors_stale = false;
        Ok(())
    }

    fn ensure_vectors(&mut self) -> Result<()> {
        if self.vectors_stale || self.model.is_none() {
            self.rebuild_vectors()?;
        }
        Ok(())
    }

    /// Rank unseen videos for a user, descending by score
    ///
    /// No side effects beyond refreshing stale content vectors; serving and
    /// logging compose in `serve_recommendations`. A user with no state at
    /// all gets the popularity cold-start ranking.
    pub fn recommend(&mut self, user_id: &str, limit: usize) -> Result<Vec<(Video, f32)>> {
        self.ensure_vectors()?;
        let Some(model) = self.model.as_ref() else {
            anyhow::bail!("content model missing after vector rebuild");
        };

        Ok(ranker::rank(
            &self.catalog,
            self.users.get(user_id),
            model,
            &self.config,
            limit,
        ))
    }

    /// Rank, log, and return: the serving composition
    ///
    /// Every returned (video, score) pair is written to the recommendation
    /// log in one transaction before anything is returned; a logging failure
    /// fails the call.
    pub fn serve_recommendations(
        &mut self,
        user_id: &str,
        limit: usize,
        rec_type: Option<&str>,
    ) -> Result<Vec<(Video, f32)>> {
        let recommendations = self.recommend(user_id, limit)?;

        let rec_type = rec_type.unwrap_or(&self.config.default_rec_type);
        let scored: Vec<(String, f32)> = recommendations
            .iter()
            .map(|(video, score)| (video.id.clone(), *score))
            .collect();
        self.store
            .append_recommendations(user_id, &scored, rec_type, Utc::now())
            .context("Failed to log served recommendations")?;

        Ok(recommendations)
    }

    /// Effectiveness of recommendations served in the trailing window,
    /// optionally scoped to one user
    pub fn effectiveness(&self, user_id: Option<&str>) -> Result<EffectivenessReport> {
        let cutoff = Utc::now() - Duration::days(self.config.effectiveness_window_days);
        let (total, clicked, avg_rating) = self
            .store
            .recommendation_effectiveness(cutoff, user_id)
            .context("Failed to analyze recommendation logs")?;

        Ok(EffectivenessReport::from_counts(total, clicked, avg_rating))
    }

    /// Cross-user overlap report over all raters
    pub fn find_overlaps(&self) -> Result<Vec<OverlapReport>> {
        let rated = self.store.rated_watch_rows()?;
        let watched = self.store.watched_pairs()?;
        Ok(overlap::find_overlaps(
            &rated,
            &watched,
            self.config.liked_threshold,
        ))
    }
}
