//! Interaction logs: watch, like, and served-recommendation events
//!
//! All three logs are append-only. Each append that also touches a video
//! counter runs as one transaction, and a served recommendation list is
//! committed atomically - a returned-but-unlogged recommendation must be
//! impossible.

use super::Store;
use crate::model::{LikeEvent, WatchEvent};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;

impl Store {
    /// Append a watch event and bump the video's view counter atomically
    pub fn append_watch(
        &self,
        user_id: &str,
        video_id: &str,
        rating: Option<f64>,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let conn = self.db.connection();
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO watch_history (user_id, video_id, timestamp, rating)
             VALUES (?, ?, ?, ?)",
            params![user_id, video_id, timestamp, rating],
        )?;
        tx.execute(
            "UPDATE videos SET views = views + 1 WHERE id = ?",
            params![video_id],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Append a like event and bump the video's like counter atomically
    ///
    /// Repeated likes for the same (user, video) each produce a new log row;
    /// deduplication happens only in the derived in-memory liked set.
    pub fn append_like(
        &self,
        user_id: &str,
        video_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let conn = self.db.connection();
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO liked_videos (user_id, video_id, timestamp) VALUES (?, ?, ?)",
            params![user_id, video_id, timestamp],
        )?;
        tx.execute(
            "UPDATE videos SET likes = likes + 1 WHERE id = ?",
            params![video_id],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Log a served recommendation list in one transaction
    pub fn append_recommendations(
        &self,
        user_id: &str,
        scored: &[(String, f32)],
        rec_type: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        if scored.is_empty() {
            return Ok(());
        }

        let conn = self.db.connection();
        let tx = conn.unchecked_transaction()?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO recommendation_logs
                 (user_id, video_id, recommendation_score, timestamp, recommendation_type)
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            for (video_id, score) in scored {
                stmt.execute(params![user_id, video_id, score, timestamp, rec_type])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Load all watch events, most recent first
    pub fn load_watch_events(&self) -> Result<Vec<WatchEvent>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT user_id, video_id, timestamp, rating
             FROM watch_history ORDER BY timestamp DESC, id DESC",
        )?;

        let events = stmt
            .query_map([], |row| {
                Ok(WatchEvent {
                    user_id: row.get(0)?,
                    video_id: row.get(1)?,
                    timestamp: row.get(2)?,
                    rating: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Load all like events in insertion order
    pub fn load_like_events(&self) -> Result<Vec<LikeEvent>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT user_id, video_id, timestamp FROM liked_videos ORDER BY id",
        )?;

        let events = stmt
            .query_map([], |row| {
                Ok(LikeEvent {
                    user_id: row.get(0)?,
                    video_id: row.get(1)?,
                    timestamp: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Effectiveness counters over recommendations served since `cutoff`
    ///
    /// Returns (total, clicked, avg_rating). "Clicked" means the (user, video)
    /// pair has at least one watch event at any time; rating presence is
    /// independent of that determination. avg_rating averages the non-null
    /// ratings of matched watch rows and is 0.0 when there are none.
    pub fn recommendation_effectiveness(
        &self,
        cutoff: DateTime<Utc>,
        user_id: Option<&str>,
    ) -> Result<(i64, i64, f64)> {
        let conn = self.db.connection();

        let user_filter = if user_id.is_some() {
            " AND r.user_id = ?2"
        } else {
            ""
        };

        let total_sql = format!(
            "SELECT COUNT(*) FROM recommendation_logs r WHERE r.timestamp >= ?1{}",
            user_filter
        );
        let clicked_sql = format!(
            "SELECT COUNT(*) FROM recommendation_logs r
             WHERE r.timestamp >= ?1{}
               AND EXISTS (SELECT 1 FROM watch_history w
                           WHERE w.user_id = r.user_id AND w.video_id = r.video_id)",
            user_filter
        );
        let rating_sql = format!(
            "SELECT AVG(w.rating)
             FROM recommendation_logs r
             JOIN watch_history w ON w.user_id = r.user_id AND w.video_id = r.video_id
             WHERE r.timestamp >= ?1{} AND w.rating IS NOT NULL",
            user_filter
        );

        let (total, clicked, avg_rating) = match user_id {
            Some(user) => (
                conn.query_row(&total_sql, params![cutoff, user], |row| row.get::<_, i64>(0))?,
                conn.query_row(&clicked_sql, params![cutoff, user], |row| row.get::<_, i64>(0))?,
                conn.query_row(&rating_sql, params![cutoff, user], |row| {
                    row.get::<_, Option<f64>>(0)
                })?,
            ),
            None => (
                conn.query_row(&total_sql, params![cutoff], |row| row.get::<_, i64>(0))?,
                conn.query_row(&clicked_sql, params![cutoff], |row| row.get::<_, i64>(0))?,
                conn.query_row(&rating_sql, params![cutoff], |row| {
                    row.get::<_, Option<f64>>(0)
                })?,
            ),
        };

        Ok((total, clicked, avg_rating.unwrap_or(0.0)))
    }

    /// All rated watch rows: (user_id, video_id, rating)
    pub fn rated_watch_rows(&self) -> Result<Vec<(String, String, f64)>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT user_id, video_id, rating FROM watch_history
             WHERE rating IS NOT NULL ORDER BY user_id, id",
        )?;

        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// All (user_id, video_id) watch pairs, rated or not
    pub fn watched_pairs(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT user_id, video_id FROM watch_history ORDER BY user_id, id")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Most-watched videos by watch-event count
    pub fn most_watched(&self, limit: usize) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT v.title, COUNT(w.video_id) AS watch_count
             FROM videos v
             LEFT JOIN watch_history w ON v.id = w.video_id
             GROUP BY v.id, v.title
             ORDER BY watch_count DESC, v.id
             LIMIT ?",
        )?;

        let rows = stmt
            .query_map([limit], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
