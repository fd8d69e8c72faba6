//! Catalog operations: video rows and their counters
//!
//! The engine is the only writer of views/likes, and only through
//! `bump_video_stats`; counters never decrease in normal operation.

use super::Store;
use crate::db::{bytes_to_vector, vector_to_bytes};
use crate::model::Video;
use anyhow::{Context, Result};
use rusqlite::params;

impl Store {
    /// Insert or replace a video row
    ///
    /// Tags serialize to a JSON array (an empty list round-trips as `[]`);
    /// the embedding, when present, serializes to a little-endian f32 BLOB.
    pub fn upsert_video(&self, video: &Video) -> Result<()> {
        let tags_json =
            serde_json::to_string(&video.tags).context("Failed to serialize video tags")?;
        let embedding_bytes = video.embedding.as_ref().map(|e| vector_to_bytes(e));

        self.db.connection().execute(
            "INSERT OR REPLACE INTO videos
             (id, title, description, tags, category, duration, upload_date,
              views, likes, creator, embedding)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                video.id,
                video.title,
                video.description,
                tags_json,
                video.category,
                video.duration_secs,
                video.upload_date,
                video.views,
                video.likes,
                video.creator,
                embedding_bytes,
            ],
        )?;

        Ok(())
    }

    /// Load the full catalog
    pub fn load_videos(&self) -> Result<Vec<Video>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT id, title, description, tags, category, duration, upload_date,
                    views, likes, creator, embedding
             FROM videos ORDER BY id",
        )?;

        let videos = stmt
            .query_map([], |row| {
                let tags_json: Option<String> = row.get(3)?;
                let embedding_bytes: Option<Vec<u8>> = row.get(10)?;

                Ok(Video {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    tags: tags_json
                        .and_then(|json| serde_json::from_str(&json).ok())
                        .unwrap_or_default(),
                    category: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    duration_secs: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
                    upload_date: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                    views: row.get(7)?,
                    likes: row.get(8)?,
                    creator: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
                    embedding: embedding_bytes.map(|bytes| bytes_to_vector(&bytes)),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(videos)
    }

    /// Increment a video's view/like counters
    ///
    /// A dangling video id updates zero rows; that is tolerated, not an error.
    pub fn bump_video_stats(&self, video_id: &str, views_delta: i64, likes_delta: i64) -> Result<()> {
        self.db.connection().execute(
            "UPDATE videos SET views = views + ?, likes = likes + ? WHERE id = ?",
            params![views_delta, likes_delta, video_id],
        )?;
        Ok(())
    }

    /// Persist computed embeddings for the whole catalog in one transaction
    pub fn save_embeddings<'a, I>(&self, embeddings: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a [f32])>,
    {
        let conn = self.db.connection();
        let tx = conn.unchecked_transaction()?;

        {
            let mut stmt = tx.prepare("UPDATE videos SET embedding = ? WHERE id = ?")?;
            for (video_id, vector) in embeddings {
                stmt.execute(params![vector_to_bytes(vector), video_id])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Top videos by view count
    pub fn top_videos_by_views(&self, limit: usize) -> Result<Vec<(String, i64, i64)>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT title, views, likes FROM videos ORDER BY views DESC, id LIMIT ?",
        )?;

        let rows = stmt
            .query_map([limit], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video(id: &str) -> Video {
        Video {
            id: id.to_string(),
            title: "Python Machine Learning Tutorial".to_string(),
            description: "Learn machine learning with Python from scratch".to_string(),
            tags: vec!["python".to_string(), "machine learning".to_string()],
            category: "Education".to_string(),
            duration_secs: 1800,
            upload_date: "2023-01-15".to_string(),
            views: 150_000,
            likes: 5_000,
            creator: "ML Academy".to_string(),
            embedding: None,
        }
    }

    #[test]
    fn test_video_roundtrip() -> Result<()> {
        let store = Store::open_in_memory()?;

        let mut video = sample_video("vid1");
        video.embedding = Some(vec![0.25, -0.5, 1.0]);
        store.upsert_video(&video)?;

        let loaded = store.load_videos()?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, video.id);
        assert_eq!(loaded[0].title, video.title);
        assert_eq!(loaded[0].description, video.description);
        assert_eq!(loaded[0].tags, video.tags);
        assert_eq!(loaded[0].category, video.category);
        assert_eq!(loaded[0].duration_secs, video.duration_secs);
        assert_eq!(loaded[0].upload_date, video.upload_date);
        assert_eq!(loaded[0].views, video.views);
        assert_eq!(loaded[0].likes, video.likes);
        assert_eq!(loaded[0].creator, video.creator);
        assert_eq!(loaded[0].embedding, video.embedding);

        Ok(())
    }

    #[test]
    fn test_empty_tags_roundtrip() -> Result<()> {
        let store = Store::open_in_memory()?;

        let mut video = sample_video("vid1");
        video.tags = vec![];
        store.upsert_video(&video)?;

        let loaded = store.load_videos()?;
        assert!(loaded[0].tags.is_empty());

        Ok(())
    }

    #[test]
    fn test_upsert_replaces_existing_row() -> Result<()> {
        let store = Store::open_in_memory()?;

        store.upsert_video(&sample_video("vid1"))?;

        let mut updated = sample_video("vid1");
        updated.title = "Updated Title".to_string();
        store.upsert_video(&updated)?;

        let loaded = store.load_videos()?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Updated Title");

        Ok(())
    }

    #[test]
    fn test_bump_video_stats() -> Result<()> {
        let store = Store::open_in_memory()?;
        store.upsert_video(&sample_video("vid1"))?;

        store.bump_video_stats("vid1", 1, 0)?;
        store.bump_video_stats("vid1", 0, 1)?;

        let loaded = store.load_videos()?;
        assert_eq!(loaded[0].views, 150_001);
        assert_eq!(loaded[0].likes, 5_001);

        // Dangling id is a no-op
        store.bump_video_stats("missing", 1, 0)?;

        Ok(())
    }

    #[test]
    fn test_save_embeddings_batch() -> Result<()> {
        let store = Store::open_in_memory()?;
        store.upsert_video(&sample_video("vid1"))?;
        store.upsert_video(&sample_video("vid2"))?;

        let v1 = vec![1.0f32, 0.0];
        let v2 = vec![0.0f32, 1.0];
        store.save_embeddings(vec![("vid1", v1.as_slice()), ("vid2", v2.as_slice())])?;

        let loaded = store.load_videos()?;
        assert_eq!(loaded[0].embedding.as_deref(), Some(v1.as_slice()));
        assert_eq!(loaded[1].embedding.as_deref(), Some(v2.as_slice()));

        Ok(())
    }

    #[test]
    fn test_top_videos_by_views() -> Result<()> {
        let store = Store::open_in_memory()?;

        let mut a = sample_video("a");
        a.views = 10;
        let mut b = sample_video("b");
        b.views = 30;
        let mut c = sample_video("c");
        c.views = 20;
        for video in [&a, &b, &c] {
            store.upsert_video(video)?;
        }

        let top = store.top_videos_by_views(2)?;
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].1, 30);
        assert_eq!(top[1].1, 20);

        Ok(())
    }
}
