//! Profile operations: user preference documents
//!
//! Re-creating a profile replaces the preferences document wholesale and
//! refreshes both timestamps - last write wins, no merge. History and likes
//! live in the interaction logs, not here.

use super::Store;
use crate::model::UserProfile;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::params;

impl Store {
    /// Insert or replace a user's preference document
    pub fn upsert_profile(&self, user_id: &str, preferences: &serde_json::Value) -> Result<()> {
        let preferences_json =
            serde_json::to_string(preferences).context("Failed to serialize preferences")?;
        let now = Utc::now();

        self.db.connection().execute(
            "INSERT OR REPLACE INTO user_profiles (user_id, preferences, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
            params![user_id, preferences_json, now, now],
        )?;

        Ok(())
    }

    /// Load all user profiles
    pub fn load_profiles(&self) -> Result<Vec<UserProfile>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT user_id, preferences, created_at, updated_at FROM user_profiles ORDER BY user_id",
        )?;

        let profiles = stmt
            .query_map([], |row| {
                let preferences_json: Option<String> = row.get(1)?;
                Ok(UserProfile {
                    user_id: row.get(0)?,
                    preferences: preferences_json
                        .and_then(|json| serde_json::from_str(&json).ok())
                        .unwrap_or_else(|| serde_json::json!({})),
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_roundtrip() -> Result<()> {
        let store = Store::open_in_memory()?;

        let preferences = json!({
            "interests": ["python", "machine learning"],
            "preferred_categories": ["Education"],
            "min_duration": 600,
        });
        store.upsert_profile("user123", &preferences)?;

        let profiles = store.load_profiles()?;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].user_id, "user123");
        assert_eq!(profiles[0].preferences, preferences);

        Ok(())
    }

    #[test]
    fn test_upsert_replaces_preferences_entirely() -> Result<()> {
        let store = Store::open_in_memory()?;

        store.upsert_profile("user123", &json!({"interests": ["python"], "level": "advanced"}))?;
        store.upsert_profile("user123", &json!({"interests": ["cooking"]}))?;

        let profiles = store.load_profiles()?;
        assert_eq!(profiles.len(), 1);
        // No merge: the old "level" key is gone
        assert_eq!(profiles[0].preferences, json!({"interests": ["cooking"]}));

        Ok(())
    }
}
