//! Per-user chat history, persisted as one append-only JSON array file per
//! username under a configurable root directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use mentor_types::MentorError;

// ---------------------------------------------------------------------------
// HistoryEntry
// ---------------------------------------------------------------------------

/// One question/answer exchange, timestamped at persist time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub answer: String,
}

impl HistoryEntry {
    pub fn now(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryStore
// ---------------------------------------------------------------------------

/// Flat-file store: `<root>/<username>.json` holding a JSON array of
/// [`HistoryEntry`]. The root directory is created on first append.
///
/// Appends are read-modify-rewrite, serialized by a store-level lock so
/// concurrent requests for the same user cannot drop each other's entries.
pub struct HistoryStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Appends one entry to the user's history, creating the root directory
    /// and the user's file as needed.
    pub async fn append(&self, user: &str, entry: HistoryEntry) -> Result<(), MentorError> {
        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.root).await?;
        let mut entries = self.load(user).await?;
        entries.push(entry);
        let path = self.user_file(user);
        tokio::fs::write(&path, serde_json::to_vec_pretty(&entries)?).await?;
        tracing::debug!(user, entries = entries.len(), path = %path.display(), "history appended");
        Ok(())
    }

    /// Loads the user's full history; a user with no file has an empty one.
    pub async fn load(&self, user: &str) -> Result<Vec<HistoryEntry>, MentorError> {
        match tokio::fs::read(self.user_file(user)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn user_file(&self, user: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_username(user)))
    }
}

/// Restricts usernames to a filename-safe alphabet so a crafted name cannot
/// point outside the history root.
fn sanitize_username(user: &str) -> String {
    let cleaned: String = user
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history"));
        (dir, store)
    }

    #[tokio::test]
    async fn append_then_load_round_trips() {
        let (_dir, store) = store();
        store
            .append("ada", HistoryEntry::now("What is Send?", "A marker trait."))
            .await
            .unwrap();
        store
            .append("ada", HistoryEntry::now("And Sync?", "Shared-reference safety."))
            .await
            .unwrap();

        let entries = store.load("ada").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "What is Send?");
        assert_eq!(entries[1].answer, "Shared-reference safety.");
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }

    #[tokio::test]
    async fn unknown_user_has_empty_history() {
        let (_dir, store) = store();
        let entries = store.load("nobody").await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn histories_are_isolated_per_user() {
        let (_dir, store) = store();
        store
            .append("ada", HistoryEntry::now("q1", "a1"))
            .await
            .unwrap();
        store
            .append("grace", HistoryEntry::now("q2", "a2"))
            .await
            .unwrap();

        assert_eq!(store.load("ada").await.unwrap().len(), 1);
        assert_eq!(store.load("grace").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn crafted_username_stays_inside_root() {
        let (_dir, store) = store();
        store
            .append("../../etc/passwd", HistoryEntry::now("q", "a"))
            .await
            .unwrap();

        // Written under the root, and readable back through the same name.
        let entries = store.load("../../etc/passwd").await.unwrap();
        assert_eq!(entries.len(), 1);
        let mut files = std::fs::read_dir(store.root()).unwrap();
        let file = files.next().unwrap().unwrap();
        assert!(file.path().starts_with(store.root()));
    }

    #[tokio::test]
    async fn concurrent_appends_do_not_lose_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(HistoryStore::new(dir.path().join("history")));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append("ada", HistoryEntry::now(format!("q{i}"), "a"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entries = store.load("ada").await.unwrap();
        assert_eq!(entries.len(), 8);
    }

    #[test]
    fn sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_username("ada.lovelace-01_x"), "ada.lovelace-01_x");
        assert_eq!(sanitize_username("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_username(""), "anonymous");
        assert_eq!(sanitize_username(".."), "anonymous");
    }

    #[test]
    fn entry_serializes_utc_iso8601() {
        let entry = HistoryEntry {
            timestamp: "2026-08-29T12:00:00Z".parse().unwrap(),
            question: "q".into(),
            answer: "a".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["timestamp"], "2026-08-29T12:00:00Z");
        let back: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
