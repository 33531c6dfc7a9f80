//! Process-wide session state storage.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::state::ExtractionState;

/// Maps session ids to their last-known extraction state.
///
/// A cheap-to-clone handle over a shared map. Entries live until explicitly
/// deleted; there is no expiry and no persistence across process restarts.
/// Writes for the same session id are last-writer-wins — callers needing
/// same-session mutual exclusion must layer it on top.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, ExtractionState>>>,
}

impl SessionStore {
    /// Returns a new, empty `SessionStore`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the state stored for `session_id`, if any.
    pub async fn get(&self, session_id: &str) -> Option<ExtractionState> {
        self.sessions.lock().await.get(session_id).cloned()
    }

    /// Stores `state` under `session_id`, overwriting any prior entry.
    pub async fn put(&self, session_id: &str, state: ExtractionState) {
        self.sessions
            .lock()
            .await
            .insert(session_id.to_string(), state);
    }

    /// Removes the entry for `session_id`. Returns `true` if one existed.
    pub async fn delete(&self, session_id: &str) -> bool {
        self.sessions.lock().await.remove(session_id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(doc: &str) -> ExtractionState {
        ExtractionState::new(doc, json!({"properties": {}}), None, 3)
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = SessionStore::new();
        assert!(store.get("s1").await.is_none());
        assert!(store.is_empty().await);

        store.put("s1", state("doc one")).await;
        let got = store.get("s1").await.unwrap();
        assert_eq!(got.document_text, "doc one");
        assert_eq!(store.len().await, 1);

        assert!(store.delete("s1").await);
        assert!(!store.delete("s1").await);
        assert!(store.get("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_prior_entry() {
        let store = SessionStore::new();
        store.put("s1", state("first")).await;
        store.put("s1", state("second")).await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("s1").await.unwrap().document_text, "second");
    }

    #[tokio::test]
    async fn test_independent_sessions_do_not_interfere() {
        let store = SessionStore::new();
        store.put("a", state("doc a")).await;
        store.put("b", state("doc b")).await;

        assert_eq!(store.get("a").await.unwrap().document_text, "doc a");
        assert_eq!(store.get("b").await.unwrap().document_text, "doc b");

        store.delete("a").await;
        assert!(store.get("b").await.is_some());
    }

    #[tokio::test]
    async fn test_clone_shares_underlying_map() {
        let store = SessionStore::new();
        let handle = store.clone();
        handle.put("s1", state("shared")).await;

        assert_eq!(store.get("s1").await.unwrap().document_text, "shared");
    }
}
