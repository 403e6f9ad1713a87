// Session store - the plant each client session has selected
use crate::domain::plant::Plant;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const MAX_SESSIONS: usize = 10_000;

#[derive(Default)]
struct Selections {
    // plant and the sequence number of the select that stored it
    by_session: HashMap<String, (Plant, u64)>,
    next_seq: u64,
}

/// Selected plant per session, bounded to `capacity` sessions.
/// When full, a new session evicts the least recently selected one.
#[derive(Clone)]
pub struct SessionStore {
    selections: Arc<RwLock<Selections>>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            selections: Arc::new(RwLock::new(Selections::default())),
            capacity: capacity.max(1),
        }
    }

    /// Select a plant for the session, returning the previous selection.
    pub async fn select(&self, session_id: &str, plant: Plant) -> Option<Plant> {
        tracing::debug!("Session {} selected plant {}", session_id, plant.id);
        let mut selections = self.selections.write().await;

        if !selections.by_session.contains_key(session_id)
            && selections.by_session.len() >= self.capacity
        {
            let oldest = selections
                .by_session
                .iter()
                .min_by_key(|(_, (_, seq))| *seq)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                tracing::debug!("Session store full, evicting session {}", oldest);
                selections.by_session.remove(&oldest);
            }
        }

        let seq = selections.next_seq;
        selections.next_seq += 1;
        selections
            .by_session
            .insert(session_id.to_string(), (plant, seq))
            .map(|(previous, _)| previous)
    }

    pub async fn current(&self, session_id: &str) -> Option<Plant> {
        self.selections
            .read()
            .await
            .by_session
            .get(session_id)
            .map(|(plant, _)| plant.clone())
    }

    /// Clear the session's selection. Returns whether there was one.
    pub async fn clear(&self, session_id: &str) -> bool {
        self.selections
            .write()
            .await
            .by_session
            .remove(session_id)
            .is_some()
    }
}
