//! One-shot messages carried across a redirect.
//!
//! Each session owns at most one pending message. Setting a message replaces
//! the pending one; taking it reads and clears the slot under a single lock,
//! so a message is shown exactly once. Messages expire after the session TTL.

use super::layer::SessionId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct FlashEntry {
    message: String,
    inserted_at: Instant,
}

/// Thread-safe, session-keyed flash slots with time-based expiration.
///
/// Clones share the same slots.
#[derive(Clone)]
pub struct FlashStore {
    slots: Arc<Mutex<HashMap<SessionId, FlashEntry>>>,
    ttl: Duration,
}

impl FlashStore {
    /// Create a store whose messages live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Set the pending message for a session, replacing any previous one.
    ///
    /// Expired slots of other sessions are dropped at the same time.
    pub fn set(&self, session: &SessionId, message: impl Into<String>) {
        let now = Instant::now();
        let entry = FlashEntry {
            message: message.into(),
            inserted_at: now,
        };

        if let Ok(mut slots) = self.slots.lock() {
            slots.retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);
            slots.insert(session.clone(), entry);
        }
    }

    /// Take the pending message for a session, leaving the slot empty.
    ///
    /// Returns `None` if nothing is pending or the message has expired.
    pub fn take(&self, session: &SessionId) -> Option<String> {
        let entry = self.slots.lock().ok()?.remove(session)?;

        if entry.inserted_at.elapsed() < self.ttl {
            Some(entry.message)
        } else {
            None
        }
    }

    /// Number of pending messages (including expired ones).
    pub fn len(&self) -> usize {
        self.slots.lock().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How long a message stays pending.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for FlashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashStore")
            .field("ttl", &self.ttl)
            .field("pending", &self.len())
            .finish()
    }
}
