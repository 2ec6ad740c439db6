/*!
 * Per-user batch session storage.
 *
 * A session is the in-memory working set of entries one user currently has
 * under review, plus the review cursor. The store is injected wherever
 * session state is needed (no global map), keyed by an explicit owner id on
 * every call, and safe under concurrent access from different users.
 */

use log::{debug, info};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::entry::{FieldEdit, LogEntry};

/// One user's working set: the canonical entry list and the review cursor
#[derive(Debug)]
struct BatchSession {
    /// Entries under review, in parse order
    entries: Vec<LogEntry>,

    /// Current review position; invariant `0 <= index < entries.len()`
    index: usize,

    /// Last access time, for idle reclamation
    last_active: Instant,
}

impl BatchSession {
    fn new(entries: Vec<LogEntry>) -> Self {
        Self {
            entries,
            index: 0,
            last_active: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_active = Instant::now();
    }
}

/// Storage contract for batch sessions.
///
/// The store owns the canonical entry list; rendering and editing go through
/// these accessors (clone out, write back) rather than caching a list
/// reference across round trips. At most one session exists per owner; a new
/// `set_entries` overwrites the previous one, last write wins.
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Create or overwrite the owner's session, resetting the cursor to 0.
    /// An empty entry list clears the session instead.
    fn set_entries(&self, owner: &str, entries: Vec<LogEntry>);

    /// The owner's full entry list, if a session exists
    fn entries(&self, owner: &str) -> Option<Vec<LogEntry>>;

    /// One entry by position
    fn entry(&self, owner: &str, index: usize) -> Option<LogEntry>;

    /// Write an entry back at a position; `false` when no session exists or
    /// the position is out of range
    fn replace_entry(&self, owner: &str, index: usize, entry: LogEntry) -> bool;

    /// Apply an edit command to the entry at a position, returning the
    /// edited entry for revalidation
    fn apply_edit(&self, owner: &str, index: usize, edit: FieldEdit) -> Option<LogEntry>;

    /// Number of entries in the owner's session, 0 when absent
    fn entry_count(&self, owner: &str) -> usize;

    /// Move the review cursor; rejected when out of range
    fn set_index(&self, owner: &str, index: usize) -> bool;

    /// Current review cursor, 0 when no session exists
    fn index(&self, owner: &str) -> usize;

    /// Drop the owner's session and its entries
    fn clear(&self, owner: &str);

    /// Drop sessions idle for longer than `max_idle`; returns how many were
    /// reclaimed. The host is expected to call this periodically, since the
    /// store is otherwise only bounded by explicit cancels and commits.
    fn purge_idle(&self, max_idle: Duration) -> usize;

    /// Number of live sessions across all owners
    fn owner_count(&self) -> usize;
}

/// Process-lifetime, in-memory session store
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    /// Sessions keyed by owner id; logically partitioned per key, so no
    /// cross-user coordination is needed beyond the map lock
    sessions: Mutex<HashMap<String, BatchSession>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn set_entries(&self, owner: &str, entries: Vec<LogEntry>) {
        let mut sessions = self.sessions.lock();

        if entries.is_empty() {
            sessions.remove(owner);
            return;
        }

        debug!(
            "Storing batch session for '{}' with {} entries",
            owner,
            entries.len()
        );
        sessions.insert(owner.to_string(), BatchSession::new(entries));
    }

    fn entries(&self, owner: &str) -> Option<Vec<LogEntry>> {
        let mut sessions = self.sessions.lock();
        let session = sessions.get_mut(owner)?;
        session.touch();
        Some(session.entries.clone())
    }

    fn entry(&self, owner: &str, index: usize) -> Option<LogEntry> {
        let mut sessions = self.sessions.lock();
        let session = sessions.get_mut(owner)?;
        session.touch();
        session.entries.get(index).cloned()
    }

    fn replace_entry(&self, owner: &str, index: usize, entry: LogEntry) -> bool {
        let mut sessions = self.sessions.lock();
        match sessions.get_mut(owner) {
            Some(session) if index < session.entries.len() => {
                session.entries[index] = entry;
                session.touch();
                true
            }
            _ => false,
        }
    }

    fn apply_edit(&self, owner: &str, index: usize, edit: FieldEdit) -> Option<LogEntry> {
        let mut sessions = self.sessions.lock();
        let session = sessions.get_mut(owner)?;
        let entry = session.entries.get_mut(index)?;
        entry.apply_edit(edit);
        let entry = entry.clone();
        session.touch();
        Some(entry)
    }

    fn entry_count(&self, owner: &str) -> usize {
        self.sessions
            .lock()
            .get(owner)
            .map(|s| s.entries.len())
            .unwrap_or(0)
    }

    fn set_index(&self, owner: &str, index: usize) -> bool {
        let mut sessions = self.sessions.lock();
        match sessions.get_mut(owner) {
            Some(session) if index < session.entries.len() => {
                session.index = index;
                session.touch();
                true
            }
            _ => false,
        }
    }

    fn index(&self, owner: &str) -> usize {
        self.sessions.lock().get(owner).map(|s| s.index).unwrap_or(0)
    }

    fn clear(&self, owner: &str) {
        if self.sessions.lock().remove(owner).is_some() {
            debug!("Cleared batch session for '{}'", owner);
        }
    }

    fn purge_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active.elapsed() <= max_idle);
        let purged = before - sessions.len();

        if purged > 0 {
            info!("Purged {} idle batch session(s)", purged);
        }
        purged
    }

    fn owner_count(&self) -> usize {
        self.sessions.lock().len()
    }
}
