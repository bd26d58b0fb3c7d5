//! Per-session navigation state shared by all request handlers.
//!
//! Each session sits behind its own mutex. The map lock is only taken to find
//! or create an entry, so requests for different users never wait on each
//! other's session, and two requests for the same user are serialized.
//!
//! A session untouched for longer than the idle TTL has expired: it reads as
//! empty, and its entry is dropped the next time the map is swept. Sweeps run
//! lazily when a new session is inserted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use super::SessionKey;
use crate::models::{Coordinate, NavigationSession, PositionFix, RouteSummary};

/// Upper bound on the time between two sweeps.
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Slot {
    session: NavigationSession,
    touched: Instant,
}

type SessionCell = Arc<Mutex<Slot>>;

struct Sessions {
    cells: HashMap<SessionKey, SessionCell>,
    last_sweep: Instant,
}

pub struct SessionStore {
    sessions: RwLock<Sessions>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(Sessions {
                cells: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            idle_ttl,
        }
    }

    /// Lock the session for `key`, creating it if needed.
    ///
    /// An expired session is reset before it is handed out.
    async fn open(&self, key: &SessionKey) -> OwnedMutexGuard<Slot> {
        let existing = self.sessions.read().await.cells.get(key).cloned();
        let cell = match existing {
            Some(cell) => cell,
            None => self.insert(key).await,
        };
        self.refresh(cell.lock_owned().await)
    }

    async fn insert(&self, key: &SessionKey) -> SessionCell {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let sweep_every = self.idle_ttl.min(MAX_SWEEP_INTERVAL);
        if now.saturating_duration_since(sessions.last_sweep) >= sweep_every {
            let before = sessions.cells.len();
            let idle_ttl = self.idle_ttl;
            // A cell cloned out of the map is in use by a request and is kept.
            sessions.cells.retain(|_, cell| {
                Arc::strong_count(cell) > 1
                    || cell
                        .try_lock()
                        .map_or(true, |slot| !slot.is_idle(now, idle_ttl))
            });
            sessions.last_sweep = now;

            let evicted = before - sessions.cells.len();
            if evicted > 0 {
                log::debug!("Evicted {evicted} idle sessions");
            }
        }

        let cell = sessions.cells.entry(key.clone()).or_insert_with(|| {
            Arc::new(Mutex::new(Slot {
                session: NavigationSession::default(),
                touched: now,
            }))
        });
        Arc::clone(cell)
    }

    fn refresh(&self, mut slot: OwnedMutexGuard<Slot>) -> OwnedMutexGuard<Slot> {
        let now = Instant::now();
        if slot.is_idle(now, self.idle_ttl) {
            slot.session = NavigationSession::default();
        }
        slot.touched = now;
        slot
    }

    /// Consistent copy of a session. Unknown or expired keys read as an
    /// empty session; unknown keys are not created.
    pub async fn snapshot(&self, key: &SessionKey) -> NavigationSession {
        let cell = self.sessions.read().await.cells.get(key).cloned();
        match cell {
            Some(cell) => self.refresh(cell.lock_owned().await).session.clone(),
            None => NavigationSession::default(),
        }
    }

    /// Replace the active route. Position is left alone.
    pub async fn set_route(
        &self,
        key: &SessionKey,
        destination: Coordinate,
        route: &RouteSummary,
    ) {
        let mut slot = self.open(key).await;
        slot.session.destination = Some(destination);
        slot.session.last_route_coords = Some(route.path.clone());
    }

    /// Replace the current position. Route fields are left alone.
    ///
    /// Returns the destination as it stood when the position was written.
    pub async fn set_position(
        &self,
        key: &SessionKey,
        coordinate: Coordinate,
        at: DateTime<Utc>,
    ) -> Option<Coordinate> {
        let mut slot = self.open(key).await;
        slot.session.position = Some(PositionFix { coordinate, at });
        slot.session.destination
    }

    /// Record who the user is, for alert reports.
    pub async fn set_profile(
        &self,
        key: &SessionKey,
        display_name: Option<String>,
        contact_email: Option<String>,
    ) {
        let mut slot = self.open(key).await;
        slot.session.display_name = display_name;
        slot.session.contact_email = contact_email;
    }

    /// Drop a session. Returns whether it existed.
    pub async fn forget(&self, key: &SessionKey) -> bool {
        self.sessions.write().await.cells.remove(key).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.cells.len()
    }
}

impl Slot {
    fn is_idle(&self, now: Instant, idle_ttl: Duration) -> bool {
        now.saturating_duration_since(self.touched) > idle_ttl
    }
}
