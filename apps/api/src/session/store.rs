use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::session::EditorSession;

struct Slot {
    session: EditorSession,
    /// Milliseconds since the store's epoch at the last access.
    last_seen_ms: AtomicU64,
}

/// In-memory session registry shared by all handlers.
///
/// Closures run under the lock and must not await; callers clone what they
/// need out of the session before doing slow work. Every read or write counts
/// as activity; sessions idle for longer than the configured TTL are dropped
/// by [`SessionStore::evict_idle`].
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Slot>>>,
    epoch: Instant,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            epoch: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    pub async fn create(&self) -> Uuid {
        let session = EditorSession::new();
        let id = session.id();
        let slot = Slot {
            session,
            last_seen_ms: AtomicU64::new(self.now_ms()),
        };
        self.sessions.write().await.insert(id, slot);
        id
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&EditorSession) -> R) -> Option<R> {
        let sessions = self.sessions.read().await;
        let slot = sessions.get(&id)?;
        slot.last_seen_ms.store(self.now_ms(), Ordering::Relaxed);
        Some(f(&slot.session))
    }

    pub async fn write<R>(&self, id: Uuid, f: impl FnOnce(&mut EditorSession) -> R) -> Option<R> {
        let now = self.now_ms();
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id)?;
        *slot.last_seen_ms.get_mut() = now;
        Some(f(&mut slot.session))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session not accessed within `ttl`; returns how many went.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let cutoff = self.now_ms().saturating_sub(ttl.as_millis() as u64);
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| slot.last_seen_ms.load(Ordering::Relaxed) >= cutoff);
        before - sessions.len()
    }

    /// Runs [`evict_idle`](Self::evict_idle) every `every` until the runtime
    /// shuts down.
    pub fn spawn_sweeper(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(ttl).await;
                if evicted > 0 {
                    info!(
                        "Evicted {evicted} idle session(s); {} remain",
                        store.len().await
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{NavEvent, View};

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_create_read_remove() {
        let store = SessionStore::new();
        let id = store.create().await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.read(id, |s| s.view()).await, Some(View::Landing));
        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.read(id, |s| s.view()).await.is_none());
    }

    #[tokio::test]
    async fn test_write_mutates_in_place() {
        let store = SessionStore::new();
        let id = store.create().await;
        store
            .write(id, |s| s.navigate(NavEvent::GetStarted))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            store.read(id, |s| s.view()).await,
            Some(View::Templates { selected: None })
        );
    }

    #[tokio::test]
    async fn test_clones_share_sessions() {
        let store = SessionStore::new();
        let clone = store.clone();
        let id = store.create().await;
        assert!(clone.read(id, |_| ()).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_idle_drops_only_stale_sessions() {
        let store = SessionStore::new();
        let stale = store.create().await;
        let active = store.create().await;

        tokio::time::advance(Duration::from_secs(40 * 60)).await;
        store.read(active, |_| ()).await.unwrap();
        tokio::time::advance(Duration::from_secs(30 * 60)).await;

        assert_eq!(store.evict_idle(HOUR).await, 1);
        assert!(store.read(stale, |_| ()).await.is_none());
        assert!(store.read(active, |_| ()).await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_count_as_activity() {
        let store = SessionStore::new();
        let id = store.create().await;

        tokio::time::advance(Duration::from_secs(50 * 60)).await;
        store
            .write(id, |s| s.navigate(NavEvent::GetStarted))
            .await
            .unwrap()
            .unwrap();
        tokio::time::advance(Duration::from_secs(50 * 60)).await;

        assert_eq!(store.evict_idle(HOUR).await, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_in_background() {
        let store = SessionStore::new();
        let id = store.create().await;
        let sweeper = store.spawn_sweeper(HOUR, Duration::from_secs(60));

        tokio::time::sleep(HOUR + Duration::from_secs(120)).await;

        assert!(store.read(id, |_| ()).await.is_none());
        sweeper.abort();
    }
}
