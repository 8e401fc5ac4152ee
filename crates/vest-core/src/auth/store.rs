//! Single-writer container for the shared `Session`.
//!
//! Every mutation goes through `set`/`update`; readers take cheap clones
//! with `get` or watch for changes with `subscribe`/`changes`.

use std::sync::Arc;

use futures::stream::{self, Stream};
use tokio::sync::watch;

use super::session::{Session, SessionSnapshot};

#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().snapshot()
    }

    /// Replace the whole session.
    pub fn set(&self, session: Session) {
        self.tx.send_replace(session);
    }

    /// Mutate the session in place, notifying subscribers once.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Session),
    {
        self.tx.send_modify(f);
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Stream of snapshots, starting with the current one.
    pub fn changes(&self) -> impl Stream<Item = SessionSnapshot> + Send + 'static {
        let rx = self.tx.subscribe();
        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let snapshot = rx.borrow_and_update().snapshot();
            Some((snapshot, (rx, false)))
        })
    }
}
