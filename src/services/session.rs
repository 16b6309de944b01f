//! Current-user view shared by the request handlers.
//!
//! `SessionState` records the latest authenticated view of each user and
//! notifies subscribers of every change. It lives in the top-level app data;
//! there is no other global session state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: Option<String>,
    /// Token expiry, seconds since the epoch.
    pub expires_at: usize,
}

impl SessionUser {
    pub fn is_expired(&self, now: usize) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(SessionUser),
    TokenRefreshed(SessionUser),
    SignedOut(Uuid),
}

impl AuthEvent {
    pub fn user_id(&self) -> Uuid {
        match self {
            AuthEvent::SignedIn(user) | AuthEvent::TokenRefreshed(user) => user.id,
            AuthEvent::SignedOut(id) => *id,
        }
    }
}

type Listener = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, SessionUser>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

#[derive(Clone, Default)]
pub struct SessionState {
    inner: Arc<RwLock<Inner>>,
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    state: Weak<RwLock<Inner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.state.upgrade() {
            let mut guard = inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let mut inner = self.write();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            state: Arc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.read().listeners.len()
    }

    /// The user's latest view, unless their token has expired since.
    pub fn current(&self, user_id: Uuid) -> Option<SessionUser> {
        let now = now();
        self.read()
            .users
            .get(&user_id)
            .filter(|user| !user.is_expired(now))
            .cloned()
    }

    pub fn active_users(&self) -> usize {
        let now = now();
        self.read().users.values().filter(|user| !user.is_expired(now)).count()
    }

    /// Applies an event and notifies every listener.
    pub fn publish(&self, event: AuthEvent) {
        let listeners = {
            let mut inner = self.write();
            inner.apply(&event);
            inner.listeners()
        };

        notify(&listeners, &event);
    }

    /// Records a verified user, publishing `SignedIn` for a new user and
    /// `TokenRefreshed` when the token expiry moved. Returns the event, if any.
    ///
    /// Expired entries are dropped first, so a user whose previous token ran
    /// out signs in again. A user whose own token has already expired is not
    /// recorded.
    pub fn observe(&self, user: SessionUser) -> Option<AuthEvent> {
        let now = now();
        let (event, listeners) = {
            let mut inner = self.write();
            inner.users.retain(|_, known| !known.is_expired(now));
            if user.is_expired(now) {
                return None;
            }

            let event = match inner.users.get(&user.id) {
                None => AuthEvent::SignedIn(user),
                Some(known) if known.expires_at != user.expires_at => {
                    AuthEvent::TokenRefreshed(user)
                }
                Some(_) => return None,
            };
            inner.apply(&event);
            (event, inner.listeners())
        };

        notify(&listeners, &event);
        Some(event)
    }

    pub fn sign_out(&self, user_id: Uuid) {
        self.publish(AuthEvent::SignedOut(user_id));
    }
}

impl Inner {
    fn apply(&mut self, event: &AuthEvent) {
        match event {
            AuthEvent::SignedIn(user) | AuthEvent::TokenRefreshed(user) => {
                self.users.insert(user.id, user.clone());
            }
            AuthEvent::SignedOut(id) => {
                self.users.remove(id);
            }
        }
    }

    fn listeners(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

// Listeners run after the lock is released, so they may call back into the
// state.
fn notify(listeners: &[Listener], event: &AuthEvent) {
    for listener in listeners {
        listener(event);
    }
}

fn now() -> usize {
    usize::try_from(Utc::now().timestamp()).unwrap_or(0)
}
