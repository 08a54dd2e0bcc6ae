//! Reactive authentication flag
//!
//! [`AuthState`] holds one boolean and notifies observers synchronously when
//! [`AuthState::set`] changes it. It lives on the UI thread: handles are cheap
//! `Rc` clones and are neither `Send` nor `Sync`.

use crate::config::AuthConfig;
use crate::store::SessionStore;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Observer = Rc<dyn Fn(bool)>;

struct Inner {
    authenticated: Cell<bool>,
    observers: RefCell<Vec<(u64, Observer)>>,
    next_id: Cell<u64>,
    /// Pending deliveries; non-empty while a notification round is running
    queue: RefCell<VecDeque<(u64, Observer, bool)>>,
}

impl Inner {
    fn is_registered(&self, id: u64) -> bool {
        self.observers.borrow().iter().any(|(oid, _)| *oid == id)
    }

    fn drain(&self) {
        let _guard = QueueGuard(self);
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some((id, observer, value)) = next else {
                break;
            };
            if self.is_registered(id) {
                observer(value);
            }
        }
    }

    fn remove(&self, id: u64) {
        self.observers.borrow_mut().retain(|(oid, _)| *oid != id);
        tracing::trace!(subscription = id, "Auth state observer removed");
    }
}

/// Empties the delivery queue when a drain ends, including by a panicking
/// observer, so later `set` calls start a fresh round.
struct QueueGuard<'a>(&'a Inner);

impl Drop for QueueGuard<'_> {
    fn drop(&mut self) {
        self.0.queue.borrow_mut().clear();
    }
}

/// Shared authentication flag
#[derive(Clone)]
pub struct AuthState {
    inner: Rc<Inner>,
}

impl AuthState {
    /// Create an unauthenticated state without reading any storage
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                authenticated: Cell::new(false),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                queue: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Create the state, initialized from the session flag under
    /// [`AuthConfig::AUTH_FLAG_KEY`]
    pub fn from_store(store: &dyn SessionStore) -> Self {
        Self::from_store_with_key(store, AuthConfig::AUTH_FLAG_KEY)
    }

    /// Create the state, initialized from the session flag under `key`
    ///
    /// Only the exact value `"true"` authenticates. A missing session context,
    /// a missing key, any other value, or a failed read all leave the flag
    /// `false`.
    pub fn from_store_with_key(store: &dyn SessionStore, key: &str) -> Self {
        let state = Self::new();

        if !store.is_available() {
            tracing::debug!("No session context, starting unauthenticated");
            return state;
        }

        match store.get(key) {
            Ok(Some(value)) if value == AuthConfig::AUTHENTICATED_VALUE => {
                tracing::debug!(key, "Restored authenticated flag from session");
                state.set(true);
            }
            Ok(_) => {
                tracing::debug!(key, "No authenticated flag in session");
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read session flag");
            }
        }

        state
    }

    pub fn get(&self) -> bool {
        self.inner.authenticated.get()
    }

    /// Overwrite the flag and notify every observer in subscription order
    ///
    /// Setting the current value is a no-op. A `set` made from inside an
    /// observer is queued behind the deliveries already in flight, so each
    /// observer still sees the values in call order.
    pub fn set(&self, value: bool) {
        if self.inner.authenticated.replace(value) == value {
            return;
        }
        tracing::debug!(authenticated = value, "Auth state updated");

        let drain = self.inner.queue.borrow().is_empty();
        {
            let observers = self.inner.observers.borrow();
            let mut queue = self.inner.queue.borrow_mut();
            queue.extend(
                observers
                    .iter()
                    .map(|(id, observer)| (*id, Rc::clone(observer), value)),
            );
        }

        if drain {
            self.inner.drain();
        }
    }

    /// Replace the flag with `f(current)`
    pub fn update(&self, f: impl FnOnce(bool) -> bool) {
        self.set(f(self.get()));
    }

    /// Register `observer`, call it once with the current value, and return
    /// the handle that removes it
    pub fn subscribe(&self, observer: impl Fn(bool) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let observer: Observer = Rc::new(observer);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::clone(&observer)));
        tracing::trace!(subscription = id, "Auth state observer added");

        observer(self.get());

        Subscription {
            state: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles compare by identity: two handles are equal when they share a flag
impl PartialEq for AuthState {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("authenticated", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Registration of one observer on an [`AuthState`]
///
/// Dropping the handle unsubscribes. Use [`Subscription::detach`] to keep the
/// observer for the lifetime of the state.
#[must_use = "dropping a Subscription unsubscribes the observer"]
pub struct Subscription {
    state: Weak<Inner>,
    id: Option<u64>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Leave the observer registered and discard the handle
    pub fn detach(mut self) {
        self.id = None;
    }

    pub fn is_active(&self) -> bool {
        match (self.id, self.state.upgrade()) {
            (Some(id), Some(inner)) => inner.is_registered(id),
            _ => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(id) = self.id.take()
            && let Some(inner) = self.state.upgrade()
        {
            inner.remove(id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
