//! Reactive store - owns entities and broadcasts snapshots
//!
//! Every mutating call synchronously invokes each listener, in registration
//! order, with a [`Snapshot`] of the whole collection. Listeners get the
//! full sequence rather than a diff and filter for what they care about.
//!
//! A listener must not call a mutating store method while it is being
//! notified. The store does not guard against this.

use std::ops::Deref;
use std::sync::Arc;

use log::{debug, info};

/// Something the store can own
///
/// The store is the only caller of [`Entity::set_status`] on the entities
/// it holds; outside code only ever sees copies.
pub trait Entity: Clone {
    /// Field set used to create an entity
    type Fields;

    /// Status the entity moves between
    type Status: Copy + PartialEq + std::fmt::Display;

    /// Build a new entity with the given identifier and default status
    fn create(id: String, fields: Self::Fields) -> Self;

    /// Unique identifier
    fn id(&self) -> &str;

    /// Current status
    fn status(&self) -> Self::Status;

    /// Replace the status
    fn set_status(&mut self, status: Self::Status);
}

/// Frozen copy of the store's sequence
///
/// Cheap to clone; later mutations of the store never show through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T>(Arc<[T]>);

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for Snapshot<T> {
    fn from(items: Vec<T>) -> Self {
        Self(Arc::from(items))
    }
}

/// Handle returned by [`ReactiveStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&Snapshot<T>)>;

/// Default identifier prefix
pub const DEFAULT_ID_PREFIX: &str = "PRJ";

/// Owns an ordered collection of entities and notifies listeners on change
pub struct ReactiveStore<T: Entity> {
    items: Vec<T>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    id_prefix: String,
    next_id: u64,
    next_subscription: u64,
}

impl<T: Entity> std::fmt::Debug for ReactiveStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveStore")
            .field("len", &self.items.len())
            .field("listeners", &self.listeners.len())
            .field("id_prefix", &self.id_prefix)
            .finish_non_exhaustive()
    }
}

impl<T: Entity> Default for ReactiveStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> ReactiveStore<T> {
    /// Create an empty store using [`DEFAULT_ID_PREFIX`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }

    /// Create an empty store whose identifiers look like `{prefix}-{n}`
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            listeners: Vec::new(),
            id_prefix: prefix.into(),
            next_id: 1,
            next_subscription: 1,
        }
    }

    /// Create an entity, append it, and notify listeners
    ///
    /// Fields are assumed to be validated already. Returns a copy of the
    /// stored entity.
    pub fn add(&mut self, fields: T::Fields) -> T {
        let id = self.generate_id();
        let entity = T::create(id, fields);
        self.items.push(entity.clone());
        info!("added {} ({} total)", entity.id(), self.items.len());
        self.notify();
        entity
    }

    /// Move an entity to a new status
    ///
    /// Returns `false` without notifying when the id is unknown or the
    /// entity already has that status.
    pub fn move_status(&mut self, id: &str, status: T::Status) -> bool {
        let Some(entity) = self.items.iter_mut().find(|e| e.id() == id) else {
            debug!("move_status ignored: unknown entity {id}");
            return false;
        };

        let previous = entity.status();
        if previous == status {
            debug!("move_status ignored: {id} is already {status}");
            return false;
        }

        entity.set_status(status);
        info!("moved {id}: {previous} -> {status}");
        self.notify();
        true
    }

    /// Register a listener; it is called on every subsequent mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot<T>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!("listener {} subscribed", id.0);
        id
    }

    /// Remove a listener, returns true if it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < before
    }

    /// Copy of the current sequence
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::from(self.items.clone())
    }

    /// Look up an entity by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Number of entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no entities
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of registered listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn generate_id(&mut self) -> String {
        let id = format!("{}-{}", self.id_prefix, self.next_id);
        self.next_id += 1;
        id
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}
