//! Change notification between page editors and renderers.
//!
//! A [`PageFeed`] owns the settings store and the current page snapshot.
//! Renderers subscribe; editors (or a storage watcher in another process)
//! call [`PageFeed::notify`]. Every notification, whatever its source, runs
//! the same reload: fetch, normalize, persist if migrated, then hand each
//! subscriber the new snapshot. Snapshots are immutable; an edit produces a
//! new one instead of touching pages a renderer may still hold.

use crate::store::{SettingsStore, StoreError, load_pages, save_pages};
use crate::types::Page;
use log::debug;
use std::rc::Rc;

/// Why a reload was requested. Both sources take the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// An editor in this process saved pages.
    PagesUpdated,
    /// The underlying storage changed outside this process.
    StorageChanged,
}

pub type Snapshot = Rc<[Page]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Snapshot)>;

pub struct PageFeed<S: SettingsStore> {
    store: S,
    snapshot: Snapshot,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl<S: SettingsStore> PageFeed<S> {
    /// Create a feed and perform the initial load.
    pub fn new(store: S) -> Self {
        let snapshot = load_pages(&store).pages.into();
        Self {
            store,
            snapshot,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Rc::clone(&self.snapshot)
    }

    /// Register `callback` for future snapshots.
    pub fn subscribe(&mut self, callback: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Reload from the store and publish the new snapshot.
    pub fn notify(&mut self, source: ChangeSource) -> Snapshot {
        debug!("reloading custom pages ({source:?})");
        self.snapshot = load_pages(&self.store).pages.into();
        for (_, callback) in &mut self.subscribers {
            callback(&self.snapshot);
        }
        self.snapshot()
    }

    /// Save an edited page list and notify subscribers.
    pub fn save(&mut self, pages: &[Page]) -> Result<Snapshot, StoreError> {
        save_pages(&self.store, pages)?;
        Ok(self.notify(ChangeSource::PagesUpdated))
    }
}
