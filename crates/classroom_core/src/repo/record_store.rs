//! Generic persisted collection shared by the class and task stores.
//!
//! # Responsibility
//! - Load a collection from one storage key, falling back to seed records.
//! - Apply add/update/delete and persist the full collection synchronously.
//! - Notify subscribers after every successful write, no-ops included.
//!
//! # Invariants
//! - A store reads as empty and reports `is_loading()` until `load()` runs.
//! - Mutations load first, so an unloaded store never overwrites storage.
//! - A failed write leaves the in-memory collection unchanged.
//! - Ids of deleted records are never handed out again by the same store.

use super::ids::IdGenerator;
use super::{StoreError, StoreResult};
use crate::clock::Clock;
use crate::storage::KeyValueStorage;
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

/// A record kept in a [`RecordStore`].
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Create input; carries neither `id` nor `created_at`.
    type Draft;
    /// Partial update input; `id` and `created_at` are not patchable.
    type Patch;

    /// Storage key the whole collection is serialized under.
    const STORAGE_KEY: &'static str;

    fn id(&self) -> i64;
    fn seed() -> Vec<Self>;
    fn create(draft: Self::Draft, id: i64, created_at: NaiveDate) -> Self;
    fn merge(&mut self, patch: Self::Patch);
}

/// Kind of change delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
    /// Update or delete of an unknown id; the collection was still written.
    Unchanged,
}

/// Change notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    /// Storage key of the collection that was written.
    pub key: &'static str,
    pub kind: ChangeKind,
    pub id: i64,
}

/// Where the current collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Seed,
}

/// Handle returned by [`RecordStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreChange)>;

/// In-memory collection mirrored to one storage key.
pub struct RecordStore<T: Record, S: KeyValueStorage> {
    storage: S,
    ids: Box<dyn IdGenerator>,
    clock: Rc<dyn Clock>,
    records: Vec<T>,
    /// Largest id ever loaded or assigned; floor for the next id.
    id_floor: i64,
    loaded: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<T: Record, S: KeyValueStorage> RecordStore<T, S> {
    /// Creates an unloaded store. Call [`Self::load`] before reading.
    pub fn new(storage: S, ids: Box<dyn IdGenerator>, clock: Rc<dyn Clock>) -> Self {
        Self {
            storage,
            ids,
            clock,
            records: Vec::new(),
            id_floor: 0,
            loaded: false,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates and loads a store.
    pub fn open(storage: S, ids: Box<dyn IdGenerator>, clock: Rc<dyn Clock>) -> Self {
        let mut store = Self::new(storage, ids, clock);
        store.load();
        store
    }

    /// Returns `true` until the first load completes.
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// (Re)reads the collection from storage.
    ///
    /// A missing key, a storage read failure or malformed JSON all install the
    /// seed collection. Never fails.
    pub fn load(&mut self) -> LoadSource {
        let key = T::STORAGE_KEY;
        let (records, source) = match self.storage.get_item(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(records) => (records, LoadSource::Persisted),
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=fallback key={key} reason=malformed error={err}"
                    );
                    (T::seed(), LoadSource::Seed)
                }
            },
            Ok(None) => (T::seed(), LoadSource::Seed),
            Err(err) => {
                error!(
                    "event=store_load module=store status=fallback key={key} reason=read_failed error={err}"
                );
                (T::seed(), LoadSource::Seed)
            }
        };

        info!(
            "event=store_load module=store status=ok key={key} source={} count={}",
            match source {
                LoadSource::Persisted => "persisted",
                LoadSource::Seed => "seed",
            },
            records.len()
        );
        self.id_floor = records
            .iter()
            .map(Record::id)
            .fold(self.id_floor, i64::max);
        self.records = records;
        self.loaded = true;
        source
    }

    /// All records in insertion order. Empty while loading.
    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Linear lookup by id.
    pub fn get_by_id(&self, id: i64) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Appends a record built from `draft` and persists the collection.
    ///
    /// `id` comes from the injected generator, `created_at` from the clock.
    pub fn add(&mut self, draft: T::Draft) -> StoreResult<T> {
        self.ensure_loaded();
        let id = self.ids.next_id(self.id_floor);
        let record = T::create(draft, id, self.clock.today());

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next, ChangeKind::Added, id)?;
        self.id_floor = self.id_floor.max(id);
        Ok(record)
    }

    /// Merges `patch` into the record with `id`, then persists.
    ///
    /// Unknown ids are a no-op; the collection is still written back.
    pub fn update(&mut self, id: i64, patch: T::Patch) -> StoreResult<()> {
        self.ensure_loaded();
        let mut next = self.records.clone();
        let change = match next.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                record.merge(patch);
                ChangeKind::Updated
            }
            None => ChangeKind::Unchanged,
        };
        self.commit(next, change, id)
    }

    /// Removes the record with `id`, then persists. Unknown ids are a no-op.
    pub fn delete(&mut self, id: i64) -> StoreResult<()> {
        self.ensure_loaded();
        let mut next = self.records.clone();
        next.retain(|record| record.id() != id);
        let change = if next.len() != self.records.len() {
            ChangeKind::Deleted
        } else {
            ChangeKind::Unchanged
        };
        self.commit(next, change, id)
    }

    /// Registers a callback run after every persisted mutation.
    ///
    /// Failed writes do not notify.
    pub fn subscribe(&mut self, callback: impl FnMut(&StoreChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drops a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn ensure_loaded(&mut self) {
        if !self.loaded {
            self.load();
        }
    }

    fn commit(&mut self, next: Vec<T>, kind: ChangeKind, id: i64) -> StoreResult<()> {
        let key = T::STORAGE_KEY;
        if let Err(err) = self.persist(&next) {
            error!(
                "event=store_persist module=store status=error key={key} record_id={id} error={err}"
            );
            return Err(err);
        }
        debug!(
            "event=store_persist module=store status=ok key={key} record_id={id} count={}",
            next.len()
        );
        self.records = next;

        let event = StoreChange { key, kind, id };
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }
        Ok(())
    }

    fn persist(&self, records: &[T]) -> StoreResult<()> {
        let serialized =
            serde_json::to_string(records).map_err(|err| StoreError::Storage(err.into()))?;
        self.storage.set_item(T::STORAGE_KEY, &serialized)?;
        Ok(())
    }
}
