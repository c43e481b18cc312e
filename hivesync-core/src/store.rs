//! In-memory snapshot store for the five collections
//!
//! The web client kept five module-level mutable arrays; here the store is an
//! explicit object owned by the composing application and shared with the
//! sync layer. Each collection is an independent snapshot container, empty
//! until its first successful load, and only ever replaced wholesale — there
//! is no merge and no diffing. Two interleaved loads of the same collection
//! race benignly: last replacement wins.

use std::sync::RwLock;

use crate::types::{Apiary, Collection, Hive, Inspection, Metric, Task};

/// Snapshot store for all five collections.
#[derive(Debug, Default)]
pub struct Store {
    apiaries: RwLock<Vec<Apiary>>,
    hives: RwLock<Vec<Hive>>,
    inspections: RwLock<Vec<Inspection>>,
    metrics: RwLock<Vec<Metric>>,
    tasks: RwLock<Vec<Task>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cloned snapshot of the apiaries collection, in response order.
    pub fn apiaries(&self) -> Vec<Apiary> {
        self.apiaries.read().expect("store lock poisoned").clone()
    }

    /// Replace the apiaries collection wholesale.
    pub fn replace_apiaries(&self, records: Vec<Apiary>) {
        *self.apiaries.write().expect("store lock poisoned") = records;
    }

    /// Cloned snapshot of the hives collection, in response order.
    pub fn hives(&self) -> Vec<Hive> {
        self.hives.read().expect("store lock poisoned").clone()
    }

    /// Replace the hives collection wholesale.
    pub fn replace_hives(&self, records: Vec<Hive>) {
        *self.hives.write().expect("store lock poisoned") = records;
    }

    /// Cloned snapshot of the inspections collection, in response order.
    pub fn inspections(&self) -> Vec<Inspection> {
        self.inspections.read().expect("store lock poisoned").clone()
    }

    /// Replace the inspections collection wholesale.
    pub fn replace_inspections(&self, records: Vec<Inspection>) {
        *self.inspections.write().expect("store lock poisoned") = records;
    }

    /// Cloned snapshot of the metrics collection, in response order.
    pub fn metrics(&self) -> Vec<Metric> {
        self.metrics.read().expect("store lock poisoned").clone()
    }

    /// Replace the metrics collection wholesale.
    pub fn replace_metrics(&self, records: Vec<Metric>) {
        *self.metrics.write().expect("store lock poisoned") = records;
    }

    /// Cloned snapshot of the tasks collection, in response order.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.read().expect("store lock poisoned").clone()
    }

    /// Replace the tasks collection wholesale.
    pub fn replace_tasks(&self, records: Vec<Task>) {
        *self.tasks.write().expect("store lock poisoned") = records;
    }

    /// Empty one collection (a failed load degrades that view only).
    pub fn clear(&self, collection: Collection) {
        match collection {
            Collection::Apiaries => self.replace_apiaries(Vec::new()),
            Collection::Hives => self.replace_hives(Vec::new()),
            Collection::Inspections => self.replace_inspections(Vec::new()),
            Collection::Metrics => self.replace_metrics(Vec::new()),
            Collection::Tasks => self.replace_tasks(Vec::new()),
        }
    }

    /// Number of cached records in one collection.
    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Apiaries => self.apiaries.read().expect("store lock poisoned").len(),
            Collection::Hives => self.hives.read().expect("store lock poisoned").len(),
            Collection::Inspections => {
                self.inspections.read().expect("store lock poisoned").len()
            }
            Collection::Metrics => self.metrics.read().expect("store lock poisoned").len(),
            Collection::Tasks => self.tasks.read().expect("store lock poisoned").len(),
        }
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }

    /// Whether a cached apiary with this ID exists.
    pub fn apiary_exists(&self, apiary_id: i64) -> bool {
        self.apiaries
            .read()
            .expect("store lock poisoned")
            .iter()
            .any(|a| a.id == apiary_id)
    }

    /// Whether a cached hive with this ID exists.
    pub fn hive_exists(&self, hive_id: i64) -> bool {
        self.hives
            .read()
            .expect("store lock poisoned")
            .iter()
            .any(|h| h.id == hive_id)
    }

    /// Cached hives belonging to one apiary.
    pub fn hives_in_apiary(&self, apiary_id: i64) -> Vec<Hive> {
        self.hives
            .read()
            .expect("store lock poisoned")
            .iter()
            .filter(|h| h.apiary_id == apiary_id)
            .cloned()
            .collect()
    }
}
